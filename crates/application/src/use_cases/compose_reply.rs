use super::resolve_query::ResolveQueryUseCase;
use super::synthesize_aaaa::SynthesizeAaaaUseCase;
use crate::records::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::{debug, warn};

/// Drives resolution for every question of one inbound query and assembles
/// the single reply sent back to the client.
pub struct ComposeReplyUseCase {
    resolver: Arc<ResolveQueryUseCase>,
    synthesizer: SynthesizeAaaaUseCase,
}

impl ComposeReplyUseCase {
    pub fn new(resolver: Arc<ResolveQueryUseCase>, synthesizer: SynthesizeAaaaUseCase) -> Self {
        Self {
            resolver,
            synthesizer,
        }
    }

    pub async fn execute(&self, request: &Message) -> Message {
        let recursion_desired = request.recursion_desired();
        let mut answers: Vec<Record> = Vec::new();
        let mut last_response: Option<Message> = None;

        for query in request.queries() {
            let question = RecordTypeMapper::question_from_query(query);
            let mut response = self
                .resolver
                .execute(&question, recursion_desired)
                .await
                .message;

            if response.response_code() != ResponseCode::NoError {
                warn!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    rcode = %response.response_code(),
                    "Response code not successful"
                );
            } else if !response.answers().is_empty() {
                debug!(
                    domain = %question.name,
                    answers = response.answers().len(),
                    "Got answers"
                );
                answers.extend(response.take_answers());
            } else if SynthesizeAaaaUseCase::should_synthesize(&question, &response) {
                let synthesis = self.synthesizer.execute(&question, recursion_desired).await;
                answers.extend(synthesis.records);
                response = synthesis.response;
            } else {
                debug!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    "Empty answer (NODATA)"
                );
            }

            last_response = Some(response);
        }

        Self::build_reply(request, answers, last_response)
    }

    /// Header flags and authority come from the last response consulted; the id
    /// is always the inbound query's.
    fn build_reply(
        request: &Message,
        answers: Vec<Record>,
        last_response: Option<Message>,
    ) -> Message {
        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .add_queries(request.queries().to_vec());

        match last_response {
            Some(mut last) => {
                reply
                    .set_response_code(last.response_code())
                    .set_authoritative(last.authoritative())
                    .set_truncated(last.truncated())
                    .set_recursion_available(last.recursion_available())
                    .insert_name_servers(last.take_name_servers());
            }
            None => {
                debug!(id = request.id(), "Query without questions");
                reply.set_response_code(ResponseCode::FormErr);
            }
        }

        reply.insert_answers(answers);
        reply
    }
}
