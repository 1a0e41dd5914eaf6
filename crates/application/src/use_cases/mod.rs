pub mod compose_reply;
pub mod resolve_query;
pub mod synthesize_aaaa;

pub use compose_reply::ComposeReplyUseCase;
pub use resolve_query::{Resolution, ResolutionSource, ResolveQueryUseCase};
pub use synthesize_aaaa::{Synthesis, SynthesizeAaaaUseCase};
