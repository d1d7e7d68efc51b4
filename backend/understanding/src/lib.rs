//! Produce image understanding: the fixed analysis prompt, vision-model
//! providers, the reply parser, and the analysis session.

pub mod parser;
pub mod prompt;
pub mod providers;
pub mod session;

pub use parser::{ParsedReply, parse_reply};
pub use prompt::{PROMPT_TEMPLATE, create_prompt};
pub use providers::{GeminiProvider, MockVisionModel, VertexAuth, VertexProvider};
pub use session::AnalysisSession;
