pub mod auth;
pub mod content;
pub mod gemini;
pub mod mock;
pub mod vertex;

pub use auth::VertexAuth;
pub use gemini::GeminiProvider;
pub use mock::MockVisionModel;
pub use vertex::VertexProvider;
