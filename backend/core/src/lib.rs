pub mod error;
pub mod ledger;
pub mod record;
pub mod traits;

pub use error::{FreshError, ParseWarning};
pub use ledger::Ledger;
pub use record::{ProduceAnalysis, Record, UNSPECIFIED_PRODUCE};
pub use traits::{GenerationConfig, VisionModel, VisionRequest, VisionResponse};
