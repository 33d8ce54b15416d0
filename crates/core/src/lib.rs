pub mod record;
pub mod weight;

pub use record::{ExtractionStatus, MovementRecord, RecoveryKind};
pub use weight::Weight;
