// module declaration
pub mod core;
pub mod network;
pub mod orchestrator;
pub mod records;

// export App and related types
pub use core::{Activity, App};
pub use orchestrator::{CostEstimate, EstimateOutcome, MintOrchestrator, MintOutcome, MintPhase};
pub use records::{normalize, RecordLister};
