// tablemirror-core/src/application/mod.rs

pub mod orchestrator;
pub mod synthesizer;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use tablemirror_core::application::{run_mirror, FailurePolicy};`

pub use orchestrator::{FailurePolicy, RunResult, RunState, TableFailure, plan_mirror, run_mirror};
pub use synthesizer::{ColumnDrift, SchemaSynthesizer, SynthesisOutcome, SynthesisReport};
