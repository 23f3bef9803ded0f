pub mod config;
mod orchestrator;
mod session;
mod types;

pub use config::GradingConfig;
pub use orchestrator::Pipeline;
pub use session::{run_session, LoopControl, SessionSummary};
pub use types::{
    Diagnostics, FrameReport, GradedSheet, NoOpReporter, PipelineStage, ProgressReporter,
};
