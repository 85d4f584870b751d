//! Application use cases

pub mod run_pipeline;

pub use run_pipeline::{PipelineResult, RunPipelineError, RunPipelineInput, RunPipelineUseCase};
