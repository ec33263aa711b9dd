// core/src/flow/control.rs

//! Signals for controlling workflow flow and the outcome of a workflow run.

/// Returned by a step handler to continue with the next step or halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt immediately. No further handlers or steps are executed.
  Stop,
}

/// Outcome of a full workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran (optional steps without handlers are skipped).
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
