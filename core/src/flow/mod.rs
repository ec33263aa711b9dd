// core/src/flow/mod.rs

//! A small async workflow engine: named steps, shared context, early stop.

pub mod context_data;
pub mod control;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use pipeline::{Handler, Pipeline};
pub use registry::FlowRegistry;
pub use step::StepDef;
