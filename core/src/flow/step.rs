// core/src/flow/step.rs

/// A named step of a workflow.
///
/// A non-optional step must have at least one handler registered by the time
/// the workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}

impl StepDef {
  pub fn new(name: impl Into<String>, optional: bool) -> Self {
    Self {
      name: name.into(),
      optional,
    }
  }
}
