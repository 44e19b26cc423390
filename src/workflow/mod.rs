mod coverage;
mod document;
mod reference;

pub use coverage::{validate_required_fields, validate_workflow};
pub use document::{parse_workflow_data, Workflow};
pub use reference::WorkflowRef;
