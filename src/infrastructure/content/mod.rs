mod placeholder_content_generator;
mod workflow_content_generator;

pub use placeholder_content_generator::PlaceholderContentGenerator;
pub use workflow_content_generator::{WorkflowContentGenerator, parse_workflow_response};
