//! FHIR domain types exchanged with a pod.

mod reference;
mod task;

pub use reference::Reference;
pub use task::{Task, TaskStatus};
