use serde::{Deserialize, Serialize};

/// A FHIR reference to another resource, e.g. `Patient/123` or
/// `ActivityDefinition/register-patient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The literal reference value, relative or absolute.
    pub reference: String,
}

impl Reference {
    /// Create a reference from any string-like value.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}
