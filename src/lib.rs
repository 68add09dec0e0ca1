//! Client for FHIR `Task` resources stored in Solid personal data pods.
//!
//! # Overview
//!
//! A Solid pod keeps each task as a small Turtle document under
//! `<pod-base>/fhir/Task/`. This crate fetches those documents over
//! authenticated HTTP and maps them into typed [`Task`] records: three
//! required statements per subject (identifier, status, definition
//! reference), with the pod's status vocabulary translated into the FHIR
//! STU3 status codes.
//!
//! Two layers, composed rather than inherited:
//!
//! - [`SolidPodClient`] -generic pod access: WebID-based base URL
//!   resolution, authenticated Turtle reads (absent documents read as empty
//!   graphs), and file writes.
//! - [`SolidFhirClient`] -the task facade: directory bootstrap, single
//!   fetches, and N+1 listings, all strictly sequential.
//!
//! Failures are never absorbed: a missing required statement, an unknown
//! status code, or a non-success response aborts the operation at hand and
//! surfaces as a [`SolidFhirError`].
//!
//! # Example
//!
//! ```no_run
//! use solid_fhir_client::{OAuth2Token, SolidFhirClient};
//!
//! # async fn run() -> solid_fhir_client::Result<()> {
//! let client = SolidFhirClient::new()?;
//! let token = OAuth2Token::new("access-token", "id-token");
//!
//! client.ensure_directories(&token).await?;
//! for task in client.list_tasks(&token, "Patient/alice").await? {
//!     println!("{} -> {} ({})", task.id, task.definition.reference, task.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`fhir`] -the task retrieval facade
//! - [`pod`] -authenticated HTTP access to a pod
//! - [`token`] -OAuth2 credentials and WebID extraction
//! - [`webid`] -pod base URL resolution
//! - [`rdf`] -Turtle parsing and the graph queries behind the mapping
//! - [`types`] -the `Task`, `TaskStatus`, and `Reference` domain types
//! - [`error`] -the error taxonomy

pub mod error;
pub mod fhir;
pub mod pod;
pub mod rdf;
pub mod token;
pub mod types;
pub mod webid;

pub use error::{Result, SolidFhirError};
pub use fhir::SolidFhirClient;
pub use pod::SolidPodClient;
pub use token::OAuth2Token;
pub use types::{Reference, Task, TaskStatus};
pub use webid::pod_base_url;
