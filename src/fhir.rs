//! FHIR `Task` retrieval facade over a Solid pod.
//!
//! Tasks live under `<pod-base>/fhir/Task/` as Turtle documents, one per
//! task, with field values stated against the FHIR STU3 task-definition
//! predicates. The facade fetches those documents through a
//! [`SolidPodClient`] and maps each subject resource into a [`Task`].
//!
//! Listing is N+1: one fetch for the container, then one fetch per listed
//! subject, strictly in sequence. A subject missing any required statement
//! aborts the whole listing; there is no per-item recovery.
//!
//! Known quirk, kept for compatibility: [`SolidFhirClient::list_tasks`]
//! only considers subjects that also carry the Turtle media-type triple,
//! while [`SolidFhirClient::list_other_persons_tasks`] accepts any
//! `ldp:Resource`. The two really do filter differently.

use sophia_inmem::graph::LightGraph;

use crate::error::Result;
use crate::pod::SolidPodClient;
use crate::rdf::{self, LDP_RESOURCE, TURTLE_RESOURCE};
use crate::token::OAuth2Token;
use crate::types::{Reference, Task, TaskStatus};
use crate::webid::pod_base_url;

/// Container path for task documents, relative to a pod base.
const TASK_CONTAINER: &str = "/fhir/Task/";

/// Marker files written to an uninitialized pod, in write order.
const PLACEHOLDER_FILES: [&str; 2] = ["/fhir/.dummy", "/fhir/Task/.dummy"];

const PLACEHOLDER_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// Prefix prepended to raw definition references.
const DEFINITION_PREFIX: &str = "ActivityDefinition/";

/// Client for FHIR `Task` resources stored in Solid pods.
///
/// Composes a [`SolidPodClient`] for transport; all task semantics (URL
/// layout, required statements, status translation) live here. Methods
/// take `&self` and the client is [`Clone`], so it can be shared freely.
///
/// # Examples
///
/// ```no_run
/// use solid_fhir_client::{OAuth2Token, SolidFhirClient};
///
/// # async fn run(token: OAuth2Token) -> solid_fhir_client::Result<()> {
/// let client = SolidFhirClient::new()?;
/// for task in client.list_tasks(&token, "Patient/alice").await? {
///     println!("{}: {}", task.id, task.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SolidFhirClient {
    pod: SolidPodClient,
}

impl SolidFhirClient {
    /// Create a client with a default [`SolidPodClient`].
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pod: SolidPodClient::new()?,
        })
    }

    /// Create a client on top of an existing pod client.
    pub fn with_pod_client(pod: SolidPodClient) -> Self {
        Self { pod }
    }

    /// The underlying pod client.
    pub fn pod_client(&self) -> &SolidPodClient {
        &self.pod
    }

    /// Make sure the caller's pod has the `/fhir/Task/` directory structure.
    ///
    /// Fetches the task container; when the resulting graph is empty (the
    /// container was never created, or holds nothing), writes the two
    /// placeholder marker files that make the directories exist. A
    /// non-empty graph means the structure is already in place and nothing
    /// is written.
    pub async fn ensure_directories(&self, token: &OAuth2Token) -> Result<()> {
        let url = self.pod.base_url(token, TASK_CONTAINER)?;
        let graph = self.pod.get_rdf(token, &url).await?;
        if rdf::is_empty(&graph) {
            tracing::debug!("Task container at {} is uninitialized, creating markers", url);
            for path in PLACEHOLDER_FILES {
                self.pod
                    .put_file(token, path, "", PLACEHOLDER_CONTENT_TYPE)
                    .await?;
            }
        }
        Ok(())
    }

    /// Fetch one task from the caller's own pod.
    ///
    /// `user_reference` becomes the task's `for` field verbatim.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and whenever the document at
    /// `<own-pod>/fhir/Task/<id>` does not state all three required
    /// properties for that exact subject (a missing document reads as an
    /// empty graph, so it surfaces as a missing identifier).
    pub async fn get_task(
        &self,
        token: &OAuth2Token,
        user_reference: &str,
        id: &str,
    ) -> Result<Task> {
        let subject_url = self
            .pod
            .base_url(token, &format!("{TASK_CONTAINER}{id}"))?;
        self.fetch_task(token, &subject_url, user_reference).await
    }

    /// Fetch one task from another person's pod, identified by `web_id`.
    pub async fn get_other_persons_task(
        &self,
        token: &OAuth2Token,
        web_id: &str,
        user_reference: &str,
        id: &str,
    ) -> Result<Task> {
        let subject_url = pod_base_url(web_id, &format!("{TASK_CONTAINER}{id}"))?;
        self.fetch_task(token, &subject_url, user_reference).await
    }

    /// List the tasks in the caller's own pod.
    ///
    /// Enumerates the container's `ldp:Resource` subjects, keeps those that
    /// also carry the Turtle media-type triple (see the module notes on
    /// this filter), fetches each subject's own document, and maps it.
    /// Order follows the container graph's enumeration order and is not
    /// guaranteed stable across calls.
    pub async fn list_tasks(&self, token: &OAuth2Token, user_reference: &str) -> Result<Vec<Task>> {
        let url = self.pod.base_url(token, TASK_CONTAINER)?;
        let graph = self.pod.get_rdf(token, &url).await?;
        let mut tasks = Vec::new();
        for subject in rdf::subjects_with_type(&graph, LDP_RESOURCE) {
            if !rdf::has_type(&graph, &subject, TURTLE_RESOURCE) {
                continue;
            }
            let subject_graph = self.pod.get_rdf(token, &subject).await?;
            tasks.push(build_task(&subject_graph, &subject, user_reference)?);
        }
        Ok(tasks)
    }

    /// List the tasks in another person's pod, identified by `web_id`.
    ///
    /// Unlike [`SolidFhirClient::list_tasks`], every `ldp:Resource` subject
    /// is fetched; no media-type filter is applied.
    pub async fn list_other_persons_tasks(
        &self,
        token: &OAuth2Token,
        web_id: &str,
        user_reference: &str,
    ) -> Result<Vec<Task>> {
        let url = pod_base_url(web_id, TASK_CONTAINER)?;
        let graph = self.pod.get_rdf(token, &url).await?;
        let mut tasks = Vec::new();
        for subject in rdf::subjects_with_type(&graph, LDP_RESOURCE) {
            let subject_graph = self.pod.get_rdf(token, &subject).await?;
            tasks.push(build_task(&subject_graph, &subject, user_reference)?);
        }
        Ok(tasks)
    }

    async fn fetch_task(
        &self,
        token: &OAuth2Token,
        subject_url: &str,
        user_reference: &str,
    ) -> Result<Task> {
        let graph = self.pod.get_rdf(token, subject_url).await?;
        build_task(&graph, subject_url, user_reference)
    }
}

/// Map one subject resource to a [`Task`].
///
/// Reads the three required statements in a fixed order (identifier,
/// status, definitionReference); the first missing one aborts the mapping.
fn build_task(graph: &LightGraph, subject: &str, user_reference: &str) -> Result<Task> {
    let identifier = rdf::required_literal(graph, subject, &rdf::task_predicate("identifier"))?;
    let status = rdf::required_literal(graph, subject, &rdf::task_predicate("status"))?;
    let definition_reference =
        rdf::required_literal(graph, subject, &rdf::task_predicate("definitionReference"))?;
    Ok(Task {
        id: identifier,
        r#for: Reference::new(user_reference),
        definition: Reference::new(format!("{DEFINITION_PREFIX}{definition_reference}")),
        status: translate_status(&status)?,
    })
}

/// Translate a raw pod status literal into a [`TaskStatus`].
///
/// The pod vocabulary uses `submitted`, `opened`, and `returned`, which map
/// onto the FHIR codes below; anything else must already be a FHIR status
/// code and resolves through [`TaskStatus::from_code`].
fn translate_status(raw: &str) -> Result<TaskStatus> {
    match raw {
        "submitted" => Ok(TaskStatus::Completed),
        "opened" | "returned" => Ok(TaskStatus::InProgress),
        other => TaskStatus::from_code(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolidFhirError;
    use crate::rdf::parse_turtle;
    use pretty_assertions::assert_eq;

    const SUBJECT: &str = "https://pod.example/fhir/Task/42";

    /// A task document the way a pod serves it, with the given field values.
    fn task_document(identifier: &str, status: &str, definition_reference: &str) -> String {
        format!(
            "@prefix fhir: <https://www.hl7.org/fhir/stu3/task-definitions.html#> .\n\
             <> fhir:Task.identifier \"{identifier}\" ;\n\
                fhir:Task.status \"{status}\" ;\n\
                fhir:Task.definitionReference \"{definition_reference}\" ."
        )
    }

    fn subject_graph(turtle: &str) -> LightGraph {
        parse_turtle(turtle, SUBJECT).unwrap()
    }

    // ---- build_task tests ----

    #[test]
    fn maps_all_three_required_statements() {
        let graph = subject_graph(&task_document("42", "opened", "register-patient"));
        let task = build_task(&graph, SUBJECT, "Patient/alice").unwrap();
        assert_eq!(
            task,
            Task {
                id: "42".to_string(),
                r#for: Reference::new("Patient/alice"),
                definition: Reference::new("ActivityDefinition/register-patient"),
                status: TaskStatus::InProgress,
            }
        );
    }

    #[test]
    fn fails_when_identifier_is_missing() {
        let graph = subject_graph(
            "@prefix fhir: <https://www.hl7.org/fhir/stu3/task-definitions.html#> .\n\
             <> fhir:Task.status \"opened\" ;\n\
                fhir:Task.definitionReference \"register-patient\" .",
        );
        let err = build_task(&graph, SUBJECT, "Patient/alice").unwrap_err();
        assert!(matches!(
            err,
            SolidFhirError::MissingProperty { predicate, .. }
                if predicate.ends_with("#Task.identifier")
        ));
    }

    #[test]
    fn fails_when_status_is_missing() {
        let graph = subject_graph(
            "@prefix fhir: <https://www.hl7.org/fhir/stu3/task-definitions.html#> .\n\
             <> fhir:Task.identifier \"42\" ;\n\
                fhir:Task.definitionReference \"register-patient\" .",
        );
        let err = build_task(&graph, SUBJECT, "Patient/alice").unwrap_err();
        assert!(matches!(
            err,
            SolidFhirError::MissingProperty { predicate, .. }
                if predicate.ends_with("#Task.status")
        ));
    }

    #[test]
    fn fails_when_definition_reference_is_missing() {
        let graph = subject_graph(
            "@prefix fhir: <https://www.hl7.org/fhir/stu3/task-definitions.html#> .\n\
             <> fhir:Task.identifier \"42\" ;\n\
                fhir:Task.status \"opened\" .",
        );
        let err = build_task(&graph, SUBJECT, "Patient/alice").unwrap_err();
        assert!(matches!(
            err,
            SolidFhirError::MissingProperty { predicate, .. }
                if predicate.ends_with("#Task.definitionReference")
        ));
    }

    #[test]
    fn fails_when_document_describes_a_different_subject() {
        let graph = parse_turtle(
            &task_document("42", "opened", "register-patient"),
            "https://pod.example/fhir/Task/other",
        )
        .unwrap();
        assert!(build_task(&graph, SUBJECT, "Patient/alice").is_err());
    }

    #[test]
    fn unknown_status_aborts_the_mapping() {
        let graph = subject_graph(&task_document("42", "banana", "register-patient"));
        let err = build_task(&graph, SUBJECT, "Patient/alice").unwrap_err();
        assert!(matches!(
            err,
            SolidFhirError::UnknownStatusCode { code } if code == "banana"
        ));
    }

    // ---- status translation tests ----

    #[test]
    fn pod_statuses_translate_through_the_fixed_table() {
        let table = [
            ("submitted", TaskStatus::Completed),
            ("opened", TaskStatus::InProgress),
            ("returned", TaskStatus::InProgress),
        ];
        for (raw, expected) in table {
            assert_eq!(translate_status(raw).unwrap(), expected, "raw = {raw}");
        }
    }

    #[test]
    fn fhir_codes_pass_through_unchanged() {
        for status in TaskStatus::ALL {
            assert_eq!(translate_status(status.as_code()).unwrap(), status);
        }
    }

    #[test]
    fn translation_is_case_sensitive() {
        assert!(translate_status("Submitted").is_err());
        assert!(translate_status("OPENED").is_err());
    }
}
