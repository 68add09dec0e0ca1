//! RDF vocabulary and graph plumbing for pod documents.
//!
//! Everything sophia-specific lives here: Turtle parsing (with the document
//! URL as base IRI, so relative references resolve the way the pod served
//! them) and the handful of graph queries the task mapping needs. Lookup
//! arguments are parsed as IRIs up front: [`required_literal`] reports a
//! malformed subject or predicate as [`SolidFhirError::InvalidUrl`], while
//! the boolean and listing queries treat one as matching nothing.

use sophia_api::prelude::*;
use sophia_api::term::matcher::Any;
use sophia_inmem::graph::LightGraph;
use sophia_turtle::parser::turtle::TurtleParser;

use crate::error::{Result, SolidFhirError};

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `ldp:Resource`, the generic type Solid servers attach to every resource
/// listed in a container.
pub const LDP_RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";

/// The media-type resource IRI for Turtle documents, attached by Solid
/// servers alongside `ldp:Resource`.
pub const TURTLE_RESOURCE: &str =
    "http://www.w3.org/ns/iana/media-types/text/turtle#Resource";

/// Namespace under which FHIR STU3 task field predicates live.
pub const TASK_DEFINITIONS: &str = "https://www.hl7.org/fhir/stu3/task-definitions.html";

/// The predicate IRI for a task field, e.g. `task_predicate("identifier")`.
pub fn task_predicate(field: &str) -> String {
    format!("{TASK_DEFINITIONS}#Task.{field}")
}

/// Parse a Turtle document into an in-memory graph.
///
/// Relative IRIs in the document are resolved against `base_url`, which is
/// the URL the document was fetched from.
///
/// # Errors
///
/// Returns [`SolidFhirError::InvalidUrl`] when `base_url` is not a valid
/// IRI, and [`SolidFhirError::Turtle`] when the body does not parse.
pub fn parse_turtle(body: &str, base_url: &str) -> Result<LightGraph> {
    let base = Iri::new(base_url.to_string()).map_err(|e| SolidFhirError::InvalidUrl {
        value: base_url.to_string(),
        message: e.to_string(),
    })?;
    TurtleParser { base: Some(base) }
        .parse_str(body)
        .collect_triples()
        .map_err(|e| SolidFhirError::Turtle {
            url: base_url.to_string(),
            message: e.to_string(),
        })
}

/// Whether the graph holds no statements at all.
pub fn is_empty(graph: &LightGraph) -> bool {
    graph.triples().next().is_none()
}

/// Distinct subject IRIs carrying `rdf:type <type_iri>`, in graph order.
///
/// Blank-node subjects are skipped; container listings name every member by
/// IRI. A `type_iri` that is not an IRI cannot occur in a graph, so it
/// matches nothing.
pub fn subjects_with_type(graph: &LightGraph, type_iri: &str) -> Vec<String> {
    let Ok(wanted) = Iri::new(type_iri) else {
        return Vec::new();
    };
    let rdf_type = Iri::new_unchecked(RDF_TYPE);
    let mut subjects: Vec<String> = Vec::new();
    for triple in graph.triples_matching(Any, [rdf_type], [wanted]) {
        let triple = unwrap_query(triple);
        if let Some(iri) = triple.s().iri() {
            let iri = iri.as_str().to_string();
            if !subjects.contains(&iri) {
                subjects.push(iri);
            }
        }
    }
    subjects
}

/// Whether `subject` carries `rdf:type <type_iri>`.
///
/// An argument that is not an IRI cannot occur in a graph, so it fails the
/// test rather than erroring.
pub fn has_type(graph: &LightGraph, subject: &str, type_iri: &str) -> bool {
    let (Ok(s), Ok(o)) = (Iri::new(subject), Iri::new(type_iri)) else {
        return false;
    };
    let p = Iri::new_unchecked(RDF_TYPE);
    graph.triples_matching([s], [p], [o]).next().is_some()
}

/// The literal value of the `predicate` statement on `subject`.
///
/// Required-property semantics: absence is an error, not an empty result.
/// A statement whose object is not a literal does not satisfy the lookup.
///
/// # Errors
///
/// Returns [`SolidFhirError::InvalidUrl`] when `subject` or `predicate` is
/// not a valid IRI, and [`SolidFhirError::MissingProperty`] naming the pair
/// when no literal statement exists.
pub fn required_literal(graph: &LightGraph, subject: &str, predicate: &str) -> Result<String> {
    let s = parse_iri(subject)?;
    let p = parse_iri(predicate)?;
    for triple in graph.triples_matching([s], [p], Any) {
        let triple = unwrap_query(triple);
        if let Some(value) = triple.o().lexical_form() {
            return Ok(value.to_string());
        }
    }
    Err(SolidFhirError::MissingProperty {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
    })
}

/// Parse a lookup argument as an IRI.
fn parse_iri(value: &str) -> Result<Iri<&str>> {
    Iri::new(value).map_err(|e| SolidFhirError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Matching never inserts into the term index, and index exhaustion is the
/// only failure an in-memory graph can report.
fn unwrap_query<T, E: std::fmt::Debug>(result: std::result::Result<T, E>) -> T {
    result.expect("in-memory graph query failed")
}
