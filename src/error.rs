//! Error types for pod access and task mapping.
//!
//! Every failure surfaces to the immediate caller as a [`SolidFhirError`];
//! there is no retry, no partial result, and no default substitution
//! anywhere in this crate.

use thiserror::Error;

/// Errors produced while talking to a pod or mapping its contents.
#[derive(Debug, Error)]
pub enum SolidFhirError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// Builder error from the HTTP client.
        #[source]
        source: reqwest::Error,
    },

    /// A request failed at the transport level (connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Http {
        /// The URL the request was sent to.
        url: String,
        /// The transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The pod answered with a status code the operation cannot work with.
    ///
    /// `404 Not Found` on a read is not reported here; absent documents
    /// behave as empty graphs.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// The URL the request was sent to.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// A response body could not be parsed as Turtle.
    #[error("invalid Turtle document at {url}: {message}")]
    Turtle {
        /// The document URL.
        url: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A required statement is absent from the fetched graph.
    ///
    /// Raised for the identifier, status, and definitionReference lookups;
    /// a subject missing any of the three produces no task record at all.
    #[error("missing required property <{predicate}> on <{subject}>")]
    MissingProperty {
        /// The subject resource IRI.
        subject: String,
        /// The predicate IRI that had no statement.
        predicate: String,
    },

    /// A task status literal matched none of the known status codes.
    #[error("unknown task status code {code:?}")]
    UnknownStatusCode {
        /// The literal as it appeared in the graph, after translation.
        code: String,
    },

    /// The id token could not be decoded or carries no WebID claim.
    #[error("invalid id token: {message}")]
    InvalidToken {
        /// What was wrong with the token.
        message: String,
    },

    /// A WebID or computed URL is not usable.
    #[error("invalid URL {value:?}: {message}")]
    InvalidUrl {
        /// The offending value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SolidFhirError>;
