//! Pod base URL resolution from WebIDs.

use url::{Position, Url};

use crate::error::{Result, SolidFhirError};

/// Resolve a pod-relative path against the pod that serves `web_id`.
///
/// Only the scheme and authority of the WebID identify the pod; its own
/// path, query, and fragment are discarded. `path` must start with `/`.
///
/// ```
/// use solid_fhir_client::pod_base_url;
///
/// let url = pod_base_url("https://alice.example/profile/card#me", "/fhir/Task/")?;
/// assert_eq!(url, "https://alice.example/fhir/Task/");
/// # Ok::<(), solid_fhir_client::SolidFhirError>(())
/// ```
///
/// # Errors
///
/// Returns [`SolidFhirError::InvalidUrl`] when `web_id` does not parse as an
/// absolute URL or has no host.
pub fn pod_base_url(web_id: &str, path: &str) -> Result<String> {
    let url = Url::parse(web_id).map_err(|e| SolidFhirError::InvalidUrl {
        value: web_id.to_string(),
        message: e.to_string(),
    })?;
    if !url.has_host() {
        return Err(SolidFhirError::InvalidUrl {
            value: web_id.to_string(),
            message: "WebID has no host".to_string(),
        });
    }
    Ok(format!("{}{}", &url[..Position::BeforePath], path))
}
