//! OAuth2 credentials and WebID extraction.

use base64::Engine;
use serde::Deserialize;

use crate::error::{Result, SolidFhirError};

/// OAuth2 credentials for pod access.
///
/// The access token authenticates every request (sent as a bearer header).
/// The id token is an OpenID Connect JWT whose payload identifies the caller;
/// its WebID claim is what ties a token to the caller's own pod.
///
/// Tokens are supplied per call and never stored by the clients in this
/// crate.
#[derive(Debug, Clone)]
pub struct OAuth2Token {
    access_token: String,
    id_token: String,
}

/// The id token payload fields this crate reads.
#[derive(Debug, Deserialize)]
struct IdClaims {
    #[serde(default)]
    webid: Option<String>,
    #[serde(default)]
    sub: Option<String>,
}

impl OAuth2Token {
    /// Create a token pair.
    pub fn new(access_token: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: id_token.into(),
        }
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The raw id token.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// The access token as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Extract the caller's WebID from the id token payload.
    ///
    /// Solid-OIDC servers put the WebID in the `webid` claim; older servers
    /// used `sub`. The `webid` claim wins when both are present. The token
    /// signature is not verified here; verification is the issuer's concern
    /// and happens before a token ever reaches this crate.
    ///
    /// # Errors
    ///
    /// Returns [`SolidFhirError::InvalidToken`] when the id token is not a
    /// decodable JWT or carries neither claim.
    pub fn web_id(&self) -> Result<String> {
        let payload = self
            .id_token
            .split('.')
            .nth(1)
            .ok_or_else(|| SolidFhirError::InvalidToken {
                message: "id token is not a JWT".to_string(),
            })?;
        let bytes = base64::prelude::BASE64_URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| SolidFhirError::InvalidToken {
                message: format!("payload is not base64url: {e}"),
            })?;
        let claims: IdClaims =
            serde_json::from_slice(&bytes).map_err(|e| SolidFhirError::InvalidToken {
                message: format!("payload is not a JSON object: {e}"),
            })?;
        claims
            .webid
            .or(claims.sub)
            .ok_or_else(|| SolidFhirError::InvalidToken {
                message: "payload carries neither a webid nor a sub claim".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Assemble an unsigned JWT around the given payload claims.
    fn id_token_with(claims: serde_json::Value) -> String {
        let encode = |v: &serde_json::Value| {
            base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(v.to_string())
        };
        let header = serde_json::json!({ "alg": "none" });
        format!("{}.{}.signature", encode(&header), encode(&claims))
    }

    #[test]
    fn bearer_header_wraps_access_token() {
        let token = OAuth2Token::new("secret", "ignored");
        assert_eq!(token.to_header_value(), "Bearer secret");
    }

    #[test]
    fn web_id_reads_webid_claim() {
        let token = OAuth2Token::new(
            "a",
            id_token_with(serde_json::json!({
                "webid": "https://alice.example/profile/card#me",
                "sub": "https://legacy.example/alice#me",
            })),
        );
        assert_eq!(token.web_id().unwrap(), "https://alice.example/profile/card#me");
    }

    #[test]
    fn web_id_falls_back_to_sub_claim() {
        let token = OAuth2Token::new(
            "a",
            id_token_with(serde_json::json!({
                "sub": "https://alice.example/profile/card#me",
            })),
        );
        assert_eq!(token.web_id().unwrap(), "https://alice.example/profile/card#me");
    }

    #[test]
    fn web_id_fails_without_either_claim() {
        let token = OAuth2Token::new("a", id_token_with(serde_json::json!({ "iss": "x" })));
        assert!(matches!(
            token.web_id().unwrap_err(),
            SolidFhirError::InvalidToken { .. }
        ));
    }

    #[test]
    fn web_id_fails_on_opaque_token() {
        let token = OAuth2Token::new("a", "not-a-jwt");
        assert!(matches!(
            token.web_id().unwrap_err(),
            SolidFhirError::InvalidToken { .. }
        ));
    }

    #[test]
    fn web_id_fails_on_undecodable_payload() {
        let token = OAuth2Token::new("a", "head.!!not-base64!!.sig");
        assert!(matches!(
            token.web_id().unwrap_err(),
            SolidFhirError::InvalidToken { .. }
        ));
    }
}
