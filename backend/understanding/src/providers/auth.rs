//! Vertex AI credentials.
//!
//! The configured credential is either a service-account key, given inline
//! as JSON or as a path to the key file, or a ready OAuth access token such
//! as the output of `gcloud auth print-access-token`. Service-account keys
//! are exchanged for short-lived access tokens, which `gcp_auth` caches and
//! refreshes.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use gcp_auth::{CustomServiceAccount, TokenProvider};

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(Clone)]
pub enum VertexAuth {
    AccessToken(String),
    ServiceAccount(Arc<CustomServiceAccount>),
}

impl VertexAuth {
    /// Classify a configured credential. Key material is parsed here so a
    /// broken key is reported at startup, not on the first analysis.
    pub fn from_credential(credential: &str) -> Result<Self> {
        let credential = credential.trim();
        if credential.is_empty() {
            bail!("credential is empty");
        }

        if credential.starts_with('{') {
            let account = CustomServiceAccount::from_json(credential)
                .context("credential looks like JSON but is not a valid service-account key")?;
            return Ok(Self::ServiceAccount(Arc::new(account)));
        }

        let path = Path::new(credential);
        if path.is_file() {
            let account = CustomServiceAccount::from_file(path).with_context(|| {
                format!("{} is not a valid service-account key file", path.display())
            })?;
            return Ok(Self::ServiceAccount(Arc::new(account)));
        }
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            bail!("service-account key file {} not found", path.display());
        }

        Ok(Self::AccessToken(credential.to_string()))
    }

    /// The token to send as `Authorization: Bearer`.
    pub async fn bearer_token(&self) -> Result<String> {
        match self {
            Self::AccessToken(token) => Ok(token.clone()),
            Self::ServiceAccount(account) => {
                let token = account
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .context("failed to obtain an access token for the service account")?;
                Ok(token.as_str().to_string())
            }
        }
    }
}

impl fmt::Debug for VertexAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("VertexAuth::AccessToken(***)"),
            Self::ServiceAccount(_) => f.write_str("VertexAuth::ServiceAccount(***)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_token_is_sent_as_is() {
        let auth = VertexAuth::from_credential("  ya29.a0Af-token  ").unwrap();
        assert!(matches!(auth, VertexAuth::AccessToken(_)));
        assert_eq!(auth.bearer_token().await.unwrap(), "ya29.a0Af-token");
    }

    #[test]
    fn missing_key_file_is_rejected() {
        let err = VertexAuth::from_credential("/no/such/dir/service-account.json").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn key_file_path_is_never_used_as_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sa.json");
        std::fs::write(&path, r#"{"type": "service_account"}"#).unwrap();

        let result = VertexAuth::from_credential(path.to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn malformed_inline_key_is_rejected() {
        let result = VertexAuth::from_credential(r#"{"type": "service_account", "project_id": "orchard"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn debug_output_hides_secret() {
        let auth = VertexAuth::AccessToken("ya29.secret".into());
        assert!(!format!("{auth:?}").contains("secret"));
    }
}
