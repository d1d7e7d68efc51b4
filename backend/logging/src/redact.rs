//! Log Redaction Layer
//!
//! Scrubs bearer tokens, Google OAuth access tokens, and API keys from
//! strings before they reach the logs. Provider error bodies and request
//! URLs can echo credentials back.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static OAUTH_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ya29\.[a-zA-Z0-9\-_\.]+").unwrap());
static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z\-_]{20,}").unwrap());
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = OAUTH_TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    let redacted = API_KEY_RE.replace_all(&redacted, "[REDACTED_KEY]");
    KEY_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED_KEY]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_and_oauth_tokens() {
        let raw = "401 for Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9 and ya29.a0AfH6SMBx-abc_123";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGci"));
        assert!(!clean.contains("ya29.a0AfH6SMBx"));
    }

    #[test]
    fn redacts_api_key_query_param() {
        let raw = "POST https://example.test/v1/models/x:generateContent?key=secret123&alt=json";
        let clean = redact_sensitive_data(raw);
        assert!(clean.contains("?key=[REDACTED_KEY]&alt=json"));
        assert!(!clean.contains("secret123"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive_data("Produce: Banana"), "Produce: Banana");
    }
}
