//! The token injection rule.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// What happened to the token header of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    /// The discovered token was added.
    Injected,
    /// The caller already set the header; left untouched.
    CallerProvided,
    /// No usable token was discoverable; headers untouched.
    Absent,
}

impl TokenOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenOutcome::Injected => "injected",
            TokenOutcome::CallerProvided => "caller",
            TokenOutcome::Absent => "absent",
        }
    }
}

/// Whether the caller holds a non-empty value for `name`.
pub fn has_explicit_value(headers: &HeaderMap, name: &HeaderName) -> bool {
    headers.get_all(name).iter().any(|value| !value.is_empty())
}

/// Set `name` to the discovered token unless the caller already set it.
///
/// An empty caller value does not count as set. A token that is not a valid
/// header value is treated as not discoverable.
pub fn inject_token(
    headers: &mut HeaderMap,
    name: &HeaderName,
    discovered: Option<&str>,
) -> TokenOutcome {
    if has_explicit_value(headers, name) {
        return TokenOutcome::CallerProvided;
    }
    let Some(token) = discovered.filter(|t| !t.is_empty()) else {
        return TokenOutcome::Absent;
    };

    match HeaderValue::from_str(token) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(name.clone(), value);
            TokenOutcome::Injected
        }
        Err(_) => {
            tracing::warn!(header = %name, "Discovered token is not a valid header value, skipping");
            TokenOutcome::Absent
        }
    }
}
