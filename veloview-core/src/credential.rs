//! Credential handling: cookie sanitization and header derivation.
//!
//! A credential is opaque bearer material supplied once per session, either
//! as a raw `Cookie` header value copied from browser devtools or as an
//! access/refresh token pair. The only derived artifact is the header value
//! sent with every GraphQL request; no authentication protocol lives here.

use regex::Regex;

use crate::error::CoreError;

/// Minimum plausible length for a sanitized cookie string.
///
/// This is a heuristic guard against pasting a truncated or empty value,
/// not a security check. Real Velog session cookies are far longer.
pub const MIN_COOKIE_LEN: usize = 10;

/// Strips an optional leading `cookie:` prefix (any casing) and surrounding
/// whitespace. Idempotent.
pub fn sanitize_cookie(raw: &str) -> String {
    let trimmed = raw.trim();
    let rest = match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("cookie:") => &trimmed[7..],
        _ => trimmed,
    };
    rest.trim().to_string()
}

/// Extracts a single cookie value from a cookie header string.
///
/// Returns `None` when the named cookie is absent.
pub fn cookie_value(cookie_str: &str, name: &str) -> Option<String> {
    let sanitized = sanitize_cookie(cookie_str);
    let pattern = format!(r"(?:^|;\s*){}=([^;]*)", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(&sanitized)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Which well-known Velog cookies are present in a pasted cookie string.
///
/// Used by the CLI to warn when a pasted value looks like it is missing
/// auth material. Purely advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieHints {
    /// `access_token` cookie present.
    pub access_token: bool,
    /// `refresh_token` cookie present.
    pub refresh_token: bool,
    /// `velog` session cookie present.
    pub velog: bool,
}

impl CookieHints {
    /// Inspects a cookie string for the well-known auth cookies.
    pub fn inspect(cookie_str: &str) -> Self {
        Self {
            access_token: cookie_value(cookie_str, "access_token").is_some(),
            refresh_token: cookie_value(cookie_str, "refresh_token").is_some(),
            velog: cookie_value(cookie_str, "velog").is_some(),
        }
    }

    /// True when none of the known auth cookies are present.
    pub fn looks_unauthenticated(&self) -> bool {
        !self.access_token && !self.refresh_token && !self.velog
    }
}

/// Opaque bearer material for one session.
///
/// Supplied once at session start and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A raw cookie header value as copied from browser devtools.
    RawCookie(String),
    /// An access token with an optional refresh token.
    Tokens {
        /// The `access_token` cookie value.
        access: String,
        /// The `refresh_token` cookie value, when available.
        refresh: Option<String>,
    },
}

impl Credential {
    /// Builds a credential from interactively pasted cookie input.
    ///
    /// Sanitizes the input and rejects values shorter than
    /// [`MIN_COOKIE_LEN`] as implausible.
    pub fn from_cookie_input(raw: &str) -> Result<Self, CoreError> {
        let sanitized = sanitize_cookie(raw);
        let chars = sanitized.chars().count();
        if chars < MIN_COOKIE_LEN {
            return Err(CoreError::InvalidCredential(format!(
                "cookie string too short ({chars} chars); paste the full 'cookie:' header value"
            )));
        }
        Ok(Self::RawCookie(sanitized))
    }

    /// Derives the cookie header value sent with every request.
    ///
    /// Raw cookies are returned sanitized; token pairs are synthesized as
    /// `access_token=<a>` plus an optional `; refresh_token=<r>`.
    pub fn header_value(&self) -> Result<String, CoreError> {
        match self {
            Self::RawCookie(raw) => {
                let sanitized = sanitize_cookie(raw);
                if sanitized.is_empty() {
                    return Err(CoreError::InvalidCredential(
                        "cookie string is empty".to_string(),
                    ));
                }
                Ok(sanitized)
            }
            Self::Tokens { access, refresh } => {
                if access.trim().is_empty() {
                    return Err(CoreError::InvalidCredential(
                        "access token is empty".to_string(),
                    ));
                }
                let mut header = format!("access_token={}", access.trim());
                if let Some(refresh) = refresh {
                    if !refresh.trim().is_empty() {
                        header.push_str(&format!("; refresh_token={}", refresh.trim()));
                    }
                }
                Ok(header)
            }
        }
    }
}
