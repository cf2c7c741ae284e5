use serde::Deserialize;
use std::fmt;

/// Where a session is in the login lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(Credentials),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::LoggedOut
    }
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::LoggedIn(credentials) => Some(credentials),
            Self::LoggedOut => None,
        }
    }
}

/// What a successful login hands back: the session cookie and the
/// anti-forgery token required on state-changing calls.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub cookie: String,
    pub modhash: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cookie", &"<redacted>")
            .field("modhash", &"<redacted>")
            .finish()
    }
}

/// An error reported by the API, sent as `[code, message, field]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub field: Option<String>,
}

impl ApiError {
    fn from_parts(parts: Vec<Option<String>>) -> Self {
        let mut parts = parts.into_iter();
        let code = parts.next().flatten().unwrap_or_default();
        let message = parts.next().flatten().unwrap_or_else(|| code.clone());
        let field = parts.next().flatten();
        Self {
            code,
            message,
            field,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    json: LoginBody,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    errors: Vec<Vec<Option<String>>>,
    data: Option<Credentials>,
}

impl LoginResponse {
    pub fn parse(body: &mut [u8]) -> Result<Self, simd_json::Error> {
        simd_json::serde::from_slice(body)
    }

    /// Either the new credentials or the errors the API reported. A response
    /// with neither yields `Err` with no errors.
    pub fn into_result(self) -> Result<Credentials, Vec<ApiError>> {
        let body = self.json;
        if !body.errors.is_empty() {
            return Err(body.errors.into_iter().map(ApiError::from_parts).collect());
        }
        body.data.ok_or_else(Vec::new)
    }
}
