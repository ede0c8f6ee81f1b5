pub type GraphResult<T> = Result<T, GraphError>;

/// Errors returned by every session and endpoint call.
/// Nothing is retried; the caller decides whether a failure is fatal.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A dependent call was made before its setup call succeeded.
    #[error("{missing} is not set; call {requires} first")]
    State {
        missing: &'static str,
        requires: &'static str,
    },

    /// The client-credentials token exchange failed.
    #[error("authentication failed: {message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// A lookup by name returned nothing.
    #[error("{resource} not found: {name}")]
    NotFound { resource: &'static str, name: String },

    /// Non-success status, transport failure or unusable payload.
    #[error("{}", describe_request(*status, code.as_deref(), message))]
    Request {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },
}

impl GraphError {
    pub(crate) fn state(missing: &'static str, requires: &'static str) -> Self {
        GraphError::State { missing, requires }
    }

    pub(crate) fn auth(status: Option<u16>, message: impl Into<String>) -> Self {
        GraphError::Auth {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(resource: &'static str, name: impl Into<String>) -> Self {
        GraphError::NotFound {
            resource,
            name: name.into(),
        }
    }

    /// Local failure with no HTTP status (transport, serialization, bad input).
    pub(crate) fn request(message: impl Into<String>) -> Self {
        GraphError::Request {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Builds a `Request` error from a Graph error envelope:
    /// `{ "error": { "code": "...", "message": "..." } }`.
    /// Bodies that are not JSON keep a generic message.
    pub(crate) fn from_graph_response(status: u16, body: &[u8]) -> Self {
        let (code, message) = parse_graph_error_body(body);
        GraphError::Request {
            status: Some(status),
            code,
            message: message.unwrap_or_else(|| format!("graph api returned HTTP {status}")),
        }
    }

    /// HTTP status carried by the error, when the remote side produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::Auth { status, .. } | GraphError::Request { status, .. } => *status,
            GraphError::State { .. } | GraphError::NotFound { .. } => None,
        }
    }

    pub fn is_state(&self) -> bool {
        matches!(self, GraphError::State { .. })
    }
}

fn describe_request(status: Option<u16>, code: Option<&str>, message: &str) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("HTTP {status} ({code}): {message}"),
        (Some(status), None) => format!("HTTP {status}: {message}"),
        (None, _) => message.to_string(),
    }
}

fn parse_graph_error_body(body: &[u8]) -> (Option<String>, Option<String>) {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return (None, None);
    };
    let error = &value["error"];
    let code = error["code"].as_str().map(String::from);
    let message = error["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(String::from);
    (code, message)
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::request(format!("json error: {err}"))
    }
}
