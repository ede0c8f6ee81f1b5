use std::time::Duration;

pub const DEFAULT_GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_LOGIN_BASE: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

pub const MIN_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 600;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Endpoints and transport settings for a session.
/// Secrets are not part of the config; they go straight to `authenticate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphConfig {
    graph_base: String,
    login_base: String,
    scope: String,
    timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            graph_base: DEFAULT_GRAPH_BASE.to_string(),
            login_base: DEFAULT_LOGIN_BASE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GraphConfig {
    pub fn with_graph_base(mut self, base: impl Into<String>) -> Self {
        self.graph_base = normalize_base(base.into());
        self
    }

    pub fn with_login_base(mut self, base: impl Into<String>) -> Self {
        self.login_base = normalize_base(base.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the per-request timeout, clamped to [MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS].
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS));
        self
    }

    pub fn graph_base(&self) -> &str {
        &self.graph_base
    }

    pub fn login_base(&self) -> &str {
        &self.login_base
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{graph_base}/{path}` with exactly one separating slash.
    pub(crate) fn graph_url(&self, path: &str) -> String {
        format!("{}/{}", self.graph_base, path.trim_start_matches('/'))
    }

    pub(crate) fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_base, tenant_id)
    }
}

fn normalize_base(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
