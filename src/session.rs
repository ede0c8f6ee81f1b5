use crate::{
    config::GraphConfig,
    error::{GraphError, GraphResult},
    transport::{HttpRequest, HttpResponse, HttpTransport, Transport},
};
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::Deserialize;
use serde_json::Value;

/// Identifiers established by the setup calls. Each field is written only when
/// its setup call succeeds and is never cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    access_token: Option<String>,
    site_id: Option<String>,
    drive_id: Option<String>,
}

impl SessionState {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }

    pub fn drive_id(&self) -> Option<&str> {
        self.drive_id.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Serialized with `serde_json` before sending.
    Json(Value),
    /// Sent as-is.
    Bytes(Vec<u8>),
}

/// One Graph call: target, method, optional body and header overrides.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    url: String,
    method: Method,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
    authorize: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        RequestDescriptor {
            url: url.into(),
            method,
            body: None,
            headers: Vec::new(),
            authorize: true,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Bytes(body));
        self
    }

    /// Adds a header that wins over the defaults on a (case-insensitive) name clash.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Skips the bearer header; used for pre-authenticated upload-session URLs.
    pub fn without_authorization(mut self) -> Self {
        self.authorize = false;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// An authenticated conversation with Graph for one tenant/site/drive.
pub struct GraphSession<T = HttpTransport> {
    config: GraphConfig,
    transport: T,
    state: SessionState,
}

impl GraphSession<HttpTransport> {
    /// Session backed by a blocking reqwest client built from `config`.
    pub fn new(config: GraphConfig) -> GraphResult<Self> {
        let transport = HttpTransport::new(&config).map_err(|e| GraphError::request(e.0))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> GraphSession<T> {
    pub fn with_transport(config: GraphConfig, transport: T) -> Self {
        GraphSession {
            config,
            transport,
            state: SessionState::default(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Client-credentials token exchange. Stores and returns the access token.
    pub fn authenticate(
        &mut self,
        client_id: &str,
        client_secret: &str,
        tenant_id: &str,
    ) -> GraphResult<String> {
        if client_id.trim().is_empty()
            || client_secret.trim().is_empty()
            || tenant_id.trim().is_empty()
        {
            return Err(GraphError::auth(
                None,
                "client id, client secret and tenant id are required",
            ));
        }

        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", client_id)
            .append_pair("client_secret", client_secret)
            .append_pair("scope", self.config.scope())
            .finish();

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let request = HttpRequest {
            method: Method::POST,
            url: self.config.token_url(tenant_id.trim()),
            headers,
            body: Some(form.into_bytes()),
        };

        let response = self
            .transport
            .send(request)
            .map_err(|e| GraphError::auth(None, format!("token exchange failed: {e}")))?;
        let status = response.status;
        let success = response.is_success();
        let raw = response
            .into_bytes()
            .map_err(|e| GraphError::auth(Some(status), format!("failed to read token response: {e}")))?;

        let payload = serde_json::from_slice::<TokenResponse>(&raw);
        if !success {
            let detail = payload
                .ok()
                .and_then(|p| p.error_description.or(p.error))
                .unwrap_or_else(|| "no error description".to_string());
            return Err(GraphError::auth(
                Some(status),
                format!("token endpoint returned HTTP {status}: {detail}"),
            ));
        }

        let payload = payload.map_err(|e| {
            GraphError::auth(Some(status), format!("failed to parse token response: {e}"))
        })?;
        if let Some(error) = payload.error {
            let description = payload.error_description.unwrap_or_default();
            return Err(GraphError::auth(Some(status), format!("{error}: {description}")));
        }
        let token = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GraphError::auth(Some(status), "missing access_token in response"))?;

        info!("[graph-session] authenticated against tenant {}", tenant_id.trim());
        self.state.access_token = Some(token.clone());
        Ok(token)
    }

    /// Looks up `{tenant}.sharepoint.com:/sites/{site}` and stores its id.
    pub fn resolve_site(&mut self, site_name: &str, tenant_name: &str) -> GraphResult<String> {
        self.require_token()?;
        if site_name.trim().is_empty() || tenant_name.trim().is_empty() {
            return Err(GraphError::request("site name and tenant name are required"));
        }

        let url = self.config.graph_url(&format!(
            "sites/{}.sharepoint.com:/sites/{}",
            encode_segment(tenant_name.trim()),
            encode_segment(site_name.trim())
        ));
        let lookup = || format!("{}/{}", tenant_name.trim(), site_name.trim());

        let response = match self.execute_request(RequestDescriptor::get(url)) {
            Ok(response) => response,
            Err(err) if err.status() == Some(404) => {
                return Err(GraphError::not_found("site", lookup()))
            }
            Err(err) => return Err(err),
        };
        let site_id =
            string_field(&response, "id").ok_or_else(|| GraphError::not_found("site", lookup()))?;

        info!("[graph-session] site {} resolved to {site_id}", lookup());
        self.state.site_id = Some(site_id.clone());
        Ok(site_id)
    }

    /// Selects the first drive of the resolved site as the default library.
    pub fn resolve_drive(&mut self) -> GraphResult<String> {
        self.require_token()?;
        let site_id = self.require_site()?;

        let url = self.config.graph_url(&format!("sites/{site_id}/drives"));
        let drives = value_list(self.execute_request(RequestDescriptor::get(url))?)?;
        let drive_id = drives
            .first()
            .and_then(|drive| string_field(drive, "id"))
            .ok_or_else(|| GraphError::request(format!("site {site_id} has no drives")))?;

        info!("[graph-session] default drive resolved to {drive_id}");
        self.state.drive_id = Some(drive_id.clone());
        Ok(drive_id)
    }

    /// Sends one authenticated request and returns the parsed JSON body.
    /// Empty bodies (204, 202) come back as `Value::Null`.
    pub fn execute_request(&self, descriptor: RequestDescriptor) -> GraphResult<Value> {
        let response = self.execute_raw(descriptor)?;
        let raw = response
            .into_bytes()
            .map_err(|e| GraphError::request(format!("failed to read response body: {e}")))?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Same contract as `execute_request`, but hands back the unread response
    /// so its body can be streamed.
    pub fn execute_raw(&self, descriptor: RequestDescriptor) -> GraphResult<HttpResponse> {
        let token = self.require_token()?;
        let RequestDescriptor {
            url,
            method,
            body,
            headers: overrides,
            authorize,
        } = descriptor;

        let mut headers = HeaderMap::new();
        if authorize {
            let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GraphError::request("access token is not a valid header value"))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GraphError::request(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| GraphError::request(format!("invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }

        let body = match body {
            Some(RequestBody::Json(value)) => Some(serde_json::to_vec(&value)?),
            Some(RequestBody::Bytes(bytes)) => Some(bytes),
            None => None,
        };

        debug!("[graph-session] {method} {url}");
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .map_err(|e| GraphError::request(e.0))?;

        if !response.is_success() {
            let status = response.status;
            let raw = response.into_bytes().unwrap_or_default();
            return Err(GraphError::from_graph_response(status, &raw));
        }
        Ok(response)
    }

    pub(crate) fn require_token(&self) -> GraphResult<&str> {
        self.state
            .access_token
            .as_deref()
            .ok_or_else(|| GraphError::state("access token", "authenticate"))
    }

    pub(crate) fn require_site(&self) -> GraphResult<&str> {
        self.state
            .site_id
            .as_deref()
            .ok_or_else(|| GraphError::state("site_id", "resolve_site"))
    }

    pub(crate) fn require_drive(&self) -> GraphResult<&str> {
        self.state
            .drive_id
            .as_deref()
            .ok_or_else(|| GraphError::state("drive_id", "resolve_drive"))
    }

    /// `{graph}/drives/{drive_id}/{path}`; fails fast without a drive.
    pub(crate) fn drive_url(&self, path: &str) -> GraphResult<String> {
        let drive_id = self.require_drive()?;
        Ok(self.config.graph_url(&format!("drives/{drive_id}/{path}")))
    }

    /// `{graph}/sites/{site_id}/{path}`; fails fast without a site.
    pub(crate) fn site_url(&self, path: &str) -> GraphResult<String> {
        let site_id = self.require_site()?;
        Ok(self.config.graph_url(&format!("sites/{site_id}/{path}")))
    }
}

/// Projects the `value` array out of a Graph collection response.
pub(crate) fn value_list(response: Value) -> GraphResult<Vec<Value>> {
    match response {
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(GraphError::request("collection response is missing `value`")),
        },
        _ => Err(GraphError::request("collection response is not an object")),
    }
}

pub(crate) fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

pub(crate) fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// Rejects blank ids/names before a URL is built from them.
pub(crate) fn require_non_empty<'a>(value: &'a str, what: &str) -> GraphResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GraphError::request(format!("{what} is required")));
    }
    Ok(trimmed)
}
