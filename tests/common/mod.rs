#![allow(dead_code)]

use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use sharepoint_graph::{
    GraphConfig, GraphSession, HttpRequest, HttpResponse, Transport, TransportError,
};
use std::cell::{Cell, RefCell};
use std::io::{self, Read};

pub const GRAPH_BASE: &str = "https://graph.test/v1.0";
pub const LOGIN_BASE: &str = "https://login.test";
pub const TOKEN: &str = "fake-token";
pub const SITE_ID: &str = "contoso.sharepoint.com,1111-site,2222-web";
pub const DRIVE_ID: &str = "drive-1";
pub const ECHO_URL: &str = "https://graph.test/v1.0/echo";

#[derive(Clone, Debug)]
struct FakeItem {
    id: String,
    name: String,
    parent: String,
    is_folder: bool,
    content: Vec<u8>,
}

impl FakeItem {
    fn to_json(&self) -> Value {
        let mut item = json!({
            "id": self.id,
            "name": self.name,
            "parentReference": { "driveId": DRIVE_ID, "id": self.parent },
        });
        if self.is_folder {
            item["folder"] = json!({ "childCount": 0 });
        } else {
            item["size"] = json!(self.content.len());
            item["file"] = json!({ "mimeType": "application/octet-stream" });
        }
        item
    }
}

/// In-memory Graph: one tenant (`contoso`), one site (`TeamSite`), one drive.
/// Counts every request it receives and keeps a copy of each.
#[derive(Default)]
pub struct FakeGraph {
    calls: Cell<usize>,
    requests: RefCell<Vec<HttpRequest>>,
    items: RefCell<Vec<FakeItem>>,
    next_id: Cell<u32>,
    forced: RefCell<Option<(u16, Vec<u8>)>>,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every Graph request (not the token endpoint) is answered with this status and body.
    pub fn respond_with(self, status: u16, body: &str) -> Self {
        *self.forced.borrow_mut() = Some((status, body.as_bytes().to_vec()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    fn next_item_id(&self) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("item-{id}")
    }

    fn route(&self, request: &HttpRequest) -> HttpResponse {
        if request.url.starts_with(LOGIN_BASE) {
            return self.token(request);
        }
        if let Some((status, body)) = self.forced.borrow().clone() {
            return HttpResponse::from_bytes(status, body);
        }
        if request.url == ECHO_URL {
            return HttpResponse::from_bytes(200, request.body.clone().unwrap_or_default());
        }
        let bearer = format!("Bearer {TOKEN}");
        if request.header("authorization") != Some(bearer.as_str()) {
            return graph_error(401, "InvalidAuthenticationToken", "Access token is empty.");
        }

        let Some(path) = request.url.strip_prefix(&format!("{GRAPH_BASE}/")) else {
            return graph_error(404, "invalidRequest", "unknown host");
        };
        let segments: Vec<&str> = path.split('/').collect();
        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["sites", "contoso.sharepoint.com:", "sites", "TeamSite"]) => {
                json_response(200, json!({ "id": SITE_ID, "name": "TeamSite" }))
            }
            ("GET", ["sites", site, "drives"]) if *site == SITE_ID => json_response(
                200,
                json!({ "value": [
                    { "id": DRIVE_ID, "name": "Documents", "driveType": "documentLibrary" },
                    { "id": "drive-2", "name": "Archive", "driveType": "documentLibrary" },
                ]}),
            ),
            ("GET", ["drives", DRIVE_ID, "items", parent, "children"]) => {
                let value: Vec<Value> = self
                    .items
                    .borrow()
                    .iter()
                    .filter(|item| item.parent == *parent)
                    .map(FakeItem::to_json)
                    .collect();
                json_response(200, json!({ "value": value }))
            }
            ("POST", ["drives", DRIVE_ID, "items", parent, "children"]) => {
                self.create_folder(parent, request)
            }
            ("PUT", ["drives", DRIVE_ID, "items", parent, name, "content"]) => {
                let parent = parent.trim_end_matches(':');
                let name = decode(name.trim_end_matches(':'));
                self.store_file(parent, &name, request.body.clone().unwrap_or_default())
            }
            ("GET", ["drives", DRIVE_ID, "items", id, "content"]) => {
                match self.find(id) {
                    Some(item) if !item.is_folder => HttpResponse::from_bytes(200, item.content),
                    _ => graph_error(404, "itemNotFound", "The resource could not be found."),
                }
            }
            ("GET", ["drives", DRIVE_ID, "items", id]) => match self.find(id) {
                Some(item) => json_response(200, item.to_json()),
                None => graph_error(404, "itemNotFound", "The resource could not be found."),
            },
            ("DELETE", ["drives", DRIVE_ID, "items", id]) => {
                let mut items = self.items.borrow_mut();
                let before = items.len();
                items.retain(|item| item.id != *id);
                if items.len() == before {
                    graph_error(404, "itemNotFound", "The resource could not be found.")
                } else {
                    HttpResponse::from_bytes(204, Vec::new())
                }
            }
            _ => graph_error(404, "itemNotFound", "The resource could not be found."),
        }
    }

    fn token(&self, request: &HttpRequest) -> HttpResponse {
        let form = String::from_utf8(request.body.clone().unwrap_or_default()).unwrap_or_default();
        if form.contains("client_secret=wrong") {
            return json_response(
                401,
                json!({
                    "error": "invalid_client",
                    "error_description": "AADSTS7000215: Invalid client secret provided."
                }),
            );
        }
        json_response(
            200,
            json!({ "token_type": "Bearer", "expires_in": 3599, "access_token": TOKEN }),
        )
    }

    fn create_folder(&self, parent: &str, request: &HttpRequest) -> HttpResponse {
        let body: Value = match request.body.as_deref().map(serde_json::from_slice::<Value>) {
            Some(Ok(body)) => body,
            _ => return graph_error(400, "invalidRequest", "Invalid request body."),
        };
        let Some(requested) = body["name"].as_str() else {
            return graph_error(400, "invalidRequest", "name is required.");
        };

        let mut name = requested.to_string();
        let mut suffix = 1;
        while self.name_taken(parent, &name) {
            name = format!("{requested} {suffix}");
            suffix += 1;
        }
        let item = FakeItem {
            id: self.next_item_id(),
            name,
            parent: parent.to_string(),
            is_folder: body.get("folder").is_some(),
            content: Vec::new(),
        };
        let response = item.to_json();
        self.items.borrow_mut().push(item);
        json_response(201, response)
    }

    fn store_file(&self, parent: &str, name: &str, content: Vec<u8>) -> HttpResponse {
        let existing = self
            .items
            .borrow()
            .iter()
            .find(|item| item.parent == parent && item.name == name)
            .map(|item| item.id.clone());
        let mut items = self.items.borrow_mut();
        let item = match existing {
            Some(id) => {
                let item = items
                    .iter_mut()
                    .find(|item| item.id == id)
                    .expect("item just found");
                item.content = content;
                item.clone()
            }
            None => {
                let item = FakeItem {
                    id: self.next_item_id(),
                    name: name.to_string(),
                    parent: parent.to_string(),
                    is_folder: false,
                    content,
                };
                items.push(item.clone());
                item
            }
        };
        json_response(201, item.to_json())
    }

    fn name_taken(&self, parent: &str, name: &str) -> bool {
        self.items
            .borrow()
            .iter()
            .any(|item| item.parent == parent && item.name == name)
    }

    fn find(&self, id: &str) -> Option<FakeItem> {
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }
}

impl Transport for FakeGraph {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        let response = self.route(&request);
        self.requests.borrow_mut().push(request);
        Ok(response)
    }
}

/// Fails every request as if the network were down.
pub struct Unreachable;

impl Transport for Unreachable {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError(format!("connection refused: {}", request.url)))
    }
}

pub fn test_config() -> GraphConfig {
    GraphConfig::default()
        .with_graph_base(GRAPH_BASE)
        .with_login_base(LOGIN_BASE)
}

pub fn session(fake: FakeGraph) -> GraphSession<FakeGraph> {
    GraphSession::with_transport(test_config(), fake)
}

/// Session that has completed authenticate, resolve_site and resolve_drive.
pub fn ready_session(fake: FakeGraph) -> GraphSession<FakeGraph> {
    let mut session = session(fake);
    session
        .authenticate("client-id", "client-secret", "tenant-id")
        .expect("authenticate");
    session.resolve_site("TeamSite", "contoso").expect("resolve site");
    session.resolve_drive().expect("resolve drive");
    session
}

/// Replays queued responses in order and records requests.
pub struct Scripted {
    responses: RefCell<Vec<HttpResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    pub fn new(mut responses: Vec<HttpResponse>) -> Self {
        responses.reverse();
        Scripted {
            responses: RefCell::new(responses),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> std::cell::Ref<'_, Vec<HttpRequest>> {
        self.requests.borrow()
    }
}

impl Transport for Scripted {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop()
            .ok_or_else(|| TransportError("script exhausted".to_string()))
    }
}

/// Session whose three setup calls are answered by the head of the script.
pub fn scripted_session(mut responses: Vec<HttpResponse>) -> GraphSession<Scripted> {
    let mut script = vec![
        HttpResponse::from_bytes(200, r#"{"access_token":"t"}"#),
        HttpResponse::from_bytes(200, r#"{"id":"site-1"}"#),
        HttpResponse::from_bytes(200, r#"{"value":[{"id":"drive-9"}]}"#),
    ];
    script.append(&mut responses);
    let mut session = GraphSession::with_transport(test_config(), Scripted::new(script));
    session.authenticate("c", "s", "t").unwrap();
    session.resolve_site("TeamSite", "contoso").unwrap();
    session.resolve_drive().unwrap();
    session
}

/// Body that yields `partial` once and then fails like a dropped connection.
struct BrokenBody {
    sent: bool,
}

impl Read for BrokenBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        self.sent = true;
        let chunk = b"partial";
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        Ok(n)
    }
}

/// Response whose status and headers arrive but whose body breaks mid-read.
pub fn broken_body_response(status: u16) -> HttpResponse {
    HttpResponse::new(status, Default::default(), BrokenBody { sent: false })
}

fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::from_bytes(status, body.to_string())
}

fn graph_error(status: u16, code: &str, message: &str) -> HttpResponse {
    json_response(status, json!({ "error": { "code": code, "message": message } }))
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
