//! Blocking Microsoft Graph client for SharePoint sites.
//!
//! A [`GraphSession`] authenticates with client credentials, resolves a site
//! and its default drive, and then issues one HTTP round trip per call through
//! [`GraphSession::execute_request`]. Responses are returned as
//! [`serde_json::Value`].

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use api::drive::ROOT_FOLDER;
pub use api::security::{LinkScope, LinkType};
pub use config::GraphConfig;
pub use error::{GraphError, GraphResult};
pub use session::{GraphSession, RequestBody, RequestDescriptor, SessionState};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
