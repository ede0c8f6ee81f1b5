use crate::{
    error::GraphResult,
    session::{encode_segment, require_non_empty, value_list, GraphSession, RequestDescriptor},
    transport::Transport,
};
use serde_json::Value;

impl<T: Transport> GraphSession<T> {
    /// First page of children of `folder_id` (`"root"` for the library root).
    /// `@odata.nextLink` is not followed.
    pub fn folder_children(&self, folder_id: &str) -> GraphResult<Vec<Value>> {
        self.require_drive()?;
        let folder_id = require_non_empty(folder_id, "folder id")?;
        let url = self.drive_url(&format!("items/{folder_id}/children"))?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }

    /// Name/content search across the whole drive. A blank term is rejected.
    pub fn search(&self, term: &str) -> GraphResult<Vec<Value>> {
        self.require_drive()?;
        let term = require_non_empty(term, "search term")?;
        let url = self.drive_url(&search_path(term))?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }
}

/// `root/search(q='...')` with OData quote escaping, then percent-encoded so
/// spaces and reserved characters survive the URL.
fn search_path(term: &str) -> String {
    let escaped = term.trim().replace('\'', "''");
    format!("root/search(q='{}')", encode_segment(&escaped))
}
