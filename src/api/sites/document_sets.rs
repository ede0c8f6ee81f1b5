use crate::{
    error::GraphResult,
    session::{require_non_empty, value_list, GraphSession, RequestDescriptor},
    transport::Transport,
};
use serde_json::{json, Value};

/// Content type id of the built-in Document Set.
pub const DOCUMENT_SET_CONTENT_TYPE: &str = "0x0120D520";

impl<T: Transport> GraphSession<T> {
    /// List items of `list_id` whose content type is Document Set.
    pub fn document_sets(&self, list_id: &str) -> GraphResult<Vec<Value>> {
        self.require_site()?;
        let list_id = require_non_empty(list_id, "list id")?;
        let url = self.site_url(&format!(
            "lists/{list_id}/items?$filter=contentType/name%20eq%20'Document%20Set'"
        ))?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }

    pub fn document_set(&self, list_id: &str, docset_id: &str) -> GraphResult<Value> {
        let url = self.list_item_url(list_id, docset_id)?;
        self.execute_request(RequestDescriptor::get(url))
    }

    pub fn create_document_set(&self, list_id: &str, title: &str) -> GraphResult<Value> {
        self.require_site()?;
        let list_id = require_non_empty(list_id, "list id")?;
        let title = require_non_empty(title, "document set title")?;
        let url = self.site_url(&format!("lists/{list_id}/items"))?;
        self.execute_request(RequestDescriptor::post(url).json(document_set_fields(title)))
    }

    pub fn update_document_set(
        &self,
        list_id: &str,
        docset_id: &str,
        title: &str,
    ) -> GraphResult<Value> {
        let url = self.list_item_url(list_id, docset_id)?;
        let title = require_non_empty(title, "document set title")?;
        self.execute_request(RequestDescriptor::patch(url).json(document_set_fields(title)))
    }

    pub fn delete_document_set(&self, list_id: &str, docset_id: &str) -> GraphResult<()> {
        let url = self.list_item_url(list_id, docset_id)?;
        self.execute_request(RequestDescriptor::delete(url))?;
        Ok(())
    }

    /// Documents stored in a document set, addressed as a drive folder.
    pub fn documents_in_set(&self, docset_id: &str) -> GraphResult<Vec<Value>> {
        self.folder_children(docset_id)
    }
}

fn document_set_fields(title: &str) -> Value {
    json!({
        "fields": {
            "Title": title,
            "ContentTypeId": DOCUMENT_SET_CONTENT_TYPE,
        }
    })
}
