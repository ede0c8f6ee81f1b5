use crate::{
    error::GraphResult,
    session::{require_non_empty, value_list, GraphSession, RequestDescriptor},
    transport::Transport,
};
use serde_json::{json, Map, Value};

impl<T: Transport> GraphSession<T> {
    /// All lists of the resolved site.
    pub fn lists(&self) -> GraphResult<Vec<Value>> {
        let url = self.site_url("lists")?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }

    pub fn create_list_item(&self, list_id: &str, fields: Map<String, Value>) -> GraphResult<Value> {
        self.require_site()?;
        let list_id = require_non_empty(list_id, "list id")?;
        let url = self.site_url(&format!("lists/{list_id}/items"))?;
        self.execute_request(RequestDescriptor::post(url).json(json!({ "fields": fields })))
    }

    pub fn list_item(&self, list_id: &str, item_id: &str) -> GraphResult<Value> {
        let url = self.list_item_url(list_id, item_id)?;
        self.execute_request(RequestDescriptor::get(url))
    }

    /// Patches only the given fields; others keep their values.
    pub fn update_list_item(
        &self,
        list_id: &str,
        item_id: &str,
        fields: Map<String, Value>,
    ) -> GraphResult<Value> {
        let url = self.list_item_url(list_id, item_id)?;
        self.execute_request(RequestDescriptor::patch(url).json(json!({ "fields": fields })))
    }

    pub fn delete_list_item(&self, list_id: &str, item_id: &str) -> GraphResult<()> {
        let url = self.list_item_url(list_id, item_id)?;
        self.execute_request(RequestDescriptor::delete(url))?;
        Ok(())
    }

    pub(crate) fn list_item_url(&self, list_id: &str, item_id: &str) -> GraphResult<String> {
        self.require_site()?;
        let list_id = require_non_empty(list_id, "list id")?;
        let item_id = require_non_empty(item_id, "list item id")?;
        self.site_url(&format!("lists/{list_id}/items/{item_id}"))
    }
}
