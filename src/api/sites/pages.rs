use crate::{
    error::GraphResult,
    session::{require_non_empty, value_list, GraphSession, RequestDescriptor},
    transport::Transport,
};
use serde_json::{json, Value};

/// Layout web part id SharePoint assigns to a blank article page.
pub const ARTICLE_LAYOUT_WEBPART_ID: &str = "3eb3e627-5144-4667-83d5-7662c6abb714";

impl<T: Transport> GraphSession<T> {
    pub fn pages(&self) -> GraphResult<Vec<Value>> {
        let url = self.site_url("pages")?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }

    pub fn page(&self, page_id: &str) -> GraphResult<Value> {
        let url = self.page_url(page_id, "")?;
        self.execute_request(RequestDescriptor::get(url))
    }

    /// Creates a draft page; `name` is the file name, e.g. `Demo.aspx`.
    pub fn create_page(&self, name: &str, title: &str) -> GraphResult<Value> {
        self.require_site()?;
        let name = require_non_empty(name, "page name")?;
        let url = self.site_url("pages")?;
        let body = json!({
            "name": name,
            "title": title,
            "layoutWebpartId": ARTICLE_LAYOUT_WEBPART_ID,
        });
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    pub fn update_page(&self, page_id: &str, title: &str, description: &str) -> GraphResult<Value> {
        let url = self.page_url(page_id, "")?;
        let body = json!({ "title": title, "description": description });
        self.execute_request(RequestDescriptor::patch(url).json(body))
    }

    pub fn publish_page(&self, page_id: &str) -> GraphResult<()> {
        let url = self.page_url(page_id, "/publish")?;
        self.execute_request(RequestDescriptor::post(url))?;
        Ok(())
    }

    pub fn delete_page(&self, page_id: &str) -> GraphResult<()> {
        let url = self.page_url(page_id, "")?;
        self.execute_request(RequestDescriptor::delete(url))?;
        Ok(())
    }

    /// Appends a web part; `web_part_data` is passed through untouched.
    pub fn add_web_part(&self, page_id: &str, web_part_data: Value) -> GraphResult<Value> {
        let url = self.page_url(page_id, "/webparts")?;
        let body = json!({ "webPartData": web_part_data });
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    fn page_url(&self, page_id: &str, suffix: &str) -> GraphResult<String> {
        self.require_site()?;
        let page_id = require_non_empty(page_id, "page id")?;
        self.site_url(&format!("pages/{page_id}{suffix}"))
    }
}
