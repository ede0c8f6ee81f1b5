use crate::{
    error::{GraphError, GraphResult},
    session::{require_non_empty, GraphSession, RequestDescriptor},
    transport::Transport,
};
use serde_json::{json, Value};

/// Graph's conflict rule for new children: never overwrite, rename instead.
const CONFLICT_BEHAVIOR: &str = "@microsoft.graph.conflictBehavior";

impl<T: Transport> GraphSession<T> {
    /// Creates `folder_name` under `parent_id` (`"root"` for the library root).
    pub fn create_folder(&self, folder_name: &str, parent_id: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let folder_name = require_non_empty(folder_name, "folder name")?;
        let parent_id = require_non_empty(parent_id, "parent id")?;
        let url = self.drive_url(&format!("items/{parent_id}/children"))?;
        let body = json!({
            "name": folder_name,
            "folder": {},
            CONFLICT_BEHAVIOR: "rename",
        });
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    /// Full metadata of a drive item.
    pub fn item_metadata(&self, item_id: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let url = self.drive_url(&format!("items/{item_id}"))?;
        self.execute_request(RequestDescriptor::get(url))
    }

    pub fn rename_item(&self, item_id: &str, new_name: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let new_name = require_non_empty(new_name, "new name")?;
        let url = self.drive_url(&format!("items/{item_id}"))?;
        self.execute_request(RequestDescriptor::patch(url).json(json!({ "name": new_name })))
    }

    /// Starts an asynchronous copy into `destination_id` of the same drive.
    /// Graph answers 202 with no body; the monitor URL from `Location` is
    /// returned as `{"monitorUrl": ...}` when present.
    pub fn copy_item(
        &self,
        item_id: &str,
        new_name: &str,
        destination_id: &str,
    ) -> GraphResult<Value> {
        let drive_id = self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let new_name = require_non_empty(new_name, "new name")?;
        let destination_id = require_non_empty(destination_id, "destination id")?;
        let url = self.drive_url(&format!("items/{item_id}/copy"))?;
        let body = json!({
            "parentReference": { "driveId": drive_id, "id": destination_id },
            "name": new_name,
        });

        let response = self.execute_raw(RequestDescriptor::post(url).json(body))?;
        let monitor_url = response.header("location").map(String::from);
        let raw = response
            .into_bytes()
            .map_err(|e| GraphError::request(format!("failed to read response body: {e}")))?;
        if let Ok(parsed) = serde_json::from_slice::<Value>(&raw) {
            return Ok(parsed);
        }
        Ok(match monitor_url {
            Some(url) => json!({ "monitorUrl": url }),
            None => Value::Null,
        })
    }

    /// Re-parents an item inside the current drive.
    pub fn move_item(&self, item_id: &str, destination_folder_id: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let destination = require_non_empty(destination_folder_id, "destination folder id")?;
        let url = self.drive_url(&format!("items/{item_id}"))?;
        let body = json!({ "parentReference": { "id": destination } });
        self.execute_request(RequestDescriptor::patch(url).json(body))
    }

    /// Moves the item to the site recycle bin.
    pub fn delete_item(&self, item_id: &str) -> GraphResult<()> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let url = self.drive_url(&format!("items/{item_id}"))?;
        self.execute_request(RequestDescriptor::delete(url))?;
        Ok(())
    }
}
