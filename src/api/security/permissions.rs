use super::models::{LinkScope, LinkType};
use crate::{
    error::GraphResult,
    session::{require_non_empty, value_list, GraphSession, RequestDescriptor},
    transport::Transport,
};
use log::debug;
use serde_json::{json, Value};

impl<T: Transport> GraphSession<T> {
    /// Permissions currently granted on a drive item.
    pub fn permissions(&self, item_id: &str) -> GraphResult<Vec<Value>> {
        let url = self.item_url(item_id, "/permissions")?;
        value_list(self.execute_request(RequestDescriptor::get(url))?)
    }

    /// Invites `email` with `role` (`read`, `write`, ...); sign-in is required.
    pub fn share_with_user(&self, item_id: &str, email: &str, role: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let email = require_non_empty(email, "recipient email")?;
        let role = require_non_empty(role, "role")?;
        let url = self.item_url(item_id, "/invite")?;
        let body = json!({
            "recipients": [{ "email": email }],
            "roles": [role],
            "requireSignIn": true,
        });
        debug!("[share] invite role={role} for item {}", item_id.trim());
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    pub fn create_sharing_link(
        &self,
        item_id: &str,
        link_type: LinkType,
        scope: LinkScope,
    ) -> GraphResult<Value> {
        let url = self.item_url(item_id, "/createLink")?;
        let body = json!({
            "type": link_type.as_graph_str(),
            "scope": scope.as_graph_str(),
        });
        debug!("[share] createLink type={link_type} scope={scope}");
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    pub fn delete_permission(&self, item_id: &str, permission_id: &str) -> GraphResult<()> {
        self.require_drive()?;
        let permission_id = require_non_empty(permission_id, "permission id")?;
        let url = self.item_url(item_id, &format!("/permissions/{permission_id}"))?;
        self.execute_request(RequestDescriptor::delete(url))?;
        Ok(())
    }

    pub fn update_permission_role(
        &self,
        item_id: &str,
        permission_id: &str,
        role: &str,
    ) -> GraphResult<Value> {
        self.require_drive()?;
        let permission_id = require_non_empty(permission_id, "permission id")?;
        let role = require_non_empty(role, "role")?;
        let url = self.item_url(item_id, &format!("/permissions/{permission_id}"))?;
        self.execute_request(RequestDescriptor::patch(url).json(json!({ "roles": [role] })))
    }

    fn item_url(&self, item_id: &str, suffix: &str) -> GraphResult<String> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        self.drive_url(&format!("items/{item_id}{suffix}"))
    }
}
