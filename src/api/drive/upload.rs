use crate::{
    error::{GraphError, GraphResult},
    session::{encode_segment, require_non_empty, GraphSession, RequestDescriptor},
    transport::Transport,
};
use log::debug;
use serde_json::{json, Value};
use std::{fs, path::Path};

/// Graph's limit for a single-request upload; larger files need an upload session.
pub const SIMPLE_UPLOAD_MAX_BYTES: usize = 250 * 1024 * 1024;

impl<T: Transport> GraphSession<T> {
    /// Simple upload of `content` as `file_name` inside `folder_id`.
    pub fn upload_bytes(
        &self,
        folder_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> GraphResult<Value> {
        self.require_drive()?;
        let folder_id = require_non_empty(folder_id, "folder id")?;
        let file_name = require_non_empty(file_name, "file name")?;
        if content.len() > SIMPLE_UPLOAD_MAX_BYTES {
            return Err(GraphError::request(
                "file too large for simple upload; use an upload session",
            ));
        }

        let url = self.drive_url(&format!(
            "items/{folder_id}:/{}:/content",
            encode_segment(file_name)
        ))?;
        debug!("[drive-upload] {} bytes -> {file_name}", content.len());
        self.execute_request(
            RequestDescriptor::put(url)
                .header("Content-Type", "application/octet-stream")
                .bytes(content),
        )
    }

    /// Reads `path` and uploads it under its own file name.
    pub fn upload_file(&self, path: impl AsRef<Path>, folder_id: &str) -> GraphResult<Value> {
        // Check the prerequisite before reading a potentially large file.
        self.require_drive()?;
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                GraphError::request(format!("no usable file name in {}", path.display()))
            })?;

        let content = fs::read(path)
            .map_err(|e| GraphError::request(format!("failed to read {}: {e}", path.display())))?;
        self.upload_bytes(folder_id, file_name, content)
    }

    /// Opens a resumable upload session; the response carries `uploadUrl`.
    pub fn create_upload_session(&self, file_name: &str, folder_id: &str) -> GraphResult<Value> {
        self.require_drive()?;
        let file_name = require_non_empty(file_name, "file name")?;
        let folder_id = require_non_empty(folder_id, "folder id")?;
        let url = self.drive_url(&format!(
            "items/{folder_id}:/{}:/createUploadSession",
            encode_segment(file_name)
        ))?;
        let body = json!({
            "item": {
                "@microsoft.graph.conflictBehavior": "rename",
                "name": file_name,
            }
        });
        self.execute_request(RequestDescriptor::post(url).json(body))
    }

    /// PUTs `chunk` at byte offset `start` of a `total_size` upload.
    /// Upload URLs are pre-authenticated, so no bearer header is sent.
    pub fn upload_chunk(
        &self,
        session_url: &str,
        chunk: Vec<u8>,
        start: u64,
        total_size: u64,
    ) -> GraphResult<Value> {
        self.require_token()?;
        let session_url = require_non_empty(session_url, "upload session url")?;
        if chunk.is_empty() {
            return Err(GraphError::request("upload chunk is empty"));
        }
        let end = start
            .checked_add(chunk.len() as u64 - 1)
            .filter(|end| *end < total_size)
            .ok_or_else(|| {
                GraphError::request(format!(
                    "chunk of {} bytes at offset {start} exceeds total size {total_size}",
                    chunk.len()
                ))
            })?;

        let descriptor = RequestDescriptor::put(session_url)
            .without_authorization()
            .header("Content-Type", "application/octet-stream")
            .header("Content-Length", chunk.len().to_string())
            .header("Content-Range", content_range(start, end, total_size))
            .bytes(chunk);
        self.execute_request(descriptor)
    }

    pub fn upload_session_status(&self, session_url: &str) -> GraphResult<Value> {
        self.require_token()?;
        let session_url = require_non_empty(session_url, "upload session url")?;
        self.execute_request(RequestDescriptor::get(session_url).without_authorization())
    }

    pub fn cancel_upload_session(&self, session_url: &str) -> GraphResult<()> {
        self.require_token()?;
        let session_url = require_non_empty(session_url, "upload session url")?;
        self.execute_request(RequestDescriptor::delete(session_url).without_authorization())?;
        Ok(())
    }
}

fn content_range(start: u64, end: u64, total: u64) -> String {
    format!("bytes {start}-{end}/{total}")
}
