use crate::{
    error::{GraphError, GraphResult},
    session::{require_non_empty, GraphSession, RequestDescriptor},
    transport::{HttpResponse, Transport},
};
use log::{debug, warn};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

impl<T: Transport> GraphSession<T> {
    /// Streams the content of `item_id` into `sink`; returns the bytes written.
    pub fn download_to<W: Write + ?Sized>(&self, item_id: &str, sink: &mut W) -> GraphResult<u64> {
        let response = self.open_download(item_id)?;
        write_body(response, sink)
    }

    /// Downloads `item_id` to `output_path`, creating parent directories.
    /// The destination is only opened once Graph has answered with content, so
    /// a failed request leaves an existing file untouched. An interrupted copy
    /// removes the partial file.
    pub fn download_to_path(&self, item_id: &str, output_path: impl AsRef<Path>) -> GraphResult<u64> {
        let destination = output_path.as_ref();
        let response = self.open_download(item_id)?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                GraphError::request(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let file = File::create(destination).map_err(|e| {
            GraphError::request(format!(
                "failed to create destination file {}: {e}",
                destination.display()
            ))
        })?;

        let mut writer = BufWriter::new(file);
        let bytes = match write_body(response, &mut writer) {
            Ok(bytes) => bytes,
            Err(err) => {
                drop(writer);
                if let Err(remove_err) = fs::remove_file(destination) {
                    warn!(
                        "[drive-download] failed to remove partial file {}: {remove_err}",
                        destination.display()
                    );
                }
                return Err(err);
            }
        };
        debug!(
            "[drive-download] saved {bytes} bytes to {}",
            destination.display()
        );
        Ok(bytes)
    }

    fn open_download(&self, item_id: &str) -> GraphResult<HttpResponse> {
        self.require_drive()?;
        let item_id = require_non_empty(item_id, "drive item id")?;
        let url = self.drive_url(&format!("items/{item_id}/content"))?;
        debug!("[drive-download] fetching content for item {item_id}");
        self.execute_raw(RequestDescriptor::get(url))
    }
}

fn write_body<W: Write + ?Sized>(mut response: HttpResponse, sink: &mut W) -> GraphResult<u64> {
    let copied = response
        .copy_to(sink)
        .map_err(|e| GraphError::request(format!("failed to write download: {e}")))?;
    sink.flush()
        .map_err(|e| GraphError::request(format!("failed to flush download: {e}")))?;
    Ok(copied)
}
