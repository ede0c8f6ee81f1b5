//! Folder and file walkthrough: create, list, search, upload, rename, copy, download.

mod common;

use anyhow::Context;
use clap::Parser;
use common::{advisory, connect, field, init_logging, ConnectionArgs};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(about = "SharePoint file operations over Microsoft Graph")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Name of the folder created at the library root.
    #[arg(long, default_value = "TestFolder")]
    folder_name: String,

    /// Search term for the drive-wide search.
    #[arg(long, default_value = "test")]
    search: String,

    /// Local file to upload into the new folder; skipped when it does not exist.
    #[arg(long, default_value = "sample.txt")]
    upload: PathBuf,

    /// Where the uploaded file is downloaded back to.
    #[arg(long, default_value = "downloaded_sample.txt")]
    download_to: PathBuf,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[!] Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let session = connect(&cli.connection, true)?;

    println!("[*] Creating folder '{}'...", cli.folder_name);
    let folder = session
        .create_folder(&cli.folder_name, sharepoint_graph::ROOT_FOLDER)
        .context("failed to create folder")?;
    let folder_id = field(&folder, "id").to_string();
    println!("[+] Folder created: {} (ID: {folder_id})", field(&folder, "name"));

    println!("[*] Getting folder contents...");
    let contents = session
        .folder_children(sharepoint_graph::ROOT_FOLDER)
        .context("failed to list root folder")?;
    println!("[+] Found {} items in root folder", contents.len());
    for item in contents.iter().take(5) {
        println!("   - {} (ID: {})", field(item, "name"), field(item, "id"));
    }

    println!("[*] Searching for files with '{}' in name...", cli.search);
    let results = session.search(&cli.search).context("search failed")?;
    println!("[+] Found {} results", results.len());
    for result in results.iter().take(5) {
        println!("   - {}", field(result, "name"));
    }

    if !cli.upload.exists() {
        println!("[*] {} not found; skipping upload steps", cli.upload.display());
        println!("\n[+] File operations example completed successfully!");
        return Ok(());
    }

    println!("[*] Uploading '{}'...", cli.upload.display());
    let uploaded = session
        .upload_file(&cli.upload, &folder_id)
        .context("upload failed")?;
    let file_id = field(&uploaded, "id").to_string();
    println!("[+] File uploaded: {} (ID: {file_id})", field(&uploaded, "name"));

    println!("[*] Getting file metadata...");
    let metadata = session.item_metadata(&file_id).context("metadata lookup failed")?;
    let size = metadata.get("size").and_then(|v| v.as_u64()).unwrap_or(0);
    println!("[+] File size: {size} bytes");
    println!("[+] Created: {}", field(&metadata, "createdDateTime"));

    if let Some(renamed) = advisory("Rename", session.rename_item(&file_id, "sample_renamed.txt")) {
        println!("[+] File renamed: {}", field(&renamed, "name"));
    }

    if let Some(copy) = advisory(
        "Copy",
        session.copy_item(&file_id, "sample_copy.txt", &folder_id),
    ) {
        println!("[+] File copy initiated (monitor: {})", field(&copy, "monitorUrl"));
    }

    println!("[*] Downloading file...");
    let bytes = session
        .download_to_path(&file_id, &cli.download_to)
        .context("download failed")?;
    println!(
        "[+] Downloaded {bytes} bytes to '{}'",
        cli.download_to.display()
    );

    println!("\n[+] File operations example completed successfully!");
    Ok(())
}
