//! Site pages walkthrough: list, create, update, add a web part, publish.

mod common;

use anyhow::Context;
use clap::Parser;
use common::{advisory, connect, field, init_logging, ConnectionArgs};
use serde_json::json;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "SharePoint page management over Microsoft Graph")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// File name of the page to create.
    #[arg(long, default_value = "DemoPage.aspx")]
    page_name: String,

    #[arg(long, default_value = "Demo Page Title")]
    page_title: String,

    /// Delete the page again at the end of the run.
    #[arg(long)]
    cleanup: bool,
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
    let session = connect(&cli.connection, false)?;

    println!("[*] Retrieving all pages...");
    let pages = session.pages().context("failed to list pages")?;
    println!("[+] Found {} pages", pages.len());
    for page in pages.iter().take(5) {
        println!("   - {} (Title: {})", field(page, "name"), field(page, "title"));
    }

    println!("[*] Creating new page...");
    let created = session
        .create_page(&cli.page_name, &cli.page_title)
        .context("failed to create page")?;
    let page_id = field(&created, "id").to_string();
    println!("[+] Page created: {}", field(&created, "name"));
    println!("    ID: {page_id}");
    println!("    URL: {}", field(&created, "webUrl"));

    let details = session.page(&page_id).context("failed to read page")?;
    println!("[+] Page Title: {}", field(&details, "title"));
    println!("[+] Status: {}", field(&details, "publishingState"));

    println!("[*] Updating page title and description...");
    let updated = session
        .update_page(
            &page_id,
            "Updated Demo Page",
            "This is an updated demo page with more information",
        )
        .context("failed to update page")?;
    println!("[+] Page updated: {}", field(&updated, "title"));

    println!("[*] Adding web part to page...");
    let web_part = json!({
        "id": "webpartid",
        "instanceId": uuid::Uuid::new_v4().to_string(),
        "title": "Welcome Text",
        "serverProcessedContent": {
            "htmlStrings": {},
            "searchablePlainTexts": ["Welcome to this page"],
            "imageSources": [],
            "links": []
        },
        "dataVersion": "1.0",
        "properties": { "text": "Welcome to this page" }
    });
    if advisory("Web part addition", session.add_web_part(&page_id, web_part)).is_some() {
        println!("[+] Web part added successfully");
    }

    println!("[*] Publishing page...");
    if advisory("Publishing", session.publish_page(&page_id)).is_some() {
        println!("[+] Page published successfully");
    }

    let final_details = session.page(&page_id).context("failed to read page")?;
    println!("[+] Final Title: {}", field(&final_details, "title"));
    println!("[+] Status: {}", field(&final_details, "publishingState"));

    if cli.cleanup {
        println!("[*] Deleting page...");
        session.delete_page(&page_id).context("failed to delete page")?;
        println!("[+] Page deleted");
    }

    println!("\n[+] Pages management example completed successfully!");
    Ok(())
}
