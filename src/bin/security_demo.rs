//! Sharing walkthrough: inspect permissions, invite a user, mint links,
//! change and revoke grants.

mod common;

use clap::Parser;
use common::{advisory, connect, field, init_logging, ConnectionArgs};
use serde_json::Value;
use sharepoint_graph::{LinkScope, LinkType};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "SharePoint sharing and permissions over Microsoft Graph")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Drive item to share.
    #[arg(long, env = "SHAREPOINT_FILE_ID")]
    file_id: String,

    /// Recipient of the invitations.
    #[arg(long, env = "SHAREPOINT_USER_EMAIL", default_value = "user@example.com")]
    user_email: String,

    /// Scope of the sharing links.
    #[arg(long, default_value = "anonymous")]
    link_scope: LinkScope,
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
    let file_id = cli.file_id.as_str();

    println!("[*] Getting file metadata for {file_id}...");
    if let Some(metadata) = advisory("Metadata lookup", session.item_metadata(file_id)) {
        println!("[+] File: {}", field(&metadata, "name"));
    }

    println!("[*] Getting current permissions for file...");
    let permissions = advisory("Permission listing", session.permissions(file_id)).unwrap_or_default();
    println!("[+] Found {} permissions:", permissions.len());
    for permission in &permissions {
        println!("   - Permission ID: {}", field(permission, "id"));
        if let Some(name) = permission
            .pointer("/grantedToIdentities/0/user/displayName")
            .and_then(Value::as_str)
        {
            println!("     Granted to: {name}");
        }
        println!("     Roles: {}", permission.get("roles").unwrap_or(&Value::Null));
    }

    for role in ["write", "read"] {
        println!("\n[*] Sharing file with user ({role} access)...");
        if let Some(grant) = advisory(
            "Share",
            session.share_with_user(file_id, &cli.user_email, role),
        ) {
            println!("[+] Share invitation sent to {}", cli.user_email);
            for entry in grant.get("value").and_then(Value::as_array).into_iter().flatten() {
                println!("   Permission ID: {}", field(entry, "id"));
            }
        }
    }

    for link_type in [LinkType::View, LinkType::Edit] {
        println!("\n[*] Creating {} {link_type} sharing link...", cli.link_scope);
        if let Some(link) = advisory(
            "Link creation",
            session.create_sharing_link(file_id, link_type, cli.link_scope),
        ) {
            let url = link.pointer("/link/webUrl").and_then(Value::as_str).unwrap_or("-");
            println!("[+] {link_type} link created: {url}");
        }
    }

    if let Some(first) = permissions.first() {
        println!("\n[*] Updating permission role...");
        if let Some(updated) = advisory(
            "Permission update",
            session.update_permission_role(file_id, field(first, "id"), "read"),
        ) {
            println!("[+] New roles: {}", updated.get("roles").unwrap_or(&Value::Null));
        }
    }

    if let Some(second) = permissions.get(1) {
        println!("\n[*] Deleting permission...");
        if advisory(
            "Permission delete",
            session.delete_permission(file_id, field(second, "id")),
        )
        .is_some()
        {
            println!("[+] Permission deleted");
        }
    }

    println!("\n[+] Security & Sharing example completed!");
    Ok(())
}
