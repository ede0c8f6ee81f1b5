use anyhow::Context;
use clap::Args;
use log::warn;
use serde_json::Value;
use sharepoint_graph::{GraphConfig, GraphResult, GraphSession};

/// Credentials and target site shared by every demo.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Azure AD application (client) id.
    #[arg(long, env = "SHAREPOINT_CLIENT_ID")]
    pub client_id: String,

    /// Azure AD application secret.
    #[arg(long, env = "SHAREPOINT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Azure AD tenant id.
    #[arg(long, env = "SHAREPOINT_TENANT_ID")]
    pub tenant_id: String,

    /// Tenant name, e.g. `contoso` for contoso.sharepoint.com.
    #[arg(long, env = "SHAREPOINT_TENANT_NAME")]
    pub tenant_name: String,

    /// SharePoint site name under /sites/.
    #[arg(long, env = "SHAREPOINT_SITE_NAME")]
    pub site_name: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GRAPH_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Authenticates and resolves the site, plus the default drive when asked.
pub fn connect(args: &ConnectionArgs, resolve_drive: bool) -> anyhow::Result<GraphSession> {
    println!("[*] Initializing Graph session...");
    let config = GraphConfig::default().with_timeout_secs(args.timeout_secs);
    let mut session = GraphSession::new(config).context("failed to build Graph session")?;

    println!("[*] Authenticating...");
    session
        .authenticate(&args.client_id, &args.client_secret, &args.tenant_id)
        .context("authentication failed")?;
    println!("[+] Authentication successful");

    println!("[*] Getting Site ID for site: {}...", args.site_name);
    let site_id = session
        .resolve_site(&args.site_name, &args.tenant_name)
        .context("failed to resolve site")?;
    println!("[+] Site ID: {site_id}");

    if resolve_drive {
        println!("[*] Getting Drive ID...");
        let drive_id = session.resolve_drive().context("failed to resolve drive")?;
        println!("[+] Drive ID: {drive_id}");
    }
    Ok(session)
}

/// Logs a failed step and lets the sequence continue.
pub fn advisory<T>(step: &str, result: GraphResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{step} failed: {err}");
            println!("[!] {step} error: {err}");
            None
        }
    }
}

pub fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}
