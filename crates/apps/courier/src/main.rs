//! Courier - conversation list host for the messaging client
//!
//! Loads conversations and contacts, binds a small pool of recycled rows
//! while names resolve on the rayon pool, and prints what the list shows.
//! Also reports the MMS gateway the client would send through.

mod host;

use anyhow::Result;
use clap::Parser;
use chrono::{Duration, Utc};
use log::{error, info, warn};
use mms::{
    ApnRecord, ApnStore, ContactNameCache, ConversationSummary, GatewayOverride,
    InMemoryApnStore, PooledNameResolver, RowStrings, SqliteApnStore, ThreadId,
    TransactionSettings, load_apns_json, load_headers, render_queue, unresolved_count,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use host::ConversationListHost;

const CONTACTS_FILE: &str = "contacts.json";
const APNS_FILE: &str = "apns.json";
const DEFAULT_ROWS: usize = 5;

/// Courier - conversation list host for the messaging client
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array of conversation summaries (built-in samples if omitted)
    #[arg(long)]
    conversations: Option<PathBuf>,

    /// JSON map of sender tokens to contact names
    #[arg(long)]
    contacts: Option<PathBuf>,

    /// APN table, `.json` or a SQLite carrier database
    #[arg(long)]
    apns: Option<PathBuf>,

    /// Only consider APN rows with this access point name
    #[arg(long)]
    apn: Option<String>,

    /// Number of recycled rows in the list
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    show_conversations(&args)?;
    show_gateway(&args)?;
    Ok(())
}

fn show_conversations(args: &Args) -> Result<()> {
    let summaries = match &args.conversations {
        Some(path) => config::load_json_file::<Vec<ConversationSummary>>(path)?,
        None => sample_conversations(),
    };
    let contacts = Arc::new(load_contacts(args.contacts.as_deref())?);
    info!(
        "Loaded {} conversations, {} contacts",
        summaries.len(),
        contacts.len()
    );

    let resolver = PooledNameResolver::new(Arc::clone(&contacts));
    let headers = load_headers(summaries, &resolver);

    let (queue, render_loop) = render_queue();
    let mut host = ConversationListHost::new(
        headers.clone(),
        queue,
        Arc::new(RowStrings::default()),
        args.rows,
    );

    // Scroll through the whole list while names come in
    loop {
        render_loop.run_pending();
        if !host.scroll_down() {
            break;
        }
    }
    host.scroll_to(0);
    render_loop.run_until_idle(std::time::Duration::from_millis(100));

    let pending = unresolved_count(&headers);
    if pending > 0 {
        warn!("{} sender names still unresolved", pending);
    }
    info!("{} binds for {} conversations", host.binds(), headers.len());

    for (id, row) in host.visible_rows() {
        let marker = if row.unread_indicator_visible { "*" } else { " " };
        let attachment = if row.attachment_visible { "@" } else { " " };
        let failed = if row.error_visible { "!" } else { " " };
        println!(
            "{}{}{} {:<10} {:<28} {:<32} {}",
            marker, attachment, failed, id.as_str(), row.from.text, row.subject, row.date
        );
    }
    Ok(())
}

/// Contacts from `path`, else `contacts.json` in the config dir, else none
fn load_contacts(path: Option<&Path>) -> Result<ContactNameCache> {
    let names: HashMap<String, String> = match path {
        Some(path) => config::load_json_file(path)?,
        None => config::load_optional_json(CONTACTS_FILE)?.unwrap_or_default(),
    };
    Ok(ContactNameCache::from_entries(names))
}

fn show_gateway(args: &Args) -> Result<()> {
    let settings = match GatewayOverride::load()? {
        Some(gateway) => {
            info!("Using gateway override for {}", gateway.mmsc_url);
            gateway.into_settings()
        }
        None => {
            let store = open_apn_store(args.apns.as_deref())?;
            TransactionSettings::load(store.as_ref(), args.apn.as_deref())
        }
    };

    match settings.mmsc_url() {
        Some(url) => println!("MMSC: {}", url),
        None => println!("MMSC: (none)"),
    }
    if settings.is_proxy_set() {
        println!(
            "Proxy: {}:{}",
            settings.proxy_address().unwrap_or_default(),
            settings.proxy_port()
        );
    }
    Ok(())
}

/// APN table from a `.json` or SQLite file, the config dir, or built-in rows
fn open_apn_store(path: Option<&Path>) -> Result<Box<dyn ApnStore>> {
    if let Some(path) = path {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        return Ok(if is_json {
            Box::new(load_apns_json(path)?)
        } else {
            Box::new(SqliteApnStore::open_read_only(path)?)
        });
    }

    if let Some(path) = config::config_path(APNS_FILE).filter(|path| path.is_file()) {
        return Ok(Box::new(load_apns_json(&path)?));
    }

    Ok(Box::new(InMemoryApnStore::from_records(vec![
        ApnRecord::new("internet", "default,supl", ""),
        ApnRecord::new("mms.example", "mms", "http://mms.example/servlets/mms")
            .with_proxy("10.0.0.1", "8080"),
    ])))
}

fn sample_conversations() -> Vec<ConversationSummary> {
    let now = Utc::now();
    let senders = [
        ("+15550100", "Lunch tomorrow?"),
        ("+15550101", "Photos from the trip"),
        ("bob@example.com", "Re: invoice"),
        ("+15550102", "Running late"),
        ("+15550103", "Happy birthday!"),
        ("+15550104", "Call me back"),
        ("+15550105", "Boarding now"),
        ("+15550106", ""),
    ];

    senders
        .iter()
        .enumerate()
        .map(|(i, (token, subject))| {
            let mut summary = ConversationSummary::new(
                ThreadId::new(format!("thread-{}", i)),
                *token,
                i % 3 + 1,
                *subject,
                now - Duration::hours(i as i64 * 20),
            );
            summary.is_read = i % 2 == 1;
            summary.has_attachment = i == 1;
            summary.has_draft = i == 3;
            summary.has_error = i == 5;
            summary
        })
        .collect()
}
