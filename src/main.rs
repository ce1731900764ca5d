use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use epl_zone::config::{self, Config};
use epl_zone::page::{Document, NoticeLevel};
use epl_zone::{Command, DataClient, Request, ViewRegistry};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the site backend
    #[arg(long, env = "EPL_ZONE_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Page to render: live, results, standings, news, dashboard or team:<id>
    #[arg(short, long, env = "EPL_ZONE_PAGE", default_value = "live")]
    page: String,

    /// Live score refresh interval in seconds
    #[arg(short, long, env = "EPL_ZONE_POLL_SECS", default_value_t = config::DEFAULT_POLL_SECS)]
    interval: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "EPL_ZONE_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Render the page once and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("epl_zone=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new(&args.base_url, &args.page, args.interval, args.timeout)
        .context("invalid configuration")?;
    info!(base = %config.base_url, route = %config.route, "starting");

    let client = DataClient::new(config.base_url.clone(), config.request_timeout)
        .context("failed to build http client")?;
    let mut registry = ViewRegistry::new(client, config.route, config.poll_interval);
    registry.activate().await;
    print_changes(registry.document_mut());

    if args.once {
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<Request>(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        if let Err(e) = read_commands(&mut lines, &tx).await {
            warn!(error = %e, "stdin closed");
        }
    });

    tokio::select! {
        _ = registry.run(rx, print_changes) => {}
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }
    Ok(())
}

/// Parses one command per line. Commands that need a confirmation ask for it
/// on the next line.
async fn read_commands(lines: &mut Lines<BufReader<Stdin>>, tx: &mpsc::Sender<Request>) -> Result<()> {
    while let Some(line) = lines.next_line().await? {
        let command: Command = match line.parse() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };
        let confirmed = match command.confirmation() {
            Some(question) => {
                let mut stderr = tokio::io::stderr();
                stderr.write_all(format!("{question} [y/N] ").as_bytes()).await?;
                stderr.flush().await?;
                let answer = lines.next_line().await?.unwrap_or_default();
                matches!(answer.trim(), "y" | "Y" | "yes")
            }
            None => false,
        };
        if tx.send(Request { command, confirmed }).await.is_err() {
            break;
        }
    }
    Ok(())
}

/// Writes every container that changed, keyed by its element id.
fn print_changes(doc: &mut Document) {
    for (slot, panel) in doc.take_dirty() {
        println!("<!-- #{} -->", slot.dom_id());
        match panel {
            Some(p) if p.visible => println!("{}", p.html),
            Some(_) => println!("<!-- hidden -->"),
            None => println!("<!-- removed -->"),
        }
        if slot.has_cards() && !doc.search_term().is_empty() {
            let hidden: Vec<String> = doc.hidden_cards().iter().map(u64::to_string).collect();
            println!("<!-- filtered by \"{}\", hidden: [{}] -->", doc.search_term(), hidden.join(", "));
        }
    }
    for notice in doc.take_notices() {
        match notice.level {
            NoticeLevel::Success => eprintln!("ok: {}", notice.text),
            NoticeLevel::Error => eprintln!("error: {}", notice.text),
        }
    }
}
