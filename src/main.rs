use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use orbital_search::api::create_router;
use orbital_search::client::HttpSearchApi;
use orbital_search::config::CONFIG;
use orbital_search::form::FormState;
use orbital_search::render::{render_page, render_results};
use orbital_search::session::SearchSession;
use orbital_search::view::{Status, ViewModel};

#[derive(Parser)]
#[command(name = "orbital-search", about = "Travel search form for the orbital planner API")]
struct Cli {
    /// Planner API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Host the search page
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one search and print the result
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    origin: String,
    #[arg(long)]
    destination: String,
    #[arg(long, default_value = "")]
    depart_after: String,
    #[arg(long, default_value = "")]
    arrive_before: String,
    #[arg(long, default_value = "2")]
    max_layovers: String,
    #[arg(long, default_value = "balanced")]
    optimize_for: String,
    /// Print the full HTML page instead of plain text
    #[arg(long)]
    html: bool,
}

impl From<&SearchArgs> for FormState {
    fn from(args: &SearchArgs) -> Self {
        FormState {
            origin: args.origin.clone(),
            destination: args.destination.clone(),
            depart_after: args.depart_after.clone(),
            arrive_before: args.arrive_before.clone(),
            max_layovers: args.max_layovers.clone(),
            optimize_for: args.optimize_for.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("orbital_search=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .api_base_url
        .unwrap_or_else(|| CONFIG.api_base_url.clone());
    let api = Arc::new(HttpSearchApi::new(&base_url).context("Failed to build HTTP client")?);

    match cli.command {
        Command::Serve { host, port } => {
            let addr = format!(
                "{}:{}",
                host.unwrap_or_else(|| CONFIG.web_host.clone()),
                port.unwrap_or(CONFIG.web_port)
            );
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("serving search page on http://{addr}, planner at {base_url}");
            axum::serve(listener, create_router(api)).await?;
        }
        Command::Search(args) => {
            let session = SearchSession::new(api, ViewModel::new(FormState::from(&args)));
            let status = session.run_search().await;
            let view = session.snapshot().await;

            eprintln!("{}", view.preview());
            if args.html {
                println!("{}", render_page(&view));
            } else {
                println!("{status}");
                let results = render_results(view.results());
                if !results.is_empty() {
                    let text = html2text::from_read(results.as_bytes(), 100)
                        .context("Failed to format results")?;
                    println!("{text}");
                }
            }

            if !matches!(status, Status::Ok(_)) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
