use std::process::ExitCode;

use clap::{Parser, Subcommand};
use client::{ApiClient, ReqwestTransport};
use foundation::LatLon;
use protocol::ParkingId;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod session;

use config::Config;
use output::modal_text;
use session::{Reply, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find somewhere to leave your bike in London")]
struct Args {
    /// API base URL (default: $PARKING_API_BASE or http://127.0.0.1:5000)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (default: $PARKING_API_TIMEOUT_SECS or 15)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search near an address or place name
    Search {
        #[arg(required = true)]
        text: Vec<String>,

        /// Also show details of the n-th result
        #[arg(long)]
        details: Option<usize>,
    },

    /// Search around a coordinate pair
    #[command(allow_negative_numbers = true)]
    Near {
        lat: f64,
        lon: f64,

        /// Also show details of the n-th result
        #[arg(long)]
        details: Option<usize>,
    },

    /// Show details of one bike park
    Details { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(Ok(lines)) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Ok(Err(modal)) => {
            eprintln!("{}", modal_text(&modal));
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Reply, Box<dyn std::error::Error>> {
    let config = Config::resolve(args.base_url, args.timeout_secs)?;
    let transport = ReqwestTransport::new(config.timeout)?;
    let session = Session::new(ApiClient::new(&config.base_url, transport));

    let reply = match args.command {
        Command::Search { text, details } => {
            let reply = session.search(&text.join(" ")).await;
            then_details(&session, reply, details).await
        }
        Command::Near { lat, lon, details } => {
            let reply = session.near(LatLon::new(lat, lon)).await;
            then_details(&session, reply, details).await
        }
        Command::Details { id } => session.details(ParkingId::new(id)).await,
    };
    Ok(reply)
}

async fn then_details(
    session: &Session<ReqwestTransport>,
    reply: Reply,
    pick: Option<usize>,
) -> Reply {
    let mut lines = reply?;
    if let Some(index) = pick {
        lines.push(String::new());
        lines.extend(session.pick(index).await?);
    }
    Ok(lines)
}
