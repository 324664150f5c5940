//! HouseWatch - command-line front end for the houses catalog.

use anyhow::Context;
use clap::{Parser, Subcommand};
use housewatch_app::{init_logging, ServiceLocator};
use housewatch_core::{EmailCapture, RequestOptions};
use housewatch_domain::House;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Browse houses from the upstream API with analytics instrumentation.
#[derive(Debug, Parser)]
#[command(name = "housewatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every house.
    Houses,
    /// Show one house.
    House {
        /// House identifier.
        id: String,
    },
    /// Identify yourself by email, optionally naming a favourite house.
    Identify {
        email: String,
        #[arg(long)]
        house_id: Option<String>,
        #[arg(long)]
        house_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let cli = Cli::parse();
    let config = housewatch_infra::config::load().context("failed to load configuration")?;
    let locator = ServiceLocator::new(config);

    let outcome = run(&locator, cli.command).await;

    let analytics = locator.analytics().context("failed to build analytics provider")?;
    analytics.flush().await;

    outcome
}

async fn run(locator: &ServiceLocator, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Houses => {
            let houses = locator
                .houses_api()?
                .list_houses_with(cancel_on_ctrl_c())
                .await
                .context("failed to list houses")?;
            print_json(&houses)
        }
        Command::House { id } => {
            let house: House = locator
                .houses_api()?
                .get_house_by_id_with(&id, cancel_on_ctrl_c())
                .await
                .with_context(|| format!("failed to load house {id:?}"))?;
            print_json(&house)
        }
        Command::Identify { email, house_id, house_name } => {
            let capture = EmailCapture::new(locator.analytics()?)
                .for_house(house_id.as_deref(), house_name.as_deref());
            capture.focus().await;
            match capture.submit(&email).await? {
                Some(user_id) => println!("identified as {user_id}"),
                None => println!("nothing to identify"),
            }
            Ok(())
        }
    }
}

/// Request options whose token fires on Ctrl-C.
fn cancel_on_ctrl_c() -> RequestOptions {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling request");
            child.cancel();
        }
    });
    RequestOptions::default().with_cancellation(token)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
