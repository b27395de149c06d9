use anyhow::Result;
use clap::Parser;

mod cache;
mod cli;
mod config;
mod handlers;
mod openapi_tests;
mod router;
mod schemas;
mod test_utils;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    model::init_tracing("socialite=debug,tower_http=debug,axum::rejection=trace");

    Cli::parse().run().await
}
