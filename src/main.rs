// Module declarations
mod builder;
mod cli;
mod config;
mod directory;
mod front_matter;
mod liquid;
mod markdown;
mod server;
mod utils;

#[tokio::main]
async fn main() {
    cli::run().await;
}
