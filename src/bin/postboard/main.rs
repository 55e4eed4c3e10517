//! postboard: command-line rendering surface over the post store.
#![deny(clippy::all, clippy::pedantic)]

mod error;
mod handlers;
mod prompt;
mod render;
mod shell;


use std::sync::Arc;

use postboard::config::{self, Command};
use postboard::infra::telemetry;
use postboard::{HttpBackend, PostStore};

use error::CliError;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let (cli, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let backend = HttpBackend::new(&settings.api.base_url)?;
    let store = PostStore::new(Arc::new(backend));

    handlers::handle(&store, cli.command.unwrap_or(Command::List)).await
}
