#![deny(clippy::all, clippy::pedantic)]

use postboard::StoreError;
use postboard::config::LoadError;
use postboard::domain::PostId;
use postboard::infra::error::InfraError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render output: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("deletion of post {0} was not confirmed")]
    NotConfirmed(PostId),
}
