#![deny(clippy::all, clippy::pedantic)]

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::CliError;

/// Ask a yes/no question; anything but `y`/`yes` (including EOF) is a no.
pub async fn confirm<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<bool, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{question} [y/N] ").as_bytes()).await?;
    output.flush().await?;

    let mut answer = String::new();
    input.read_line(&mut answer).await?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
