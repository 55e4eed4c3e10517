#![deny(clippy::all, clippy::pedantic)]

//! Line-oriented interactive surface: one command per line, the view is
//! re-rendered after each one. Store failures land in the view and never end
//! the session.

use postboard::PostStore;
use postboard::domain::PostId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::CliError;
use crate::prompt::confirm;
use crate::render::summary;

const HELP: &str = "\
commands:
  list                 reload posts
  new                  open the new-post form
  title <text>         set the draft title
  content <text>       set the draft content
  edit <id>            open the edit form for a post
  save                 submit the open form
  cancel               close the open form
  delete <id>          delete a post (asks first)
  dismiss              clear the error
  show                 render the current view
  help                 this text
  quit                 leave the shell
";

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Load,
    Compose,
    Title(String),
    Content(String),
    Edit(PostId),
    Save,
    Cancel,
    Delete(PostId),
    Dismiss,
    Show,
    Help,
    Quit,
    Blank,
    Invalid(String),
}

fn parse(line: &str) -> Line {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word {
        "" => Line::Blank,
        "list" | "load" => Line::Load,
        "new" => Line::Compose,
        "title" => Line::Title(rest.to_string()),
        "content" => Line::Content(rest.to_string()),
        "edit" => parse_id(rest).map_or_else(Line::Invalid, Line::Edit),
        "delete" => parse_id(rest).map_or_else(Line::Invalid, Line::Delete),
        "save" => Line::Save,
        "cancel" => Line::Cancel,
        "dismiss" => Line::Dismiss,
        "show" => Line::Show,
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        other => Line::Invalid(format!("unknown command `{other}`, try `help`")),
    }
}

fn parse_id(raw: &str) -> Result<PostId, String> {
    raw.parse()
        .map_err(|_| format!("expected a post id, got `{raw}`"))
}

pub async fn run<R, W>(store: &PostStore, mut input: R, mut output: W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(err) = store.load().await {
        debug!(error = %err, "Initial load failed");
    }
    output.write_all(summary(&store.view()).as_bytes()).await?;

    let mut line = String::new();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }

        match parse(&line) {
            Line::Quit => break,
            Line::Blank => continue,
            Line::Help => {
                output.write_all(HELP.as_bytes()).await?;
                continue;
            }
            Line::Invalid(message) => {
                output.write_all(format!("{message}\n").as_bytes()).await?;
                continue;
            }
            Line::Delete(id) => {
                let question = format!("Delete post {id}?");
                if confirm(&mut input, &mut output, &question).await? {
                    settle(store.delete(id).await);
                }
            }
            command => execute(store, command).await,
        }

        output.write_all(summary(&store.view()).as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

async fn execute(store: &PostStore, command: Line) {
    match command {
        Line::Load => settle(store.load().await),
        Line::Compose => store.open_compose(),
        Line::Title(title) => {
            let content = store.view().draft.map(|draft| draft.content);
            store.set_draft(title, content.unwrap_or_default());
        }
        Line::Content(content) => {
            let title = store.view().draft.map(|draft| draft.title);
            store.set_draft(title.unwrap_or_default(), content);
        }
        Line::Edit(id) => settle(store.begin_edit(id)),
        Line::Save => settle(store.submit_draft().await.map(|_| ())),
        Line::Cancel => store.cancel_edit(),
        Line::Dismiss => store.dismiss_error(),
        Line::Show
        | Line::Delete(_)
        | Line::Help
        | Line::Quit
        | Line::Blank
        | Line::Invalid(_) => {}
    }
}

/// Failures are already part of the view; only trace them here.
fn settle(outcome: Result<(), postboard::StoreError>) {
    if let Err(err) = outcome {
        debug!(error = %err, "Shell command failed");
    }
}
