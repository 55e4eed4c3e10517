#![deny(clippy::all, clippy::pedantic)]

use postboard::config::{Command, CreateArgs, DeleteArgs, UpdateArgs};
use postboard::{PostStore, StoreError};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::error::CliError;
use crate::prompt::confirm;
use crate::render::print_json;
use crate::shell;

pub async fn handle(store: &PostStore, command: Command) -> Result<(), CliError> {
    match command {
        Command::List => list(store).await,
        Command::Create(args) => create(store, args).await,
        Command::Update(args) => update(store, args).await,
        Command::Delete(args) => {
            let mut input = BufReader::new(tokio::io::stdin());
            let mut prompt = tokio::io::stderr();
            delete(store, args, &mut input, &mut prompt).await
        }
        Command::Shell => {
            let input = BufReader::new(tokio::io::stdin());
            shell::run(store, input, tokio::io::stdout()).await
        }
    }
}

/// Print the view whatever happened, then surface the command's outcome.
fn finish(store: &PostStore, outcome: Result<(), StoreError>) -> Result<(), CliError> {
    print_json(&store.view())?;
    outcome.map_err(CliError::from)
}

pub async fn list(store: &PostStore) -> Result<(), CliError> {
    let outcome = store.load().await;
    finish(store, outcome)
}

pub async fn create(store: &PostStore, args: CreateArgs) -> Result<(), CliError> {
    let outcome = store.create(&args.title, &args.content).await.map(|_| ());
    finish(store, outcome)
}

pub async fn update(store: &PostStore, args: UpdateArgs) -> Result<(), CliError> {
    let outcome = async {
        store.load().await?;
        store
            .update(args.id, &args.title, &args.content)
            .await
            .map(|_| ())
    }
    .await;
    finish(store, outcome)
}

pub async fn delete<R, W>(
    store: &PostStore,
    args: DeleteArgs,
    input: &mut R,
    prompt: &mut W,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(err) = store.load().await {
        return finish(store, Err(err));
    }

    // unknown ids fall through to the store, which reports NotFound
    let title = store.view().post(args.id).map(|post| post.title.clone());
    if let (false, Some(title)) = (args.yes, title) {
        let question = format!("Delete post {} \"{title}\"?", args.id);
        if !confirm(input, prompt, &question).await? {
            return Err(CliError::NotConfirmed(args.id));
        }
    }

    let outcome = store.delete(args.id).await;
    finish(store, outcome)
}
