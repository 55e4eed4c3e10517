#![deny(clippy::all, clippy::pedantic)]

use std::fmt::Write as _;

use postboard::application::store::{EditingTarget, Notice};
use postboard::ViewModel;
use serde::Serialize;

use crate::error::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", to_json(value)?);
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Render(e.to_string()))
}

/// Plain-text rendering of the view used by the interactive shell.
pub fn summary(view: &ViewModel) -> String {
    let mut out = String::new();

    if view.is_loading {
        out.push_str("loading...\n");
    }
    if view.is_empty() && !view.is_loading {
        out.push_str("no posts yet\n");
    }
    for post in &view.posts {
        let marker = if view.is_deleting(post.id) {
            " [deleting]"
        } else if view.editing == EditingTarget::Editing(post.id) {
            " [editing]"
        } else {
            ""
        };
        let _ = writeln!(out, "#{} {}{marker}", post.id, post.title);
    }

    if let Some(draft) = &view.draft {
        let heading = match view.editing {
            EditingTarget::Editing(id) => format!("editing #{id}"),
            EditingTarget::None => "new post".to_string(),
        };
        let _ = writeln!(out, "{heading}:");
        let _ = writeln!(
            out,
            "  title   ({} left): {}",
            draft.title_remaining(),
            draft.title
        );
        let _ = writeln!(
            out,
            "  content ({} left): {}",
            draft.content_remaining(),
            draft.content
        );
        if view.is_submitting {
            out.push_str("  saving...\n");
        }
    }

    if let Some(notice) = view.notice {
        let _ = writeln!(out, "{}", notice_text(notice));
    }
    if let Some(err) = &view.error {
        let _ = writeln!(out, "error: {err}");
    }

    out
}

fn notice_text(notice: Notice) -> String {
    match notice {
        Notice::Created(id) => format!("post #{id} created"),
        Notice::Updated(id) => format!("post #{id} updated"),
        Notice::Deleted(id) => format!("post #{id} deleted"),
    }
}
