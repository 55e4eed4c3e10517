use std::collections::BTreeSet;

use serde::Serialize;

use crate::application::error::StoreError;
use crate::domain::posts::{DraftInput, ValidatedPost};
use crate::domain::{Post, PostId};

/// Which post's edit form is open, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "post_id", rename_all = "snake_case")]
pub enum EditingTarget {
    #[default]
    None,
    Editing(PostId),
}

/// The single form a rendering layer may have open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) enum FormState {
    #[default]
    Closed,
    Composing(DraftInput),
    Editing { id: PostId, draft: DraftInput },
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn editing_target(&self) -> EditingTarget {
        match self {
            Self::Editing { id, .. } => EditingTarget::Editing(*id),
            _ => EditingTarget::None,
        }
    }

    pub fn draft(&self) -> Option<&DraftInput> {
        match self {
            Self::Closed => None,
            Self::Composing(draft) | Self::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut DraftInput> {
        match self {
            Self::Closed => None,
            Self::Composing(draft) | Self::Editing { draft, .. } => Some(draft),
        }
    }
}

/// Acknowledgement of the last mutation that went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "post_id", rename_all = "snake_case")]
pub enum Notice {
    Created(PostId),
    Updated(PostId),
    Deleted(PostId),
}

/// One in-flight (or absent) operation as seen by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "post_id", rename_all = "snake_case")]
pub enum OperationState {
    Idle,
    Loading,
    Submitting,
    Deleting(PostId),
}

#[derive(Debug, Default)]
pub(super) struct State {
    pub(super) posts: Vec<Post>,
    pub(super) loads_in_flight: usize,
    pub(super) submitting: bool,
    pub(super) deleting: BTreeSet<PostId>,
    pub(super) error: Option<StoreError>,
    pub(super) notice: Option<Notice>,
    pub(super) form: FormState,
    /// Bumped whenever a form opens; submissions remember the value they
    /// started under so a late outcome leaves a newer form alone.
    pub(super) form_session: u64,
}

impl State {
    fn is_known(&self, id: PostId) -> bool {
        self.posts.iter().any(|post| post.id == id)
    }

    fn ensure_known(&self, id: PostId) -> Result<(), StoreError> {
        if self.is_known(id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    pub(super) fn start_create(
        &mut self,
        title: &str,
        content: &str,
    ) -> Result<(ValidatedPost, u64), StoreError> {
        let valid = ValidatedPost::new(title, content)?;
        self.start_submit()?;
        Ok((valid, self.form_session))
    }

    pub(super) fn start_update(
        &mut self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<(ValidatedPost, u64), StoreError> {
        let valid = ValidatedPost::new(title, content)?;
        self.ensure_known(id)?;
        self.start_submit()?;
        Ok((valid, self.form_session))
    }

    fn start_submit(&mut self) -> Result<(), StoreError> {
        if self.submitting {
            return Err(StoreError::SubmitInFlight);
        }
        self.submitting = true;
        Ok(())
    }

    pub(super) fn start_delete(&mut self, id: PostId) -> Result<(), StoreError> {
        self.ensure_known(id)?;
        if !self.deleting.insert(id) {
            return Err(StoreError::DeleteInFlight(id));
        }
        Ok(())
    }

    pub(super) fn finish_create(&mut self, created: PostId, session: u64) {
        if session == self.form_session && matches!(self.form, FormState::Composing(_)) {
            self.form = FormState::Closed;
        }
        self.notice = Some(Notice::Created(created));
    }

    pub(super) fn finish_update(&mut self, id: PostId, session: u64) {
        if session == self.form_session {
            self.close_edit_of(id);
        }
        self.notice = Some(Notice::Updated(id));
    }

    pub(super) fn finish_delete(&mut self, id: PostId) {
        self.posts.retain(|post| post.id != id);
        self.close_edit_of(id);
        self.notice = Some(Notice::Deleted(id));
    }

    fn close_edit_of(&mut self, id: PostId) {
        if self.form.editing_target() == EditingTarget::Editing(id) {
            self.form = FormState::Closed;
        }
    }

    /// Returns `false` when another form is already open.
    pub(super) fn begin_edit(&mut self, id: PostId) -> Result<bool, StoreError> {
        if self.form.is_open() {
            return Ok(false);
        }
        let post = self
            .posts
            .iter()
            .find(|post| post.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.form = FormState::Editing {
            id,
            draft: DraftInput::from_post(post),
        };
        self.form_session += 1;
        Ok(true)
    }

    pub(super) fn open_compose(&mut self) {
        if !self.form.is_open() {
            self.form = FormState::Composing(DraftInput::default());
            self.form_session += 1;
        }
    }

    pub(super) fn set_draft(&mut self, draft: DraftInput) {
        if let Some(current) = self.form.draft_mut() {
            *current = draft;
        }
    }
}
