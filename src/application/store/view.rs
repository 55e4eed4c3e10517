use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use crate::application::error::StoreError;
use crate::domain::posts::{DraftInput, ValidatedPost};
use crate::domain::{Post, PostId};

use super::state::{EditingTarget, FormState, Notice, OperationState, State};

/// Read-only snapshot of the store, recomputed after every transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub posts: Vec<Post>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub deleting_ids: BTreeSet<PostId>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<StoreError>,
    pub notice: Option<Notice>,
    pub editing: EditingTarget,
    pub composing: bool,
    pub draft: Option<DraftInput>,
}

impl ViewModel {
    pub(super) fn from_state(state: &State) -> Self {
        Self {
            posts: state.posts.clone(),
            is_loading: state.loads_in_flight > 0,
            is_submitting: state.submitting,
            deleting_ids: state.deleting.clone(),
            error: state.error.clone(),
            notice: state.notice,
            editing: state.form.editing_target(),
            composing: matches!(state.form, FormState::Composing(_)),
            draft: state.form.draft().cloned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn is_deleting(&self, id: PostId) -> bool {
        self.deleting_ids.contains(&id)
    }

    /// Whether the open form's submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting
            && self
                .draft
                .as_ref()
                .is_some_and(|draft| ValidatedPost::new(&draft.title, &draft.content).is_ok())
    }

    /// Active operations, or `[Idle]` when nothing is in flight.
    pub fn operations(&self) -> Vec<OperationState> {
        let mut ops = Vec::new();
        if self.is_loading {
            ops.push(OperationState::Loading);
        }
        if self.is_submitting {
            ops.push(OperationState::Submitting);
        }
        ops.extend(self.deleting_ids.iter().copied().map(OperationState::Deleting));
        if ops.is_empty() {
            ops.push(OperationState::Idle);
        }
        ops
    }
}

#[derive(Serialize)]
struct ErrorView {
    kind: &'static str,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

#[allow(clippy::ref_option)]
fn serialize_error<S: Serializer>(
    error: &Option<StoreError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    error
        .as_ref()
        .map(|err| ErrorView {
            kind: err.kind(),
            message: err.to_string(),
            status: err.status(),
            retryable: err.is_retryable(),
        })
        .serialize(serializer)
}
