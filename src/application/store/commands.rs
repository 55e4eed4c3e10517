use tracing::{info, instrument, warn};

use crate::application::error::StoreError;
use crate::domain::posts::DraftInput;
use crate::domain::{Post, PostId};

use super::PostStore;
use super::pending::{InFlight, Pending};
use super::state::{EditingTarget, FormState};

impl PostStore {
    /// Fetch the full list and replace the collection with it.
    ///
    /// On failure the previous collection stays in place and the error is
    /// recorded in the view model.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), StoreError> {
        self.begin("load", |_| Ok(()))?;
        self.refresh().await
    }

    /// Refetch without touching the error or notice of the command that
    /// triggered it.
    async fn refresh(&self) -> Result<(), StoreError> {
        self.transition("refresh", |state| state.loads_in_flight += 1);
        let pending = Pending::new(self, "refresh", InFlight::Load);

        let outcome = self.backend.list_posts().await;

        pending.settle(|state| match outcome {
            Ok(posts) => {
                info!(count = posts.len(), "Posts loaded");
                state.posts = posts;
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from(err);
                warn!(error = %err, "Loading posts failed");
                state.error = Some(err.clone());
                Err(err)
            }
        })
    }

    /// Create a post from trimmed `title` and `content`, then refresh.
    ///
    /// The returned post is the server's record; the collection itself is
    /// only updated by the follow-up refresh, whose failure is recorded in
    /// the view model without failing the create.
    #[instrument(skip(self, title, content))]
    pub async fn create(&self, title: &str, content: &str) -> Result<Post, StoreError> {
        let (valid, session) = self.begin("create", |state| state.start_create(title, content))?;
        let pending = Pending::new(self, "create", InFlight::Submit);

        match self.backend.create_post(valid.into_create_request()).await {
            Ok(post) => {
                pending.settle(|state| state.finish_create(post.id, session));
                info!(post_id = post.id, "Post created");
                if let Err(err) = self.refresh().await {
                    warn!(post_id = post.id, error = %err, "Refresh after create failed");
                }
                Ok(post)
            }
            Err(err) => Err(Self::fail_submit(pending, err.into())),
        }
    }

    /// Replace the title and content of a known post, then refresh.
    #[instrument(skip(self, title, content))]
    pub async fn update(
        &self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<Post, StoreError> {
        let (valid, session) =
            self.begin("update", |state| state.start_update(id, title, content))?;
        let pending = Pending::new(self, "update", InFlight::Submit);

        match self.backend.update_post(id, valid.into_update_request()).await {
            Ok(post) => {
                pending.settle(|state| state.finish_update(id, session));
                info!(post_id = id, "Post updated");
                if let Err(err) = self.refresh().await {
                    warn!(post_id = id, error = %err, "Refresh after update failed");
                }
                Ok(post)
            }
            Err(err) => Err(Self::fail_submit(pending, err.into())),
        }
    }

    /// Submit the open form: create for a compose draft, update for an edit.
    pub async fn submit_draft(&self) -> Result<Post, StoreError> {
        let (target, draft) = self.read(|state| {
            (state.form.editing_target(), state.form.draft().cloned())
        });
        let Some(draft) = draft else {
            return Err(self.reject("submit_draft", StoreError::NoOpenForm));
        };
        match target {
            EditingTarget::Editing(id) => self.update(id, &draft.title, &draft.content).await,
            EditingTarget::None => self.create(&draft.title, &draft.content).await,
        }
    }

    /// Delete a known post. The id leaves the collection as soon as the
    /// backend confirms, and a refresh follows.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        self.begin("delete", |state| state.start_delete(id))?;
        let pending = Pending::new(self, "delete", InFlight::Delete(id));

        match self.backend.delete_post(id).await {
            Ok(()) => {
                pending.settle(|state| state.finish_delete(id));
                info!(post_id = id, "Post deleted");
                if let Err(err) = self.refresh().await {
                    warn!(post_id = id, error = %err, "Refresh after delete failed");
                }
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from(err);
                warn!(post_id = id, error = %err, "Deleting post failed");
                pending.settle(|state| state.error = Some(err.clone()));
                Err(err)
            }
        }
    }

    /// Open the edit form for `id`, seeded from the known post.
    ///
    /// Does nothing while another form is open.
    pub fn begin_edit(&self, id: PostId) -> Result<(), StoreError> {
        self.transition("begin_edit", |state| match state.begin_edit(id) {
            Ok(opened) => {
                if opened {
                    state.error = None;
                }
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.clone());
                Err(err)
            }
        })
    }

    /// Close whichever form is open and drop its draft.
    pub fn cancel_edit(&self) {
        self.transition("cancel_edit", |state| state.form = FormState::Closed);
    }

    /// Open the new-post form with an empty draft, unless a form is open.
    pub fn open_compose(&self) {
        self.transition("open_compose", |state| state.open_compose());
    }

    /// Replace the draft of the open form. Ignored when no form is open.
    pub fn set_draft(&self, title: impl Into<String>, content: impl Into<String>) {
        let draft = DraftInput::new(title, content);
        self.transition("set_draft", |state| state.set_draft(draft));
    }

    pub fn dismiss_error(&self) {
        self.transition("dismiss_error", |state| state.error = None);
    }

    fn reject(&self, op: &'static str, err: StoreError) -> StoreError {
        self.transition(op, |state| state.error = Some(err.clone()));
        err
    }

    fn fail_submit(pending: Pending<'_>, err: StoreError) -> StoreError {
        warn!(error = %err, "Submitting post failed");
        pending.settle(|state| state.error = Some(err.clone()));
        err
    }
}
