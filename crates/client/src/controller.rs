//! `CrudController` — performs the HTTP calls and feeds outcomes into
//! [`UiState`] transitions.

use db::UserPatch;
use tracing::warn;

use crate::{
    form::{FormError, FormField},
    state::{FormMode, Notice, UiState},
    UsersApi,
};

pub struct CrudController<A: UsersApi> {
    api: A,
    state: UiState,
}

impl<A: UsersApi> CrudController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UiState::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.drain_notices()
    }

    fn apply(&mut self, transition: impl FnOnce(UiState) -> UiState) {
        let current = std::mem::take(&mut self.state);
        self.state = transition(current);
    }

    /// Initial load.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Replace the cached list with the server's current one.
    pub async fn refresh(&mut self) {
        self.apply(UiState::loading);
        match self.api.list().await {
            Ok(users) => self.apply(|s| s.fetched(users)),
            Err(e) => {
                warn!("fetching users failed: {e}");
                self.apply(UiState::fetch_failed);
            }
        }
    }

    pub fn set_field(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        self.state.form.set_field(field, raw)
    }

    /// Validate the form, then PUT (edit mode) or POST (create mode).
    ///
    /// Whatever the server answers, the form is reset to create mode and the
    /// list is re-fetched.  An invalid form sends nothing.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        let payload = self.state.form.validate()?;
        let mode = self.state.mode;
        self.apply(UiState::loading);

        match mode {
            FormMode::Edit(id) => match self.api.update(id, &UserPatch::from(payload)).await {
                Ok(_) => self.apply(UiState::updated),
                Err(e) => {
                    warn!(id, "updating user failed: {e}");
                    self.apply(UiState::submit_failed);
                }
            },
            FormMode::Create => match self.api.create(&payload).await {
                Ok(_) => self.apply(UiState::created),
                Err(e) => {
                    warn!("creating user failed: {e}");
                    self.apply(UiState::submit_failed);
                }
            },
        }

        self.refresh().await;
        Ok(())
    }

    /// Enter edit mode for a row in the cached list.  Returns `false` when the
    /// id is not in the list.
    pub fn edit(&mut self, id: i32) -> bool {
        let Some(user) = self.state.users.iter().find(|u| u.id == id).cloned() else {
            return false;
        };
        self.apply(|s| s.begin_edit(&user));
        true
    }

    pub fn cancel(&mut self) {
        self.apply(UiState::cancel_edit);
    }

    pub async fn delete(&mut self, id: i32) {
        self.apply(UiState::loading);
        match self.api.delete(id).await {
            Ok(_) => self.apply(UiState::deleted),
            Err(e) => {
                warn!(id, "deleting user failed: {e}");
                self.apply(UiState::delete_failed);
            }
        }
        self.refresh().await;
    }
}
