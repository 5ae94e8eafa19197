//! `UiState` — the explicit state container behind the users screen.
//!
//! Transitions consume the state and return the next one; the only side
//! effects (HTTP calls) live in [`crate::CrudController`].

use db::UserRow;

use crate::form::UserForm;

pub const MSG_CREATED: &str = "User created successfully";
pub const MSG_UPDATED: &str = "User updated successfully";
pub const MSG_DELETED: &str = "User deleted successfully";
pub const MSG_FETCH_FAILED: &str = "An error occurred while fetching users";
pub const MSG_SUBMIT_FAILED: &str = "An error occurred while processing the request";
pub const MSG_DELETE_FAILED: &str = "An error occurred while deleting the user";

/// Which branch the form submit takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    /// Editing the row with this id.
    Edit(i32),
}

/// A transient notification shown to the user.  Failures carry no detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(&'static str),
    Failure(&'static str),
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success(msg) | Self::Failure(msg) => *msg,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Last fetched full list.
    pub users: Vec<UserRow>,
    /// Set while a request is in flight; only affects rendering.
    pub is_loading: bool,
    pub mode: FormMode,
    pub form: UserForm,
    /// Undrained notifications, oldest first.
    pub notices: Vec<Notice>,
}

impl UiState {
    pub fn loading(mut self) -> Self {
        self.is_loading = true;
        self
    }

    pub fn fetched(mut self, users: Vec<UserRow>) -> Self {
        self.users = users;
        self.is_loading = false;
        self
    }

    /// The previous list is kept.
    pub fn fetch_failed(mut self) -> Self {
        self.is_loading = false;
        self.notify(Notice::Failure(MSG_FETCH_FAILED))
    }

    pub fn created(self) -> Self {
        self.reset_form().notify(Notice::Success(MSG_CREATED))
    }

    pub fn updated(self) -> Self {
        self.reset_form().notify(Notice::Success(MSG_UPDATED))
    }

    /// A create or update was rejected.  The form is still reset.
    pub fn submit_failed(self) -> Self {
        self.reset_form().notify(Notice::Failure(MSG_SUBMIT_FAILED))
    }

    pub fn deleted(mut self) -> Self {
        self.is_loading = false;
        self.notify(Notice::Success(MSG_DELETED))
    }

    pub fn delete_failed(mut self) -> Self {
        self.is_loading = false;
        self.notify(Notice::Failure(MSG_DELETE_FAILED))
    }

    pub fn begin_edit(mut self, user: &UserRow) -> Self {
        self.form = UserForm::from_user(user);
        self.mode = FormMode::Edit(user.id);
        self
    }

    pub fn cancel_edit(self) -> Self {
        self.reset_form()
    }

    /// Remove and return pending notifications.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn reset_form(mut self) -> Self {
        self.form = UserForm::default();
        self.mode = FormMode::Create;
        self.is_loading = false;
        self
    }

    fn notify(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}
