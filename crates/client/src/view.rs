//! Plain-text rendering of the users screen.

use std::fmt::Write;

use db::UserRow;
use tabled::{settings::Style, Table, Tabled};

use crate::state::{FormMode, UiState};

#[derive(Tabled)]
struct UserLine {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: i32,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&UserRow> for UserLine {
    fn from(user: &UserRow) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
            email: user.email.clone(),
        }
    }
}

/// Render the form card followed by the users list.
pub fn render(state: &UiState) -> String {
    let mut out = String::new();

    let (title, description) = match state.mode {
        FormMode::Create => ("Create New User", "Add a new user to the database"),
        FormMode::Edit(_) => ("Edit User", "Update an existing user's information"),
    };
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "{description}");
    let _ = writeln!(out, "  name:  {}", state.form.name);
    let _ = writeln!(out, "  age:   {}", state.form.age);
    let _ = writeln!(out, "  email: {}", state.form.email);
    let _ = writeln!(out);

    let _ = writeln!(out, "== Users List ==");
    if state.is_loading {
        let _ = writeln!(out, "Loading...");
    } else if state.users.is_empty() {
        let _ = writeln!(out, "No users found.");
    } else {
        let lines: Vec<UserLine> = state.users.iter().map(UserLine::from).collect();
        let table = Table::new(lines).with(Style::rounded()).to_string();
        let _ = writeln!(out, "{table}");
    }

    out
}
