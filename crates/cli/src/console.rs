//! Line-oriented front-end for [`client::CrudController`].

use std::io::Write;

use anyhow::{anyhow, bail, Context};
use client::{view, CrudController, FormField, UsersApi};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  refresh              re-fetch the users list
  set <field> <value>  fill a form field (name, age, email)
  submit               create, or update when editing
  edit <id>            load a row into the form
  cancel               leave edit mode and clear the form
  delete <id>          delete a row
  show                 redraw the screen
  help                 this text
  quit                 exit";

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Refresh,
    Set(FormField, String),
    Submit,
    Edit(i32),
    Cancel,
    Delete(i32),
    Show,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line.  Blank lines yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let cmd = match word {
            "refresh" => Self::Refresh,
            "submit" => Self::Submit,
            "cancel" => Self::Cancel,
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "edit" => Self::Edit(parse_id(rest)?),
            "delete" => Self::Delete(parse_id(rest)?),
            "set" => {
                let (field, value) = rest
                    .split_once(' ')
                    .ok_or_else(|| anyhow!("usage: set <field> <value>"))?;
                Self::Set(field.parse()?, value.trim().to_string())
            }
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(cmd))
    }
}

fn parse_id(raw: &str) -> anyhow::Result<i32> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid user id"))
}

fn print_screen<A: UsersApi>(ctl: &mut CrudController<A>) {
    for notice in ctl.take_notices() {
        println!("* {}", notice.message());
    }
    print!("{}", view::render(ctl.state()));
}

/// Mount the controller and process commands from stdin until EOF or `quit`.
pub async fn run<A: UsersApi>(mut ctl: CrudController<A>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ctl.mount().await;
    print_screen(&mut ctl);
    println!("{HELP}");

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let cmd = match ConsoleCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{e:#}");
                continue;
            }
        };

        match cmd {
            ConsoleCommand::Refresh => ctl.refresh().await,
            ConsoleCommand::Set(field, value) => {
                if let Err(e) = ctl.set_field(field, &value) {
                    println!("{e}");
                    continue;
                }
            }
            ConsoleCommand::Submit => {
                if let Err(e) = ctl.submit().await {
                    println!("{e}");
                    continue;
                }
            }
            ConsoleCommand::Edit(id) => {
                if !ctl.edit(id) {
                    println!("no user with id {id} in the list");
                    continue;
                }
            }
            ConsoleCommand::Cancel => ctl.cancel(),
            ConsoleCommand::Delete(id) => ctl.delete(id).await,
            ConsoleCommand::Show => {}
            ConsoleCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ConsoleCommand::Quit => break,
        }
        print_screen(&mut ctl);
    }

    Ok(())
}
