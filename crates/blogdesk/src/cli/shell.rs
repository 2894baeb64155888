//! Interactive console.
//!
//! Drives one long-lived `BlogConsole` line by line, so the page, search text and open
//! modal carry over between commands the way they do in the management view. Failures of
//! individual commands are printed and the loop continues; losing the session ends it.

use super::commands::{parse_id, print_messages, AppContext, NOT_LOGGED_IN};
use anyhow::{bail, Result};
use blogdeskapp::backend::BlogBackend;
use blogdeskapp::console::{BlogConsole, ConsoleMessage};
use blogdeskapp::form::FormField;
use blogdeskapp::model::BlogId;
use blogdeskapp::routes::Route;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "blogdesk> ";

const HELP: &str = "\
Commands:
  search <text>        Filter by title or tags (empty clears)
  next | prev          Move one page
  add                  Open or close the add form
  edit <id>            Edit a blog on this page
  delete <id>          Ask to delete a blog on this page
  set <field> <value>  Fill a form field (title, tags, summary, date, file_path)
  save                 Submit the open form
  confirm              Confirm the pending deletion
  cancel               Close the open form or confirmation
  show                 Print the current view
  reload               Fetch the current page again
  logout               End the session
  help                 Show this help
  quit                 Leave the console
";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Next,
    Prev,
    Add,
    Edit(BlogId),
    Delete(BlogId),
    Set(FormField, String),
    Save,
    Confirm,
    Cancel,
    Show,
    Reload,
    Logout,
    Help,
    Quit,
}

pub fn parse(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let id = |rest: &str| {
        if rest.is_empty() {
            Err(format!("Usage: {} <id>", verb))
        } else {
            Ok(parse_id(rest))
        }
    };

    match verb {
        "search" | "s" => Ok(ShellCommand::Search(rest.to_string())),
        "next" | "n" => Ok(ShellCommand::Next),
        "prev" | "previous" | "p" => Ok(ShellCommand::Prev),
        "add" => Ok(ShellCommand::Add),
        "edit" => id(rest).map(ShellCommand::Edit),
        "delete" | "rm" => id(rest).map(ShellCommand::Delete),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("Usage: set <field> <value>".to_string());
            }
            let field: FormField = field.parse().map_err(|e| format!("{}", e))?;
            Ok(ShellCommand::Set(field, value.trim().to_string()))
        }
        "save" => Ok(ShellCommand::Save),
        "confirm" | "yes" => Ok(ShellCommand::Confirm),
        "cancel" => Ok(ShellCommand::Cancel),
        "show" | "ls" => Ok(ShellCommand::Show),
        "reload" => Ok(ShellCommand::Reload),
        "logout" => Ok(ShellCommand::Logout),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command: {} (try `help`)", other)),
    }
}

pub(super) fn run(app: &AppContext) -> Result<()> {
    let mut console = app.ctx.console()?;
    if console.route() != Route::BlogManagement {
        bail!(NOT_LOGGED_IN);
    }

    app.runtime.block_on(console.mount());
    show(app, &mut console)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                print_messages(app, &[ConsoleMessage::warning(message)])?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }

        if let Err(e) = step(app, &mut console, command) {
            print_messages(app, &[ConsoleMessage::warning(format!("Error: {}", e))])?;
        }

        if console.route() == Route::Login {
            print_messages(app, &console.take_messages())?;
            break;
        }
    }
    Ok(())
}

fn step<B: BlogBackend>(
    app: &AppContext,
    console: &mut BlogConsole<B>,
    command: ShellCommand,
) -> Result<()> {
    match command {
        ShellCommand::Search(text) => {
            app.runtime.block_on(console.set_search(&text));
            show(app, console)?;
        }
        ShellCommand::Next => {
            app.runtime.block_on(console.next_page());
            show(app, console)?;
        }
        ShellCommand::Prev => {
            app.runtime.block_on(console.previous_page());
            show(app, console)?;
        }
        ShellCommand::Reload => {
            app.runtime.block_on(console.reload());
            show(app, console)?;
        }
        ShellCommand::Show => show(app, console)?,
        ShellCommand::Add => {
            console.toggle_add_form();
            show_modal(app, console)?;
        }
        ShellCommand::Edit(id) => {
            console.open_edit(&id)?;
            show_modal(app, console)?;
        }
        ShellCommand::Delete(id) => {
            console.open_delete(&id)?;
            show_modal(app, console)?;
        }
        ShellCommand::Set(field, value) => console.set_field(field, value)?,
        ShellCommand::Save => {
            if console.modal().form().is_none() {
                bail!("No form is open");
            }
            app.runtime.block_on(console.submit())?;
            show(app, console)?;
        }
        ShellCommand::Confirm => {
            app.runtime.block_on(console.confirm_delete())?;
            show(app, console)?;
        }
        ShellCommand::Cancel => {
            console.cancel();
            print_messages(app, &[ConsoleMessage::info("Cancelled")])?;
        }
        ShellCommand::Logout => {
            console.logout()?;
            print_messages(app, &[ConsoleMessage::success(format!(
                "Logged out. Redirecting to {}",
                Route::Login
            ))])?;
        }
        ShellCommand::Help => print!("{}", HELP),
        ShellCommand::Quit => {}
    }
    Ok(())
}

/// Messages, the listing, then whatever modal is open.
fn show<B: BlogBackend>(app: &AppContext, console: &mut BlogConsole<B>) -> Result<()> {
    print_messages(app, &console.take_messages())?;
    if console.route() != Route::BlogManagement {
        return Ok(());
    }
    print!("{}", app.renderer.view(&console.view())?);
    if console.modal().is_open() {
        println!();
        show_modal(app, console)?;
    }
    Ok(())
}

fn show_modal<B: BlogBackend>(app: &AppContext, console: &mut BlogConsole<B>) -> Result<()> {
    print!("{}", app.renderer.modal(&console.view().modal)?);
    let hint = if console.modal().form().is_some() {
        "Use `set <field> <value>`, then `save` or `cancel`."
    } else if console.modal().is_open() {
        "Type `confirm` to delete or `cancel` to keep it."
    } else {
        return Ok(());
    };
    print_messages(app, &[ConsoleMessage::info(hint)])
}
