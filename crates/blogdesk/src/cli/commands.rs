//! # CLI Layer
//!
//! This module is **one possible UI client** for blogdesk. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, see `setup.rs`
//! 2. **Context Setup**: load config, restore the session, start logging
//! 3. **Dispatch**: drive the `BlogConsole` for the chosen command
//! 4. **Output Formatting**: render view snapshots through templates
//! 5. **Error Handling**: turn failures into `Error: <message>` and exit code 1 (in `main.rs`)
//!
//! One-shot commands map onto the management view: `list` mounts it, `add` opens the add
//! form and submits, `edit`/`delete` mount the requested page, open the modal for the id
//! and submit. Every successful mutation prints the re-fetched page.

use super::render::{use_color, Renderer};
use super::setup::{Cli, Commands, FieldArgs, OutputMode, ViewArgs};
use super::shell;
use anyhow::{anyhow, bail, Context, Result};
use blogdeskapp::auth::Credentials;
use blogdeskapp::backend::BlogBackend;
use blogdeskapp::config::{default_config_path, BlogdeskConfig};
use blogdeskapp::console::{BlogConsole, ConsoleMessage};
use blogdeskapp::form::FormField;
use blogdeskapp::init::{initialize, BlogdeskContext};
use blogdeskapp::model::BlogId;
use blogdeskapp::routes::Route;
use blogdeskapp::view::ModalView;
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

pub const NOT_LOGGED_IN: &str = "Not logged in. Run `blogdesk login` first.";

pub(super) struct AppContext {
    pub ctx: BlogdeskContext,
    pub renderer: Renderer,
    pub runtime: Runtime,
    config_file: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = BlogdeskConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    tracing::debug!(base_url = %config.base_url, "configuration resolved");

    let app = AppContext {
        ctx: initialize(config)?,
        renderer: Renderer::new(use_color(cli.no_color)).context("Failed to load templates")?,
        runtime: tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?,
        config_file: cli
            .config
            .clone()
            .or_else(default_config_path)
            .map(|p| p.display().to_string()),
    };

    match cli.command {
        Some(Commands::Login { username, password }) => handle_login(&app, username, password),
        Some(Commands::Logout) => handle_logout(&app),
        Some(Commands::Status) => handle_status(&app),
        Some(Commands::Config) => handle_config(&app),
        Some(Commands::List { view, output }) => handle_list(&app, &view, output),
        Some(Commands::Add { fields }) => handle_add(&app, &fields),
        Some(Commands::Edit { id, view, fields }) => handle_edit(&app, &id, &view, &fields),
        Some(Commands::Delete { id, view, yes }) => handle_delete(&app, &id, &view, yes),
        Some(Commands::Shell) => shell::run(&app),
        // Naked `blogdesk` resolves `/`: the listing when logged in, the login hint otherwise.
        None => handle_list(&app, &ViewArgs { page: 1, search: String::new() }, OutputMode::Text),
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "blogdesk=debug,blogdeskapp=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

// --- Session ---

fn handle_login(app: &AppContext, username: Option<String>, password: Option<String>) -> Result<()> {
    let guard = &app.ctx.guard;
    if guard.resolve(Route::Login.path()) == Route::BlogManagement {
        print_messages(app, &[ConsoleMessage::info(format!(
            "Already logged in. Redirecting to {}",
            Route::BlogManagement
        ))])?;
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => prompt_username()?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let route = guard.login(&Credentials::new(username, password))?;
    print_messages(app, &[ConsoleMessage::success(format!(
        "Logged in. Redirecting to {}",
        route
    ))])?;
    Ok(())
}

fn prompt_username() -> Result<String> {
    if io::stdin().is_terminal() {
        return Ok(dialoguer::Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?);
    }
    read_line("Username")
}

fn prompt_password() -> Result<String> {
    if io::stdin().is_terminal() {
        return Ok(dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?);
    }
    read_line("Password")
}

fn read_line(what: &str) -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        bail!("{} is required", what);
    }
    Ok(value)
}

fn handle_logout(app: &AppContext) -> Result<()> {
    let route = app.ctx.guard.logout()?;
    print_messages(app, &[ConsoleMessage::success(format!(
        "Logged out. Redirecting to {}",
        route
    ))])?;
    Ok(())
}

fn handle_status(app: &AppContext) -> Result<()> {
    let message = if app.ctx.guard.is_authenticated() {
        ConsoleMessage::success(format!("Logged in ({})", app.ctx.guard.resolve("/")))
    } else {
        ConsoleMessage::warning(format!("Not logged in ({})", app.ctx.guard.resolve("/")))
    };
    print_messages(app, &[message])?;
    Ok(())
}

fn handle_config(app: &AppContext) -> Result<()> {
    let config_file = app.config_file.as_deref().unwrap_or("(none)");
    let session_file = app.ctx.session_path.display().to_string();
    print!(
        "{}",
        app.renderer.config(
            &app.ctx.config,
            config_file,
            &session_file,
            app.ctx.guard.is_authenticated()
        )?
    );
    Ok(())
}

// --- Listing & Mutations ---

fn handle_list(app: &AppContext, view: &ViewArgs, output: OutputMode) -> Result<()> {
    let mut console = app.ctx.console()?;
    require_session(&console)?;

    app.runtime
        .block_on(console.mount_at(view.page, &view.search));
    settle(app, &mut console)?;

    match output {
        OutputMode::Text => print!("{}", app.renderer.view(&console.view())?),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&console.view())?),
    }
    Ok(())
}

fn handle_add(app: &AppContext, fields: &FieldArgs) -> Result<()> {
    let mut console = app.ctx.console()?;
    require_session(&console)?;

    console.open_add_form();
    apply_fields(&mut console, fields)?;
    submit(app, &mut console)
}

fn handle_edit(app: &AppContext, id: &str, view: &ViewArgs, fields: &FieldArgs) -> Result<()> {
    let mut console = app.ctx.console()?;
    require_session(&console)?;

    app.runtime
        .block_on(console.mount_at(view.page, &view.search));
    settle(app, &mut console)?;

    console.open_edit(&parse_id(id))?;
    apply_fields(&mut console, fields)?;
    submit(app, &mut console)
}

fn handle_delete(app: &AppContext, id: &str, view: &ViewArgs, yes: bool) -> Result<()> {
    let mut console = app.ctx.console()?;
    require_session(&console)?;

    app.runtime
        .block_on(console.mount_at(view.page, &view.search));
    settle(app, &mut console)?;

    console.open_delete(&parse_id(id))?;
    print!("{}", app.renderer.modal(&console.view().modal)?);

    if !yes && !confirm()? {
        console.cancel();
        print_messages(app, &[ConsoleMessage::info("Cancelled")])?;
        return Ok(());
    }

    let ok = app.runtime.block_on(console.confirm_delete())?;
    finish_mutation(app, &mut console, ok)
}

fn confirm() -> Result<bool> {
    if !io::stdin().is_terminal() {
        bail!("Refusing to delete without confirmation; pass --yes");
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt("Delete?")
        .default(false)
        .interact()?)
}

fn submit<B: BlogBackend>(app: &AppContext, console: &mut BlogConsole<B>) -> Result<()> {
    let ok = app.runtime.block_on(console.submit())?;
    finish_mutation(app, console, ok)
}

fn finish_mutation<B: BlogBackend>(
    app: &AppContext,
    console: &mut BlogConsole<B>,
    ok: bool,
) -> Result<()> {
    if !ok {
        // Show what was submitted so the failure can be corrected.
        if let ModalView::AddForm(_) | ModalView::EditForm(_) = console.view().modal {
            print!("{}", app.renderer.modal(&console.view().modal)?);
        }
    }
    settle(app, console)?;
    print!("{}", app.renderer.view(&console.view())?);
    Ok(())
}

/// Prints pending messages, then turns a lost session or a banner into an error.
fn settle<B: BlogBackend>(app: &AppContext, console: &mut BlogConsole<B>) -> Result<()> {
    print_messages(app, &console.take_messages())?;
    if console.route() == Route::Login {
        bail!(NOT_LOGGED_IN);
    }
    if let Some(error) = console.error() {
        return Err(anyhow!(error.to_string()));
    }
    Ok(())
}

fn require_session<B: BlogBackend>(console: &BlogConsole<B>) -> Result<()> {
    if console.route() != Route::BlogManagement {
        bail!(NOT_LOGGED_IN);
    }
    Ok(())
}

fn apply_fields<B: BlogBackend>(
    console: &mut BlogConsole<B>,
    fields: &FieldArgs,
) -> Result<()> {
    let values = [
        (FormField::Title, &fields.title),
        (FormField::Tags, &fields.tags),
        (FormField::Summary, &fields.summary),
        (FormField::Date, &fields.date),
        (FormField::FilePath, &fields.file_path),
    ];
    for (field, value) in values {
        if let Some(value) = value {
            console.set_field(field, value.clone())?;
        }
    }
    Ok(())
}

pub(super) fn parse_id(raw: &str) -> BlogId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

pub(super) fn print_messages(app: &AppContext, messages: &[ConsoleMessage]) -> Result<()> {
    let output = app.renderer.messages(messages)?;
    if !output.is_empty() {
        print!("{}", output);
        io::stdout().flush()?;
    }
    Ok(())
}
