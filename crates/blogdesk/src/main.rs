//! # Blogdesk CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/blogdeskapp/`: UI-agnostic library (session guard, console, REST backend)
//! - `crates/blogdesk/`: this CLI, depending on `blogdeskapp`
//!
//! Errors from any layer end up here and are printed as `Error: <message>` with exit
//! status 1. Logs go to stderr and are controlled by `RUST_LOG` or `--verbose`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
