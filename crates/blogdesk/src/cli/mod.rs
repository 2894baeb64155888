//! # CLI Behavior
//!
//! This is **one possible UI client** for blogdesk, not the application itself.
//! For the layering, see the library documentation in `blogdeskapp`.
//!
//! ## Routes on the Terminal
//!
//! The management view lives behind the session guard exactly as it does elsewhere:
//!
//! - `blogdesk login` is the `/login` view. When a session already exists it only reports
//!   the redirect to `/blog-management`.
//! - Every listing or mutation command is the `/blog-management` view. Without a session it
//!   fails with a hint to log in. A 401 from the server clears the stored credential, so the
//!   next command starts at `/login` again.
//!
//! ### Naked Execution (`blogdesk`)
//!
//! Running `blogdesk` with no arguments resolves `/`, which means `blogdesk list`.
//!
//! ### One-shot vs Interactive
//!
//! One-shot commands (`list`, `add`, `edit`, `delete`) each mount the view, act once and
//! print the re-fetched page. `blogdesk shell` keeps a single view alive so paging, search
//! and open modals carry over between commands.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch and one-shot handlers
//! - `shell`: The interactive console
//! - `render`: Template rendering of view snapshots
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod shell;
mod styles;
mod templates;

pub use commands::run;
