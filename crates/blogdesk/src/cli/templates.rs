//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone files under
//! `templates/`, embedded here as string constants.
//!
//! Conventions:
//!
//! 1. Layout math (column widths, truncation) happens in Rust. Templates receive
//!    pre-padded cells.
//! 2. Styles are chosen by semantic name. When a style depends on state, set a style
//!    variable once (`{% set prev_style = ... %}`) instead of branching around output.
//! 3. Templates are registered by name and may include each other (`list` includes
//!    `pagination`).

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const PAGINATION_TEMPLATE: &str = include_str!("templates/pagination.tmp");
pub const MODAL_TEMPLATE: &str = include_str!("templates/modal.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");

/// `(name, source)` pairs, in registration order.
pub const ALL: &[(&str, &str)] = &[
    ("list", LIST_TEMPLATE),
    ("pagination", PAGINATION_TEMPLATE),
    ("modal", MODAL_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
];
