//! Styles for the blogdesk CLI.
//!
//! Templates refer to styles by semantic name (`{{ row.title | style("title") }}`), never by
//! color. The names map to `console::Style` values here, so the look can change without
//! touching templates.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const TAG: &str = "tag";
    pub const MUTED: &str = "muted";
    pub const HEADER: &str = "header";
    pub const LABEL: &str = "label";
    pub const BANNER: &str = "banner";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

pub static BLOGDESK_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::ID, Style::new().yellow()),
        (names::TITLE, Style::new().bold()),
        (names::TAG, Style::new().cyan()),
        (names::MUTED, Style::new().color256(246).italic()),
        (names::HEADER, Style::new().bold().underlined()),
        (names::LABEL, Style::new().color256(246)),
        (names::BANNER, Style::new().white().on_red().bold()),
        (names::INFO, Style::new().dim()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
        (names::ERROR, Style::new().red()),
    ])
});
