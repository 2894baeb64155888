//! # Rendering
//!
//! Turns the library's view snapshots into terminal text through the minijinja templates in
//! `templates/`. A `style` filter maps semantic style names to `console::Style`s from
//! [`BLOGDESK_THEME`]; with color disabled it passes text through untouched. An unknown
//! style name fails the render.
//!
//! Layout calculations (column widths, truncation, padding) stay in Rust because they need
//! Unicode-aware widths. Templates only decide what is shown and how it is styled.

use super::styles::BLOGDESK_THEME;
use super::templates;
use blogdeskapp::config::BlogdeskConfig;
use blogdeskapp::console::ConsoleMessage;
use blogdeskapp::view::{ManagementView, ModalView, TableRow};
use minijinja::{context, Environment, Error, ErrorKind, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE_WIDTH: usize = 40;
pub const TAGS_WIDTH: usize = 30;
pub const DATE_WIDTH: usize = 10;

/// Pre-padded table cells.
#[derive(Serialize)]
struct TableLine {
    id: String,
    title: String,
    date: String,
    tags: String,
    file_path: String,
    summary: String,
    indent: String,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter(
            "style",
            move |value: Value, name: String| -> Result<String, Error> {
                let text = value.to_string();
                match BLOGDESK_THEME.get(name.as_str()) {
                    Some(style) if use_color => Ok(style.apply_to(text).to_string()),
                    Some(_) => Ok(text),
                    None => Err(Error::new(
                        ErrorKind::InvalidOperation,
                        format!("unknown style: {}", name),
                    )),
                }
            },
        );
        for &(name, source) in templates::ALL {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, Error> {
        self.env.get_template(name)?.render(ctx)
    }

    pub fn view(&self, view: &ManagementView) -> Result<String, Error> {
        let (header, rows) = table(&view.rows);
        self.render("list", context! { view => view, header => header, rows => rows })
    }

    pub fn modal(&self, modal: &ModalView) -> Result<String, Error> {
        self.render("modal", context! { modal => modal })
    }

    pub fn messages(&self, messages: &[ConsoleMessage]) -> Result<String, Error> {
        if messages.is_empty() {
            return Ok(String::new());
        }
        self.render("messages", context! { messages => messages })
    }

    pub fn config(
        &self,
        config: &BlogdeskConfig,
        config_file: &str,
        session_file: &str,
        logged_in: bool,
    ) -> Result<String, Error> {
        let session = if logged_in { "logged in" } else { "logged out" };
        self.render(
            "config",
            context! {
                config => config,
                config_file => config_file,
                session_file => session_file,
                session => session,
            },
        )
    }
}

/// Colors only when stdout is a color-capable terminal and `--no-color` was not passed.
pub fn use_color(no_color: bool) -> bool {
    !no_color && console::Term::stdout().features().colors_supported()
}

fn table(rows: &[TableRow]) -> (String, Vec<TableLine>) {
    let tag_text: Vec<String> = rows.iter().map(|r| r.tags.join(", ")).collect();

    let id_width = rows.iter().map(|r| r.id.width()).max().unwrap_or(0).max(2);
    let title_width = rows
        .iter()
        .map(|r| r.title.width())
        .max()
        .unwrap_or(0)
        .clamp(5, TITLE_WIDTH);
    let tags_width = tag_text
        .iter()
        .map(|t| t.width())
        .max()
        .unwrap_or(0)
        .clamp(4, TAGS_WIDTH);

    let header = format!(
        "{}  {}  {}  {}  File Path",
        pad("ID", id_width),
        pad("Title", title_width),
        pad("Date", DATE_WIDTH),
        pad("Tags", tags_width),
    );

    let lines = rows
        .iter()
        .zip(tag_text)
        .map(|(row, tags)| TableLine {
            id: pad(&row.id, id_width),
            title: pad(&truncate_to_width(&row.title, title_width), title_width),
            date: pad(&row.date, DATE_WIDTH),
            tags: pad(&truncate_to_width(&tags, tags_width), tags_width),
            file_path: row.file_path.clone(),
            summary: row.summary.replace('\n', " "),
            indent: " ".repeat(id_width),
        })
        .collect();

    (header, lines)
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
