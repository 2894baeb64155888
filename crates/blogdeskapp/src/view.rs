//! Serializable snapshots of the management view.
//!
//! These are what a UI renders: the console never formats text itself, and renderers never
//! look at [`ListingState`] or [`Modal`] directly. Every struct here derives `Serialize` so
//! the CLI can feed them to templates or print them as JSON.

use crate::form::{BlogForm, FormField};
use crate::listing::ListingState;
use crate::model::{tag_labels, BlogRecord};
use crate::mutation::Modal;
use crate::routes::Route;
use chrono::NaiveDate;
use serde::Serialize;

pub const SUMMARY_PREVIEW_CHARS: usize = 100;
pub const LOADING_MESSAGE: &str = "Loading blogs...";
pub const EMPTY_MESSAGE: &str = "No blogs found";

/// First 100 characters followed by `...`, or the summary unchanged when it fits.
pub fn summary_preview(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
        return summary.to_string();
    }
    let mut preview: String = summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

/// `M/D/YYYY`, without zero padding.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub date: String,
    pub file_path: String,
}

impl From<&BlogRecord> for TableRow {
    fn from(record: &BlogRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            tags: tag_labels(&record.tags).into_iter().map(String::from).collect(),
            summary: summary_preview(&record.summary),
            date: display_date(record.date),
            file_path: record.file_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationView {
    /// Only shown when there is more than one page.
    pub visible: bool,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub label: String,
}

impl From<&ListingState> for PaginationView {
    fn from(listing: &ListingState) -> Self {
        let total_pages = listing.total_pages();
        Self {
            visible: total_pages > 1,
            page: listing.page(),
            total_pages,
            total_count: listing.total_count(),
            previous_enabled: listing.has_previous(),
            next_enabled: listing.has_next(),
            label: format!(
                "Page {} of {} ({} total)",
                listing.page(),
                total_pages,
                listing.total_count()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
}

impl FormView {
    fn new(heading: &'static str, submit_label: &'static str, form: &BlogForm) -> Self {
        let fields = FormField::all()
            .iter()
            .map(|field| FieldView {
                name: field.name(),
                label: field.label(),
                value: form.get(*field).to_string(),
                required: field.is_required(),
            })
            .collect();
        Self {
            heading,
            submit_label,
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletePrompt {
    pub heading: &'static str,
    pub message: String,
    pub warning: &'static str,
}

impl DeletePrompt {
    pub fn for_record(record: &BlogRecord) -> Self {
        Self {
            heading: "Confirm Delete",
            message: format!("Are you sure you want to delete: \"{}\"?", record.title),
            warning: "This action cannot be undone.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalView {
    None,
    AddForm(FormView),
    EditForm(FormView),
    ConfirmDelete(DeletePrompt),
}

impl From<&Modal> for ModalView {
    fn from(modal: &Modal) -> Self {
        match modal {
            Modal::None => ModalView::None,
            Modal::AddForm(form) => ModalView::AddForm(FormView::new("Add New Blog", "Add Blog", form)),
            Modal::Edit { form, .. } => {
                ModalView::EditForm(FormView::new("Edit Blog", "Update Blog", form))
            }
            Modal::ConfirmDelete(target) => ModalView::ConfirmDelete(DeletePrompt::for_record(target)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagementView {
    pub route: Route,
    pub search: String,
    pub error: Option<String>,
    /// Set instead of the table while a fetch is in flight.
    pub loading: Option<&'static str>,
    pub rows: Vec<TableRow>,
    /// Set when the last fetch returned nothing.
    pub empty: Option<&'static str>,
    pub pagination: PaginationView,
    pub modal: ModalView,
}

pub fn management(
    route: Route,
    listing: &ListingState,
    modal: &Modal,
    error: Option<&str>,
) -> ManagementView {
    let rows: Vec<TableRow> = listing.records().iter().map(TableRow::from).collect();
    let loading = listing.is_loading().then_some(LOADING_MESSAGE);
    let empty = (loading.is_none() && rows.is_empty()).then_some(EMPTY_MESSAGE);

    ManagementView {
        route,
        search: listing.search_query().to_string(),
        error: error.map(str::to_string),
        loading,
        rows,
        empty,
        pagination: PaginationView::from(listing),
        modal: ModalView::from(modal),
    }
}
