//! Editable form state for the add form and the edit modal.
//!
//! Fields are held as raw text, exactly as typed. [`BlogForm::validate`] plays the role of the
//! form controls' required-field constraints and produces the [`BlogDraft`] sent to the backend.

use crate::error::{BlogError, Result};
use crate::model::{parse_date, BlogDraft, BlogRecord, ISO_DATE_FORMAT};
use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Tags,
    Summary,
    Date,
    FilePath,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Title,
            FormField::Tags,
            FormField::Summary,
            FormField::Date,
            FormField::FilePath,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Tags => "tags",
            FormField::Summary => "summary",
            FormField::Date => "date",
            FormField::FilePath => "file_path",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Tags => "Tags (comma-separated)",
            FormField::Summary => "Summary *",
            FormField::Date => "Date *",
            FormField::FilePath => "File Path *",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::Tags)
    }
}

impl FromStr for FormField {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "tags" | "tag" => Ok(FormField::Tags),
            "summary" => Ok(FormField::Summary),
            "date" => Ok(FormField::Date),
            "file_path" | "file-path" | "path" => Ok(FormField::FilePath),
            other => Err(BlogError::Validation(format!("Unknown field: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlogForm {
    pub title: String,
    pub tags: String,
    pub summary: String,
    pub date: String,
    pub file_path: String,
}

impl BlogForm {
    /// An empty add form, dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format(ISO_DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn blank_today() -> Self {
        Self::blank(chrono::Local::now().date_naive())
    }

    /// An edit form pre-filled with the full record, including the untruncated summary.
    pub fn from_record(record: &BlogRecord) -> Self {
        Self {
            title: record.title.clone(),
            tags: record.tags.clone(),
            summary: record.summary.clone(),
            date: record.date.format(ISO_DATE_FORMAT).to_string(),
            file_path: record.file_path.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Tags => &self.tags,
            FormField::Summary => &self.summary,
            FormField::Date => &self.date,
            FormField::FilePath => &self.file_path,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Tags => self.tags = value,
            FormField::Summary => self.summary = value,
            FormField::Date => self.date = value,
            FormField::FilePath => self.file_path = value,
        }
    }

    pub fn validate(&self) -> Result<BlogDraft> {
        for field in FormField::all() {
            if field.is_required() && self.get(*field).trim().is_empty() {
                return Err(BlogError::Validation(format!(
                    "{} is required",
                    field.label().trim_end_matches(" *")
                )));
            }
        }

        let date = parse_date(&self.date).ok_or_else(|| {
            BlogError::Validation("Date must be a valid date (YYYY-MM-DD)".to_string())
        })?;

        Ok(BlogDraft {
            title: self.title.clone(),
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            date,
            file_path: self.file_path.clone(),
        })
    }
}
