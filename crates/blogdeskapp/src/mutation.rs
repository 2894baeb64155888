//! # Mutations
//!
//! Exactly one of these is active at a time, which is what [`Modal`] encodes:
//! nothing, the inline add form, the edit modal for one record, or the delete
//! confirmation for one record. Opening one replaces whatever was open before.
//!
//! [`execute`] turns the open modal into the matching backend call. It does not touch the
//! listing: the console closes the modal and re-fetches the current view on success, and
//! keeps the modal open with [`MutationKind::failure_message`] on failure.

use crate::backend::BlogBackend;
use crate::error::{BlogError, Result};
use crate::form::BlogForm;
use crate::model::BlogRecord;

pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch blogs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Update,
    Delete,
}

impl MutationKind {
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Add => "Failed to add blog",
            MutationKind::Update => "Failed to update blog",
            MutationKind::Delete => "Failed to delete blog",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Add => "Blog added",
            MutationKind::Update => "Blog updated",
            MutationKind::Delete => "Blog deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    None,
    AddForm(BlogForm),
    Edit {
        target: BlogRecord,
        form: BlogForm,
    },
    ConfirmDelete(BlogRecord),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    pub fn kind(&self) -> Option<MutationKind> {
        match self {
            Modal::None => None,
            Modal::AddForm(_) => Some(MutationKind::Add),
            Modal::Edit { .. } => Some(MutationKind::Update),
            Modal::ConfirmDelete(_) => Some(MutationKind::Delete),
        }
    }

    pub fn form(&self) -> Option<&BlogForm> {
        match self {
            Modal::AddForm(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut BlogForm> {
        match self {
            Modal::AddForm(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }
}

/// Performs the backend call for the open modal.
pub async fn execute<B: BlogBackend>(backend: &B, modal: &Modal) -> Result<MutationKind> {
    match modal {
        Modal::AddForm(form) => {
            let draft = form.validate()?;
            backend.create(&draft).await?;
            Ok(MutationKind::Add)
        }
        Modal::Edit { target, form } => {
            let draft = form.validate()?;
            backend.update(&target.id, &draft).await?;
            Ok(MutationKind::Update)
        }
        Modal::ConfirmDelete(target) => {
            backend.remove(&target.id).await?;
            Ok(MutationKind::Delete)
        }
        Modal::None => Err(BlogError::InvalidState(
            "No form or confirmation is open".to_string(),
        )),
    }
}
