//! Bulk actions and the confirmation port.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::BulkActionError;

/// Visual weight of a bulk-action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
}

/// Text of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: String,
    pub description: String,
    pub confirm_label: Option<String>,
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            confirm_label: None,
        }
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }
}

/// Asks the user to confirm a destructive operation.
///
/// Returns `true` if confirmed, `false` if cancelled.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, options: ConfirmOptions) -> bool;
}

/// Async operation run against the selected rows.
pub type ActionFn<T> =
    Arc<dyn Fn(Vec<T>) -> BoxFuture<'static, Result<(), BulkActionError>> + Send + Sync>;

/// Decides from the selection whether an action is currently unavailable.
pub type DisabledFn<T> = Arc<dyn Fn(&[T]) -> bool + Send + Sync>;

/// An operation offered for the current selection.
///
/// # Example
///
/// ```
/// use datagrid_lib::action::{ActionVariant, BulkAction, ConfirmOptions};
///
/// #[derive(Clone)]
/// struct Contact { id: u32, archived: bool }
///
/// let archive = BulkAction::new("Archive", |rows: Vec<Contact>| async move {
///     let _ids: Vec<u32> = rows.iter().map(|c| c.id).collect();
///     Ok(())
/// })
/// .variant(ActionVariant::Destructive)
/// .disabled_when(|rows| rows.iter().all(|c| c.archived))
/// .confirm(ConfirmOptions::new("Archive contacts?", "They can be restored later."));
/// ```
pub struct BulkAction<T> {
    pub label: String,
    pub action: ActionFn<T>,
    pub variant: ActionVariant,
    pub disabled: Option<DisabledFn<T>>,
    pub confirm: Option<ConfirmOptions>,
}

impl<T> BulkAction<T> {
    pub fn new<F, Fut>(label: impl Into<String>, action: F) -> Self
    where
        T: 'static,
        F: Fn(Vec<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BulkActionError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            action: Arc::new(
                move |rows| -> BoxFuture<'static, Result<(), BulkActionError>> {
                    Box::pin(action(rows))
                },
            ),
            variant: ActionVariant::Default,
            disabled: None,
            confirm: None,
        }
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(f));
        self
    }

    /// Require confirmation before running.
    pub fn confirm(mut self, options: ConfirmOptions) -> Self {
        self.confirm = Some(options);
        self
    }

    pub fn is_disabled(&self, rows: &[T]) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(rows))
    }
}

impl<T> Clone for BulkAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            action: Arc::clone(&self.action),
            variant: self.variant,
            disabled: self.disabled.clone(),
            confirm: self.confirm.clone(),
        }
    }
}

impl<T> fmt::Debug for BulkAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("confirm", &self.confirm)
            .finish_non_exhaustive()
    }
}

/// How a bulk-action invocation ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    /// The action ran and succeeded.
    Completed,
    /// Confirmation was declined, or required without a confirmer.
    Cancelled,
    /// The action's `disabled` check rejected the selection.
    Disabled,
    /// Nothing selected, or no action with that label.
    Skipped,
}
