use crate::action::{BulkAction, BulkOutcome};
use crate::config::SelectionClearPolicy;
use crate::error::BulkActionError;

use super::DataTable;

impl<T: Clone + Send + Sync + 'static> DataTable<T> {
    pub fn bulk_actions(&self) -> &[BulkAction<T>] {
        &self.bulk_actions
    }

    /// Run the bulk action labelled `label` against the selected rows.
    ///
    /// Actions requiring confirmation are only invoked after the
    /// [`Confirmer`](crate::action::Confirmer) agrees. The selection is
    /// cleared after a successful run, or after any run when the table's
    /// [`SelectionClearPolicy`] is `Always`.
    pub async fn run_bulk_action(&self, label: &str) -> Result<BulkOutcome, BulkActionError> {
        let Some(action) = self.bulk_actions.iter().find(|a| a.label == label) else {
            log::warn!("No bulk action labelled '{}'", label);
            return Ok(BulkOutcome::Skipped);
        };

        let rows = self.selected_rows();
        if rows.is_empty() {
            return Ok(BulkOutcome::Skipped);
        }
        if action.is_disabled(&rows) {
            return Ok(BulkOutcome::Disabled);
        }

        if let Some(options) = &action.confirm {
            let Some(confirmer) = &self.confirmer else {
                log::warn!(
                    "Bulk action '{}' requires confirmation but no confirmer is set",
                    label
                );
                return Ok(BulkOutcome::Cancelled);
            };
            if !confirmer.confirm(options.clone()).await {
                log::debug!("Bulk action '{}' cancelled", label);
                return Ok(BulkOutcome::Cancelled);
            }
        }

        log::info!("Running bulk action '{}' on {} rows", label, rows.len());
        let result = (action.action)(rows).await;

        if result.is_ok() || self.config.selection_clear_policy == SelectionClearPolicy::Always {
            self.clear_selection();
        }

        match result {
            Ok(()) => Ok(BulkOutcome::Completed),
            Err(e) => {
                log::error!("Bulk action '{}' failed: {}", label, e.message);
                Err(e.with_action(label))
            }
        }
    }
}
