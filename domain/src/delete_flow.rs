//! Two-step delete: mark a record, then confirm.
//!
//! Nothing is deleted until [`DeleteConfirmation::begin_confirm`] hands out
//! the pending id. While that delete is in flight the dialog cannot be
//! cancelled or confirmed again.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteConfirmation {
    pending: Option<String>,
    deleting: bool,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the confirmation dialog for a record. Ignored while deleting.
    pub fn request(&mut self, id: impl Into<String>) {
        if !self.deleting {
            self.pending = Some(id.into());
        }
    }

    /// Close the dialog without side effects. Returns false while deleting.
    pub fn cancel(&mut self) -> bool {
        if self.deleting {
            return false;
        }
        self.pending = None;
        true
    }

    /// Accept the dialog: returns the id to delete, at most once per request
    pub fn begin_confirm(&mut self) -> Option<String> {
        if self.deleting {
            return None;
        }
        let id = self.pending.clone()?;
        self.deleting = true;
        Some(id)
    }

    /// The delete finished, successfully or not; close the dialog
    pub fn finish(&mut self) {
        self.deleting = false;
        self.pending = None;
    }

    pub fn pending_id(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.deleting {
            "Deleting..."
        } else {
            "Delete"
        }
    }
}
