//! Create/edit form state.
//!
//! Submission is split in two so a UI can run the caller's async handler in
//! between: [`ExpenseForm::begin_submit`] validates and marks the form busy,
//! [`ExpenseForm::finish_submit`] applies the handler's outcome.

use chrono::NaiveDate;
use shared::{format_iso_date, parse_iso_date, Expense, ExpenseDraft, ExpenseField, FieldErrors, NewExpense};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    mode: FormMode,
    draft: ExpenseDraft,
    selected_date: Option<NaiveDate>,
    errors: FieldErrors,
    submitting: bool,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseForm {
    /// Empty form for logging a new expense
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ExpenseDraft::default(),
            selected_date: None,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    /// Form pre-filled from an existing record
    pub fn for_expense(expense: &Expense) -> Self {
        let draft = ExpenseDraft::from_expense(expense);
        Self {
            mode: FormMode::Edit,
            selected_date: parse_iso_date(&draft.expense_date),
            draft,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_message(&self, field: ExpenseField) -> Option<String> {
        self.errors.message(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_paid_by(&mut self, value: impl Into<String>) {
        self.draft.paid_by = value.into();
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.draft.amount = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.draft.description = value.into();
    }

    /// Calendar selection writes the canonical string into the text model.
    /// Clearing the selection leaves the text untouched.
    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
        if let Some(date) = date {
            self.draft.expense_date = format_iso_date(date);
        }
    }

    /// Validate and mark busy. Returns the record to hand to the submit
    /// handler, or `None` when validation failed or a submit is already running.
    pub fn begin_submit(&mut self) -> Option<NewExpense> {
        if self.submitting {
            return None;
        }
        match self.draft.validate() {
            Ok(expense) => {
                self.errors = FieldErrors::default();
                self.submitting = true;
                Some(expense)
            }
            Err(errors) => {
                debug!("Expense form rejected with {} invalid field(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the handler's outcome. A successful create resets the form;
    /// edits and failures keep the entered values.
    pub fn finish_submit(&mut self, success: bool) {
        self.submitting = false;
        if success && self.mode == FormMode::Create {
            self.draft = ExpenseDraft::default();
            self.selected_date = None;
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.mode) {
            (true, _) => "Saving...",
            (false, FormMode::Create) => "Add Expense",
            (false, FormMode::Edit) => "Save Changes",
        }
    }
}
