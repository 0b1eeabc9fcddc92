use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical wire and text-model format for `expense_date`
pub const EXPENSE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A shared expense as stored in the remote `expenses` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Opaque identifier assigned by the store
    pub id: String,
    /// Name of the contributor who paid
    pub paid_by: String,
    /// Amount paid, always positive
    pub amount: f64,
    /// What the money was spent on
    pub description: String,
    /// Calendar day the expense happened (YYYY-MM-DD on the wire)
    pub expense_date: NaiveDate,
    /// Insertion timestamp assigned by the store (RFC 3339)
    pub created_at: DateTime<Utc>,
}

/// The client-suppliable part of an expense, used for both insert and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub paid_by: String,
    pub amount: f64,
    pub description: String,
    pub expense_date: NaiveDate,
}

impl NewExpense {
    /// Copy the editable fields of an existing record
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            paid_by: expense.paid_by.clone(),
            amount: expense.amount,
            description: expense.description.clone(),
            expense_date: expense.expense_date,
        }
    }

    /// Build the stored record once the store has assigned id and timestamp
    pub fn into_expense(self, id: String, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            paid_by: self.paid_by,
            amount: self.amount,
            description: self.description,
            expense_date: self.expense_date,
            created_at,
        }
    }
}

/// Raw, unvalidated form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub paid_by: String,
    pub amount: String,
    pub description: String,
    /// Canonical YYYY-MM-DD string, written by the date picker
    pub expense_date: String,
}

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseField {
    PaidBy,
    Amount,
    Description,
    ExpenseDate,
}

/// Field-scoped validation errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpenseValidationError {
    Required,
    InvalidAmount,
    InvalidDate,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseValidationError::Required => write!(f, "Required"),
            ExpenseValidationError::InvalidAmount => write!(f, "Enter a valid amount"),
            ExpenseValidationError::InvalidDate => write!(f, "Pick a valid date"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// At most one error per field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<ExpenseField, ExpenseValidationError>);

impl FieldErrors {
    pub fn insert(&mut self, field: ExpenseField, error: ExpenseValidationError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: ExpenseField) -> Option<&ExpenseValidationError> {
        self.0.get(&field)
    }

    /// Display message for a field, if it failed validation
    pub fn message(&self, field: ExpenseField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExpenseField, &ExpenseValidationError)> {
        self.0.iter()
    }
}

impl ExpenseDraft {
    /// Pre-fill a draft from an existing record for editing
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            paid_by: expense.paid_by.clone(),
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            expense_date: format_iso_date(expense.expense_date),
        }
    }

    /// Validate every field and produce a trimmed, typed record.
    ///
    /// All failing fields are reported together so the form can mark each one.
    pub fn validate(&self) -> Result<NewExpense, FieldErrors> {
        let mut errors = FieldErrors::default();

        let paid_by = self.paid_by.trim();
        if paid_by.is_empty() {
            errors.insert(ExpenseField::PaidBy, ExpenseValidationError::Required);
        }

        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.insert(ExpenseField::Amount, ExpenseValidationError::InvalidAmount);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(ExpenseField::Description, ExpenseValidationError::Required);
        }

        let expense_date = if self.expense_date.trim().is_empty() {
            errors.insert(ExpenseField::ExpenseDate, ExpenseValidationError::Required);
            None
        } else {
            let parsed = parse_iso_date(&self.expense_date);
            if parsed.is_none() {
                errors.insert(ExpenseField::ExpenseDate, ExpenseValidationError::InvalidDate);
            }
            parsed
        };

        match (amount, expense_date) {
            (Some(amount), Some(expense_date)) if errors.is_empty() => Ok(NewExpense {
                paid_by: paid_by.to_string(),
                amount,
                description: description.to_string(),
                expense_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Parse an amount input; only finite numbers greater than zero are accepted
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Parse a canonical YYYY-MM-DD string
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), EXPENSE_DATE_FORMAT).ok()
}

/// Format a date as YYYY-MM-DD
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(EXPENSE_DATE_FORMAT).to_string()
}

/// Short display date, e.g. "Jan 5, 2024"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Long display date used on the date picker button, e.g. "January 5th, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

/// US-dollar currency string with thousands separators, e.g. "$1,234.50"
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Sort newest first: by expense date, then by creation time, both descending
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.expense_date
            .cmp(&a.expense_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Distinct payer names in first-seen order
pub fn unique_payers(expenses: &[Expense]) -> Vec<String> {
    let mut payers: Vec<String> = Vec::new();
    for expense in expenses {
        if !payers.iter().any(|p| p == &expense.paid_by) {
            payers.push(expense.paid_by.clone());
        }
    }
    payers
}

/// Client-side list filter: payer substring AND description substring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub paid_by: String,
    pub search: String,
}

impl ExpenseFilter {
    pub fn is_active(&self) -> bool {
        !self.paid_by.is_empty() || !self.search.is_empty()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let matches_paid_by = self.paid_by.is_empty()
            || expense.paid_by.to_lowercase().contains(&self.paid_by.to_lowercase());
        let matches_search = self.search.is_empty()
            || expense
                .description
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        matches_paid_by && matches_search
    }

    /// Filter while keeping the incoming order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Aggregates over the full, unfiltered record set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseStats {
    pub total: f64,
    pub count: usize,
    pub payers: Vec<String>,
}

impl ExpenseStats {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        Self {
            total: expenses.iter().map(|e| e.amount).sum(),
            count: expenses.len(),
            payers: unique_payers(expenses),
        }
    }
}

/// Badge text for the list header
pub fn entry_count_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", count)
    }
}

/// Guidance shown under "No expenses found"
pub fn empty_state_hint(filter: &ExpenseFilter) -> &'static str {
    if filter.is_active() {
        "Try adjusting your filters"
    } else {
        "Add your first expense using the form"
    }
}

const AVATAR_COLORS: [&str; 6] = [
    "avatar-blue",
    "avatar-emerald",
    "avatar-purple",
    "avatar-orange",
    "avatar-pink",
    "avatar-teal",
];

/// Cosmetic CSS class for a payer's avatar, stable for a given name
pub fn avatar_color(name: &str) -> &'static str {
    let hash: usize = name.encode_utf16().map(usize::from).sum();
    AVATAR_COLORS[hash % AVATAR_COLORS.len()]
}

/// First character of the name, uppercased
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Application settings that are not tied to the store endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseAppConfig {
    pub table: String,
    pub toast_duration_ms: u32,
    pub enable_debug_logging: bool,
}

impl Default for ExpenseAppConfig {
    fn default() -> Self {
        Self {
            table: "expenses".to_string(),
            toast_duration_ms: 3000,
            enable_debug_logging: false,
        }
    }
}
