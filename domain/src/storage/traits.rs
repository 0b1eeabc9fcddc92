//! # Storage Traits

use anyhow::Result;
use async_trait::async_trait;
use shared::{Expense, NewExpense};

/// Create/read/update/delete over the single `expenses` table.
///
/// The store assigns `id` and `created_at`; callers never send them. Futures
/// are not required to be `Send` because browser HTTP futures are not.
#[async_trait(?Send)]
pub trait ExpenseStorage {
    /// List every expense, newest first: `expense_date` descending, then
    /// `created_at` descending
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Insert one expense
    async fn insert_expense(&self, expense: &NewExpense) -> Result<()>;

    /// Replace the four editable fields of the expense with this id.
    /// Fails if no such expense exists.
    async fn update_expense(&self, id: &str, expense: &NewExpense) -> Result<()>;

    /// Delete the expense with this id. Fails if no such expense exists.
    async fn delete_expense(&self, id: &str) -> Result<()>;
}
