//! In-memory expense store.
//!
//! Stands in for the hosted store in tests and when the app runs without a
//! configured backend. It assigns ids and timestamps the way the hosted store
//! does, so callers cannot tell the difference.

use super::traits::ExpenseStorage;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::{sort_newest_first, Expense, NewExpense};
use std::cell::{Cell, RefCell};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: RefCell<Vec<Expense>>,
    last_created_at: Cell<Option<DateTime<Utc>>>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records, e.g. demo data
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let last_created_at = expenses.iter().map(|e| e.created_at).max();
        Self {
            expenses: RefCell::new(expenses),
            last_created_at: Cell::new(last_created_at),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.borrow().is_empty()
    }

    /// Strictly increasing insertion timestamps, even for inserts within the same clock tick
    fn next_created_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at.get() {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at.set(Some(created_at));
        created_at
    }
}

#[async_trait(?Send)]
impl ExpenseStorage for InMemoryExpenseStore {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.expenses.borrow().clone();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    async fn insert_expense(&self, expense: &NewExpense) -> Result<()> {
        let id = Uuid::new_v4().to_string();
        let created_at = self.next_created_at();
        debug!("Inserting expense {} into memory store", id);
        self.expenses
            .borrow_mut()
            .push(expense.clone().into_expense(id, created_at));
        Ok(())
    }

    async fn update_expense(&self, id: &str, expense: &NewExpense) -> Result<()> {
        let mut expenses = self.expenses.borrow_mut();
        let Some(existing) = expenses.iter_mut().find(|e| e.id == id) else {
            bail!("Expense {} not found", id);
        };
        existing.paid_by = expense.paid_by.clone();
        existing.amount = expense.amount;
        existing.description = expense.description.clone();
        existing.expense_date = expense.expense_date;
        Ok(())
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        let mut expenses = self.expenses.borrow_mut();
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            bail!("Expense {} not found", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_expense(paid_by: &str, amount: f64, day: u32) -> NewExpense {
        NewExpense {
            paid_by: paid_by.to_string(),
            amount,
            description: "Groceries".to_string(),
            expense_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let store = InMemoryExpenseStore::new();
        store.insert_expense(&new_expense("Alice", 12.5, 5)).await.unwrap();
        store.insert_expense(&new_expense("Bob", 3.0, 5)).await.unwrap();

        let listed = store.list_expenses().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_ne!(listed[0].id, listed[1].id);
        assert!(!listed[0].id.is_empty());
        // Same expense date: the later insert comes first
        assert_eq!(listed[0].paid_by, "Bob");
        assert!(listed[0].created_at > listed[1].created_at);
    }

    #[tokio::test]
    async fn test_list_orders_by_expense_date_first() {
        let store = InMemoryExpenseStore::new();
        store.insert_expense(&new_expense("Late", 1.0, 20)).await.unwrap();
        store.insert_expense(&new_expense("Early", 1.0, 2)).await.unwrap();

        let listed = store.list_expenses().await.unwrap();
        let payers: Vec<_> = listed.iter().map(|e| e.paid_by.as_str()).collect();
        assert_eq!(payers, vec!["Late", "Early"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_but_keeps_identity() {
        let store = InMemoryExpenseStore::new();
        store.insert_expense(&new_expense("Alice", 12.5, 5)).await.unwrap();
        let original = store.list_expenses().await.unwrap().remove(0);

        store
            .update_expense(&original.id, &new_expense("Alice", 20.0, 5))
            .await
            .unwrap();

        let updated = store.list_expenses().await.unwrap().remove(0);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.amount, 20.0);
    }

    #[tokio::test]
    async fn test_missing_ids_are_errors() {
        let store = InMemoryExpenseStore::new();
        assert!(store.update_expense("nope", &new_expense("A", 1.0, 1)).await.is_err());
        assert!(store.delete_expense("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_twice_fails_the_second_time() {
        let store = InMemoryExpenseStore::new();
        store.insert_expense(&new_expense("Alice", 12.5, 5)).await.unwrap();
        let id = store.list_expenses().await.unwrap()[0].id.clone();

        store.delete_expense(&id).await.unwrap();
        assert!(store.is_empty());
        assert!(store.delete_expense(&id).await.is_err());
    }
}
