//! Page-level controller for the expense log.
//!
//! Owns the authoritative record set and everything derived from it. Creates
//! and updates are followed by a full refetch so store-assigned fields and
//! ordering are always authoritative; deletes prune the local set directly.
//! Store failures never escape: each one keeps the previous data, logs, and
//! emits a single error toast.

use crate::notifications::{Toast, ToastQueue};
use crate::storage::ExpenseStorage;
use shared::{Expense, ExpenseFilter, ExpenseStats, NewExpense};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, error, info};

pub const LOAD_FAILED: &str = "Failed to load expenses";
pub const CREATE_SUCCEEDED: &str = "Expense added successfully!";
pub const CREATE_FAILED: &str = "Failed to add expense";
pub const UPDATE_SUCCEEDED: &str = "Expense updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update expense";
pub const DELETE_SUCCEEDED: &str = "Expense deleted";
pub const DELETE_FAILED: &str = "Failed to delete expense";

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    /// Full record set in store order
    pub expenses: Vec<Expense>,
    /// True initially and during any full refetch
    pub loading: bool,
    /// Record currently open in the edit dialog
    pub editing: Option<Expense>,
    pub filter: ExpenseFilter,
    pub toasts: ToastQueue,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            loading: true,
            editing: None,
            filter: ExpenseFilter::default(),
            toasts: ToastQueue::new(),
        }
    }
}

impl ControllerState {
    pub fn visible_expenses(&self) -> Vec<Expense> {
        self.filter.apply(&self.expenses)
    }

    pub fn stats(&self) -> ExpenseStats {
        ExpenseStats::from_expenses(&self.expenses)
    }
}

type Listener = Rc<dyn Fn()>;

/// Bookkeeping that keeps refetch results from undoing newer local changes
#[derive(Debug, Default)]
struct RefreshTracker {
    /// Bumped whenever a refetch starts; only the latest one may apply
    generation: u64,
    /// Ids deleted since the latest refetch started
    deleted: HashSet<String>,
}

/// Cheap-to-clone handle; clones share state, storage and listener.
pub struct ExpenseController<S: ?Sized> {
    storage: Rc<S>,
    state: Rc<RefCell<ControllerState>>,
    listener: Rc<RefCell<Option<Listener>>>,
    refreshes: Rc<RefCell<RefreshTracker>>,
}

impl<S: ?Sized> Clone for ExpenseController<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Rc::clone(&self.storage),
            state: Rc::clone(&self.state),
            listener: Rc::clone(&self.listener),
            refreshes: Rc::clone(&self.refreshes),
        }
    }
}

impl<S: ExpenseStorage + ?Sized> ExpenseController<S> {
    pub fn new(storage: Rc<S>) -> Self {
        Self {
            storage,
            state: Rc::new(RefCell::new(ControllerState::default())),
            listener: Rc::new(RefCell::new(None)),
            refreshes: Rc::new(RefCell::new(RefreshTracker::default())),
        }
    }

    /// Called after every state change, e.g. to schedule a re-render
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    fn notify(&self) {
        // Clone out first so the listener may read state
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    pub fn snapshot(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.state.borrow().expenses.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// The list view: full set narrowed by the current filter
    pub fn visible_expenses(&self) -> Vec<Expense> {
        self.state.borrow().visible_expenses()
    }

    /// Always computed over the full set, never the filtered one
    pub fn stats(&self) -> ExpenseStats {
        self.state.borrow().stats()
    }

    pub fn payers(&self) -> Vec<String> {
        shared::unique_payers(&self.state.borrow().expenses)
    }

    pub fn filter(&self) -> ExpenseFilter {
        self.state.borrow().filter.clone()
    }

    pub fn set_payer_filter(&self, paid_by: impl Into<String>) {
        self.state.borrow_mut().filter.paid_by = paid_by.into();
        self.notify();
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.state.borrow_mut().filter.search = search.into();
        self.notify();
    }

    pub fn editing(&self) -> Option<Expense> {
        self.state.borrow().editing.clone()
    }

    pub fn begin_edit(&self, expense: Expense) {
        debug!("Opening edit session for expense {}", expense.id);
        self.state.borrow_mut().editing = Some(expense);
        self.notify();
    }

    pub fn cancel_edit(&self) {
        self.state.borrow_mut().editing = None;
        self.notify();
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.items().to_vec()
    }

    pub fn dismiss_toast(&self, id: u64) {
        if self.state.borrow_mut().toasts.dismiss(id) {
            self.notify();
        }
    }

    /// Refetch the full set. On failure the previous set is kept.
    ///
    /// A result overtaken by a later refetch is discarded, and records
    /// deleted while the fetch was in flight are left out.
    pub async fn refresh(&self) {
        let generation = {
            let mut refreshes = self.refreshes.borrow_mut();
            refreshes.generation += 1;
            refreshes.deleted.clear();
            refreshes.generation
        };
        self.state.borrow_mut().loading = true;
        self.notify();

        let result = self.storage.list_expenses().await;

        let deleted = {
            let refreshes = self.refreshes.borrow();
            if refreshes.generation != generation {
                debug!("Discarding refetch {} overtaken by {}", generation, refreshes.generation);
                return;
            }
            refreshes.deleted.clone()
        };

        {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(mut expenses) => {
                    if !deleted.is_empty() {
                        expenses.retain(|e| !deleted.contains(&e.id));
                    }
                    debug!("Loaded {} expenses", expenses.len());
                    state.expenses = expenses;
                }
                Err(e) => {
                    error!("Failed to load expenses: {:#}", e);
                    state.toasts.error(LOAD_FAILED);
                }
            }
            state.loading = false;
        }
        self.notify();
    }

    /// Insert, then refetch. The result tells the form whether to reset.
    pub async fn create(&self, expense: NewExpense) -> bool {
        info!("💸 Adding expense paid by {}: {:.2}", expense.paid_by, expense.amount);

        if let Err(e) = self.storage.insert_expense(&expense).await {
            error!("Failed to add expense: {:#}", e);
            self.state.borrow_mut().toasts.error(CREATE_FAILED);
            self.notify();
            return false;
        }

        self.state.borrow_mut().toasts.success(CREATE_SUCCEEDED);
        self.notify();
        self.refresh().await;
        true
    }

    /// Update all four editable fields, then refetch. The edit session stays
    /// open on failure so the user can retry.
    pub async fn update(&self, id: &str, expense: NewExpense) -> bool {
        info!("✏️ Updating expense {}", id);

        if let Err(e) = self.storage.update_expense(id, &expense).await {
            error!("Failed to update expense {}: {:#}", id, e);
            self.state.borrow_mut().toasts.error(UPDATE_FAILED);
            self.notify();
            return false;
        }

        {
            let mut state = self.state.borrow_mut();
            state.editing = None;
            state.toasts.success(UPDATE_SUCCEEDED);
        }
        self.notify();
        self.refresh().await;
        true
    }

    /// Delete and prune locally without a refetch
    pub async fn delete(&self, id: &str) -> bool {
        info!("🗑️ Deleting expense {}", id);

        if let Err(e) = self.storage.delete_expense(id).await {
            error!("Failed to delete expense {}: {:#}", id, e);
            self.state.borrow_mut().toasts.error(DELETE_FAILED);
            self.notify();
            return false;
        }

        self.refreshes.borrow_mut().deleted.insert(id.to_string());
        {
            let mut state = self.state.borrow_mut();
            state.expenses.retain(|e| e.id != id);
            // A record that no longer exists cannot stay open for editing
            if state.editing.as_ref().is_some_and(|e| e.id == id) {
                state.editing = None;
            }
            state.toasts.success(DELETE_SUCCEEDED);
        }
        self.notify();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ToastKind;
    use crate::storage::InMemoryExpenseStore;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Insert(NewExpense),
        Update(String, NewExpense),
        Delete(String),
    }

    /// Wraps the in-memory store, recording calls and failing on demand
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryExpenseStore,
        calls: RefCell<Vec<Call>>,
        failing: Cell<bool>,
    }

    impl RecordingStore {
        fn seeded(expenses: Vec<Expense>) -> Self {
            Self {
                inner: InMemoryExpenseStore::with_expenses(expenses),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn fail(&self, failing: bool) {
            self.failing.set(failing);
        }

        fn check(&self) -> Result<()> {
            if self.failing.get() {
                bail!("store unavailable");
            }
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl ExpenseStorage for RecordingStore {
        async fn list_expenses(&self) -> Result<Vec<Expense>> {
            self.calls.borrow_mut().push(Call::List);
            self.check()?;
            self.inner.list_expenses().await
        }

        async fn insert_expense(&self, expense: &NewExpense) -> Result<()> {
            self.calls.borrow_mut().push(Call::Insert(expense.clone()));
            self.check()?;
            self.inner.insert_expense(expense).await
        }

        async fn update_expense(&self, id: &str, expense: &NewExpense) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(Call::Update(id.to_string(), expense.clone()));
            self.check()?;
            self.inner.update_expense(id, expense).await
        }

        async fn delete_expense(&self, id: &str) -> Result<()> {
            self.calls.borrow_mut().push(Call::Delete(id.to_string()));
            self.check()?;
            self.inner.delete_expense(id).await
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored(id: &str, paid_by: &str, amount: f64, description: &str, day: NaiveDate) -> Expense {
        Expense {
            id: id.to_string(),
            paid_by: paid_by.to_string(),
            amount,
            description: description.to_string(),
            expense_date: day,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn coffee() -> NewExpense {
        NewExpense {
            paid_by: "Alice".to_string(),
            amount: 12.5,
            description: "Coffee".to_string(),
            expense_date: date(2024, 1, 5),
        }
    }

    async fn loaded(expenses: Vec<Expense>) -> (ExpenseController<RecordingStore>, Rc<RecordingStore>) {
        let store = Rc::new(RecordingStore::seeded(expenses));
        let controller = ExpenseController::new(Rc::clone(&store));
        controller.refresh().await;
        (controller, store)
    }

    #[tokio::test]
    async fn test_starts_loading_and_refresh_clears_it() {
        let store = Rc::new(RecordingStore::default());
        let controller = ExpenseController::new(Rc::clone(&store));
        assert!(controller.is_loading());

        controller.refresh().await;
        assert!(!controller.is_loading());
        assert!(controller.expenses().is_empty());
        assert!(controller.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_records() {
        let (controller, store) = loaded(vec![stored("a", "Bob", 5.0, "Bus", date(2024, 1, 1))]).await;

        store.fail(true);
        controller.refresh().await;

        assert_eq!(controller.expenses().len(), 1);
        assert!(!controller.is_loading());
        let toasts = controller.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, LOAD_FAILED);
    }

    #[tokio::test]
    async fn test_create_refetches_and_lists_new_record_first() {
        let (controller, store) = loaded(vec![stored("old", "Bob", 5.0, "Bus", date(2024, 1, 1))]).await;

        assert!(controller.create(coffee()).await);

        assert_eq!(
            store.calls(),
            vec![Call::List, Call::Insert(coffee()), Call::List]
        );
        let expenses = controller.expenses();
        assert_eq!(expenses.len(), 2);
        let first = &expenses[0];
        assert_eq!(NewExpense::from_expense(first), coffee());
        assert!(!first.id.is_empty());
        assert_ne!(first.id, "old");

        let toasts = controller.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, CREATE_SUCCEEDED);
    }

    #[tokio::test]
    async fn test_failed_create_changes_nothing() {
        let (controller, store) = loaded(vec![stored("a", "Bob", 5.0, "Bus", date(2024, 1, 1))]).await;
        store.fail(true);

        assert!(!controller.create(coffee()).await);

        assert_eq!(controller.expenses().len(), 1);
        assert_eq!(controller.toasts()[0].message, CREATE_FAILED);
        // No refetch after a failed insert
        assert_eq!(store.calls().last(), Some(&Call::Insert(coffee())));
    }

    #[tokio::test]
    async fn test_update_sends_all_fields_and_closes_edit_session() {
        let original = stored("a", "Alice", 12.5, "Coffee", date(2024, 1, 5));
        let (controller, store) = loaded(vec![original.clone()]).await;
        controller.begin_edit(original.clone());

        let mut changed = NewExpense::from_expense(&original);
        changed.amount = 20.0;
        assert!(controller.update("a", changed.clone()).await);

        assert!(store.calls().contains(&Call::Update("a".to_string(), changed)));
        assert_eq!(store.calls().last(), Some(&Call::List));
        assert!(controller.editing().is_none());
        assert_eq!(controller.expenses()[0].amount, 20.0);
        assert_eq!(controller.expenses()[0].description, "Coffee");
        assert_eq!(controller.toasts()[0].message, UPDATE_SUCCEEDED);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_edit_session_open() {
        let original = stored("a", "Alice", 12.5, "Coffee", date(2024, 1, 5));
        let (controller, store) = loaded(vec![original.clone()]).await;
        controller.begin_edit(original.clone());
        store.fail(true);

        assert!(!controller.update("a", coffee()).await);

        assert_eq!(controller.editing(), Some(original));
        assert_eq!(controller.toasts()[0].message, UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_update_of_deleted_record_fails() {
        let original = stored("a", "Alice", 12.5, "Coffee", date(2024, 1, 5));
        let (controller, _store) = loaded(vec![original.clone()]).await;

        assert!(controller.delete("a").await);
        assert!(!controller.update("a", coffee()).await);
        assert_eq!(controller.toasts().last().unwrap().message, UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_delete_prunes_locally_without_refetch() {
        let (controller, store) = loaded(vec![
            stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 2)),
            stored("b", "Bob", 15.5, "Dinner", date(2024, 1, 1)),
        ])
        .await;

        assert!(controller.delete("a").await);

        assert_eq!(store.calls(), vec![Call::List, Call::Delete("a".to_string())]);
        let ids: Vec<_> = controller.expenses().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(controller.toasts()[0].message, DELETE_SUCCEEDED);
    }

    #[tokio::test]
    async fn test_repeated_delete_is_an_error_and_changes_nothing() {
        let (controller, _store) = loaded(vec![
            stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 2)),
            stored("b", "Bob", 15.5, "Dinner", date(2024, 1, 1)),
        ])
        .await;

        assert!(controller.delete("a").await);
        assert!(!controller.delete("a").await);

        assert_eq!(controller.expenses().len(), 1);
        let toasts = controller.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[1].kind, ToastKind::Error);
        assert_eq!(toasts[1].message, DELETE_FAILED);
    }

    #[tokio::test]
    async fn test_delete_closes_edit_session_for_that_record() {
        let target = stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 2));
        let (controller, _store) = loaded(vec![target.clone()]).await;
        controller.begin_edit(target);

        assert!(controller.delete("a").await);
        assert!(controller.editing().is_none());
    }

    #[tokio::test]
    async fn test_stats_ignore_filter_but_list_respects_it() {
        let (controller, _store) = loaded(vec![
            stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 3)),
            stored("b", "Bob", 15.5, "Team lunch", date(2024, 1, 2)),
            stored("c", "Alice", 4.0, "Bus", date(2024, 1, 1)),
        ])
        .await;

        controller.set_payer_filter("alice");
        controller.set_search("lunch");

        let visible: Vec<_> = controller.visible_expenses().into_iter().map(|e| e.id).collect();
        assert_eq!(visible, vec!["a"]);

        let stats = controller.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 29.5);
        assert_eq!(controller.payers(), vec!["Alice".to_string(), "Bob".to_string()]);

        controller.set_payer_filter("");
        controller.set_search("");
        assert_eq!(controller.visible_expenses().len(), 3);
    }

    #[tokio::test]
    async fn test_dismiss_toast() {
        let (controller, store) = loaded(vec![]).await;
        store.fail(true);
        controller.refresh().await;

        let id = controller.toasts()[0].id;
        controller.dismiss_toast(id);
        assert!(controller.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_listener_sees_loading_during_refetch() {
        let store = Rc::new(RecordingStore::default());
        let controller = ExpenseController::new(Rc::clone(&store));
        let observed = Rc::new(RefCell::new(Vec::new()));
        {
            let observed = Rc::clone(&observed);
            let watched = controller.clone();
            controller.set_listener(move || observed.borrow_mut().push(watched.is_loading()));
        }

        assert!(controller.create(coffee()).await);

        // success toast, refetch started, refetch finished
        assert_eq!(*observed.borrow(), vec![true, true, false]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let (controller, _store) = loaded(vec![]).await;
        let other = controller.clone();
        other.set_search("coffee");
        assert_eq!(controller.filter().search, "coffee");
    }

    /// Hands out the store contents, then yields before returning them so
    /// other operations can run while the fetch is in flight
    struct YieldingStore {
        inner: InMemoryExpenseStore,
    }

    #[async_trait(?Send)]
    impl ExpenseStorage for YieldingStore {
        async fn list_expenses(&self) -> Result<Vec<Expense>> {
            let snapshot = self.inner.list_expenses().await?;
            tokio::task::yield_now().await;
            Ok(snapshot)
        }

        async fn insert_expense(&self, expense: &NewExpense) -> Result<()> {
            self.inner.insert_expense(expense).await
        }

        async fn update_expense(&self, id: &str, expense: &NewExpense) -> Result<()> {
            self.inner.update_expense(id, expense).await
        }

        async fn delete_expense(&self, id: &str) -> Result<()> {
            self.inner.delete_expense(id).await
        }
    }

    async fn yielding(expenses: Vec<Expense>) -> (ExpenseController<YieldingStore>, Rc<YieldingStore>) {
        let store = Rc::new(YieldingStore {
            inner: InMemoryExpenseStore::with_expenses(expenses),
        });
        let controller = ExpenseController::new(Rc::clone(&store));
        controller.refresh().await;
        (controller, store)
    }

    #[tokio::test]
    async fn test_delete_during_refetch_stays_deleted() {
        let (controller, store) = yielding(vec![
            stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 2)),
            stored("b", "Bob", 5.0, "Snacks", date(2024, 1, 1)),
        ])
        .await;

        let ((), ok) = tokio::join!(controller.refresh(), controller.delete("a"));

        assert!(ok);
        assert_eq!(store.inner.len(), 1);
        let ids: Vec<String> = controller.expenses().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b".to_string()]);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_overtaken_refetch_is_discarded() {
        let (controller, _store) = yielding(vec![stored("a", "Alice", 10.0, "Lunch", date(2024, 1, 2))]).await;

        // The first fetch snapshots before the insert; the create's own
        // refetch must win
        let ((), ok) = tokio::join!(controller.refresh(), controller.create(coffee()));

        assert!(ok);
        assert_eq!(controller.expenses().len(), 2);
        assert_eq!(controller.expenses()[0].description, "Coffee");
        assert!(!controller.is_loading());
    }
}
