//! # Expense Domain
//!
//! Client-side state for the Daily Expense Split Log, independent of any UI
//! framework.
//!
//! ## Module Organization
//!
//! - **storage**: the remote store abstraction and an in-memory implementation
//! - **expense_controller**: owner of the record set, filter state, edit session and toasts
//! - **form**: create/edit form state, validation and busy handling
//! - **delete_flow**: two-step delete confirmation
//! - **notifications**: toast queue shown to the user after every store operation
//!
//! Everything here is single-threaded. State lives behind `Rc<RefCell<_>>` and
//! no borrow is held across an `.await`.

pub mod delete_flow;
pub mod expense_controller;
pub mod form;
pub mod notifications;
pub mod storage;

pub use delete_flow::DeleteConfirmation;
pub use expense_controller::{ControllerState, ExpenseController};
pub use form::{ExpenseForm, FormMode};
pub use notifications::{Toast, ToastKind, ToastQueue};
pub use storage::{ExpenseStorage, InMemoryExpenseStore};
