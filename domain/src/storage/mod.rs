//! # Storage Module
//!
//! The expense table lives in an external hosted store. The domain only talks
//! to it through [`ExpenseStorage`], so the browser REST client and the
//! in-memory store used by tests and demo mode are interchangeable.

pub mod memory;
pub mod traits;

pub use memory::InMemoryExpenseStore;
pub use traits::ExpenseStorage;
