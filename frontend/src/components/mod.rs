pub mod date_picker;
pub mod edit_expense_modal;
pub mod expenses;
pub mod forms;
pub mod header;
pub mod stats_bar;
pub mod toast_stack;
