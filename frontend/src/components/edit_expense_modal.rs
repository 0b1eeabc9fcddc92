use crate::components::forms::expense_form::ExpenseFormView;
use crate::hooks::use_expenses::SubmitRequest;
use shared::Expense;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditExpenseModalProps {
    pub expense: Expense,
    /// Receives the record id alongside the edited values
    pub on_save: Callback<(String, SubmitRequest)>,
    pub on_close: Callback<()>,
}

#[function_component(EditExpenseModal)]
pub fn edit_expense_modal(props: &EditExpenseModalProps) -> Html {
    let on_submit = {
        let on_save = props.on_save.clone();
        let id = props.expense.id.clone();
        Callback::from(move |request: SubmitRequest| on_save.emit((id.clone(), request)))
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal-content edit-modal">
                <div class="modal-header">
                    <h3>{"Edit Expense"}</h3>
                    <button type="button" class="close-button" onclick={on_close}>{"×"}</button>
                </div>
                // Keyed so switching records rebuilds the form state
                <ExpenseFormView
                    key={props.expense.id.clone()}
                    expense={Some(props.expense.clone())}
                    {on_submit}
                    on_cancel={Some(props.on_close.clone())}
                />
            </div>
        </div>
    }
}
