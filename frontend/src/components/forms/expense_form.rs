use crate::components::date_picker::DatePicker;
use crate::hooks::use_expenses::SubmitRequest;
use chrono::NaiveDate;
use expense_domain::{ExpenseForm, FormMode};
use shared::{Expense, ExpenseField};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    /// Record to edit; a blank create form when absent
    #[prop_or_default]
    pub expense: Option<Expense>,
    pub on_submit: Callback<SubmitRequest>,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

fn field_error(form: &ExpenseForm, field: ExpenseField) -> Html {
    match form.error_message(field) {
        Some(message) => html! { <p class="field-error">{message}</p> },
        None => html! {},
    }
}

#[function_component(ExpenseFormView)]
pub fn expense_form(props: &ExpenseFormProps) -> Html {
    let form = {
        let expense = props.expense.clone();
        use_mut_ref(move || match &expense {
            Some(expense) => ExpenseForm::for_expense(expense),
            None => ExpenseForm::new(),
        })
    };
    let force_update = use_force_update();

    let on_text = |apply: fn(&mut ExpenseForm, String)| {
        let form = form.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            apply(&mut form.borrow_mut(), input.value());
            force_update.force_update();
        })
    };
    let on_paid_by = on_text(|f, value| f.set_paid_by(value));
    let on_amount = on_text(|f, value| f.set_amount(value));
    let on_description = on_text(|f, value| f.set_description(value));

    let on_date = {
        let form = form.clone();
        let force_update = force_update.clone();
        Callback::from(move |date: Option<NaiveDate>| {
            form.borrow_mut().select_date(date);
            force_update.force_update();
        })
    };

    let onsubmit = {
        let form = form.clone();
        let force_update = force_update.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let record = form.borrow_mut().begin_submit();
            force_update.force_update();

            if let Some(record) = record {
                let form = form.clone();
                let force_update = force_update.clone();
                let done = Callback::from(move |ok: bool| {
                    form.borrow_mut().finish_submit(ok);
                    force_update.force_update();
                });
                on_submit.emit((record, done));
            }
        })
    };

    let current = form.borrow().clone();
    let draft = current.draft();
    let busy = current.is_submitting();
    let has_error = |field| current.errors().get(field).is_some();

    html! {
        <form class={classes!("expense-form", (current.mode() == FormMode::Edit).then_some("edit-mode"))} {onsubmit}>
            {if current.mode() == FormMode::Create {
                html! {
                    <div class="form-heading">
                        <h2>{"Add Expense"}</h2>
                        <p class="form-subtitle">{"Log a new shared expense"}</p>
                    </div>
                }
            } else { html! {} }}

            <div class="form-group">
                <label for="paid-by">{"Paid By"}</label>
                <input
                    type="text"
                    id="paid-by"
                    class={classes!(has_error(ExpenseField::PaidBy).then_some("input-error"))}
                    placeholder="e.g. Alice"
                    value={draft.paid_by.clone()}
                    oninput={on_paid_by}
                    disabled={busy}
                />
                {field_error(&current, ExpenseField::PaidBy)}
            </div>

            <div class="form-group">
                <label for="amount">{"Amount ($)"}</label>
                <input
                    type="number"
                    id="amount"
                    class={classes!(has_error(ExpenseField::Amount).then_some("input-error"))}
                    placeholder="0.00"
                    step="0.01"
                    min="0.01"
                    value={draft.amount.clone()}
                    oninput={on_amount}
                    disabled={busy}
                />
                {field_error(&current, ExpenseField::Amount)}
            </div>

            <div class="form-group">
                <label for="description">{"Description"}</label>
                <input
                    type="text"
                    id="description"
                    class={classes!(has_error(ExpenseField::Description).then_some("input-error"))}
                    placeholder="e.g. Groceries from Whole Foods"
                    value={draft.description.clone()}
                    oninput={on_description}
                    disabled={busy}
                />
                {field_error(&current, ExpenseField::Description)}
            </div>

            <div class="form-group">
                <label>{"Date"}</label>
                <DatePicker
                    selected={current.selected_date()}
                    on_select={on_date}
                    disabled={busy}
                    invalid={has_error(ExpenseField::ExpenseDate)}
                />
                {field_error(&current, ExpenseField::ExpenseDate)}
            </div>

            <div class="form-actions">
                {if let Some(on_cancel) = props.on_cancel.clone() {
                    html! {
                        <button
                            type="button"
                            class="btn btn-secondary"
                            disabled={busy}
                            onclick={Callback::from(move |_: MouseEvent| on_cancel.emit(()))}
                        >
                            {"Cancel"}
                        </button>
                    }
                } else { html! {} }}
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {current.submit_label()}
                </button>
            </div>
        </form>
    }
}
