use super::delete_dialog::DeleteDialog;
use expense_domain::DeleteConfirmation;
use shared::{
    avatar_color, avatar_initial, empty_state_hint, entry_count_label, format_currency,
    format_display_date, Expense, ExpenseFilter,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    /// Already filtered, in display order
    pub expenses: Vec<Expense>,
    pub loading: bool,
    /// Distinct payers of the full set, for the filter select
    pub payers: Vec<String>,
    pub filter: ExpenseFilter,
    pub on_payer_filter: Callback<String>,
    pub on_search: Callback<String>,
    pub on_edit: Callback<Expense>,
    pub on_delete: Callback<(String, Callback<bool>)>,
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    let confirmation = use_mut_ref(DeleteConfirmation::new);
    let force_update = use_force_update();

    let on_payer_change = {
        let on_payer_filter = props.on_payer_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_payer_filter.emit(select.value());
        })
    };

    let on_search_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let request_delete = {
        let confirmation = confirmation.clone();
        let force_update = force_update.clone();
        Callback::from(move |id: String| {
            confirmation.borrow_mut().request(id);
            force_update.force_update();
        })
    };

    let cancel_delete = {
        let confirmation = confirmation.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: ()| {
            if confirmation.borrow_mut().cancel() {
                force_update.force_update();
            }
        })
    };

    let confirm_delete = {
        let confirmation = confirmation.clone();
        let force_update = force_update.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: ()| {
            let Some(id) = confirmation.borrow_mut().begin_confirm() else {
                return;
            };
            force_update.force_update();

            let confirmation = confirmation.clone();
            let force_update = force_update.clone();
            let done = Callback::from(move |_ok: bool| {
                confirmation.borrow_mut().finish();
                force_update.force_update();
            });
            on_delete.emit((id, done));
        })
    };

    let dialog = confirmation.borrow().clone();

    html! {
        <section class="expense-list">
            <div class="list-header">
                <h2>{"Expense Log"}</h2>
                <span class="count-badge">{entry_count_label(props.expenses.len())}</span>
            </div>

            <div class="list-filters">
                <select class="payer-filter" onchange={on_payer_change}>
                    <option value="" selected={props.filter.paid_by.is_empty()}>{"All contributors"}</option>
                    {for props.payers.iter().map(|payer| html! {
                        <option value={payer.clone()} selected={props.filter.paid_by == *payer}>{payer}</option>
                    })}
                </select>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search description..."
                    value={props.filter.search.clone()}
                    oninput={on_search_input}
                />
            </div>

            {if props.loading {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else if props.expenses.is_empty() {
                html! {
                    <div class="empty-state">
                        <p class="empty-title">{"No expenses found"}</p>
                        <p class="empty-hint">{empty_state_hint(&props.filter)}</p>
                    </div>
                }
            } else {
                html! {
                    <ul class="expense-rows">
                        {for props.expenses.iter().map(|expense| {
                            let on_edit = {
                                let on_edit = props.on_edit.clone();
                                let expense = expense.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(expense.clone()))
                            };
                            let on_delete = {
                                let request_delete = request_delete.clone();
                                let id = expense.id.clone();
                                Callback::from(move |_: MouseEvent| request_delete.emit(id.clone()))
                            };

                            html! {
                                <li class="expense-row" key={expense.id.clone()}>
                                    <span class={classes!("avatar", avatar_color(&expense.paid_by))}>
                                        {avatar_initial(&expense.paid_by)}
                                    </span>
                                    <div class="expense-main">
                                        <span class="expense-payer">{&expense.paid_by}</span>
                                        <span class="expense-description">{&expense.description}</span>
                                    </div>
                                    <div class="expense-meta">
                                        <span class="expense-amount">{format_currency(expense.amount)}</span>
                                        <span class="expense-date">{format_display_date(expense.expense_date)}</span>
                                    </div>
                                    <div class="row-actions">
                                        <button type="button" class="icon-button edit" title="Edit" onclick={on_edit}>{"✏️"}</button>
                                        <button type="button" class="icon-button delete" title="Delete" onclick={on_delete}>{"🗑️"}</button>
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}

            {if dialog.is_open() {
                html! {
                    <DeleteDialog
                        deleting={dialog.is_deleting()}
                        confirm_label={dialog.confirm_label()}
                        on_confirm={confirm_delete}
                        on_cancel={cancel_delete}
                    />
                }
            } else { html! {} }}
        </section>
    }
}
