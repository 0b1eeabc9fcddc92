use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::edit_expense_modal::EditExpenseModal;
use components::expenses::ExpenseList;
use components::forms::expense_form::ExpenseFormView;
use components::header::Header;
use components::stats_bar::StatsBar;
use components::toast_stack::ToastStack;
use hooks::use_expenses::use_expenses;
use services::config::AppConfig;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());
    let expenses = use_expenses(&config.store);
    let state = &expenses.state;
    let actions = &expenses.actions;

    let offline_notice = config
        .store
        .is_err()
        .then(|| "Demo mode: expenses are not saved".to_string());

    html! {
        <div class="app">
            <Header {offline_notice} />

            <main class="container">
                <StatsBar stats={state.stats()} />

                <div class="content-grid">
                    <aside class="form-column">
                        <ExpenseFormView on_submit={actions.create.clone()} />
                    </aside>

                    <div class="list-column">
                        <ExpenseList
                            expenses={state.visible_expenses()}
                            loading={state.loading}
                            payers={shared::unique_payers(&state.expenses)}
                            filter={state.filter.clone()}
                            on_payer_filter={actions.set_payer_filter.clone()}
                            on_search={actions.set_search.clone()}
                            on_edit={actions.begin_edit.clone()}
                            on_delete={actions.delete.clone()}
                        />
                    </div>
                </div>
            </main>

            {if let Some(expense) = state.editing.clone() {
                html! {
                    <EditExpenseModal
                        {expense}
                        on_save={actions.update.clone()}
                        on_close={actions.cancel_edit.clone()}
                    />
                }
            } else { html! {} }}

            <ToastStack
                toasts={state.toasts.items().to_vec()}
                duration_ms={config.app.toast_duration_ms}
                on_dismiss={actions.dismiss_toast.clone()}
            />
        </div>
    }
}

fn main() {
    Logger::init(AppConfig::from_build_env().app.enable_debug_logging);
    yew::Renderer::<App>::new().render();
}
