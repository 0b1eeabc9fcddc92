use crate::services::api::SupabaseStore;
use crate::services::config::{StoreConfig, StoreConfigError};
use crate::services::logging::Logger;
use expense_domain::{ControllerState, ExpenseController, ExpenseStorage, InMemoryExpenseStore};
use shared::{Expense, NewExpense};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const COMPONENT: &str = "use_expenses";

pub type AppController = ExpenseController<dyn ExpenseStorage>;

/// Record to save plus a callback told whether the save succeeded
pub type SubmitRequest = (NewExpense, Callback<bool>);

pub struct UseExpensesResult {
    pub state: ControllerState,
    pub actions: UseExpensesActions,
}

#[derive(Clone, PartialEq)]
pub struct UseExpensesActions {
    pub create: Callback<SubmitRequest>,
    /// Saves the record currently open for editing
    pub update: Callback<(String, SubmitRequest)>,
    pub delete: Callback<(String, Callback<bool>)>,
    pub set_payer_filter: Callback<String>,
    pub set_search: Callback<String>,
    pub begin_edit: Callback<Expense>,
    pub cancel_edit: Callback<()>,
    pub dismiss_toast: Callback<u64>,
}

/// Remote store when configured, otherwise an in-memory demo store
fn build_controller(store: &Result<StoreConfig, StoreConfigError>) -> AppController {
    let storage: Rc<dyn ExpenseStorage> = match store {
        Ok(config) => {
            Logger::info_with_component(COMPONENT, &format!("Using expense store at {}", config.base_url));
            Rc::new(SupabaseStore::new(config.clone()))
        }
        Err(e) => {
            Logger::warn_with_component(
                COMPONENT,
                &format!("Remote store unavailable ({}), keeping expenses in memory", e),
            );
            Rc::new(InMemoryExpenseStore::new())
        }
    };
    ExpenseController::new(storage)
}

#[hook]
pub fn use_expenses(store: &Result<StoreConfig, StoreConfigError>) -> UseExpensesResult {
    let force_update = use_force_update();
    let controller = {
        let store = store.clone();
        use_memo((), move |_| build_controller(&store))
    };

    // Re-render on every controller change, then load once on mount
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            controller.set_listener(move || force_update.force_update());

            let loader = (*controller).clone();
            spawn_local(async move {
                loader.refresh().await;
            });

            move || controller.set_listener(|| {})
        });
    }

    let create = {
        let controller = controller.clone();
        use_callback((), move |(expense, done): SubmitRequest, _| {
            let controller = (*controller).clone();
            spawn_local(async move {
                let ok = controller.create(expense).await;
                done.emit(ok);
            });
        })
    };

    let update = {
        let controller = controller.clone();
        use_callback((), move |(id, (expense, done)): (String, SubmitRequest), _| {
            let controller = (*controller).clone();
            spawn_local(async move {
                let ok = controller.update(&id, expense).await;
                done.emit(ok);
            });
        })
    };

    let delete = {
        let controller = controller.clone();
        use_callback((), move |(id, done): (String, Callback<bool>), _| {
            let controller = (*controller).clone();
            spawn_local(async move {
                let ok = controller.delete(&id).await;
                done.emit(ok);
            });
        })
    };

    let set_payer_filter = {
        let controller = controller.clone();
        use_callback((), move |paid_by: String, _| controller.set_payer_filter(paid_by))
    };

    let set_search = {
        let controller = controller.clone();
        use_callback((), move |search: String, _| controller.set_search(search))
    };

    let begin_edit = {
        let controller = controller.clone();
        use_callback((), move |expense: Expense, _| controller.begin_edit(expense))
    };

    let cancel_edit = {
        let controller = controller.clone();
        use_callback((), move |_: (), _| controller.cancel_edit())
    };

    let dismiss_toast = {
        let controller = controller.clone();
        use_callback((), move |id: u64, _| controller.dismiss_toast(id))
    };

    UseExpensesResult {
        state: controller.snapshot(),
        actions: UseExpensesActions {
            create,
            update,
            delete,
            set_payer_filter,
            set_search,
            begin_edit,
            cancel_edit,
            dismiss_toast,
        },
    }
}
