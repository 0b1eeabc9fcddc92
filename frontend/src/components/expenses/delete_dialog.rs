use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DeleteDialogProps {
    pub deleting: bool,
    pub confirm_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteDialog)]
pub fn delete_dialog(props: &DeleteDialogProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal-content delete-dialog" role="alertdialog">
                <h3>{"Delete Expense"}</h3>
                <p>{"Are you sure you want to delete this expense? This action cannot be undone."}</p>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.deleting}>
                        {"Cancel"}
                    </button>
                    <button type="button" class="btn btn-danger" onclick={on_confirm} disabled={props.deleting}>
                        {props.confirm_label.clone()}
                    </button>
                </div>
            </div>
        </div>
    }
}
