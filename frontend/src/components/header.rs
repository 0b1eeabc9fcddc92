use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Shown when expenses are kept in memory only
    #[prop_or_default]
    pub offline_notice: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <div class="header-icon">{"🧾"}</div>
                <div class="header-titles">
                    <h1>{"Daily Expense Split Log"}</h1>
                    <p class="header-subtitle">{"Track shared expenses across your group"}</p>
                </div>
                {if let Some(notice) = &props.offline_notice {
                    html! { <span class="header-notice">{notice}</span> }
                } else { html! {} }}
            </div>
        </header>
    }
}
