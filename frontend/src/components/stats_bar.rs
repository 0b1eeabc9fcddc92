use shared::{format_currency, ExpenseStats};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
    /// Computed over the full set, not the filtered list
    pub stats: ExpenseStats,
}

#[function_component(StatsBar)]
pub fn stats_bar(props: &StatsBarProps) -> Html {
    let stats = &props.stats;

    html! {
        <section class="stats-bar">
            <div class="stat-card stat-total">
                <span class="stat-icon">{"💵"}</span>
                <div class="stat-body">
                    <span class="stat-label">{"Total Spent"}</span>
                    <span class="stat-value">{format_currency(stats.total)}</span>
                </div>
            </div>
            <div class="stat-card stat-count">
                <span class="stat-icon">{"📈"}</span>
                <div class="stat-body">
                    <span class="stat-label">{"Total Entries"}</span>
                    <span class="stat-value">{stats.count}</span>
                </div>
            </div>
            <div class="stat-card stat-payers">
                <span class="stat-icon">{"👥"}</span>
                <div class="stat-body">
                    <span class="stat-label">{"Contributors"}</span>
                    <span class="stat-value">{stats.payers.len()}</span>
                    {if !stats.payers.is_empty() {
                        html! { <span class="stat-detail">{stats.payers.join(", ")}</span> }
                    } else { html! {} }}
                </div>
            </div>
        </section>
    }
}
