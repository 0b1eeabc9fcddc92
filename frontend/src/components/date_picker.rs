use crate::services::date_utils::{generate_calendar_days, month_title, shift_month, today};
use chrono::{Datelike, NaiveDate};
use gloo::events::EventListener;
use shared::format_long_date;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    pub selected: Option<NaiveDate>,
    /// `None` when the selected day is clicked again
    pub on_select: Callback<Option<NaiveDate>>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub invalid: bool,
}

#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let show_calendar = use_state(|| false);
    let picker_ref = use_node_ref();

    // Month on display, opened at the selection or at today
    let visible_month = {
        let selected = props.selected;
        use_state(move || {
            let anchor = selected.unwrap_or_else(today);
            (anchor.year(), anchor.month())
        })
    };

    let toggle_calendar = {
        let show_calendar = show_calendar.clone();
        let visible_month = visible_month.clone();
        let selected = props.selected;
        Callback::from(move |_: MouseEvent| {
            if !*show_calendar {
                let anchor = selected.unwrap_or_else(today);
                visible_month.set((anchor.year(), anchor.month()));
            }
            show_calendar.set(!*show_calendar);
        })
    };

    // Close on clicks outside the picker; the listener lives while open
    {
        let show_calendar = show_calendar.clone();
        let picker_ref = picker_ref.clone();
        use_effect_with(*show_calendar, move |&is_open| {
            let listener = match (is_open, web_sys::window()) {
                (true, Some(window)) => Some(EventListener::new(&window, "click", move |e| {
                    let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                        return;
                    };
                    if let Some(picker) = picker_ref.cast::<Element>() {
                        if !picker.contains(Some(&target)) {
                            show_calendar.set(false);
                        }
                    }
                })),
                _ => None,
            };
            move || drop(listener)
        });
    }

    let step_month = |delta: i32| {
        let visible_month = visible_month.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = *visible_month;
            visible_month.set(shift_month(year, month, delta));
        })
    };

    let on_day_click = {
        let on_select = props.on_select.clone();
        let show_calendar = show_calendar.clone();
        let selected = props.selected;
        Callback::from(move |date: NaiveDate| {
            if selected == Some(date) {
                on_select.emit(None);
            } else {
                on_select.emit(Some(date));
                show_calendar.set(false);
            }
        })
    };

    let on_today_click = {
        let on_select = props.on_select.clone();
        let show_calendar = show_calendar.clone();
        Callback::from(move |_: MouseEvent| {
            on_select.emit(Some(today()));
            show_calendar.set(false);
        })
    };

    let (year, month) = *visible_month;
    let calendar_days = generate_calendar_days(year, month);
    let current_day = today();

    html! {
        <div class="date-picker" ref={picker_ref}>
            <button
                type="button"
                class={classes!(
                    "date-display-button",
                    props.selected.is_none().then_some("placeholder"),
                    props.invalid.then_some("input-error")
                )}
                onclick={toggle_calendar}
                disabled={props.disabled}
            >
                <span class="calendar-icon">{"📅"}</span>
                <span class="date-text">
                    {props.selected.map(format_long_date).unwrap_or_else(|| "Pick a date".to_string())}
                </span>
            </button>

            {if *show_calendar && !props.disabled {
                html! {
                    <div class="calendar-dropdown">
                        <div class="calendar-header">
                            <button type="button" class="nav-button" onclick={step_month(-1)}>{"‹"}</button>
                            <span class="month-year">{month_title(year, month)}</span>
                            <button type="button" class="nav-button" onclick={step_month(1)}>{"›"}</button>
                        </div>

                        <div class="calendar-grid">
                            <div class="weekday-header">
                                {for ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].iter().map(|name| html! { <span>{name}</span> })}
                            </div>

                            <div class="calendar-days">
                                {for calendar_days.iter().map(|day| {
                                    let date = day.date;
                                    let on_day_click = on_day_click.clone();
                                    html! {
                                        <button
                                            type="button"
                                            class={classes!(
                                                "calendar-day",
                                                if day.is_current_month { "current-month" } else { "other-month" },
                                                (props.selected == Some(date)).then_some("selected"),
                                                (date == current_day).then_some("today")
                                            )}
                                            onclick={Callback::from(move |_: MouseEvent| on_day_click.emit(date))}
                                        >
                                            {day.day()}
                                        </button>
                                    }
                                })}
                            </div>
                        </div>

                        <div class="calendar-footer">
                            <button type="button" class="today-button" onclick={on_today_click}>
                                {"Today"}
                            </button>
                        </div>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
