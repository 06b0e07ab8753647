//! Поля форм, общие для ценовых карточек

use chrono::NaiveDate;
use contracts::shared::pricing::AdjustmentKind;
use leptos::prelude::*;

const ADJUSTMENT_KINDS: [AdjustmentKind; 2] = [AdjustmentKind::Percent, AdjustmentKind::Fixed];

/// Нативный выбор даты; значение `YYYY-MM-DD` или пусто
#[component]
pub fn DateInput(value: RwSignal<String>) -> impl IntoView {
    view! {
        <input
            type="date"
            class="form__input"
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

/// Вид корректировки (процент/сумма) и значение рядом
#[component]
pub fn AdjustmentInput(kind: RwSignal<String>, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form__inline">
            <select
                class="form__input form__select"
                prop:value=move || kind.get()
                on:change=move |ev| kind.set(event_target_value(&ev))
            >
                {ADJUSTMENT_KINDS
                    .into_iter()
                    .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                    .collect_view()}
            </select>
            <input
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <span class="form__suffix">
                {move || if kind.get() == AdjustmentKind::Fixed.as_str() { "" } else { "%" }}
            </span>
        </div>
    }
}

/// «с 2024-06-01 по 2024-08-31», открытые концы - «...»
pub fn period_text(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    match (from, to) {
        (None, None) => "Always".to_string(),
        (Some(f), None) => format!("from {}", f),
        (None, Some(t)) => format!("until {}", t),
        (Some(f), Some(t)) => format!("{} ... {}", f, t),
    }
}

/// Короткая запись корректировки для таблиц
pub fn adjustment_text(kind: AdjustmentKind, value: f64) -> String {
    match kind {
        AdjustmentKind::Percent => format!("{}%", value),
        AdjustmentKind::Fixed => format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_text() {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day);
        assert_eq!(period_text(None, None), "Always");
        assert_eq!(period_text(d(6, 1), None), "from 2024-06-01");
        assert_eq!(period_text(None, d(8, 31)), "until 2024-08-31");
        assert_eq!(period_text(d(6, 1), d(8, 31)), "2024-06-01 ... 2024-08-31");
    }

    #[test]
    fn test_adjustment_text() {
        assert_eq!(adjustment_text(AdjustmentKind::Percent, 12.5), "12.5%");
        assert_eq!(adjustment_text(AdjustmentKind::Fixed, 5.0), "5.00");
    }
}
