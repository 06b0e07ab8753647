use leptos::prelude::*;

/// Цветовой вариант бейджа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    Error,
    #[default]
    Neutral,
}

impl BadgeVariant {
    pub fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge--primary",
            BadgeVariant::Success => "badge--success",
            BadgeVariant::Warning => "badge--warning",
            BadgeVariant::Error => "badge--error",
            BadgeVariant::Neutral => "badge--neutral",
        }
    }
}

#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=format!("badge {}", variant.class())>
            {children()}
        </span>
    }
}

/// Active / Inactive
#[component]
pub fn ActiveBadge(is_active: bool) -> impl IntoView {
    let variant = if is_active {
        BadgeVariant::Success
    } else {
        BadgeVariant::Neutral
    };
    view! {
        <Badge variant=variant>
            {if is_active { "Active" } else { "Inactive" }}
        </Badge>
    }
}
