use super::draft::AttachmentDraft;
use super::panel::AttachmentLookups;
use crate::shared::api_utils::post_json;
use crate::shared::form_utils::parse_i32;
use crate::shared::lookup::LookupItem;
use crate::shared::modal_frame::DialogLayout;
use crate::shared::modal_stack::ModalHandle;
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDataType};
use contracts::domain::a006_product::attachment::{
    slugify, AttachmentKind, ProductAttachment, ProductAttachmentDto, RelationKind,
    META_DESCRIPTION_MAX, META_TITLE_MAX,
};
use leptos::prelude::*;

type Getter = fn(&AttachmentDraft) -> String;
type Setter = fn(&mut AttachmentDraft, String);

#[component]
fn TextField(
    draft: RwSignal<AttachmentDraft>,
    label: &'static str,
    get: Getter,
    set: Setter,
    #[prop(optional)] rows: Option<u32>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let input = match rows {
        Some(rows) => view! {
            <textarea
                class="form__input form__textarea"
                rows=rows
                placeholder=placeholder
                prop:value=move || draft.with(get)
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            ></textarea>
        }
        .into_any(),
        None => view! {
            <input
                class="form__input"
                type="text"
                placeholder=placeholder
                prop:value=move || draft.with(get)
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            />
        }
        .into_any(),
    };
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            {input}
        </div>
    }
}

#[component]
fn FlagField(
    draft: RwSignal<AttachmentDraft>,
    label: &'static str,
    get: fn(&AttachmentDraft) -> bool,
    set: fn(&mut AttachmentDraft, bool),
) -> impl IntoView {
    view! {
        <label class="checkbox-row">
            <input
                type="checkbox"
                prop:checked=move || draft.with(get)
                on:change=move |ev| draft.update(|d| set(d, event_target_checked(&ev)))
            />
            <span>{label}</span>
        </label>
    }
}

/// Выбор связанной записи (товар, спецификация, характеристика)
#[component]
fn TargetSelect(
    draft: RwSignal<AttachmentDraft>,
    label: &'static str,
    #[prop(into)] options: Signal<Vec<LookupItem>>,
    #[prop(optional)] locked: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <select
                class="form__input form__select"
                disabled=locked
                prop:value=move || draft.with(|d| d.target_id.clone())
                on:change=move |ev| draft.update(|d| d.target_id = event_target_value(&ev))
            >
                <option value="">"(select)"</option>
                {move || {
                    let current = draft.with_untracked(|d| d.target_id.clone());
                    options
                        .get()
                        .into_iter()
                        .map(|o| {
                            let selected = o.id == current;
                            view! { <option value=o.id selected=selected>{o.label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

/// Поле значения характеристики: для Choice и Boolean - список
fn attribute_value_field(draft: RwSignal<AttachmentDraft>, attribute: Option<Attribute>) -> AnyView {
    let choices: Option<Vec<String>> = attribute.as_ref().and_then(|a| match a.data_type {
        AttributeDataType::Choice => Some(a.options.clone()),
        AttributeDataType::Boolean => Some(vec!["true".into(), "false".into()]),
        _ => None,
    });
    let label = match attribute.as_ref().and_then(|a| a.unit.clone()) {
        Some(unit) => format!("Value, {}", unit),
        None => "Value".to_string(),
    };

    match choices {
        Some(choices) => view! {
            <div class="form__group">
                <label class="form__label">{label}</label>
                <select
                    class="form__input form__select"
                    prop:value=move || draft.with(|d| d.value.clone())
                    on:change=move |ev| draft.update(|d| d.value = event_target_value(&ev))
                >
                    <option value="">"(select)"</option>
                    {choices
                        .into_iter()
                        .map(|c| {
                            let selected = draft.with_untracked(|d| d.value.eq_ignore_ascii_case(&c));
                            view! { <option value=c.clone() selected=selected>{c.clone()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="form__group">
                <label class="form__label">{label}</label>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || draft.with(|d| d.value.clone())
                    on:input=move |ev| draft.update(|d| d.value = event_target_value(&ev))
                />
            </div>
        }
        .into_any(),
    }
}

/// Счётчик символов «12 / 70»
fn counter(draft: RwSignal<AttachmentDraft>, get: Getter, max: usize) -> impl IntoView {
    move || {
        let n = draft.with(|d| get(d).chars().count());
        let class = if n > max { "form__hint form__hint--error" } else { "form__hint" };
        view! { <span class=class>{format!("{} / {}", n, max)}</span> }
    }
}

fn kind_fields(
    draft: RwSignal<AttachmentDraft>,
    lookups: AttachmentLookups,
    product_name: String,
    locked_target: bool,
) -> AnyView {
    match draft.with_untracked(|d| d.kind) {
        AttachmentKind::Image => view! {
            <TextField draft=draft label="Image URL *" get=|d| d.url.clone() set=|d, v| d.url = v placeholder="https://..." />
            <TextField draft=draft label="Alt text" get=|d| d.alt_text.clone() set=|d, v| d.alt_text = v />
            <FlagField draft=draft label="Primary image" get=|d| d.is_primary set=|d, v| d.is_primary = v />
            {move || {
                let url = draft.with(|d| d.url.trim().to_string());
                (!url.is_empty()).then(|| view! { <img class="attachment-preview" src=url alt="" /> })
            }}
        }
        .into_any(),
        AttachmentKind::Description => view! {
            <TextField draft=draft label="Locale *" get=|d| d.locale.clone() set=|d, v| d.locale = v placeholder="en" />
            <TextField draft=draft label="Title" get=|d| d.title.clone() set=|d, v| d.title = v />
            <TextField draft=draft label="Text *" get=|d| d.body.clone() set=|d, v| d.body = v rows=8 />
        }
        .into_any(),
        AttachmentKind::Feature | AttachmentKind::Benefit => view! {
            <TextField draft=draft label="Title *" get=|d| d.title.clone() set=|d, v| d.title = v />
            <TextField draft=draft label="Details" get=|d| d.body.clone() set=|d, v| d.body = v rows=4 />
        }
        .into_any(),
        AttachmentKind::Question => view! {
            <TextField draft=draft label="Question *" get=|d| d.question.clone() set=|d, v| d.question = v rows=2 />
            <TextField draft=draft label="Answer" get=|d| d.answer.clone() set=|d, v| d.answer = v rows=4 />
            <FlagField draft=draft label="Published" get=|d| d.is_published set=|d, v| d.is_published = v />
        }
        .into_any(),
        AttachmentKind::Seo => view! {
            <TextField draft=draft label="Meta title" get=|d| d.meta_title.clone() set=|d, v| d.meta_title = v />
            {counter(draft, |d| d.meta_title.clone(), META_TITLE_MAX)}
            <TextField draft=draft label="Meta description" get=|d| d.meta_description.clone() set=|d, v| d.meta_description = v rows=3 />
            {counter(draft, |d| d.meta_description.clone(), META_DESCRIPTION_MAX)}
            <div class="form__row">
                <TextField draft=draft label="Slug" get=|d| d.slug.clone() set=|d, v| d.slug = v />
                <button
                    class="button button--subtle"
                    on:click=move |_| {
                        let name = product_name.clone();
                        draft.update(|d| d.slug = slugify(&name))
                    }
                >
                    "From name"
                </button>
            </div>
            <TextField draft=draft label="Keywords" get=|d| d.keywords.clone() set=|d, v| d.keywords = v placeholder="Comma separated" />
        }
        .into_any(),
        AttachmentKind::Related => view! {
            <TargetSelect draft=draft label="Related product *" options=lookups.products locked=locked_target />
            <div class="form__group">
                <label class="form__label">"Relation"</label>
                <select
                    class="form__input form__select"
                    prop:value=move || draft.with(|d| d.relation.as_str().to_string())
                    on:change=move |ev| {
                        if let Some(r) = RelationKind::parse(&event_target_value(&ev)) {
                            draft.update(|d| d.relation = r);
                        }
                    }
                >
                    {RelationKind::all()
                        .into_iter()
                        .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                        .collect_view()}
                </select>
            </div>
        }
        .into_any(),
        AttachmentKind::Specification => view! {
            <TargetSelect draft=draft label="Specification *" options=lookups.specifications locked=locked_target />
            <TextField draft=draft label="Value *" get=|d| d.value.clone() set=|d, v| d.value = v />
        }
        .into_any(),
        AttachmentKind::Attribute => {
            let attribute_items = lookups.attribute_items();
            // поле значения пересоздаётся только при смене характеристики
            let target = Memo::new(move |_| draft.with(|d| d.target_id.clone()));
            view! {
                <TargetSelect draft=draft label="Attribute *" options=attribute_items locked=locked_target />
                {move || attribute_value_field(draft, lookups.attribute(&target.get()))}
            }
            .into_any()
        }
    }
}

/// Окно добавления/правки вложения
///
/// Сохранение идёт через `POST /api/product/:id/attachments`; запись
/// с тем же ключом (локаль, связанный товар, ...) сервер заменяет.
#[component]
pub fn AttachmentDialog(
    product_id: String,
    product_name: String,
    kind: AttachmentKind,
    existing: Option<ProductAttachment>,
    lookups: AttachmentLookups,
    handle: ModalHandle,
    on_saved: Callback<()>,
) -> impl IntoView {
    let attachment_id = existing.as_ref().map(|a| a.id.clone());
    let draft = RwSignal::new(match &existing {
        Some(a) => AttachmentDraft::from_payload(&a.payload, a.sort_order),
        None => AttachmentDraft::new(kind),
    });
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let title = format!(
        "{}: {}",
        kind.title(),
        if existing.is_some() { "edit" } else { "new" }
    );

    let close = handle.clone();
    let on_cancel = Callback::new(move |_| close.close());
    let on_save = Callback::new(move |_| {
        let d = draft.get_untracked();
        let payload = d.to_payload();
        let checked = parse_i32("Sort order", &d.sort_order).and_then(|sort_order| {
            payload.validate(&product_id)?;
            if let (AttachmentKind::Attribute, Some(attr)) =
                (d.kind, lookups.attribute(&d.target_id))
            {
                attr.check_value(&d.value)?;
            }
            Ok(sort_order)
        });
        let sort_order = match checked {
            Ok(v) => v,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let dto = ProductAttachmentDto {
            id: attachment_id.clone(),
            sort_order,
            payload,
        };
        let path = format!("/api/product/{}/attachments", product_id);
        let handle = handle.clone();
        saving.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            match post_json::<_, serde_json::Value>(&path, &dto).await {
                Ok(_) => {
                    on_saved.run(());
                    handle.close();
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    });

    let locked_target = existing.is_some();

    view! {
        <DialogLayout title=title error=error saving=saving on_save=on_save on_cancel=on_cancel>
            <div class="details-grid--1col">
                {kind_fields(draft, lookups, product_name, locked_target)}
                <TextField draft=draft label="Sort order" get=|d| d.sort_order.clone() set=|d, v| d.sort_order = v />
            </div>
        </DialogLayout>
    }
}
