use super::dialog::AttachmentDialog;
use crate::shared::api_utils::delete_path;
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::shared::lookup::{label_for, lookup_items, name_map, LookupItem};
use crate::shared::modal_stack::ModalStackService;
use contracts::domain::a002_attribute::aggregate::Attribute;
use contracts::domain::a006_product::attachment::{AttachmentKind, AttachmentPayload, ProductAttachment};
use leptos::prelude::*;
use thaw::*;

/// Справочники для окон вложений; грузятся один раз на карточку
#[derive(Clone, Copy)]
pub struct AttachmentLookups {
    pub products: Signal<Vec<LookupItem>>,
    pub specifications: Signal<Vec<LookupItem>>,
    pub attributes: RwSignal<Vec<Attribute>>,
}

impl AttachmentLookups {
    pub fn attribute_items(&self) -> Signal<Vec<LookupItem>> {
        let attributes = self.attributes;
        Signal::derive(move || attributes.with(|a| lookup_items(a, false)))
    }

    pub fn attribute(&self, id: &str) -> Option<Attribute> {
        self.attributes
            .with_untracked(|list| list.iter().find(|a| a.to_string_id() == id).cloned())
    }

    /// Подпись связанной записи для строки таблицы
    pub fn target_label(&self, payload: &AttachmentPayload) -> Option<String> {
        let (items, id) = match payload {
            AttachmentPayload::Related(r) => (self.products.get(), r.related_product_id.as_str()),
            AttachmentPayload::Specification(s) => {
                (self.specifications.get(), s.specification_id.as_str())
            }
            AttachmentPayload::Attribute(a) => (
                self.attributes.with(|list| lookup_items(list, false)),
                a.attribute_id.as_str(),
            ),
            _ => return None,
        };
        Some(label_for(&name_map(&items), Some(id)))
    }
}

/// Один вид может иметь не больше одной записи (SEO)
fn is_single(kind: AttachmentKind) -> bool {
    kind == AttachmentKind::Seo
}

/// Вкладка одного вида вложений: таблица и кнопки
#[component]
pub fn AttachmentPanel(
    product_id: String,
    #[prop(into)] product_name: Signal<String>,
    kind: AttachmentKind,
    #[prop(into)] items: Signal<Vec<ProductAttachment>>,
    lookups: AttachmentLookups,
    on_changed: Callback<()>,
) -> impl IntoView {
    let modals = use_context::<ModalStackService>().expect("ModalStackService not found");
    let error = RwSignal::new(None::<String>);

    let open_dialog = {
        let product_id = product_id.clone();
        move |existing: Option<ProductAttachment>| {
            let product_id = product_id.clone();
            let product_name = product_name.get_untracked();
            modals.push_with_frame(
                Some("width: 640px; max-width: 95vw;".to_string()),
                None,
                move |handle| {
                    view! {
                        <AttachmentDialog
                            product_id=product_id.clone()
                            product_name=product_name.clone()
                            kind=kind
                            existing=existing.clone()
                            lookups=lookups
                            handle=handle
                            on_saved=on_changed
                        />
                    }
                    .into_any()
                },
            );
        }
    };

    let remove = move |attachment_id: String| {
        if !confirm("Delete this record?") {
            return;
        }
        leptos::task::spawn_local(async move {
            match delete_path(&format!("/api/product/attachments/{}", attachment_id)).await {
                Ok(()) => on_changed.run(()),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let add_disabled = Signal::derive(move || is_single(kind) && items.with(|i| !i.is_empty()));
    let open_new = open_dialog.clone();

    view! {
        <div class="details-section">
            <div class="page__header">
                <div class="page__header-left">
                    <h4 class="details-section__title">
                        {move || format!("{} ({})", kind.title(), items.with(|i| i.len()))}
                    </h4>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        disabled=add_disabled
                        on_click=move |_| open_new(None)
                    >
                        {icon("plus")}
                        " Add"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <crate::shared::page_frame::ErrorBox message=e /> })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Record"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 80px;">"Order"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 120px;">""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || items.get()
                        key=|a| (a.id.clone(), a.updated_at)
                        children=move |a| {
                            let open_edit = open_dialog.clone();
                            let for_edit = a.clone();
                            let id_for_delete = a.id.clone();
                            let payload = a.payload.clone();
                            let thumb = match &a.payload {
                                AttachmentPayload::Image(i) => Some(i.url.clone()),
                                _ => None,
                            };
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {thumb.map(|url| view! { <img class="attachment-thumb" src=url alt="" /> })}
                                            {move || match lookups.target_label(&payload) {
                                                Some(target) => format!("{}: {}", target, payload.summary()),
                                                None => payload.summary(),
                                            }}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{a.sort_order}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| open_edit(Some(for_edit.clone()))
                                        >
                                            {icon("edit")}
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| remove(id_for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_seo_is_single() {
        let single: Vec<_> = AttachmentKind::all().into_iter().filter(|k| is_single(*k)).collect();
        assert_eq!(single, vec![AttachmentKind::Seo]);
    }
}
