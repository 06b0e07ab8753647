use crate::shared::api_utils::{fetch_by_id, get_json, upsert};
use crate::shared::form_utils::{format_number, opt_string, parse_f64, parse_opt_f64};
use contracts::domain::a006_product::aggregate::{Product, ProductDto, ProductStatus};
use contracts::domain::a006_product::attachment::{AttachmentKind, ProductAttachment};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    pub id: RwSignal<Option<String>>,
    /// SKU
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub manufacturer_id: RwSignal<String>,
    pub supplier_id: RwSignal<String>,
    pub list_price: RwSignal<String>,
    pub cost_price: RwSignal<String>,
    pub status: RwSignal<String>,
    pub barcode: RwSignal<String>,
    pub weight_kg: RwSignal<String>,

    pub attachments: RwSignal<Vec<ProductAttachment>>,
    pub active_tab: RwSignal<&'static str>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ProductDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            manufacturer_id: RwSignal::new(String::new()),
            supplier_id: RwSignal::new(String::new()),
            list_price: RwSignal::new("0".to_string()),
            cost_price: RwSignal::new("0".to_string()),
            status: RwSignal::new(ProductStatus::Draft.as_str().to_string()),
            barcode: RwSignal::new(String::new()),
            weight_kg: RwSignal::new(String::new()),
            attachments: RwSignal::new(Vec::new()),
            active_tab: RwSignal::new("general"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, code, description) = (self.saving, self.code, self.description);
        Signal::derive(move || {
            saving.get() || code.get().trim().is_empty() || description.get().trim().is_empty()
        })
    }

    /// Маржа по введённым ценам; пусто, пока цены не разбираются
    pub fn margin(&self) -> Signal<String> {
        let (list, cost) = (self.list_price, self.cost_price);
        Signal::derive(move || {
            match (parse_f64("List price", &list.get()), parse_f64("Cost price", &cost.get())) {
                (Ok(l), Ok(c)) => margin_text(l, c),
                _ => String::new(),
            }
        })
    }

    pub fn attachments_of(&self, kind: AttachmentKind) -> Signal<Vec<ProductAttachment>> {
        let attachments = self.attachments;
        Signal::derive(move || {
            attachments.with(|list| list.iter().filter(|a| a.kind() == kind).cloned().collect())
        })
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Product>(Product::collection_name(), &id).await {
                Ok(item) => this.from_aggregate(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
        });
        self.reload_attachments();
    }

    pub fn reload_attachments(&self) {
        let Some(id) = self.id.get_untracked() else {
            return;
        };
        let this = *self;
        leptos::task::spawn_local(async move {
            let path = format!("/api/{}/{}/attachments", Product::collection_name(), id);
            match get_json::<Vec<ProductAttachment>>(&path).await {
                Ok(mut items) => {
                    items.sort_by_key(|a| a.sort_order);
                    this.attachments.set(items);
                }
                Err(e) => this.error.set(Some(e)),
            }
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let dto = match self.to_dto() {
            Ok(dto) => dto,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);

        leptos::task::spawn_local(async move {
            match upsert(Product::collection_name(), &dto).await {
                Ok(new_id) => {
                    this.id.set(Some(new_id));
                    this.saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    this.saving.set(false);
                    this.error.set(Some(e));
                }
            }
        });
    }

    fn from_aggregate(&self, p: &Product) {
        self.code.set(p.base.code.clone());
        self.description.set(p.base.description.clone());
        self.comment.set(p.base.comment.clone().unwrap_or_default());
        self.category_id.set(p.category_id.clone().unwrap_or_default());
        self.manufacturer_id.set(p.manufacturer_id.clone().unwrap_or_default());
        self.supplier_id.set(p.supplier_id.clone().unwrap_or_default());
        self.list_price.set(format_number(p.list_price));
        self.cost_price.set(format_number(p.cost_price));
        self.status.set(p.status.as_str().to_string());
        self.barcode.set(p.barcode.clone().unwrap_or_default());
        self.weight_kg.set(p.weight_kg.map(format_number).unwrap_or_default());
    }

    fn to_dto(&self) -> Result<ProductDto, String> {
        let code = self.code.get_untracked().trim().to_string();
        if code.is_empty() {
            return Err("SKU is required".into());
        }
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Product name is required".into());
        }
        let status = ProductStatus::parse(&self.status.get_untracked()).unwrap_or_default();
        let category_id = opt_string(&self.category_id.get_untracked());
        if status == ProductStatus::Active && category_id.is_none() {
            return Err("An active product must belong to a category".into());
        }
        let list_price = parse_f64("List price", &self.list_price.get_untracked())?;
        let cost_price = parse_f64("Cost price", &self.cost_price.get_untracked())?;
        if list_price < 0.0 || cost_price < 0.0 {
            return Err("Prices cannot be negative".into());
        }

        Ok(ProductDto {
            id: self.id.get_untracked(),
            code,
            description,
            comment: opt_string(&self.comment.get_untracked()),
            category_id,
            manufacturer_id: opt_string(&self.manufacturer_id.get_untracked()),
            supplier_id: opt_string(&self.supplier_id.get_untracked()),
            list_price,
            cost_price,
            status,
            barcode: opt_string(&self.barcode.get_untracked()),
            weight_kg: parse_opt_f64("Weight", &self.weight_kg.get_untracked())?,
        })
    }
}

fn margin_text(list_price: f64, cost_price: f64) -> String {
    if list_price <= 0.0 {
        return String::new();
    }
    format!("{:.1}%", (list_price - cost_price) / list_price * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_text() {
        assert_eq!(margin_text(200.0, 150.0), "25.0%");
        assert_eq!(margin_text(100.0, 120.0), "-20.0%");
        assert_eq!(margin_text(0.0, 10.0), "");
    }
}
