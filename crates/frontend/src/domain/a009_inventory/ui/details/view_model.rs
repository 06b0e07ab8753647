use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::parse_i64;
use contracts::domain::a009_inventory::aggregate::{InventoryRecord, InventoryRecordDto};
use leptos::prelude::*;

pub const COLLECTION: &str = "inventory";

#[derive(Clone, Copy)]
pub struct InventoryDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub product_id: RwSignal<String>,
    pub warehouse_id: RwSignal<String>,
    pub quantity_on_hand: RwSignal<String>,
    pub quantity_reserved: RwSignal<String>,
    pub reorder_point: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl InventoryDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            product_id: RwSignal::new(String::new()),
            warehouse_id: RwSignal::new(String::new()),
            quantity_on_hand: RwSignal::new("0".to_string()),
            quantity_reserved: RwSignal::new("0".to_string()),
            reorder_point: RwSignal::new("0".to_string()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Товар и склад меняются только у новой записи
    pub fn is_new(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.with(|i| i.is_none()))
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, product_id, warehouse_id) = (self.saving, self.product_id, self.warehouse_id);
        Signal::derive(move || {
            saving.get() || product_id.with(|p| p.is_empty()) || warehouse_id.with(|w| w.is_empty())
        })
    }

    /// Доступно = на складе - в резерве; пусто при ошибке ввода
    pub fn available(&self) -> Signal<String> {
        let (on_hand, reserved) = (self.quantity_on_hand, self.quantity_reserved);
        Signal::derive(move || {
            match (
                parse_i64("On hand", &on_hand.get()),
                parse_i64("Reserved", &reserved.get()),
            ) {
                (Ok(a), Ok(b)) => (a - b).to_string(),
                _ => String::new(),
            }
        })
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<InventoryRecord>(COLLECTION, &id).await {
                Ok(item) => this.from_record(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
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
            match upsert(COLLECTION, &dto).await {
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

    fn from_record(&self, r: &InventoryRecord) {
        self.product_id.set(r.product_id.clone());
        self.warehouse_id.set(r.warehouse_id.clone());
        self.quantity_on_hand.set(r.quantity_on_hand.to_string());
        self.quantity_reserved.set(r.quantity_reserved.to_string());
        self.reorder_point.set(r.reorder_point.to_string());
    }

    fn to_dto(&self) -> Result<InventoryRecordDto, String> {
        let dto = InventoryRecordDto {
            id: self.id.get_untracked(),
            product_id: self.product_id.get_untracked(),
            warehouse_id: self.warehouse_id.get_untracked(),
            quantity_on_hand: parse_i64("On hand", &self.quantity_on_hand.get_untracked())?,
            quantity_reserved: parse_i64("Reserved", &self.quantity_reserved.get_untracked())?,
            reorder_point: parse_i64("Reorder point", &self.reorder_point.get_untracked())?,
        };
        check_quantities(&dto)?;
        Ok(dto)
    }
}

fn check_quantities(dto: &InventoryRecordDto) -> Result<(), String> {
    if dto.product_id.is_empty() {
        return Err("Product is required".into());
    }
    if dto.warehouse_id.is_empty() {
        return Err("Warehouse is required".into());
    }
    if dto.quantity_on_hand < 0 || dto.quantity_reserved < 0 || dto.reorder_point < 0 {
        return Err("Quantities cannot be negative".into());
    }
    if dto.quantity_reserved > dto.quantity_on_hand {
        return Err(format!(
            "Reserved quantity {} exceeds on-hand quantity {}",
            dto.quantity_reserved, dto.quantity_on_hand
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(on_hand: i64, reserved: i64) -> InventoryRecordDto {
        InventoryRecordDto {
            product_id: "p".into(),
            warehouse_id: "w".into(),
            quantity_on_hand: on_hand,
            quantity_reserved: reserved,
            ..Default::default()
        }
    }

    #[test]
    fn test_check_quantities() {
        assert!(check_quantities(&dto(5, 5)).is_ok());
        assert!(check_quantities(&dto(-1, 0)).is_err());
        let err = check_quantities(&dto(2, 3)).unwrap_err();
        assert!(err.contains("exceeds"));
        let missing = InventoryRecordDto { product_id: String::new(), ..dto(1, 0) };
        assert_eq!(check_quantities(&missing).unwrap_err(), "Product is required");
    }
}
