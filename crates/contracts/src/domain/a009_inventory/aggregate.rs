use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Остаток товара на складе
///
/// Не имеет собственного кода и наименования: запись однозначно
/// определяется парой (товар, склад).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity_on_hand: i64,
    pub quantity_reserved: i64,
    pub reorder_point: i64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new_for_insert(dto: &InventoryRecordDto) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: dto.product_id.trim().to_string(),
            warehouse_id: dto.warehouse_id.trim().to_string(),
            quantity_on_hand: dto.quantity_on_hand,
            quantity_reserved: dto.quantity_reserved,
            reorder_point: dto.reorder_point,
            updated_at: Utc::now(),
        }
    }

    /// Пара товар/склад не меняется, обновляются только количества
    pub fn update(&mut self, dto: &InventoryRecordDto) {
        self.quantity_on_hand = dto.quantity_on_hand;
        self.quantity_reserved = dto.quantity_reserved;
        self.reorder_point = dto.reorder_point;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.is_empty() {
            return Err("Product is required".into());
        }
        if self.warehouse_id.is_empty() {
            return Err("Warehouse is required".into());
        }
        if self.quantity_on_hand < 0 || self.quantity_reserved < 0 || self.reorder_point < 0 {
            return Err("Quantities cannot be negative".into());
        }
        if self.quantity_reserved > self.quantity_on_hand {
            return Err(format!(
                "Reserved quantity {} exceeds on-hand quantity {}",
                self.quantity_reserved, self.quantity_on_hand
            ));
        }
        Ok(())
    }

    pub fn available(&self) -> i64 {
        self.quantity_on_hand - self.quantity_reserved
    }

    pub fn needs_reorder(&self) -> bool {
        self.available() <= self.reorder_point
    }

    pub fn to_dto(&self) -> InventoryRecordDto {
        InventoryRecordDto {
            id: Some(self.id.clone()),
            product_id: self.product_id.clone(),
            warehouse_id: self.warehouse_id.clone(),
            quantity_on_hand: self.quantity_on_hand,
            quantity_reserved: self.quantity_reserved,
            reorder_point: self.reorder_point,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryRecordDto {
    pub id: Option<String>,
    pub product_id: String,
    pub warehouse_id: String,
    #[serde(default)]
    pub quantity_on_hand: i64,
    #[serde(default)]
    pub quantity_reserved: i64,
    #[serde(default)]
    pub reorder_point: i64,
}

/// Фильтр списка остатков
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryFilter {
    pub product_id: Option<String>,
    pub warehouse_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(on_hand: i64, reserved: i64, reorder: i64) -> InventoryRecord {
        InventoryRecord::new_for_insert(&InventoryRecordDto {
            id: None,
            product_id: "p1".into(),
            warehouse_id: "w1".into(),
            quantity_on_hand: on_hand,
            quantity_reserved: reserved,
            reorder_point: reorder,
        })
    }

    #[test]
    fn test_quantities() {
        assert!(record(10, 3, 2).validate().is_ok());
        assert!(record(2, 3, 0).validate().is_err());
        assert!(record(-1, 0, 0).validate().is_err());
    }

    #[test]
    fn test_available_and_reorder() {
        let r = record(10, 4, 5);
        assert_eq!(r.available(), 6);
        assert!(!r.needs_reorder());
        assert!(record(10, 5, 5).needs_reorder());
    }

    #[test]
    fn test_update_keeps_pair() {
        let mut r = record(10, 0, 0);
        r.update(&InventoryRecordDto {
            id: None,
            product_id: "other".into(),
            warehouse_id: "other".into(),
            quantity_on_hand: 3,
            quantity_reserved: 1,
            reorder_point: 1,
        });
        assert_eq!(r.product_id, "p1");
        assert_eq!(r.available(), 2);
    }
}
