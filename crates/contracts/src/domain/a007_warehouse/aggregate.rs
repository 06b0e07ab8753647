use crate::domain::common::validation::{clean_list, opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(WarehouseId);

/// Склад; зоны обслуживания хранятся в связующей таблице
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: BaseAggregate<WarehouseId>,

    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub servicing_area_ids: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Warehouse {
    pub fn new_for_insert(dto: &WarehouseDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("WH-{}", &WarehouseId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(WarehouseId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            address: opt(dto.address.clone()),
            is_active: dto.is_active,
            servicing_area_ids: clean_list(&dto.servicing_area_ids),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &WarehouseDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.address = opt(dto.address.clone());
        self.is_active = dto.is_active;
        self.servicing_area_ids = clean_list(&dto.servicing_area_ids);
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Warehouse name is required")
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    pub fn to_dto(&self) -> WarehouseDto {
        WarehouseDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            address: self.address.clone(),
            is_active: self.is_active,
            servicing_area_ids: self.servicing_area_ids.clone(),
        }
    }
}

crate::impl_aggregate_root!(Warehouse, WarehouseId, "a007", "warehouse", "Warehouse", "Warehouses");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub servicing_area_ids: Vec<String>,
}

impl Default for WarehouseDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            address: None,
            is_active: true,
            servicing_area_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_ids_deduplicated() {
        let w = Warehouse::new_for_insert(&WarehouseDto {
            description: "Main".into(),
            servicing_area_ids: vec!["a".into(), "b".into(), "a".into(), " ".into()],
            ..Default::default()
        });
        assert_eq!(w.servicing_area_ids, vec!["a", "b"]);
        assert!(w.is_active);
        assert!(w.base.code.starts_with("WH-"));
    }
}
