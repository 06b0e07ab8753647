use crate::domain::common::validation::{clean_list, opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ServicingAreaId);

/// Зона доставки, которую обслуживают склады
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicingArea {
    #[serde(flatten)]
    pub base: BaseAggregate<ServicingAreaId>,

    pub region: Option<String>,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    #[serde(default)]
    pub delivery_days: i32,
}

impl ServicingArea {
    pub fn new_for_insert(dto: &ServicingAreaDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("AREA-{}", &ServicingAreaId::new_v4().as_string()[..8]));
        let mut base =
            BaseAggregate::new(ServicingAreaId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            region: opt(dto.region.clone()),
            postal_codes: clean_list(&dto.postal_codes),
            delivery_days: dto.delivery_days,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ServicingAreaDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.region = opt(dto.region.clone());
        self.postal_codes = clean_list(&dto.postal_codes);
        self.delivery_days = dto.delivery_days;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Area name is required")?;
        if self.delivery_days < 0 {
            return Err("Delivery days cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    pub fn covers(&self, postal_code: &str) -> bool {
        let code = postal_code.trim();
        self.postal_codes.iter().any(|c| c == code)
    }

    pub fn to_dto(&self) -> ServicingAreaDto {
        ServicingAreaDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            region: self.region.clone(),
            postal_codes: self.postal_codes.clone(),
            delivery_days: self.delivery_days,
        }
    }
}

crate::impl_aggregate_root!(
    ServicingArea,
    ServicingAreaId,
    "a008",
    "servicing_area",
    "Servicing area",
    "Servicing areas"
);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicingAreaDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    #[serde(default)]
    pub delivery_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_codes_and_days() {
        let mut dto = ServicingAreaDto {
            description: "Berlin".into(),
            postal_codes: vec![" 10115".into(), "10115".into(), "10117".into()],
            delivery_days: 2,
            ..Default::default()
        };
        let area = ServicingArea::new_for_insert(&dto);
        assert_eq!(area.postal_codes, vec!["10115", "10117"]);
        assert!(area.covers(" 10117 "));
        assert!(!area.covers("20095"));

        dto.delivery_days = -1;
        assert!(ServicingArea::new_for_insert(&dto).validate().is_err());
    }
}
