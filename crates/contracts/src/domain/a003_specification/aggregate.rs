use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SpecificationId);

/// Technical specification field (e.g. "Weight, kg"), optionally bound to a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    #[serde(flatten)]
    pub base: BaseAggregate<SpecificationId>,

    pub category_id: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_required: bool,
}

impl Specification {
    pub fn new_for_insert(dto: &SpecificationDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("SPEC-{}", &SpecificationId::new_v4().as_string()[..8]));
        let mut base =
            BaseAggregate::new(SpecificationId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            category_id: opt(dto.category_id.clone()),
            unit: opt(dto.unit.clone()),
            sort_order: dto.sort_order,
            is_required: dto.is_required,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &SpecificationDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.category_id = opt(dto.category_id.clone());
        self.unit = opt(dto.unit.clone());
        self.sort_order = dto.sort_order;
        self.is_required = dto.is_required;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Specification name is required")
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// "Weight, kg"
    pub fn label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{}, {}", self.base.description, unit),
            None => self.base.description.clone(),
        }
    }

    pub fn to_dto(&self) -> SpecificationDto {
        SpecificationDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            category_id: self.category_id.clone(),
            unit: self.unit.clone(),
            sort_order: self.sort_order,
            is_required: self.is_required,
        }
    }
}

crate::impl_aggregate_root!(
    Specification,
    SpecificationId,
    "a003",
    "specification",
    "Specification",
    "Specifications"
);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpecificationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> SpecificationDto {
        SpecificationDto {
            description: "Weight".into(),
            unit: Some(" kg ".into()),
            category_id: Some("  ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_required() {
        assert!(Specification::new_for_insert(&dto()).validate().is_ok());

        let mut d = dto();
        d.description = " ".into();
        assert_eq!(
            Specification::new_for_insert(&d).validate(),
            Err("Specification name is required".to_string())
        );
    }

    #[test]
    fn test_blank_fields_and_label() {
        let s = Specification::new_for_insert(&dto());
        assert!(s.base.code.starts_with("SPEC-"));
        assert_eq!(s.category_id, None);
        assert_eq!(s.label(), "Weight, kg");

        let mut s = s;
        let mut d = dto();
        d.unit = None;
        s.update(&d);
        s.before_write();
        assert_eq!(s.label(), "Weight");
        assert_eq!(s.base.metadata.version, 1);
    }
}
