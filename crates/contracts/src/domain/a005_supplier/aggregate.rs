use crate::domain::common::validation::{looks_like_email, opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SupplierId);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierId>,

    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Supplier {
    pub fn new_for_insert(dto: &SupplierDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("SUP-{}", &SupplierId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(SupplierId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            contact_name: opt(dto.contact_name.clone()),
            email: opt(dto.email.clone()),
            phone: opt(dto.phone.clone()),
            address: opt(dto.address.clone()),
            is_active: dto.is_active,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &SupplierDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.contact_name = opt(dto.contact_name.clone());
        self.email = opt(dto.email.clone());
        self.phone = opt(dto.phone.clone());
        self.address = opt(dto.address.clone());
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Supplier name is required")?;
        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                return Err(format!("'{}' is not a valid e-mail", email));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    pub fn to_dto(&self) -> SupplierDto {
        SupplierDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            contact_name: self.contact_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            is_active: self.is_active,
        }
    }
}

crate::impl_aggregate_root!(Supplier, SupplierId, "a005", "supplier", "Supplier", "Suppliers");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for SupplierDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: Option<&str>) -> SupplierDto {
        SupplierDto {
            description: "Nordic Tools AB".into(),
            email: email.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_required() {
        let mut d = dto(None);
        d.description = String::new();
        assert_eq!(
            Supplier::new_for_insert(&d).validate(),
            Err("Supplier name is required".to_string())
        );
    }

    #[test]
    fn test_email_checked_only_when_given() {
        assert!(Supplier::new_for_insert(&dto(None)).validate().is_ok());
        assert!(Supplier::new_for_insert(&dto(Some("  "))).validate().is_ok());
        assert!(Supplier::new_for_insert(&dto(Some("sales@nordic.se"))).validate().is_ok());
        assert_eq!(
            Supplier::new_for_insert(&dto(Some("sales.nordic.se"))).validate(),
            Err("'sales.nordic.se' is not a valid e-mail".to_string())
        );
    }

    #[test]
    fn test_update_keeps_code_when_blank() {
        let mut s = Supplier::new_for_insert(&dto(None));
        let code = s.base.code.clone();
        let mut d = dto(Some("info@nordic.se"));
        d.code = Some(" ".into());
        d.is_active = false;
        s.update(&d);
        assert_eq!(s.base.code, code);
        assert_eq!(s.email.as_deref(), Some("info@nordic.se"));
        assert!(!s.is_active);
    }
}
