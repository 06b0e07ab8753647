use crate::domain::common::validation::{looks_like_email, opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(ManufacturerId);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(flatten)]
    pub base: BaseAggregate<ManufacturerId>,

    pub website: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
}

impl Manufacturer {
    pub fn new_for_insert(dto: &ManufacturerDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("MFR-{}", &ManufacturerId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(ManufacturerId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            website: opt(dto.website.clone()),
            country: opt(dto.country.clone()),
            contact_email: opt(dto.contact_email.clone()),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ManufacturerDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.website = opt(dto.website.clone());
        self.country = opt(dto.country.clone());
        self.contact_email = opt(dto.contact_email.clone());
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Manufacturer name is required")?;
        if let Some(email) = &self.contact_email {
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

    pub fn to_dto(&self) -> ManufacturerDto {
        ManufacturerDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            website: self.website.clone(),
            country: self.country.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

crate::impl_aggregate_root!(
    Manufacturer,
    ManufacturerId,
    "a004",
    "manufacturer",
    "Manufacturer",
    "Manufacturers"
);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManufacturerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub website: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_only_when_present() {
        let mut dto = ManufacturerDto {
            description: "Bosch".into(),
            contact_email: Some("   ".into()),
            ..Default::default()
        };
        let m = Manufacturer::new_for_insert(&dto);
        assert!(m.contact_email.is_none());
        assert!(m.validate().is_ok());

        dto.contact_email = Some("sales-at-bosch".into());
        assert!(Manufacturer::new_for_insert(&dto).validate().is_err());
    }
}
