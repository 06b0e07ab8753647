use crate::domain::common::validation::{clean_list, opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(AttributeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDataType {
    #[default]
    Text,
    Number,
    Boolean,
    Choice,
}

impl AttributeDataType {
    pub fn all() -> [AttributeDataType; 4] {
        [
            AttributeDataType::Text,
            AttributeDataType::Number,
            AttributeDataType::Boolean,
            AttributeDataType::Choice,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeDataType::Text => "text",
            AttributeDataType::Number => "number",
            AttributeDataType::Boolean => "boolean",
            AttributeDataType::Choice => "choice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_str() == s)
    }
}

/// Характеристика товара (цвет, мощность, материал...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub base: BaseAggregate<AttributeId>,

    pub data_type: AttributeDataType,
    pub unit: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_filterable: bool,
}

impl Attribute {
    pub fn new_for_insert(dto: &AttributeDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| slug_code(&dto.description));
        let mut base = BaseAggregate::new(AttributeId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            data_type: dto.data_type,
            unit: opt(dto.unit.clone()),
            options: clean_list(&dto.options),
            is_filterable: dto.is_filterable,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &AttributeDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.data_type = dto.data_type;
        self.unit = opt(dto.unit.clone());
        self.options = clean_list(&dto.options);
        self.is_filterable = dto.is_filterable;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Attribute name is required")?;
        if self.data_type == AttributeDataType::Choice && self.options.is_empty() {
            return Err("A choice attribute needs at least one option".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Проверить значение характеристики товара по типу данных
    pub fn check_value(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for '{}' is empty", self.base.description));
        }
        match self.data_type {
            AttributeDataType::Text => Ok(()),
            AttributeDataType::Number => value
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|_| ())
                .ok_or_else(|| format!("'{}' expects a number, got '{}'", self.base.description, value)),
            AttributeDataType::Boolean => match value.to_lowercase().as_str() {
                "true" | "false" => Ok(()),
                _ => Err(format!("'{}' expects true or false", self.base.description)),
            },
            AttributeDataType::Choice => {
                if self.options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' must be one of: {}",
                        self.base.description,
                        self.options.join(", ")
                    ))
                }
            }
        }
    }

    pub fn to_dto(&self) -> AttributeDto {
        AttributeDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            data_type: self.data_type,
            unit: self.unit.clone(),
            options: self.options.clone(),
            is_filterable: self.is_filterable,
        }
    }
}

fn slug_code(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.trim_matches('_').is_empty() {
        format!("attr_{}", &AttributeId::new_v4().as_string()[..8])
    } else {
        slug
    }
}

crate::impl_aggregate_root!(Attribute, AttributeId, "a002", "attribute", "Attribute", "Attributes");

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttributeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub data_type: AttributeDataType,
    pub unit: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_filterable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(data_type: AttributeDataType, options: &[&str]) -> Attribute {
        Attribute::new_for_insert(&AttributeDto {
            description: "Voltage".into(),
            data_type,
            options: options.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_choice_requires_options() {
        assert!(attr(AttributeDataType::Choice, &[" "]).validate().is_err());
        assert!(attr(AttributeDataType::Choice, &["Red", "Red", "Blue"])
            .validate()
            .is_ok());
        assert_eq!(attr(AttributeDataType::Choice, &["Red", "Red"]).options, vec!["Red"]);
    }

    #[test]
    fn test_check_value_by_type() {
        let number = attr(AttributeDataType::Number, &[]);
        assert!(number.check_value("18").is_ok());
        assert!(number.check_value("2,5").is_ok());
        assert!(number.check_value("eighteen").is_err());

        let flag = attr(AttributeDataType::Boolean, &[]);
        assert!(flag.check_value("TRUE").is_ok());
        assert!(flag.check_value("yes").is_err());

        let choice = attr(AttributeDataType::Choice, &["Red", "Blue"]);
        assert!(choice.check_value("red").is_ok());
        assert!(choice.check_value("Green").is_err());

        let text = attr(AttributeDataType::Text, &[]);
        assert!(text.check_value("anything").is_ok());
        assert!(text.check_value("   ").is_err());
    }

    #[test]
    fn test_code_from_name() {
        let a = attr(AttributeDataType::Text, &[]);
        assert_eq!(a.base.code, "voltage");
        assert_eq!(AttributeDataType::parse("boolean"), Some(AttributeDataType::Boolean));
    }
}
