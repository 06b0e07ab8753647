//! Дочерние записи товара: изображения, описания, особенности, Q&A, SEO,
//! связанные товары, значения спецификаций и характеристик.
//!
//! Все виды хранятся в одной таблице, `kind` - дискриминатор, данные вида
//! лежат в JSON-колонке `payload`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const META_TITLE_MAX: usize = 70;
pub const META_DESCRIPTION_MAX: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Description,
    Feature,
    Benefit,
    Question,
    Seo,
    Related,
    Specification,
    Attribute,
}

impl AttachmentKind {
    pub fn all() -> [AttachmentKind; 9] {
        [
            AttachmentKind::Image,
            AttachmentKind::Description,
            AttachmentKind::Feature,
            AttachmentKind::Benefit,
            AttachmentKind::Question,
            AttachmentKind::Seo,
            AttachmentKind::Related,
            AttachmentKind::Specification,
            AttachmentKind::Attribute,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Description => "description",
            AttachmentKind::Feature => "feature",
            AttachmentKind::Benefit => "benefit",
            AttachmentKind::Question => "question",
            AttachmentKind::Seo => "seo",
            AttachmentKind::Related => "related",
            AttachmentKind::Specification => "specification",
            AttachmentKind::Attribute => "attribute",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|k| k.as_str() == s)
    }

    /// Заголовок вкладки в карточке товара
    pub fn title(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "Images",
            AttachmentKind::Description => "Descriptions",
            AttachmentKind::Feature => "Features",
            AttachmentKind::Benefit => "Benefits",
            AttachmentKind::Question => "Q&A",
            AttachmentKind::Seo => "SEO",
            AttachmentKind::Related => "Related",
            AttachmentKind::Specification => "Specifications",
            AttachmentKind::Attribute => "Attributes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    #[default]
    Accessory,
    Alternative,
    UpSell,
    CrossSell,
}

impl RelationKind {
    pub fn all() -> [RelationKind; 4] {
        [
            RelationKind::Accessory,
            RelationKind::Alternative,
            RelationKind::UpSell,
            RelationKind::CrossSell,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Accessory => "accessory",
            RelationKind::Alternative => "alternative",
            RelationKind::UpSell => "up_sell",
            RelationKind::CrossSell => "cross_sell",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|k| k.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Accessory => "Accessory",
            RelationKind::Alternative => "Alternative",
            RelationKind::UpSell => "Up-sell",
            RelationKind::CrossSell => "Cross-sell",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImagePayload {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DescriptionPayload {
    pub locale: String,
    #[serde(default)]
    pub title: String,
    pub body: String,
}

/// Особенность или преимущество товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighlightPayload {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuestionPayload {
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeoPayload {
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RelatedPayload {
    pub related_product_id: String,
    #[serde(default)]
    pub relation: RelationKind,
}

/// Значение спецификации или характеристики
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpecValuePayload {
    pub specification_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributeValuePayload {
    pub attribute_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentPayload {
    Image(ImagePayload),
    Description(DescriptionPayload),
    Feature(HighlightPayload),
    Benefit(HighlightPayload),
    Question(QuestionPayload),
    Seo(SeoPayload),
    Related(RelatedPayload),
    Specification(SpecValuePayload),
    Attribute(AttributeValuePayload),
}

impl AttachmentPayload {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            AttachmentPayload::Image(_) => AttachmentKind::Image,
            AttachmentPayload::Description(_) => AttachmentKind::Description,
            AttachmentPayload::Feature(_) => AttachmentKind::Feature,
            AttachmentPayload::Benefit(_) => AttachmentKind::Benefit,
            AttachmentPayload::Question(_) => AttachmentKind::Question,
            AttachmentPayload::Seo(_) => AttachmentKind::Seo,
            AttachmentPayload::Related(_) => AttachmentKind::Related,
            AttachmentPayload::Specification(_) => AttachmentKind::Specification,
            AttachmentPayload::Attribute(_) => AttachmentKind::Attribute,
        }
    }

    /// Пустая запись нужного вида для формы добавления
    pub fn empty(kind: AttachmentKind) -> Self {
        match kind {
            AttachmentKind::Image => AttachmentPayload::Image(Default::default()),
            AttachmentKind::Description => AttachmentPayload::Description(DescriptionPayload {
                locale: "en".into(),
                ..Default::default()
            }),
            AttachmentKind::Feature => AttachmentPayload::Feature(Default::default()),
            AttachmentKind::Benefit => AttachmentPayload::Benefit(Default::default()),
            AttachmentKind::Question => AttachmentPayload::Question(Default::default()),
            AttachmentKind::Seo => AttachmentPayload::Seo(Default::default()),
            AttachmentKind::Related => AttachmentPayload::Related(Default::default()),
            AttachmentKind::Specification => {
                AttachmentPayload::Specification(Default::default())
            }
            AttachmentKind::Attribute => AttachmentPayload::Attribute(Default::default()),
        }
    }

    /// Ключ уникальности внутри товара и вида.
    ///
    /// Сохранение записи с тем же ключом заменяет существующую.
    /// `None` - вид допускает любое количество записей.
    pub fn replace_key(&self) -> Option<String> {
        match self {
            AttachmentPayload::Seo(_) => Some("seo".into()),
            AttachmentPayload::Description(d) => Some(d.locale.trim().to_lowercase()),
            AttachmentPayload::Related(r) => Some(canonical_id(&r.related_product_id)),
            AttachmentPayload::Specification(s) => Some(canonical_id(&s.specification_id)),
            AttachmentPayload::Attribute(a) => Some(canonical_id(&a.attribute_id)),
            _ => None,
        }
    }

    /// Ссылки на товар/спецификацию/характеристику приводятся к виду `Uuid::to_string`
    pub fn normalize_ids(&mut self) {
        let id = match self {
            AttachmentPayload::Related(r) => &mut r.related_product_id,
            AttachmentPayload::Specification(s) => &mut s.specification_id,
            AttachmentPayload::Attribute(a) => &mut a.attribute_id,
            _ => return,
        };
        *id = canonical_id(id);
    }

    /// Короткий текст для строки таблицы
    pub fn summary(&self) -> String {
        match self {
            AttachmentPayload::Image(i) => {
                if i.is_primary {
                    format!("{} (primary)", i.url)
                } else {
                    i.url.clone()
                }
            }
            AttachmentPayload::Description(d) => format!("[{}] {}", d.locale, d.title),
            AttachmentPayload::Feature(h) | AttachmentPayload::Benefit(h) => h.title.clone(),
            AttachmentPayload::Question(q) => q.question.clone(),
            AttachmentPayload::Seo(s) => s.slug.clone(),
            AttachmentPayload::Related(r) => r.relation.label().to_string(),
            AttachmentPayload::Specification(s) => s.value.clone(),
            AttachmentPayload::Attribute(a) => a.value.clone(),
        }
    }

    /// Локальные правила, не требующие обращения к базе.
    ///
    /// Существование связанного товара, спецификации и характеристики
    /// проверяет сервис.
    pub fn validate(&self, product_id: &str) -> Result<(), String> {
        match self {
            AttachmentPayload::Image(i) => {
                if i.url.trim().is_empty() {
                    return Err("Image URL is required".into());
                }
                Ok(())
            }
            AttachmentPayload::Description(d) => {
                if d.locale.trim().is_empty() {
                    return Err("Locale is required".into());
                }
                if d.body.trim().is_empty() {
                    return Err("Description text is required".into());
                }
                Ok(())
            }
            AttachmentPayload::Feature(h) | AttachmentPayload::Benefit(h) => {
                if h.title.trim().is_empty() {
                    return Err("Title is required".into());
                }
                Ok(())
            }
            AttachmentPayload::Question(q) => {
                if q.question.trim().is_empty() {
                    return Err("Question text is required".into());
                }
                let answered = q.answer.as_deref().map(|a| !a.trim().is_empty()).unwrap_or(false);
                if q.is_published && !answered {
                    return Err("A question cannot be published without an answer".into());
                }
                Ok(())
            }
            AttachmentPayload::Seo(s) => validate_seo(s),
            AttachmentPayload::Related(r) => {
                if r.related_product_id.trim().is_empty() {
                    return Err("Related product is required".into());
                }
                if r.related_product_id == product_id {
                    return Err("A product cannot be related to itself".into());
                }
                Ok(())
            }
            AttachmentPayload::Specification(s) => {
                if s.specification_id.trim().is_empty() {
                    return Err("Specification is required".into());
                }
                if s.value.trim().is_empty() {
                    return Err("Specification value is required".into());
                }
                Ok(())
            }
            AttachmentPayload::Attribute(a) => {
                if a.attribute_id.trim().is_empty() {
                    return Err("Attribute is required".into());
                }
                Ok(())
            }
        }
    }
}

/// UUID в каноническом виде (нижний регистр, с дефисами); не-UUID только обрезается
pub fn canonical_id(id: &str) -> String {
    let id = id.trim();
    Uuid::parse_str(id)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| id.to_string())
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// "Cordless Drill 18V!" -> "cordless-drill-18v"
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn validate_seo(s: &SeoPayload) -> Result<(), String> {
    if !s.slug.is_empty() && !is_valid_slug(&s.slug) {
        return Err(format!(
            "Slug '{}' may only contain lowercase letters, digits and dashes",
            s.slug
        ));
    }
    if s.meta_title.chars().count() > META_TITLE_MAX {
        return Err(format!("Meta title is longer than {} characters", META_TITLE_MAX));
    }
    if s.meta_description.chars().count() > META_DESCRIPTION_MAX {
        return Err(format!(
            "Meta description is longer than {} characters",
            META_DESCRIPTION_MAX
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttachment {
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub sort_order: i32,
    pub payload: AttachmentPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductAttachment {
    pub fn kind(&self) -> AttachmentKind {
        self.payload.kind()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAttachmentDto {
    pub id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub payload: AttachmentPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json_is_tagged_by_kind() {
        let p = AttachmentPayload::Related(RelatedPayload {
            related_product_id: "p2".into(),
            relation: RelationKind::CrossSell,
        });
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["kind"], "related");
        assert_eq!(json["relation"], "cross_sell");

        let back: AttachmentPayload = serde_json::from_value(serde_json::json!({
            "kind": "question",
            "question": "Does it fit M8?"
        }))
        .unwrap();
        assert_eq!(back.kind(), AttachmentKind::Question);
    }

    #[test]
    fn test_question_publish_requires_answer() {
        let mut q = QuestionPayload {
            question: "Battery included?".into(),
            answer: Some("  ".into()),
            is_published: true,
        };
        assert!(AttachmentPayload::Question(q.clone()).validate("p1").is_err());
        q.answer = Some("Yes, 2Ah".into());
        assert!(AttachmentPayload::Question(q).validate("p1").is_ok());
    }

    #[test]
    fn test_related_not_self() {
        let r = AttachmentPayload::Related(RelatedPayload {
            related_product_id: "p1".into(),
            relation: RelationKind::Accessory,
        });
        assert!(r.validate("p1").is_err());
        assert!(r.validate("p2").is_ok());
    }

    #[test]
    fn test_seo_rules() {
        let ok = SeoPayload {
            meta_title: "Drill".into(),
            slug: "cordless-drill-18v".into(),
            ..Default::default()
        };
        assert!(AttachmentPayload::Seo(ok.clone()).validate("p1").is_ok());

        let bad_slug = SeoPayload {
            slug: "Cordless Drill".into(),
            ..ok.clone()
        };
        assert!(AttachmentPayload::Seo(bad_slug).validate("p1").is_err());

        let long_title = SeoPayload {
            meta_title: "x".repeat(META_TITLE_MAX + 1),
            ..ok.clone()
        };
        assert!(AttachmentPayload::Seo(long_title).validate("p1").is_err());

        let long_desc = SeoPayload {
            meta_description: "x".repeat(META_DESCRIPTION_MAX + 1),
            ..ok
        };
        assert!(AttachmentPayload::Seo(long_desc).validate("p1").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Cordless Drill 18V!"), "cordless-drill-18v");
        assert_eq!(slugify("  --Saw--  "), "saw");
        assert!(is_valid_slug(&slugify("Garden Hose, 25 m")));
        assert!(!is_valid_slug("-saw"));
    }

    #[test]
    fn test_replace_keys() {
        let d = AttachmentPayload::Description(DescriptionPayload {
            locale: " EN ".into(),
            title: String::new(),
            body: "text".into(),
        });
        assert_eq!(d.replace_key().as_deref(), Some("en"));
        assert_eq!(
            AttachmentPayload::empty(AttachmentKind::Seo).replace_key().as_deref(),
            Some("seo")
        );
        assert!(AttachmentPayload::empty(AttachmentKind::Image).replace_key().is_none());
        assert!(AttachmentPayload::empty(AttachmentKind::Feature).replace_key().is_none());
    }

    #[test]
    fn test_reference_ids_are_canonical() {
        let mut related = AttachmentPayload::Related(RelatedPayload {
            related_product_id: " 550E8400-E29B-41D4-A716-446655440000 ".into(),
            ..Default::default()
        });
        assert_eq!(
            related.replace_key().as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );
        related.normalize_ids();
        match &related {
            AttachmentPayload::Related(r) => {
                assert_eq!(r.related_product_id, "550e8400-e29b-41d4-a716-446655440000")
            }
            _ => unreachable!(),
        }
        assert_eq!(canonical_id(" not-a-uuid "), "not-a-uuid");
    }
}
