//! Плоская форма вложения любого вида
//!
//! Окно редактирования держит один `AttachmentDraft`; поля, не относящиеся
//! к виду, просто не показываются и не попадают в payload.

use crate::shared::form_utils::{join_list, split_list};
use contracts::domain::a006_product::attachment::{
    AttachmentKind, AttachmentPayload, AttributeValuePayload, DescriptionPayload,
    HighlightPayload, ImagePayload, QuestionPayload, RelatedPayload, RelationKind, SeoPayload,
    SpecValuePayload,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentDraft {
    pub kind: AttachmentKind,
    pub sort_order: String,
    // image
    pub url: String,
    pub alt_text: String,
    pub is_primary: bool,
    // description, feature, benefit
    pub locale: String,
    pub title: String,
    pub body: String,
    // question
    pub question: String,
    pub answer: String,
    pub is_published: bool,
    // seo
    pub meta_title: String,
    pub meta_description: String,
    pub slug: String,
    pub keywords: String,
    // related
    pub relation: RelationKind,
    /// Связанный товар, спецификация или характеристика - по виду
    pub target_id: String,
    pub value: String,
}

impl AttachmentDraft {
    pub fn new(kind: AttachmentKind) -> Self {
        Self::from_payload(&AttachmentPayload::empty(kind), 0)
    }

    pub fn from_payload(payload: &AttachmentPayload, sort_order: i32) -> Self {
        let mut d = Self {
            kind: payload.kind(),
            sort_order: sort_order.to_string(),
            url: String::new(),
            alt_text: String::new(),
            is_primary: false,
            locale: String::new(),
            title: String::new(),
            body: String::new(),
            question: String::new(),
            answer: String::new(),
            is_published: false,
            meta_title: String::new(),
            meta_description: String::new(),
            slug: String::new(),
            keywords: String::new(),
            relation: RelationKind::default(),
            target_id: String::new(),
            value: String::new(),
        };
        match payload {
            AttachmentPayload::Image(i) => {
                d.url = i.url.clone();
                d.alt_text = i.alt_text.clone();
                d.is_primary = i.is_primary;
            }
            AttachmentPayload::Description(x) => {
                d.locale = x.locale.clone();
                d.title = x.title.clone();
                d.body = x.body.clone();
            }
            AttachmentPayload::Feature(h) | AttachmentPayload::Benefit(h) => {
                d.title = h.title.clone();
                d.body = h.body.clone();
            }
            AttachmentPayload::Question(q) => {
                d.question = q.question.clone();
                d.answer = q.answer.clone().unwrap_or_default();
                d.is_published = q.is_published;
            }
            AttachmentPayload::Seo(s) => {
                d.meta_title = s.meta_title.clone();
                d.meta_description = s.meta_description.clone();
                d.slug = s.slug.clone();
                d.keywords = join_list(&s.keywords);
            }
            AttachmentPayload::Related(r) => {
                d.target_id = r.related_product_id.clone();
                d.relation = r.relation;
            }
            AttachmentPayload::Specification(s) => {
                d.target_id = s.specification_id.clone();
                d.value = s.value.clone();
            }
            AttachmentPayload::Attribute(a) => {
                d.target_id = a.attribute_id.clone();
                d.value = a.value.clone();
            }
        }
        d
    }

    pub fn to_payload(&self) -> AttachmentPayload {
        let text = |s: &str| s.trim().to_string();
        match self.kind {
            AttachmentKind::Image => AttachmentPayload::Image(ImagePayload {
                url: text(&self.url),
                alt_text: text(&self.alt_text),
                is_primary: self.is_primary,
            }),
            AttachmentKind::Description => AttachmentPayload::Description(DescriptionPayload {
                locale: text(&self.locale).to_lowercase(),
                title: text(&self.title),
                body: text(&self.body),
            }),
            AttachmentKind::Feature => AttachmentPayload::Feature(self.highlight()),
            AttachmentKind::Benefit => AttachmentPayload::Benefit(self.highlight()),
            AttachmentKind::Question => AttachmentPayload::Question(QuestionPayload {
                question: text(&self.question),
                answer: Some(text(&self.answer)).filter(|a| !a.is_empty()),
                is_published: self.is_published,
            }),
            AttachmentKind::Seo => AttachmentPayload::Seo(SeoPayload {
                meta_title: text(&self.meta_title),
                meta_description: text(&self.meta_description),
                slug: text(&self.slug),
                keywords: split_list(&self.keywords),
            }),
            AttachmentKind::Related => AttachmentPayload::Related(RelatedPayload {
                related_product_id: text(&self.target_id),
                relation: self.relation,
            }),
            AttachmentKind::Specification => AttachmentPayload::Specification(SpecValuePayload {
                specification_id: text(&self.target_id),
                value: text(&self.value),
            }),
            AttachmentKind::Attribute => AttachmentPayload::Attribute(AttributeValuePayload {
                attribute_id: text(&self.target_id),
                value: text(&self.value),
            }),
        }
    }

    fn highlight(&self) -> HighlightPayload {
        HighlightPayload {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_description_defaults_to_en() {
        let d = AttachmentDraft::new(AttachmentKind::Description);
        assert_eq!(d.locale, "en");
        assert_eq!(d.sort_order, "0");
    }

    #[test]
    fn test_question_blank_answer_becomes_none() {
        let mut d = AttachmentDraft::new(AttachmentKind::Question);
        d.question = " Is it waterproof? ".into();
        d.answer = "   ".into();
        match d.to_payload() {
            AttachmentPayload::Question(q) => {
                assert_eq!(q.question, "Is it waterproof?");
                assert_eq!(q.answer, None);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_seo_keywords_split_and_join() {
        let payload = AttachmentPayload::Seo(SeoPayload {
            slug: "cordless-drill".into(),
            keywords: vec!["drill".into(), "cordless".into()],
            ..Default::default()
        });
        let d = AttachmentDraft::from_payload(&payload, 3);
        assert_eq!(d.keywords, "drill, cordless");
        assert_eq!(d.sort_order, "3");

        let mut d = d;
        d.keywords = "drill\n18v, tools".into();
        match d.to_payload() {
            AttachmentPayload::Seo(s) => assert_eq!(s.keywords, vec!["drill", "18v", "tools"]),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_target_id_maps_per_kind() {
        let mut d = AttachmentDraft::new(AttachmentKind::Related);
        d.target_id = "p-2".into();
        d.relation = RelationKind::CrossSell;
        assert_eq!(
            d.to_payload(),
            AttachmentPayload::Related(RelatedPayload {
                related_product_id: "p-2".into(),
                relation: RelationKind::CrossSell,
            })
        );

        let spec = AttachmentPayload::Specification(SpecValuePayload {
            specification_id: "s-1".into(),
            value: "1.8".into(),
        });
        let d = AttachmentDraft::from_payload(&spec, 0);
        assert_eq!(d.target_id, "s-1");
        assert_eq!(d.to_payload(), spec);
    }
}
