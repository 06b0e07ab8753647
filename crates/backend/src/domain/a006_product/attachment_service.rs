//! Сохранение дочерних записей товара
//!
//! Правила уникальности (SEO одно на товар, описание одно на локаль,
//! одна связь на связанный товар, одно значение на спецификацию и
//! характеристику) сводятся к ключу `AttachmentPayload::replace_key`:
//! запись с тем же ключом заменяется.

use chrono::{DateTime, Utc};
use contracts::domain::a006_product::attachment::{
    AttachmentPayload, ProductAttachment, ProductAttachmentDto,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::{attachment_repository, repository};
use crate::domain::{a002_attribute, a003_specification};
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;

/// Что нужно записать, чтобы сохранить вложение
#[derive(Debug, Clone)]
pub struct SavePlan {
    pub attachment: ProductAttachment,
    pub is_new: bool,
    /// Записи с тем же ключом, которые удаляются
    pub replaced_ids: Vec<String>,
    /// Изображения, потерявшие флаг основного
    pub demoted: Vec<ProductAttachment>,
}

pub fn plan_save(
    product_id: &str,
    dto: ProductAttachmentDto,
    existing: &[ProductAttachment],
    now: DateTime<Utc>,
) -> ServiceResult<SavePlan> {
    let mut payload = dto.payload;
    payload.normalize_ids();
    payload
        .validate(product_id)
        .map_err(ServiceError::Validation)?;
    let kind = payload.kind();

    let mut target: Option<ProductAttachment> = match dto.id.as_deref() {
        Some(id) => {
            let found = existing
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| ServiceError::not_found("Attachment"))?;
            if found.kind() != kind {
                return Err(ServiceError::BadRequest(format!(
                    "Attachment {} is a {}, not a {}",
                    id,
                    found.kind().as_str(),
                    kind.as_str()
                )));
            }
            Some(found.clone())
        }
        None => None,
    };

    let same_kind: Vec<&ProductAttachment> =
        existing.iter().filter(|a| a.kind() == kind).collect();

    let mut replaced_ids = Vec::new();
    if let Some(key) = payload.replace_key() {
        for other in same_kind.iter() {
            if other.payload.replace_key().as_deref() != Some(key.as_str()) {
                continue;
            }
            if target.as_ref().map(|t| t.id == other.id).unwrap_or(false) {
                continue;
            }
            if target.is_none() {
                // Новая запись с занятым ключом становится правкой существующей
                target = Some((*other).clone());
            } else {
                replaced_ids.push(other.id.clone());
            }
        }
    }

    // Первое изображение товара всегда основное
    if let AttachmentPayload::Image(img) = &mut payload {
        let has_other_images = same_kind
            .iter()
            .any(|a| target.as_ref().map(|t| t.id != a.id).unwrap_or(true));
        if !has_other_images {
            img.is_primary = true;
        }
    }

    let is_new = target.is_none();
    let attachment = match target {
        Some(mut current) => {
            current.payload = payload;
            current.sort_order = dto.sort_order;
            current.updated_at = now;
            current
        }
        None => {
            let sort_order = if dto.sort_order != 0 {
                dto.sort_order
            } else {
                same_kind
                    .iter()
                    .map(|a| a.sort_order)
                    .max()
                    .map(|m| m + 1)
                    .unwrap_or(0)
            };
            ProductAttachment {
                id: Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                sort_order,
                payload,
                created_at: now,
                updated_at: now,
            }
        }
    };

    let mut demoted = Vec::new();
    if let AttachmentPayload::Image(img) = &attachment.payload {
        if img.is_primary {
            for other in same_kind.iter().filter(|a| a.id != attachment.id) {
                if let AttachmentPayload::Image(other_img) = &other.payload {
                    if other_img.is_primary {
                        let mut changed = (*other).clone();
                        let mut flag_off = other_img.clone();
                        flag_off.is_primary = false;
                        changed.payload = AttachmentPayload::Image(flag_off);
                        changed.updated_at = now;
                        demoted.push(changed);
                    }
                }
            }
        }
    }

    Ok(SavePlan {
        attachment,
        is_new,
        replaced_ids,
        demoted,
    })
}

/// Проверки, требующие обращения к другим справочникам
async fn check_references(product_id: Uuid, payload: &AttachmentPayload) -> ServiceResult<()> {
    match payload {
        AttachmentPayload::Related(r) => {
            let target = parse_uuid(&r.related_product_id)?;
            if target == product_id {
                return Err(ServiceError::Validation(
                    "A product cannot be related to itself".into(),
                ));
            }
            if repository::get_by_id(target).await?.is_none() {
                return Err(ServiceError::Validation(format!(
                    "Related product {} does not exist",
                    r.related_product_id
                )));
            }
        }
        AttachmentPayload::Specification(s) => {
            let spec_id = parse_uuid(&s.specification_id)?;
            if a003_specification::repository::get_by_id(spec_id)
                .await?
                .is_none()
            {
                return Err(ServiceError::Validation(format!(
                    "Specification {} does not exist",
                    s.specification_id
                )));
            }
        }
        AttachmentPayload::Attribute(a) => {
            let attr_id = parse_uuid(&a.attribute_id)?;
            let attribute = a002_attribute::repository::get_by_id(attr_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::Validation(format!(
                        "Attribute {} does not exist",
                        a.attribute_id
                    ))
                })?;
            attribute
                .check_value(&a.value)
                .map_err(ServiceError::Validation)?;
        }
        _ => {}
    }
    Ok(())
}

async fn ensure_product(product_id: Uuid) -> ServiceResult<()> {
    match repository::get_by_id(product_id).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("Product")),
    }
}

pub async fn list(product_id: Uuid) -> ServiceResult<Vec<ProductAttachment>> {
    ensure_product(product_id).await?;
    Ok(
        attachment_repository::list_for_product(get_connection(), &product_id.to_string(), None)
            .await?,
    )
}

/// Сохранить вложение; возвращает его id
pub async fn save(product_id: Uuid, mut dto: ProductAttachmentDto) -> ServiceResult<String> {
    ensure_product(product_id).await?;
    dto.payload.normalize_ids();
    check_references(product_id, &dto.payload).await?;

    let pid = product_id.to_string();
    let txn = get_connection().begin().await?;
    let existing = attachment_repository::list_for_product(&txn, &pid, None).await?;
    let plan = plan_save(&pid, dto, &existing, Utc::now())?;

    attachment_repository::delete_many(&txn, &plan.replaced_ids).await?;
    for other in &plan.demoted {
        attachment_repository::update(&txn, other).await?;
    }
    if plan.is_new {
        attachment_repository::insert(&txn, &plan.attachment).await?;
    } else {
        attachment_repository::update(&txn, &plan.attachment).await?;
    }
    txn.commit().await?;

    tracing::info!(
        "Product {}: {} attachment {} {}",
        pid,
        plan.attachment.kind().as_str(),
        plan.attachment.id,
        if plan.is_new { "added" } else { "updated" }
    );
    logger::log(
        "product",
        &format!("{} saved for product {}", plan.attachment.kind().title(), pid),
    );
    Ok(plan.attachment.id)
}

pub async fn delete(attachment_id: &str) -> ServiceResult<()> {
    if attachment_repository::delete(get_connection(), attachment_id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("Attachment"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_product::attachment::{
        AttachmentKind, DescriptionPayload, ImagePayload, RelatedPayload, RelationKind,
        SeoPayload,
    };

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn dto(payload: AttachmentPayload) -> ProductAttachmentDto {
        ProductAttachmentDto {
            id: None,
            sort_order: 0,
            payload,
        }
    }

    fn image(url: &str, primary: bool) -> AttachmentPayload {
        AttachmentPayload::Image(ImagePayload {
            url: url.into(),
            alt_text: String::new(),
            is_primary: primary,
        })
    }

    fn apply(existing: &mut Vec<ProductAttachment>, plan: SavePlan) {
        existing.retain(|a| !plan.replaced_ids.contains(&a.id));
        for d in plan.demoted {
            if let Some(slot) = existing.iter_mut().find(|a| a.id == d.id) {
                *slot = d;
            }
        }
        match existing.iter_mut().find(|a| a.id == plan.attachment.id) {
            Some(slot) => *slot = plan.attachment,
            None => existing.push(plan.attachment),
        }
    }

    fn primaries(existing: &[ProductAttachment]) -> Vec<String> {
        existing
            .iter()
            .filter_map(|a| match &a.payload {
                AttachmentPayload::Image(i) if i.is_primary => Some(i.url.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_image_becomes_primary_and_only_one_primary() {
        let mut existing = Vec::new();
        let plan = plan_save("p1", dto(image("a.jpg", false)), &existing, now()).unwrap();
        assert!(plan.is_new);
        apply(&mut existing, plan);
        assert_eq!(primaries(&existing), vec!["a.jpg"]);

        let plan = plan_save("p1", dto(image("b.jpg", false)), &existing, now()).unwrap();
        assert_eq!(plan.attachment.sort_order, 1);
        apply(&mut existing, plan);
        assert_eq!(primaries(&existing), vec!["a.jpg"]);

        let plan = plan_save("p1", dto(image("c.jpg", true)), &existing, now()).unwrap();
        assert_eq!(plan.demoted.len(), 1);
        apply(&mut existing, plan);
        assert_eq!(primaries(&existing), vec!["c.jpg"]);
        assert_eq!(existing.len(), 3);
    }

    #[test]
    fn test_seo_is_singleton() {
        let mut existing = Vec::new();
        let seo = |slug: &str| {
            AttachmentPayload::Seo(SeoPayload {
                slug: slug.into(),
                ..Default::default()
            })
        };
        let plan = plan_save("p1", dto(seo("drill")), &existing, now()).unwrap();
        apply(&mut existing, plan);
        let first_id = existing[0].id.clone();

        let plan = plan_save("p1", dto(seo("cordless-drill")), &existing, now()).unwrap();
        assert!(!plan.is_new);
        assert_eq!(plan.attachment.id, first_id);
        apply(&mut existing, plan);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].payload.summary(), "cordless-drill");
    }

    #[test]
    fn test_description_one_per_locale() {
        let mut existing = Vec::new();
        let desc = |locale: &str, body: &str| {
            AttachmentPayload::Description(DescriptionPayload {
                locale: locale.into(),
                title: String::new(),
                body: body.into(),
            })
        };
        for (locale, body) in [("en", "one"), ("de", "eins"), ("EN", "two")] {
            let plan = plan_save("p1", dto(desc(locale, body)), &existing, now()).unwrap();
            apply(&mut existing, plan);
        }
        assert_eq!(existing.len(), 2);

        // Правка немецкого описания на английскую локаль вытесняет английское
        let de_id = existing
            .iter()
            .find(|a| a.payload.replace_key().as_deref() == Some("de"))
            .map(|a| a.id.clone())
            .unwrap();
        let mut edit = dto(desc("en", "three"));
        edit.id = Some(de_id.clone());
        let plan = plan_save("p1", edit, &existing, now()).unwrap();
        assert_eq!(plan.replaced_ids.len(), 1);
        apply(&mut existing, plan);
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].id, de_id);
    }

    #[test]
    fn test_edit_errors() {
        let mut existing = Vec::new();
        let plan = plan_save("p1", dto(image("a.jpg", false)), &existing, now()).unwrap();
        apply(&mut existing, plan);

        let mut wrong_kind = dto(AttachmentPayload::empty(AttachmentKind::Feature));
        if let AttachmentPayload::Feature(h) = &mut wrong_kind.payload {
            h.title = "Fast".into();
        }
        wrong_kind.id = Some(existing[0].id.clone());
        assert!(matches!(
            plan_save("p1", wrong_kind, &existing, now()),
            Err(ServiceError::BadRequest(_))
        ));

        let mut missing = dto(image("b.jpg", false));
        missing.id = Some("nope".into());
        assert!(matches!(
            plan_save("p1", missing, &existing, now()),
            Err(ServiceError::NotFound(_))
        ));

        assert!(matches!(
            plan_save("p1", dto(image(" ", false)), &existing, now()),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_related_link_is_unique_regardless_of_id_case() {
        let mut existing = Vec::new();
        let link = |target: &str, relation: RelationKind| {
            AttachmentPayload::Related(RelatedPayload {
                related_product_id: target.into(),
                relation,
            })
        };
        let plan = plan_save(
            "p1",
            dto(link("550e8400-e29b-41d4-a716-446655440000", RelationKind::Accessory)),
            &existing,
            now(),
        )
        .unwrap();
        apply(&mut existing, plan);

        let plan = plan_save(
            "p1",
            dto(link(" 550E8400-E29B-41D4-A716-446655440000 ", RelationKind::UpSell)),
            &existing,
            now(),
        )
        .unwrap();
        assert!(!plan.is_new);
        assert!(plan.replaced_ids.is_empty());
        apply(&mut existing, plan);

        assert_eq!(existing.len(), 1);
        match &existing[0].payload {
            AttachmentPayload::Related(r) => {
                assert_eq!(r.related_product_id, "550e8400-e29b-41d4-a716-446655440000");
                assert_eq!(r.relation, RelationKind::UpSell);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
