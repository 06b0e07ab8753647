use super::repository;
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, CategoryTreeNode};
use contracts::shared::hierarchy::{build_tree, descendants_of};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;

/// Родитель должен существовать и не быть потомком категории
fn check_parent(
    category_id: &str,
    parent_id: Option<&str>,
    all: &[Category],
) -> ServiceResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if !all.iter().any(|c| c.to_string_id() == parent_id) {
        return Err(ServiceError::Validation(format!(
            "Parent category {} does not exist",
            parent_id
        )));
    }
    if descendants_of(all, category_id).iter().any(|d| d == parent_id) {
        return Err(ServiceError::Validation(
            "A category cannot be moved under its own subcategory".into(),
        ));
    }
    Ok(())
}

pub async fn create(dto: CategoryDto) -> ServiceResult<Uuid> {
    let mut aggregate = Category::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    let all = repository::list_all().await?;
    check_parent(&aggregate.to_string_id(), aggregate.parent_id.as_deref(), &all)?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    logger::log("category", &format!("Category '{}' created", aggregate.base.description));
    Ok(id)
}

pub async fn update(dto: CategoryDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    let all = repository::list_all().await?;
    check_parent(&aggregate.to_string_id(), aggregate.parent_id.as_deref(), &all)?;

    aggregate.before_write();
    repository::update(&aggregate).await?;
    Ok(())
}

/// Мягкое удаление; подкатегории переходят к родителю удалённой
pub async fn delete(id: Uuid) -> ServiceResult<()> {
    let aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;

    let txn = get_connection().begin().await?;
    let moved = repository::reparent_children(&txn, id, aggregate.parent_id.clone()).await?;
    repository::soft_delete(&txn, id).await?;
    txn.commit().await?;
    tracing::info!(
        "Category {} deleted, {} subcategories moved up",
        aggregate.base.description,
        moved
    );
    logger::log("category", &format!("Category '{}' deleted", aggregate.base.description));
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Category> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))
}

pub async fn list_all() -> ServiceResult<Vec<Category>> {
    Ok(repository::list_all().await?)
}

/// Дерево категорий
pub async fn tree() -> ServiceResult<Vec<CategoryTreeNode>> {
    let all = repository::list_all().await?;
    Ok(build_tree(all).into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, parent: Option<&Category>) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            ..Default::default()
        })
    }

    #[test]
    fn test_check_parent_rejects_descendant() {
        let tools = cat("Tools", None);
        let drills = cat("Drills", Some(&tools));
        let cordless = cat("Cordless", Some(&drills));
        let all = vec![tools.clone(), drills.clone(), cordless.clone()];

        let err = check_parent(&tools.to_string_id(), Some(&cordless.to_string_id()), &all);
        assert!(matches!(err, Err(ServiceError::Validation(_))));

        assert!(check_parent(&cordless.to_string_id(), Some(&tools.to_string_id()), &all).is_ok());
        assert!(check_parent(&tools.to_string_id(), None, &all).is_ok());
    }

    #[test]
    fn test_check_parent_must_exist() {
        let tools = cat("Tools", None);
        let err = check_parent(
            &tools.to_string_id(),
            Some("00000000-0000-0000-0000-000000000001"),
            &[tools.clone()],
        );
        assert!(matches!(err, Err(ServiceError::Validation(_))));
    }
}
