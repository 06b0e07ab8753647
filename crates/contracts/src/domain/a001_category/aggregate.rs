use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use crate::shared::hierarchy::{HierarchyItem, TreeNode};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::aggregate_id!(CategoryId);

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Category {
    pub fn new_for_insert(dto: &CategoryDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("CAT-{}", &CategoryId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(CategoryId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            parent_id: opt(dto.parent_id.clone()),
            sort_order: dto.sort_order,
            is_active: dto.is_active,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CategoryDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.parent_id = opt(dto.parent_id.clone());
        self.sort_order = dto.sort_order;
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Category name is required")?;
        if self.parent_id.as_deref() == Some(self.to_string_id().as_str()) {
            return Err("A category cannot be its own parent".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    pub fn to_dto(&self) -> CategoryDto {
        CategoryDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            parent_id: self.parent_id.clone(),
            sort_order: self.sort_order,
            is_active: self.is_active,
        }
    }
}

crate::impl_aggregate_root!(Category, CategoryId, "a001", "category", "Category", "Categories");

impl HierarchyItem for Category {
    fn node_id(&self) -> String {
        self.to_string_id()
    }

    fn parent_node_id(&self) -> Option<String> {
        self.parent_id.clone()
    }

    fn sort_key(&self) -> String {
        // sort_order первым, дополняем нулями для строкового сравнения
        format!("{:08}|{}", self.sort_order.max(0), self.base.description)
    }
}

/// Узел дерева категорий для `/api/category/tree`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub children: Vec<CategoryTreeNode>,
}

impl From<TreeNode<Category>> for CategoryTreeNode {
    fn from(node: TreeNode<Category>) -> Self {
        Self {
            category: node.item,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for CategoryDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            parent_id: None,
            sort_order: 0,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_generates_code() {
        let dto = CategoryDto {
            description: "Power tools".into(),
            parent_id: Some("  ".into()),
            ..Default::default()
        };
        let cat = Category::new_for_insert(&dto);
        assert!(cat.base.code.starts_with("CAT-"));
        assert_eq!(cat.parent_id, None);
        assert!(cat.validate().is_ok());
    }

    #[test]
    fn test_category_cannot_parent_itself() {
        let mut cat = Category::new_for_insert(&CategoryDto {
            description: "Tools".into(),
            ..Default::default()
        });
        let mut dto = cat.to_dto();
        dto.parent_id = Some(cat.to_string_id());
        cat.update(&dto);
        assert!(cat.validate().is_err());
    }

    #[test]
    fn test_sort_key_orders_by_sort_order_first() {
        let mut a = Category::new_for_insert(&CategoryDto {
            description: "Zeta".into(),
            ..Default::default()
        });
        a.sort_order = 1;
        let mut b = Category::new_for_insert(&CategoryDto {
            description: "Alpha".into(),
            ..Default::default()
        });
        b.sort_order = 2;
        assert!(a.sort_key() < b.sort_key());
    }

    #[test]
    fn test_tree_node_serializes_flat_with_children() {
        let parent = Category::new_for_insert(&CategoryDto {
            description: "Tools".into(),
            ..Default::default()
        });
        let child = Category::new_for_insert(&CategoryDto {
            description: "Drills".into(),
            parent_id: Some(parent.to_string_id()),
            ..Default::default()
        });
        let forest = crate::shared::hierarchy::build_tree(vec![child, parent]);
        let nodes: Vec<CategoryTreeNode> = forest.into_iter().map(Into::into).collect();
        let json = serde_json::to_value(&nodes).unwrap();
        assert_eq!(json[0]["description"], "Tools");
        assert_eq!(json[0]["children"][0]["description"], "Drills");
    }
}
