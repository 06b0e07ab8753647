//! Строки дерева категорий для отрисовки

use contracts::domain::a001_category::aggregate::Category;
use contracts::shared::hierarchy::{build_tree, filter_tree, flatten, TreeNode};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub version: i32,
}

fn matches(category: &Category, needle: &str) -> bool {
    category.base.description.to_lowercase().contains(needle)
        || category.base.code.to_lowercase().contains(needle)
}

/// Видимые строки
///
/// С непустым фильтром остаются совпавшие категории с предками,
/// и дерево показывается раскрытым целиком.
pub fn tree_rows(categories: &[Category], expanded: &HashSet<String>, filter: &str) -> Vec<TreeRow> {
    let needle = filter.trim().to_lowercase();
    let tree = build_tree(categories.to_vec());
    let (tree, open_all): (Vec<TreeNode<Category>>, bool) = if needle.is_empty() {
        (tree, false)
    } else {
        (filter_tree(&tree, &|c: &Category| matches(c, &needle)), true)
    };

    let rows = if open_all {
        flatten(&tree, None)
    } else {
        flatten(&tree, Some(expanded))
    };
    rows.into_iter()
        .map(|row| {
            let id = row.item.to_string_id();
            TreeRow {
                expanded: row.has_children && (open_all || expanded.contains(&id)),
                id,
                code: row.item.base.code.clone(),
                name: row.item.base.description.clone(),
                sort_order: row.item.sort_order,
                is_active: row.item.is_active,
                depth: row.depth,
                has_children: row.has_children,
                version: row.item.base.metadata.version,
            }
        })
        .collect()
}

/// id всех категорий, у которых есть дети
pub fn all_parent_ids(categories: &[Category]) -> HashSet<String> {
    categories
        .iter()
        .filter_map(|c| c.parent_id.clone())
        .filter(|pid| categories.iter().any(|c| &c.to_string_id() == pid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_category::aggregate::CategoryDto;

    fn category(name: &str, parent: Option<&Category>, sort_order: i32) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            sort_order,
            ..Default::default()
        })
    }

    fn names(rows: &[TreeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_roots_only() {
        let tools = category("Tools", None, 1);
        let drills = category("Drills", Some(&tools), 0);
        let garden = category("Garden", None, 2);
        let all = vec![drills, garden, tools.clone()];

        let rows = tree_rows(&all, &HashSet::new(), "");
        assert_eq!(names(&rows), vec!["Tools", "Garden"]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);

        let open = HashSet::from([tools.to_string_id()]);
        let rows = tree_rows(&all, &open, "");
        assert_eq!(names(&rows), vec!["Tools", "Drills", "Garden"]);
        assert_eq!(rows[1].depth, 1);
        assert!(rows[0].expanded);
    }

    #[test]
    fn test_filter_keeps_ancestors_and_expands() {
        let tools = category("Tools", None, 0);
        let drills = category("Drills", Some(&tools), 0);
        let cordless = category("Cordless drills", Some(&drills), 0);
        let garden = category("Garden", None, 0);
        let all = vec![tools, drills, cordless, garden];

        let rows = tree_rows(&all, &HashSet::new(), "cordless");
        assert_eq!(names(&rows), vec!["Tools", "Drills", "Cordless drills"]);
        assert!(rows[0].expanded);

        assert!(tree_rows(&all, &HashSet::new(), "nothing").is_empty());
    }

    #[test]
    fn test_all_parent_ids() {
        let tools = category("Tools", None, 0);
        let drills = category("Drills", Some(&tools), 0);
        let all = vec![tools.clone(), drills];
        assert_eq!(all_parent_ids(&all), HashSet::from([tools.to_string_id()]));
    }
}
