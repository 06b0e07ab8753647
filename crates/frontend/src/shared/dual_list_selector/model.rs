//! Строки двухпанельного выбора области действия
//!
//! Чистые функции без сигналов: левая панель (дерево категорий с товарами
//! или плоский результат поиска) и правая (включённые и исключённые).

use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a006_product::aggregate::Product;
use contracts::shared::hierarchy::{ancestors_of, build_tree, HierarchyItem, TreeNode};
use contracts::shared::scope::{PricingScope, ScopeItemKind, ScopeMode, ScopeState};
use std::collections::{HashMap, HashSet};

/// Предел строк в режиме поиска
pub const SEARCH_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub sort_order: i32,
}

impl HierarchyItem for CategoryNode {
    fn node_id(&self) -> String {
        self.id.clone()
    }

    fn parent_node_id(&self) -> Option<String> {
        self.parent_id.clone()
    }

    fn sort_key(&self) -> String {
        format!("{:08}|{}", self.sort_order.max(0), self.name)
    }
}

impl From<&Category> for CategoryNode {
    fn from(c: &Category) -> Self {
        Self {
            id: c.to_string_id(),
            parent_id: c.parent_id.clone(),
            name: c.base.description.clone(),
            sort_order: c.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category_id: Option<String>,
}

impl From<&Product> for ProductEntry {
    fn from(p: &Product) -> Self {
        Self {
            id: p.to_string_id(),
            sku: p.sku().to_string(),
            name: p.base.description.clone(),
            category_id: p.category_id.clone(),
        }
    }
}

/// Строка левой панели
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseRow {
    pub kind: ScopeItemKind,
    pub id: String,
    pub label: String,
    /// SKU для товара
    pub secondary: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    /// Собственное положение в наборе
    pub state: ScopeState,
    /// Положение, унаследованное от категорий-предков
    pub inherited: Option<ScopeState>,
}

/// Строка правой панели
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedRow {
    pub kind: ScopeItemKind,
    pub id: String,
    pub label: String,
    pub mode: ScopeMode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedGroups {
    pub included: Vec<SelectedRow>,
    pub excluded: Vec<SelectedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeAction {
    Include(ScopeItemKind, String),
    Exclude(ScopeItemKind, String),
    Remove(ScopeItemKind, String),
    Clear,
}

pub fn apply_action(scope: &mut PricingScope, action: &ScopeAction) {
    match action {
        ScopeAction::Include(kind, id) => scope.include(*kind, id),
        ScopeAction::Exclude(kind, id) => scope.exclude(*kind, id),
        ScopeAction::Remove(kind, id) => scope.remove(*kind, id),
        ScopeAction::Clear => scope.clear(),
    }
}

pub fn toggle_expanded(expanded: &mut HashSet<String>, id: &str) {
    if !expanded.remove(id) {
        expanded.insert(id.to_string());
    }
}

/// Что потомок наследует от категории: исключение сильнее включения
fn pass_down(inherited: Option<ScopeState>, own: ScopeState) -> Option<ScopeState> {
    if inherited == Some(ScopeState::Excluded) || own == ScopeState::Excluded {
        Some(ScopeState::Excluded)
    } else if inherited == Some(ScopeState::Included) || own == ScopeState::Included {
        Some(ScopeState::Included)
    } else {
        None
    }
}

/// Унаследованное положение по цепочке категорий
fn inherited_from_chain(scope: &PricingScope, chain: &[String]) -> Option<ScopeState> {
    chain.iter().fold(None, |acc, id| {
        pass_down(acc, scope.state_of(ScopeItemKind::Category, id))
    })
}

fn product_row(
    p: &ProductEntry,
    scope: &PricingScope,
    depth: usize,
    inherited: Option<ScopeState>,
) -> BrowseRow {
    BrowseRow {
        kind: ScopeItemKind::Product,
        id: p.id.clone(),
        label: p.name.clone(),
        secondary: Some(p.sku.clone()).filter(|s| !s.is_empty()),
        depth,
        has_children: false,
        expanded: false,
        state: scope.state_of(ScopeItemKind::Product, &p.id),
        inherited,
    }
}

/// Дерево категорий, товары под своей категорией после подкатегорий
///
/// Товары без категории (или с неизвестной) идут в конце на верхнем уровне.
pub fn browse_rows(
    categories: &[CategoryNode],
    products: &[ProductEntry],
    scope: &PricingScope,
    expanded: &HashSet<String>,
) -> Vec<BrowseRow> {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

    let mut by_category: HashMap<&str, Vec<&ProductEntry>> = HashMap::new();
    let mut uncategorized: Vec<&ProductEntry> = Vec::new();
    for p in products {
        match p.category_id.as_deref().filter(|c| known.contains(c)) {
            Some(cid) => by_category.entry(cid).or_default().push(p),
            None => uncategorized.push(p),
        }
    }
    for list in by_category.values_mut() {
        list.sort_by_key(|p| p.name.to_lowercase());
    }
    uncategorized.sort_by_key(|p| p.name.to_lowercase());

    fn walk(
        nodes: &[TreeNode<CategoryNode>],
        depth: usize,
        inherited: Option<ScopeState>,
        ctx: (&HashMap<&str, Vec<&ProductEntry>>, &PricingScope, &HashSet<String>),
        out: &mut Vec<BrowseRow>,
    ) {
        let (by_category, scope, expanded) = ctx;
        for node in nodes {
            let id = &node.item.id;
            let products = by_category.get(id.as_str());
            let state = scope.state_of(ScopeItemKind::Category, id);
            let open = expanded.contains(id);
            out.push(BrowseRow {
                kind: ScopeItemKind::Category,
                id: id.clone(),
                label: node.item.name.clone(),
                secondary: None,
                depth,
                has_children: !node.children.is_empty() || products.is_some_and(|p| !p.is_empty()),
                expanded: open,
                state,
                inherited,
            });
            if !open {
                continue;
            }
            let below = pass_down(inherited, state);
            walk(&node.children, depth + 1, below, ctx, out);
            for p in products.into_iter().flatten() {
                out.push(product_row(p, scope, depth + 1, below));
            }
        }
    }

    let tree = build_tree(categories.to_vec());
    let mut out = Vec::new();
    walk(&tree, 0, None, (&by_category, scope, expanded), &mut out);
    for p in uncategorized {
        out.push(product_row(p, scope, 0, None));
    }
    out
}

/// Путь категории от корня: «Tools / Drills»
pub fn category_path(categories: &[CategoryNode], id: &str) -> Option<String> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    let own = *names.get(id)?;
    let mut parts: Vec<&str> = ancestors_of(categories, id)
        .iter()
        .filter_map(|a| names.get(a.as_str()).copied())
        .collect();
    parts.reverse();
    parts.push(own);
    Some(parts.join(" / "))
}

/// Плоский результат поиска: сначала категории (с путём), затем товары
///
/// Пустой запрос даёт пустой список: панель возвращается к дереву.
pub fn search_rows(
    categories: &[CategoryNode],
    products: &[ProductEntry],
    scope: &PricingScope,
    query: &str,
) -> Vec<BrowseRow> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut cats: Vec<BrowseRow> = categories
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q))
        .map(|c| {
            let chain = ancestors_of(categories, &c.id);
            BrowseRow {
                kind: ScopeItemKind::Category,
                id: c.id.clone(),
                label: category_path(categories, &c.id).unwrap_or_else(|| c.name.clone()),
                secondary: None,
                depth: 0,
                has_children: false,
                expanded: false,
                state: scope.state_of(ScopeItemKind::Category, &c.id),
                inherited: inherited_from_chain(scope, &chain),
            }
        })
        .collect();
    cats.sort_by_key(|r| r.label.to_lowercase());

    let mut prods: Vec<BrowseRow> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&q) || p.sku.to_lowercase().contains(&q))
        .map(|p| {
            let chain = product_chain(categories, p);
            product_row(p, scope, 0, inherited_from_chain(scope, &chain))
        })
        .collect();
    prods.sort_by_key(|r| r.label.to_lowercase());

    cats.into_iter().chain(prods).take(SEARCH_LIMIT).collect()
}

/// Категория товара и её предки, от корня к товару
fn product_chain(categories: &[CategoryNode], p: &ProductEntry) -> Vec<String> {
    match p.category_id.as_deref() {
        Some(cid) if categories.iter().any(|c| c.id == cid) => {
            let mut chain = ancestors_of(categories, cid);
            chain.reverse();
            chain.push(cid.to_string());
            chain
        }
        _ => Vec::new(),
    }
}

fn missing_label(id: &str) -> String {
    format!("[missing] {}", id)
}

/// Правая панель: в каждой группе категории раньше товаров, по алфавиту
pub fn selected_rows(
    categories: &[CategoryNode],
    products: &[ProductEntry],
    scope: &PricingScope,
) -> SelectedGroups {
    let product_label = |id: &str| -> String {
        products
            .iter()
            .find(|p| p.id == id)
            .map(|p| {
                if p.sku.is_empty() {
                    p.name.clone()
                } else {
                    format!("{} ({})", p.name, p.sku)
                }
            })
            .unwrap_or_else(|| missing_label(id))
    };
    let category_label =
        |id: &str| category_path(categories, id).unwrap_or_else(|| missing_label(id));

    let group = |mode: ScopeMode, cat_ids: &[String], prod_ids: &[String]| -> Vec<SelectedRow> {
        let mut cats: Vec<SelectedRow> = cat_ids
            .iter()
            .map(|id| SelectedRow {
                kind: ScopeItemKind::Category,
                id: id.clone(),
                label: category_label(id),
                mode,
            })
            .collect();
        cats.sort_by_key(|r| r.label.to_lowercase());
        let mut prods: Vec<SelectedRow> = prod_ids
            .iter()
            .map(|id| SelectedRow {
                kind: ScopeItemKind::Product,
                id: id.clone(),
                label: product_label(id),
                mode,
            })
            .collect();
        prods.sort_by_key(|r| r.label.to_lowercase());
        cats.extend(prods);
        cats
    };

    SelectedGroups {
        included: group(
            ScopeMode::Include,
            &scope.included_categories,
            &scope.included_products,
        ),
        excluded: group(
            ScopeMode::Exclude,
            &scope.excluded_categories,
            &scope.excluded_products,
        ),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// Краткое описание набора; без включений действует на весь каталог
pub fn scope_summary(scope: &PricingScope) -> String {
    let excluded = scope.excluded_products.len() + scope.excluded_categories.len();
    let head = if scope.has_inclusions() {
        format!(
            "{}, {}",
            plural(scope.included_categories.len(), "category", "categories"),
            plural(scope.included_products.len(), "product", "products")
        )
    } else {
        "All products".to_string()
    };
    if excluded > 0 {
        format!("{}, {} excluded", head, excluded)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, parent: Option<&str>, name: &str) -> CategoryNode {
        CategoryNode {
            id: id.into(),
            parent_id: parent.map(String::from),
            name: name.into(),
            sort_order: 0,
        }
    }

    fn prod(id: &str, sku: &str, name: &str, category: Option<&str>) -> ProductEntry {
        ProductEntry {
            id: id.into(),
            sku: sku.into(),
            name: name.into(),
            category_id: category.map(String::from),
        }
    }

    fn catalog() -> (Vec<CategoryNode>, Vec<ProductEntry>) {
        (
            vec![
                cat("tools", None, "Tools"),
                cat("drills", Some("tools"), "Drills"),
                cat("garden", None, "Garden"),
            ],
            vec![
                prod("p1", "DR-1", "Hammer drill", Some("drills")),
                prod("p2", "TL-9", "Adjustable wrench", Some("tools")),
                prod("p3", "X-1", "Gift card", None),
                prod("p4", "X-2", "Lost item", Some("deleted-category")),
            ],
        )
    }

    fn ids(rows: &[BrowseRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_collapsed_tree_shows_roots_and_uncategorized() {
        let (cats, prods) = catalog();
        let rows = browse_rows(&cats, &prods, &PricingScope::default(), &HashSet::new());
        assert_eq!(ids(&rows), vec!["garden", "tools", "p3", "p4"]);
        assert!(!rows[0].has_children);
        assert!(rows[1].has_children);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn test_expanded_category_lists_subcategories_then_products() {
        let (cats, prods) = catalog();
        let mut expanded = HashSet::new();
        toggle_expanded(&mut expanded, "tools");
        let rows = browse_rows(&cats, &prods, &PricingScope::default(), &expanded);
        assert_eq!(ids(&rows), vec!["garden", "tools", "drills", "p2", "p3", "p4"]);
        assert_eq!(rows[2].depth, 1);
        assert_eq!(rows[3].kind, ScopeItemKind::Product);
        assert_eq!(rows[3].secondary.as_deref(), Some("TL-9"));

        toggle_expanded(&mut expanded, "tools");
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_inherited_state_exclusion_wins() {
        let (cats, prods) = catalog();
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "tools");
        scope.exclude(ScopeItemKind::Category, "drills");
        let expanded: HashSet<String> = ["tools", "drills"].iter().map(|s| s.to_string()).collect();

        let rows = browse_rows(&cats, &prods, &scope, &expanded);
        let by_id = |id: &str| rows.iter().find(|r| r.id == id).cloned();

        let drills = by_id("drills").unwrap();
        assert_eq!(drills.state, ScopeState::Excluded);
        assert_eq!(drills.inherited, Some(ScopeState::Included));

        let p1 = by_id("p1").unwrap();
        assert_eq!(p1.state, ScopeState::Unassigned);
        assert_eq!(p1.inherited, Some(ScopeState::Excluded));

        assert_eq!(by_id("p2").unwrap().inherited, Some(ScopeState::Included));
        assert_eq!(by_id("p3").unwrap().inherited, None);
    }

    #[test]
    fn test_search_matches_name_and_sku() {
        let (cats, prods) = catalog();
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "tools");

        assert!(search_rows(&cats, &prods, &scope, "   ").is_empty());

        let rows = search_rows(&cats, &prods, &scope, "dr");
        assert_eq!(ids(&rows), vec!["drills", "p1"]);
        assert_eq!(rows[0].label, "Tools / Drills");
        assert_eq!(rows[0].inherited, Some(ScopeState::Included));
        assert_eq!(rows[1].inherited, Some(ScopeState::Included));

        let rows = search_rows(&cats, &prods, &scope, "x-2");
        assert_eq!(ids(&rows), vec!["p4"]);
        assert_eq!(rows[0].inherited, None);
    }

    #[test]
    fn test_selected_rows_groups_and_missing() {
        let (cats, prods) = catalog();
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Product, "p1");
        scope.include(ScopeItemKind::Category, "drills");
        scope.exclude(ScopeItemKind::Product, "gone");

        let groups = selected_rows(&cats, &prods, &scope);
        let labels: Vec<&str> = groups.included.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Tools / Drills", "Hammer drill (DR-1)"]);
        assert_eq!(groups.excluded.len(), 1);
        assert_eq!(groups.excluded[0].label, "[missing] gone");
        assert_eq!(groups.excluded[0].mode, ScopeMode::Exclude);
    }

    #[test]
    fn test_apply_action_moves_between_lists() {
        let mut scope = PricingScope::default();
        apply_action(&mut scope, &ScopeAction::Include(ScopeItemKind::Product, "p1".into()));
        apply_action(&mut scope, &ScopeAction::Exclude(ScopeItemKind::Product, "p1".into()));
        assert!(scope.included_products.is_empty());
        assert_eq!(scope.excluded_products, vec!["p1"]);

        apply_action(&mut scope, &ScopeAction::Remove(ScopeItemKind::Product, "p1".into()));
        assert!(scope.is_empty());

        apply_action(&mut scope, &ScopeAction::Include(ScopeItemKind::Category, "c".into()));
        apply_action(&mut scope, &ScopeAction::Clear);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_scope_summary() {
        let mut scope = PricingScope::default();
        assert_eq!(scope_summary(&scope), "All products");
        scope.exclude(ScopeItemKind::Category, "garden");
        assert_eq!(scope_summary(&scope), "All products, 1 excluded");
        scope.include(ScopeItemKind::Category, "tools");
        scope.include(ScopeItemKind::Product, "p1");
        scope.include(ScopeItemKind::Product, "p2");
        assert_eq!(scope_summary(&scope), "1 category, 2 products, 1 excluded");
    }
}
