//! Область действия ценовых конструкций: включения и исключения
//!
//! Ценовые политики, акции, условия поставщиков и правила расчёта цены
//! ограничиваются товарами и категориями. Один id никогда не лежит
//! одновременно во включённых и исключённых одного вида.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeItemKind {
    Product,
    Category,
}

impl ScopeItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeItemKind::Product => "product",
            ScopeItemKind::Category => "category",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "product" => Some(ScopeItemKind::Product),
            "category" => Some(ScopeItemKind::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    Include,
    Exclude,
}

impl ScopeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeMode::Include => "include",
            ScopeMode::Exclude => "exclude",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "include" => Some(ScopeMode::Include),
            "exclude" => Some(ScopeMode::Exclude),
            _ => None,
        }
    }
}

/// Текущее положение элемента в наборе
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Included,
    Excluded,
    Unassigned,
}

/// Строка junction-таблицы
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub item_kind: ScopeItemKind,
    pub mode: ScopeMode,
    pub item_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingScope {
    #[serde(default)]
    pub included_products: Vec<String>,
    #[serde(default)]
    pub included_categories: Vec<String>,
    #[serde(default)]
    pub excluded_products: Vec<String>,
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

fn insert_sorted(list: &mut Vec<String>, id: &str) {
    if let Err(pos) = list.binary_search_by(|x| x.as_str().cmp(id)) {
        list.insert(pos, id.to_string());
    }
}

fn remove_from(list: &mut Vec<String>, id: &str) {
    list.retain(|x| x != id);
}

fn sort_dedup(list: &mut Vec<String>) {
    for v in list.iter_mut() {
        *v = v.trim().to_string();
    }
    list.retain(|v| !v.is_empty());
    list.sort();
    list.dedup();
}

impl PricingScope {
    fn lists_mut(&mut self, kind: ScopeItemKind) -> (&mut Vec<String>, &mut Vec<String>) {
        match kind {
            ScopeItemKind::Product => (&mut self.included_products, &mut self.excluded_products),
            ScopeItemKind::Category => {
                (&mut self.included_categories, &mut self.excluded_categories)
            }
        }
    }

    fn lists(&self, kind: ScopeItemKind) -> (&Vec<String>, &Vec<String>) {
        match kind {
            ScopeItemKind::Product => (&self.included_products, &self.excluded_products),
            ScopeItemKind::Category => (&self.included_categories, &self.excluded_categories),
        }
    }

    /// Добавить во включённые (и убрать из исключённых)
    pub fn include(&mut self, kind: ScopeItemKind, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        let (included, excluded) = self.lists_mut(kind);
        remove_from(excluded, id);
        insert_sorted(included, id);
    }

    /// Добавить в исключённые (и убрать из включённых)
    pub fn exclude(&mut self, kind: ScopeItemKind, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        let (included, excluded) = self.lists_mut(kind);
        remove_from(included, id);
        insert_sorted(excluded, id);
    }

    /// Убрать из обоих списков
    pub fn remove(&mut self, kind: ScopeItemKind, id: &str) {
        let id = id.trim();
        let (included, excluded) = self.lists_mut(kind);
        remove_from(included, id);
        remove_from(excluded, id);
    }

    pub fn state_of(&self, kind: ScopeItemKind, id: &str) -> ScopeState {
        let id = id.trim();
        let (included, excluded) = self.lists(kind);
        if excluded.iter().any(|x| x == id) {
            ScopeState::Excluded
        } else if included.iter().any(|x| x == id) {
            ScopeState::Included
        } else {
            ScopeState::Unassigned
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Сортировка, без дублей и пустых; id из обоих списков остаётся исключённым
    pub fn normalize(&mut self) {
        sort_dedup(&mut self.included_products);
        sort_dedup(&mut self.included_categories);
        sort_dedup(&mut self.excluded_products);
        sort_dedup(&mut self.excluded_categories);
        let excluded_products = self.excluded_products.clone();
        self.included_products
            .retain(|id| excluded_products.binary_search(id).is_err());
        let excluded_categories = self.excluded_categories.clone();
        self.included_categories
            .retain(|id| excluded_categories.binary_search(id).is_err());
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.included_products.len()
            + self.included_categories.len()
            + self.excluded_products.len()
            + self.excluded_categories.len()
    }

    pub fn has_inclusions(&self) -> bool {
        !self.included_products.is_empty() || !self.included_categories.is_empty()
    }

    /// Строки для junction-таблицы
    pub fn entries(&self) -> Vec<ScopeEntry> {
        let mut out = Vec::with_capacity(self.len());
        let groups = [
            (ScopeItemKind::Product, ScopeMode::Include, &self.included_products),
            (ScopeItemKind::Category, ScopeMode::Include, &self.included_categories),
            (ScopeItemKind::Product, ScopeMode::Exclude, &self.excluded_products),
            (ScopeItemKind::Category, ScopeMode::Exclude, &self.excluded_categories),
        ];
        for (item_kind, mode, ids) in groups {
            for id in ids.iter() {
                out.push(ScopeEntry {
                    item_kind,
                    mode,
                    item_id: id.clone(),
                });
            }
        }
        out
    }

    pub fn from_entries<I: IntoIterator<Item = ScopeEntry>>(entries: I) -> Self {
        let mut scope = Self::default();
        for e in entries {
            let list = match (e.item_kind, e.mode) {
                (ScopeItemKind::Product, ScopeMode::Include) => &mut scope.included_products,
                (ScopeItemKind::Category, ScopeMode::Include) => &mut scope.included_categories,
                (ScopeItemKind::Product, ScopeMode::Exclude) => &mut scope.excluded_products,
                (ScopeItemKind::Category, ScopeMode::Exclude) => &mut scope.excluded_categories,
            };
            list.push(e.item_id);
        }
        scope.normalized()
    }

    /// Попадает ли товар в область действия
    ///
    /// `category_chain` - категория товара и все её предки.
    pub fn matches(&self, product_id: &str, category_chain: &[String]) -> bool {
        if self.excluded_products.iter().any(|p| p == product_id) {
            return false;
        }
        if category_chain
            .iter()
            .any(|c| self.excluded_categories.iter().any(|x| x == c))
        {
            return false;
        }
        if !self.has_inclusions() {
            return true;
        }
        self.included_products.iter().any(|p| p == product_id)
            || category_chain
                .iter()
                .any(|c| self.included_categories.iter().any(|x| x == c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_include_then_exclude_moves_item() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Product, "p1");
        assert_eq!(scope.state_of(ScopeItemKind::Product, "p1"), ScopeState::Included);

        scope.exclude(ScopeItemKind::Product, "p1");
        assert_eq!(scope.state_of(ScopeItemKind::Product, "p1"), ScopeState::Excluded);
        assert!(scope.included_products.is_empty());
        assert_eq!(scope.excluded_products, vec!["p1"]);

        scope.remove(ScopeItemKind::Product, "p1");
        assert_eq!(
            scope.state_of(ScopeItemKind::Product, "p1"),
            ScopeState::Unassigned
        );
        assert!(scope.is_empty());
    }

    #[test]
    fn test_remove_trims_id() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "c1");
        scope.exclude(ScopeItemKind::Product, "p1");
        assert_eq!(scope.state_of(ScopeItemKind::Category, " c1 "), ScopeState::Included);

        scope.remove(ScopeItemKind::Category, " c1 ");
        scope.remove(ScopeItemKind::Product, "p1\n");
        assert!(scope.is_empty());
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "same");
        scope.exclude(ScopeItemKind::Product, "same");
        assert_eq!(scope.included_categories, vec!["same"]);
        assert_eq!(scope.excluded_products, vec!["same"]);
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn test_include_is_idempotent_and_sorted() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Product, "b");
        scope.include(ScopeItemKind::Product, "a");
        scope.include(ScopeItemKind::Product, "b");
        scope.include(ScopeItemKind::Product, "  ");
        assert_eq!(scope.included_products, vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_prefers_exclusion() {
        let mut scope = PricingScope {
            included_products: chain(&["p2", "p1", "p1", " "]),
            included_categories: chain(&["c1"]),
            excluded_products: chain(&["p2"]),
            excluded_categories: chain(&["c1", "c2"]),
        };
        scope.normalize();
        assert_eq!(scope.included_products, vec!["p1"]);
        assert!(scope.included_categories.is_empty());
        assert_eq!(scope.excluded_products, vec!["p2"]);
        assert_eq!(scope.excluded_categories, vec!["c1", "c2"]);
    }

    #[test]
    fn test_entries_roundtrip() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "c1");
        scope.include(ScopeItemKind::Product, "p1");
        scope.exclude(ScopeItemKind::Product, "p9");
        let rows = scope.entries();
        assert_eq!(rows.len(), 3);
        assert_eq!(PricingScope::from_entries(rows), scope);
    }

    #[test]
    fn test_matches_exclusion_wins() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "tools");
        scope.exclude(ScopeItemKind::Category, "cordless");
        scope.exclude(ScopeItemKind::Product, "p-banned");

        assert!(scope.matches("p1", &chain(&["drills", "tools"])));
        assert!(!scope.matches("p2", &chain(&["cordless", "drills", "tools"])));
        assert!(!scope.matches("p-banned", &chain(&["tools"])));
        assert!(!scope.matches("p3", &chain(&["garden"])));
        assert!(!scope.matches("p4", &[]));
    }

    #[test]
    fn test_matches_without_inclusions_is_catalog_wide() {
        let mut scope = PricingScope::default();
        assert!(scope.matches("anything", &[]));
        scope.exclude(ScopeItemKind::Category, "garden");
        assert!(scope.matches("p1", &chain(&["tools"])));
        assert!(!scope.matches("p2", &chain(&["garden"])));
    }

    #[test]
    fn test_included_product_outside_included_category() {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "tools");
        scope.include(ScopeItemKind::Product, "p-special");
        assert!(scope.matches("p-special", &chain(&["garden"])));
    }

    #[test]
    fn test_serde_defaults() {
        let scope: PricingScope =
            serde_json::from_str(r#"{"included_products":["p1"]}"#).unwrap();
        assert_eq!(scope.included_products, vec!["p1"]);
        assert!(scope.excluded_categories.is_empty());
        assert_eq!(ScopeItemKind::parse("category"), Some(ScopeItemKind::Category));
        assert_eq!(ScopeMode::parse("bogus"), None);
    }
}
