//! Построение дерева из плоского списка с `parent_id`
//!
//! Два прохода: сначала группируем детей по родителю, потом рекурсивно
//! строим узлы от корней. Используется деревом категорий на бэкенде и
//! обозревателем в `DualListSelector` на фронтенде.

use std::collections::{HashMap, HashSet};

/// Пустой GUID, эквивалент NULL для parent_id
pub const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Элемент, который можно уложить в дерево
pub trait HierarchyItem {
    fn node_id(&self) -> String;
    fn parent_node_id(&self) -> Option<String>;
    /// Ключ сортировки соседей (сравнивается без учёта регистра)
    fn sort_key(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T: HierarchyItem> TreeNode<T> {
    pub fn id(&self) -> String {
        self.item.node_id()
    }

    /// Количество узлов в поддереве, включая сам узел
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }
}

/// Строка плоского представления дерева
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow<'a, T> {
    pub depth: usize,
    pub has_children: bool,
    pub item: &'a T,
}

fn normalize_parent(parent: Option<String>, existing: &HashSet<String>) -> Option<String> {
    let pid = parent?;
    let pid = pid.trim();
    if pid.is_empty() || pid == NIL_UUID || !existing.contains(pid) {
        // Родителя нет в списке - считаем элемент корневым
        None
    } else {
        Some(pid.to_string())
    }
}

fn sort_nodes<T: HierarchyItem>(nodes: &mut [TreeNode<T>]) {
    nodes.sort_by_key(|n| n.item.sort_key().to_lowercase());
    for n in nodes.iter_mut() {
        sort_nodes(&mut n.children);
    }
}

/// Построить лес из плоского списка
///
/// Каждый элемент входа попадает в результат ровно один раз. Элементы,
/// недостижимые от корней (цикл по parent_id), поднимаются в корень.
pub fn build_tree<T: HierarchyItem + Clone>(items: Vec<T>) -> Vec<TreeNode<T>> {
    if items.is_empty() {
        return vec![];
    }

    let existing_ids: HashSet<String> = items.iter().map(|i| i.node_id()).collect();

    // Проход 1: группируем детей по нормализованному parent_id
    let mut children_map: HashMap<Option<String>, Vec<T>> = HashMap::new();
    let mut order: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        order.push(item.node_id());
        let parent = normalize_parent(item.parent_node_id(), &existing_ids);
        children_map.entry(parent).or_default().push(item);
    }

    // Проход 2: рекурсивно строим узлы от корней
    fn build_node<T: HierarchyItem + Clone>(
        item: T,
        children_map: &HashMap<Option<String>, Vec<T>>,
        visited: &mut HashSet<String>,
    ) -> TreeNode<T> {
        let id = item.node_id();
        visited.insert(id.clone());
        let children = children_map
            .get(&Some(id))
            .map(|kids| {
                kids.iter()
                    .filter(|kid| !visited.contains(&kid.node_id()))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
            .into_iter()
            .map(|kid| build_node(kid, children_map, visited))
            .collect();
        TreeNode { item, children }
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut roots: Vec<TreeNode<T>> = children_map
        .get(&None)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|item| build_node(item, &children_map, &mut visited))
        .collect();

    // Циклы: всё, что не встретилось, поднимаем в корень в исходном порядке
    if visited.len() < existing_ids.len() {
        let by_id: HashMap<String, T> = children_map
            .values()
            .flatten()
            .map(|i| (i.node_id(), i.clone()))
            .collect();
        for id in order {
            if visited.contains(&id) {
                continue;
            }
            if let Some(item) = by_id.get(&id) {
                let node = build_node(item.clone(), &children_map, &mut visited);
                roots.push(node);
            }
        }
    }

    sort_nodes(&mut roots);
    roots
}

/// Плоский список строк для отрисовки
///
/// `expanded = None` раскрывает всё дерево.
pub fn flatten<'a, T: HierarchyItem>(
    nodes: &'a [TreeNode<T>],
    expanded: Option<&HashSet<String>>,
) -> Vec<FlatRow<'a, T>> {
    fn walk<'a, T: HierarchyItem>(
        nodes: &'a [TreeNode<T>],
        depth: usize,
        expanded: Option<&HashSet<String>>,
        out: &mut Vec<FlatRow<'a, T>>,
    ) {
        for node in nodes {
            out.push(FlatRow {
                depth,
                has_children: !node.children.is_empty(),
                item: &node.item,
            });
            let open = match expanded {
                None => true,
                Some(set) => set.contains(&node.item.node_id()),
            };
            if open {
                walk(&node.children, depth + 1, expanded, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, expanded, &mut out);
    out
}

/// Фильтрация дерева: оставляет совпавшие узлы и их предков
pub fn filter_tree<T, F>(nodes: &[TreeNode<T>], pred: &F) -> Vec<TreeNode<T>>
where
    T: HierarchyItem + Clone,
    F: Fn(&T) -> bool,
{
    let mut result = Vec::new();
    for node in nodes {
        let children = filter_tree(&node.children, pred);
        if pred(&node.item) || !children.is_empty() {
            result.push(TreeNode {
                item: node.item.clone(),
                children,
            });
        }
    }
    result
}

/// Цепочка предков от ближайшего родителя к корню
pub fn ancestors_of<T: HierarchyItem>(items: &[T], id: &str) -> Vec<String> {
    let parents: HashMap<String, Option<String>> = items
        .iter()
        .map(|i| (i.node_id(), i.parent_node_id()))
        .collect();

    let mut chain = Vec::new();
    let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
    let mut current = parents.get(id).cloned().flatten();
    while let Some(pid) = current {
        if pid.trim().is_empty() || pid == NIL_UUID || !seen.insert(pid.clone()) {
            break;
        }
        if !parents.contains_key(&pid) {
            break;
        }
        current = parents.get(&pid).cloned().flatten();
        chain.push(pid);
    }
    chain
}

/// Все потомки узла (в порядке обхода в ширину), без самого узла
pub fn descendants_of<T: HierarchyItem>(items: &[T], id: &str) -> Vec<String> {
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for item in items {
        if let Some(pid) = item.parent_node_id() {
            children.entry(pid).or_default().push(item.node_id());
        }
    }

    let mut out = Vec::new();
    let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
    let mut queue = std::collections::VecDeque::from([id.to_string()]);
    while let Some(current) = queue.pop_front() {
        if let Some(kids) = children.get(&current) {
            for kid in kids {
                if seen.insert(kid.clone()) {
                    out.push(kid.clone());
                    queue.push_back(kid.clone());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        id: &'static str,
        parent: Option<&'static str>,
        name: &'static str,
    }

    impl HierarchyItem for Node {
        fn node_id(&self) -> String {
            self.id.to_string()
        }
        fn parent_node_id(&self) -> Option<String> {
            self.parent.map(|p| p.to_string())
        }
        fn sort_key(&self) -> String {
            self.name.to_string()
        }
    }

    fn n(id: &'static str, parent: Option<&'static str>, name: &'static str) -> Node {
        Node { id, parent, name }
    }

    fn sample() -> Vec<Node> {
        vec![
            n("tools", None, "Tools"),
            n("drills", Some("tools"), "drills"),
            n("saws", Some("tools"), "Saws"),
            n("cordless", Some("drills"), "Cordless"),
            n("garden", None, "garden"),
        ]
    }

    #[test]
    fn test_build_tree_groups_and_sorts() {
        let tree = build_tree(sample());
        assert_eq!(tree.len(), 2);
        // case-insensitive: "garden" < "Tools"
        assert_eq!(tree[0].item.id, "garden");
        assert_eq!(tree[1].item.id, "tools");
        let tools = &tree[1];
        assert_eq!(
            tools.children.iter().map(|c| c.item.id).collect::<Vec<_>>(),
            vec!["drills", "saws"]
        );
        assert_eq!(tools.children[0].children[0].item.id, "cordless");
        assert_eq!(tools.size(), 4);
    }

    #[test]
    fn test_orphans_and_nil_parent_become_roots() {
        let items = vec![
            n("a", Some("missing"), "A"),
            n("b", Some(NIL_UUID), "B"),
            n("c", Some(""), "C"),
        ];
        let tree = build_tree(items);
        assert_eq!(tree.len(), 3);
        assert!(tree.iter().all(|t| t.children.is_empty()));
    }

    #[test]
    fn test_cycle_does_not_lose_items() {
        let items = vec![
            n("root", None, "Root"),
            n("x", Some("y"), "X"),
            n("y", Some("x"), "Y"),
        ];
        let tree = build_tree(items);
        let total: usize = tree.iter().map(|t| t.size()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_flatten_respects_expanded() {
        let tree = build_tree(sample());
        assert_eq!(flatten(&tree, None).len(), 5);

        let collapsed = HashSet::new();
        let rows = flatten(&tree, Some(&collapsed));
        assert_eq!(rows.len(), 2);
        assert!(rows[1].has_children);

        let open = HashSet::from(["tools".to_string()]);
        let rows = flatten(&tree, Some(&open));
        assert_eq!(
            rows.iter().map(|r| (r.item.id, r.depth)).collect::<Vec<_>>(),
            vec![("garden", 0), ("tools", 0), ("drills", 1), ("saws", 1)]
        );
    }

    #[test]
    fn test_filter_keeps_ancestors() {
        let tree = build_tree(sample());
        let filtered = filter_tree(&tree, &|node: &Node| node.name == "Cordless");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item.id, "tools");
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].children[0].item.id, "cordless");
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let items = sample();
        assert_eq!(ancestors_of(&items, "cordless"), vec!["drills", "tools"]);
        assert!(ancestors_of(&items, "garden").is_empty());

        let mut d = descendants_of(&items, "tools");
        d.sort();
        assert_eq!(d, vec!["cordless", "drills", "saws"]);
    }

    #[test]
    fn test_ancestors_stop_on_cycle() {
        let items = vec![n("x", Some("y"), "X"), n("y", Some("x"), "Y")];
        assert_eq!(ancestors_of(&items, "x"), vec!["y"]);
    }
}
