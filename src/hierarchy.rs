//! Activity hierarchy closure
//!
//! Activities form a forest stored as a self-referential table: each row
//! carries an optional `parent_id`. Queries that scope organizations to an
//! activity "and all its descendants" need the transitive closure of the
//! child relation. The closure is computed here over an in-memory index
//! built from a single table scan, which keeps the whole operation one
//! logical read against the store.
//!
//! The tree carries a declared nesting cap per node (`max_level`); closure
//! computation never consults it.

use std::collections::{BTreeSet, HashMap, VecDeque};

/// Children index over activity rows, keyed by parent id.
#[derive(Debug, Default)]
pub struct ActivityTree {
    children: HashMap<i32, Vec<i32>>,
    ids_by_name: HashMap<String, Vec<i32>>,
}

impl ActivityTree {
    /// Build the index from `(id, name, parent_id)` rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, String, Option<i32>)>,
    {
        let mut tree = Self::default();
        for (id, name, parent_id) in rows {
            if let Some(parent_id) = parent_id {
                tree.children.entry(parent_id).or_default().push(id);
            }
            tree.ids_by_name.entry(name).or_default().push(id);
        }
        tree
    }

    /// Resolve an activity name to a single id.
    ///
    /// Names are not declared unique; when several activities share one,
    /// the lowest id wins so resolution is deterministic.
    pub fn resolve_name(&self, name: &str) -> Option<i32> {
        self.ids_by_name
            .get(name)
            .and_then(|ids| ids.iter().min())
            .copied()
    }

    /// Ids of every activity sharing `name`.
    pub fn ids_for_name(&self, name: &str) -> &[i32] {
        self.ids_by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The root id plus every id reachable by following child edges
    /// transitively, to unbounded depth.
    ///
    /// Iterative breadth-first expansion rather than native recursion, so
    /// deep trees cannot exhaust the stack. The visited set also guarantees
    /// termination should a malformed parent edge ever form a cycle.
    pub fn closure(&self, root_id: i32) -> BTreeSet<i32> {
        let mut reached = BTreeSet::new();
        let mut queue = VecDeque::new();

        reached.insert(root_id);
        queue.push_back(root_id);

        while let Some(id) = queue.pop_front() {
            if let Some(children) = self.children.get(&id) {
                for &child in children {
                    if reached.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }

        reached
    }

    /// Closure of the activity resolved from `name`, or `None` when the
    /// name matches no activity.
    pub fn closure_by_name(&self, name: &str) -> Option<BTreeSet<i32>> {
        self.resolve_name(name).map(|id| self.closure(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_tree() -> ActivityTree {
        ActivityTree::from_rows(vec![
            (1, "Еда".to_string(), None),
            (2, "Мясная продукция".to_string(), Some(1)),
            (3, "Молочная продукция".to_string(), Some(1)),
            (4, "Колбасы".to_string(), Some(2)),
            (5, "Автомобили".to_string(), None),
        ])
    }

    #[test]
    fn closure_contains_root_and_all_descendants() {
        let tree = food_tree();
        let ids = tree.closure(1);
        assert_eq!(ids, BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn closure_is_consistent_with_child_closures() {
        let tree = food_tree();
        let mut expected = BTreeSet::from([1]);
        expected.extend(tree.closure(2));
        expected.extend(tree.closure(3));
        assert_eq!(tree.closure(1), expected);
    }

    #[test]
    fn closure_of_leaf_is_singleton() {
        let tree = food_tree();
        assert_eq!(tree.closure(4), BTreeSet::from([4]));
    }

    #[test]
    fn closure_excludes_sibling_subtrees() {
        let tree = food_tree();
        assert!(!tree.closure(1).contains(&5));
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let tree = food_tree();
        assert_eq!(tree.resolve_name("Несуществующая"), None);
        assert!(tree.closure_by_name("Несуществующая").is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_lowest_id() {
        let tree = ActivityTree::from_rows(vec![
            (7, "Услуги".to_string(), None),
            (3, "Услуги".to_string(), None),
        ]);
        assert_eq!(tree.resolve_name("Услуги"), Some(3));
        assert_eq!(tree.ids_for_name("Услуги"), &[7, 3]);
    }

    #[test]
    fn closure_terminates_on_cyclic_parent_edges() {
        // Malformed data: 1 -> 2 -> 1
        let tree = ActivityTree::from_rows(vec![
            (1, "a".to_string(), Some(2)),
            (2, "b".to_string(), Some(1)),
        ]);
        assert_eq!(tree.closure(1), BTreeSet::from([1, 2]));
    }

    #[test]
    fn deep_chain_closes_without_recursion() {
        let rows: Vec<_> = (0..10_000)
            .map(|i| (i, format!("n{}", i), if i == 0 { None } else { Some(i - 1) }))
            .collect();
        let tree = ActivityTree::from_rows(rows);
        assert_eq!(tree.closure(0).len(), 10_000);
    }
}
