use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, ROOT_PARENT_ID};
use crate::features::categories::stores::CategoryStore;

/// Rebuilds the chain of categories leading from a hierarchy root down to a
/// given category.
///
/// The walk follows `parent_id` links one lookup at a time and holds no lock
/// across hops, so a concurrent edit of the tree can produce a stale path.
#[derive(Clone)]
pub struct CategoryPathResolver {
    store: Arc<dyn CategoryStore>,
}

impl CategoryPathResolver {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Returns the path root-first, ending with `leaf_id` itself.
    ///
    /// An unknown `leaf_id` yields an empty path. A `parent_id` that points to
    /// a missing category ends the walk as if the root had been reached.
    /// A parent chain that loops fails with `AppError::CycleDetected`.
    pub async fn ancestor_path(&self, leaf_id: i64) -> Result<Vec<Category>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = leaf_id;

        while current != ROOT_PARENT_ID {
            let Some(category) = self.store.get_by_id(current).await? else {
                if !chain.is_empty() {
                    tracing::debug!(
                        leaf_id,
                        missing_parent_id = current,
                        "Category path ends at a dangling parent reference"
                    );
                }
                break;
            };

            if !visited.insert(category.id) {
                return Err(AppError::CycleDetected(category.id));
            }

            current = category.parent_id;
            let reached_root = category.is_root();
            chain.push(category);
            if reached_root {
                break;
            }
        }

        // Built leaf to root
        chain.reverse();
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::{CategoryChanges, NewCategory};
    use crate::features::categories::stores::InMemoryCategoryStore;

    async fn seed(store: &InMemoryCategoryStore, id: i64, parent_id: i64) -> Category {
        store
            .insert(NewCategory {
                id: Some(id),
                changes: CategoryChanges {
                    name: format!("category-{}", id),
                    parent_id,
                    is_parent: false,
                    icon: None,
                    sort: 0,
                },
            })
            .await
            .unwrap()
    }

    fn ids(path: &[Category]) -> Vec<i64> {
        path.iter().map(|c| c.id).collect()
    }

    #[tokio::test]
    async fn test_three_level_chain_is_root_first() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let a = seed(&store, 1, ROOT_PARENT_ID).await;
        let b = seed(&store, 2, a.id).await;
        let c = seed(&store, 3, b.id).await;
        let resolver = CategoryPathResolver::new(store);

        let path = resolver.ancestor_path(c.id).await.unwrap();

        assert_eq!(path, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_root_resolves_to_itself() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let root = seed(&store, 10, ROOT_PARENT_ID).await;
        let resolver = CategoryPathResolver::new(store);

        let path = resolver.ancestor_path(root.id).await.unwrap();

        assert_eq!(path, vec![root]);
    }

    #[tokio::test]
    async fn test_unknown_leaf_yields_empty_path() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store, 1, ROOT_PARENT_ID).await;
        let resolver = CategoryPathResolver::new(store);

        assert!(resolver.ancestor_path(999).await.unwrap().is_empty());
        assert!(resolver
            .ancestor_path(ROOT_PARENT_ID)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_two_node_cycle_is_reported() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store, 1, 2).await;
        seed(&store, 2, 1).await;
        let resolver = CategoryPathResolver::new(store);

        let result = resolver.ancestor_path(1).await;

        assert!(matches!(result, Err(AppError::CycleDetected(1))));
    }

    #[tokio::test]
    async fn test_self_parent_is_reported_as_cycle() {
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store, 5, 5).await;
        let resolver = CategoryPathResolver::new(store);

        assert!(matches!(
            resolver.ancestor_path(5).await,
            Err(AppError::CycleDetected(5))
        ));
    }

    #[tokio::test]
    async fn test_cycle_above_leaf_names_reentry_point() {
        // 4 -> 3 -> 2 -> 3
        let store = Arc::new(InMemoryCategoryStore::new());
        seed(&store, 2, 3).await;
        seed(&store, 3, 2).await;
        seed(&store, 4, 3).await;
        let resolver = CategoryPathResolver::new(store);

        assert!(matches!(
            resolver.ancestor_path(4).await,
            Err(AppError::CycleDetected(3))
        ));
    }

    #[tokio::test]
    async fn test_dangling_parent_stops_walk() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let parent = seed(&store, 1, ROOT_PARENT_ID).await;
        let child = seed(&store, 2, parent.id).await;
        let grandchild = seed(&store, 3, child.id).await;
        store.delete_by_id(parent.id).await.unwrap();
        let resolver = CategoryPathResolver::new(store);

        let path = resolver.ancestor_path(grandchild.id).await.unwrap();

        assert_eq!(ids(&path), vec![child.id, grandchild.id]);
    }

    #[tokio::test]
    async fn test_deep_chain_does_not_recurse() {
        let store = Arc::new(InMemoryCategoryStore::new());
        let depth = 10_000;
        for id in 1..=depth {
            seed(&store, id, id - 1).await;
        }
        let resolver = CategoryPathResolver::new(store);

        let path = resolver.ancestor_path(depth).await.unwrap();

        assert_eq!(path.len(), depth as usize);
        assert!(path[0].is_root());
        assert_eq!(path.last().map(|c| c.id), Some(depth));
    }

    #[tokio::test]
    async fn test_path_shape_holds_for_every_node_of_a_tree() {
        // Two roots, each with a small fan-out below it
        let store = Arc::new(InMemoryCategoryStore::new());
        let parents = [
            (1, ROOT_PARENT_ID),
            (2, ROOT_PARENT_ID),
            (3, 1),
            (4, 1),
            (5, 3),
            (6, 2),
            (7, 6),
            (8, 7),
        ];
        for (id, parent_id) in parents {
            seed(&store, id, parent_id).await;
        }
        let resolver = CategoryPathResolver::new(store.clone());

        for (id, _) in parents {
            let path = resolver.ancestor_path(id).await.unwrap();

            assert_eq!(path.last().map(|c| c.id), Some(id));
            let first = &path[0];
            assert!(store.get_by_id(first.parent_id).await.unwrap().is_none());
            for pair in path.windows(2) {
                assert_eq!(pair[1].parent_id, pair[0].id);
            }
        }
    }
}
