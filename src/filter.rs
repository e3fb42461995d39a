//! Filter/Search Evaluator
//!
//! Inclusion predicates over the entity graph: an exact pool filter, a
//! case-insensitive substring search and a regex pattern over dataset names.
//! A dataset is visible when it matches directly or any descendant does, so
//! the ancestors of a match stay on screen. With no predicates set, every
//! node is visible.

use crate::model::{Dataset, EntityGraph};
use regex::Regex;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pool: Option<String>,
    query: Option<String>,
    pattern: Option<Regex>,
}

impl FilterSet {
    /// Builds a filter set. An invalid pattern disables regex filtering for
    /// this set rather than failing the evaluation; the other predicates
    /// still apply.
    pub fn new(pool: Option<String>, query: Option<String>, pattern: Option<&str>) -> Self {
        let pattern = pattern.and_then(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = p, error = %e, "invalid dataset pattern, filter disabled");
                None
            }
        });
        Self {
            pool,
            query: query.filter(|q| !q.is_empty()),
            pattern,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_none() && self.query.is_none() && self.pattern.is_none()
    }

    /// Direct match: every active dataset predicate must hold.
    pub fn matches(&self, dataset: &Dataset) -> bool {
        if let Some(re) = &self.pattern {
            if !re.is_match(&dataset.name) {
                return false;
            }
        }
        if let Some(q) = &self.query {
            if !dataset.name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Visibility: direct match or any visible descendant.
    pub fn visible(&self, dataset: &Dataset) -> bool {
        self.matches(dataset) || dataset.children.iter().any(|c| self.visible(c))
    }

    /// Derives a read-only filtered view: non-matching pools dropped,
    /// dataset trees pruned to visible nodes.
    pub fn apply(&self, graph: &EntityGraph) -> EntityGraph {
        let mut view = EntityGraph::default();
        for pool in &graph.pools {
            if let Some(wanted) = &self.pool {
                if &pool.name != wanted {
                    continue;
                }
            }
            let mut pool = pool.clone();
            pool.datasets = pool
                .datasets
                .into_iter()
                .filter_map(|ds| self.prune(ds))
                .collect();
            view.pools.push(pool);
        }
        view
    }

    fn prune(&self, mut dataset: Dataset) -> Option<Dataset> {
        if !self.visible(&dataset) {
            return None;
        }
        dataset.children = dataset
            .children
            .into_iter()
            .filter_map(|c| self.prune(c))
            .collect();
        Some(dataset)
    }
}
