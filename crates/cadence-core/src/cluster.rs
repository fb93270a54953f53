//! Greedy fuzzy clustering of transaction descriptions
//!
//! Unique descriptions are visited in an explicit order. Each unvisited
//! description is normalized to a group key, the key is scored against every
//! unique description, and all sufficiently similar descriptions (with their
//! transactions) join the key's group. Matched descriptions are marked
//! processed so they never start a group of their own.
//!
//! The result depends on the visiting order: a borderline description joins
//! whichever group reaches it first. It is a heuristic, not an optimal
//! partition.
//!
//! Scaling: every group-starting description is scored against the full
//! description universe, so the worst case is quadratic in the number of
//! unique descriptions.

use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::models::{DescriptionGroup, Transaction};
use crate::normalize::PrefixMapping;
use crate::similarity::Scorer;

/// Clustering thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// A match joins a group only when its score is strictly above this
    pub similarity_threshold: u8,
    /// Maximum number of matches considered per group query
    pub match_limit: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 80,
            match_limit: 20,
        }
    }
}

/// Unique original descriptions in first-seen order
pub fn unique_descriptions(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|tx| seen.insert(tx.original_description.as_str()))
        .map(|tx| tx.original_description.clone())
        .collect()
}

pub struct FuzzyClusterer<S> {
    scorer: S,
    config: ClusterConfig,
}

impl<S: Scorer> FuzzyClusterer<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            config: ClusterConfig::default(),
        }
    }

    pub fn with_config(scorer: S, config: ClusterConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Cluster transactions, visiting descriptions in first-seen order
    pub fn cluster(
        &self,
        transactions: &[Transaction],
        mapping: &PrefixMapping,
    ) -> Vec<DescriptionGroup> {
        let descriptions = unique_descriptions(transactions);
        self.cluster_in_order(&descriptions, transactions, mapping)
    }

    /// Cluster transactions, visiting `descriptions` in the given order.
    ///
    /// `descriptions` is both the scan order and the candidate universe for
    /// every similarity query, so it should list each unique original
    /// description exactly once. Groups are returned in the order their keys
    /// were first created.
    pub fn cluster_in_order(
        &self,
        descriptions: &[String],
        transactions: &[Transaction],
        mapping: &PrefixMapping,
    ) -> Vec<DescriptionGroup> {
        let mut by_description: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, tx) in transactions.iter().enumerate() {
            by_description
                .entry(tx.original_description.as_str())
                .or_default()
                .push(idx);
        }

        let mut processed: HashSet<&str> = HashSet::new();
        let mut groups: Vec<DescriptionGroup> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for description in descriptions {
            if processed.contains(description.as_str()) {
                continue;
            }

            let key = mapping.normalize(description);
            if processed.contains(key) {
                debug!(
                    "Skipping '{}' - key '{}' already matched as a description",
                    description, key
                );
                continue;
            }

            let matches: Vec<&str> = self
                .scorer
                .extract(key, descriptions, self.config.match_limit)
                .into_iter()
                .filter(|m| m.score > self.config.similarity_threshold)
                .map(|m| m.choice)
                .collect();

            let mut indices: Vec<usize> = matches
                .iter()
                .filter_map(|choice| by_description.get(choice))
                .flatten()
                .copied()
                .collect();
            indices.sort_unstable();

            let pos = *positions.entry(key).or_insert_with(|| {
                groups.push(DescriptionGroup {
                    key: key.to_string(),
                    ..Default::default()
                });
                groups.len() - 1
            });
            let group = &mut groups[pos];

            debug!(
                "Group '{}' from '{}': {} matching descriptions, {} transactions",
                key,
                description,
                matches.len(),
                indices.len()
            );

            group.member_indices.extend(indices);
            for choice in matches {
                if processed.insert(choice) {
                    group.claimed_descriptions.push(choice.to_string());
                }
            }
        }

        info!(
            "Clustered {} unique descriptions into {} groups",
            descriptions.len(),
            groups.len()
        );

        groups
    }
}
