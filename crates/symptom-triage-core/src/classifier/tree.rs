//! CART classification tree.
//!
//! Gini impurity, binary threshold splits (`x <= threshold` goes left),
//! random feature subsampling at every node. Leaves hold the class
//! distribution of the samples that reached them.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Growth limits for a single tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Maximum depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum samples needed to attempt a split
    pub min_samples_split: usize,
    /// Features examined per split
    pub max_features: usize,
}

impl TreeConfig {
    /// Defaults for a forest member: unbounded depth, `ceil(sqrt(n))` features.
    pub fn for_features(n_features: usize) -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: ((n_features as f64).sqrt().ceil() as usize).max(1),
        }
    }
}

/// A node in the flattened tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

/// A trained classification tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_classes: usize,
}

impl DecisionTree {
    /// Grow a tree on the samples selected by `indices` (duplicates allowed).
    pub fn fit(
        features: &[Vec<f64>],
        labels: &[usize],
        indices: &[usize],
        n_classes: usize,
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = features.first().map_or(0, Vec::len);
        let mut builder = TreeBuilder {
            features,
            labels,
            n_classes,
            n_features,
            config,
            rng,
            nodes: Vec::new(),
        };
        builder.build_node(indices, 0);

        Self {
            nodes: builder.nodes,
            n_classes,
        }
    }

    /// Class distribution of the leaf `sample` lands in.
    pub fn predict_proba(&self, sample: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match &nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
            }
        }
        walk(&self.nodes, 0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    n_features: usize,
    config: &'a TreeConfig,
    rng: &'a mut StdRng,
    nodes: Vec<TreeNode>,
}

impl TreeBuilder<'_> {
    fn build_node(&mut self, indices: &[usize], depth: usize) -> usize {
        let current_idx = self.nodes.len();
        let counts = self.class_counts(indices);

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);

        if pure || depth_reached || indices.len() < self.config.min_samples_split {
            self.nodes.push(leaf(&counts));
            return current_idx;
        }

        let split = match self.find_best_split(indices, gini(&counts)) {
            Some(s) => s,
            None => {
                self.nodes.push(leaf(&counts));
                return current_idx;
            }
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.features[i][split.feature] <= split.threshold);

        // Reserve the slot, children are patched in once built
        self.nodes.push(TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: 0,
            right: 0,
        });

        let left_idx = self.build_node(&left, depth + 1);
        let right_idx = self.build_node(&right, depth + 1);

        if let TreeNode::Split { left, right, .. } = &mut self.nodes[current_idx] {
            *left = left_idx;
            *right = right_idx;
        }

        current_idx
    }

    /// Examine features in random order until `max_features` non-constant
    /// ones have been scored and a valid split exists.
    fn find_best_split(&mut self, indices: &[usize], parent_gini: f64) -> Option<Split> {
        let mut order: Vec<usize> = (0..self.n_features).collect();
        order.shuffle(&mut *self.rng);

        let mut best: Option<Split> = None;
        let mut visited = 0;

        for feature in order {
            if visited >= self.config.max_features && best.is_some() {
                break;
            }

            let thresholds = self.candidate_thresholds(indices, feature);
            if thresholds.is_empty() {
                continue;
            }
            visited += 1;

            for threshold in thresholds {
                let gain = self.split_gain(indices, feature, threshold, parent_gini);
                if best.map_or(true, |b| gain > b.gain) {
                    best = Some(Split {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Midpoints between consecutive distinct values of a feature.
    fn candidate_thresholds(&self, indices: &[usize], feature: usize) -> Vec<f64> {
        let values: BTreeSet<u64> = indices
            .iter()
            .map(|&i| ordered_bits(self.features[i][feature]))
            .collect();
        let values: Vec<f64> = values.into_iter().map(from_ordered_bits).collect();

        values.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    fn split_gain(&self, indices: &[usize], feature: usize, threshold: f64, parent_gini: f64) -> f64 {
        let mut left = vec![0usize; self.n_classes];
        let mut right = vec![0usize; self.n_classes];

        for &i in indices {
            if self.features[i][feature] <= threshold {
                left[self.labels[i]] += 1;
            } else {
                right[self.labels[i]] += 1;
            }
        }

        let n_left: usize = left.iter().sum();
        let n_right: usize = right.iter().sum();
        let total = (n_left + n_right) as f64;

        let weighted = (n_left as f64 / total) * gini(&left) + (n_right as f64 / total) * gini(&right);
        parent_gini - weighted
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }
}

fn leaf(counts: &[usize]) -> TreeNode {
    let total: usize = counts.iter().sum();
    let distribution = if total == 0 {
        vec![0.0; counts.len()]
    } else {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    };
    TreeNode::Leaf { distribution }
}

fn gini(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Total-order key for a float so values can live in a `BTreeSet`.
fn ordered_bits(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits >> 63 == 1 {
        !bits
    } else {
        bits | (1 << 63)
    }
}

fn from_ordered_bits(key: u64) -> f64 {
    if key >> 63 == 1 {
        f64::from_bits(key & !(1 << 63))
    } else {
        f64::from_bits(!key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn xor_like() -> (Vec<Vec<f64>>, Vec<usize>) {
        let features = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ];
        let labels = vec![0, 1, 1, 0];
        (features, labels)
    }

    #[test]
    fn test_fits_training_data_exactly() {
        let (features, labels) = xor_like();
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let config = TreeConfig::for_features(2);

        let tree = DecisionTree::fit(&features, &labels, &indices, 2, &config, &mut rng);

        for (row, &label) in features.iter().zip(&labels) {
            let proba = tree.predict_proba(row);
            assert_eq!(proba[label], 1.0);
        }
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let (features, labels) = xor_like();
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let config = TreeConfig {
            max_depth: Some(0),
            ..TreeConfig::for_features(2)
        };

        let tree = DecisionTree::fit(&features, &labels, &indices, 2, &config, &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_proba(&[0.0, 0.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let features = vec![vec![0.0], vec![1.0]];
        let labels = vec![1, 1];
        let mut rng = StdRng::seed_from_u64(1);

        let tree = DecisionTree::fit(&features, &labels, &[0, 1], 3, &TreeConfig::for_features(1), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_proba(&[0.0]), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0]), 0.0);
        assert!((gini(&[2, 2]) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[]), 0.0);
    }

    #[test]
    fn test_ordered_bits_roundtrip() {
        for v in [-2.5, -0.0, 0.0, 1.0, 3.75] {
            assert_eq!(from_ordered_bits(ordered_bits(v)).to_bits(), v.to_bits());
        }
        assert!(ordered_bits(-1.0) < ordered_bits(0.0));
        assert!(ordered_bits(0.5) < ordered_bits(1.0));
    }
}
