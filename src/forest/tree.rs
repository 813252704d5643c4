//! Structure-of-Arrays decision tree storage and traversal.

/// Node index within a single tree (0 = root).
pub type NodeId = u32;

/// Immutable SoA decision tree for classification.
///
/// Nodes are stored in flat parallel arrays for cache-friendly traversal.
/// Splits are numeric (`value < threshold` goes left); categorical columns
/// reach the tree as their dense encoder codes and split on those codes.
/// Missing values (NaN) always take the left branch.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    split_features: Box<[u32]>,
    thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_classes: Box<[u32]>,
}

impl DecisionTree {
    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Traverse from the root to a leaf and return its class.
    pub fn predict_row(&self, features: &[f32]) -> u32 {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let i = node as usize;
            let value = features[self.split_features[i] as usize];
            // NaN comparisons are false, so missing values go left.
            node = if !(value >= self.thresholds[i]) {
                self.left_children[i]
            } else {
                self.right_children[i]
            };
        }
        self.leaf_classes[node as usize]
    }

    /// Raw parallel arrays, in storage order (for persistence).
    pub fn arrays(
        &self,
    ) -> (
        &[u32],
        &[f32],
        &[u32],
        &[u32],
        &[bool],
        &[u32],
    ) {
        (
            &self.split_features,
            &self.thresholds,
            &self.left_children,
            &self.right_children,
            &self.is_leaf,
            &self.leaf_classes,
        )
    }

    /// Rebuild a tree from its parallel arrays (for persistence).
    ///
    /// # Panics
    ///
    /// Debug-asserts that all arrays have the same length.
    pub fn from_arrays(
        split_features: Vec<u32>,
        thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_classes: Vec<u32>,
    ) -> Self {
        let n = is_leaf.len();
        debug_assert_eq!(n, split_features.len());
        debug_assert_eq!(n, thresholds.len());
        debug_assert_eq!(n, left_children.len());
        debug_assert_eq!(n, right_children.len());
        debug_assert_eq!(n, leaf_classes.len());
        Self {
            split_features: split_features.into_boxed_slice(),
            thresholds: thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_classes: leaf_classes.into_boxed_slice(),
        }
    }
}

/// Mutable tree under construction during training.
///
/// Split nodes are allocated before their children exist; the grower
/// patches the child links once both subtrees are built, then freezes the
/// arrays into an immutable [`DecisionTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    split_features: Vec<u32>,
    thresholds: Vec<f32>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_classes: Vec<u32>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leaf node.
    pub fn add_leaf(&mut self, class: u32) -> NodeId {
        self.push_node(0, 0.0, true, class)
    }

    /// Append a split node with unresolved children.
    pub fn add_split(&mut self, feature: u32, threshold: f32) -> NodeId {
        self.push_node(feature, threshold, false, 0)
    }

    /// Patch a split node's children once both subtrees exist.
    pub fn set_children(&mut self, node: NodeId, left: NodeId, right: NodeId) {
        debug_assert!(!self.is_leaf[node as usize], "leaves have no children");
        self.left_children[node as usize] = left;
        self.right_children[node as usize] = right;
    }

    /// Freeze into an immutable tree.
    pub fn finish(self) -> DecisionTree {
        DecisionTree::from_arrays(
            self.split_features,
            self.thresholds,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.leaf_classes,
        )
    }

    fn push_node(&mut self, feature: u32, threshold: f32, leaf: bool, class: u32) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_features.push(feature);
        self.thresholds.push(threshold);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(leaf);
        self.leaf_classes.push(class);
        id
    }
}
