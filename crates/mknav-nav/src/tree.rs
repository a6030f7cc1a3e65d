//! Path-addressed navigation tree.
//!
//! [`NavTree`] accumulates the navigation while fragments are expanded.
//! Nodes are addressed by [`NavPath`] using first-match label lookup: when
//! siblings share a label, the first one wins.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::path::NavPath;

/// Navigation node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// Content file, as a forward-slash path relative to the content root.
    Leaf(String),
    /// Ordered child entries. May be empty until its fragment is expanded.
    Branch(Vec<NavEntry>),
}

/// Labelled child of a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Display label.
    pub label: String,
    /// Child node.
    pub node: NavNode,
}

impl NavEntry {
    /// Create a leaf entry.
    #[must_use]
    pub fn leaf(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            node: NavNode::Leaf(path.into()),
        }
    }

    /// Create a branch entry.
    #[must_use]
    pub fn branch(label: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self {
            label: label.into(),
            node: NavNode::Branch(children),
        }
    }
}

/// Error returned by tree insertion.
///
/// Both variants indicate a path that does not address a branch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A label along the path has no matching child.
    #[error("Navigation path {path} not found: no entry labelled '{label}'")]
    PathNotFound {
        /// Full path that was looked up.
        path: NavPath,
        /// First label with no match.
        label: String,
    },
    /// A label along the path names a content file.
    #[error("Navigation path {path} is a content file and cannot be expanded")]
    NotExpandable {
        /// Path up to and including the leaf.
        path: NavPath,
    },
}

/// Navigation tree rooted at the reserved `nav` label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    root: Vec<NavEntry>,
}

impl NavTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from root entries.
    #[must_use]
    pub fn from_entries(root: Vec<NavEntry>) -> Self {
        Self { root }
    }

    /// Top-level entries.
    #[must_use]
    pub fn root(&self) -> &[NavEntry] {
        &self.root
    }

    /// True if the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Replace the children of the branch at `path`.
    ///
    /// The root path sets the top-level entries directly.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PathNotFound`] if a label along the path is
    /// missing, or [`TreeError::NotExpandable`] if it crosses a leaf.
    pub fn insert_subtree(
        &mut self,
        path: &NavPath,
        children: Vec<NavEntry>,
    ) -> Result<(), TreeError> {
        let slot = self.children_mut(path)?;
        *slot = children;
        Ok(())
    }

    /// Children of the branch at `path`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`insert_subtree`](Self::insert_subtree).
    pub fn children(&self, path: &NavPath) -> Result<&[NavEntry], TreeError> {
        let mut children = self.root.as_slice();
        for (depth, label) in path.labels().iter().enumerate() {
            let entry = find_entry(children, label).ok_or_else(|| TreeError::PathNotFound {
                path: path.clone(),
                label: label.clone(),
            })?;
            children = match &entry.node {
                NavNode::Branch(next) => next.as_slice(),
                NavNode::Leaf(_) => {
                    return Err(TreeError::NotExpandable {
                        path: path.prefix(depth + 1),
                    });
                }
            };
        }
        Ok(children)
    }

    /// Node at `path`, or `None` for the root and for missing paths.
    #[must_use]
    pub fn get(&self, path: &NavPath) -> Option<&NavNode> {
        let (last, parents) = path.labels().split_last()?;
        let parent = self.children(&path.prefix(parents.len())).ok()?;
        find_entry(parent, last).map(|entry| &entry.node)
    }

    /// All leaves, depth-first in declaration order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(NavPath, &str)> {
        let mut leaves = Vec::new();
        collect_leaves(&self.root, &NavPath::root(), &mut leaves);
        leaves
    }

    /// Mutable children of the branch at `path`.
    pub(crate) fn children_mut(&mut self, path: &NavPath) -> Result<&mut Vec<NavEntry>, TreeError> {
        let mut children = &mut self.root;
        for (depth, label) in path.labels().iter().enumerate() {
            let current = children;
            let entry = current
                .iter_mut()
                .find(|entry| entry.label == *label)
                .ok_or_else(|| TreeError::PathNotFound {
                    path: path.clone(),
                    label: label.clone(),
                })?;
            children = match &mut entry.node {
                NavNode::Branch(next) => next,
                NavNode::Leaf(_) => {
                    return Err(TreeError::NotExpandable {
                        path: path.prefix(depth + 1),
                    });
                }
            };
        }
        Ok(children)
    }
}

/// First entry labelled `label`.
fn find_entry<'a>(entries: &'a [NavEntry], label: &str) -> Option<&'a NavEntry> {
    entries.iter().find(|entry| entry.label == label)
}

fn collect_leaves<'a>(
    entries: &'a [NavEntry],
    path: &NavPath,
    leaves: &mut Vec<(NavPath, &'a str)>,
) {
    for entry in entries {
        let entry_path = path.child(&entry.label);
        match &entry.node {
            NavNode::Leaf(file) => leaves.push((entry_path, file.as_str())),
            NavNode::Branch(children) => collect_leaves(children, &entry_path, leaves),
        }
    }
}

// Serialized in the mkdocs `nav` shape: a sequence of single-key mappings,
// leaves as strings and branches as nested sequences.

impl Serialize for NavTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.root, serializer)
    }
}

impl Serialize for NavEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.node)?;
        map.end()
    }
}

impl Serialize for NavNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(file) => serializer.serialize_str(file),
            Self::Branch(children) => serialize_entries(children, serializer),
        }
    }
}

fn serialize_entries<S: Serializer>(entries: &[NavEntry], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(entries.len()))?;
    for entry in entries {
        seq.serialize_element(entry)?;
    }
    seq.end()
}
