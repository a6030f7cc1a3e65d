//! Recursive fragment expansion.
//!
//! Expansion is top-down, like recursive-descent parsing: every fragment
//! value is either a terminal (a content file, resolved to its path) or a
//! non-terminal (a sub-directory, expanded from its own fragment).
//!
//! For each fragment the [`Expander`]:
//! 1. Loads and parses it.
//! 2. Installs its entries as the children of the current navigation path,
//!    so deeper insertions can find their parent branch.
//! 3. Walks the entries in order, resolving leaves and recursing into
//!    branches before moving to the next sibling.

use crate::error::NavError;
use crate::fragment::{FragmentEntry, FragmentError, NAV_KEY, parse_fragment};
use crate::path::{NavPath, join_location, parent_dir};
use crate::source::ContentSource;
use crate::tree::{NavEntry, NavNode, NavTree};

/// Options controlling fragment expansion.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Fragment file name looked up in each directory.
    pub fragment_name: String,
    /// Suffix marking a value as a content file.
    pub suffix: String,
    /// Maximum number of nested fragments.
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            fragment_name: "mkdocs.yml".to_owned(),
            suffix: ".md".to_owned(),
            max_depth: 32,
        }
    }
}

impl ExpandOptions {
    /// True if a raw fragment value names a content file.
    #[must_use]
    pub fn is_content(&self, value: &str) -> bool {
        value.ends_with(&self.suffix)
    }
}

/// Builds a [`NavTree`] by splicing fragments from a [`ContentSource`].
pub struct Expander<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    options: &'a ExpandOptions,
    tree: NavTree,
    /// Fragment locations currently being expanded, outermost first.
    active: Vec<String>,
}

impl<'a, S: ContentSource + ?Sized> Expander<'a, S> {
    /// Create an expander with an empty tree.
    #[must_use]
    pub fn new(source: &'a S, options: &'a ExpandOptions) -> Self {
        Self {
            source,
            options,
            tree: NavTree::new(),
            active: Vec::new(),
        }
    }

    /// Expand from the root fragment and return the finished tree.
    ///
    /// # Errors
    ///
    /// Returns the first error met anywhere in the fragment graph.
    pub fn build(mut self) -> Result<NavTree, NavError> {
        let location = self.options.fragment_name.clone();
        self.expand(&NavPath::root(), &location)?;
        Ok(self.tree)
    }

    /// Tree built so far.
    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Expand the fragment at `location` into the branch at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the fragment is missing or malformed, a content file does not
    /// exist, a reference is invalid, the fragment graph is cyclic or too
    /// deep, or `path` does not address a branch.
    pub fn expand(&mut self, path: &NavPath, location: &str) -> Result<(), NavError> {
        if self.active.iter().any(|active| active == location) {
            return Err(NavError::CyclicFragment {
                location: location.to_owned(),
                nav_path: path.clone(),
            });
        }
        if self.active.len() >= self.options.max_depth {
            return Err(NavError::DepthExceeded {
                limit: self.options.max_depth,
                location: location.to_owned(),
            });
        }
        if !self.source.exists(location) {
            return Err(NavError::FragmentMissing {
                location: location.to_owned(),
                nav_path: path.clone(),
            });
        }

        let content = self.source.read(location)?;
        let fragment = parse_fragment(&content).map_err(|e| match e {
            FragmentError::Malformed(reason) => NavError::MalformedFragment {
                location: location.to_owned(),
                reason,
            },
            FragmentError::NoNavSection => NavError::NoNavSection {
                location: location.to_owned(),
                key: NAV_KEY,
            },
        })?;

        tracing::debug!(
            location,
            nav_path = %path,
            entries = fragment.entries.len(),
            "Expanding fragment"
        );

        let provisional = fragment
            .entries
            .iter()
            .map(|entry| NavEntry {
                label: entry.label.clone(),
                node: if self.options.is_content(&entry.value) {
                    NavNode::Leaf(entry.value.clone())
                } else {
                    NavNode::Branch(Vec::new())
                },
            })
            .collect();
        self.tree.insert_subtree(path, provisional)?;

        self.active.push(location.to_owned());
        let result = self.expand_entries(path, location, &fragment.entries);
        self.active.pop();
        result
    }

    fn expand_entries(
        &mut self,
        path: &NavPath,
        location: &str,
        entries: &[FragmentEntry],
    ) -> Result<(), NavError> {
        let dir = parent_dir(location);

        for (index, entry) in entries.iter().enumerate() {
            let target = resolve_reference(dir, location, &entry.value)?;

            if self.options.is_content(&entry.value) {
                if !self.source.exists(&target) {
                    return Err(NavError::DanglingLeaf {
                        path: target,
                        nav_path: path.child(&entry.label),
                    });
                }
                tracing::trace!(label = %entry.label, path = %target, "Resolved content file");
                self.tree.children_mut(path)?[index].node = NavNode::Leaf(target);
            } else {
                let child_location = join_location(&target, &self.options.fragment_name)
                    .ok_or_else(|| NavError::InvalidReference {
                        location: location.to_owned(),
                        value: entry.value.clone(),
                    })?;
                self.expand(&path.child(&entry.label), &child_location)?;
            }
        }

        Ok(())
    }
}

/// Resolve a raw fragment value against the fragment's directory.
fn resolve_reference(dir: &str, location: &str, value: &str) -> Result<String, NavError> {
    let invalid = || NavError::InvalidReference {
        location: location.to_owned(),
        value: value.to_owned(),
    };
    if value.trim().is_empty() {
        return Err(invalid());
    }
    join_location(dir, value).ok_or_else(invalid)
}

/// Build the navigation tree of a content source from its root fragment.
///
/// # Errors
///
/// See [`Expander::expand`].
pub fn build_nav<S: ContentSource + ?Sized>(
    source: &S,
    options: &ExpandOptions,
) -> Result<NavTree, NavError> {
    Expander::new(source, options).build()
}
