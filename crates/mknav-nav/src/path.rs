//! Navigation paths and content-relative locations.
//!
//! Two kinds of paths appear while building navigation:
//!
//! - [`NavPath`]: labels descending from the navigation root (`nav`).
//! - Locations: forward-slash file paths relative to the content root,
//!   e.g. `"guide/mkdocs.yml"` or `"guide/intro.md"`.

use std::fmt;

/// Reserved label of the navigation root.
pub const ROOT_LABEL: &str = "nav";

/// Sequence of labels locating a node from the navigation root.
///
/// The empty sequence is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NavPath(Vec<String>);

impl NavPath {
    /// The root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels from the root down, excluding the root label.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Number of labels below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the child labelled `label`.
    #[must_use]
    pub fn child(&self, label: &str) -> Self {
        let mut labels = Vec::with_capacity(self.0.len() + 1);
        labels.extend(self.0.iter().cloned());
        labels.push(label.to_owned());
        Self(labels)
    }

    /// Path made of the first `len` labels.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0.iter().take(len).cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for NavPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for NavPath {
    /// Formats as `nav > Guide > Intro`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_LABEL)?;
        for label in &self.0 {
            write!(f, " > {label}")?;
        }
        Ok(())
    }
}

/// Directory portion of a location (`""` at the content root).
///
/// `"guide/mkdocs.yml"` → `"guide"`, `"mkdocs.yml"` → `""`.
#[must_use]
pub fn parent_dir(location: &str) -> &str {
    location.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Join a relative reference onto a directory location and normalise it.
///
/// `.` segments and empty segments are dropped, `..` removes the previous
/// segment. Returns `None` for absolute references and references that
/// climb above the content root.
///
/// `join_location("guide", "../index.md")` → `Some("index.md")`
#[must_use]
pub fn join_location(dir: &str, reference: &str) -> Option<String> {
    if reference.starts_with('/') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(reference.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = NavPath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.to_string(), "nav");
    }

    #[test]
    fn test_child_path() {
        let path = NavPath::root().child("Guide").child("Intro");
        assert_eq!(path.labels(), ["Guide", "Intro"]);
        assert_eq!(path.to_string(), "nav > Guide > Intro");
        assert!(!path.is_root());
    }

    #[test]
    fn test_paths_compare_element_wise() {
        let a: NavPath = ["Guide", "Intro"].into_iter().collect();
        let b = NavPath::root().child("Guide").child("Intro");
        let c: NavPath = ["Intro", "Guide"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_prefix() {
        let path: NavPath = ["A", "B", "C"].into_iter().collect();
        assert_eq!(path.prefix(2), ["A", "B"].into_iter().collect());
        assert_eq!(path.prefix(0), NavPath::root());
        assert_eq!(path.prefix(10), path);
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("mkdocs.yml"), "");
        assert_eq!(parent_dir("guide/mkdocs.yml"), "guide");
        assert_eq!(parent_dir("a/b/mkdocs.yml"), "a/b");
    }

    #[test]
    fn test_join_location_at_root() {
        assert_eq!(join_location("", "index.md").as_deref(), Some("index.md"));
        assert_eq!(
            join_location("", "guide/mkdocs.yml").as_deref(),
            Some("guide/mkdocs.yml")
        );
    }

    #[test]
    fn test_join_location_nested() {
        assert_eq!(
            join_location("guide", "intro.md").as_deref(),
            Some("guide/intro.md")
        );
        assert_eq!(
            join_location("a/b", "c/mkdocs.yml").as_deref(),
            Some("a/b/c/mkdocs.yml")
        );
    }

    #[test]
    fn test_join_location_normalises() {
        assert_eq!(
            join_location("guide", "./intro.md").as_deref(),
            Some("guide/intro.md")
        );
        assert_eq!(
            join_location("guide", "../index.md").as_deref(),
            Some("index.md")
        );
        assert_eq!(
            join_location("guide//", "sub//page.md").as_deref(),
            Some("guide/sub/page.md")
        );
        assert_eq!(join_location("guide", "..").as_deref(), Some(""));
    }

    #[test]
    fn test_join_location_rejects_escape() {
        assert!(join_location("", "../outside.md").is_none());
        assert!(join_location("guide", "../../outside.md").is_none());
        assert!(join_location("guide", "/etc/passwd").is_none());
    }
}
