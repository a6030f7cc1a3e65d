//! Navigation fragment parsing.
//!
//! A fragment is a YAML file with a top-level `nav` sequence of
//! `label: value` mappings, in the mkdocs style:
//!
//! ```yaml
//! nav:
//!   - Home: index.md
//!   - Chapter1: Chapter1-Introduction
//! ```
//!
//! Values are kept raw here; the expander decides whether each one is a
//! content file or a sub-directory.

use serde_yaml::Value;

/// Top-level key holding the fragment entries.
pub const NAV_KEY: &str = "nav";

/// One `label: value` pair from a fragment, value unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentEntry {
    /// Display label.
    pub label: String,
    /// Raw value: a content file name or a sub-directory name.
    pub value: String,
}

/// Ordered entries of one fragment file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Entries in declaration order.
    pub entries: Vec<FragmentEntry>,
}

/// Error returned when fragment content cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FragmentError {
    /// Content is not YAML or does not have the expected shape.
    Malformed(String),
    /// Content is a mapping without a `nav` key.
    NoNavSection,
}

/// Parse fragment content.
///
/// Multi-key items contribute their pairs in document order. Scalar labels
/// and values (strings, numbers, booleans) are accepted as strings.
pub(crate) fn parse_fragment(content: &str) -> Result<Fragment, FragmentError> {
    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| FragmentError::Malformed(format!("invalid YAML: {e}")))?;

    let Value::Mapping(document) = document else {
        return Err(FragmentError::Malformed(
            "top level must be a mapping".to_owned(),
        ));
    };
    let nav = document.get(NAV_KEY).ok_or(FragmentError::NoNavSection)?;
    let Value::Sequence(items) = nav else {
        return Err(FragmentError::Malformed(format!(
            "`{NAV_KEY}` must be a sequence"
        )));
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Mapping(pairs) = item else {
            return Err(FragmentError::Malformed(format!(
                "item {index} must be a `label: value` mapping"
            )));
        };
        for (key, value) in pairs {
            let label = scalar_to_string(key).ok_or_else(|| {
                FragmentError::Malformed(format!("item {index} has a non-scalar label"))
            })?;
            let value = scalar_to_string(value).ok_or_else(|| {
                FragmentError::Malformed(format!(
                    "value of '{label}' must be a file or directory name"
                ))
            })?;
            entries.push(FragmentEntry { label, value });
        }
    }

    Ok(Fragment { entries })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
