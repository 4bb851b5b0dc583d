//! Node type identity: the category and type name a preset archive belongs to.

use std::fmt;

use super::error::{PresetError, PresetResult};

/// The `(category, type)` pair that addresses one preset archive, e.g.
/// `Sop/attribwrangle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    category: String,
    name: String,
}

impl NodeType {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> PresetResult<Self> {
        let category = category.into();
        let name = name.into();
        if !is_path_component(&category) || !is_path_component(&name) {
            return Err(PresetError::InvalidNodeType(format!("{category}/{name}")));
        }
        Ok(Self { category, name })
    }

    /// Parse the `category/type` form.
    pub fn parse(s: &str) -> PresetResult<Self> {
        let Some((category, name)) = s.split_once('/') else {
            return Err(PresetError::InvalidNodeType(s.to_string()));
        };
        Self::new(category, name)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archive filename for this type (`<type>.idx`).
    pub fn archive_file_name(&self) -> String {
        format!("{}.idx", self.name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Non-empty, single path segment, not `.` or `..`.
pub(crate) fn is_path_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_category_and_type() {
        let node = NodeType::parse("Sop/attribwrangle").unwrap();
        assert_eq!(node.category(), "Sop");
        assert_eq!(node.name(), "attribwrangle");
        assert_eq!(node.to_string(), "Sop/attribwrangle");
        assert_eq!(node.archive_file_name(), "attribwrangle.idx");
    }

    #[test]
    fn namespaced_type_names_are_kept() {
        let node = NodeType::new("Sop", "studio::scatter::2.0").unwrap();
        assert_eq!(node.archive_file_name(), "studio::scatter::2.0.idx");
    }

    #[test]
    fn rejects_empty_and_nested_parts() {
        assert!(NodeType::new("", "box").is_err());
        assert!(NodeType::new("Sop", "").is_err());
        assert!(NodeType::new("Sop", "a/b").is_err());
        assert!(NodeType::new("..", "box").is_err());
        assert!(NodeType::parse("box").is_err());
        assert!(NodeType::parse("Sop/a/b").is_err());
    }
}
