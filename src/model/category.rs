use serde::{Deserialize, Serialize};

/// The set of known category labels, deduplicated and kept in the order they were first seen.
///
/// Comparison is exact and case-sensitive: `Food` and `food` are two different categories.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories(Vec<String>);

impl Categories {
    pub fn new<S>(names: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        let mut categories = Self::default();
        for name in names {
            categories.insert(name);
        }
        categories
    }

    /// Appends `name` unless it is empty or already present. Returns `true` if it was appended.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn data(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut c = Categories::default();
        assert!(c.insert("Food"));
        assert!(c.insert("Transport"));
        assert!(!c.insert("Food"));
        assert_eq!(c.data(), &["Food".to_string(), "Transport".to_string()]);
    }

    #[test]
    fn test_insert_is_case_sensitive() {
        let mut c = Categories::new(["Food"]);
        assert!(c.insert("food"));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut c = Categories::default();
        assert!(!c.insert(""));
        assert!(c.is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let c = Categories::new(["A", "B"]);
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"["A","B"]"#);
    }
}
