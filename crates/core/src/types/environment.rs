//! Environment-related types for the interpreter process

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Deref;

/// Wrapper type for environment variables handed to the interpreter process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentVariables(HashMap<String, String>);

impl EnvironmentVariables {
    /// Create a new empty environment
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a variable by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }

    /// Get the number of variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator over the variables
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl Deref for EnvironmentVariables {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentVariables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_previous_value() {
        let mut env: EnvironmentVariables = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.insert("B", "3").as_deref(), Some("2"));
        assert_eq!(env.get("A").map(String::as_str), Some("1"));
        assert_eq!(env.get("B").map(String::as_str), Some("3"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let env: EnvironmentVariables = [("PHPRC", "/etc/php")].into_iter().collect();
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"PHPRC":"/etc/php"}"#);
    }
}
