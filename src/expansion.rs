//! Which day, if any, is showing its service rows.
//!
//! One [`Expansion`] value is owned by whatever drives the rendered table and
//! is handed to the renderer by reference. It is global to that table, not per
//! station, so at most one date is ever expanded.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    #[default]
    Collapsed,
    ExpandedOn(String),
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses `key` if it is the expanded day, otherwise expands it in
    /// place of whichever day was open. Returns the key now expanded.
    pub fn toggle(&mut self, key: &str) -> Option<&str> {
        *self = match self {
            Expansion::ExpandedOn(current) if current.as_str() == key => Expansion::Collapsed,
            _ => Expansion::ExpandedOn(key.to_string()),
        };
        debug!(key, expanded = ?self.expanded_key(), "Expansion toggled");
        self.expanded_key()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        matches!(self, Expansion::ExpandedOn(current) if current.as_str() == key)
    }

    pub fn expanded_key(&self) -> Option<&str> {
        match self {
            Expansion::Collapsed => None,
            Expansion::ExpandedOn(key) => Some(key.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_collapsed() {
        let expansion = Expansion::new();
        assert_eq!(expansion, Expansion::Collapsed);
        assert_eq!(expansion.expanded_key(), None);
        assert!(!expansion.is_expanded("a"));
    }

    #[test]
    fn test_toggle_expands_then_collapses() {
        let mut expansion = Expansion::new();

        assert_eq!(expansion.toggle("a"), Some("a"));
        assert!(expansion.is_expanded("a"));

        assert_eq!(expansion.toggle("a"), None);
        assert!(!expansion.is_expanded("a"));
        assert_eq!(expansion, Expansion::Collapsed);
    }

    #[test]
    fn test_toggle_other_key_replaces_expanded() {
        let mut expansion = Expansion::new();
        expansion.toggle("a");

        assert_eq!(expansion.toggle("b"), Some("b"));
        assert!(expansion.is_expanded("b"));
        assert!(!expansion.is_expanded("a"));
    }

    #[test]
    fn test_toggle_back_to_first_key() {
        let mut expansion = Expansion::new();
        expansion.toggle("a");
        expansion.toggle("b");
        expansion.toggle("a");

        assert_eq!(expansion.expanded_key(), Some("a"));
    }

    #[test]
    fn test_independent_instances() {
        let mut left = Expansion::new();
        let right = Expansion::new();
        left.toggle("a");

        assert!(left.is_expanded("a"));
        assert!(!right.is_expanded("a"));
    }
}
