use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identity of a selectable entry. Clones share the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Arc<str>);

impl Item {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn items_from_strings<I, S>(values: I) -> Vec<Item>
where
    I: IntoIterator<Item = S>,
    S: Into<Item>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::Item;
    use std::collections::HashSet;

    #[test]
    fn lookup_by_str_matches_owned_item() {
        let mut set = HashSet::new();
        set.insert(Item::from("Pikachu"));
        assert!(set.contains("Pikachu"));
        assert!(!set.contains("pikachu"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let item = Item::from("Eevee");
        let json = serde_json::to_string(&item).expect("serialize");
        assert_eq!(json, "\"Eevee\"");
        let back: Item = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }
}
