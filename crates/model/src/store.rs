use std::fmt::{self, Display};

use crate::FactKind;
use crate::kind::KIND_COUNT;

const NOT_FETCHED: &str = "(not yet fetched)";

/// The latest successfully fetched value for each [`FactKind`].
///
/// A store starts out empty. It keeps at most one value per kind, and
/// setting a kind simply replaces whatever was there before. No history
/// is retained.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct FactStore {
    slots: [Option<String>; KIND_COUNT],
}

impl FactStore {
    /// Creates an empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last value stored for `kind`.
    #[inline]
    pub fn get(&self, kind: FactKind) -> Option<&str> {
        self.slots[kind.slot()].as_deref()
    }

    /// Overwrites the value stored for `kind`.
    ///
    /// The store does not validate anything, callers are expected to
    /// only pass values from successful fetches.
    #[inline]
    pub fn set<S: Into<String>>(&mut self, kind: FactKind, value: S) {
        self.slots[kind.slot()] = Some(value.into());
    }

    /// Returns `true` if nothing has been stored yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over every kind in render order, with its value if any.
    pub fn iter(&self) -> impl Iterator<Item = (FactKind, Option<&str>)> {
        FactKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Renders a human-readable summary, one line per kind.
    ///
    /// Every kind is always listed, in the order of [`FactKind::ALL`].
    pub fn render(&self) -> String {
        let mut result = String::new();
        for (kind, value) in self.iter() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&format!(
                "Latest {kind}: {}",
                value.unwrap_or(NOT_FETCHED)
            ));
        }
        result
    }
}

impl Display for FactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = FactStore::new();
        assert!(store.is_empty());
        for kind in FactKind::ALL {
            assert_eq!(store.get(kind), None);
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = FactStore::new();
        store.set(FactKind::CatFact, "Cats have whiskers.");
        store.set(FactKind::CatFact, "Cats sleep 70% of their lives.");

        assert_eq!(
            store.get(FactKind::CatFact),
            Some("Cats sleep 70% of their lives.")
        );
        assert_eq!(store.get(FactKind::DogImage), None);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_render_lists_every_kind_in_order() {
        let empty = FactStore::new().render();
        assert_eq!(
            empty,
            "Latest dog image: (not yet fetched)\nLatest cat fact: (not yet fetched)"
        );

        let mut store = FactStore::new();
        store.set(FactKind::CatFact, "Cats purr.");
        let rendered = store.render();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Latest dog image: (not yet fetched)");
        assert_eq!(lines[1], "Latest cat fact: Cats purr.");
        assert_eq!(format!("{store}"), rendered);
    }
}
