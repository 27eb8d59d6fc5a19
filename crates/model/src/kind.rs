use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Identifies an external fact source and the store slot it fills.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    /// A URL pointing to a random dog picture.
    DogImage,
    /// A random piece of cat trivia.
    CatFact,
}

pub(crate) const KIND_COUNT: usize = 2;

impl FactKind {
    /// All kinds, in the fixed order used for rendering.
    pub const ALL: [FactKind; KIND_COUNT] =
        [FactKind::DogImage, FactKind::CatFact];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            FactKind::DogImage => 0,
            FactKind::CatFact => 1,
        }
    }

    /// Returns a human-readable name, e.g. `dog image`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            FactKind::DogImage => "dog image",
            FactKind::CatFact => "cat fact",
        }
    }
}

impl Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_render_order() {
        for (idx, kind) in FactKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.slot(), idx);
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&FactKind::DogImage).unwrap(),
            r#""dog_image""#
        );
        let kind: FactKind = serde_json::from_str(r#""cat_fact""#).unwrap();
        assert_eq!(kind, FactKind::CatFact);
    }
}
