use pet_facts_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// The preset result for one fetch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetFetch {
    /// The fetch succeeds with this value.
    #[serde(rename = "value")]
    Value(String),
    /// The fetch fails as if the request never completed.
    #[serde(rename = "transport_failure")]
    TransportFailure(String),
    /// The fetch fails as if the payload was malformed.
    #[serde(rename = "shape_failure")]
    ShapeFailure(String),
}

impl PresetFetch {
    /// Creates a successful preset.
    #[inline]
    pub fn value<S: Into<String>>(value: S) -> Self {
        Self::Value(value.into())
    }

    /// Creates a failing preset of the given kind.
    #[inline]
    pub fn failure<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        match kind {
            ErrorKind::Transport => Self::TransportFailure(message.into()),
            ErrorKind::Shape => Self::ShapeFailure(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_script() {
        let script: Vec<PresetFetch> = serde_json::from_str(
            r#"[
                { "type": "value", "data": "Cats purr." },
                { "type": "transport_failure", "data": "HTTP 500" },
                { "type": "shape_failure", "data": "missing field `fact`" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            script,
            vec![
                PresetFetch::value("Cats purr."),
                PresetFetch::failure(ErrorKind::Transport, "HTTP 500"),
                PresetFetch::failure(ErrorKind::Shape, "missing field `fact`"),
            ]
        );
    }
}
