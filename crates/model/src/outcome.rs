use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::FactKind;

/// The structured result of one fetch-and-remember action.
///
/// An outcome is either a success carrying the fetched `value`, or a
/// failure carrying an `error`, never both. The only ways to build one
/// are [`ActionOutcome::fetched`] and [`ActionOutcome::failed`], and
/// deserialization rejects any payload that mixes the two.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome")]
pub struct ActionOutcome {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    message: String,
}

impl ActionOutcome {
    /// Creates a successful outcome for `kind` with the fetched value.
    pub fn fetched<S: Into<String>>(kind: FactKind, value: S) -> Self {
        let value = value.into();
        Self {
            success: true,
            message: format!("Fetched {kind}: {value}"),
            value: Some(value),
            error: None,
        }
    }

    /// Creates a failed outcome for `kind` with an error description.
    pub fn failed<S: Into<String>>(kind: FactKind, error: S) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.into()),
            message: format!("Failed to fetch {kind}."),
        }
    }

    /// Returns whether the action succeeded.
    #[inline]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the fetched value, present only on success.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the error description, present only on failure.
    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns a message suitable for direct display.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} ({error})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Deserialize)]
struct RawOutcome {
    success: bool,
    value: Option<String>,
    error: Option<String>,
    message: String,
}

impl TryFrom<RawOutcome> for ActionOutcome {
    type Error = String;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        let consistent = match (raw.success, &raw.value, &raw.error) {
            (true, Some(_), None) => true,
            (false, None, Some(_)) => true,
            _ => false,
        };
        if !consistent {
            return Err(format!(
                "inconsistent outcome: success = {}, value present = {}, error present = {}",
                raw.success,
                raw.value.is_some(),
                raw.error.is_some()
            ));
        }
        Ok(Self {
            success: raw.success,
            value: raw.value,
            error: raw.error,
            message: raw.message,
        })
    }
}
