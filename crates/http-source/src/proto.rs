use pet_facts_model::FactKind;
use serde::Deserialize;
use serde_json::Value;

const DOG_SUCCESS_MARKER: &str = "success";

// -------------------------------
// Bodies received from the server
// -------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DogImageBody {
    WellFormed { message: String, status: String },
    Malformed(Value),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatFactBody {
    WellFormed { fact: String },
    Malformed(Value),
}

/// Decodes a response body for `kind` and extracts the fact from it.
///
/// The error is a human-readable reason why the body was rejected.
pub fn extract_fact(kind: FactKind, body: &[u8]) -> Result<String, String> {
    let fact = match kind {
        FactKind::DogImage => {
            match decode::<DogImageBody>(body)? {
                DogImageBody::WellFormed { message, status } => {
                    if status != DOG_SUCCESS_MARKER {
                        return Err(format!(
                            "unexpected status marker: {status:?}"
                        ));
                    }
                    message
                }
                DogImageBody::Malformed(value) => {
                    return Err(describe_malformed(
                        &value,
                        &["message", "status"],
                    ));
                }
            }
        }
        FactKind::CatFact => match decode::<CatFactBody>(body)? {
            CatFactBody::WellFormed { fact } => fact,
            CatFactBody::Malformed(value) => {
                return Err(describe_malformed(&value, &["fact"]));
            }
        },
    };

    if fact.trim().is_empty() {
        return Err(format!("the {kind} in the response is empty"));
    }
    Ok(fact)
}

#[inline]
fn decode<'de, T: Deserialize<'de>>(body: &'de [u8]) -> Result<T, String> {
    serde_json::from_slice(body).map_err(|err| format!("invalid JSON: {err}"))
}

fn describe_malformed(value: &Value, fields: &[&str]) -> String {
    let Some(object) = value.as_object() else {
        return "expected a JSON object".to_owned();
    };
    for field in fields {
        match object.get(*field) {
            None => return format!("missing field `{field}`"),
            Some(Value::String(_)) => {}
            Some(_) => return format!("field `{field}` is not a string"),
        }
    }
    "unexpected payload".to_owned()
}
