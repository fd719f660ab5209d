//! Serialization helpers for monetary amounts.
//!
//! Amounts are stored as `f64` but travel over the wire as strings with
//! exactly two decimal places, e.g. `"50.00"`. On the way in, clients may
//! send either a JSON number or the string form the API emits.

use serde::{Deserialize, Deserializer, Serializer, de};

/// Format an amount of money as a string with two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Serialize an amount of money as a two-decimal string, e.g. `"15.50"`.
pub fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_amount(*amount))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

/// Deserialize an amount of money from either a JSON number or a numeric
/// string such as `"15.50"`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(amount) => Ok(amount),
        AmountRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("could not parse {text:?} as an amount"))),
    }
}
