use serde::{Deserialize, Deserializer};

/// One entry of the country directory as reported upstream.
///
/// Every field is optional on the wire. Missing or `null` values decode to the
/// field's zero value so that absence is handled by reconciliation, not here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCountry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_population")]
    pub population: i64,
    #[serde(default, rename = "flag", deserialize_with = "null_as_default")]
    pub flag_url: String,
    /// Currency entries in upstream order. Individual entries may be `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currencies: Vec<Option<CurrencyEntry>>,
}

/// A currency entry. Only the code is consumed; name and symbol are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyEntry {
    #[serde(default)]
    pub code: Option<String>,
}

impl CurrencyEntry {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Accepts integers as well as floats (some mirrors report `1.2e9`).
fn lenient_population<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)))
        .unwrap_or_default())
}
