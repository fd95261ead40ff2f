use std::collections::HashMap;

/// Exchange rates keyed by currency code, expressed as units of the local
/// currency per one USD. Represents a single point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
