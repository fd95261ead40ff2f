//! Summary snapshot computed from the full store.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::SUMMARY_TOP_N;
use crate::countries::Country;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub name: String,
    pub estimated_gdp: Option<f64>,
}

/// What the summary image shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySnapshot {
    pub total_countries: usize,
    /// Up to five countries with the largest present estimate, largest first.
    pub top: Vec<SummaryEntry>,
    /// Newest `last_refreshed_at` in the store; `None` means never.
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl SummarySnapshot {
    /// Build a snapshot from countries given in store order. Ties in the
    /// estimate keep store order (the sort is stable).
    pub fn from_countries(countries: &[Country]) -> Self {
        let mut ranked: Vec<&Country> = countries
            .iter()
            .filter(|c| c.estimated_gdp.is_some())
            .collect();
        ranked.sort_by(|a, b| {
            b.estimated_gdp
                .partial_cmp(&a.estimated_gdp)
                .unwrap_or(Ordering::Equal)
        });

        let top = ranked
            .into_iter()
            .take(SUMMARY_TOP_N)
            .map(|c| SummaryEntry {
                name: c.name.clone(),
                estimated_gdp: c.estimated_gdp,
            })
            .collect();

        Self {
            total_countries: countries.len(),
            top,
            last_refreshed_at: countries.iter().map(|c| c.last_refreshed_at).max(),
        }
    }

    /// Text lines of the ranked list, e.g. `1. Nigeria - $123.45`.
    pub fn ranked_lines(&self) -> Vec<String> {
        self.top
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!("{}. {} - {}", i + 1, entry.name, format_gdp(entry.estimated_gdp))
            })
            .collect()
    }
}

pub fn format_gdp(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "N/A".to_string(),
    }
}

/// RFC 3339 at second precision, or `never`.
pub fn format_refreshed_at(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => "never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn country(id: i32, name: &str, gdp: Option<f64>, minutes: i64) -> Country {
        Country {
            id,
            name: name.to_string(),
            capital: String::new(),
            region: String::new(),
            population: 0,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: gdp,
            flag_url: String::new(),
            last_refreshed_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn empty_store_has_no_top_and_never_refreshed() {
        let snapshot = SummarySnapshot::from_countries(&[]);
        assert_eq!(snapshot.total_countries, 0);
        assert!(snapshot.top.is_empty());
        assert_eq!(snapshot.last_refreshed_at, None);
        assert_eq!(format_refreshed_at(snapshot.last_refreshed_at), "never");
    }

    #[test]
    fn top_five_skips_absent_and_orders_descending() {
        let countries = vec![
            country(1, "A", Some(10.0), 0),
            country(2, "B", None, 0),
            country(3, "C", Some(50.0), 0),
            country(4, "D", Some(0.0), 0),
            country(5, "E", Some(30.0), 0),
            country(6, "F", Some(40.0), 0),
            country(7, "G", Some(20.0), 5),
        ];
        let snapshot = SummarySnapshot::from_countries(&countries);
        let names: Vec<&str> = snapshot.top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "F", "E", "G", "A"]);
        assert_eq!(snapshot.total_countries, 7);
        assert_eq!(snapshot.last_refreshed_at, Some(countries[6].last_refreshed_at));
    }

    #[test]
    fn ties_keep_store_order() {
        let countries = vec![
            country(1, "First", Some(5.0), 0),
            country(2, "Second", Some(5.0), 0),
            country(3, "Third", Some(5.0), 0),
        ];
        let snapshot = SummarySnapshot::from_countries(&countries);
        let names: Vec<&str> = snapshot.top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn ranked_lines_format_values() {
        let snapshot = SummarySnapshot {
            total_countries: 2,
            top: vec![
                SummaryEntry {
                    name: "Nigeria".into(),
                    estimated_gdp: Some(1234.5),
                },
                SummaryEntry {
                    name: "Nowhere".into(),
                    estimated_gdp: None,
                },
            ],
            last_refreshed_at: None,
        };
        assert_eq!(
            snapshot.ranked_lines(),
            vec!["1. Nigeria - $1234.50", "2. Nowhere - N/A"]
        );
    }

    #[test]
    fn timestamp_format_is_rfc3339_seconds() {
        let ts = Utc.with_ymd_and_hms(2025, 10, 22, 14, 5, 9).unwrap();
        assert_eq!(format_refreshed_at(Some(ts)), "2025-10-22T14:05:09Z");
    }
}
