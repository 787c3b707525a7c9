//! Command-line argument descriptors of the forecasting tool.
//!
//! A second static table kept next to the catalog: the name, kind, documented
//! bounds and help text of every argument the forecasting front end accepts.
//! Bounds are descriptive; nothing here enforces them.
use crate::prelude::Real;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    Text,
    Int,
    Float,
    /// `YYYY-MM-DD`
    Date,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArgumentKind::Text => "text",
            ArgumentKind::Int => "int",
            ArgumentKind::Float => "float",
            ArgumentKind::Date => "date",
        };
        f.pad(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub kind: ArgumentKind,
    pub min: Option<Real>,
    pub max: Option<Real>,
    pub help: &'static str,
    pub required: bool,
}

impl ArgumentSpec {
    /// Long flag for this argument, e.g. `--n-days`.
    pub fn flag(&self) -> String {
        to_cli(self.name)
    }
}

macro_rules! arg {
    ($name:literal, $kind:ident, $min:expr, $max:expr, $help:literal, $required:literal) => {
        ArgumentSpec {
            name: $name,
            kind: ArgumentKind::$kind,
            min: $min,
            max: $max,
            help: $help,
            required: $required,
        }
    };
}

pub const ARGUMENTS: &[ArgumentSpec] = &[
    arg!("parameters", Text, None, None, "Parameters file.", false),
    arg!("current_hospitalized", Int, Some(0.0), None, "Currently hospitalized COVID-19 patients (>= 0)", true),
    arg!("current_date", Date, None, None, "Current date (default is today)", false),
    arg!("date_first_hospitalized", Date, None, None, "Date of first hospitalization", false),
    arg!("doubling_time", Float, Some(0.0), None, "Doubling time before social distancing (days)", true),
    arg!("hospitalized_days", Int, Some(0.0), None, "Average hospital length of stay (in days)", true),
    arg!("hospitalized_rate", Float, Some(0.00001), Some(1.0), "Hospitalized Rate: 0.00001 - 1.0", true),
    arg!("icu_days", Int, Some(0.0), None, "Average days in ICU", true),
    arg!("icu_rate", Float, Some(0.0), Some(1.0), "ICU rate: 0.0 - 1.0", true),
    arg!("market_share", Float, Some(0.00001), Some(1.0), "Hospital market share (0.00001 - 1.0)", true),
    arg!("infectious_days", Int, Some(0.0), None, "Infectious days", true),
    arg!("mitigation_date", Date, None, None, "Mitigation date for social distancing.", false),
    arg!("max_y_axis", Int, Some(0.0), None, "Maximum y axis", true),
    arg!("n_days", Int, Some(0.0), None, "Number of days to project >= 0", true),
    arg!("recovered", Int, Some(0.0), None, "Initial recovered >= 0", true),
    arg!("relative_contact_rate", Float, Some(0.0), Some(1.0), "Social distancing reduction rate: 0.0 - 1.0", true),
    arg!("population", Int, Some(1.0), None, "Regional population >= 1", true),
    arg!("ventilated_days", Int, Some(0.0), None, "Average days on ventilator", true),
    arg!("ventilated_rate", Float, Some(0.0), Some(1.0), "Ventilated Rate: 0.0 - 1.0", true),
];

/// Series labels used when charting a projection.
pub const DISPLAY_LABELS: &[(&str, &str)] = &[
    ("hospitalized", "Hospitalized"),
    ("icu", "ICU"),
    ("ventilated", "Ventilated"),
    ("day", "Day"),
    ("date", "Date"),
    ("susceptible", "Susceptible"),
    ("infected", "Infected"),
    ("recovered", "Recovered"),
];

/// Convert an argument name to its long flag.
pub fn to_cli(name: &str) -> String {
    format!("--{}", name.replace('_', "-"))
}

/// Look up an argument by name. Dashed spellings are accepted too.
pub fn argument(name: &str) -> Option<&'static ArgumentSpec> {
    let name = name.trim_start_matches('-').replace('-', "_");
    ARGUMENTS.iter().find(|a| a.name == name)
}

pub fn display_label(key: &str) -> Option<&'static str> {
    DISPLAY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn flags() {
        assert_eq!(to_cli("relative_contact_rate"), "--relative-contact-rate");
        assert_eq!(to_cli("parameters"), "--parameters");
        assert_eq!(argument("n_days").unwrap().flag(), "--n-days");
    }

    #[test]
    fn lookup_accepts_flag_spelling() {
        let arg = argument("--market-share").unwrap();
        assert_eq!(arg.kind, ArgumentKind::Float);
        assert_eq!(arg.min, Some(0.00001));
        assert_eq!(arg.max, Some(1.0));
        assert!(argument("unknown").is_none());
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = ARGUMENTS.iter().map(|a| a.name).collect();
        assert_eq!(names.len(), ARGUMENTS.len());
        assert!(!argument("parameters").unwrap().required);
    }

    #[test]
    fn labels() {
        assert_eq!(display_label("icu"), Some("ICU"));
        assert_eq!(display_label("nope"), None);
    }
}
