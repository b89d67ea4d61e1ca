//! User preferences.

use serde::{Deserialize, Serialize};

/// One-rep-max estimation formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneRmFormula {
    #[default]
    Epley,
    Brzycki,
}

impl OneRmFormula {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "epley" => Some(Self::Epley),
            "brzycki" => Some(Self::Brzycki),
            _ => None,
        }
    }

    /// Estimated one-rep max. Brzycki is undefined at 37+ reps; returns 0.
    pub fn one_rm(self, weight: f64, reps: u32) -> f64 {
        if weight <= 0.0 || reps == 0 {
            return 0.0;
        }
        match self {
            Self::Epley => weight * (1.0 + f64::from(reps) / 30.0),
            Self::Brzycki => {
                if reps >= 37 {
                    0.0
                } else {
                    weight * (36.0 / (37.0 - f64::from(reps)))
                }
            }
        }
    }
}

/// Flat record of user preferences. Always present; every field has a
/// default so partially-written settings never break a load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub units: String,
    pub rest_seconds_work: u32,
    pub rest_seconds_warmup: u32,
    pub rest_seconds_drop: u32,
    pub auto_rest: bool,
    pub warmup_percents: Vec<f64>,
    pub bar_weight: f64,
    pub plates: Vec<f64>,
    pub bodyweight: f64,
    pub one_rm_formula: OneRmFormula,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            units: "kg".to_string(),
            rest_seconds_work: 90,
            rest_seconds_warmup: 60,
            rest_seconds_drop: 45,
            auto_rest: true,
            warmup_percents: vec![40.0, 60.0, 80.0],
            bar_weight: 20.0,
            plates: vec![25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25],
            bodyweight: 75.0,
            one_rm_formula: OneRmFormula::Epley,
        }
    }
}
