//! Fixed, read-only measurement table grouped by two categorical covariates
//!
//! Each observation carries a delivery-method label and a dose level. The
//! inference pipeline only ever consumes the table as `GroupKey -> values`
//! (pairwise testing) or as the labeled observations of one dose level
//! (permutation testing).

use crate::error::{InferenceError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Dose level with a total order, usable as a map key
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Dose(f64);

impl Dose {
    /// Wrap a finite dose value
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(InferenceError::InvalidArgument(format!(
                "dose must be finite, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Dose {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Dose {}

impl PartialOrd for Dose {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dose {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group identity: (delivery method, dose)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub method: String,
    pub dose: Dose,
}

impl GroupKey {
    pub fn new(method: impl Into<String>, dose: Dose) -> Self {
        Self {
            method: method.into(),
            dose,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.method, self.dose)
    }
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub value: f64,
    pub method: String,
    pub dose: Dose,
}

/// Immutable measurement table
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Build a dataset from `(value, method, dose)` rows
    ///
    /// # Errors
    /// `InvalidArgument` for an empty table or a non-finite value or dose.
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, S, f64)>,
        S: Into<String>,
    {
        let mut observations = Vec::new();
        for (value, method, dose) in records {
            if !value.is_finite() {
                return Err(InferenceError::InvalidArgument(format!(
                    "measurement must be finite, got {}",
                    value
                )));
            }
            observations.push(Observation {
                value,
                method: method.into(),
                dose: Dose::new(dose)?,
            });
        }

        if observations.is_empty() {
            return Err(InferenceError::InvalidArgument(
                "dataset must contain at least one observation".to_string(),
            ));
        }

        Ok(Self { observations })
    }

    /// The guinea-pig tooth growth table
    ///
    /// Odontoblast length for 60 animals, 10 per cell, by supplement
    /// (`VC` = ascorbic acid, `OJ` = orange juice) and dose (0.5, 1, 2 mg/day).
    pub fn tooth_growth() -> Self {
        let observations = TOOTH_GROWTH
            .iter()
            .flat_map(|(method, dose, values)| {
                values.iter().map(move |&value| Observation {
                    value,
                    method: (*method).to_string(),
                    dose: Dose(*dose),
                })
            })
            .collect();
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Method labels in order of first appearance
    pub fn method_levels(&self) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        for obs in &self.observations {
            if !levels.contains(&obs.method) {
                levels.push(obs.method.clone());
            }
        }
        levels
    }

    /// Distinct dose levels, ascending
    pub fn dose_levels(&self) -> Vec<Dose> {
        let mut levels: Vec<Dose> = self.observations.iter().map(|o| o.dose).collect();
        levels.sort();
        levels.dedup();
        levels
    }

    /// Measurements grouped by (method, dose), each in table order
    pub fn groups(&self) -> BTreeMap<GroupKey, Vec<f64>> {
        let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
        for obs in &self.observations {
            groups
                .entry(GroupKey::new(obs.method.clone(), obs.dose))
                .or_default()
                .push(obs.value);
        }
        groups
    }

    /// Values at `dose` carrying `method`, in table order
    pub fn values_for(&self, method: &str, dose: Dose) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| o.dose == dose && o.method == method)
            .map(|o| o.value)
            .collect()
    }
}

const TOOTH_GROWTH: [(&str, f64, [f64; 10]); 6] = [
    ("VC", 0.5, [4.2, 11.5, 7.3, 5.8, 6.4, 10.0, 11.2, 11.2, 5.2, 7.0]),
    ("VC", 1.0, [16.5, 16.5, 15.2, 17.3, 22.5, 17.3, 13.6, 14.5, 18.8, 15.5]),
    ("VC", 2.0, [23.6, 18.5, 33.9, 25.5, 26.4, 32.5, 26.7, 21.5, 23.3, 29.5]),
    ("OJ", 0.5, [15.2, 21.5, 17.6, 9.7, 14.5, 10.0, 8.2, 9.4, 16.5, 9.7]),
    ("OJ", 1.0, [19.7, 23.3, 23.6, 26.4, 20.0, 25.2, 25.8, 21.2, 14.5, 27.3]),
    ("OJ", 2.0, [25.5, 26.4, 22.4, 24.5, 24.8, 30.9, 26.4, 27.3, 29.4, 23.0]),
];
