//! Reference statistics table
//!
//! Read-only catalog of per-field numeric ranges and categorical value sets
//! derived from an existing dataset. The engine only ever draws from it.

use crate::error::{EngineError, Result};
use crate::models::{CategoricalField, NumericField, Record};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Inclusive (min, max) range observed for a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// A range with min == max; resampling it yields the constant
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Draw uniformly from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.is_degenerate() {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    fn check(&self, field: NumericField) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(EngineError::configuration(format!(
                "{} range ({}, {}) is not finite",
                field, self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(EngineError::configuration(format!(
                "{} range has min {} greater than max {}",
                field, self.min, self.max
            )));
        }
        if !(self.max - self.min).is_finite() {
            return Err(EngineError::configuration(format!(
                "{} range ({}, {}) is too wide to sample",
                field, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Immutable snapshot of reference ranges and value sets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStats {
    ranges: BTreeMap<NumericField, NumericRange>,
    values: BTreeMap<CategoricalField, Vec<String>>,
}

impl ReferenceStats {
    pub fn new(
        ranges: BTreeMap<NumericField, NumericRange>,
        values: BTreeMap<CategoricalField, Vec<String>>,
    ) -> Self {
        Self { ranges, values }
    }

    /// Set the range of a numeric field
    pub fn with_range(mut self, field: NumericField, min: f64, max: f64) -> Self {
        self.ranges.insert(field, NumericRange::new(min, max));
        self
    }

    /// Set the value set of a categorical field
    pub fn with_values<I, S>(mut self, field: CategoricalField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(field, values.into_iter().map(Into::into).collect());
        self
    }

    /// Derive statistics from existing records.
    ///
    /// Ranges are the observed min and max. Value sets keep first-seen order
    /// so that seeded runs draw identically.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        if records.is_empty() {
            return Err(EngineError::configuration(
                "reference dataset contains no records",
            ));
        }

        let mut ranges = BTreeMap::new();
        for field in NumericField::ALL {
            let (min, max) = records.iter().map(|r| r.numeric(field)).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), v| (lo.min(v), hi.max(v)),
            );
            ranges.insert(field, NumericRange::new(min, max));
        }

        let mut values = BTreeMap::new();
        for field in CategoricalField::ALL {
            let mut seen = HashSet::new();
            let distinct: Vec<String> = records
                .iter()
                .map(|r| r.categorical(field))
                .filter(|v| seen.insert(*v))
                .map(str::to_string)
                .collect();
            values.insert(field, distinct);
        }

        Ok(Self { ranges, values })
    }

    /// Check that every field is present and usable
    pub fn validate(&self) -> Result<()> {
        for field in NumericField::ALL {
            let range = self.ranges.get(&field).ok_or_else(|| {
                EngineError::configuration(format!("no reference range for {}", field))
            })?;
            range.check(field)?;
        }
        for field in CategoricalField::ALL {
            match self.values.get(&field) {
                Some(values) if !values.is_empty() => {}
                Some(_) => {
                    return Err(EngineError::configuration(format!(
                        "reference value set for {} is empty",
                        field
                    )))
                }
                None => {
                    return Err(EngineError::configuration(format!(
                        "no reference value set for {}",
                        field
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn range(&self, field: NumericField) -> Result<NumericRange> {
        self.ranges
            .get(&field)
            .copied()
            .ok_or_else(|| EngineError::field_access(field.name(), "reference ranges"))
    }

    pub fn values(&self, field: CategoricalField) -> Result<&[String]> {
        self.values
            .get(&field)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::field_access(field.name(), "reference value sets"))
    }

    pub fn sample_numeric<R: Rng + ?Sized>(&self, field: NumericField, rng: &mut R) -> Result<f64> {
        Ok(self.range(field)?.sample(rng))
    }

    pub fn sample_categorical<R: Rng + ?Sized>(
        &self,
        field: CategoricalField,
        rng: &mut R,
    ) -> Result<String> {
        self.values(field)?
            .choose(rng)
            .cloned()
            .ok_or_else(|| EngineError::field_access(field.name(), "empty reference value set"))
    }
}
