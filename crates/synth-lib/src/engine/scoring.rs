//! Fitness scoring
//!
//! Heuristic composite score, higher is better:
//! - minus the spread (population std dev) of CPU, memory and storage utilization
//! - a bonus when the efficiency score is above a threshold
//! - a bonus when mean utilization sits in the target band

use crate::models::Record;

/// Efficiency scores strictly above this earn [`EFFICIENCY_BONUS`]
pub const EFFICIENCY_THRESHOLD: f64 = 90.0;
pub const EFFICIENCY_BONUS: f64 = 10.0;

/// Inclusive band for mean utilization that earns [`UTILIZATION_BONUS`]
pub const UTILIZATION_BAND: (f64, f64) = (40.0, 80.0);
pub const UTILIZATION_BONUS: f64 = 5.0;

/// Score a record
pub fn fitness(record: &Record) -> f64 {
    let utilization = record.utilizations();
    let mut score = -population_std_dev(&utilization);

    if record.efficiency_score > EFFICIENCY_THRESHOLD {
        score += EFFICIENCY_BONUS;
    }

    let avg = mean(&utilization);
    if avg >= UTILIZATION_BAND.0 && avg <= UTILIZATION_BAND.1 {
        score += UTILIZATION_BONUS;
    }

    score
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor `n` (not `n - 1`)
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
