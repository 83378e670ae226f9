//! Synthetic FinOps data generation
//!
//! This crate provides:
//! - The resource cost-and-usage record schema
//! - Reference statistics derived from an existing dataset
//! - A generational evolution engine (selection, crossover, mutation)
//! - CSV import, export and merge
//! - Metrics and structured logging

pub mod dataset;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod reference;

pub use engine::{EngineConfig, EvolutionEngine, GenerationSummary, Population};
pub use error::{EngineError, Result};
pub use models::*;
pub use observability::{render_metrics, EngineMetrics, StructuredLogger};
pub use reference::{NumericRange, ReferenceStats};
