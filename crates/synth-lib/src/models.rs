//! Core data models for synthetic resource records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order shared with the reference dataset and every export.
///
/// Downstream joins match on exact column identity, so this order must not change.
pub const COLUMNS: [&str; 12] = [
    "resource_name",
    "business_unit",
    "environment",
    "cloud_provider",
    "instance_type",
    "application_id",
    "cpu_utilization",
    "memory_utilization",
    "storage_utilization",
    "monthly_cost_usd",
    "efficiency_score",
    "date",
];

/// One resource cost-and-usage observation
///
/// Field declaration order matches [`COLUMNS`]; the CSV layer relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub resource_name: String,
    pub business_unit: String,
    pub environment: String,
    pub cloud_provider: String,
    pub instance_type: String,
    pub application_id: String,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub storage_utilization: f64,
    pub monthly_cost_usd: f64,
    pub efficiency_score: f64,
    pub date: NaiveDate,
}

impl Record {
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::CpuUtilization => self.cpu_utilization,
            NumericField::MemoryUtilization => self.memory_utilization,
            NumericField::StorageUtilization => self.storage_utilization,
            NumericField::MonthlyCostUsd => self.monthly_cost_usd,
            NumericField::EfficiencyScore => self.efficiency_score,
        }
    }

    /// Copy of this record with one numeric field replaced
    pub fn with_numeric(&self, field: NumericField, value: f64) -> Self {
        let mut next = self.clone();
        *next.numeric_mut(field) = value;
        next
    }

    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::BusinessUnit => &self.business_unit,
            CategoricalField::Environment => &self.environment,
            CategoricalField::CloudProvider => &self.cloud_provider,
            CategoricalField::InstanceType => &self.instance_type,
        }
    }

    /// Copy of this record with one categorical field replaced.
    ///
    /// Identity fields are left alone; callers re-derive `resource_name`
    /// when the field is part of it.
    pub fn with_categorical(&self, field: CategoricalField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            CategoricalField::BusinessUnit => &mut next.business_unit,
            CategoricalField::Environment => &mut next.environment,
            CategoricalField::CloudProvider => &mut next.cloud_provider,
            CategoricalField::InstanceType => &mut next.instance_type,
        };
        *slot = value.into();
        next
    }

    /// CPU, memory and storage utilization, in that order
    pub fn utilizations(&self) -> [f64; 3] {
        [
            self.cpu_utilization,
            self.memory_utilization,
            self.storage_utilization,
        ]
    }

    /// The six-hex-digit id inside `resource_name`, if the name matches
    /// this record's provider, business unit and environment
    pub fn name_id(&self) -> Option<&str> {
        let prefix = format!(
            "{}-{}-db-",
            name_token(&self.cloud_provider),
            name_token(&self.business_unit)
        );
        let suffix = format!("-{}", name_token(&self.environment));
        let id = self
            .resource_name
            .strip_prefix(&prefix)?
            .strip_suffix(&suffix)?;
        let is_hex = id.len() == 6
            && id
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        is_hex.then_some(id)
    }

    fn numeric_mut(&mut self, field: NumericField) -> &mut f64 {
        match field {
            NumericField::CpuUtilization => &mut self.cpu_utilization,
            NumericField::MemoryUtilization => &mut self.memory_utilization,
            NumericField::StorageUtilization => &mut self.storage_utilization,
            NumericField::MonthlyCostUsd => &mut self.monthly_cost_usd,
            NumericField::EfficiencyScore => &mut self.efficiency_score,
        }
    }
}

/// Numeric fields constrained by a reference (min, max) range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    CpuUtilization,
    MemoryUtilization,
    StorageUtilization,
    MonthlyCostUsd,
    EfficiencyScore,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::CpuUtilization,
        NumericField::MemoryUtilization,
        NumericField::StorageUtilization,
        NumericField::MonthlyCostUsd,
        NumericField::EfficiencyScore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumericField::CpuUtilization => "cpu_utilization",
            NumericField::MemoryUtilization => "memory_utilization",
            NumericField::StorageUtilization => "storage_utilization",
            NumericField::MonthlyCostUsd => "monthly_cost_usd",
            NumericField::EfficiencyScore => "efficiency_score",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical fields drawn from a reference value set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    BusinessUnit,
    Environment,
    CloudProvider,
    InstanceType,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::BusinessUnit,
        CategoricalField::Environment,
        CategoricalField::CloudProvider,
        CategoricalField::InstanceType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::BusinessUnit => "business_unit",
            CategoricalField::Environment => "environment",
            CategoricalField::CloudProvider => "cloud_provider",
            CategoricalField::InstanceType => "instance_type",
        }
    }

    /// Whether a change to this field invalidates `resource_name`
    pub fn is_name_component(self) -> bool {
        !matches!(self, CategoricalField::InstanceType)
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase a value and replace spaces with hyphens for use in a resource name
pub fn name_token(value: &str) -> String {
    value.to_lowercase().replace(' ', "-")
}

/// Build `<provider>-<business_unit>-db-<6 hex>-<environment>`
pub fn resource_name(provider: &str, business_unit: &str, environment: &str, id: u32) -> String {
    format!(
        "{}-{}-db-{:06x}-{}",
        name_token(provider),
        name_token(business_unit),
        id,
        name_token(environment)
    )
}

/// Build `app-<4 digit zero-padded number>`
pub fn application_id(number: u32) -> String {
    format!("app-{:04}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            resource_name: "aws-finance-db-00002a-prod".to_string(),
            business_unit: "finance".to_string(),
            environment: "prod".to_string(),
            cloud_provider: "AWS".to_string(),
            instance_type: "large".to_string(),
            application_id: "app-0042".to_string(),
            cpu_utilization: 55.0,
            memory_utilization: 60.0,
            storage_utilization: 65.0,
            monthly_cost_usd: 1200.0,
            efficiency_score: 92.5,
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        }
    }

    #[test]
    fn test_resource_name_format() {
        assert_eq!(
            resource_name("Google Cloud", "Retail Banking", "Pre Prod", 0xabc),
            "google-cloud-retail-banking-db-000abc-pre-prod"
        );
        assert_eq!(
            resource_name("AWS", "finance", "prod", 999_999),
            "aws-finance-db-0f423f-prod"
        );
    }

    #[test]
    fn test_name_id() {
        let record = sample_record();
        assert_eq!(record.name_id(), Some("00002a"));

        let renamed = record.with_categorical(CategoricalField::Environment, "dev");
        assert_eq!(renamed.name_id(), None);

        let spaced = Record {
            resource_name: resource_name("Google Cloud", "Retail Banking", "Pre Prod", 0xabc),
            business_unit: "Retail Banking".to_string(),
            environment: "Pre Prod".to_string(),
            cloud_provider: "Google Cloud".to_string(),
            ..record.clone()
        };
        assert_eq!(spaced.name_id(), Some("000abc"));

        let uppercase = Record {
            resource_name: "aws-finance-db-00002A-prod".to_string(),
            ..record
        };
        assert_eq!(uppercase.name_id(), None);
    }

    #[test]
    fn test_application_id_format() {
        assert_eq!(application_id(7), "app-0007");
        assert_eq!(application_id(9999), "app-9999");
    }

    #[test]
    fn test_with_numeric_leaves_original_untouched() {
        let record = sample_record();
        let updated = record.with_numeric(NumericField::MonthlyCostUsd, 10.0);
        assert_eq!(updated.monthly_cost_usd, 10.0);
        assert_eq!(record.monthly_cost_usd, 1200.0);
        assert_eq!(updated.resource_name, record.resource_name);
    }

    #[test]
    fn test_with_categorical_does_not_rename() {
        let record = sample_record();
        let updated = record.with_categorical(CategoricalField::Environment, "dev");
        assert_eq!(updated.environment, "dev");
        assert_eq!(updated.categorical(CategoricalField::Environment), "dev");
        assert_eq!(updated.resource_name, record.resource_name);
    }

    #[test]
    fn test_numeric_accessors_cover_all_fields() {
        let record = sample_record();
        let values: Vec<f64> = NumericField::ALL.iter().map(|f| record.numeric(*f)).collect();
        assert_eq!(values, vec![55.0, 60.0, 65.0, 1200.0, 92.5]);
        assert_eq!(record.utilizations(), [55.0, 60.0, 65.0]);
    }

    #[test]
    fn test_name_components() {
        assert!(CategoricalField::BusinessUnit.is_name_component());
        assert!(CategoricalField::Environment.is_name_component());
        assert!(CategoricalField::CloudProvider.is_name_component());
        assert!(!CategoricalField::InstanceType.is_name_component());
    }

    #[test]
    fn test_column_names_match_field_names() {
        for field in NumericField::ALL {
            assert!(COLUMNS.contains(&field.name()));
        }
        for field in CategoricalField::ALL {
            assert!(COLUMNS.contains(&field.name()));
        }
    }
}
