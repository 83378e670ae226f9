//! Tabular import and export
//!
//! Reads reference datasets and writes evolved populations as CSV with the
//! fixed column order in [`COLUMNS`]. Input columns may appear in any order
//! and extra columns are ignored; a missing column is a field access error.

use crate::error::{EngineError, Result};
use crate::models::{Record, COLUMNS};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Read every record from a CSV file
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records_from(file)?;
    debug!(path = %path.display(), records = records.len(), "Read dataset");
    Ok(records)
}

/// Read every record from CSV data
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EngineError::field_access(column, "dataset header"));
        }
    }

    reader
        .deserialize::<Record>()
        .map(|row| row.map_err(EngineError::from))
        .collect()
}

/// Write records to a CSV file, header first
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_records_to(file, records)
}

/// Write records as CSV. The header is written even when `records` is empty.
pub fn write_records_to<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append `generated` beneath `reference` and write the combined table.
///
/// Returns the number of rows written.
pub fn merge_and_write(
    reference: &[Record],
    generated: &[Record],
    output: impl AsRef<Path>,
) -> Result<usize> {
    let combined: Vec<Record> = reference.iter().chain(generated).cloned().collect();
    write_records(output, &combined)?;
    Ok(combined.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
resource_name,business_unit,environment,cloud_provider,instance_type,application_id,cpu_utilization,memory_utilization,storage_utilization,monthly_cost_usd,efficiency_score,date
aws-finance-db-00a1b2-prod,finance,prod,AWS,large,app-0012,45.5,60.25,70,1200.5,91.2,2025-01-15
azure-hr-db-0f0f0f-dev,hr,dev,Azure,small,app-0420,12,30,22.5,150,65,2025-02-01
";

    fn generated_record() -> Record {
        Record {
            resource_name: "google-cloud-retail-db-123abc-prod".to_string(),
            business_unit: "retail".to_string(),
            environment: "prod".to_string(),
            cloud_provider: "Google Cloud".to_string(),
            instance_type: "medium".to_string(),
            application_id: "app-0001".to_string(),
            cpu_utilization: 50.0,
            memory_utilization: 55.0,
            storage_utilization: 60.0,
            monthly_cost_usd: 800.0,
            efficiency_score: 95.0,
            date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        }
    }

    #[test]
    fn test_read_records_from_csv() {
        let records = read_records_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].business_unit, "finance");
        assert_eq!(records[0].storage_utilization, 70.0);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn test_reordered_and_extra_columns() {
        let data = "\
tier,date,efficiency_score,monthly_cost_usd,storage_utilization,memory_utilization,cpu_utilization,application_id,instance_type,cloud_provider,environment,business_unit,resource_name
2,2025-03-03,80,300,40,50,60,app-0003,small,AWS,prod,hr,aws-hr-db-000003-prod
";
        let records = read_records_from(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cpu_utilization, 60.0);
        assert_eq!(records[0].resource_name, "aws-hr-db-000003-prod");
    }

    #[test]
    fn test_missing_column_is_field_access_error() {
        let data = "\
resource_name,business_unit,environment,cloud_provider,instance_type,application_id,cpu_utilization,memory_utilization,monthly_cost_usd,efficiency_score,date
aws-hr-db-000003-prod,hr,prod,AWS,small,app-0003,60,50,300,80,2025-03-03
";
        match read_records_from(data.as_bytes()) {
            Err(EngineError::FieldAccess { field, .. }) => {
                assert_eq!(field, "storage_utilization")
            }
            other => panic!("expected field access error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_value_is_dataset_error() {
        let data = SAMPLE.replace("45.5", "not-a-number");
        assert!(matches!(
            read_records_from(data.as_bytes()),
            Err(EngineError::Dataset(_))
        ));
    }

    #[test]
    fn test_written_header_uses_fixed_column_order() {
        let mut buffer = Vec::new();
        write_records_to(&mut buffer, &[generated_record()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert!(lines
            .next()
            .unwrap()
            .starts_with("google-cloud-retail-db-123abc-prod,retail,prod,Google Cloud,"));
        assert!(text.trim_end().ends_with("2026-11-01"));
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let mut buffer = Vec::new();
        write_records_to(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_merge_appends_generated_rows() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("enhanced.csv");
        let reference = read_records_from(SAMPLE.as_bytes()).unwrap();

        let rows = merge_and_write(&reference, &[generated_record()], &output).unwrap();
        assert_eq!(rows, 3);

        let merged = read_records(&output).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(&merged[..2], reference.as_slice());
        assert_eq!(merged[2], generated_record());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_records(dir.path().join("absent.csv")),
            Err(EngineError::Io(_))
        ));
    }
}
