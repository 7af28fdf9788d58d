use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ClassificationResult;

/// Header row of the classification report
pub const RESULT_HEADERS: [&str; 3] = [
    "URL",
    "URL Classifications",
    "URL Classifications with Security Alert",
];

/// Write results as CSV, one row per URL.
pub fn write_results(path: impl AsRef<Path>, results: &[ClassificationResult]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    writer.write_record(RESULT_HEADERS)?;
    for result in results {
        let classifications = result.classifications_display();
        let alerts = result.security_alerts_display();
        writer.write_record([result.url.as_str(), classifications.as_str(), alerts.as_str()])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// Read a report written by `write_results`.
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<ClassificationResult>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;

    let mut results = Vec::new();
    for record in reader.records() {
        let record = record?;
        results.push(ClassificationResult {
            url: record.get(0).unwrap_or_default().to_string(),
            classifications: split_list(record.get(1).unwrap_or_default()),
            security_alert_classifications: split_list(record.get(2).unwrap_or_default()),
        });
    }
    Ok(results)
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
