//! Output formatting and persistence for prediction and stats results.
//!
//! Supports JSON output on stdout and CSV append of predictions.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::predict::PredictionResult;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Writes a result to `writer` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Prints a result to stdout as pretty-printed JSON, keeping logs on stderr
/// so the output can be piped.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    write_json(io::stdout().lock(), value)
}

/// Appends a [`PredictionResult`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, result: &PredictionResult) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(result)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn result() -> PredictionResult {
        PredictionResult {
            aqi: 312.5,
            category: Category::VeryPoor,
            city: "Delhi".into(),
            year: 2026,
            month: 12,
        }
    }

    #[test]
    fn test_write_json_emits_payload() {
        let mut buf = Vec::new();
        write_json(&mut buf, &result()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["category"], "Very Poor");
        assert_eq!(parsed["aqi"], 312.5);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&result()).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("aqi_insight_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &result()).unwrap();
        append_record(&path, &result()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "aqi,category,city,year,month");
        assert_eq!(lines[1], "312.5,Very Poor,Delhi,2026,12");

        fs::remove_file(&path).unwrap();
    }
}
