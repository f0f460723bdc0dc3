//! Column means of a measurement file, read with polars.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;

use crate::output::COLUMNS;

/// Mean of every column of a headerless TSV measurement file, keyed by
/// column name. Rows are optionally skipped from the front (`skip`).
pub fn column_means(path: &Path, skip: usize) -> Result<Map<String, Value>> {
    let lf = LazyCsvReader::new(path)
        .with_separator(b'\t')
        .with_has_header(false)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {}", path.display()))?;
    let df = lf
        .slice(skip as i64, u32::MAX)
        .select([all().cast(DataType::Float64).mean()])
        .collect()
        .with_context(|| format!("aggregating {}", path.display()))?;
    if df.width() != COLUMNS.len() {
        bail!(
            "{} has {} columns, expected {}",
            path.display(),
            df.width(),
            COLUMNS.len()
        );
    }

    let mut means = Map::new();
    for (i, name) in COLUMNS.iter().enumerate() {
        let source = format!("column_{}", i + 1);
        let value = df.column(&source)?.f64()?.get(0);
        let value = value
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        means.insert((*name).to_string(), value);
    }
    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ROWS: &str = "10\t30\t1\t2\t3\t4\t0.5\t0\n\
                        20\t50\t2\t4\t6\t8\t0.25\t0\n\
                        30\t70\t3\t6\t9\t12\t0\t0\n";

    #[test]
    fn means_per_named_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cube-t.out");
        fs::write(&path, ROWS).unwrap();
        let means = column_means(&path, 0).unwrap();
        assert_eq!(means.len(), 8);
        assert_eq!(means["volume"], 20.0);
        assert_eq!(means["boundary"], 50.0);
        assert_eq!(means["mean_r4"], 8.0);
        assert_eq!(means["lambda"], 0.25);
    }

    #[test]
    fn skip_drops_leading_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cube-t.out");
        fs::write(&path, ROWS).unwrap();
        let means = column_means(&path, 2).unwrap();
        assert_eq!(means["volume"], 30.0);
    }

    #[test]
    fn wrong_width_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.out");
        fs::write(&path, "1\t2\t3\n4\t5\t6\n").unwrap();
        let err = column_means(&path, 0).unwrap_err();
        assert!(err.to_string().contains("3 columns"), "{err}");
    }
}
