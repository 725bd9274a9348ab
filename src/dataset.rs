//! Per-device dataset assembly.
//!
//! A device directory holds one `benign_traffic.csv` plus zero or more
//! attack captures (`<traffic-type>.csv`), all sharing the same numeric
//! column schema. `assemble` merges them into a single labeled table with
//! the benign rows first and every row tagged with the base name of the
//! file it came from.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::Matrix;

/// Label attached to rows of the mandatory benign capture.
pub const BENIGN_LABEL: &str = "benign_traffic";

const BENIGN_FILE: &str = "benign_traffic.csv";

#[derive(Clone, Debug)]
pub struct DeviceTable {
    pub columns: Vec<String>,
    pub features: Matrix,
    pub labels: Vec<String>,
}

impl DeviceTable {
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Writes the combined table, feature columns first and the label last.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        let mut header = self.columns.clone();
        header.push("label".to_string());
        writer.write_record(&header)?;
        for (row, label) in self
            .features
            .axis_iter(ndarray::Axis(0))
            .zip(self.labels.iter())
        {
            let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            record.push(label.clone());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

struct RawTable {
    label: String,
    rows: Vec<Vec<f64>>,
}

/// Last path component of a device directory.
pub fn device_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Merges every traffic capture in `dir` into one labeled table.
///
/// `benign_traffic.csv` seeds the table and is a hard requirement. The
/// remaining `.csv` files are taken in directory enumeration order, which
/// is not sorted.
pub fn assemble(dir: &Path) -> Result<DeviceTable> {
    let benign_path = dir.join(BENIGN_FILE);
    if !benign_path.is_file() {
        return Err(Error::MissingBenign(dir.to_path_buf()));
    }
    let (columns, benign_rows) = read_numeric_csv(&benign_path)?;
    let mut tables = vec![RawTable {
        label: BENIGN_LABEL.to_string(),
        rows: benign_rows,
    }];

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".csv") || name.contains("benign") {
            continue;
        }
        let path = entry.path();
        let (header, rows) = read_numeric_csv(&path)?;
        if header != columns {
            return Err(Error::SchemaMismatch { file: name });
        }
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(name);
        tables.push(RawTable { label, rows });
    }

    concat_tables(columns, tables)
}

/// Single concatenation of the per-file tables into one matrix.
fn concat_tables(columns: Vec<String>, tables: Vec<RawTable>) -> Result<DeviceTable> {
    let n_rows: usize = tables.iter().map(|table| table.rows.len()).sum();
    let n_cols = columns.len();
    if n_cols == 0 {
        return Err(Error::InvalidInput("captures have no columns".into()));
    }

    let mut features = Matrix::zeros((n_rows, n_cols));
    let mut labels = Vec::with_capacity(n_rows);
    let mut r = 0;
    for RawTable { label, rows } in tables {
        for row in rows {
            for (c, value) in row.into_iter().enumerate() {
                features[[r, c]] = value;
            }
            labels.push(label.clone());
            r += 1;
        }
    }

    Ok(DeviceTable {
        columns,
        features,
        labels,
    })
}

fn read_numeric_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(columns.len());
        for (c, cell) in record.iter().enumerate() {
            let value: f64 = cell.trim().parse().map_err(|_| Error::NonNumeric {
                file: file.clone(),
                // header line is row 1
                row: i + 2,
                column: columns.get(c).cloned().unwrap_or_default(),
                value: cell.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok((columns, rows))
}

/// Writes a bare matrix with positional column headers, e.g. the reduced
/// `<device>_pca.csv` artifact.
pub fn write_matrix_csv(path: &Path, matrix: &Matrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let header: Vec<String> = (0..matrix.ncols()).map(|c| c.to_string()).collect();
    writer.write_record(&header)?;
    for row in matrix.axis_iter(ndarray::Axis(0)) {
        let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
