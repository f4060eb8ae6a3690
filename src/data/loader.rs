use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, RawRow, COL_CI_HIGH, COL_CI_LOW, REQUIRED_COLUMNS};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a survey file could not be turned into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream could not be read or parsed.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column needed to build any record is absent from the header.
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean a survey CSV from disk.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut dataset = load_reader(file)?;
    dataset.source = Some(path.to_path_buf());
    Ok(dataset)
}

/// Load and clean survey CSV from any byte stream.
///
/// Rows keep their source order. Rows failing the retention predicate are
/// dropped without individual reporting; ragged rows are read leniently and
/// judged like any other. Cells that are not valid UTF-8 are decoded lossily,
/// so only a bad header or a failed read aborts the load.
pub fn load_reader<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    for column in [COL_CI_LOW, COL_CI_HIGH] {
        if !headers.iter().any(|h| h == column) {
            log::warn!("CSV has no '{column}' column; confidence bounds will be absent");
        }
    }

    let mut records = Vec::new();
    let mut rows_read = 0;

    for result in reader.byte_records() {
        let bytes = result?;
        rows_read += 1;
        let row = csv::StringRecord::from_byte_record_lossy(bytes);
        let raw: RawRow = match row.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                log::trace!("Skipping row {rows_read}: {e}");
                continue;
            }
        };
        if let Some(record) = normalize(&raw).into_record() {
            records.push(record);
        }
    }

    let dataset = Dataset {
        records,
        rows_read,
        source: None,
    };
    log::debug!(
        "Read {} rows, kept {}, dropped {}",
        dataset.rows_read,
        dataset.len(),
        dataset.rows_dropped()
    );
    Ok(dataset)
}
