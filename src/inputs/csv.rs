//! CSV grid I/O.
//!
//! Both input files are header-less numeric grids with one row per project.
//! Blank cells read as 0 and zeros serialise back to blank cells, so a
//! parse/serialise/parse round trip is the identity.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{
    frame::DataFrame,
    io::{SerReader, SerWriter},
    prelude::{Column, CsvReadOptions, CsvWriter, DataType, NamedFrom},
    series::Series,
};

use crate::inputs::matrix::{MAX_RANK, Preferences, Workloads};

/// Read the ranked-choice grid (one column per pair) from `path`.
pub fn read_preferences(path: &Path, num_projects: usize, num_pairs: usize) -> Result<Preferences> {
    let cells = read_grid(path, num_projects, num_pairs, "choices")?;

    let mut ranks = Vec::with_capacity(cells.len());
    for (index, &value) in cells.iter().enumerate() {
        ensure!(
            value.fract() == 0.0 && (0.0..=MAX_RANK as f64).contains(&value),
            "[inputs::csv] choices cell ({},{}) holds {}, expected blank or a rank in 1..={}",
            index / num_pairs + 1,
            index % num_pairs + 1,
            value,
            MAX_RANK,
        );
        ranks.push(value as u8);
    }

    Preferences::new(num_projects, num_pairs, ranks)
}

/// Read the supervisor workload grid (one column per supervisor) from `path`.
pub fn read_workloads(path: &Path, num_projects: usize, num_supervisors: usize) -> Result<Workloads> {
    let cells = read_grid(path, num_projects, num_supervisors, "workloads")?;
    Workloads::new(num_projects, num_supervisors, cells)
}

/// Serialise the choice grid to `path`, writing unranked cells blank.
pub fn write_preferences(prefs: &Preferences, path: &Path) -> Result<()> {
    let columns = (0..prefs.num_pairs())
        .map(|pair| {
            let cells = (0..prefs.num_projects())
                .map(|project| match prefs.rank(project, pair) {
                    0 => None,
                    rank => Some(rank as i64),
                })
                .collect::<Vec<_>>();
            Series::new(format!("pair_{}", pair + 1).into(), cells).into()
        })
        .collect::<Vec<Column>>();

    write_grid(columns, path)
}

/// Serialise the workload grid to `path`, writing zero loads blank.
pub fn write_workloads(loads: &Workloads, path: &Path) -> Result<()> {
    let columns = (0..loads.num_supervisors())
        .map(|supervisor| {
            let cells = (0..loads.num_projects())
                .map(|project| match loads.weight(project, supervisor) {
                    w if w == 0.0 => None,
                    w => Some(w),
                })
                .collect::<Vec<_>>();
            Series::new(format!("supervisor_{}", supervisor + 1).into(), cells).into()
        })
        .collect::<Vec<Column>>();

    write_grid(columns, path)
}

/// Read a header-less numeric grid, mapping blank cells to 0.0 and checking
/// the declared shape.
fn read_grid(path: &Path, rows: usize, cols: usize, kind: &str) -> Result<Vec<f64>> {
    let file = File::open(path)
        .with_context(|| format!("[inputs::csv] failed to open {} file: {}", kind, path.display()))?;
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[inputs::csv] failed to read {} CSV from {}", kind, path.display()))?;

    ensure!(
        df.height() == rows,
        "[inputs::csv] {} file has {} rows, expected {}",
        kind,
        df.height(),
        rows,
    );
    ensure!(
        df.width() == cols,
        "[inputs::csv] {} file has {} columns, expected {}",
        kind,
        df.width(),
        cols,
    );

    let mut cells = vec![0.0f64; rows * cols];
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let values = column
            .cast(&DataType::Float64)
            .with_context(|| format!("[inputs::csv] {} column {} is not numeric", kind, col_idx + 1))?;
        for (row_idx, value) in values.f64()?.into_iter().enumerate() {
            cells[row_idx * cols + col_idx] = value.unwrap_or(0.0);
        }
    }
    Ok(cells)
}

fn write_grid(columns: Vec<Column>, path: &Path) -> Result<()> {
    let mut df = DataFrame::new(columns)?;
    let file = File::create(path)
        .with_context(|| format!("[inputs::csv] failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(false)
        .finish(&mut df)
        .with_context(|| format!("[inputs::csv] failed to write CSV to {}", path.display()))
}
