//! Final-allocation report.

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::solver::Solver;

impl Solver {
    /// Append the final allocation to `path`: one `pair,project,pref` line
    /// per pair (pair and project 1-based), then the final energy.
    pub fn append_report(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("[report] failed to open {}", path.display()))?;
        let mut out = BufWriter::new(file);

        for (pair, project, rank) in self.allocation().entries() {
            writeln!(out, "{},{},{}", pair + 1, project + 1, rank)
                .with_context(|| format!("[report] failed to write to {}", path.display()))?;
        }
        writeln!(out, "Final energy: {:.6}", self.energy())
            .with_context(|| format!("[report] failed to write to {}", path.display()))?;

        out.flush().with_context(|| format!("[report] failed to flush {}", path.display()))
    }
}
