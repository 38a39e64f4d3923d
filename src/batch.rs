//! Solving every instance of a QAPLIB directory.
//!
//! For each `name.dat` in the data directory (sorted by file name) the
//! batch looks for `name.sln` in the solution directory, solves the
//! instance and records the gap to the reference cost.

use crate::error::{QapError, Result};
use crate::ga::GaConfig;
use crate::instance::Instance;
use crate::problem::solve_with_config;
use crate::report::GapReport;
use crate::solution::ReferenceSolution;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome for one instance of a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceReport {
    /// File name of the instance, e.g. `chr12a.dat`.
    pub instance: String,
    pub size: usize,
    pub permutation: Vec<usize>,
    pub gap: GapReport,
    pub elapsed_secs: f64,
}

impl fmt::Display for InstanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | time={:.2}s",
            self.instance, self.gap, self.elapsed_secs
        )
    }
}

/// Lists `*.dat` files in `data_dir`, sorted by file name.
pub fn instance_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| QapError::Io {
        path: data_dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(data_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "dat") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reference solution file for an instance: `solution_dir/<stem>.sln`.
///
/// Only the final `.dat` extension is replaced, so `v1.chr.dat` pairs with
/// `v1.chr.sln`.
pub fn solution_path(instance_path: &Path, solution_dir: &Path) -> PathBuf {
    let mut name = instance_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".sln");
    solution_dir.join(name)
}

/// Loads, solves and reports one instance.
///
/// An unreadable or malformed reference solution is logged and treated
/// as unavailable; only the instance itself can fail the call.
pub fn run_instance(
    instance_path: &Path,
    solution_dir: &Path,
    config: &GaConfig,
) -> Result<InstanceReport> {
    let name = instance_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| instance_path.display().to_string());
    tracing::info!(instance = %name, "processing instance");

    let instance = Instance::from_file(instance_path)?;

    let started = Instant::now();
    let solution = solve_with_config(&instance, config)?;
    let elapsed_secs = started.elapsed().as_secs_f64();

    let sln_path = solution_path(instance_path, solution_dir);
    let optimal = match ReferenceSolution::load_optional(&sln_path) {
        Ok(reference) => reference.map(|r| r.optimal_cost),
        Err(err) => {
            tracing::error!(path = %sln_path.display(), %err, "cannot use reference solution");
            None
        }
    };

    Ok(InstanceReport {
        instance: name,
        size: instance.size(),
        gap: GapReport::new(solution.cost, optimal),
        permutation: solution.permutation,
        elapsed_secs,
    })
}

/// Runs [`run_instance`] over every `.dat` file of `data_dir`.
///
/// Stops at the first instance that cannot be loaded or solved.
pub fn run_directory(
    data_dir: &Path,
    solution_dir: &Path,
    config: &GaConfig,
) -> Result<Vec<InstanceReport>> {
    let files = instance_files(data_dir)?;
    tracing::info!(count = files.len(), dir = %data_dir.display(), "found instance files");
    files
        .iter()
        .map(|path| run_instance(path, solution_dir, config))
        .collect()
}
