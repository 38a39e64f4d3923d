//! Unpacking QAPLIB `.tar.gz` archives.
//!
//! QAPLIB distributes instances and reference solutions as two tarballs
//! (`qapdata.tar.gz`, `qapsoln.tar.gz`). [`extract_tar_gz`] unpacks one into
//! a directory that [`batch::run_directory`](crate::batch::run_directory)
//! can then read.

use crate::error::{QapError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io;
use std::path::Path;

/// Extracts the gzip-compressed tarball `archive` into `dest`, creating
/// `dest` if needed.
///
/// Entries whose path would land outside `dest` are skipped.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(io_error(dest))?;
    let file = File::open(archive).map_err(io_error(archive))?;
    tar::Archive::new(GzDecoder::new(file))
        .unpack(dest)
        .map_err(io_error(archive))?;
    tracing::info!(
        archive = %archive.display(),
        dest = %dest.display(),
        "extracted archive"
    );
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> QapError {
    let path = path.to_path_buf();
    move |source| QapError::Io { path, source }
}
