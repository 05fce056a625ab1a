//! Dependency descriptor rewriting
//!
//! A descriptor file names the exact upstream revision an example depends
//! on with a single reference line of the form
//! `https://github.com/ARMmbed/mbed-os/#0789928ee7f2db08a419fa4a032fffd9bd477aa7`.
//! The rewriter re-pins that line to a new revision and leaves every other
//! byte of the file untouched.

use crate::error::RecoverableError;
use log::debug;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// What a rewrite did to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A reference line was replaced; the caller should stage the file
    Rewritten,
    /// No reference line matched; the file is byte-identical
    Unchanged,
}

/// Rewrites descriptor files for one library repository
pub struct DescriptorRewriter {
    reference: Regex,
    lib_repo: String,
}

impl DescriptorRewriter {
    /// Creates a rewriter matching references into `lib_repo`
    pub fn new(lib_repo: &str) -> Self {
        let pattern = format!(r"^{}/#[A-Za-z0-9]+", regex::escape(lib_repo));
        let reference = Regex::new(&pattern).expect("escaped repository url forms a valid pattern");
        Self {
            reference,
            lib_repo: lib_repo.to_string(),
        }
    }

    /// Re-pins the reference line of `path` to `revision`
    ///
    /// The original content is copied to a backup first and the new content
    /// is written to a temporary file that is renamed over the original, so
    /// a crash mid-rewrite never leaves a torn descriptor. The backup is
    /// removed once the rename has succeeded. A leftover backup or temp
    /// file from an interrupted earlier run is deleted before starting.
    ///
    /// A missing descriptor is a content bug in the target repository and
    /// is reported as an error; a descriptor with no matching reference
    /// line is left byte-identical and reported as `Unchanged`.
    pub fn rewrite(
        &self,
        path: &Path,
        revision: &str,
    ) -> Result<RewriteOutcome, RecoverableError> {
        if !path.is_file() {
            return Err(RecoverableError::missing_descriptor(path));
        }

        let io_err = |source| RecoverableError::rewrite_failed(path, source);

        let backup = sibling(path, "bak");
        let staging = sibling(path, "new");
        if backup.exists() {
            fs::remove_file(&backup).map_err(io_err)?;
        }
        if staging.exists() {
            fs::remove_file(&staging).map_err(io_err)?;
        }
        fs::copy(path, &backup).map_err(io_err)?;

        let reader = BufReader::new(File::open(path).map_err(io_err)?);
        let mut writer = BufWriter::new(File::create(&staging).map_err(io_err)?);
        let mut rewritten = false;

        for line in read_lines_keeping_terminator(reader) {
            let line = line.map_err(io_err)?;
            if self.reference.is_match(&line) {
                let terminator = line_terminator(&line);
                write!(writer, "{}/#{}{}", self.lib_repo, revision, terminator)
                    .map_err(io_err)?;
                rewritten = true;
            } else {
                writer.write_all(line.as_bytes()).map_err(io_err)?;
            }
        }

        writer.flush().map_err(io_err)?;
        drop(writer);
        fs::rename(&staging, path).map_err(io_err)?;
        fs::remove_file(&backup).map_err(io_err)?;

        if rewritten {
            debug!("re-pinned {} to {}", path.display(), revision);
            Ok(RewriteOutcome::Rewritten)
        } else {
            Ok(RewriteOutcome::Unchanged)
        }
    }
}

/// Path of a working file next to the descriptor, e.g. `mbed-os.lib.bak`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// The line terminator carried by `line`, if any
fn line_terminator(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Iterates lines with their terminators preserved
fn read_lines_keeping_terminator(
    mut reader: impl BufRead,
) -> impl Iterator<Item = std::io::Result<String>> {
    std::iter::from_fn(move || {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    })
}
