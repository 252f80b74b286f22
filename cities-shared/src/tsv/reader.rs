use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::RowRejection;
use super::factory::{ImportUser, OfferDraft, OfferFactory};
use super::record::OfferRecord;

/// File-level failure; row-level problems are reported per row instead.
#[derive(Debug, Error)]
#[error("can't read file {path}")]
pub struct ReadError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// The fate of one non-blank line, with its 1-based line number.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub line: usize,
    pub result: Result<OfferDraft, RowRejection>,
}

/// Bulk reader over one TSV file. Reads the whole file into memory and
/// produces a finite sequence of row outcomes in file order.
#[derive(Debug, Clone)]
pub struct TsvOfferReader {
    path: PathBuf,
}

impl TsvOfferReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-row mode: every non-blank line becomes an outcome the caller
    /// can act on immediately, accepted or rejected.
    pub fn read(&self, users: &[ImportUser]) -> Result<Vec<RowOutcome>, ReadError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ReadError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Self::parse_content(&content, users))
    }

    /// Materialized mode: only the accepted offers, rejections dropped.
    pub fn read_offers(&self, users: &[ImportUser]) -> Result<Vec<OfferDraft>, ReadError> {
        let outcomes = self.read(users)?;
        Ok(outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.ok())
            .collect())
    }

    /// Splits content into lines, skips blank ones, and drives the record
    /// parser and the offer factory over each remaining line.
    pub fn parse_content(content: &str, users: &[ImportUser]) -> Vec<RowOutcome> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| RowOutcome {
                line: index + 1,
                result: OfferRecord::parse_line(line)
                    .and_then(|record| OfferFactory::create(&record, users)),
            })
            .collect()
    }
}
