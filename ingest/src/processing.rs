//! Per-file processing and the ingestion loop over a demo directory.

use std::path::{Path, PathBuf};

use diesel::prelude::*;

use analysis::store::MemoryStore;
use analysis::{AggregatorOptions, ProcessError, Summary};

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("cannot access {}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: analysis::trace::DecodeError,
    },
    #[error("cannot persist {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: analysis::store::StoreError,
    },
    #[error("database transaction for {} failed", .path.display())]
    Database {
        path: PathBuf,
        #[source]
        source: diesel::result::Error,
    },
}

impl FileError {
    fn from_process(path: &Path, err: ProcessError) -> Self {
        match err {
            ProcessError::Decode(source) => Self::Decode {
                path: path.to_path_buf(),
                source,
            },
            ProcessError::Store(source) => Self::Persist {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Access { path, .. }
            | Self::Decode { path, .. }
            | Self::Persist { path, .. }
            | Self::Database { path, .. } => path,
        }
    }

    /// Whether the whole run has to stop, as opposed to only this file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Persist { .. } | Self::Database { .. })
    }
}

#[derive(Debug, thiserror::Error)]
enum TransactionError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

#[derive(Debug)]
pub struct AnalysisInput {
    pub path: PathBuf,
    pub observed_at: chrono::DateTime<chrono::Utc>,
    data: memmap2::Mmap,
}

impl AnalysisInput {
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let access = |source| FileError::Access {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(access)?;
        let observed_at = metadata.modified().map_err(access)?.into();

        let file = std::fs::File::open(path).map_err(access)?;
        // The trace is only read and is not modified while processing.
        let data = unsafe { memmap2::MmapOptions::new().map(&file) }.map_err(access)?;

        Ok(Self {
            path: path.to_path_buf(),
            observed_at,
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Where processed files end up.
pub enum Target {
    Database(SqliteConnection),
    /// Aggregate without persisting anything, each file into a scratch store.
    DryRun,
}

impl Target {
    #[tracing::instrument(name = "File", skip_all, fields(path = %input.path.display()))]
    pub fn process(
        &mut self,
        input: &AnalysisInput,
        options: AggregatorOptions,
    ) -> Result<Summary, FileError> {
        match self {
            Self::Database(connection) => connection
                .transaction::<_, TransactionError, _>(|conn| {
                    let mut store = crate::storage::DieselStore::new(conn);
                    Ok(analysis::process(
                        input.data(),
                        input.observed_at,
                        options,
                        &mut store,
                    )?)
                })
                .map_err(|e| match e {
                    TransactionError::Process(e) => FileError::from_process(&input.path, e),
                    TransactionError::Database(source) => FileError::Database {
                        path: input.path.clone(),
                        source,
                    },
                }),
            Self::DryRun => {
                let mut store = MemoryStore::new();
                analysis::process(input.data(), input.observed_at, options, &mut store)
                    .map_err(|e| FileError::from_process(&input.path, e))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub rounds: usize,
}

/// Processes every trace below `root`. Files that cannot be read or decoded
/// are reported and skipped, store failures end the run.
#[tracing::instrument(skip(target, options))]
pub fn run(
    root: &Path,
    extension: &str,
    target: &mut Target,
    options: AggregatorOptions,
) -> Result<RunSummary, FileError> {
    let files = crate::demos::find_demos(root, extension).map_err(|source| FileError::Access {
        path: root.to_path_buf(),
        source,
    })?;

    tracing::info!("Found {} demos", files.len());

    let mut summary = RunSummary::default();
    for path in files {
        tracing::info!("Trying to parse: {}", path.display());

        let result = AnalysisInput::load(&path).and_then(|input| target.process(&input, options));
        match result {
            Ok(file_summary) => {
                summary.processed += 1;
                summary.rounds += file_summary.rounds_stored;
            }
            Err(e) if e.is_fatal() => {
                tracing::error!(error = ?e, "Aborting run");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(path = %e.path().display(), error = ?e, "Skipping demo");
                summary.failed += 1;
            }
        };
    }

    Ok(summary)
}
