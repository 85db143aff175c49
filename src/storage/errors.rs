use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset at path [{path}] could not be opened: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("Dataset at path [{path}] is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error
    },
    #[error("Dataset at path [{path}] has {found} fields on line [{line}], expected at most {expected}")]
    RowTooWide {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize
    }
}
