//! Error types for the render-to-file pass.

use thiserror::Error;

use crate::types::TerminalContract;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to open output {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output")]
    Serialize(#[from] serde_json::Error),

    #[error("frame timestamp {pts} does not follow {previous}")]
    NonMonotonicTimestamp { pts: usize, previous: usize },

    #[error("frame is {width}x{height}, encoder expects {}x{}", .expected.width, .expected.height)]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: TerminalContract,
    },

    #[error("encoder already finished")]
    Finished,
}
