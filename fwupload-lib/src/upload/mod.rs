use std::path::PathBuf;

use async_trait::async_trait;
use fwupload_proto::dto::SaveFileResponse;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

use crate::Result;

mod client;
mod payload;
mod progress;

pub use client::*;
pub use payload::*;
pub use progress::*;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Nothing selected")]
    NothingSelected,
    #[error("Cannot select {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("The file name still exists after {0} attempts")]
    TooManyConflicts(u32),
    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),
    #[error("Unknown response status code: {0}")]
    Unknown(StatusCode),
}

/// Posts one payload to the `save_file` endpoint.
#[async_trait]
pub trait UploadClient: Send + Sync {
    async fn post_files(
        &self,
        payload: UploadPayload,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<SaveFileResponse>;
}
