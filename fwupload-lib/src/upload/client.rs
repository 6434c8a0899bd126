use async_trait::async_trait;
use fwupload_proto::dto::SaveFileResponse;
use once_cell::sync::Lazy;
use reqwest::Client;
use tokio::sync::mpsc::Sender;

use crate::{Result, Settings};

use super::{UploadClient, UploadError, UploadPayload, UploadProgress};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    reqwest::ClientBuilder::new()
        .build()
        .expect("Failed to create reqwest client")
});

#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    endpoint: String,
}

impl HttpUploadClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_endpoint(settings.endpoint())
    }

    pub fn with_endpoint(endpoint: impl ToString) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl UploadClient for HttpUploadClient {
    async fn post_files(
        &self,
        payload: UploadPayload,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<SaveFileResponse> {
        log::info!(
            "POST {} with {} file(s), {} bytes",
            self.endpoint,
            payload.len(),
            payload.total_size()
        );
        let form = payload.into_form(progress_tx).await?;
        let response = CLIENT.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("save_file responded with status {}", status);
            return Err(UploadError::Unknown(status).into());
        }
        let body = response.text().await?;
        log::debug!("save_file responded: {:?}", body);
        Ok(SaveFileResponse::from_body(body))
    }
}
