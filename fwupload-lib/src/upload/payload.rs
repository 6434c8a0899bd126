use std::sync::Arc;

use futures_util::StreamExt;
use fwupload_proto::FILE_FIELD;
use reqwest::{
    multipart::{Form, Part},
    Body,
};
use tokio::{fs::File, sync::mpsc::Sender};
use tokio_util::io::ReaderStream;

use crate::{
    select::{FileSource, SelectedFile, SelectedFiles},
    Result,
};

use super::{ProgressTracker, UploadProgress};

const MEMORY_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct PayloadPart {
    pub field: String,
    pub file: SelectedFile,
}

/// Multipart content of one submission. Built fresh for every attempt.
#[derive(Debug, Default, Clone)]
pub struct UploadPayload {
    parts: Vec<PayloadPart>,
}

impl UploadPayload {
    pub fn from_selection(files: &SelectedFiles) -> Self {
        let mut payload = Self::default();
        for file in files.iter() {
            payload.append(FILE_FIELD, file.clone());
        }
        payload
    }

    pub fn single(field: impl ToString, file: SelectedFile) -> Self {
        let mut payload = Self::default();
        payload.append(field, file);
        payload
    }

    pub fn append(&mut self, field: impl ToString, file: SelectedFile) {
        self.parts.push(PayloadPart {
            field: field.to_string(),
            file,
        });
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.parts.iter().map(|part| part.file.file.size).sum()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|part| part.file.file.file_name.as_str())
            .collect()
    }

    /// Streams every part, reporting progress over the whole request.
    pub async fn into_form(self, progress_tx: Sender<UploadProgress>) -> Result<Form> {
        let tracker = Arc::new(ProgressTracker::new(self.total_size()));
        let mut form = Form::new();
        for part in self.parts {
            let file = &part.file.file;
            let body = part_body(&part.file, tracker.clone(), progress_tx.clone()).await?;
            let part_body = Part::stream_with_length(body, file.size)
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(part.field, part_body);
        }
        Ok(form)
    }
}

async fn part_body(
    file: &SelectedFile,
    tracker: Arc<ProgressTracker>,
    progress_tx: Sender<UploadProgress>,
) -> Result<Body> {
    let body = match &file.source {
        FileSource::Path(path) => {
            let mut reader_stream = ReaderStream::new(File::open(path).await?);
            let async_stream = async_stream::stream! {
                while let Some(chunk) = reader_stream.next().await {
                    if let Ok(chunk) = &chunk {
                        if let Some(progress) = tracker.advance(chunk.len() as u64) {
                            progress_tx.send(progress).await.ok();
                        }
                    }
                    yield chunk;
                }
            };
            Body::wrap_stream(async_stream)
        }
        FileSource::Memory(bytes) => {
            let bytes = bytes.clone();
            let async_stream = async_stream::stream! {
                for chunk in bytes.chunks(MEMORY_CHUNK_SIZE) {
                    if let Some(progress) = tracker.advance(chunk.len() as u64) {
                        progress_tx.send(progress).await.ok();
                    }
                    yield Ok::<_, std::io::Error>(chunk.to_vec());
                }
            };
            Body::wrap_stream(async_stream)
        }
    };
    Ok(body)
}
