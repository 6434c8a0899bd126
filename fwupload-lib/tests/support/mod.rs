#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use fwupload_lib::{
    upload::{ProgressTracker, UploadClient, UploadError, UploadPayload, UploadProgress},
    view::{UploadView, ViewError},
    Result,
};
use fwupload_proto::dto::SaveFileResponse;
use reqwest::StatusCode;
use tokio::sync::mpsc::Sender;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FileName(String),
    Progress(u8),
    Confirm(String),
    Prompt(String),
    Alert(String),
    Reload,
}

/// View that records every call and answers dialogs from a script.
#[derive(Default)]
pub struct RecordingView {
    pub events: Mutex<Vec<ViewEvent>>,
    pub confirms: Mutex<VecDeque<bool>>,
    pub prompts: Mutex<VecDeque<Option<String>>>,
    pub missing_elements: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(confirms: Vec<bool>, prompts: Vec<Option<&str>>) -> Self {
        Self {
            confirms: Mutex::new(confirms.into()),
            prompts: Mutex::new(prompts.into_iter().map(|p| p.map(str::to_owned)).collect()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        lock(&self.events).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Progress(percent) => Some(percent),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == ViewEvent::Reload)
            .count()
    }

    fn record(&self, event: ViewEvent) {
        lock(&self.events).push(event);
    }
}

#[async_trait]
impl UploadView for RecordingView {
    fn show_file_name(&self, name: &str) -> std::result::Result<(), ViewError> {
        if self.missing_elements {
            return Err(ViewError::MissingElement("uploadedFileNames".to_owned()));
        }
        self.record(ViewEvent::FileName(name.to_owned()));
        Ok(())
    }

    fn set_progress(&self, percent: u8) {
        self.record(ViewEvent::Progress(percent));
    }

    async fn confirm_conflict(&self, file_name: &str) -> bool {
        self.record(ViewEvent::Confirm(file_name.to_owned()));
        lock(&self.confirms).pop_front().unwrap_or(false)
    }

    async fn prompt_file_name(&self, default: &str) -> Option<String> {
        self.record(ViewEvent::Prompt(default.to_owned()));
        lock(&self.prompts).pop_front().flatten()
    }

    async fn alert(&self, message: &str) {
        self.record(ViewEvent::Alert(message.to_owned()));
    }

    fn reload(&self) {
        self.record(ViewEvent::Reload);
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Body(&'static str),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPart {
    pub field: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Client that answers from a script and keeps every payload it was given.
#[derive(Default)]
pub struct ScriptedClient {
    pub replies: Mutex<VecDeque<Reply>>,
    pub requests: Mutex<Vec<Vec<ReceivedPart>>>,
}

impl ScriptedClient {
    pub fn replying(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<Vec<ReceivedPart>> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl UploadClient for ScriptedClient {
    async fn post_files(
        &self,
        payload: UploadPayload,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<SaveFileResponse> {
        let tracker = ProgressTracker::new(payload.total_size());
        let mut parts = Vec::new();
        for part in payload.parts() {
            let content = part.file.read_bytes().await?;
            for chunk in content.chunks(3) {
                if let Some(progress) = tracker.advance(chunk.len() as u64) {
                    progress_tx.send(progress).await.ok();
                }
            }
            parts.push(ReceivedPart {
                field: part.field.clone(),
                file_name: part.file.file.file_name.clone(),
                content,
            });
        }
        lock(&self.requests).push(parts);

        let reply = lock(&self.replies).pop_front().unwrap_or(Reply::Status(500));
        match reply {
            Reply::Body(body) => Ok(SaveFileResponse::from_body(body)),
            Reply::Status(code) => {
                let status = StatusCode::from_u16(code).unwrap();
                Err(UploadError::Unknown(status).into())
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}
