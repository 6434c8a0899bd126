use fwupload_proto::{
    dto::{FileDto, SaveFileResponse},
    FILE_FIELD, FILE_NOT_SAVED, FORM_SAVED,
};
use tokio::sync::mpsc;

use crate::{
    select::SelectedFiles,
    upload::{UploadClient, UploadError, UploadPayload, UploadProgress},
    view::{UiEvent, UploadView, ViewError},
    DataForm, Error, Result, Settings,
};

/// Terminal state of one `post_files` flow.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The server accepted the payload; its response text was shown.
    Saved(String),
    /// The user refused to rename a conflicting file.
    Declined,
    /// The rename prompt was cancelled or answered with a blank name.
    Abandoned,
    Failed(String),
}

pub struct UploadWidget<C, V> {
    client: C,
    view: V,
    settings: Settings,
}

impl<C: UploadClient, V: UploadView> UploadWidget<C, V> {
    pub fn new(client: C, view: V, settings: Settings) -> Self {
        Self {
            client,
            view,
            settings,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn drag_over_handler(&self, event: &mut dyn UiEvent) {
        event.prevent_default();
    }

    pub async fn show_files(&self, files: &[FileDto]) {
        let shown = files
            .first()
            .ok_or(ViewError::EmptySelection)
            .and_then(|file| self.view.show_file_name(&file.file_name));
        if let Err(e) = shown {
            self.view.alert(&e.to_string()).await;
        }
    }

    pub fn save_files(&self, selection: &SelectedFiles) -> UploadPayload {
        let payload = UploadPayload::from_selection(selection);
        log::debug!("payload: {:?}", payload.file_names());
        payload
    }

    pub async fn submit(&self, selection: &SelectedFiles) -> UploadOutcome {
        if self.settings.strict_formats {
            if let Some(file) = selection.unsupported().first() {
                let e = UploadError::UnsupportedFormat(file.file.file_name.clone());
                return self.fail(e.into()).await;
            }
        }
        let payload = self.save_files(selection);
        self.post_files(selection, payload).await
    }

    /// Submits `payload`, resolving "File Exists" conflicts by renaming the
    /// first selected file, for at most `max_attempts` submissions.
    pub async fn post_files(
        &self,
        selection: &SelectedFiles,
        mut payload: UploadPayload,
    ) -> UploadOutcome {
        let mut attempt = 1;
        loop {
            if payload.is_empty() {
                return self.fail(UploadError::NothingSelected.into()).await;
            }

            log::info!("Uploading {:?} (attempt {})", payload.file_names(), attempt);
            let response = match self.send(payload).await {
                Ok(response) => response,
                Err(e) => {
                    log::error!("Failed to upload files: {}", e);
                    return self.fail(e).await;
                }
            };

            match response {
                SaveFileResponse::Saved(text) => {
                    self.view.alert(&text).await;
                    self.view.reload();
                    return UploadOutcome::Saved(text);
                }
                SaveFileResponse::FileExists => {
                    if attempt >= self.settings.max_attempts {
                        let e = UploadError::TooManyConflicts(attempt);
                        return self.fail(e.into()).await;
                    }
                    let original = match selection.first() {
                        Some(file) => file,
                        None => return self.fail(UploadError::NothingSelected.into()).await,
                    };
                    let file_name = &original.file.file_name;
                    log::info!("{} already exists on the server", file_name);

                    if !self.view.confirm_conflict(file_name).await {
                        self.view.alert(FILE_NOT_SAVED).await;
                        self.view.reload();
                        return UploadOutcome::Declined;
                    }
                    let new_name = self
                        .view
                        .prompt_file_name(file_name)
                        .await
                        .filter(|name| !name.trim().is_empty());
                    match new_name {
                        Some(new_name) => {
                            payload = UploadPayload::single(FILE_FIELD, original.renamed(new_name));
                            attempt += 1;
                        }
                        None => return UploadOutcome::Abandoned,
                    }
                }
            }
        }
    }

    pub async fn save_data_fields(&self, event: &mut dyn UiEvent, form: Option<&DataForm>) {
        event.prevent_default();
        match form {
            Some(form) => {
                log::debug!("firmwareDataForm has {} elements", form.len());
                self.view.alert(FORM_SAVED).await;
            }
            None => {
                let e = ViewError::MissingElement("firmwareDataForm".to_string());
                self.view.alert(&e.to_string()).await;
            }
        }
    }

    async fn send(&self, payload: UploadPayload) -> Result<SaveFileResponse> {
        let (progress_tx, mut progress_rx) = mpsc::channel::<UploadProgress>(100);
        let request = self.client.post_files(payload, progress_tx);
        tokio::pin!(request);

        let result = loop {
            tokio::select! {
                biased;
                Some(progress) = progress_rx.recv() => self.view.set_progress(progress.percent),
                result = &mut request => break result,
            }
        };
        while let Ok(progress) = progress_rx.try_recv() {
            self.view.set_progress(progress.percent);
        }
        result
    }

    async fn fail(&self, e: Error) -> UploadOutcome {
        let message = e.to_string();
        self.view.alert(&message).await;
        UploadOutcome::Failed(message)
    }
}
