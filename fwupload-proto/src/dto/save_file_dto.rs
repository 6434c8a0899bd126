use crate::FILE_EXISTS;

/// Plain-text body of a successful `save_file` response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveFileResponse {
    Saved(String),
    FileExists,
}

impl SaveFileResponse {
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();
        if body == FILE_EXISTS {
            SaveFileResponse::FileExists
        } else {
            SaveFileResponse::Saved(body)
        }
    }
}
