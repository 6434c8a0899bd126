use serde::{Deserialize, Serialize};

use crate::ArchiveFormat;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub id: String, // unique inside selection
    pub file_name: String,
    pub size: u64,
    pub content_type: String,
    pub format: Option<ArchiveFormat>,
}

impl FileDto {
    pub fn new(id: impl ToString, file_name: impl ToString, size: u64) -> Self {
        let file_name = file_name.to_string();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        let format = ArchiveFormat::from_file_name(&file_name);
        Self {
            id: id.to_string(),
            file_name,
            size,
            content_type,
            format,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.format.is_some()
    }
}
