use std::path::{Path, PathBuf};

use fwupload_proto::dto::FileDto;
use linked_hash_map::LinkedHashMap;
use uuid::Uuid;

use crate::{upload::UploadError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub index: usize,
    pub file: FileDto,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn new(index: usize, file: FileDto, source: FileSource) -> Self {
        Self {
            index,
            file,
            source,
        }
    }

    /// Same content under another name, as a fresh file for a new payload.
    pub fn renamed(&self, file_name: impl ToString) -> Self {
        let file = FileDto::new(Uuid::new_v4(), file_name, self.file.size);
        Self::new(0, file, self.source.clone())
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => Ok(tokio::fs::read(path).await?),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// The current contents of the file input, in selection order.
#[derive(Debug, Default, Clone)]
pub struct SelectedFiles {
    pub files: LinkedHashMap<String, SelectedFile>,
}

impl SelectedFiles {
    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.values().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn to_dtos(&self) -> Vec<FileDto> {
        self.iter().map(|file| file.file.clone()).collect()
    }

    pub fn total_size(&self) -> u64 {
        self.iter().map(|file| file.file.size).sum()
    }

    pub fn add_bytes(&mut self, file_name: impl ToString, bytes: Vec<u8>) {
        let id = Uuid::new_v4().to_string();
        let file = FileDto::new(&id, file_name, bytes.len() as u64);
        self.insert(id, file, FileSource::Memory(bytes));
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let invalid_path = || UploadError::InvalidPath(path.as_ref().to_path_buf());
        let base = path.as_ref().parent().ok_or_else(invalid_path)?.to_path_buf();

        for entry in walkdir::WalkDir::new(&path).sort_by_file_name() {
            let entry = entry?;
            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }

            let diff_path = pathdiff::diff_paths(entry_path, &base)
                .ok_or_else(|| UploadError::InvalidPath(entry_path.to_path_buf()))?;
            let file_name = match diff_path.to_str() {
                Some(name) => name.replace("\\", "/"),
                None => {
                    log::error!("ignore file: {:?}", entry_path);
                    continue;
                }
            };

            log::debug!("add file {}", file_name);
            self.add_file(entry_path, Some(file_name))?;
        }

        Ok(())
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, file_name: Option<String>) -> Result<()> {
        fn get_file_name(path: &Path) -> Option<String> {
            Some(path.file_name()?.to_str()?.to_string())
        }

        let path = path.as_ref();

        let id = Uuid::new_v4().to_string();
        let size = std::fs::metadata(path)?.len();
        let file_name = file_name.unwrap_or(get_file_name(path).unwrap_or(id.clone()));

        let file = FileDto::new(&id, file_name, size);
        self.insert(id, file, FileSource::Path(path.to_path_buf()));
        Ok(())
    }

    /// Files whose names carry no archive extension the server can unpack.
    pub fn unsupported(&self) -> Vec<&SelectedFile> {
        self.iter().filter(|file| !file.file.is_supported()).collect()
    }

    fn insert(&mut self, id: String, file: FileDto, source: FileSource) {
        self.files
            .insert(id, SelectedFile::new(self.files.len(), file, source));
    }
}
