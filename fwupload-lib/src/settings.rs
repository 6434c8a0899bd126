use fwupload_proto::{ApiRoute, DEFAULT_HOST, DEFAULT_MAX_ATTEMPTS, DEFAULT_PORT, DEFAULT_REFRESHED};

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub https: bool,
    /// Path segment of the upload page, `home/upload/<refreshed>/`
    pub refreshed: u32,
    /// Submissions allowed per upload, renamed resubmissions included
    pub max_attempts: u32,
    pub strict_formats: bool,
}

impl Settings {
    pub fn endpoint(&self) -> String {
        ApiRoute::SaveFile.target_raw(&self.host, self.port, self.https, self.refreshed)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            https: false,
            refreshed: DEFAULT_REFRESHED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strict_formats: false,
        }
    }
}
