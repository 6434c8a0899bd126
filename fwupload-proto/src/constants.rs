pub const FILE_FIELD: &'static str = "file";
pub const FILE_EXISTS: &'static str = "File Exists";

pub const FILE_NOT_SAVED: &'static str = "The file is not saved";
pub const FORM_SAVED: &'static str = "form data saved successfully";

pub const DEFAULT_HOST: &'static str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_REFRESHED: u32 = 0;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
