mod file_dto;
mod save_file_dto;

pub use file_dto::*;
pub use save_file_dto::*;
