mod selected_file;

pub use selected_file::*;
