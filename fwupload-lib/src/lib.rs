mod error;
mod form;
mod settings;
pub mod select;
pub mod upload;
pub mod view;
pub mod widget;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use error::*;
pub use form::*;
pub use settings::*;
