mod archive;
mod constants;
mod route;

pub mod dto;
pub use archive::*;
pub use constants::*;
pub use route::*;
