pub mod json_file;
pub mod traits;

pub use json_file::JsonFileSource;
pub use traits::TableSource;
