// Adapters layer: concrete implementations of the domain ports.

pub mod file;
pub mod http;

pub use file::FileImageSource;
pub use http::HttpImageSource;
