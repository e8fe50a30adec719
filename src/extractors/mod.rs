//! Request extractors with JSON error rejections.

pub mod path;

pub use path::ValidPath;
