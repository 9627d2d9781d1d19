// Adapters layer: concrete implementations for files on disk and the formats
// the pipelines read and write.

pub mod converter_source;
pub mod storage;
pub mod svg;
pub mod task_source;
pub mod yaml_sink;

pub use storage::LocalStorage;
