//! 基础设施层
//!
//! 持有外部资源（存储、导出），只暴露能力

pub mod document_renderer;
pub mod key_value_store;

pub use document_renderer::{DocumentRenderer, HtmlFileRenderer};
pub use key_value_store::{FileStore, KeyValueStore, MemoryStore};
