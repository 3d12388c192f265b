pub mod export_service;
pub mod formatter;
pub mod history_store;
pub mod prompt_builder;
pub mod response_validator;

pub use export_service::ExportService;
pub use formatter::{render_document, to_html, to_plain_text, DocumentOptions};
pub use history_store::{HistoryStore, HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS};
pub use prompt_builder::{build_prompt, MessageRole, PromptMessage, WorksheetPrompt};
pub use response_validator::{validate_response, ValidatedResponse};
