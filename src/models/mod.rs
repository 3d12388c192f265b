pub mod difficulty;
pub mod grade;
pub mod subject;
pub mod worksheet;
pub mod worksheet_config;
pub mod worksheet_type;

pub use difficulty::Difficulty;
pub use grade::Grade;
pub use subject::MathSubject;
pub use worksheet::{new_id, Worksheet, WorksheetHistory, WorksheetQuestion};
pub use worksheet_config::{
    WorksheetConfig, WorksheetRequest, DEFAULT_QUESTIONS_COUNT, QUESTIONS_COUNT_OPTIONS,
};
pub use worksheet_type::WorksheetType;
