pub mod worksheet_generator;

pub use worksheet_generator::WorksheetGenerator;
