//! Stored survey responses: the persisted record, its queries and the CSV export.

pub mod export;
pub mod queries;
pub mod types;

pub use export::{csv_filename, to_csv};
pub use queries::{count, create, delete, find_all, find_by_id};
pub use types::{NewSurveyResponse, SurveyResponse};
