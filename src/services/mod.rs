pub mod excel_writer;
pub mod llm_service;
pub mod report_service;
pub mod submission_store;

pub use excel_writer::ExcelWriter;
pub use llm_service::LlmService;
pub use report_service::{GradeStats, ReportRow, ReportService};
pub use submission_store::SubmissionStore;
