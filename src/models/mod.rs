pub mod feedback;
pub mod notebook;
pub mod submission;
pub mod topic;

pub use feedback::{CellAnnotation, DetailedFeedback, ErrorHighlight, StructuredFeedback};
pub use notebook::{extract_cells, Cell, CellType};
pub use submission::Submission;
pub use topic::{classify, Topic};
