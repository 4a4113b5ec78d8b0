pub mod board;
pub mod quadrant;
pub mod task;

pub use board::BoardColumns;
pub use quadrant::{Quadrants, StatusFilter};
pub use task::{FieldError, Task, TaskDraft, TaskStatus};
