//! Shared building blocks used across views and the runtime.

pub mod select;
pub mod task;
pub mod text;
pub mod text_buffer;

pub use select::Selector;
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text_buffer::{CursorMove, TextBuffer};
