//! 作业视图
//!
//! 以课程为单位展示作业及当前学生的提交状态，并提供提交与查看反馈两个对话框。
//!
//! - `loader`: 数据加载与过期结果丢弃
//! - `index`: 作业分组与提交索引
//! - `display` / `tree`: 展示状态与展示树
//! - `dialogs`: 提交对话框、反馈对话框
//! - `session`: 把以上部分组合成一个会话

pub mod dialogs;
pub mod display;
pub mod index;
pub mod loader;
pub mod session;
pub mod tree;

pub use dialogs::{DialogPhase, FeedbackView};
pub use display::{AssignmentDisplayState, RowAction};
pub use loader::AssignmentSource;
pub use session::{AssignmentViewer, Notice, NoticeKind};
pub use tree::{AssignmentRow, CourseSection, ViewerTree};
