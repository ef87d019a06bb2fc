//! 页面状态模块
//!
//! 定义各个视图的状态数据结构

mod query;
mod record;
mod start;
mod tree;

pub use query::{PageFetch, QueryError, QueryMode, QuerySession};
pub use record::{RecordRow, RecordState};
pub use start::{ConnectForm, FormField};
pub use tree::{TreeRow, TreeState};
