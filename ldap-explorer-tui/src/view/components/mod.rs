//! 跨视图共用的组件

pub mod help;
pub mod statusbar;
