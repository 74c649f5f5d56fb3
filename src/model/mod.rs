//! 与页面结构无关的通用数据模型。

pub mod generic;
pub mod page;
