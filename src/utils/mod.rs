//! 工具函数模块

mod id;
mod matching;
mod time;
mod validators;

pub use id::*;
pub use matching::*;
pub use time::*;
pub use validators::*;
