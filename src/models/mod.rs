//! 数据模型模块

mod alert;
mod analytics;
mod common;
mod outage;
mod reading;
mod region;
mod status;
mod trend;

pub use alert::*;
pub use analytics::*;
pub use common::*;
pub use outage::*;
pub use reading::*;
pub use region::*;
pub use status::*;
pub use trend::*;
