//! HTTP 处理器模块

mod alert_handler;
mod analytics_handler;
mod health_handler;
mod outage_handler;
mod power_data_handler;
mod power_handler;

pub use alert_handler::*;
pub use analytics_handler::*;
pub use health_handler::*;
pub use outage_handler::*;
pub use power_data_handler::*;
pub use power_handler::*;
