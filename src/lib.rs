//! SPAS - 智能电力预警系统后端服务
//!
//! 加纳电网电能质量监控，支持：
//! - 区域 CSV 数据加载与停电信息解析
//! - 电压 / 频率 / 稳定性状态分级
//! - 区域与读数预警生成
//! - 预警、停电、读数的内存存储与统计
//! - 趋势序列模拟与电能质量分析

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

pub use errors::AppError;
