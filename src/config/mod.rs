//! 配置管理模块

mod settings;

pub use settings::{
	Settings,
	ServerSettings,
	DataSettings,
	TrendSettings,
	StoreSettings,
	LoggingSettings,
};
