// ==========================================
// 热轧精整排产分析 - 配置层
// ==========================================
// 职责: 静态配置 (换辊阈值), 支持机组级覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, AnalyticsConfig, ConfigManager, RollThresholds};
