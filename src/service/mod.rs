// ==========================================
// 热轧精整排产分析 - 服务层
// ==========================================
// 职责: 连接取数协作方与聚合引擎
// ==========================================

pub mod analytics_service;
pub mod data_source;

pub use analytics_service::{AnalyticsService, AnalyticsSnapshot};
pub use data_source::{
    InMemoryDataSource, JsonFileDataSource, SchedulingDataSource, SourceRows,
};
