// ==========================================
// 热轧精整排产分析 - 核心库
// ==========================================
// 系统定位: 排产决策支持前端的分析聚合层
// - 产能时间线 (机组-日, 按紧急等级分段)
// - 合同失败聚合 (确定性代表材料)
// - 产能影响预测 (假设移除/添加材料)
// 红线: 只聚合与预测, 不排产、不校验业务规则、不持久化
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入行与派生结构
pub mod domain;

// 引擎层 - 聚合与预测
pub mod engine;

// 导入层 - 松散记录校正边界
pub mod importer;

// 配置层 - 换辊阈值
pub mod config;

// 服务层 - 取数协作方与全量刷新
pub mod service;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ImpactRisk, RollStatus, SchedState, UrgentLevel};

// 领域结构
pub use domain::{
    CandidateMaterial, CapacityPoolRow, CapacityTimelineEntry, ContractAggregate, DateRange,
    FailureStats, ImpactPrediction, MaterialFailureRow, PlanAssignmentRow, TimelineQuery,
    UrgencyBucketMap,
};

// 引擎
pub use engine::{ContractAggregator, ImpactPredictor, TimelineAggregator};

// 配置与服务
pub use config::{AnalyticsConfig, ConfigManager};
pub use error::{AnalyticsError, AnalyticsResult};
pub use service::{AnalyticsService, AnalyticsSnapshot, SchedulingDataSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "热轧精整排产分析";
