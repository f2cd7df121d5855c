// ==========================================
// 热轧精整排产分析 - 引擎层
// ==========================================
// 职责: 聚合与预测, 只读输入、产出新结构
// 红线: 引擎不取数, 不持有跨调用状态
// ==========================================

pub mod coercion;
pub mod contract;
pub mod impact;
pub mod timeline;

// 重导出核心引擎
pub use contract::{representative_order, sort_for_display, ContractAggregator};
pub use impact::{ImpactPredictor, IMPROVE_UTILIZATION_FLOOR_PCT};
pub use timeline::{resolve_capacity, ResolvedCapacity, TimelineAggregator};
