// ==========================================
// 热轧精整排产分析 - 领域模型层
// ==========================================
// 职责: 定义输入行、派生结构与类型
// 红线: 不含取数逻辑, 不含聚合逻辑
// ==========================================

pub mod capacity;
pub mod failure;
pub mod impact;
pub mod plan;
pub mod types;
pub mod urgency_bucket;

// 重导出核心类型
pub use capacity::{CapacityConstraint, CapacityPoolRow, CapacityTimelineEntry, TimelineSegment};
pub use failure::{ContractAggregate, FailureStats, MaterialFailureRow};
pub use impact::{
    CandidateMaterial, ImpactDirection, ImpactMessageKind, ImpactPrediction, MaterialDetail,
    MaterialStatus,
};
pub use plan::{DateRange, PlanAssignmentRow, TimelineQuery};
pub use types::{ImpactRisk, RollStatus, SchedState, UrgentLevel};
pub use urgency_bucket::{UrgencyBucket, UrgencyBucketMap};
