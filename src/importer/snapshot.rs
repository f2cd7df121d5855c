// ==========================================
// 热轧精整排产分析 - 快照导入
// ==========================================
// 职责: 快照文档 (三类原始记录) → 强类型行集合
// 文档格式: {"plan_items": [...], "capacity_pools": [...], "failure_rows": [...]}
// ==========================================

use crate::domain::capacity::CapacityPoolRow;
use crate::domain::failure::MaterialFailureRow;
use crate::domain::plan::PlanAssignmentRow;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::importer::field_mapper::FieldMapper;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// 原始快照文档
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, alias = "planItems")]
    pub plan_items: Vec<Value>,
    #[serde(default, alias = "capacityPools")]
    pub capacity_pools: Vec<Value>,
    #[serde(default, alias = "failureRows")]
    pub failure_rows: Vec<Value>,
}

/// 丢弃计数 (主键不可用的记录)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DroppedCounts {
    pub plan_items: usize,
    pub capacity_pools: usize,
    pub failure_rows: usize,
}

impl DroppedCounts {
    pub fn total(&self) -> usize {
        self.plan_items + self.capacity_pools + self.failure_rows
    }
}

/// 已导入的强类型快照
#[derive(Debug, Clone, Default)]
pub struct ImportedSnapshot {
    pub plan_rows: Vec<PlanAssignmentRow>,
    pub pool_rows: Vec<CapacityPoolRow>,
    pub failure_rows: Vec<MaterialFailureRow>,
    pub dropped: DroppedCounts,
}

impl ImportedSnapshot {
    /// 从快照 JSON 文本导入
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(AnalyticsError::InvalidSnapshot(
                "快照根节点必须是 JSON 对象".to_string(),
            ));
        }
        let raw: RawSnapshot = serde_json::from_value(value)?;
        Ok(Self::from_raw(&raw))
    }

    /// 从原始快照导入
    pub fn from_raw(raw: &RawSnapshot) -> Self {
        let mapper = FieldMapper;

        let plan_rows = map_all(&raw.plan_items, |v| mapper.map_plan_row(v));
        let pool_rows = map_all(&raw.capacity_pools, |v| mapper.map_pool_row(v));
        let failure_rows = map_all(&raw.failure_rows, |v| mapper.map_failure_row(v));

        let dropped = DroppedCounts {
            plan_items: raw.plan_items.len() - plan_rows.len(),
            capacity_pools: raw.capacity_pools.len() - pool_rows.len(),
            failure_rows: raw.failure_rows.len() - failure_rows.len(),
        };

        if dropped.total() > 0 {
            warn!(
                plan_items = dropped.plan_items,
                capacity_pools = dropped.capacity_pools,
                failure_rows = dropped.failure_rows,
                "快照中存在主键不可用的记录, 已丢弃"
            );
        }
        info!(
            plan_rows = plan_rows.len(),
            pool_rows = pool_rows.len(),
            failure_rows = failure_rows.len(),
            "快照导入完成"
        );

        Self {
            plan_rows,
            pool_rows,
            failure_rows,
            dropped,
        }
    }
}

fn map_all<T>(values: &[Value], f: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    values.iter().filter_map(f).collect()
}
