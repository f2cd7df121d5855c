// ==========================================
// 热轧精整排产分析 - 影响预测领域模型
// ==========================================
// 职责: 候选材料 / 材料展示状态 / 影响预测结果
// 红线: 预测结果是一次性的, 不缓存、不持久化
// ==========================================

use crate::domain::types::{ImpactRisk, SchedState, UrgentLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CandidateMaterial - 候选材料
// ==========================================
// 展示层交互选择的材料, 成熟度/排产标志由上游提供
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMaterial {
    pub material_id: String,
    pub weight_t: f64, // 非有限值按 0 处理
    #[serde(default)]
    pub urgent_level: UrgentLevel,
    #[serde(default)]
    pub is_mature: Option<bool>,
    #[serde(default)]
    pub sched_state: Option<SchedState>,
    #[serde(default)]
    pub lock_flag: bool,
}

impl CandidateMaterial {
    /// 参与计算的吨位 (非有限值与负值视为 0)
    pub fn effective_weight_t(&self) -> f64 {
        if self.weight_t.is_finite() && self.weight_t > 0.0 {
            self.weight_t
        } else {
            0.0
        }
    }

    /// 展示状态
    ///
    /// 优先级: 未成熟 > 已排产 > 就绪 > 锁定 > 其他
    pub fn status(&self) -> MaterialStatus {
        let immature = self.is_mature == Some(false)
            || self.sched_state == Some(SchedState::PendingMature);
        if immature {
            return MaterialStatus::Immature;
        }
        match self.sched_state {
            Some(SchedState::Scheduled) => MaterialStatus::Scheduled,
            Some(SchedState::Ready) | Some(SchedState::ForceRelease) => MaterialStatus::Ready,
            _ if self.lock_flag || self.sched_state == Some(SchedState::Locked) => {
                MaterialStatus::Locked
            }
            _ => MaterialStatus::Other,
        }
    }
}

// ==========================================
// MaterialStatus - 材料展示状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialStatus {
    Immature,  // 未成熟
    Scheduled, // 已排产
    Ready,     // 就绪
    Locked,    // 锁定
    Other,     // 其他
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialStatus::Immature => write!(f, "IMMATURE"),
            MaterialStatus::Scheduled => write!(f, "SCHEDULED"),
            MaterialStatus::Ready => write!(f, "READY"),
            MaterialStatus::Locked => write!(f, "LOCKED"),
            MaterialStatus::Other => write!(f, "OTHER"),
        }
    }
}

/// 预测方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactDirection {
    Removal,
    Addition,
}

/// 提示信息类型
///
/// 与 message 文本一一对应, 便于展示层选择样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactMessageKind {
    /// 未选择材料
    NoSelection,
    /// 移除后回到目标产能以内
    ResolvedTarget,
    /// 移除后仍超目标, 但利用率明显下降
    ReducedUtilization,
    /// 仍超过限制产能
    StillOverLimit,
    /// 仍超过目标产能
    StillOverTarget,
    /// 普通变化
    Neutral,
    /// 添加后超过限制产能
    ExceedsLimit,
    /// 添加后超过目标产能
    ExceedsTarget,
    /// 添加后仍在目标产能以内
    WithinCapacity,
}

/// 材料明细 (按输入顺序)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDetail {
    pub material_id: String,
    pub weight_t: f64,
    pub urgent_level: UrgentLevel,
    pub status: MaterialStatus,
}

impl From<&CandidateMaterial> for MaterialDetail {
    fn from(material: &CandidateMaterial) -> Self {
        Self {
            material_id: material.material_id.clone(),
            weight_t: material.effective_weight_t(),
            urgent_level: material.urgent_level,
            status: material.status(),
        }
    }
}

// ==========================================
// ImpactPrediction - 影响预测结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPrediction {
    pub direction: ImpactDirection,

    // ===== 产能 =====
    pub original_capacity_t: f64,
    pub predicted_capacity_t: f64,
    pub capacity_delta_t: f64,
    pub affected_weight_t: f64,

    // ===== 利用率 (百分比) =====
    pub utilization_before_pct: f64,
    pub utilization_after_pct: f64,
    pub utilization_change_pct: f64,

    // ===== 阈值穿越 =====
    pub exceeds_target_before: bool,
    pub exceeds_target_after: bool,
    pub exceeds_limit_before: bool,
    pub exceeds_limit_after: bool,

    // ===== 结论 =====
    pub improves: bool,
    pub worsens: bool,
    pub risk: ImpactRisk,
    pub message_kind: ImpactMessageKind,
    pub message: String,

    pub material_details: Vec<MaterialDetail>,
}
