// ==========================================
// 热轧精整排产分析 - 领域类型定义
// ==========================================
// 紧急等级 / 排产状态 / 换辊状态 / 影响风险
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 紧急等级 (Urgency Level)
// ==========================================
// 顺序即严重度: L0 < L1 < L2 < L3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UrgentLevel {
    L0, // 正常
    L1, // 关注
    L2, // 紧急
    L3, // 红线
}

impl UrgentLevel {
    /// 全部等级 (严重度升序)
    pub const ALL: [UrgentLevel; 4] = [
        UrgentLevel::L0,
        UrgentLevel::L1,
        UrgentLevel::L2,
        UrgentLevel::L3,
    ];

    /// 全部等级 (严重度降序, 用于分段展示)
    pub const SEVERITY_DESC: [UrgentLevel; 4] = [
        UrgentLevel::L3,
        UrgentLevel::L2,
        UrgentLevel::L1,
        UrgentLevel::L0,
    ];

    /// 从上游字符串解析紧急等级
    ///
    /// 缺失或无法识别的值一律视为 L0。
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "L1" => UrgentLevel::L1,
            "L2" => UrgentLevel::L2,
            "L3" => UrgentLevel::L3,
            _ => UrgentLevel::L0,
        }
    }
}

impl Default for UrgentLevel {
    fn default() -> Self {
        UrgentLevel::L0
    }
}

impl fmt::Display for UrgentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgentLevel::L0 => write!(f, "L0"),
            UrgentLevel::L1 => write!(f, "L1"),
            UrgentLevel::L2 => write!(f, "L2"),
            UrgentLevel::L3 => write!(f, "L3"),
        }
    }
}

// ==========================================
// 排产状态 (Schedule State)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与后端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedState {
    PendingMature, // 未成熟(冷料)
    Ready,         // 适温待排
    Locked,        // 人工锁定
    ForceRelease,  // 强制放行
    Blocked,       // 数据质量阻断
    Scheduled,     // 已排产
}

impl SchedState {
    /// 从上游字符串解析状态, 无法识别返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING_MATURE" => Some(SchedState::PendingMature),
            "READY" => Some(SchedState::Ready),
            "LOCKED" => Some(SchedState::Locked),
            "FORCE_RELEASE" => Some(SchedState::ForceRelease),
            "BLOCKED" => Some(SchedState::Blocked),
            "SCHEDULED" => Some(SchedState::Scheduled),
            _ => None,
        }
    }
}

impl fmt::Display for SchedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedState::PendingMature => write!(f, "PENDING_MATURE"),
            SchedState::Ready => write!(f, "READY"),
            SchedState::Locked => write!(f, "LOCKED"),
            SchedState::ForceRelease => write!(f, "FORCE_RELEASE"),
            SchedState::Blocked => write!(f, "BLOCKED"),
            SchedState::Scheduled => write!(f, "SCHEDULED"),
        }
    }
}

// ==========================================
// 换辊状态 (Roll Campaign Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollStatus {
    Normal,   // 正常
    Suggest,  // 建议换辊
    HardStop, // 强制换辊
}

impl fmt::Display for RollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollStatus::Normal => write!(f, "NORMAL"),
            RollStatus::Suggest => write!(f, "SUGGEST"),
            RollStatus::HardStop => write!(f, "HARD_STOP"),
        }
    }
}

// ==========================================
// 影响风险等级 (Impact Risk)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for ImpactRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactRisk::Low => write!(f, "LOW"),
            ImpactRisk::Medium => write!(f, "MEDIUM"),
            ImpactRisk::High => write!(f, "HIGH"),
        }
    }
}
