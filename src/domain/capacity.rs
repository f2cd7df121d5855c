// ==========================================
// 热轧精整排产分析 - 产能领域模型
// ==========================================
// 职责: 产能池快照行 / 产能时间线条目 / 产能约束接口
// ==========================================

use crate::domain::types::{RollStatus, UrgentLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// CapacityPoolRow - 产能池快照行
// ==========================================
// 任何数值字段都可能缺失或非有限 (缺失以 NaN 表示),
// 由 TimelineAggregator 按回退规则处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoolRow {
    pub machine_code: String,       // 机组代码
    pub plan_date: NaiveDate,       // 排产日期
    pub used_capacity_t: f64,       // 已使用产能 (后端快照)
    pub target_capacity_t: f64,     // 目标产能
    pub limit_capacity_t: f64,      // 上限产能
    pub accumulated_tonnage_t: f64, // 累计吨位 (换辊周期进度)
}

// ==========================================
// TimelineSegment - 时间线分段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub urgent_level: UrgentLevel,
    pub tonnage_t: f64,
    pub material_count: u32,
}

// ==========================================
// CapacityTimelineEntry - 产能时间线条目
// ==========================================
// 红线: 构造后 target_capacity_t > 0 且 limit_capacity_t > 0
// segments 固定四段, 严重度降序 (L3 → L0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityTimelineEntry {
    pub date: NaiveDate,
    pub machine_code: String,
    pub target_capacity_t: f64,
    pub limit_capacity_t: f64,
    pub actual_capacity_t: f64,
    pub segments: Vec<TimelineSegment>,
    pub roll_campaign_progress_t: f64,
    pub roll_change_threshold_t: f64,
    pub roll_suggest_threshold_t: f64,
    pub material_ids: BTreeSet<String>,
}

impl CapacityTimelineEntry {
    /// 分段吨位合计
    pub fn segment_total_t(&self) -> f64 {
        self.segments.iter().map(|s| s.tonnage_t).sum()
    }

    /// 产能利用率 (百分比, 相对目标产能)
    pub fn utilization_pct(&self) -> f64 {
        utilization_pct(self.actual_capacity_t, self.target_capacity_t)
    }

    /// 是否超过目标产能
    pub fn exceeds_target(&self) -> bool {
        self.actual_capacity_t > self.target_capacity_t
    }

    /// 指定等级的分段
    pub fn segment(&self, level: UrgentLevel) -> Option<&TimelineSegment> {
        self.segments.iter().find(|s| s.urgent_level == level)
    }

    /// 换辊状态
    ///
    /// - 累计吨位 >= 换辊阈值: HardStop
    /// - 累计吨位 >= 建议阈值: Suggest
    /// - 其他: Normal
    pub fn roll_status(&self) -> RollStatus {
        if self.roll_campaign_progress_t >= self.roll_change_threshold_t {
            RollStatus::HardStop
        } else if self.roll_campaign_progress_t >= self.roll_suggest_threshold_t {
            RollStatus::Suggest
        } else {
            RollStatus::Normal
        }
    }
}

/// 利用率百分比
///
/// target_capacity_t 非正时返回 0, 时间线条目保证不会出现该情况。
pub fn utilization_pct(capacity_t: f64, target_capacity_t: f64) -> f64 {
    if target_capacity_t > 0.0 {
        capacity_t / target_capacity_t * 100.0
    } else {
        0.0
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 以上限产能为基准的约束检查
pub trait CapacityConstraint {
    /// 检查是否可添加材料 (不超过上限)
    fn can_add_material(&self, weight_t: f64) -> bool;

    /// 检查是否超限
    fn is_overflow(&self) -> bool;

    /// 计算剩余产能
    fn remaining_capacity_t(&self) -> f64;

    /// 计算超限比例
    fn overflow_ratio(&self) -> f64;
}

impl CapacityConstraint for CapacityTimelineEntry {
    fn can_add_material(&self, weight_t: f64) -> bool {
        self.actual_capacity_t + weight_t <= self.limit_capacity_t
    }

    fn is_overflow(&self) -> bool {
        self.actual_capacity_t > self.limit_capacity_t
    }

    fn remaining_capacity_t(&self) -> f64 {
        (self.limit_capacity_t - self.actual_capacity_t).max(0.0)
    }

    /// 超限比例 (0.0 起), 相对 limit_capacity_t
    fn overflow_ratio(&self) -> f64 {
        if self.limit_capacity_t <= 0.0 {
            return 0.0;
        }
        ((self.actual_capacity_t - self.limit_capacity_t) / self.limit_capacity_t).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(actual: f64, target: f64, limit: f64) -> CapacityTimelineEntry {
        CapacityTimelineEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            machine_code: "H032".to_string(),
            target_capacity_t: target,
            limit_capacity_t: limit,
            actual_capacity_t: actual,
            segments: Vec::new(),
            roll_campaign_progress_t: 0.0,
            roll_change_threshold_t: 2500.0,
            roll_suggest_threshold_t: 1500.0,
            material_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_capacity_constraint() {
        let e = entry(130.0, 100.0, 120.0);
        assert!(e.is_overflow());
        assert!(e.exceeds_target());
        assert_eq!(e.remaining_capacity_t(), 0.0);
        assert!((e.overflow_ratio() - 10.0 / 120.0).abs() < 1e-9);

        let e = entry(90.0, 100.0, 120.0);
        assert!(!e.is_overflow());
        assert!(e.can_add_material(30.0));
        assert!(!e.can_add_material(30.5));
        assert_eq!(e.remaining_capacity_t(), 30.0);
        assert_eq!(e.utilization_pct(), 90.0);
    }

    #[test]
    fn test_roll_status() {
        let mut e = entry(0.0, 100.0, 100.0);
        assert_eq!(e.roll_status(), RollStatus::Normal);
        e.roll_campaign_progress_t = 1500.0;
        assert_eq!(e.roll_status(), RollStatus::Suggest);
        e.roll_campaign_progress_t = 2600.0;
        assert_eq!(e.roll_status(), RollStatus::HardStop);
    }
}
