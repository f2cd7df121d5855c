// ==========================================
// 热轧精整排产分析 - 排产明细输入模型
// ==========================================
// 职责: 定义排产明细行与时间线查询条件
// 红线: 只是上游快照, 分析层不回写
// ==========================================

use crate::domain::types::UrgentLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PlanAssignmentRow - 排产明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAssignmentRow {
    pub machine_code: String,      // 机组代码
    pub plan_date: NaiveDate,      // 排产日期
    #[serde(default)]
    pub urgent_level: UrgentLevel, // 紧急等级 (缺失视为 L0)
    pub weight_t: f64,             // 吨位 (可能非法, 聚合时过滤)
    pub material_id: String,       // 材料ID
}

impl PlanAssignmentRow {
    /// 吨位是否可参与聚合 (有限且为正)
    pub fn has_valid_weight(&self) -> bool {
        self.weight_t.is_finite() && self.weight_t > 0.0
    }
}

// ==========================================
// DateRange - 日期区间 (两端闭区间)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 单日区间
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// 不限日期
    pub fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    /// 是否包含该日期 (含两端)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// ==========================================
// TimelineQuery - 时间线查询条件
// ==========================================
// 由展示层的筛选状态转换而来, 分析层不持有任何全局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineQuery {
    /// 机组白名单, 为空表示不过滤机组
    pub machine_codes: Vec<String>,
    pub date_range: DateRange,
}

impl TimelineQuery {
    pub fn new(machine_codes: Vec<String>, date_range: DateRange) -> Self {
        Self {
            machine_codes,
            date_range,
        }
    }

    /// 不过滤机组的查询
    pub fn all_machines(date_range: DateRange) -> Self {
        Self::new(Vec::new(), date_range)
    }

    /// 机组 + 日期是否落在查询范围内
    pub fn matches(&self, machine_code: &str, plan_date: NaiveDate) -> bool {
        let machine_ok = self.machine_codes.is_empty()
            || self.machine_codes.iter().any(|m| m == machine_code);
        machine_ok && self.date_range.contains(plan_date)
    }
}
