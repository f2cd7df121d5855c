// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use hot_rolling_analytics::domain::{
    CandidateMaterial, CapacityPoolRow, CapacityTimelineEntry, MaterialFailureRow,
    PlanAssignmentRow, SchedState, UrgentLevel,
};
use std::collections::BTreeSet;

/// 构造日期 (测试数据保证合法)
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// PlanAssignmentRow 构建器
// ==========================================

pub struct PlanRowBuilder {
    material_id: String,
    machine_code: String,
    plan_date: NaiveDate,
    urgent_level: UrgentLevel,
    weight_t: f64,
}

impl PlanRowBuilder {
    pub fn new(material_id: &str) -> Self {
        Self {
            material_id: material_id.to_string(),
            machine_code: "H032".to_string(),
            plan_date: date(2026, 1, 20),
            urgent_level: UrgentLevel::L0,
            weight_t: 10.0,
        }
    }

    pub fn machine(mut self, machine: &str) -> Self {
        self.machine_code = machine.to_string();
        self
    }

    pub fn plan_date(mut self, plan_date: NaiveDate) -> Self {
        self.plan_date = plan_date;
        self
    }

    pub fn urgent_level(mut self, level: UrgentLevel) -> Self {
        self.urgent_level = level;
        self
    }

    pub fn weight(mut self, weight_t: f64) -> Self {
        self.weight_t = weight_t;
        self
    }

    pub fn build(self) -> PlanAssignmentRow {
        PlanAssignmentRow {
            machine_code: self.machine_code,
            plan_date: self.plan_date,
            urgent_level: self.urgent_level,
            weight_t: self.weight_t,
            material_id: self.material_id,
        }
    }
}

// ==========================================
// CapacityPoolRow 构建器
// ==========================================

pub struct PoolRowBuilder {
    machine_code: String,
    plan_date: NaiveDate,
    used_capacity_t: f64,
    target_capacity_t: f64,
    limit_capacity_t: f64,
    accumulated_tonnage_t: f64,
}

impl PoolRowBuilder {
    pub fn new(machine: &str, plan_date: NaiveDate) -> Self {
        Self {
            machine_code: machine.to_string(),
            plan_date,
            used_capacity_t: 0.0,
            target_capacity_t: 100.0,
            limit_capacity_t: 120.0,
            accumulated_tonnage_t: 0.0,
        }
    }

    pub fn used(mut self, used_t: f64) -> Self {
        self.used_capacity_t = used_t;
        self
    }

    pub fn target(mut self, target_t: f64) -> Self {
        self.target_capacity_t = target_t;
        self
    }

    pub fn limit(mut self, limit_t: f64) -> Self {
        self.limit_capacity_t = limit_t;
        self
    }

    pub fn accumulated(mut self, tonnage_t: f64) -> Self {
        self.accumulated_tonnage_t = tonnage_t;
        self
    }

    pub fn build(self) -> CapacityPoolRow {
        CapacityPoolRow {
            machine_code: self.machine_code,
            plan_date: self.plan_date,
            used_capacity_t: self.used_capacity_t,
            target_capacity_t: self.target_capacity_t,
            limit_capacity_t: self.limit_capacity_t,
            accumulated_tonnage_t: self.accumulated_tonnage_t,
        }
    }
}

// ==========================================
// MaterialFailureRow 构建器
// ==========================================

pub struct FailureRowBuilder {
    material_id: String,
    contract_no: String,
    urgent_level: UrgentLevel,
    due_date: Option<NaiveDate>,
    days_to_due: i32,
    is_scheduled: bool,
    unscheduled_weight_t: f64,
}

impl FailureRowBuilder {
    pub fn new(material_id: &str, contract_no: &str) -> Self {
        Self {
            material_id: material_id.to_string(),
            contract_no: contract_no.to_string(),
            urgent_level: UrgentLevel::L0,
            due_date: Some(date(2024, 1, 31)),
            days_to_due: 10,
            is_scheduled: false,
            unscheduled_weight_t: 20.0,
        }
    }

    pub fn urgent_level(mut self, level: UrgentLevel) -> Self {
        self.urgent_level = level;
        self
    }

    pub fn due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn no_due_date(mut self) -> Self {
        self.due_date = None;
        self
    }

    pub fn days_to_due(mut self, days: i32) -> Self {
        self.days_to_due = days;
        self
    }

    pub fn scheduled(mut self) -> Self {
        self.is_scheduled = true;
        self
    }

    pub fn unscheduled_weight(mut self, weight_t: f64) -> Self {
        self.unscheduled_weight_t = weight_t;
        self
    }

    pub fn build(self) -> MaterialFailureRow {
        MaterialFailureRow {
            material_id: self.material_id,
            contract_no: self.contract_no,
            urgent_level: self.urgent_level,
            due_date: self.due_date,
            days_to_due: self.days_to_due,
            is_scheduled: self.is_scheduled,
            unscheduled_weight_t: self.unscheduled_weight_t,
        }
    }
}

// ==========================================
// CandidateMaterial 构建器
// ==========================================

pub struct CandidateBuilder {
    material_id: String,
    weight_t: f64,
    urgent_level: UrgentLevel,
    is_mature: Option<bool>,
    sched_state: Option<SchedState>,
    lock_flag: bool,
}

impl CandidateBuilder {
    pub fn new(material_id: &str, weight_t: f64) -> Self {
        Self {
            material_id: material_id.to_string(),
            weight_t,
            urgent_level: UrgentLevel::L0,
            is_mature: Some(true),
            sched_state: Some(SchedState::Ready),
            lock_flag: false,
        }
    }

    pub fn urgent_level(mut self, level: UrgentLevel) -> Self {
        self.urgent_level = level;
        self
    }

    pub fn immature(mut self) -> Self {
        self.is_mature = Some(false);
        self
    }

    pub fn sched_state(mut self, state: SchedState) -> Self {
        self.sched_state = Some(state);
        self
    }

    pub fn locked(mut self) -> Self {
        self.lock_flag = true;
        self.sched_state = None;
        self
    }

    pub fn build(self) -> CandidateMaterial {
        CandidateMaterial {
            material_id: self.material_id,
            weight_t: self.weight_t,
            urgent_level: self.urgent_level,
            is_mature: self.is_mature,
            sched_state: self.sched_state,
            lock_flag: self.lock_flag,
        }
    }
}

// ==========================================
// 时间线条目
// ==========================================

/// 构造时间线条目 (仅产能字段有意义)
pub fn timeline_entry(actual_t: f64, target_t: f64, limit_t: f64) -> CapacityTimelineEntry {
    CapacityTimelineEntry {
        date: date(2026, 1, 20),
        machine_code: "H032".to_string(),
        target_capacity_t: target_t,
        limit_capacity_t: limit_t,
        actual_capacity_t: actual_t,
        segments: Vec::new(),
        roll_campaign_progress_t: 0.0,
        roll_change_threshold_t: 2500.0,
        roll_suggest_threshold_t: 1500.0,
        material_ids: BTreeSet::new(),
    }
}
