// ==========================================
// 热轧精整排产分析 - 字段映射器
// ==========================================
// 职责: 松散类型的上游记录 (JSON key-value) → 强类型行
// 规则:
// - 数值字段接受 JSON 数字或数字字符串, 其他情况记为 NaN,
//   留给聚合器的回退规则处理
// - 主键字段 (机组/日期/材料/合同) 不可用时整行丢弃
// ==========================================

use crate::domain::capacity::CapacityPoolRow;
use crate::domain::failure::MaterialFailureRow;
use crate::domain::impact::CandidateMaterial;
use crate::domain::plan::PlanAssignmentRow;
use crate::domain::types::{SchedState, UrgentLevel};
use chrono::NaiveDate;
use serde_json::{Map, Value};

type Record = Map<String, Value>;

// ===== 字段别名 =====
const MACHINE_CODE: &[&str] = &["machine_code", "machineCode"];
const PLAN_DATE: &[&str] = &["plan_date", "planDate", "date"];
const MATERIAL_ID: &[&str] = &["material_id", "materialId"];
const URGENT_LEVEL: &[&str] = &["urgent_level", "urgency_level", "urgency_tier", "urgentLevel"];
const WEIGHT: &[&str] = &["weight_t", "weight"];
const USED_CAPACITY: &[&str] = &["used_capacity_t", "used_capacity", "usedCapacity"];
const TARGET_CAPACITY: &[&str] = &["target_capacity_t", "target_capacity", "targetCapacity"];
const LIMIT_CAPACITY: &[&str] = &["limit_capacity_t", "limit_capacity", "limitCapacity"];
const ACCUMULATED_TONNAGE: &[&str] = &[
    "accumulated_tonnage_t",
    "accumulated_tonnage",
    "accumulatedTonnage",
];
const CONTRACT_NO: &[&str] = &["contract_no", "contractNo"];
const DUE_DATE: &[&str] = &["due_date", "dueDate"];
const DAYS_TO_DUE: &[&str] = &["days_to_due", "daysToDue"];
const IS_SCHEDULED: &[&str] = &["is_scheduled", "isScheduled"];
const UNSCHEDULED_WEIGHT: &[&str] = &[
    "unscheduled_weight_t",
    "unscheduled_weight",
    "unscheduledWeight",
];
const IS_MATURE: &[&str] = &["is_mature", "isMature"];
const SCHED_STATE: &[&str] = &["sched_state", "schedState"];
const LOCK_FLAG: &[&str] = &["lock_flag", "lockFlag", "locked"];

pub struct FieldMapper;

impl FieldMapper {
    /// 排产明细行
    ///
    /// 机组代码或排产日期不可用时返回 None
    pub fn map_plan_row(&self, value: &Value) -> Option<PlanAssignmentRow> {
        let record = value.as_object()?;
        Some(PlanAssignmentRow {
            machine_code: self.get_string(record, MACHINE_CODE)?,
            plan_date: self.get_date(record, PLAN_DATE)?,
            urgent_level: self.get_urgent_level(record),
            weight_t: self.get_f64(record, WEIGHT),
            material_id: self.get_string(record, MATERIAL_ID).unwrap_or_default(),
        })
    }

    /// 产能池快照行
    ///
    /// 机组代码或排产日期不可用时返回 None
    pub fn map_pool_row(&self, value: &Value) -> Option<CapacityPoolRow> {
        let record = value.as_object()?;
        Some(CapacityPoolRow {
            machine_code: self.get_string(record, MACHINE_CODE)?,
            plan_date: self.get_date(record, PLAN_DATE)?,
            used_capacity_t: self.get_f64(record, USED_CAPACITY),
            target_capacity_t: self.get_f64(record, TARGET_CAPACITY),
            limit_capacity_t: self.get_f64(record, LIMIT_CAPACITY),
            accumulated_tonnage_t: self.get_f64(record, ACCUMULATED_TONNAGE),
        })
    }

    /// 材料失败行
    ///
    /// 材料ID不可用时返回 None; 合同号为空的行保留, 由聚合器排除
    pub fn map_failure_row(&self, value: &Value) -> Option<MaterialFailureRow> {
        let record = value.as_object()?;
        Some(MaterialFailureRow {
            material_id: self.get_string(record, MATERIAL_ID)?,
            contract_no: self.get_string(record, CONTRACT_NO).unwrap_or_default(),
            urgent_level: self.get_urgent_level(record),
            due_date: self.get_date(record, DUE_DATE),
            days_to_due: self.get_i32(record, DAYS_TO_DUE).unwrap_or(0),
            is_scheduled: self.get_bool(record, IS_SCHEDULED).unwrap_or(false),
            unscheduled_weight_t: self.get_f64(record, UNSCHEDULED_WEIGHT),
        })
    }

    /// 候选材料 (影响预测输入)
    pub fn map_candidate(&self, value: &Value) -> Option<CandidateMaterial> {
        let record = value.as_object()?;
        Some(CandidateMaterial {
            material_id: self.get_string(record, MATERIAL_ID)?,
            weight_t: self.get_f64(record, WEIGHT),
            urgent_level: self.get_urgent_level(record),
            is_mature: self.get_bool(record, IS_MATURE),
            sched_state: self
                .get_string(record, SCHED_STATE)
                .and_then(|s| SchedState::parse(&s)),
            lock_flag: self.get_bool(record, LOCK_FLAG).unwrap_or(false),
        })
    }

    // ==========================================
    // 字段提取
    // ==========================================

    /// 按别名顺序取第一个非空值
    fn lookup<'a>(&self, record: &'a Record, aliases: &[&str]) -> Option<&'a Value> {
        aliases
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find(|v| !v.is_null())
    }

    /// 提取字符串字段 (去除首尾空白, 空串视为缺失; 数字转为字符串)
    fn get_string(&self, record: &Record, aliases: &[&str]) -> Option<String> {
        let text = match self.lookup(record, aliases)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// 提取浮点字段, 缺失或无法解析记为 NaN
    fn get_f64(&self, record: &Record, aliases: &[&str]) -> f64 {
        match self.lookup(record, aliases) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    fn get_i32(&self, record: &Record, aliases: &[&str]) -> Option<i32> {
        match self.lookup(record, aliases)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
                .and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }

    /// 布尔字段, 兼容 0/1 与 "Y"/"N"
    fn get_bool(&self, record: &Record, aliases: &[&str]) -> Option<bool> {
        match self.lookup(record, aliases)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            Value::String(s) => match s.trim().to_uppercase().as_str() {
                "TRUE" | "Y" | "1" => Some(true),
                "FALSE" | "N" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn get_date(&self, record: &Record, aliases: &[&str]) -> Option<NaiveDate> {
        self.get_string(record, aliases)
            .and_then(|s| parse_date(&s))
    }

    fn get_urgent_level(&self, record: &Record) -> UrgentLevel {
        self.get_string(record, URGENT_LEVEL)
            .map(|s| UrgentLevel::parse_or_default(&s))
            .unwrap_or_default()
    }
}

/// 解析日期
///
/// 支持 YYYY-MM-DD、YYYYMMDD, 以及带时间部分的 ISO 字符串 (取前 10 位)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(prefix) = value.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}
