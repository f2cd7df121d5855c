// ==========================================
// 热轧精整排产分析 - 订单失败领域模型
// ==========================================
// 职责: 材料级失败行 / 合同级聚合 / 失败统计
// ==========================================

use crate::domain::types::UrgentLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 材料级失败行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialFailureRow {
    /// 材料ID
    pub material_id: String,

    /// 合同号 (为空的行不参与聚合)
    pub contract_no: String,

    /// 紧急等级
    #[serde(default)]
    pub urgent_level: UrgentLevel,

    /// 交货期 (缺失为 None)
    pub due_date: Option<NaiveDate>,

    /// 距离交货期天数 (负数表示超期)
    pub days_to_due: i32,

    /// 是否已排产
    pub is_scheduled: bool,

    /// 未排产重量 (吨)
    pub unscheduled_weight_t: f64,
}

impl MaterialFailureRow {
    /// 是否超期
    pub fn is_overdue(&self) -> bool {
        self.days_to_due < 0
    }
}

/// 合同级聚合
///
/// 不变量:
/// - material_count == materials.len()
/// - max_urgent_level 为 materials 中的最高等级
/// - earliest_due_date 为 materials 中最早的交货期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAggregate {
    pub contract_no: String,
    pub material_count: u32,
    pub unscheduled_count: u32,
    pub overdue_count: u32,
    pub unscheduled_weight_t: f64,
    pub earliest_due_date: Option<NaiveDate>,
    pub max_urgent_level: UrgentLevel,
    pub representative_material_id: String,

    /// 明细, 保持到达顺序
    pub materials: Vec<MaterialFailureRow>,
}

impl ContractAggregate {
    /// 是否为高紧急度合同
    pub fn is_high_urgency(&self) -> bool {
        self.max_urgent_level >= UrgentLevel::L2
    }

    /// 是否存在超期材料
    pub fn has_overdue(&self) -> bool {
        self.overdue_count > 0
    }

    /// 代表材料明细
    pub fn representative(&self) -> Option<&MaterialFailureRow> {
        self.materials
            .iter()
            .find(|m| m.material_id == self.representative_material_id)
    }
}

/// 失败统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureStats {
    /// 合同总数
    pub total_contracts: u32,

    /// 存在超期材料的合同数
    pub overdue_contracts: u32,

    /// 高紧急度 (L2/L3) 合同数
    pub high_urgency_contracts: u32,

    /// 材料总数
    pub total_materials: u32,

    /// 未排产材料数
    pub unscheduled_materials: u32,

    /// 超期材料数
    pub overdue_materials: u32,

    /// 未排产总重量 (吨)
    pub unscheduled_weight_t: f64,
}

impl FailureStats {
    /// 添加一个合同聚合到统计
    pub fn add_contract(&mut self, contract: &ContractAggregate) {
        self.total_contracts += 1;
        if contract.has_overdue() {
            self.overdue_contracts += 1;
        }
        if contract.is_high_urgency() {
            self.high_urgency_contracts += 1;
        }
        self.total_materials += contract.material_count;
        self.unscheduled_materials += contract.unscheduled_count;
        self.overdue_materials += contract.overdue_count;
        self.unscheduled_weight_t += contract.unscheduled_weight_t;
    }

    /// 从合同聚合集合构建统计
    pub fn from_contracts(contracts: &[ContractAggregate]) -> Self {
        let mut stats = Self::default();
        for contract in contracts {
            stats.add_contract(contract);
        }
        stats
    }
}

impl std::fmt::Display for ContractAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (materials: {}, unscheduled: {}, overdue: {}, urgency: {})",
            self.contract_no,
            self.material_count,
            self.unscheduled_count,
            self.overdue_count,
            self.max_urgent_level
        )
    }
}
