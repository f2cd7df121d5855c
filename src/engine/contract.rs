// ==========================================
// 热轧精整排产分析 - 合同失败聚合器
// ==========================================
// 职责: 材料级失败行 → 合同级聚合
// 输出: 合同聚合集合 (无序), 展示排序由 sort_for_display 提供
// ==========================================
// 红线: 代表材料选取必须与行到达顺序无关
// ==========================================

use crate::domain::failure::{ContractAggregate, MaterialFailureRow};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ContractAggregator - 合同失败聚合器
// ==========================================
// 红线: 无状态引擎, 每次刷新完整重算
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractAggregator;

impl ContractAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 聚合合同失败
    ///
    /// 合同号为空 (含纯空白) 的行不参与聚合。
    /// 返回顺序按合同首次出现顺序, 调用方需要排序时使用 `sort_for_display`。
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn aggregate(&self, rows: &[MaterialFailureRow]) -> Vec<ContractAggregate> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut aggregates: Vec<ContractAggregate> = Vec::new();
        let mut skipped = 0usize;

        for row in rows {
            let contract_no = row.contract_no.trim();
            if contract_no.is_empty() {
                skipped += 1;
                continue;
            }

            match index.get(contract_no) {
                Some(&i) => fold_row(&mut aggregates[i], row),
                None => {
                    index.insert(contract_no, aggregates.len());
                    aggregates.push(start_aggregate(contract_no, row));
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "跳过合同号为空的失败行");
        }
        debug!(contracts = aggregates.len(), "合同失败聚合完成");
        aggregates
    }

    /// 聚合并按展示顺序排序
    pub fn aggregate_sorted(&self, rows: &[MaterialFailureRow]) -> Vec<ContractAggregate> {
        let mut aggregates = self.aggregate(rows);
        sort_for_display(&mut aggregates);
        aggregates
    }
}

/// 以首行初始化合同聚合
fn start_aggregate(contract_no: &str, row: &MaterialFailureRow) -> ContractAggregate {
    let mut aggregate = ContractAggregate {
        contract_no: contract_no.to_string(),
        material_count: 0,
        unscheduled_count: 0,
        overdue_count: 0,
        unscheduled_weight_t: 0.0,
        earliest_due_date: row.due_date,
        max_urgent_level: row.urgent_level,
        representative_material_id: row.material_id.clone(),
        materials: Vec::new(),
    };
    fold_row(&mut aggregate, row);
    aggregate
}

/// 将一行折叠进合同聚合
fn fold_row(aggregate: &mut ContractAggregate, row: &MaterialFailureRow) {
    aggregate.material_count += 1;
    if !row.is_scheduled {
        aggregate.unscheduled_count += 1;
        if row.unscheduled_weight_t.is_finite() && row.unscheduled_weight_t > 0.0 {
            aggregate.unscheduled_weight_t += row.unscheduled_weight_t;
        }
    }
    if row.is_overdue() {
        aggregate.overdue_count += 1;
    }

    aggregate.earliest_due_date = earlier_due_date(aggregate.earliest_due_date, row.due_date);
    aggregate.max_urgent_level = aggregate.max_urgent_level.max(row.urgent_level);

    // 同一材料ID可能重复出现, 以其中优先级最高的一行作为比较基准
    let replace = aggregate
        .materials
        .iter()
        .filter(|m| m.material_id == aggregate.representative_material_id)
        .min_by(|a, b| representative_order(a, b))
        .map_or(true, |current| {
            representative_order(row, current) == Ordering::Less
        });
    if replace {
        aggregate.representative_material_id = row.material_id.clone();
    }

    let mut detail = row.clone();
    detail.contract_no = aggregate.contract_no.clone();
    aggregate.materials.push(detail);
}

/// 两个可选交货期取较早者, 缺失的交货期不参与比较
fn earlier_due_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// 交货期比较, 缺失排在最后
fn cmp_due_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 代表材料优先级 (Less 表示 a 更适合作为代表)
///
/// 1) 未排产优先于已排产
/// 2) 紧急等级高者优先
/// 3) 交货期早者优先
/// 4) 材料ID字典序小者优先
pub fn representative_order(a: &MaterialFailureRow, b: &MaterialFailureRow) -> Ordering {
    a.is_scheduled
        .cmp(&b.is_scheduled)
        .then_with(|| b.urgent_level.cmp(&a.urgent_level))
        .then_with(|| cmp_due_date(a.due_date, b.due_date))
        .then_with(|| a.material_id.cmp(&b.material_id))
}

/// 展示排序
///
/// 未排产数降序 → 超期数降序 → 最早交货期升序 → 合同号升序
pub fn sort_for_display(aggregates: &mut [ContractAggregate]) {
    aggregates.sort_by(|a, b| {
        b.unscheduled_count
            .cmp(&a.unscheduled_count)
            .then_with(|| b.overdue_count.cmp(&a.overdue_count))
            .then_with(|| cmp_due_date(a.earliest_due_date, b.earliest_due_date))
            .then_with(|| a.contract_no.cmp(&b.contract_no))
    });
}
