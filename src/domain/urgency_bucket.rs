// ==========================================
// 热轧精整排产分析 - 紧急等级分桶模型
// ==========================================
// 职责: 按 L0..L3 切分吨位与件数
// 红线: 四个等级始终齐全, 空桶为零值
// ==========================================

use crate::domain::types::UrgentLevel;
use serde::{Deserialize, Serialize};

/// 单个等级桶
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UrgencyBucket {
    pub tonnage_t: f64, // 吨位 (>= 0)
    pub count: u32,     // 件数
}

/// 四等级分桶
///
/// 用固定字段而非 HashMap, 保证任何时刻四个等级都存在,
/// 下游无需处理缺失分支。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UrgencyBucketMap {
    #[serde(rename = "L0")]
    l0: UrgencyBucket,
    #[serde(rename = "L1")]
    l1: UrgencyBucket,
    #[serde(rename = "L2")]
    l2: UrgencyBucket,
    #[serde(rename = "L3")]
    l3: UrgencyBucket,
}

impl UrgencyBucketMap {
    /// 全零分桶
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取指定等级的桶
    pub fn get(&self, level: UrgentLevel) -> &UrgencyBucket {
        match level {
            UrgentLevel::L0 => &self.l0,
            UrgentLevel::L1 => &self.l1,
            UrgentLevel::L2 => &self.l2,
            UrgentLevel::L3 => &self.l3,
        }
    }

    fn get_mut(&mut self, level: UrgentLevel) -> &mut UrgencyBucket {
        match level {
            UrgentLevel::L0 => &mut self.l0,
            UrgentLevel::L1 => &mut self.l1,
            UrgentLevel::L2 => &mut self.l2,
            UrgentLevel::L3 => &mut self.l3,
        }
    }

    /// 累加一条记录
    ///
    /// 调用方负责保证 weight_t 有限且为正; 非正值按 0 吨处理但仍计件。
    pub fn add(&mut self, level: UrgentLevel, weight_t: f64) {
        let bucket = self.get_mut(level);
        if weight_t.is_finite() && weight_t > 0.0 {
            bucket.tonnage_t += weight_t;
        }
        bucket.count += 1;
    }

    /// 总吨位
    pub fn total_tonnage_t(&self) -> f64 {
        UrgentLevel::ALL.iter().map(|l| self.get(*l).tonnage_t).sum()
    }

    /// 总件数
    pub fn total_count(&self) -> u32 {
        UrgentLevel::ALL.iter().map(|l| self.get(*l).count).sum()
    }

    /// 按严重度降序 (L3 → L0) 遍历
    pub fn iter_severity_desc(&self) -> impl Iterator<Item = (UrgentLevel, &UrgencyBucket)> + '_ {
        UrgentLevel::SEVERITY_DESC
            .into_iter()
            .map(move |level| (level, self.get(level)))
    }
}
