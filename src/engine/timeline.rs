// ==========================================
// 热轧精整排产分析 - 产能时间线聚合器
// ==========================================
// 职责: 排产明细行 + 产能池快照行 → 机组-日产能时间线
// 输入: 排产明细 / 产能池 / 查询条件 (机组 + 日期区间)
// 输出: 按 (日期, 机组) 升序的 CapacityTimelineEntry 列表
// ==========================================
// 红线: 纯函数, 非法数值按回退规则校正, 不抛错
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::capacity::{CapacityPoolRow, CapacityTimelineEntry, TimelineSegment};
use crate::domain::plan::{PlanAssignmentRow, TimelineQuery};
use crate::domain::urgency_bucket::UrgencyBucketMap;
use crate::engine::coercion::{finite_or_zero, positive};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, instrument};

type MachineDayKey = (String, NaiveDate);

/// 单个机组-日的明细分组
#[derive(Debug, Default)]
struct PlanGroup {
    buckets: UrgencyBucketMap,
    material_ids: BTreeSet<String>,
}

/// 产能来源的解析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCapacity {
    pub actual_capacity_t: f64,
    pub target_capacity_t: f64,
    pub limit_capacity_t: f64,
}

// ==========================================
// TimelineAggregator - 产能时间线聚合器
// ==========================================
// 无跨调用状态, 每次刷新完整重算
#[derive(Debug, Clone, Default)]
pub struct TimelineAggregator {
    config: AnalyticsConfig,
}

impl TimelineAggregator {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// 聚合产能时间线
    ///
    /// # 参数
    /// - `plan_rows`: 排产明细行
    /// - `pool_rows`: 产能池快照行
    /// - `query`: 机组白名单与日期区间
    ///
    /// # 返回
    /// 每条落在查询范围内的产能池行对应一个条目,
    /// 按 (plan_date, machine_code) 升序排列
    #[instrument(skip_all, fields(
        plan_rows = plan_rows.len(),
        pool_rows = pool_rows.len(),
        machines = query.machine_codes.len(),
        start = %query.date_range.start,
        end = %query.date_range.end
    ))]
    pub fn aggregate(
        &self,
        plan_rows: &[PlanAssignmentRow],
        pool_rows: &[CapacityPoolRow],
        query: &TimelineQuery,
    ) -> Vec<CapacityTimelineEntry> {
        let groups = self.group_plan_rows(plan_rows, query);

        let mut entries: Vec<CapacityTimelineEntry> = pool_rows
            .iter()
            .filter(|pool| query.matches(&pool.machine_code, pool.plan_date))
            .map(|pool| {
                let group = groups.get(&(pool.machine_code.clone(), pool.plan_date));
                self.build_entry(pool, group)
            })
            .collect();

        let covered: HashSet<(&str, NaiveDate)> = entries
            .iter()
            .map(|e| (e.machine_code.as_str(), e.date))
            .collect();
        let orphan_groups = groups
            .keys()
            .filter(|(machine, date)| !covered.contains(&(machine.as_str(), *date)))
            .count();
        if orphan_groups > 0 {
            debug!(orphan_groups, "部分机组-日存在排产明细但没有产能池行, 不生成条目");
        }

        // 稳定排序: 日期升序, 同日按机组代码字典序
        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.machine_code.cmp(&b.machine_code))
        });

        debug!(entries = entries.len(), "产能时间线聚合完成");
        entries
    }

    // ==========================================
    // 明细分组
    // ==========================================

    /// 过滤并按 (机组, 日期) 分组, 累加分桶与材料ID
    fn group_plan_rows(
        &self,
        plan_rows: &[PlanAssignmentRow],
        query: &TimelineQuery,
    ) -> HashMap<MachineDayKey, PlanGroup> {
        let mut groups: HashMap<MachineDayKey, PlanGroup> = HashMap::new();
        let mut skipped_weight = 0usize;

        for row in plan_rows {
            if !query.matches(&row.machine_code, row.plan_date) {
                continue;
            }
            if !row.has_valid_weight() {
                skipped_weight += 1;
                continue;
            }

            let group = groups
                .entry((row.machine_code.clone(), row.plan_date))
                .or_default();
            group.buckets.add(row.urgent_level, row.weight_t);
            group.material_ids.insert(row.material_id.clone());
        }

        if skipped_weight > 0 {
            debug!(skipped_weight, "跳过吨位非法的排产明细行");
        }

        groups
    }

    // ==========================================
    // 条目构建
    // ==========================================

    fn build_entry(
        &self,
        pool: &CapacityPoolRow,
        group: Option<&PlanGroup>,
    ) -> CapacityTimelineEntry {
        let empty = UrgencyBucketMap::new();
        let buckets = group.map(|g| &g.buckets).unwrap_or(&empty);
        let capacity = resolve_capacity(buckets.total_tonnage_t(), pool);
        let thresholds = self.config.roll_thresholds(&pool.machine_code);

        CapacityTimelineEntry {
            date: pool.plan_date,
            machine_code: pool.machine_code.clone(),
            target_capacity_t: capacity.target_capacity_t,
            limit_capacity_t: capacity.limit_capacity_t,
            actual_capacity_t: capacity.actual_capacity_t,
            segments: build_segments(buckets),
            roll_campaign_progress_t: finite_or_zero(pool.accumulated_tonnage_t),
            roll_change_threshold_t: thresholds.hard_limit_t,
            roll_suggest_threshold_t: thresholds.suggest_threshold_t,
            material_ids: group.map(|g| g.material_ids.clone()).unwrap_or_default(),
        }
    }
}

/// 解析实际/目标/上限产能
///
/// 回退顺序:
/// - actual: 分段合计 (>0) → 产能池 used_capacity_t (有限且为正) → 0
/// - target: 产能池 target_capacity_t (有限且为正) → max(actual, 1)
/// - limit:  产能池 limit_capacity_t (有限且为正) → target
///
/// 排产明细反映当前内存中的筛选状态, 产能池 used 是后端快照, 可能滞后;
/// 因此有明细时以明细为准。
pub fn resolve_capacity(segment_total_t: f64, pool: &CapacityPoolRow) -> ResolvedCapacity {
    let actual_capacity_t = positive(segment_total_t)
        .or_else(|| positive(pool.used_capacity_t))
        .unwrap_or(0.0);
    let target_capacity_t =
        positive(pool.target_capacity_t).unwrap_or_else(|| actual_capacity_t.max(1.0));
    let limit_capacity_t = positive(pool.limit_capacity_t).unwrap_or(target_capacity_t);

    ResolvedCapacity {
        actual_capacity_t,
        target_capacity_t,
        limit_capacity_t,
    }
}

/// 分桶 → 四段列表 (L3 → L0, 零值段保留)
fn build_segments(buckets: &UrgencyBucketMap) -> Vec<TimelineSegment> {
    buckets
        .iter_severity_desc()
        .map(|(level, bucket)| TimelineSegment {
            urgent_level: level,
            tonnage_t: bucket.tonnage_t,
            material_count: bucket.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(used: f64, target: f64, limit: f64) -> CapacityPoolRow {
        CapacityPoolRow {
            machine_code: "H032".to_string(),
            plan_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            used_capacity_t: used,
            target_capacity_t: target,
            limit_capacity_t: limit,
            accumulated_tonnage_t: 0.0,
        }
    }

    #[test]
    fn test_resolve_plan_rows_win() {
        let c = resolve_capacity(80.0, &pool(95.0, 100.0, 120.0));
        assert_eq!(c.actual_capacity_t, 80.0);
        assert_eq!(c.target_capacity_t, 100.0);
        assert_eq!(c.limit_capacity_t, 120.0);
    }

    #[test]
    fn test_resolve_falls_back_to_pool_used() {
        let c = resolve_capacity(0.0, &pool(95.0, 100.0, 120.0));
        assert_eq!(c.actual_capacity_t, 95.0);
    }

    #[test]
    fn test_resolve_all_missing() {
        let c = resolve_capacity(0.0, &pool(f64::NAN, f64::NAN, -5.0));
        assert_eq!(c.actual_capacity_t, 0.0);
        assert_eq!(c.target_capacity_t, 1.0);
        assert_eq!(c.limit_capacity_t, 1.0);
    }

    #[test]
    fn test_resolve_target_defaults_to_actual() {
        let c = resolve_capacity(150.0, &pool(0.0, 0.0, f64::INFINITY));
        assert_eq!(c.target_capacity_t, 150.0);
        assert_eq!(c.limit_capacity_t, 150.0);
    }

    #[test]
    fn test_build_segments_full_and_ordered() {
        let mut buckets = UrgencyBucketMap::new();
        buckets.add(crate::domain::types::UrgentLevel::L1, 4.0);
        let segments = build_segments(&buckets);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].urgent_level, crate::domain::types::UrgentLevel::L3);
        assert_eq!(segments[2].tonnage_t, 4.0);
        assert_eq!(segments[2].material_count, 1);
    }
}
