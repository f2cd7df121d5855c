// ==========================================
// 热轧精整排产分析 - 分析服务
// ==========================================
// 职责: 取完整快照 → 全量重算时间线与合同聚合
// 红线:
// - 三类数据全部取到后才开始聚合, 任一失败则整体失败
// - 刷新之间不保留任何派生状态
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::capacity::CapacityTimelineEntry;
use crate::domain::failure::{ContractAggregate, FailureStats};
use crate::domain::impact::{CandidateMaterial, ImpactPrediction};
use crate::domain::plan::TimelineQuery;
use crate::engine::{ContractAggregator, ImpactPredictor, TimelineAggregator};
use crate::error::AnalyticsResult;
use crate::service::data_source::{SchedulingDataSource, SourceRows};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// 一次刷新的派生结果
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    /// 产能时间线 (日期, 机组) 升序
    pub timeline: Vec<CapacityTimelineEntry>,

    /// 合同聚合 (展示顺序)
    pub contracts: Vec<ContractAggregate>,

    /// 失败统计
    pub failure_stats: FailureStats,
}

impl AnalyticsSnapshot {
    /// 是否无数据 (展示层显示 "暂无数据")
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty() && self.contracts.is_empty()
    }

    /// 查找指定机组-日的时间线条目
    pub fn timeline_entry(
        &self,
        machine_code: &str,
        date: chrono::NaiveDate,
    ) -> Option<&CapacityTimelineEntry> {
        self.timeline
            .iter()
            .find(|e| e.machine_code == machine_code && e.date == date)
    }
}

// ==========================================
// AnalyticsService - 分析服务
// ==========================================
pub struct AnalyticsService<S: SchedulingDataSource> {
    source: S,
    timeline_aggregator: TimelineAggregator,
    contract_aggregator: ContractAggregator,
    impact_predictor: ImpactPredictor,
}

impl<S: SchedulingDataSource> AnalyticsService<S> {
    pub fn new(source: S, config: AnalyticsConfig) -> Self {
        Self {
            source,
            timeline_aggregator: TimelineAggregator::new(config),
            contract_aggregator: ContractAggregator::new(),
            impact_predictor: ImpactPredictor::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 全量刷新
    ///
    /// 一次读取完整快照, 三类数据全部成功后再聚合
    #[instrument(skip_all, fields(
        machines = query.machine_codes.len(),
        start = %query.date_range.start,
        end = %query.date_range.end
    ))]
    pub async fn refresh(&self, query: &TimelineQuery) -> AnalyticsResult<AnalyticsSnapshot> {
        let started = Instant::now();

        let SourceRows {
            plan_rows,
            pool_rows,
            failure_rows,
        } = self.source.fetch_snapshot().await?;

        let timeline = self
            .timeline_aggregator
            .aggregate(&plan_rows, &pool_rows, query);
        let contracts = self.contract_aggregator.aggregate_sorted(&failure_rows);
        let failure_stats = FailureStats::from_contracts(&contracts);

        info!(
            timeline_entries = timeline.len(),
            contracts = contracts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "分析数据刷新完成"
        );

        Ok(AnalyticsSnapshot {
            timeline,
            contracts,
            failure_stats,
        })
    }

    /// 预测移除材料的影响
    pub fn predict_removal(
        &self,
        timeline: &CapacityTimelineEntry,
        materials: &[CandidateMaterial],
    ) -> ImpactPrediction {
        self.impact_predictor.predict_removal(timeline, materials)
    }

    /// 预测添加材料的影响
    pub fn predict_addition(
        &self,
        timeline: &CapacityTimelineEntry,
        material: &CandidateMaterial,
    ) -> ImpactPrediction {
        self.impact_predictor.predict_addition(timeline, material)
    }
}
