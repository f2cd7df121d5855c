// ==========================================
// AnalyticsService 集成测试
// ==========================================
// 职责: 验证取数 → 全量重算的端到端流程
// ==========================================

mod helpers;

use async_trait::async_trait;
use helpers::test_data_builder::{
    date, CandidateBuilder, FailureRowBuilder, PlanRowBuilder, PoolRowBuilder,
};
use hot_rolling_analytics::config::AnalyticsConfig;
use hot_rolling_analytics::domain::{
    CapacityPoolRow, DateRange, ImpactRisk, MaterialFailureRow, PlanAssignmentRow, TimelineQuery,
    UrgentLevel,
};
use hot_rolling_analytics::error::{AnalyticsError, AnalyticsResult};
use hot_rolling_analytics::importer::ImportedSnapshot;
use hot_rolling_analytics::service::{
    AnalyticsService, InMemoryDataSource, JsonFileDataSource, SchedulingDataSource,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn january_query() -> TimelineQuery {
    TimelineQuery::all_machines(DateRange::new(date(2026, 1, 1), date(2026, 1, 31)))
}

fn sample_source() -> InMemoryDataSource {
    InMemoryDataSource::new(
        vec![
            PlanRowBuilder::new("M1").weight(60.0).urgent_level(UrgentLevel::L2).build(),
            PlanRowBuilder::new("M2").weight(35.0).build(),
        ],
        vec![
            PoolRowBuilder::new("H032", date(2026, 1, 20)).build(),
            PoolRowBuilder::new("H033", date(2026, 1, 20)).used(40.0).build(),
        ],
        vec![
            FailureRowBuilder::new("F1", "C1").days_to_due(-1).build(),
            FailureRowBuilder::new("F2", "C2").build(),
            FailureRowBuilder::new("F3", "C2").build(),
        ],
    )
}

#[tokio::test]
async fn test_refresh_in_memory() {
    let service = AnalyticsService::new(sample_source(), AnalyticsConfig::default());

    let snapshot = service.refresh(&january_query()).await.unwrap();

    assert!(!snapshot.is_empty());
    assert_eq!(snapshot.timeline.len(), 2);
    let h032 = snapshot.timeline_entry("H032", date(2026, 1, 20)).unwrap();
    assert_eq!(h032.actual_capacity_t, 95.0);
    let h033 = snapshot.timeline_entry("H033", date(2026, 1, 20)).unwrap();
    assert_eq!(h033.actual_capacity_t, 40.0);

    let contracts: Vec<&str> = snapshot.contracts.iter().map(|c| c.contract_no.as_str()).collect();
    assert_eq!(contracts, vec!["C2", "C1"]);
    assert_eq!(snapshot.failure_stats.total_contracts, 2);
    assert_eq!(snapshot.failure_stats.overdue_contracts, 1);
}

#[tokio::test]
async fn test_refresh_then_predict() {
    let service = AnalyticsService::new(sample_source(), AnalyticsConfig::default());
    let snapshot = service.refresh(&january_query()).await.unwrap();
    let entry = snapshot.timeline_entry("H032", date(2026, 1, 20)).unwrap();

    let removal = service.predict_removal(entry, &[CandidateBuilder::new("M1", 20.0).build()]);
    assert_eq!(removal.predicted_capacity_t, 75.0);
    assert_eq!(removal.risk, ImpactRisk::Low);
    assert!(removal.improves);

    let addition = service.predict_addition(entry, &CandidateBuilder::new("M9", 30.0).build());
    assert_eq!(addition.predicted_capacity_t, 125.0);
    assert_eq!(addition.risk, ImpactRisk::High);
    assert!(!addition.improves);
}

#[tokio::test]
async fn test_refresh_empty_source() {
    let service = AnalyticsService::new(InMemoryDataSource::default(), AnalyticsConfig::default());

    let snapshot = service.refresh(&january_query()).await.unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.failure_stats.total_contracts, 0);
}

// ==========================================
// 取数失败
// ==========================================

struct FailingPoolSource;

#[async_trait]
impl SchedulingDataSource for FailingPoolSource {
    async fn fetch_plan_rows(&self) -> AnalyticsResult<Vec<PlanAssignmentRow>> {
        Ok(vec![PlanRowBuilder::new("M1").build()])
    }

    async fn fetch_pool_rows(&self) -> AnalyticsResult<Vec<CapacityPoolRow>> {
        Err(AnalyticsError::data_source("capacity_pool", "后端不可用"))
    }

    async fn fetch_failure_rows(&self) -> AnalyticsResult<Vec<MaterialFailureRow>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_refresh_fails_when_any_fetch_fails() {
    let service = AnalyticsService::new(FailingPoolSource, AnalyticsConfig::default());

    let result = service.refresh(&january_query()).await;

    match result {
        Err(AnalyticsError::DataSource { source_name, .. }) => {
            assert_eq!(source_name, "capacity_pool");
        }
        other => panic!("期望取数错误, 实际: {:?}", other.map(|s| s.timeline.len())),
    }
}

// ==========================================
// 快照文件
// ==========================================

const SNAPSHOT_JSON: &str = r#"{
    "plan_items": [
        {"machine_code": "H032", "plan_date": "2026-01-20", "urgent_level": "L3", "weight_t": 40, "material_id": "M1"},
        {"machineCode": "H032", "planDate": "20260120", "urgency_tier": "bogus", "weight": "15.5", "materialId": "M2"},
        {"machine_code": "H032", "plan_date": "2026-01-20", "weight_t": -1, "material_id": "M3"},
        {"machine_code": "", "plan_date": "2026-01-20", "weight_t": 10, "material_id": "M4"}
    ],
    "capacity_pools": [
        {"machine_code": "H032", "plan_date": "2026-01-20", "used_capacity_t": 999, "target_capacity_t": 100, "limit_capacity_t": null, "accumulated_tonnage_t": 1800},
        {"machine_code": "H032", "plan_date": "not-a-date"}
    ],
    "failure_rows": [
        {"material_id": "M1", "contract_no": "C1", "urgent_level": "L2", "due_date": "2024-01-10", "days_to_due": -2, "is_scheduled": false, "unscheduled_weight_t": 40},
        {"material_id": "M2", "contract_no": "C1", "urgent_level": "L3", "due_date": "2024-01-05", "days_to_due": -7, "is_scheduled": true, "unscheduled_weight_t": 0},
        {"contract_no": "C9"}
    ]
}"#;

fn write_snapshot(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_import_snapshot_document() {
    let imported = ImportedSnapshot::from_json_str(SNAPSHOT_JSON).unwrap();

    assert_eq!(imported.plan_rows.len(), 3);
    assert_eq!(imported.pool_rows.len(), 1);
    assert_eq!(imported.failure_rows.len(), 2);
    assert_eq!(imported.dropped.plan_items, 1);
    assert_eq!(imported.dropped.capacity_pools, 1);
    assert_eq!(imported.dropped.failure_rows, 1);

    // 未识别的紧急等级回退为 L0
    assert_eq!(imported.plan_rows[1].urgent_level, UrgentLevel::L0);
    assert_eq!(imported.plan_rows[1].weight_t, 15.5);
    assert!(imported.pool_rows[0].limit_capacity_t.is_nan());
}

#[tokio::test]
async fn test_refresh_from_json_file() {
    hot_rolling_analytics::logging::init_test();
    let file = write_snapshot(SNAPSHOT_JSON);
    let service = AnalyticsService::new(
        JsonFileDataSource::new(file.path()),
        AnalyticsConfig::default(),
    );

    let snapshot = service.refresh(&january_query()).await.unwrap();

    assert_eq!(snapshot.timeline.len(), 1);
    let entry = &snapshot.timeline[0];
    // 明细之和优先于产能池上报值
    assert_eq!(entry.actual_capacity_t, 55.5);
    assert_eq!(entry.target_capacity_t, 100.0);
    // 限制产能缺失时回退为目标产能
    assert_eq!(entry.limit_capacity_t, 100.0);
    assert_eq!(entry.roll_campaign_progress_t, 1800.0);
    assert_eq!(entry.material_ids.len(), 2);

    assert_eq!(snapshot.contracts.len(), 1);
    let c1 = &snapshot.contracts[0];
    assert_eq!(c1.representative_material_id, "M1");
    assert_eq!(c1.max_urgent_level, UrgentLevel::L3);
    assert_eq!(c1.earliest_due_date, Some(date(2024, 1, 5)));
    assert_eq!(c1.overdue_count, 2);

    // 三类数据来自同一次文件读取
    assert_eq!(service.source().load_count(), 1);
}

#[tokio::test]
async fn test_each_refresh_reads_file_once() {
    let file = write_snapshot(SNAPSHOT_JSON);
    let service = AnalyticsService::new(
        JsonFileDataSource::new(file.path()),
        AnalyticsConfig::default(),
    );

    service.refresh(&january_query()).await.unwrap();
    service.refresh(&january_query()).await.unwrap();

    assert_eq!(service.source().load_count(), 2);
}

#[tokio::test]
async fn test_json_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let service = AnalyticsService::new(JsonFileDataSource::new(&path), AnalyticsConfig::default());

    let result = service.refresh(&january_query()).await;

    assert!(matches!(result, Err(AnalyticsError::DataSource { .. })));
}

#[tokio::test]
async fn test_json_file_not_an_object() {
    let file = write_snapshot("[1, 2, 3]");
    let service = AnalyticsService::new(
        JsonFileDataSource::new(file.path()),
        AnalyticsConfig::default(),
    );

    let result = service.refresh(&january_query()).await;

    assert!(matches!(result, Err(AnalyticsError::InvalidSnapshot(_))));
}
