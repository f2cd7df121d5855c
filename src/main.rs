// ==========================================
// 热轧精整排产分析 - 快照检查工具
// ==========================================
// 用法: hot-rolling-analytics <snapshot.json> [config.json]
// 读取快照文档, 全量聚合后以 JSON 输出到 stdout
// ==========================================

use anyhow::{bail, Context};
use hot_rolling_analytics::service::JsonFileDataSource;
use hot_rolling_analytics::{
    logging, AnalyticsService, ConfigManager, DateRange, RollStatus, TimelineQuery,
};
use hot_rolling_analytics::domain::CapacityConstraint;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = match args.next() {
        Some(path) => path,
        None => bail!("用法: hot-rolling-analytics <snapshot.json> [config.json]"),
    };

    tracing::info!("{} v{}", hot_rolling_analytics::APP_NAME, hot_rolling_analytics::VERSION);

    let config_manager = match args.next() {
        Some(path) => {
            tracing::info!("使用配置文件: {}", path);
            ConfigManager::load(&path).with_context(|| format!("加载配置失败: {}", path))?
        }
        None => ConfigManager::new(),
    };
    let config = config_manager.analytics_config()?;

    let service = AnalyticsService::new(JsonFileDataSource::new(&snapshot_path), config);
    let query = TimelineQuery::all_machines(DateRange::unbounded());
    let snapshot = service
        .refresh(&query)
        .await
        .with_context(|| format!("读取快照失败: {}", snapshot_path))?;

    if snapshot.is_empty() {
        tracing::warn!("快照中没有可展示的数据");
    }

    let over_limit = snapshot
        .timeline
        .iter()
        .filter(|e| e.is_overflow())
        .count();
    let roll_alerts = snapshot
        .timeline
        .iter()
        .filter(|e| e.roll_status() != RollStatus::Normal)
        .count();
    tracing::info!(
        timeline_entries = snapshot.timeline.len(),
        over_limit,
        roll_alerts,
        contracts = snapshot.failure_stats.total_contracts,
        unscheduled_materials = snapshot.failure_stats.unscheduled_materials,
        "快照汇总"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
