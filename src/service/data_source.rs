// ==========================================
// 热轧精整排产分析 - 数据源接口
// ==========================================
// 职责: 定义取数协作方接口 (不含聚合逻辑)
// 实现者: InMemoryDataSource / JsonFileDataSource / 后端 API 适配
// ==========================================

use crate::domain::capacity::CapacityPoolRow;
use crate::domain::failure::MaterialFailureRow;
use crate::domain::plan::PlanAssignmentRow;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::importer::ImportedSnapshot;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// 同一时刻的三类数据
#[derive(Debug, Clone, Default)]
pub struct SourceRows {
    pub plan_rows: Vec<PlanAssignmentRow>,
    pub pool_rows: Vec<CapacityPoolRow>,
    pub failure_rows: Vec<MaterialFailureRow>,
}

impl From<ImportedSnapshot> for SourceRows {
    fn from(snapshot: ImportedSnapshot) -> Self {
        Self {
            plan_rows: snapshot.plan_rows,
            pool_rows: snapshot.pool_rows,
            failure_rows: snapshot.failure_rows,
        }
    }
}

// ==========================================
// SchedulingDataSource Trait
// ==========================================
// 调用方保证返回的数据已按权限过滤
#[async_trait]
pub trait SchedulingDataSource: Send + Sync {
    /// 读取排产明细行
    async fn fetch_plan_rows(&self) -> AnalyticsResult<Vec<PlanAssignmentRow>>;

    /// 读取产能池快照行
    async fn fetch_pool_rows(&self) -> AnalyticsResult<Vec<CapacityPoolRow>>;

    /// 读取材料失败行
    async fn fetch_failure_rows(&self) -> AnalyticsResult<Vec<MaterialFailureRow>>;

    /// 读取一份完整快照, 任一类失败则整体失败
    ///
    /// 默认并发调用三个分类读取; 能一次取到全部数据的实现应覆写此方法,
    /// 保证三类数据来自同一版本
    async fn fetch_snapshot(&self) -> AnalyticsResult<SourceRows> {
        let (plan_rows, pool_rows, failure_rows) = futures::try_join!(
            self.fetch_plan_rows(),
            self.fetch_pool_rows(),
            self.fetch_failure_rows(),
        )?;
        Ok(SourceRows {
            plan_rows,
            pool_rows,
            failure_rows,
        })
    }
}

// ==========================================
// InMemoryDataSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    pub plan_rows: Vec<PlanAssignmentRow>,
    pub pool_rows: Vec<CapacityPoolRow>,
    pub failure_rows: Vec<MaterialFailureRow>,
}

impl InMemoryDataSource {
    pub fn new(
        plan_rows: Vec<PlanAssignmentRow>,
        pool_rows: Vec<CapacityPoolRow>,
        failure_rows: Vec<MaterialFailureRow>,
    ) -> Self {
        Self {
            plan_rows,
            pool_rows,
            failure_rows,
        }
    }
}

impl From<ImportedSnapshot> for InMemoryDataSource {
    fn from(snapshot: ImportedSnapshot) -> Self {
        Self::new(snapshot.plan_rows, snapshot.pool_rows, snapshot.failure_rows)
    }
}

#[async_trait]
impl SchedulingDataSource for InMemoryDataSource {
    async fn fetch_plan_rows(&self) -> AnalyticsResult<Vec<PlanAssignmentRow>> {
        Ok(self.plan_rows.clone())
    }

    async fn fetch_pool_rows(&self) -> AnalyticsResult<Vec<CapacityPoolRow>> {
        Ok(self.pool_rows.clone())
    }

    async fn fetch_failure_rows(&self) -> AnalyticsResult<Vec<MaterialFailureRow>> {
        Ok(self.failure_rows.clone())
    }
}

// ==========================================
// JsonFileDataSource - 快照文件数据源
// ==========================================
// 每次读取都重新加载文件, 与后端接口一样不保留上次结果
// 一次刷新只读一次文件 (fetch_snapshot)
#[derive(Debug)]
pub struct JsonFileDataSource {
    path: PathBuf,
    loads: AtomicUsize,
}

impl JsonFileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// 累计读取文件次数
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    async fn load(&self) -> AnalyticsResult<ImportedSnapshot> {
        let loads = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(path = %self.path.display(), loads, "读取快照文件");
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AnalyticsError::data_source(self.path.display().to_string(), e.to_string())
        })?;
        ImportedSnapshot::from_json_str(&content)
    }
}

#[async_trait]
impl SchedulingDataSource for JsonFileDataSource {
    async fn fetch_plan_rows(&self) -> AnalyticsResult<Vec<PlanAssignmentRow>> {
        Ok(self.load().await?.plan_rows)
    }

    async fn fetch_pool_rows(&self) -> AnalyticsResult<Vec<CapacityPoolRow>> {
        Ok(self.load().await?.pool_rows)
    }

    async fn fetch_failure_rows(&self) -> AnalyticsResult<Vec<MaterialFailureRow>> {
        Ok(self.load().await?.failure_rows)
    }

    async fn fetch_snapshot(&self) -> AnalyticsResult<SourceRows> {
        Ok(self.load().await?.into())
    }
}
