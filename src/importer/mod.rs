// ==========================================
// 热轧精整排产分析 - 导入层
// ==========================================
// 职责: 上游松散记录的校验/校正边界
// 红线: 之后的引擎只接触强类型结构
// ==========================================

pub mod field_mapper;
pub mod snapshot;

// 重导出核心类型
pub use field_mapper::{parse_date, FieldMapper};
pub use snapshot::{DroppedCounts, ImportedSnapshot, RawSnapshot};
