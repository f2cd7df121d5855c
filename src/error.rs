// ==========================================
// 热轧精整排产分析 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 聚合与预测本身是全函数, 不产生错误;
//       错误只来自配置加载与取数协作方
// ==========================================

use thiserror::Error;

/// 分析层错误类型
#[derive(Error, Debug)]
pub enum AnalyticsError {
    // ===== 配置错误 =====
    #[error("配置值无效 (key={key}): {value}")]
    InvalidConfig { key: String, value: String },

    // ===== 取数错误 =====
    #[error("数据源读取失败 ({source_name}): {message}")]
    DataSource {
        source_name: String,
        message: String,
    },

    #[error("快照格式无效: {0}")]
    InvalidSnapshot(String),

    // ===== 基础设施错误 =====
    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 分析层 Result 类型别名
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// 构造数据源错误
    pub fn data_source(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        AnalyticsError::DataSource {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
