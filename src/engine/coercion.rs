// ==========================================
// 热轧精整排产分析 - 数值校正
// ==========================================
// 上游数值字段一律先经过这里, 再进入聚合/预测逻辑
// ==========================================

/// 有限且为正时返回 Some
pub fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// 非有限值按 0 处理
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
