// ==========================================
// 热轧精整排产分析 - 产能影响预测器
// ==========================================
// 职责: 假设移除/添加一组材料, 预测机组-日产能变化
// 输入: 产能时间线条目 + 候选材料
// 输出: ImpactPrediction (一次性, 不修改时间线)
// ==========================================
// 红线: 无状态引擎, 所有方法都是纯函数
// ==========================================

use crate::domain::capacity::{utilization_pct, CapacityTimelineEntry};
use crate::domain::impact::{
    CandidateMaterial, ImpactDirection, ImpactMessageKind, ImpactPrediction, MaterialDetail,
};
use crate::domain::types::ImpactRisk;
use tracing::{debug, instrument};

/// 利用率下降超过该值 (百分点) 视为改善
pub const IMPROVE_UTILIZATION_FLOOR_PCT: f64 = -5.0;

/// 阈值穿越与利用率的中间结果
struct CapacityShift {
    original_t: f64,
    predicted_t: f64,
    target_t: f64,
    limit_t: f64,
    utilization_before_pct: f64,
    utilization_after_pct: f64,
    exceeds_target_before: bool,
    exceeds_target_after: bool,
    exceeds_limit_before: bool,
    exceeds_limit_after: bool,
}

impl CapacityShift {
    fn new(timeline: &CapacityTimelineEntry, predicted_t: f64) -> Self {
        let original_t = timeline.actual_capacity_t;
        let target_t = timeline.target_capacity_t;
        let limit_t = timeline.limit_capacity_t;
        Self {
            original_t,
            predicted_t,
            target_t,
            limit_t,
            utilization_before_pct: utilization_pct(original_t, target_t),
            utilization_after_pct: utilization_pct(predicted_t, target_t),
            exceeds_target_before: original_t > target_t,
            exceeds_target_after: predicted_t > target_t,
            exceeds_limit_before: original_t > limit_t,
            exceeds_limit_after: predicted_t > limit_t,
        }
    }

    fn utilization_change_pct(&self) -> f64 {
        self.utilization_after_pct - self.utilization_before_pct
    }

    /// 新穿越目标或上限
    fn worsens(&self) -> bool {
        (!self.exceeds_target_before && self.exceeds_target_after)
            || (!self.exceeds_limit_before && self.exceeds_limit_after)
    }

    /// 风险: 超上限 HIGH; 超目标或零吨位选择 MEDIUM; 其他 LOW
    fn risk(&self, affected_weight_t: f64) -> ImpactRisk {
        if self.exceeds_limit_after {
            ImpactRisk::High
        } else if self.exceeds_target_after || affected_weight_t == 0.0 {
            ImpactRisk::Medium
        } else {
            ImpactRisk::Low
        }
    }
}

// ==========================================
// ImpactPredictor - 产能影响预测器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactPredictor;

impl ImpactPredictor {
    pub fn new() -> Self {
        Self
    }

    /// 预测移除一组材料后的产能影响
    ///
    /// # 参数
    /// - `timeline`: 机组-日产能时间线条目
    /// - `materials`: 待移除材料 (缺失/非有限吨位按 0 处理)
    ///
    /// # 返回
    /// 预测结果, material_details 保持输入顺序
    #[instrument(skip_all, fields(
        machine_code = %timeline.machine_code,
        date = %timeline.date,
        materials = materials.len()
    ))]
    pub fn predict_removal(
        &self,
        timeline: &CapacityTimelineEntry,
        materials: &[CandidateMaterial],
    ) -> ImpactPrediction {
        let affected_weight_t: f64 = materials.iter().map(|m| m.effective_weight_t()).sum();
        let predicted_t = (timeline.actual_capacity_t - affected_weight_t).max(0.0);
        let shift = CapacityShift::new(timeline, predicted_t);
        let change_pct = shift.utilization_change_pct();

        let improves = (shift.exceeds_target_before && !shift.exceeds_target_after)
            || (shift.exceeds_limit_before && !shift.exceeds_limit_after)
            || change_pct < IMPROVE_UTILIZATION_FLOOR_PCT;

        let (message_kind, message) = if materials.is_empty() {
            (
                ImpactMessageKind::NoSelection,
                "未选择材料, 产能不变".to_string(),
            )
        } else if improves && !shift.exceeds_target_after {
            (
                ImpactMessageKind::ResolvedTarget,
                format!(
                    "移除后产能 {:.1}t, 在目标产能 {:.1}t 以内",
                    shift.predicted_t, shift.target_t
                ),
            )
        } else if improves {
            (
                ImpactMessageKind::ReducedUtilization,
                format!("移除后利用率下降 {:.1} 个百分点", -change_pct),
            )
        } else if shift.exceeds_limit_after {
            (
                ImpactMessageKind::StillOverLimit,
                format!(
                    "移除后产能 {:.1}t 仍超过限制产能 {:.1}t",
                    shift.predicted_t, shift.limit_t
                ),
            )
        } else if shift.exceeds_target_after {
            (
                ImpactMessageKind::StillOverTarget,
                format!(
                    "移除后产能 {:.1}t 仍超过目标产能 {:.1}t",
                    shift.predicted_t, shift.target_t
                ),
            )
        } else {
            (
                ImpactMessageKind::Neutral,
                format!(
                    "产能变化 {:+.1}t, 利用率变化 {:+.1}%",
                    shift.predicted_t - shift.original_t,
                    change_pct
                ),
            )
        };

        let prediction = build_prediction(
            ImpactDirection::Removal,
            &shift,
            affected_weight_t,
            improves,
            message_kind,
            message,
            materials.iter().map(MaterialDetail::from).collect(),
        );
        debug!(
            risk = %prediction.risk,
            delta_t = prediction.capacity_delta_t,
            "移除影响预测完成"
        );
        prediction
    }

    /// 预测添加单个材料后的产能影响
    ///
    /// 与移除对称: predicted = actual + weight,
    /// 新穿越目标或上限视为恶化, improves = !worsens
    #[instrument(skip_all, fields(
        machine_code = %timeline.machine_code,
        date = %timeline.date,
        material_id = %material.material_id
    ))]
    pub fn predict_addition(
        &self,
        timeline: &CapacityTimelineEntry,
        material: &CandidateMaterial,
    ) -> ImpactPrediction {
        let affected_weight_t = material.effective_weight_t();
        let predicted_t = timeline.actual_capacity_t + affected_weight_t;
        let shift = CapacityShift::new(timeline, predicted_t);
        let improves = !shift.worsens();

        let (message_kind, message) = if affected_weight_t == 0.0 {
            (
                ImpactMessageKind::NoSelection,
                "材料吨位为 0, 产能不变".to_string(),
            )
        } else if shift.exceeds_limit_after {
            (
                ImpactMessageKind::ExceedsLimit,
                format!(
                    "添加后产能 {:.1}t 将超过限制产能 {:.1}t",
                    shift.predicted_t, shift.limit_t
                ),
            )
        } else if shift.exceeds_target_after {
            (
                ImpactMessageKind::ExceedsTarget,
                format!(
                    "添加后产能 {:.1}t 将超过目标产能 {:.1}t",
                    shift.predicted_t, shift.target_t
                ),
            )
        } else {
            (
                ImpactMessageKind::WithinCapacity,
                format!(
                    "添加后产能 {:.1}t, 利用率 {:.1}%",
                    shift.predicted_t, shift.utilization_after_pct
                ),
            )
        };

        let prediction = build_prediction(
            ImpactDirection::Addition,
            &shift,
            affected_weight_t,
            improves,
            message_kind,
            message,
            vec![MaterialDetail::from(material)],
        );
        debug!(
            risk = %prediction.risk,
            delta_t = prediction.capacity_delta_t,
            "添加影响预测完成"
        );
        prediction
    }
}

fn build_prediction(
    direction: ImpactDirection,
    shift: &CapacityShift,
    affected_weight_t: f64,
    improves: bool,
    message_kind: ImpactMessageKind,
    message: String,
    material_details: Vec<MaterialDetail>,
) -> ImpactPrediction {
    ImpactPrediction {
        direction,
        original_capacity_t: shift.original_t,
        predicted_capacity_t: shift.predicted_t,
        capacity_delta_t: shift.predicted_t - shift.original_t,
        affected_weight_t,
        utilization_before_pct: shift.utilization_before_pct,
        utilization_after_pct: shift.utilization_after_pct,
        utilization_change_pct: shift.utilization_change_pct(),
        exceeds_target_before: shift.exceeds_target_before,
        exceeds_target_after: shift.exceeds_target_after,
        exceeds_limit_before: shift.exceeds_limit_before,
        exceeds_limit_after: shift.exceeds_limit_after,
        improves,
        worsens: shift.worsens(),
        risk: shift.risk(affected_weight_t),
        message_kind,
        message,
        material_details,
    }
}
