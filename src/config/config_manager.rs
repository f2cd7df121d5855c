// ==========================================
// 热轧精整排产分析 - 配置管理器
// ==========================================
// 职责: 配置加载、查询
// 存储: 全局 key-value (值均为字符串, 与后端 config_kv 一致)
// 覆写: "{key}/{machine_code}" 形式的机组级配置优先于全局配置
// ==========================================

use crate::error::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RollThresholds - 换辊阈值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollThresholds {
    pub suggest_threshold_t: f64, // 建议换辊阈值 (吨)
    pub hard_limit_t: f64,        // 强制换辊阈值 (吨)
}

impl Default for RollThresholds {
    /// 默认值: 建议 1500 吨, 强制 2500 吨
    fn default() -> Self {
        Self {
            suggest_threshold_t: 1500.0,
            hard_limit_t: 2500.0,
        }
    }
}

// ==========================================
// AnalyticsConfig - 已解析的分析配置
// ==========================================
// 由 ConfigManager 一次性解析, 聚合器只读取该结构
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsConfig {
    pub default_roll_thresholds: RollThresholds,
    pub machine_roll_thresholds: HashMap<String, RollThresholds>,
}

impl AnalyticsConfig {
    /// 获取换辊阈值 (按机组)
    pub fn roll_thresholds(&self, machine_code: &str) -> RollThresholds {
        self.machine_roll_thresholds
            .get(machine_code)
            .copied()
            .unwrap_or(self.default_roll_thresholds)
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 空配置 (全部使用默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有的 key-value 集合创建
    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 从扁平 JSON 对象解析
    ///
    /// 值允许是字符串或数字, 数字会转为字符串存储。
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let values = raw
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
        Ok(Self { values })
    }

    /// 从配置文件加载
    pub fn load(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 设置配置值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 读取正数配置, 不存在返回 None, 非法返回错误
    fn get_positive_f64(&self, key: &str) -> AnalyticsResult<Option<f64>> {
        let raw = match self.get_config_value(key) {
            Some(v) => v,
            None => return Ok(None),
        };

        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
            _ => Err(AnalyticsError::InvalidConfig {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// 读取正数配置, 带默认值
    fn get_positive_f64_or(&self, key: &str, default: f64) -> AnalyticsResult<f64> {
        Ok(self.get_positive_f64(key)?.unwrap_or(default))
    }

    // ===== 换辊配置 =====

    /// 获取全局换辊阈值
    pub fn get_default_roll_thresholds(&self) -> AnalyticsResult<RollThresholds> {
        let defaults = RollThresholds::default();
        Ok(RollThresholds {
            suggest_threshold_t: self.get_positive_f64_or(
                config_keys::ROLL_SUGGEST_THRESHOLD_T,
                defaults.suggest_threshold_t,
            )?,
            hard_limit_t: self
                .get_positive_f64_or(config_keys::ROLL_HARD_LIMIT_T, defaults.hard_limit_t)?,
        })
    }

    /// 获取换辊阈值 (按机组, 未配置的项回退到全局值)
    pub fn get_roll_thresholds(&self, machine_code: &str) -> AnalyticsResult<RollThresholds> {
        let global = self.get_default_roll_thresholds()?;
        Ok(RollThresholds {
            suggest_threshold_t: self
                .get_positive_f64(&machine_key(config_keys::ROLL_SUGGEST_THRESHOLD_T, machine_code))?
                .unwrap_or(global.suggest_threshold_t),
            hard_limit_t: self
                .get_positive_f64(&machine_key(config_keys::ROLL_HARD_LIMIT_T, machine_code))?
                .unwrap_or(global.hard_limit_t),
        })
    }

    /// 解析完整分析配置
    pub fn analytics_config(&self) -> AnalyticsResult<AnalyticsConfig> {
        let default_roll_thresholds = self.get_default_roll_thresholds()?;

        let mut machines: Vec<&str> = self
            .values
            .keys()
            .filter_map(|key| {
                let (base, machine) = key.split_once('/')?;
                let known = base == config_keys::ROLL_SUGGEST_THRESHOLD_T
                    || base == config_keys::ROLL_HARD_LIMIT_T;
                (known && !machine.is_empty()).then_some(machine)
            })
            .collect();
        machines.sort_unstable();
        machines.dedup();

        let mut machine_roll_thresholds = HashMap::new();
        for machine in machines {
            machine_roll_thresholds.insert(machine.to_string(), self.get_roll_thresholds(machine)?);
        }

        Ok(AnalyticsConfig {
            default_roll_thresholds,
            machine_roll_thresholds,
        })
    }
}

fn machine_key(base: &str, machine_code: &str) -> String {
    format!("{}/{}", base, machine_code)
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // ===== 换辊配置 =====
    pub const ROLL_SUGGEST_THRESHOLD_T: &str = "roll_suggest_threshold_t";
    pub const ROLL_HARD_LIMIT_T: &str = "roll_hard_limit_t";
}
