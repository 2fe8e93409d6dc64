// ==========================================
// 出口物流报价系统 - 汇率/指数提供者接口
// ==========================================
// 职责: 定义汇率读取 trait,实现依赖倒置
// 说明: 引擎只同步调用 trait,不做网络请求、不重试、不超时
//       在线汇率与缓存由调用方实现
// ==========================================

use crate::engine::error::EngineResult;
use crate::engine::validator::InputValidator;
use std::collections::HashMap;

/// 汇率提供者
///
/// 返回 1 单位外币对应的基准货币金额; 不可用时返回 None
pub trait RateProvider: Send + Sync {
    fn get(&self, currency: &str) -> Option<f64>;
}

// ==========================================
// FixedRateProvider - 固定汇率 (测试替身 / 离线模式)
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FixedRateProvider {
    rates: HashMap<String, f64>,
}

impl FixedRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: &str, rate: f64) -> Self {
        self.rates.insert(currency.trim().to_uppercase(), rate);
        self
    }
}

impl RateProvider for FixedRateProvider {
    fn get(&self, currency: &str) -> Option<f64> {
        self.rates.get(&currency.trim().to_uppercase()).copied()
    }
}

/// 不可用的提供者 (总是返回 None)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRateProvider;

impl RateProvider for UnavailableRateProvider {
    fn get(&self, _currency: &str) -> Option<f64> {
        None
    }
}

/// 解析汇率
///
/// 顺序: 提供者的有效值 > 调用方给出的回落值
///
/// # 错误
/// - InvalidExchangeRate: 回落值也不是有限正数
pub fn resolve_rate(provider: &dyn RateProvider, currency: &str, fallback: f64) -> EngineResult<f64> {
    match provider.get(currency) {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => {
            tracing::warn!(currency, rate, fallback, "汇率无效,使用回落值");
            InputValidator::validate_exchange_rate(currency, fallback)
        }
        None => {
            tracing::warn!(currency, fallback, "汇率不可用,使用回落值");
            InputValidator::validate_exchange_rate(currency, fallback)
        }
    }
}
