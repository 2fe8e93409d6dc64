// ==========================================
// 出口物流报价系统 - 引擎层错误类型
// ==========================================
// 全部为本地、同步、不可重试的校验失败
// 说明调用方或配置错误,而非瞬时故障
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 输入校验 =====
    #[error("数量无效: quantity={0} (必须为正整数)")]
    InvalidQuantity(i64),

    #[error("数量超限: quantity={quantity}, ceiling={ceiling}")]
    QuantityTooLarge { quantity: i64, ceiling: u32 },

    #[error("产品规格无效 (product_id={product_id}): {reason}")]
    InvalidProductSpec { product_id: String, reason: String },

    // ===== 请求参数 =====
    #[error("市场系数无效: {0} (必须为正数)")]
    InvalidMarketCondition(f64),

    #[error("汇率无效 (currency={currency}): {rate}")]
    InvalidExchangeRate { currency: String, rate: f64 },

    #[error("体积缩减系数无效: {0} (必须在 (0, 1] 区间)")]
    InvalidVolumeReductionFactor(f64),

    #[error("目标售价无效: {0} (必须为有限正数)")]
    InvalidTargetPrice(f64),

    // ===== 求解 =====
    #[error("毛利率无效: {0} (必须小于 1)")]
    InvalidMarginRate(f64),

    #[error("无法保本: unit_price={unit_price} <= variable_cost_per_unit={variable_cost_per_unit}")]
    NoBreakEven {
        unit_price: f64,
        variable_cost_per_unit: f64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
