// ==========================================
// 出口物流报价系统 - 单件经济性
// ==========================================
// 全部为派生值,按需重算,不持久化
// ==========================================

use crate::domain::types::LogisticsRiskLevel;
use serde::{Deserialize, Serialize};

/// 币种上下文: 基准货币 + 美元换算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyContext {
    /// 基准货币代码 (如 KRW)
    pub reference_currency: String,
    /// 1 USD = usd_rate 基准货币
    pub usd_rate: f64,
}

impl CurrencyContext {
    pub fn new(reference_currency: impl Into<String>, usd_rate: f64) -> Self {
        Self {
            reference_currency: reference_currency.into(),
            usd_rate,
        }
    }

    /// 基准货币金额换算为美元 (保留全精度)
    pub fn to_usd(&self, amount: f64) -> f64 {
        amount / self.usd_rate
    }
}

/// 展示用取整: 基准货币取整到个位
///
/// 只用于输出展示,链式计算必须使用未取整的原值
pub fn round_for_display(amount: f64) -> f64 {
    amount.round()
}

/// 美元展示取整: 两位小数
pub fn round_usd_for_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    pub unit_cost: f64,
    pub unit_sell_price: f64,
    pub margin_amount: f64,
    pub margin_rate: f64,
    /// None: 单价不高于单件变动成本,无法保本
    pub break_even_quantity: Option<u64>,
    pub unit_cost_usd: f64,
    pub unit_sell_price_usd: f64,
    pub margin_amount_usd: f64,
}

/// 买方到岸与零售价推算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerPricing {
    /// 买方到岸单件成本 = 卖方报价 + 买方自付费用 / 数量
    pub landed_unit_cost: f64,
    pub consumption_tax: f64,
    pub buyer_margin_rate: f64,
    pub buyer_margin_amount: f64,
    pub retail_price: f64,
    pub retail_price_usd: f64,
}

/// 物流费用占比预警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsAlert {
    pub level: LogisticsRiskLevel,
    /// 单件物流费 / 单件 FOB 成本
    pub logistics_ratio: f64,
    pub threshold: f64,
    pub message: String,
}
