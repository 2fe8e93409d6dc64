// ==========================================
// 出口物流报价系统 - 单件经济性求解器
// ==========================================
// 正向: 成本 → 单价
// 反向: 目标毛利/目标价 → 所需价格/可承受成本, 保本数量
// ==========================================
// 红线: 越界的毛利率、不可保本的价格一律报错,不返回负数或无穷
// ==========================================

use crate::domain::allocation::TradeTermAllocation;
use crate::domain::economics::{BuyerPricing, CurrencyContext, UnitEconomics};
use crate::engine::error::{EngineError, EngineResult};

/// 正向求解: 单件报价 = 卖方合计 / 数量
pub fn unit_sell_price(allocation: &TradeTermAllocation, quantity: u32) -> f64 {
    allocation.seller_total / f64::from(quantity)
}

/// 按目标毛利率反推售价
///
/// price = unit_cost / (1 - margin_rate)
///
/// # 错误
/// - InvalidMarginRate: margin_rate >= 1 (分母为零或负)
pub fn required_price_for_margin(unit_cost: f64, target_margin_rate: f64) -> EngineResult<f64> {
    check_margin_rate(target_margin_rate)?;
    Ok(unit_cost / (1.0 - target_margin_rate))
}

/// 按目标售价与毛利率反推可承受的单件成本
///
/// cost = target_price × (1 - margin_rate)
///
/// # 错误
/// - InvalidTargetPrice: 目标售价非有限正数
/// - InvalidMarginRate: margin_rate >= 1
pub fn max_unit_cost_for_target_price(target_price: f64, target_margin_rate: f64) -> EngineResult<f64> {
    if !(target_price.is_finite() && target_price > 0.0) {
        return Err(EngineError::InvalidTargetPrice(target_price));
    }
    check_margin_rate(target_margin_rate)?;
    Ok(target_price * (1.0 - target_margin_rate))
}

/// 保本数量
///
/// quantity = ceil(fixed_costs / (unit_price - variable_cost_per_unit))
///
/// # 错误
/// - NoBreakEven: unit_price <= variable_cost_per_unit
pub fn break_even_quantity(
    fixed_costs: f64,
    unit_price: f64,
    variable_cost_per_unit: f64,
) -> EngineResult<u64> {
    let contribution = unit_price - variable_cost_per_unit;
    if !(contribution > 0.0) || !contribution.is_finite() {
        return Err(EngineError::NoBreakEven {
            unit_price,
            variable_cost_per_unit,
        });
    }
    if fixed_costs <= 0.0 {
        return Ok(0);
    }
    Ok((fixed_costs / contribution).ceil() as u64)
}

/// 毛利率 = (售价 - 成本) / 售价; 售价非正时为 0
pub fn margin_rate(unit_cost: f64, unit_price: f64) -> f64 {
    if unit_price > 0.0 {
        (unit_price - unit_cost) / unit_price
    } else {
        0.0
    }
}

pub(crate) fn check_margin_rate(rate: f64) -> EngineResult<()> {
    if rate.is_finite() && rate < 1.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidMarginRate(rate))
    }
}

// ==========================================
// UnitEconomicsSolver - 组合求解
// ==========================================

/// 单件经济性求解的输入
#[derive(Debug, Clone, Copy)]
pub struct EconomicsInputs<'a> {
    pub allocation: &'a TradeTermAllocation,
    pub quantity: u32,
    /// 单件变动成本 (产品 + 包装)
    pub variable_cost_per_unit: f64,
    pub target_margin_rate: f64,
    /// 买方目标价 (给出时以此为售价)
    pub buyer_target_price: Option<f64>,
    pub currency: &'a CurrencyContext,
}

pub struct UnitEconomicsSolver;

impl UnitEconomicsSolver {
    /// 计算当前术语的单件经济性
    ///
    /// - 单件成本 = 正向求解
    /// - 售价 = 买方目标价,或按目标毛利反推
    /// - 固定成本 = 卖方合计 - 变动成本 × 数量
    pub fn solve(inputs: &EconomicsInputs<'_>) -> EngineResult<UnitEconomics> {
        let unit_cost = unit_sell_price(inputs.allocation, inputs.quantity);

        let unit_sell_price = match inputs.buyer_target_price {
            Some(price) => price,
            None => required_price_for_margin(unit_cost, inputs.target_margin_rate)?,
        };

        let margin_amount = unit_sell_price - unit_cost;
        let fixed_costs = inputs.allocation.seller_total
            - inputs.variable_cost_per_unit * f64::from(inputs.quantity);

        let break_even_quantity =
            match break_even_quantity(fixed_costs, unit_sell_price, inputs.variable_cost_per_unit) {
                Ok(quantity) => Some(quantity),
                Err(EngineError::NoBreakEven { .. }) => {
                    tracing::debug!(unit_sell_price, "单价不高于变动成本,无保本数量");
                    None
                }
                Err(other) => return Err(other),
            };

        Ok(UnitEconomics {
            unit_cost,
            unit_sell_price,
            margin_amount,
            margin_rate: margin_rate(unit_cost, unit_sell_price),
            break_even_quantity,
            unit_cost_usd: inputs.currency.to_usd(unit_cost),
            unit_sell_price_usd: inputs.currency.to_usd(unit_sell_price),
            margin_amount_usd: inputs.currency.to_usd(margin_amount),
        })
    }

    /// 买方到岸成本与零售价推算
    ///
    /// 到岸 = 卖方单价 + 买方自付费用 / 数量
    /// 零售价 = (到岸 + 消费税) / (1 - 买方毛利率)
    pub fn buyer_pricing(
        unit_sell_price: f64,
        allocation: &TradeTermAllocation,
        quantity: u32,
        consumption_tax_rate: f64,
        buyer_margin_rate: f64,
        currency: &CurrencyContext,
    ) -> EngineResult<BuyerPricing> {
        let landed_unit_cost = unit_sell_price + allocation.buyer_total / f64::from(quantity);
        let consumption_tax = landed_unit_cost * consumption_tax_rate;
        let taxed_cost = landed_unit_cost + consumption_tax;
        let retail_price = required_price_for_margin(taxed_cost, buyer_margin_rate)?;

        Ok(BuyerPricing {
            landed_unit_cost,
            consumption_tax,
            buyer_margin_rate,
            buyer_margin_amount: retail_price - taxed_cost,
            retail_price,
            retail_price_usd: currency.to_usd(retail_price),
        })
    }
}
