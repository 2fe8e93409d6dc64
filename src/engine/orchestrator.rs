// ==========================================
// 出口物流报价系统 - 报价编排器
// ==========================================
// 职责: 串联 校验 → 货量规格 → 运输比价 → 费用分摊 → 单件经济性
// 红线: 数据严格自上而下流动,下游不回调上游
// 红线: 纯函数,不持有可变状态,可在多线程中并行调用
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::allocation::{TermQuote, TradeTermAllocation};
use crate::domain::cost::{ModeCostBreakdown, ModeCostComparison};
use crate::domain::economics::{BuyerPricing, CurrencyContext, LogisticsAlert, UnitEconomics};
use crate::domain::product::{Destination, ProductSpec};
use crate::domain::shipment::ShipmentSpec;
use crate::domain::types::{PackingMode, ShippingMode, ShippingPreference, TradeTerm};
use crate::engine::allocator::{allocate, CostInputs, TradeTermAllocator};
use crate::engine::error::EngineResult;
use crate::engine::logistics_risk::LogisticsRiskEngine;
use crate::engine::mode_cost::ModeCostCalculator;
use crate::engine::shipment_spec::ShipmentSpecCalculator;
use crate::engine::solver::{check_margin_rate, EconomicsInputs, UnitEconomicsSolver};
use crate::engine::validator::InputValidator;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 报价输入 (产品与目的地已由调用方解析)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub quantity: i64,
    pub packing_mode: PackingMode,
    pub trade_term: TradeTerm,
    /// 缺省 = 配置默认 (1.0)
    #[serde(default)]
    pub market_condition: Option<f64>,
    pub usd_rate: f64,
    /// 缺省 = 配置默认 (0.7)
    #[serde(default)]
    pub volume_reduction_factor: Option<f64>,
    #[serde(default)]
    pub shipping_preference: ShippingPreference,
    /// 缺省 = 配置默认卖方目标毛利率
    #[serde(default)]
    pub target_margin_rate: Option<f64>,
    #[serde(default)]
    pub buyer_target_price: Option<f64>,
    /// 缺省 = 配置默认买方毛利率
    #[serde(default)]
    pub buyer_margin_rate: Option<f64>,
}

impl QuoteInput {
    pub fn new(quantity: i64, packing_mode: PackingMode, trade_term: TradeTerm, usd_rate: f64) -> Self {
        Self {
            quantity,
            packing_mode,
            trade_term,
            market_condition: None,
            usd_rate,
            volume_reduction_factor: None,
            shipping_preference: ShippingPreference::default(),
            target_margin_rate: None,
            buyer_target_price: None,
            buyer_margin_rate: None,
        }
    }
}

/// 报价结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub trade_term: TradeTerm,
    pub market_condition: f64,
    pub currency: CurrencyContext,
    pub shipment_spec: ShipmentSpec,
    pub mode_costs: ModeCostComparison,
    /// 进入分摊的运输方式
    pub chosen_mode: ShippingMode,
    pub allocation: TradeTermAllocation,
    /// 全部术语对比 (EXW → DDP)
    pub term_quotes: Vec<TermQuote>,
    pub unit_economics: UnitEconomics,
    pub buyer_pricing: BuyerPricing,
    pub logistics_alert: LogisticsAlert,
}

// ==========================================
// QuoteEngine - 报价编排器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    config: EngineConfig,
}

impl QuoteEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 生成完整报价
    ///
    /// # 错误
    /// - 校验类: InvalidQuantity / QuantityTooLarge / InvalidProductSpec
    /// - 参数类: InvalidMarketCondition / InvalidVolumeReductionFactor / InvalidExchangeRate
    /// - 求解类: InvalidMarginRate
    #[instrument(
        skip(self, product, destination, input),
        fields(
            product_id = %product.product_id,
            destination_id = %destination.destination_id,
            quantity = input.quantity,
            trade_term = %input.trade_term,
        )
    )]
    pub fn quote(
        &self,
        product: &ProductSpec,
        destination: &Destination,
        input: &QuoteInput,
    ) -> EngineResult<QuoteResult> {
        let config = &self.config;

        // 1. 输入校验
        let quantity = InputValidator::new(config.quantity_ceiling).validate(input.quantity, product)?;
        let market_condition = InputValidator::resolve_market_condition(
            input.market_condition,
            config.default_market_condition,
        )?;
        let volume_reduction_factor = InputValidator::resolve_volume_reduction_factor(
            input.volume_reduction_factor,
            config.default_volume_reduction_factor,
        )?;
        let usd_rate = InputValidator::validate_exchange_rate("USD", input.usd_rate)?;
        let target_margin_rate = resolve_margin_rate(input.target_margin_rate, config.default_target_margin_rate)?;
        let buyer_margin_rate = resolve_margin_rate(input.buyer_margin_rate, config.default_buyer_margin_rate)?;
        let buyer_target_price = InputValidator::validate_target_price(input.buyer_target_price)?;
        let currency = CurrencyContext::new(config.reference_currency.clone(), usd_rate);

        // 2. 货量规格
        let shipment_spec = ShipmentSpecCalculator::new(config).compute(
            product,
            quantity,
            input.packing_mode,
            volume_reduction_factor,
        );

        // 3. 运输方式比价
        let mode_costs = ModeCostCalculator::new(config).compute(&shipment_spec, market_condition);
        let chosen: ModeCostBreakdown = match input.shipping_preference {
            ShippingPreference::CheapestOcean => mode_costs.best_ocean().clone(),
            ShippingPreference::Air => mode_costs.air.clone(),
        };

        // 4. 费用分摊
        let allocator = TradeTermAllocator::new(config);
        let items = allocator.build_cost_items(&CostInputs {
            product,
            spec: &shipment_spec,
            chosen_mode: &chosen,
            destination,
            target_margin_rate,
        });
        let allocation = allocator.allocate(&items, input.trade_term);
        let term_quotes: Vec<TermQuote> = allocator
            .allocate_all(&items)
            .into_iter()
            .map(|term_allocation| {
                let unit_price = term_allocation.seller_total / f64::from(quantity);
                TermQuote {
                    trade_term: term_allocation.trade_term,
                    seller_total: term_allocation.seller_total,
                    buyer_total: term_allocation.buyer_total,
                    unit_price,
                    unit_price_usd: currency.to_usd(unit_price),
                }
            })
            .collect();

        // 5. 单件经济性
        let variable_cost_per_unit =
            product.unit_cost + config.packing_cost.per_unit(input.packing_mode);
        let unit_economics = UnitEconomicsSolver::solve(&EconomicsInputs {
            allocation: &allocation,
            quantity,
            variable_cost_per_unit,
            target_margin_rate,
            buyer_target_price,
            currency: &currency,
        })?;
        let buyer_pricing = UnitEconomicsSolver::buyer_pricing(
            unit_economics.unit_sell_price,
            &allocation,
            quantity,
            destination.consumption_tax_rate,
            buyer_margin_rate,
            &currency,
        )?;

        // 6. 物流费用占比
        let fob_seller_total = allocate(&items, TradeTerm::Fob).seller_total;
        let logistics_alert = LogisticsRiskEngine::new(config.logistics_ratio_threshold)
            .assess(chosen.total, fob_seller_total);

        tracing::info!(
            chosen_mode = %chosen.mode,
            seller_total = allocation.seller_total,
            unit_sell_price = unit_economics.unit_sell_price,
            logistics_level = %logistics_alert.level,
            "报价生成完成"
        );

        Ok(QuoteResult {
            trade_term: input.trade_term,
            market_condition,
            currency,
            shipment_spec,
            mode_costs,
            chosen_mode: chosen.mode,
            allocation,
            term_quotes,
            unit_economics,
            buyer_pricing,
            logistics_alert,
        })
    }
}

/// 毛利率: 缺省取配置默认值,必须小于 1
fn resolve_margin_rate(value: Option<f64>, default: f64) -> EngineResult<f64> {
    let rate = value.unwrap_or(default);
    check_margin_rate(rate)?;
    Ok(rate)
}
