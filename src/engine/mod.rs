// ==========================================
// 出口物流报价系统 - 引擎层
// ==========================================
// 组件 (自下而上): 输入校验 → 货量规格 → 运输比价 → 分摊与求解
// 红线: 引擎不做 I/O,不重试,所有判定输出原因
// ==========================================

pub mod allocator;
pub mod error;
pub mod logistics_risk;
pub mod mode_cost;
pub mod orchestrator;
pub mod rate_provider;
pub mod shipment_spec;
pub mod solver;
pub mod validator;

// 重导出核心引擎
pub use allocator::{allocate, CostInputs, TradeTermAllocator};
pub use error::{EngineError, EngineResult};
pub use logistics_risk::LogisticsRiskEngine;
pub use mode_cost::ModeCostCalculator;
pub use orchestrator::{QuoteEngine, QuoteInput, QuoteResult};
pub use rate_provider::{resolve_rate, FixedRateProvider, RateProvider, UnavailableRateProvider};
pub use shipment_spec::ShipmentSpecCalculator;
pub use solver::{
    break_even_quantity, margin_rate, max_unit_cost_for_target_price, required_price_for_margin,
    unit_sell_price, EconomicsInputs, UnitEconomicsSolver,
};
pub use validator::InputValidator;
