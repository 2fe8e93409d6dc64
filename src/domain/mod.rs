// ==========================================
// 出口物流报价系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含计算逻辑,不含配置读取
// ==========================================

pub mod allocation;
pub mod cost;
pub mod economics;
pub mod product;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocatedCostItem, CostLineItem, TermQuote, TradeTermAllocation};
pub use cost::{ModeCostBreakdown, ModeCostComparison};
pub use economics::{
    round_for_display, round_usd_for_display, BuyerPricing, CurrencyContext, LogisticsAlert,
    UnitEconomics,
};
pub use product::{Destination, Dimensions, ProductSpec};
pub use shipment::{FclRecommendation, ShipmentSpec};
pub use types::{
    ContainerType, CostItemKind, LogisticsRiskLevel, PackingMode, Payer, ShippingMode,
    ShippingPreference, TradeTerm,
};
