// ==========================================
// 出口物流报价系统 - 核心库
// ==========================================
// 职责: 家具 SKU 出口的物流比价、贸易术语分摊与单件定价
// 系统定位: 纯计算引擎 (无持久化,无网络)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 费率与目录
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 报价接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ContainerType, CostItemKind, LogisticsRiskLevel, PackingMode, Payer, ShippingMode,
    ShippingPreference, TradeTerm,
};

// 领域实体
pub use domain::{
    Destination, Dimensions, ModeCostBreakdown, ModeCostComparison, ProductSpec, ShipmentSpec,
    TradeTermAllocation, UnitEconomics,
};

// 引擎
pub use engine::{
    EngineError, ModeCostCalculator, QuoteEngine, QuoteInput, QuoteResult, RateProvider,
    ShipmentSpecCalculator, TradeTermAllocator, UnitEconomicsSolver,
};

// 配置
pub use config::{Catalog, ConfigManager, EngineConfig};

// API
pub use api::{QuoteApi, QuoteDocument, QuoteRequest, QuoteSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "出口物流报价系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
