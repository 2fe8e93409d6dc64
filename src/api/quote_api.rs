// ==========================================
// 出口物流报价系统 - 报价 API
// ==========================================
// 职责: 目录查找 → 汇率解析 → 引擎报价 → 生成报价单
// 汇率顺序: 请求显式给出 > 汇率提供者 > 配置回落值
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::catalog::Catalog;
use crate::config::config_manager::ConfigManager;
use crate::domain::economics::{round_for_display, round_usd_for_display};
use crate::domain::types::{PackingMode, ShippingMode, ShippingPreference, TradeTerm};
use crate::engine::orchestrator::{QuoteEngine, QuoteInput, QuoteResult};
use crate::engine::rate_provider::{resolve_rate, RateProvider, UnavailableRateProvider};
use crate::engine::solver::max_unit_cost_for_target_price;
use crate::importer::catalog_importer::CatalogImporter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// 报价请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub product_id: String,
    pub destination_id: String,
    pub quantity: i64,
    pub packing_mode: PackingMode,
    #[serde(default)]
    pub trade_term: TradeTerm,
    #[serde(default)]
    pub market_condition: Option<f64>,
    /// 缺省时查询汇率提供者
    #[serde(default)]
    pub usd_rate: Option<f64>,
    #[serde(default)]
    pub volume_reduction_factor: Option<f64>,
    #[serde(default)]
    pub shipping_preference: ShippingPreference,
    #[serde(default)]
    pub target_margin_rate: Option<f64>,
    #[serde(default)]
    pub buyer_target_price: Option<f64>,
    #[serde(default)]
    pub buyer_margin_rate: Option<f64>,
}

impl QuoteRequest {
    pub fn new(
        product_id: impl Into<String>,
        destination_id: impl Into<String>,
        quantity: i64,
        packing_mode: PackingMode,
        trade_term: TradeTerm,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            destination_id: destination_id.into(),
            quantity,
            packing_mode,
            trade_term,
            market_condition: None,
            usd_rate: None,
            volume_reduction_factor: None,
            shipping_preference: ShippingPreference::default(),
            target_margin_rate: None,
            buyer_target_price: None,
            buyer_margin_rate: None,
        }
    }
}

/// 报价单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub quote_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub product_id: String,
    pub destination_id: String,
    pub result: QuoteResult,
}

impl QuoteDocument {
    /// 展示摘要 (金额按币种取整,原值保留在 result 中)
    pub fn summary(&self) -> QuoteSummary {
        let result = &self.result;
        QuoteSummary {
            quote_id: self.quote_id,
            trade_term: result.trade_term,
            chosen_mode: result.chosen_mode,
            reference_currency: result.currency.reference_currency.clone(),
            seller_total: round_for_display(result.allocation.seller_total),
            unit_cost: round_for_display(result.unit_economics.unit_cost),
            unit_sell_price: round_for_display(result.unit_economics.unit_sell_price),
            unit_sell_price_usd: round_usd_for_display(result.unit_economics.unit_sell_price_usd),
            retail_price: round_for_display(result.buyer_pricing.retail_price),
            retail_price_usd: round_usd_for_display(result.buyer_pricing.retail_price_usd),
        }
    }
}

/// 报价摘要 (展示用)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub quote_id: Uuid,
    pub trade_term: TradeTerm,
    pub chosen_mode: ShippingMode,
    pub reference_currency: String,
    pub seller_total: f64,
    pub unit_cost: f64,
    pub unit_sell_price: f64,
    pub unit_sell_price_usd: f64,
    pub retail_price: f64,
    pub retail_price_usd: f64,
}

// ==========================================
// QuoteApi - 报价 API
// ==========================================
pub struct QuoteApi {
    engine: QuoteEngine,
    catalog: Catalog,
    rates: Arc<dyn RateProvider>,
}

impl QuoteApi {
    /// 由配置管理器创建
    pub fn new(config_manager: ConfigManager, rates: Arc<dyn RateProvider>) -> Self {
        let (engine_config, catalog) = config_manager.into_parts();
        Self {
            engine: QuoteEngine::new(engine_config),
            catalog,
            rates,
        }
    }

    /// 内置默认配置,无在线汇率
    pub fn with_defaults() -> Self {
        Self::new(ConfigManager::with_defaults(), Arc::new(UnavailableRateProvider))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// 解析 USD 汇率
    pub fn resolve_usd_rate(&self, requested: Option<f64>) -> ApiResult<f64> {
        match requested {
            Some(rate) => Ok(rate),
            None => Ok(resolve_rate(
                self.rates.as_ref(),
                "USD",
                self.engine.config().fallback_usd_rate,
            )?),
        }
    }

    /// 生成报价单
    ///
    /// # 错误
    /// - UnknownProduct / UnknownDestination: 目录中不存在
    /// - Engine: 引擎校验或求解失败
    #[instrument(skip(self, request), fields(product_id = %request.product_id, destination_id = %request.destination_id))]
    pub fn quote(&self, request: &QuoteRequest) -> ApiResult<QuoteDocument> {
        let product = self
            .catalog
            .product(&request.product_id)
            .ok_or_else(|| ApiError::UnknownProduct(request.product_id.clone()))?;
        let destination = self
            .catalog
            .destination(&request.destination_id)
            .ok_or_else(|| ApiError::UnknownDestination(request.destination_id.clone()))?;

        let input = QuoteInput {
            quantity: request.quantity,
            packing_mode: request.packing_mode,
            trade_term: request.trade_term,
            market_condition: request.market_condition,
            usd_rate: self.resolve_usd_rate(request.usd_rate)?,
            volume_reduction_factor: request.volume_reduction_factor,
            shipping_preference: request.shipping_preference,
            target_margin_rate: request.target_margin_rate,
            buyer_target_price: request.buyer_target_price,
            buyer_margin_rate: request.buyer_margin_rate,
        };

        let result = self.engine.quote(product, destination, &input)?;

        let document = QuoteDocument {
            quote_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            product_id: product.product_id.clone(),
            destination_id: destination.destination_id.clone(),
            result,
        };
        tracing::info!(quote_id = %document.quote_id, "报价单已生成");
        Ok(document)
    }

    /// 目标售价下可承受的单件成本
    pub fn max_unit_cost(&self, target_price: f64, target_margin_rate: Option<f64>) -> ApiResult<f64> {
        let margin = target_margin_rate.unwrap_or(self.engine.config().default_target_margin_rate);
        Ok(max_unit_cost_for_target_price(target_price, margin)?)
    }

    /// 从产品表导入并合并到目录,返回导入数量
    pub fn import_products(&mut self, file_path: &Path) -> ApiResult<usize> {
        let imported = CatalogImporter::new().import_catalog(file_path)?;
        let count = imported.products.len();
        self.catalog.merge(imported);
        Ok(count)
    }
}
