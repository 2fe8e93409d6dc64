// ==========================================
// 出口物流报价系统 - 运输方式费用引擎
// ==========================================
// 职责: 对 LCL / 各箱型 FCL / AIR 报价并选出最便宜海运方案
// 输入: ShipmentSpec + 市场系数
// 输出: ModeCostComparison
// ==========================================
// 费用构成: 运费 + 码头/仓储 + 内陆拖车 + 单证 (+ 空运附加费)
// 红线: 即使已推荐某一箱型,也对所有箱型报价以便比较
// ==========================================

use crate::config::engine_config::{ContainerSpec, EngineConfig};
use crate::domain::cost::{ModeCostBreakdown, ModeCostComparison};
use crate::domain::shipment::ShipmentSpec;
use crate::domain::types::ShippingMode;
use tracing::instrument;

// ==========================================
// ModeCostCalculator - 运输方式费用引擎
// ==========================================
pub struct ModeCostCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> ModeCostCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// 三种方式比价
    ///
    /// 最便宜海运方案: LCL 与全部 FCL 中总价最低者;
    /// 平价时取先出现者 (LCL 优先,其次箱型升序)
    #[instrument(skip(self, spec), fields(total_cbm = spec.total_cbm, quantity = spec.quantity))]
    pub fn compute(&self, spec: &ShipmentSpec, market_condition: f64) -> ModeCostComparison {
        let lcl = self.lcl_cost(spec, market_condition);
        let fcl: Vec<ModeCostBreakdown> = self
            .config
            .containers_ascending()
            .into_iter()
            .map(|container| self.fcl_cost(spec, container, market_condition))
            .collect();
        let air = self.air_cost(spec, market_condition);

        let mut best = &lcl;
        for candidate in &fcl {
            if candidate.total < best.total {
                best = candidate;
            }
        }
        let best_ocean_mode = best.mode;

        tracing::debug!(
            lcl_total = lcl.total,
            air_total = air.total,
            best_ocean = %best_ocean_mode,
            "运输方式比价完成"
        );

        ModeCostComparison {
            lcl,
            fcl,
            air,
            best_ocean_mode,
        }
    }

    // ==========================================
    // 单一方式报价
    // ==========================================

    /// LCL: 运费 = 每 CBM 费率 × 市场系数 × 计费体积
    pub fn lcl_cost(&self, spec: &ShipmentSpec, market_condition: f64) -> ModeCostBreakdown {
        let rates = &self.config.lcl;
        ModeCostBreakdown::new(
            ShippingMode::Lcl,
            None,
            rates.freight_per_cbm * market_condition * spec.billing_cbm,
            rates.terminal_per_cbm * spec.billing_cbm,
            self.config.trucking_rate(spec.total_gross_weight_kg),
            self.config.documentation_fee,
            0.0,
        )
    }

    /// FCL: 运费 = 每箱基础运费 × 市场系数 × 箱数
    ///
    /// 箱数按该箱型自身容量计算; 码头操作费与整箱拖车费按箱计
    pub fn fcl_cost(
        &self,
        spec: &ShipmentSpec,
        container: &ContainerSpec,
        market_condition: f64,
    ) -> ModeCostBreakdown {
        let count = container.required_count(spec.total_cbm, spec.total_gross_weight_kg);
        let boxes = f64::from(count);
        ModeCostBreakdown::new(
            ShippingMode::Fcl(container.container_type),
            Some(count),
            container.base_rate * market_condition * boxes,
            container.terminal_handling * boxes,
            self.config.fcl_trailer_per_container * boxes,
            self.config.documentation_fee,
            0.0,
        )
    }

    /// AIR: 运费 = 每 kg 费率 × 市场系数 × 计费重, 另加固定操作附加费
    pub fn air_cost(&self, spec: &ShipmentSpec, market_condition: f64) -> ModeCostBreakdown {
        let rates = &self.config.air;
        let chargeable = spec.air_chargeable_weight_kg;
        ModeCostBreakdown::new(
            ShippingMode::Air,
            None,
            rates.freight_per_kg * market_condition * chargeable,
            rates.warehouse_per_kg * chargeable,
            self.config.trucking_rate(spec.total_gross_weight_kg),
            self.config.documentation_fee,
            rates.handling_surcharge,
        )
    }
}
