// ==========================================
// 出口物流报价系统 - 货量规格计算引擎
// ==========================================
// 职责: (尺寸, 单重, 数量, 包装方式) → 体积/重量指标
//       含空运计费重与整箱推荐
// 输入: ProductSpec + 已校验数量
// 输出: ShipmentSpec
// ==========================================
// 红线: 模块化包装对体积乘 f, 对每条边乘 f^(1/3),
//       体积与体积重始终一致
// 红线: LCL 最低计费在整票层面生效,不在单件层面
// ==========================================

use crate::config::engine_config::{ContainerSpec, EngineConfig};
use crate::domain::product::ProductSpec;
use crate::domain::shipment::{FclRecommendation, ShipmentSpec};
use crate::domain::types::PackingMode;
use serde_json::json;
use tracing::instrument;

const CM3_PER_CBM: f64 = 1_000_000.0;

// ==========================================
// ShipmentSpecCalculator - 货量规格计算引擎
// ==========================================
pub struct ShipmentSpecCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> ShipmentSpecCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// 计算货量规格
    ///
    /// # 参数
    /// - product: 产品规格 (已校验)
    /// - quantity: 数量 (已校验, > 0)
    /// - packing_mode: 包装方式
    /// - volume_reduction_factor: 模块化缩减系数 (0, 1], Assembled 时忽略
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    pub fn compute(
        &self,
        product: &ProductSpec,
        quantity: u32,
        packing_mode: PackingMode,
        volume_reduction_factor: f64,
    ) -> ShipmentSpec {
        let qty = f64::from(quantity);

        // 1. 生效系数
        let effective_factor = match packing_mode {
            PackingMode::Modular => volume_reduction_factor,
            PackingMode::Assembled => 1.0,
        };

        // 2. 体积
        let unit_cbm = product.dimensions.volume_cm3() / CM3_PER_CBM * effective_factor;
        let total_cbm = unit_cbm * qty;

        // 3. 计费体积 (整票最低计费)
        let billing_cbm = total_cbm.max(self.config.lcl_min_billing_cbm);

        // 4. 毛重
        let total_gross_weight_kg = product.unit_weight_kg * qty;

        // 5. 逐轴缩放尺寸
        let dim_factor = match packing_mode {
            PackingMode::Modular => effective_factor.cbrt(),
            PackingMode::Assembled => 1.0,
        };
        let adjusted_dimensions = product.dimensions.scaled(dim_factor);

        // 6. 空运计费重
        let volumetric_weight_per_unit =
            adjusted_dimensions.volume_cm3() / self.config.volumetric_divisor;
        let volumetric_weight_kg = volumetric_weight_per_unit * qty;
        let air_chargeable_weight_kg = total_gross_weight_kg.max(volumetric_weight_kg);

        // 7. 整箱推荐
        let fcl = self.recommend_fcl(total_cbm, total_gross_weight_kg);

        tracing::debug!(
            total_cbm,
            billing_cbm,
            total_gross_weight_kg,
            air_chargeable_weight_kg,
            recommend_fcl = fcl.as_ref().map(|f| f.recommend_fcl),
            "货量规格计算完成"
        );

        ShipmentSpec {
            quantity,
            packing_mode,
            effective_factor,
            unit_cbm,
            total_cbm,
            billing_cbm,
            total_gross_weight_kg,
            adjusted_dimensions,
            volumetric_weight_kg,
            air_chargeable_weight_kg,
            fcl,
        }
    }

    // ==========================================
    // 整箱判定
    // ==========================================

    /// 整箱推荐
    ///
    /// 规则:
    /// 1) 箱型按容量升序,取第一个体积与载重均满足的箱型,1 箱
    /// 2) 单箱都装不下 → 最大箱型,箱数 = ceil(体积/容量) 与 ceil(重量/载重) 取大
    /// 3) total_cbm >= 阈值 → 推荐整箱; 否则给出实际值与阈值
    ///
    /// 箱型表为空时返回 None
    pub fn recommend_fcl(&self, total_cbm: f64, total_weight_kg: f64) -> Option<FclRecommendation> {
        let containers = self.config.containers_ascending();
        let largest: &ContainerSpec = containers.last()?;

        let (container, container_count, fit) = match containers
            .iter()
            .find(|c| c.fits(total_cbm, total_weight_kg))
        {
            Some(container) => (*container, 1, "SINGLE_CONTAINER"),
            None => (
                largest,
                largest.required_count(total_cbm, total_weight_kg),
                "MULTI_CONTAINER",
            ),
        };

        let threshold_cbm = self.config.fcl_threshold_cbm;
        let recommend_fcl = total_cbm >= threshold_cbm;
        let primary_reason = if recommend_fcl {
            "FCL_THRESHOLD_MET"
        } else {
            "BELOW_FCL_THRESHOLD"
        };

        let rationale = json!({
            "recommend_fcl": recommend_fcl,
            "primary_reason": primary_reason,
            "details": {
                "total_cbm": total_cbm,
                "threshold_cbm": threshold_cbm,
                "total_weight_kg": total_weight_kg,
                "container_type": container.container_type.to_string(),
                "container_count": container_count,
                "fit": fit,
            }
        });

        Some(FclRecommendation {
            container_type: container.container_type,
            container_count,
            recommend_fcl,
            threshold_cbm,
            rationale: rationale.to_string(),
        })
    }
}
