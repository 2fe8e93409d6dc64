// ==========================================
// 出口物流报价系统 - 货量规格
// ==========================================
// 生命周期: 每个 (产品, 数量, 包装) 组合计算一次,之后不可变
// ==========================================

use crate::domain::product::Dimensions;
use crate::domain::types::{ContainerType, PackingMode};
use serde::{Deserialize, Serialize};

/// 整箱方案
///
/// 无论是否推荐整箱,都会给出最小可装箱型与箱量,供运费比价使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FclRecommendation {
    pub container_type: ContainerType,
    pub container_count: u32,
    /// total_cbm >= 阈值时为 true
    pub recommend_fcl: bool,
    pub threshold_cbm: f64,
    /// 判定原因 (JSON)
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSpec {
    pub quantity: u32,
    pub packing_mode: PackingMode,

    /// 实际生效的体积缩减系数 (Assembled 恒为 1.0)
    pub effective_factor: f64,

    pub unit_cbm: f64,
    pub total_cbm: f64,

    /// 计费体积 (>= LCL 最低计费)
    pub billing_cbm: f64,

    pub total_gross_weight_kg: f64,

    /// 按 f^(1/3) 缩放后的单件尺寸
    pub adjusted_dimensions: Dimensions,

    pub volumetric_weight_kg: f64,

    /// 空运计费重 = max(毛重, 体积重)
    pub air_chargeable_weight_kg: f64,

    /// 箱型表为空时为 None
    pub fcl: Option<FclRecommendation>,
}

impl ShipmentSpec {
    pub fn recommends_fcl(&self) -> bool {
        self.fcl.as_ref().map_or(false, |fcl| fcl.recommend_fcl)
    }
}
