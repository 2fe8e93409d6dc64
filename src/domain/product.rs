// ==========================================
// 出口物流报价系统 - 产品与目的地主数据
// ==========================================
// 职责: 目录加载时创建,运行期间只读共享
// ==========================================

use serde::{Deserialize, Serialize};

/// 外箱尺寸 (cm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// 体积 (cm³)
    pub fn volume_cm3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm
    }

    /// 三轴等比缩放
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            length_cm: self.length_cm * factor,
            width_cm: self.width_cm * factor,
            height_cm: self.height_cm * factor,
        }
    }

    pub fn is_positive(&self) -> bool {
        [self.length_cm, self.width_cm, self.height_cm]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

// ==========================================
// ProductSpec - 产品规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// 产品ID (目录键)
    pub product_id: String,

    /// 显示名称
    pub name: String,

    /// 单件制造成本 (基准货币)
    pub unit_cost: f64,

    /// 单件毛重 (kg)
    pub unit_weight_kg: f64,

    /// 单件外箱尺寸
    pub dimensions: Dimensions,

    /// HS 编码
    #[serde(default)]
    pub hs_code: Option<String>,

    /// 国内零售价 (仅展示用)
    #[serde(default)]
    pub retail_price: Option<f64>,
}

// ==========================================
// Destination - 目的地
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub destination_id: String,

    pub name: String,

    /// 进口关税率 (0.08 = 8%)
    #[serde(default)]
    pub duty_rate: f64,

    /// 消费税/增值税率
    #[serde(default)]
    pub consumption_tax_rate: f64,

    /// 目的港码头操作费 (每票固定)
    #[serde(default)]
    pub local_handling_cost: f64,

    /// 目的地内陆配送费 (每票固定)
    #[serde(default)]
    pub inland_delivery_cost: f64,

    /// 当地币种 (如 JPY / HKD)
    #[serde(default)]
    pub currency: Option<String>,
}
