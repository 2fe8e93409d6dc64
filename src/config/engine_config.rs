// ==========================================
// 出口物流报价系统 - 引擎参数配置
// ==========================================
// 职责: 费率表、阈值、箱型表、关税基数策略
// 红线: 引擎内不硬编码任何费率,一律从 EngineConfig 读取
// ==========================================
// 所有字段均有默认值,配置文件只需覆写关心的键
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{ContainerType, PackingMode};
use serde::{Deserialize, Serialize};

/// 配置键名 (用于错误信息定位)
pub mod config_keys {
    pub const QUANTITY_CEILING: &str = "quantity_ceiling";
    pub const VOLUME_REDUCTION_FACTOR: &str = "default_volume_reduction_factor";
    pub const MARKET_CONDITION: &str = "default_market_condition";
    pub const VOLUMETRIC_DIVISOR: &str = "volumetric_divisor";
    pub const LCL_MIN_BILLING_CBM: &str = "lcl_min_billing_cbm";
    pub const FCL_THRESHOLD_CBM: &str = "fcl_threshold_cbm";
    pub const CONTAINERS: &str = "containers";
    pub const TRUCKING_BANDS: &str = "trucking_bands";
    pub const INSURANCE_RATE: &str = "insurance_rate";
    pub const TARGET_MARGIN_RATE: &str = "default_target_margin_rate";
    pub const BUYER_MARGIN_RATE: &str = "default_buyer_margin_rate";
    pub const LOGISTICS_RATIO_THRESHOLD: &str = "logistics_ratio_threshold";
    pub const FALLBACK_USD_RATE: &str = "fallback_usd_rate";
    pub const RATES: &str = "rates";
}

// ==========================================
// 箱型规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub container_type: ContainerType,
    /// 最大装载体积 (CBM)
    pub max_cbm: f64,
    /// 最大载重 (kg)
    pub max_payload_kg: f64,
    /// 每箱基础海运费
    pub base_rate: f64,
    /// 每箱码头操作费 (THC)
    pub terminal_handling: f64,
}

impl ContainerSpec {
    pub fn fits(&self, cbm: f64, weight_kg: f64) -> bool {
        cbm <= self.max_cbm && weight_kg <= self.max_payload_kg
    }

    /// 装下指定货量所需箱数 (体积、重量取大)
    pub fn required_count(&self, cbm: f64, weight_kg: f64) -> u32 {
        let by_volume = (cbm / self.max_cbm).ceil();
        let by_weight = (weight_kg / self.max_payload_kg).ceil();
        by_volume.max(by_weight).max(1.0) as u32
    }
}

// ==========================================
// 内陆拖车重量分段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckingBand {
    /// 分段上限 (含); None 表示不封顶
    #[serde(default)]
    pub max_weight_kg: Option<f64>,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LclRates {
    pub freight_per_cbm: f64,
    /// CFS / 码头操作费 (按计费体积)
    pub terminal_per_cbm: f64,
}

impl Default for LclRates {
    fn default() -> Self {
        Self {
            freight_per_cbm: 65_000.0,
            terminal_per_cbm: 15_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirRates {
    pub freight_per_kg: f64,
    /// 每票固定操作附加费
    pub handling_surcharge: f64,
    /// 仓储费 (按计费重)
    pub warehouse_per_kg: f64,
}

impl Default for AirRates {
    fn default() -> Self {
        Self {
            freight_per_kg: 4_500.0,
            handling_surcharge: 300_000.0,
            warehouse_per_kg: 200.0,
        }
    }
}

/// 包装费 (每件)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingCost {
    pub modular_per_unit: f64,
    pub assembled_per_unit: f64,
}

impl PackingCost {
    pub fn per_unit(&self, mode: PackingMode) -> f64 {
        match mode {
            PackingMode::Modular => self.modular_per_unit,
            PackingMode::Assembled => self.assembled_per_unit,
        }
    }
}

impl Default for PackingCost {
    fn default() -> Self {
        Self {
            modular_per_unit: 2_000.0,
            assembled_per_unit: 3_500.0,
        }
    }
}

// ==========================================
// 关税基数策略
// ==========================================
// 两种口径并存,作为配置策略而非写死
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyBasis {
    /// (产品成本 + 运费)
    #[default]
    ProductPlusFreight,
    /// (产品成本 × (1 + 目标毛利率) + 运费)
    ProductMarginFreight,
}

// ==========================================
// EngineConfig - 引擎参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 基准货币
    pub reference_currency: String,

    /// 单票最大数量
    pub quantity_ceiling: u32,

    /// 模块化包装的默认体积缩减系数 (0, 1]
    pub default_volume_reduction_factor: f64,

    /// 默认运价市场系数
    pub default_market_condition: f64,

    /// 空运体积重除数 (cm³/kg)
    pub volumetric_divisor: f64,

    /// LCL 最低计费体积
    pub lcl_min_billing_cbm: f64,

    /// 推荐整箱的体积阈值
    pub fcl_threshold_cbm: f64,

    /// 箱型表 (任意顺序,使用时按容量升序)
    pub containers: Vec<ContainerSpec>,

    pub lcl: LclRates,
    pub air: AirRates,

    /// 整箱拖车费 (每箱)
    pub fcl_trailer_per_container: f64,

    /// 单证费 (每票)
    pub documentation_fee: f64,

    /// 散货 / 空运内陆拖车分段 (按上限升序)
    pub trucking_bands: Vec<TruckingBand>,

    /// 保险费率 (按所选运输方式总费用)
    pub insurance_rate: f64,

    pub duty_basis: DutyBasis,

    pub packing_cost: PackingCost,

    pub default_target_margin_rate: f64,
    pub default_buyer_margin_rate: f64,

    /// 物流费用占比预警阈值
    pub logistics_ratio_threshold: f64,

    /// 汇率服务不可用时的美元汇率
    pub fallback_usd_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_currency: "KRW".to_string(),
            quantity_ceiling: 10_000,
            default_volume_reduction_factor: 0.7,
            default_market_condition: 1.0,
            volumetric_divisor: 6_000.0,
            lcl_min_billing_cbm: 1.0,
            fcl_threshold_cbm: 15.0,
            containers: vec![
                ContainerSpec {
                    container_type: ContainerType::Ft20,
                    max_cbm: 28.0,
                    max_payload_kg: 21_000.0,
                    base_rate: 1_200_000.0,
                    terminal_handling: 180_000.0,
                },
                ContainerSpec {
                    container_type: ContainerType::Ft40,
                    max_cbm: 58.0,
                    max_payload_kg: 26_000.0,
                    base_rate: 1_900_000.0,
                    terminal_handling: 250_000.0,
                },
                ContainerSpec {
                    container_type: ContainerType::Ft40HighCube,
                    max_cbm: 68.0,
                    max_payload_kg: 26_000.0,
                    base_rate: 2_000_000.0,
                    terminal_handling: 250_000.0,
                },
            ],
            lcl: LclRates::default(),
            air: AirRates::default(),
            fcl_trailer_per_container: 450_000.0,
            documentation_fee: 50_000.0,
            trucking_bands: vec![
                TruckingBand { max_weight_kg: Some(500.0), rate: 80_000.0 },
                TruckingBand { max_weight_kg: Some(1_000.0), rate: 120_000.0 },
                TruckingBand { max_weight_kg: Some(3_000.0), rate: 200_000.0 },
                TruckingBand { max_weight_kg: Some(5_000.0), rate: 280_000.0 },
                TruckingBand { max_weight_kg: None, rate: 400_000.0 },
            ],
            insurance_rate: 0.002,
            duty_basis: DutyBasis::ProductPlusFreight,
            packing_cost: PackingCost::default(),
            default_target_margin_rate: 0.25,
            default_buyer_margin_rate: 0.5,
            logistics_ratio_threshold: 0.2,
            fallback_usd_rate: 1_460.0,
        }
    }
}

impl EngineConfig {
    /// 按容量升序的箱型表
    pub fn containers_ascending(&self) -> Vec<&ContainerSpec> {
        let mut containers: Vec<&ContainerSpec> = self.containers.iter().collect();
        containers.sort_by(|a, b| {
            a.max_cbm
                .total_cmp(&b.max_cbm)
                .then(a.container_type.cmp(&b.container_type))
        });
        containers
    }

    /// 内陆拖车费 (阶梯)
    ///
    /// 命中第一个上限 >= 毛重的分段; 超出所有封顶分段时取最后一段
    pub fn trucking_rate(&self, gross_weight_kg: f64) -> f64 {
        self.trucking_bands
            .iter()
            .find(|band| match band.max_weight_kg {
                Some(max) => gross_weight_kg <= max,
                None => true,
            })
            .or_else(|| self.trucking_bands.last())
            .map(|band| band.rate)
            .unwrap_or(0.0)
    }

    /// 校验配置的物理合理性
    pub fn validate(&self) -> ConfigResult<()> {
        use config_keys::*;

        if self.quantity_ceiling == 0 {
            return Err(ConfigError::invalid(QUANTITY_CEILING, "必须大于 0"));
        }

        let factor = self.default_volume_reduction_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::invalid(
                VOLUME_REDUCTION_FACTOR,
                format!("必须在 (0, 1] 区间, 实际 {}", factor),
            ));
        }

        positive(MARKET_CONDITION, self.default_market_condition)?;
        positive(VOLUMETRIC_DIVISOR, self.volumetric_divisor)?;
        non_negative(LCL_MIN_BILLING_CBM, self.lcl_min_billing_cbm)?;
        non_negative(FCL_THRESHOLD_CBM, self.fcl_threshold_cbm)?;
        non_negative(INSURANCE_RATE, self.insurance_rate)?;
        positive(FALLBACK_USD_RATE, self.fallback_usd_rate)?;
        non_negative(LOGISTICS_RATIO_THRESHOLD, self.logistics_ratio_threshold)?;

        for (key, rate) in [
            (TARGET_MARGIN_RATE, self.default_target_margin_rate),
            (BUYER_MARGIN_RATE, self.default_buyer_margin_rate),
        ] {
            if !rate.is_finite() || rate >= 1.0 {
                return Err(ConfigError::invalid(key, format!("必须小于 1, 实际 {}", rate)));
            }
        }

        if self.containers.is_empty() {
            return Err(ConfigError::invalid(CONTAINERS, "箱型表不能为空"));
        }
        for container in &self.containers {
            if !(container.max_cbm > 0.0 && container.max_payload_kg > 0.0) {
                return Err(ConfigError::invalid(
                    CONTAINERS,
                    format!("{} 容量必须为正", container.container_type),
                ));
            }
            non_negative(CONTAINERS, container.base_rate)?;
            non_negative(CONTAINERS, container.terminal_handling)?;
        }

        if self.trucking_bands.is_empty() {
            return Err(ConfigError::invalid(TRUCKING_BANDS, "拖车分段不能为空"));
        }
        let mut last_max = f64::NEG_INFINITY;
        for band in &self.trucking_bands {
            non_negative(TRUCKING_BANDS, band.rate)?;
            if let Some(max) = band.max_weight_kg {
                if max <= last_max {
                    return Err(ConfigError::invalid(TRUCKING_BANDS, "分段上限必须严格升序"));
                }
                last_max = max;
            }
        }

        for value in [
            self.lcl.freight_per_cbm,
            self.lcl.terminal_per_cbm,
            self.air.freight_per_kg,
            self.air.handling_surcharge,
            self.air.warehouse_per_kg,
            self.fcl_trailer_per_container,
            self.documentation_fee,
            self.packing_cost.modular_per_unit,
            self.packing_cost.assembled_per_unit,
        ] {
            non_negative(RATES, value)?;
        }

        Ok(())
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("必须为正数, 实际 {}", value)))
    }
}

pub(crate) fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("不能为负数, 实际 {}", value)))
    }
}
