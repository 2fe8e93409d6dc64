// ==========================================
// 出口物流报价系统 - 输入校验器
// ==========================================
// 职责: 在任何费用计算之前拒绝不可能的出货请求
// 红线: 无副作用; 不替换越界的用户输入
// ==========================================
// 下游引擎假定输入已通过校验
// ==========================================

use crate::domain::product::ProductSpec;
use crate::engine::error::{EngineError, EngineResult};

pub struct InputValidator {
    quantity_ceiling: u32,
}

impl InputValidator {
    pub fn new(quantity_ceiling: u32) -> Self {
        Self { quantity_ceiling }
    }

    /// 校验数量与产品规格
    ///
    /// # 返回
    /// - Ok(u32): 通过校验的数量
    /// - Err(InvalidQuantity): quantity <= 0
    /// - Err(QuantityTooLarge): quantity > 上限
    /// - Err(InvalidProductSpec): 重量/尺寸非正,或成本为负
    pub fn validate(&self, quantity: i64, product: &ProductSpec) -> EngineResult<u32> {
        if quantity <= 0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }
        if quantity > i64::from(self.quantity_ceiling) {
            return Err(EngineError::QuantityTooLarge {
                quantity,
                ceiling: self.quantity_ceiling,
            });
        }

        Self::validate_product(product)?;

        Ok(quantity as u32)
    }

    /// 产品规格校验 (目录加载时也可单独调用)
    pub fn validate_product(product: &ProductSpec) -> EngineResult<()> {
        let invalid = |reason: String| EngineError::InvalidProductSpec {
            product_id: product.product_id.clone(),
            reason,
        };

        if !(product.unit_weight_kg.is_finite() && product.unit_weight_kg > 0.0) {
            return Err(invalid(format!(
                "unit_weight_kg={} 必须为正",
                product.unit_weight_kg
            )));
        }
        if !product.dimensions.is_positive() {
            return Err(invalid(format!(
                "dimensions={}x{}x{} 必须为正",
                product.dimensions.length_cm,
                product.dimensions.width_cm,
                product.dimensions.height_cm
            )));
        }
        if !(product.unit_cost.is_finite() && product.unit_cost >= 0.0) {
            return Err(invalid(format!("unit_cost={} 不能为负", product.unit_cost)));
        }

        Ok(())
    }

    /// 市场系数: 缺省取配置默认值,显式给出时必须为正
    pub fn resolve_market_condition(value: Option<f64>, default: f64) -> EngineResult<f64> {
        let market = value.unwrap_or(default);
        if market.is_finite() && market > 0.0 {
            Ok(market)
        } else {
            Err(EngineError::InvalidMarketCondition(market))
        }
    }

    /// 体积缩减系数: 缺省取配置默认值,必须在 (0, 1]
    pub fn resolve_volume_reduction_factor(value: Option<f64>, default: f64) -> EngineResult<f64> {
        let factor = value.unwrap_or(default);
        if factor > 0.0 && factor <= 1.0 {
            Ok(factor)
        } else {
            Err(EngineError::InvalidVolumeReductionFactor(factor))
        }
    }

    /// 买方目标价: 可缺省,给出时必须为有限正数
    pub fn validate_target_price(value: Option<f64>) -> EngineResult<Option<f64>> {
        match value {
            Some(price) if !(price.is_finite() && price > 0.0) => {
                Err(EngineError::InvalidTargetPrice(price))
            }
            other => Ok(other),
        }
    }

    /// 汇率必须为有限正数
    pub fn validate_exchange_rate(currency: &str, rate: f64) -> EngineResult<f64> {
        if rate.is_finite() && rate > 0.0 {
            Ok(rate)
        } else {
            Err(EngineError::InvalidExchangeRate {
                currency: currency.to_string(),
                rate,
            })
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Dimensions;

    fn shelf() -> ProductSpec {
        ProductSpec {
            product_id: "SHELF".to_string(),
            name: "Shelf".to_string(),
            unit_cost: 60_000.0,
            unit_weight_kg: 6.0,
            dimensions: Dimensions::new(30.0, 30.0, 30.0),
            hs_code: None,
            retail_price: None,
        }
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let validator = InputValidator::default();
        for quantity in [0, -1, -500, i64::MIN] {
            assert_eq!(
                validator.validate(quantity, &shelf()),
                Err(EngineError::InvalidQuantity(quantity))
            );
        }
    }

    #[test]
    fn test_quantity_ceiling() {
        let validator = InputValidator::default();
        assert_eq!(validator.validate(10_000, &shelf()), Ok(10_000));
        assert!(matches!(
            validator.validate(10_001, &shelf()),
            Err(EngineError::QuantityTooLarge { quantity: 10_001, ceiling: 10_000 })
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut product = shelf();
        product.unit_weight_kg = 0.0;
        let err = InputValidator::default().validate(10, &product).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProductSpec { .. }));
    }

    #[test]
    fn test_zero_volume_rejected() {
        let mut product = shelf();
        product.dimensions.height_cm = 0.0;
        assert!(InputValidator::default().validate(10, &product).is_err());
    }

    #[test]
    fn test_quantity_checked_before_product() {
        let mut product = shelf();
        product.unit_weight_kg = -1.0;
        assert_eq!(
            InputValidator::default().validate(0, &product),
            Err(EngineError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_optional_parameters_use_documented_defaults() {
        assert_eq!(InputValidator::resolve_market_condition(None, 1.0), Ok(1.0));
        assert_eq!(InputValidator::resolve_market_condition(Some(1.3), 1.0), Ok(1.3));
        assert!(InputValidator::resolve_market_condition(Some(0.0), 1.0).is_err());
        assert_eq!(InputValidator::resolve_volume_reduction_factor(None, 0.7), Ok(0.7));
        assert_eq!(InputValidator::resolve_volume_reduction_factor(Some(1.0), 0.7), Ok(1.0));
        assert!(InputValidator::resolve_volume_reduction_factor(Some(0.0), 0.7).is_err());
        assert!(InputValidator::resolve_volume_reduction_factor(Some(f64::NAN), 0.7).is_err());
    }

    #[test]
    fn test_target_price_optional_but_positive() {
        assert_eq!(InputValidator::validate_target_price(None), Ok(None));
        assert_eq!(InputValidator::validate_target_price(Some(1_200.0)), Ok(Some(1_200.0)));
        assert_eq!(
            InputValidator::validate_target_price(Some(0.0)),
            Err(EngineError::InvalidTargetPrice(0.0))
        );
        assert_eq!(
            InputValidator::validate_target_price(Some(-5_000.0)),
            Err(EngineError::InvalidTargetPrice(-5_000.0))
        );
        assert!(InputValidator::validate_target_price(Some(f64::NAN)).is_err());
    }
}
