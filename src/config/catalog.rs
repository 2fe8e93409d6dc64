// ==========================================
// 出口物流报价系统 - 产品与目的地目录
// ==========================================
// 职责: 目录加载时构建,之后只读共享
// ==========================================

use crate::config::engine_config::non_negative;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::product::{Destination, Dimensions, ProductSpec};
use crate::engine::validator::InputValidator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: BTreeMap<String, ProductSpec>,
    #[serde(default)]
    pub destinations: BTreeMap<String, Destination>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置样例目录 (两款家具 + 两个目的地)
    pub fn sample() -> Self {
        let mut catalog = Self::new();

        catalog.insert_product(ProductSpec {
            product_id: "module_shelf_9in1".to_string(),
            name: "9in1 Module Shelf".to_string(),
            unit_cost: 60_000.0,
            unit_weight_kg: 6.0,
            dimensions: Dimensions::new(30.0, 30.0, 30.0),
            hs_code: Some("9403.70".to_string()),
            retail_price: Some(199_000.0),
        });
        catalog.insert_product(ProductSpec {
            product_id: "berlin_table".to_string(),
            name: "Berlin Table".to_string(),
            unit_cost: 135_000.0,
            unit_weight_kg: 19.0,
            dimensions: Dimensions::new(50.0, 50.0, 50.0),
            hs_code: Some("9403.60".to_string()),
            retail_price: Some(450_000.0),
        });

        // 家具 (9403) 两地进口关税均为 0
        catalog.insert_destination(Destination {
            destination_id: "japan".to_string(),
            name: "Japan".to_string(),
            duty_rate: 0.0,
            consumption_tax_rate: 0.10,
            local_handling_cost: 120_000.0,
            inland_delivery_cost: 180_000.0,
            currency: Some("JPY".to_string()),
        });
        catalog.insert_destination(Destination {
            destination_id: "hong_kong".to_string(),
            name: "Hong Kong".to_string(),
            duty_rate: 0.0,
            consumption_tax_rate: 0.0,
            local_handling_cost: 100_000.0,
            inland_delivery_cost: 150_000.0,
            currency: Some("HKD".to_string()),
        });

        catalog
    }

    pub fn product(&self, product_id: &str) -> Option<&ProductSpec> {
        self.products.get(product_id.trim())
    }

    pub fn destination(&self, destination_id: &str) -> Option<&Destination> {
        self.destinations.get(destination_id.trim())
    }

    /// 插入产品,返回被覆盖的旧记录
    pub fn insert_product(&mut self, product: ProductSpec) -> Option<ProductSpec> {
        self.products.insert(product.product_id.clone(), product)
    }

    pub fn insert_destination(&mut self, destination: Destination) -> Option<Destination> {
        self.destinations
            .insert(destination.destination_id.clone(), destination)
    }

    /// 合并另一目录 (同 ID 以 other 为准)
    pub fn merge(&mut self, other: Catalog) {
        self.products.extend(other.products);
        self.destinations.extend(other.destinations);
    }

    /// 校验目录数据
    ///
    /// - 产品: 与报价前的规格校验一致
    /// - 目的地: 税率与固定费用为有限非负数
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, product) in &self.products {
            InputValidator::validate_product(product)
                .map_err(|e| ConfigError::invalid(&format!("catalog.products.{}", key), e.to_string()))?;
        }

        for (key, destination) in &self.destinations {
            let field = |name: &str| format!("catalog.destinations.{}.{}", key, name);
            non_negative(&field("duty_rate"), destination.duty_rate)?;
            non_negative(&field("consumption_tax_rate"), destination.consumption_tax_rate)?;
            non_negative(&field("local_handling_cost"), destination.local_handling_cost)?;
            non_negative(&field("inland_delivery_cost"), destination.inland_delivery_cost)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_lookup() {
        let catalog = Catalog::sample();
        let shelf = catalog.product("module_shelf_9in1").unwrap();
        assert_eq!(shelf.unit_cost, 60_000.0);
        assert!((shelf.dimensions.volume_cm3() / 1_000_000.0 - 0.027).abs() < 1e-12);
        assert!(catalog.product(" berlin_table ").is_some());
        assert!(catalog.destination("japan").is_some());
        assert!(catalog.destination("germany").is_none());
    }

    #[test]
    fn test_merge_overrides_same_id() {
        let mut base = Catalog::sample();
        let mut patch = Catalog::new();
        let mut table = base.product("berlin_table").unwrap().clone();
        table.unit_cost = 140_000.0;
        patch.insert_product(table);

        base.merge(patch);
        assert_eq!(base.product("berlin_table").unwrap().unit_cost, 140_000.0);
        assert_eq!(base.products.len(), 2);
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        assert!(Catalog::sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_destination_values() {
        let mut catalog = Catalog::sample();
        let mut japan = catalog.destination("japan").unwrap().clone();
        japan.duty_rate = -0.5;
        catalog.insert_destination(japan.clone());

        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "catalog.destinations.japan.duty_rate"
        ));

        japan.duty_rate = 0.0;
        japan.local_handling_cost = -100_000.0;
        catalog.insert_destination(japan.clone());
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "catalog.destinations.japan.local_handling_cost"
        ));

        japan.local_handling_cost = 0.0;
        japan.consumption_tax_rate = f64::NAN;
        catalog.insert_destination(japan);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_product() {
        let mut catalog = Catalog::sample();
        let mut table = catalog.product("berlin_table").unwrap().clone();
        table.unit_cost = -1.0;
        catalog.insert_product(table);

        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "catalog.products.berlin_table"
        ));
    }
}
