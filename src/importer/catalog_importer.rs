// ==========================================
// 出口物流报价系统 - 产品目录导入器
// ==========================================
// 流程: 文件解析 → 表头检查 → 字段映射 + 类型转换 → 规格校验 → 去重
// 输入: Excel/CSV 产品表
// 输出: Vec<ProductSpec> / Catalog
// ==========================================
// 红线: 任一行失败则整批失败,错误携带数据行号
// ==========================================

use crate::config::catalog::Catalog;
use crate::domain::product::{Dimensions, ProductSpec};
use crate::engine::validator::InputValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{ParsedSheet, RawRecord, UniversalFileParser};
use std::collections::HashSet;
use std::path::Path;
use tracing::instrument;

/// 标准列名
pub mod columns {
    pub const PRODUCT_ID: &str = "product_id";
    pub const NAME: &str = "name";
    pub const UNIT_COST: &str = "unit_cost";
    pub const WEIGHT_KG: &str = "weight_kg";
    pub const LENGTH_CM: &str = "length_cm";
    pub const WIDTH_CM: &str = "width_cm";
    pub const HEIGHT_CM: &str = "height_cm";
    pub const HS_CODE: &str = "hs_code";
    pub const RETAIL_PRICE: &str = "retail_price";

    pub const REQUIRED: [&str; 7] = [
        PRODUCT_ID, NAME, UNIT_COST, WEIGHT_KG, LENGTH_CM, WIDTH_CM, HEIGHT_CM,
    ];
}

/// 列名别名
fn aliases(column: &str) -> &'static [&'static str] {
    match column {
        columns::PRODUCT_ID => &["product_id", "sku"],
        columns::WEIGHT_KG => &["weight_kg", "unit_weight_kg"],
        columns::UNIT_COST => &["unit_cost", "cost"],
        columns::NAME => &["name"],
        columns::LENGTH_CM => &["length_cm"],
        columns::WIDTH_CM => &["width_cm"],
        columns::HEIGHT_CM => &["height_cm"],
        columns::HS_CODE => &["hs_code"],
        columns::RETAIL_PRICE => &["retail_price"],
        _ => &[],
    }
}

// ==========================================
// CatalogImporter - 产品目录导入器
// ==========================================
#[derive(Debug, Default)]
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn new() -> Self {
        Self
    }

    /// 从文件导入产品列表 (按扩展名选择解析器)
    #[instrument(skip(self), fields(path = %file_path.display()))]
    pub fn import_file(&self, file_path: &Path) -> ImportResult<Vec<ProductSpec>> {
        let sheet = UniversalFileParser.parse(file_path)?;
        let products = self.map_sheet(&sheet)?;
        tracing::info!(count = products.len(), "产品目录导入完成");
        Ok(products)
    }

    /// 导入为目录 (不含目的地)
    pub fn import_catalog(&self, file_path: &Path) -> ImportResult<Catalog> {
        let mut catalog = Catalog::new();
        for product in self.import_file(file_path)? {
            catalog.insert_product(product);
        }
        Ok(catalog)
    }

    /// 解析结果 → 产品列表
    pub fn map_sheet(&self, sheet: &ParsedSheet) -> ImportResult<Vec<ProductSpec>> {
        for column in columns::REQUIRED {
            let present = aliases(column)
                .iter()
                .any(|alias| sheet.headers.iter().any(|h| h == alias));
            if !present {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            let product = self.map_record(record)?;
            if !seen.insert(product.product_id.clone()) {
                return Err(ImportError::DuplicateProduct {
                    row: record.row,
                    product_id: product.product_id,
                });
            }
            products.push(product);
        }
        Ok(products)
    }

    /// 单行映射 + 规格校验
    pub fn map_record(&self, record: &RawRecord) -> ImportResult<ProductSpec> {
        let product_id = get_string(record, columns::PRODUCT_ID)
            .ok_or(ImportError::PrimaryKeyMissing(record.row))?;

        let product = ProductSpec {
            name: get_string(record, columns::NAME).unwrap_or_else(|| product_id.clone()),
            unit_cost: require_f64(record, columns::UNIT_COST)?,
            unit_weight_kg: require_f64(record, columns::WEIGHT_KG)?,
            dimensions: Dimensions::new(
                require_f64(record, columns::LENGTH_CM)?,
                require_f64(record, columns::WIDTH_CM)?,
                require_f64(record, columns::HEIGHT_CM)?,
            ),
            hs_code: get_string(record, columns::HS_CODE),
            retail_price: parse_f64(record, columns::RETAIL_PRICE)?,
            product_id,
        };

        InputValidator::validate_product(&product).map_err(|e| ImportError::InvalidProduct {
            row: record.row,
            message: e.to_string(),
        })?;

        Ok(product)
    }
}

/// 提取字符串字段,支持别名
fn get_string(record: &RawRecord, column: &str) -> Option<String> {
    aliases(column)
        .iter()
        .find_map(|alias| record.get(alias))
        .map(str::to_string)
}

/// 解析可选浮点数 (千分位逗号会被去掉)
fn parse_f64(record: &RawRecord, column: &str) -> ImportResult<Option<f64>> {
    match get_string(record, column) {
        None => Ok(None),
        Some(value) => value
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| ImportError::TypeConversionError {
                row: record.row,
                field: column.to_string(),
                message: format!("无法解析为数字: {}", value),
            }),
    }
}

fn require_f64(record: &RawRecord, column: &str) -> ImportResult<f64> {
    parse_f64(record, column)?.ok_or_else(|| ImportError::TypeConversionError {
        row: record.row,
        field: column.to_string(),
        message: "值为空".to_string(),
    })
}
