// ==========================================
// 产品目录导入集成测试
// ==========================================
// 测试目标: CSV 产品表 → 目录 → 报价
// ==========================================


use export_pricing::api::QuoteApi;
use export_pricing::api::QuoteRequest;
use export_pricing::domain::{PackingMode, TradeTerm};
use export_pricing::importer::{CatalogImporter, ImportError};
use std::path::Path;
use test_helpers::*;

const HEADER: &str = "product_id,name,unit_cost,weight_kg,length_cm,width_cm,height_cm,hs_code,retail_price";

#[test]
fn test_import_valid_csv() {
    let file = write_csv(&[
        HEADER,
        "stool,Oak Stool,20000,3,40,40,45,9403.60,",
        "",
        "bench,Bench,55000,12.5,120,35,45,,159000",
    ]);

    let products = CatalogImporter::new().import_file(file.path()).unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product_id, "stool");
    assert_eq!(products[0].hs_code.as_deref(), Some("9403.60"));
    assert_eq!(products[0].retail_price, None);
    assert_eq!(products[1].unit_weight_kg, 12.5);
    assert_eq!(products[1].retail_price, Some(159_000.0));
}

#[test]
fn test_row_errors_carry_row_number() {
    let file = write_csv(&[
        HEADER,
        "stool,Oak Stool,20000,3,40,40,45,,",
        "bench,Bench,abc,12.5,120,35,45,,",
    ]);

    let err = CatalogImporter::new().import_file(file.path()).unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 2);
            assert_eq!(field, "unit_cost");
        }
        other => panic!("期望类型转换错误, 实际 {:?}", other),
    }
}

#[test]
fn test_blank_lines_keep_sheet_row_numbers() {
    let file = write_csv(&[
        HEADER,
        "stool,Oak Stool,20000,3,40,40,45,,",
        "",
        "bench,Bench,abc,12.5,120,35,45,,",
    ]);

    let err = CatalogImporter::new().import_file(file.path()).unwrap_err();
    assert!(
        matches!(err, ImportError::TypeConversionError { row: 3, .. }),
        "空行计入行号, 实际 {:?}",
        err
    );
}

#[test]
fn test_duplicate_and_missing_column() {
    let duplicate = write_csv(&[HEADER, "stool,A,1,1,1,1,1,,", "stool,B,1,1,1,1,1,,"]);
    assert!(matches!(
        CatalogImporter::new().import_file(duplicate.path()),
        Err(ImportError::DuplicateProduct { row: 2, .. })
    ));

    let missing = write_csv(&["product_id,name,unit_cost", "stool,A,1"]);
    assert!(matches!(
        CatalogImporter::new().import_file(missing.path()),
        Err(ImportError::MissingColumn(_))
    ));
}

#[test]
fn test_missing_file() {
    let result = CatalogImporter::new().import_file(Path::new("/nonexistent/products.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_imported_products_are_quotable() {
    let file = write_csv(&[HEADER, "stool,Oak Stool,20000,3,40,40,45,,"]);

    let mut api = QuoteApi::with_defaults();
    assert_eq!(api.import_products(file.path()).unwrap(), 1);
    assert!(api.catalog().product("module_shelf_9in1").is_some(), "合并保留原有产品");

    let request = QuoteRequest::new("stool", "japan", 300, PackingMode::Modular, TradeTerm::Ddp);
    let document = api.quote(&request).unwrap();
    assert_approx(document.result.allocation.buyer_total, 0.0, "DDP 买方不付费");
}
