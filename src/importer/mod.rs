// ==========================================
// 出口物流报价系统 - 导入层
// ==========================================
// 职责: 外部产品表导入,生成目录数据
// 支持: Excel, CSV
// ==========================================

pub mod catalog_importer;
pub mod error;
pub mod file_parser;

pub use catalog_importer::CatalogImporter;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, ParsedSheet, RawRecord, UniversalFileParser};
