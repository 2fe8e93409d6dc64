// ==========================================
// 出口物流报价系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 按表头映射的原始行 (字符串值,已去首尾空白)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行记录
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 数据行号: 表头之后的第几行 (1 起)
    ///
    /// CSV 与 Excel 一致,按物理行计数,空行与空白单元格行都占号
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// 取字段值,空字符串视为缺失
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

/// 文件解析器 trait
pub trait FileParser {
    /// 解析文件,返回表头列表与非空数据行
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn build_record(row: usize, headers: &[String], values: impl Iterator<Item = String>) -> RawRecord {
    let fields = headers
        .iter()
        .cloned()
        .zip(values.map(|v| v.trim().to_string()))
        .collect();
    RawRecord { row, fields }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let header_line = reader.headers()?.position().map_or(1, |p| p.line());
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // csv 会丢弃物理空行,行号取自记录所在物理行
            let row = record
                .position()
                .map_or(idx + 1, |p| p.line().saturating_sub(header_line) as usize);
            let raw = build_record(row, &headers, record.iter().map(str::to_string));

            // 跳过完全空白的行
            if raw.is_blank() {
                continue;
            }
            records.push(raw);
        }

        Ok(ParsedSheet { headers, records })
    }
}

// ==========================================
// Excel Parser 实现 (读取第一个工作表)
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let raw = build_record(idx + 1, &headers, data_row.iter().map(|c| c.to_string()));
            if raw.is_blank() {
                continue;
            }
            records.push(raw);
        }

        Ok(ParsedSheet { headers, records })
    }
}

// ==========================================
// 通用文件解析器 (根据扩展名自动选择)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ParsedSheet> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["product_id,weight_kg", "P001, 6.5 ", "P002,19"]);

        let sheet = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["product_id", "weight_kg"]);
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[0].get("product_id"), Some("P001"));
        assert_eq!(sheet.records[0].get("weight_kg"), Some("6.5"));
        assert_eq!(sheet.records[1].row, 2);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_keeps_numbering() {
        let temp_file = csv_file(&["product_id,weight_kg", "P001,2.5", ",", "P002,3.0"]);

        let sheet = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        // 跳过空行,但行号仍按原始位置
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[1].row, 3);
    }

    #[test]
    fn test_csv_parser_physically_empty_line_counts() {
        let temp_file = csv_file(&["product_id,weight_kg", "P001,2.5", "", "", "P002,3.0"]);

        let sheet = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        // 与 Excel 空白行计数方式一致
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[0].row, 1);
        assert_eq!(sheet.records[1].row, 4);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
