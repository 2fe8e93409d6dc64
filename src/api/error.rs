// ==========================================
// 出口物流报价系统 - API层错误类型
// ==========================================
// 职责: 汇总下层错误,给调用方统一的失败原因
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 目录查找错误
    // ==========================================
    #[error("未知产品: {0}")]
    UnknownProduct(String),

    #[error("未知目的地: {0}")]
    UnknownDestination(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("报价失败: {0}")]
    Engine(#[from] EngineError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("目录导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// 是否为调用方输入问题 (未知 ID 或引擎校验失败)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ApiError::UnknownProduct(_) | ApiError::UnknownDestination(_) | ApiError::Engine(_)
        )
    }
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_conversion() {
        let err: ApiError = EngineError::InvalidQuantity(0).into();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("quantity=0"));
    }

    #[test]
    fn test_import_error_is_not_input_error() {
        let err: ApiError = ImportError::MissingColumn("name".to_string()).into();
        assert!(!err.is_input_error());
    }
}
