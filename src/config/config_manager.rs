// ==========================================
// 出口物流报价系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 存储: JSON 配置文件 { "engine": {...}, "catalog": {...} }
// 查找顺序: 显式路径 > EXPORT_PRICING_CONFIG > 用户配置目录 > 内置默认
// ==========================================

use crate::config::catalog::Catalog;
use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "EXPORT_PRICING_CONFIG";

const CONFIG_DIR_NAME: &str = "export-pricing";
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub engine: EngineConfig,
    /// 缺省时使用内置样例目录
    #[serde(default)]
    pub catalog: Option<Catalog>,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    engine: EngineConfig,
    catalog: Catalog,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 由已构建的配置创建 (测试 / 嵌入场景)
    ///
    /// 引擎参数与目录数据均需通过校验
    pub fn new(engine: EngineConfig, catalog: Catalog) -> ConfigResult<Self> {
        engine.validate()?;
        catalog.validate()?;
        Ok(Self {
            engine,
            catalog,
            source: None,
        })
    }

    /// 内置默认配置 + 样例目录
    pub fn with_defaults() -> Self {
        Self {
            engine: EngineConfig::default(),
            catalog: Catalog::sample(),
            source: None,
        }
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let file: ConfigFile = serde_json::from_str(raw)?;
        let catalog = file.catalog.unwrap_or_else(Catalog::sample);
        Self::new(file.engine, catalog)
    }

    /// 从指定文件加载
    ///
    /// 显式指定的文件不存在时报错,不回落到默认值
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let mut manager = Self::from_json_str(&raw)?;
        manager.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            products = manager.catalog.products.len(),
            destinations = manager.catalog.destinations.len(),
            "配置加载完成"
        );
        Ok(manager)
    }

    /// 按查找顺序加载
    ///
    /// - 环境变量指定的路径必须存在
    /// - 用户配置目录下的文件可选,不存在时使用内置默认
    pub fn load_default() -> ConfigResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = path.trim();
            if !path.is_empty() {
                return Self::from_file(Path::new(path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("未找到配置文件,使用内置默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 配置来源文件 (内置默认为 None)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 用导入的目录覆盖/补充当前目录
    pub fn merge_catalog(&mut self, other: Catalog) {
        self.catalog.merge(other);
    }

    /// 获取当前配置快照 (JSON)
    ///
    /// 用于在报价结果旁记录所用参数,保证可复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let file = ConfigFile {
            engine: self.engine.clone(),
            catalog: Some(self.catalog.clone()),
        };
        Ok(serde_json::to_string(&file)?)
    }

    /// 拆分为 (引擎参数, 目录)
    pub fn into_parts(self) -> (EngineConfig, Catalog) {
        (self.engine, self.catalog)
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_str_uses_sample_catalog_when_missing() {
        let manager = ConfigManager::from_json_str(r#"{"engine": {"fcl_threshold_cbm": 12.0}}"#).unwrap();
        assert_eq!(manager.engine_config().fcl_threshold_cbm, 12.0);
        assert!(manager.catalog().product("module_shelf_9in1").is_some());
    }

    #[test]
    fn test_from_json_str_rejects_invalid_engine() {
        let result = ConfigManager::from_json_str(r#"{"engine": {"quantity_ceiling": 0}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ConfigManager::from_file(Path::new("/nonexistent/export-pricing.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_from_file_and_snapshot_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"engine": {{"insurance_rate": 0.003}}}}"#).unwrap();

        let manager = ConfigManager::from_file(file.path()).unwrap();
        assert_eq!(manager.engine_config().insurance_rate, 0.003);
        assert_eq!(manager.source(), Some(file.path()));

        let snapshot = manager.get_config_snapshot().unwrap();
        let restored = ConfigManager::from_json_str(&snapshot).unwrap();
        assert_eq!(restored.engine_config(), manager.engine_config());
        assert_eq!(restored.catalog(), manager.catalog());
    }

    #[test]
    fn test_malformed_json() {
        let result = ConfigManager::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
