// ==========================================
// 出口物流报价系统 - 配置层
// ==========================================
// 职责: 引擎参数、产品/目的地目录、配置文件加载
// 红线: 引擎只接收显式配置对象,不读取全局可变状态
// ==========================================

pub mod catalog;
pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置类型
pub use catalog::Catalog;
pub use config_manager::{default_config_path, ConfigFile, ConfigManager, CONFIG_PATH_ENV};
pub use engine_config::{
    config_keys, AirRates, ContainerSpec, DutyBasis, EngineConfig, LclRates, PackingCost,
    TruckingBand,
};
pub use error::{ConfigError, ConfigResult};
