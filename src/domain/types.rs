// ==========================================
// 出口物流报价系统 - 领域类型定义
// ==========================================
// 包含: 包装方式 / 贸易术语 / 运输方式 / 集装箱类型 / 费用项 / 付款方
// 序列化格式: SCREAMING_SNAKE_CASE (与配置文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 包装方式 (Packing Mode)
// ==========================================
// Modular: 模块化拆装,体积按缩减系数压缩
// Assembled: 整装出货,体积 100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackingMode {
    Modular,
    Assembled,
}

impl fmt::Display for PackingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackingMode::Modular => write!(f, "MODULAR"),
            PackingMode::Assembled => write!(f, "ASSEMBLED"),
        }
    }
}

impl std::str::FromStr for PackingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modular" | "module" => Ok(PackingMode::Modular),
            "assembled" => Ok(PackingMode::Assembled),
            other => Err(format!("未知包装方式: {}", other)),
        }
    }
}

// ==========================================
// 贸易术语 (Incoterm)
// ==========================================
// 顺序: EXW < FOB < CFR < CIF < DDP
// 红线: 卖方承担的费用集合随术语单调扩大
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeTerm {
    Exw,
    Fob,
    Cfr,
    Cif,
    Ddp,
}

impl TradeTerm {
    /// 全部术语,按责任递进顺序排列
    pub const ALL: [TradeTerm; 5] = [
        TradeTerm::Exw,
        TradeTerm::Fob,
        TradeTerm::Cfr,
        TradeTerm::Cif,
        TradeTerm::Ddp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeTerm::Exw => "EXW",
            TradeTerm::Fob => "FOB",
            TradeTerm::Cfr => "CFR",
            TradeTerm::Cif => "CIF",
            TradeTerm::Ddp => "DDP",
        }
    }

    /// 该术语下卖方是否承担指定费用项
    pub fn seller_pays(&self, item: CostItemKind) -> bool {
        *self >= item.seller_paid_from()
    }
}

impl Default for TradeTerm {
    fn default() -> Self {
        TradeTerm::Fob
    }
}

impl fmt::Display for TradeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TradeTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EXW" => Ok(TradeTerm::Exw),
            "FOB" => Ok(TradeTerm::Fob),
            "CFR" => Ok(TradeTerm::Cfr),
            "CIF" => Ok(TradeTerm::Cif),
            "DDP" => Ok(TradeTerm::Ddp),
            other => Err(format!("未知贸易术语: {}", other)),
        }
    }
}

// ==========================================
// 集装箱类型 (Container Type)
// ==========================================
// 顺序: 20FT < 40FT < 40HC (按容量升序)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    #[serde(rename = "20FT")]
    Ft20,
    #[serde(rename = "40FT")]
    Ft40,
    #[serde(rename = "40HC")]
    Ft40HighCube,
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerType::Ft20 => write!(f, "20FT"),
            ContainerType::Ft40 => write!(f, "40FT"),
            ContainerType::Ft40HighCube => write!(f, "40HC"),
        }
    }
}

// ==========================================
// 运输方式 (Shipping Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMode {
    Lcl,
    Fcl(ContainerType),
    Air,
}

impl ShippingMode {
    pub fn is_ocean(&self) -> bool {
        !matches!(self, ShippingMode::Air)
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingMode::Lcl => write!(f, "LCL"),
            ShippingMode::Fcl(container) => write!(f, "FCL_{}", container),
            ShippingMode::Air => write!(f, "AIR"),
        }
    }
}

// ==========================================
// 运输偏好 (Shipping Preference)
// ==========================================
// CheapestOcean: 采用最便宜的海运方案 (LCL / FCL)
// Air: 调用方明确要求空运
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingPreference {
    #[default]
    CheapestOcean,
    Air,
}

// ==========================================
// 费用项 (Cost Line Item Kind)
// ==========================================
// 顺序即报价单的固定行序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostItemKind {
    Product,             // 产品成本
    Packing,             // 包装
    InlandOrigin,        // 起运地内陆运输
    OriginCustomsDoc,    // 出口报关/单证
    OriginTerminal,      // 起运港码头/仓储
    InternationalFreight, // 国际运费
    Insurance,           // 保险
    DestinationTerminal, // 目的港码头
    Duty,                // 进口关税
    DestinationInland,   // 目的地内陆配送
}

impl CostItemKind {
    /// 固定行序
    pub const ALL: [CostItemKind; 10] = [
        CostItemKind::Product,
        CostItemKind::Packing,
        CostItemKind::InlandOrigin,
        CostItemKind::OriginCustomsDoc,
        CostItemKind::OriginTerminal,
        CostItemKind::InternationalFreight,
        CostItemKind::Insurance,
        CostItemKind::DestinationTerminal,
        CostItemKind::Duty,
        CostItemKind::DestinationInland,
    ];

    /// 卖方开始承担该费用项的最低术语
    pub fn seller_paid_from(&self) -> TradeTerm {
        match self {
            CostItemKind::Product | CostItemKind::Packing => TradeTerm::Exw,
            CostItemKind::InlandOrigin
            | CostItemKind::OriginCustomsDoc
            | CostItemKind::OriginTerminal => TradeTerm::Fob,
            CostItemKind::InternationalFreight => TradeTerm::Cfr,
            CostItemKind::Insurance => TradeTerm::Cif,
            CostItemKind::DestinationTerminal
            | CostItemKind::Duty
            | CostItemKind::DestinationInland => TradeTerm::Ddp,
        }
    }

    /// 是否为物流类费用 (不含产品/包装/关税)
    pub fn is_logistics(&self) -> bool {
        !matches!(
            self,
            CostItemKind::Product | CostItemKind::Packing | CostItemKind::Duty
        )
    }
}

impl fmt::Display for CostItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CostItemKind::Product => "PRODUCT",
            CostItemKind::Packing => "PACKING",
            CostItemKind::InlandOrigin => "INLAND_ORIGIN",
            CostItemKind::OriginCustomsDoc => "ORIGIN_CUSTOMS_DOC",
            CostItemKind::OriginTerminal => "ORIGIN_TERMINAL",
            CostItemKind::InternationalFreight => "INTERNATIONAL_FREIGHT",
            CostItemKind::Insurance => "INSURANCE",
            CostItemKind::DestinationTerminal => "DESTINATION_TERMINAL",
            CostItemKind::Duty => "DUTY",
            CostItemKind::DestinationInland => "DESTINATION_INLAND",
        };
        write!(f, "{}", label)
    }
}

// ==========================================
// 付款方 (Payer)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Payer {
    Seller,
    Buyer,
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payer::Seller => write!(f, "SELLER"),
            Payer::Buyer => write!(f, "BUYER"),
        }
    }
}

// ==========================================
// 物流费用占比风险等级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogisticsRiskLevel {
    Stable,  // 占比在阈值内
    Warning, // 超过阈值
}

impl fmt::Display for LogisticsRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogisticsRiskLevel::Stable => write!(f, "STABLE"),
            LogisticsRiskLevel::Warning => write!(f, "WARNING"),
        }
    }
}
