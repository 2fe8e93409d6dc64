// ==========================================
// 出口物流报价系统 - 运输方式费用明细
// ==========================================

use crate::domain::types::ShippingMode;
use serde::{Deserialize, Serialize};

/// 单一运输方式的费用构成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeCostBreakdown {
    pub mode: ShippingMode,
    /// 整箱箱量 (LCL / AIR 为 None)
    pub container_count: Option<u32>,
    pub freight: f64,
    /// 码头 / 仓储
    pub terminal: f64,
    pub inland_truck: f64,
    pub documentation: f64,
    /// 空运操作附加费 (海运为 0)
    pub handling_surcharge: f64,
    pub total: f64,
}

impl ModeCostBreakdown {
    pub fn new(
        mode: ShippingMode,
        container_count: Option<u32>,
        freight: f64,
        terminal: f64,
        inland_truck: f64,
        documentation: f64,
        handling_surcharge: f64,
    ) -> Self {
        Self {
            mode,
            container_count,
            freight,
            terminal,
            inland_truck,
            documentation,
            handling_surcharge,
            total: freight + terminal + inland_truck + documentation + handling_surcharge,
        }
    }
}

/// 三种运输方式比价结果
///
/// 恰好一个 LCL、零到多个 FCL (按箱型升序)、恰好一个 AIR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeCostComparison {
    pub lcl: ModeCostBreakdown,
    pub fcl: Vec<ModeCostBreakdown>,
    pub air: ModeCostBreakdown,
    pub best_ocean_mode: ShippingMode,
}

impl ModeCostComparison {
    /// 查找指定方式的明细
    pub fn breakdown(&self, mode: ShippingMode) -> Option<&ModeCostBreakdown> {
        match mode {
            ShippingMode::Lcl => Some(&self.lcl),
            ShippingMode::Air => Some(&self.air),
            ShippingMode::Fcl(_) => self.fcl.iter().find(|b| b.mode == mode),
        }
    }

    /// 最便宜海运方案的明细
    pub fn best_ocean(&self) -> &ModeCostBreakdown {
        self.breakdown(self.best_ocean_mode).unwrap_or(&self.lcl)
    }
}
