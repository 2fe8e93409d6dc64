// ==========================================
// 出口物流报价系统 - 贸易术语费用分摊
// ==========================================
// 红线: 每次计算的费用行集合固定,
//       切换术语只改变付款方标记与卖/买双方合计
// ==========================================

use crate::domain::types::{CostItemKind, Payer, TradeTerm};
use serde::{Deserialize, Serialize};

/// 费用行 (未分摊)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub kind: CostItemKind,
    pub amount: f64,
}

/// 已标记付款方的费用行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedCostItem {
    pub kind: CostItemKind,
    pub amount: f64,
    pub payer: Payer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTermAllocation {
    pub trade_term: TradeTerm,
    pub seller_total: f64,
    pub buyer_total: f64,
    pub items: Vec<AllocatedCostItem>,
}

impl TradeTermAllocation {
    pub fn amount_of(&self, kind: CostItemKind) -> f64 {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.amount)
            .sum()
    }

    pub fn payer_of(&self, kind: CostItemKind) -> Option<Payer> {
        self.items.iter().find(|item| item.kind == kind).map(|item| item.payer)
    }

    /// 全部费用合计 (与术语无关)
    pub fn grand_total(&self) -> f64 {
        self.seller_total + self.buyer_total
    }
}

/// 单一术语的报价行 (术语对比表)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermQuote {
    pub trade_term: TradeTerm,
    pub seller_total: f64,
    pub buyer_total: f64,
    /// 正向求解: seller_total / quantity
    pub unit_price: f64,
    pub unit_price_usd: f64,
}
