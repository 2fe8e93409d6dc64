// ==========================================
// 出口物流报价系统 - 贸易术语费用分摊引擎
// ==========================================
// 职责: 构建固定费用行 → 按贸易术语标记付款方 → 汇总卖/买双方
// 输入: 产品 + 货量规格 + 所选运输方式明细 + 目的地
// 输出: TradeTermAllocation
// ==========================================
// 红线: 费用行集合每次计算固定,切换术语只改付款方标记
// 红线: 卖方集合 EXW ⊂ FOB ⊂ CFR ⊂ CIF ⊂ DDP
// ==========================================

use crate::config::engine_config::{DutyBasis, EngineConfig};
use crate::domain::allocation::{AllocatedCostItem, CostLineItem, TradeTermAllocation};
use crate::domain::cost::ModeCostBreakdown;
use crate::domain::product::{Destination, ProductSpec};
use crate::domain::shipment::ShipmentSpec;
use crate::domain::types::{CostItemKind, Payer, TradeTerm};

/// 构建费用行所需的输入
#[derive(Debug, Clone, Copy)]
pub struct CostInputs<'a> {
    pub product: &'a ProductSpec,
    pub spec: &'a ShipmentSpec,
    /// 所选运输方式 (默认最便宜海运)
    pub chosen_mode: &'a ModeCostBreakdown,
    pub destination: &'a Destination,
    /// 关税基数含毛利时使用
    pub target_margin_rate: f64,
}

// ==========================================
// TradeTermAllocator - 费用分摊引擎
// ==========================================
pub struct TradeTermAllocator<'a> {
    config: &'a EngineConfig,
}

impl<'a> TradeTermAllocator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// 构建固定顺序的费用行
    ///
    /// 映射:
    /// - 起运地内陆 ← 内陆拖车
    /// - 出口单证 ← 单证费
    /// - 起运港码头 ← 码头/仓储 + 空运附加费
    /// - 国际运费 ← 运费
    /// - 保险 = 保险费率 × 所选方式总费用
    /// - 关税 = 关税基数 × 目的地税率 (基数口径见 DutyBasis)
    pub fn build_cost_items(&self, inputs: &CostInputs<'_>) -> Vec<CostLineItem> {
        let qty = f64::from(inputs.spec.quantity);
        let chosen = inputs.chosen_mode;

        let product_total = inputs.product.unit_cost * qty;
        let packing_total = self.config.packing_cost.per_unit(inputs.spec.packing_mode) * qty;
        let freight = chosen.freight;
        let insurance = self.config.insurance_rate * chosen.total;
        let duty = self.duty_base(product_total, freight, inputs.target_margin_rate)
            * inputs.destination.duty_rate;

        CostItemKind::ALL
            .iter()
            .map(|&kind| {
                let amount = match kind {
                    CostItemKind::Product => product_total,
                    CostItemKind::Packing => packing_total,
                    CostItemKind::InlandOrigin => chosen.inland_truck,
                    CostItemKind::OriginCustomsDoc => chosen.documentation,
                    CostItemKind::OriginTerminal => chosen.terminal + chosen.handling_surcharge,
                    CostItemKind::InternationalFreight => freight,
                    CostItemKind::Insurance => insurance,
                    CostItemKind::DestinationTerminal => inputs.destination.local_handling_cost,
                    CostItemKind::Duty => duty,
                    CostItemKind::DestinationInland => inputs.destination.inland_delivery_cost,
                };
                CostLineItem { kind, amount }
            })
            .collect()
    }

    /// 关税基数
    pub fn duty_base(&self, product_total: f64, freight: f64, target_margin_rate: f64) -> f64 {
        match self.config.duty_basis {
            DutyBasis::ProductPlusFreight => product_total + freight,
            DutyBasis::ProductMarginFreight => {
                product_total * (1.0 + target_margin_rate) + freight
            }
        }
    }

    /// 按贸易术语分摊
    pub fn allocate(&self, items: &[CostLineItem], trade_term: TradeTerm) -> TradeTermAllocation {
        allocate(items, trade_term)
    }

    /// 全部术语的分摊 (按 EXW → DDP 顺序)
    pub fn allocate_all(&self, items: &[CostLineItem]) -> Vec<TradeTermAllocation> {
        TradeTerm::ALL
            .iter()
            .map(|&term| allocate(items, term))
            .collect()
    }
}

/// 分摊: 按静态包含集合为每行打上付款方标记
pub fn allocate(items: &[CostLineItem], trade_term: TradeTerm) -> TradeTermAllocation {
    let mut seller_total = 0.0;
    let mut buyer_total = 0.0;

    let items: Vec<AllocatedCostItem> = items
        .iter()
        .map(|item| {
            let payer = if trade_term.seller_pays(item.kind) {
                seller_total += item.amount;
                Payer::Seller
            } else {
                buyer_total += item.amount;
                Payer::Buyer
            };
            AllocatedCostItem {
                kind: item.kind,
                amount: item.amount,
                payer,
            }
        })
        .collect();

    TradeTermAllocation {
        trade_term,
        seller_total,
        buyer_total,
        items,
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<CostLineItem> {
        CostItemKind::ALL
            .iter()
            .enumerate()
            .map(|(idx, &kind)| CostLineItem {
                kind,
                amount: 1_000.0 * (idx as f64 + 1.0),
            })
            .collect()
    }

    #[test]
    fn test_exw_seller_pays_product_and_packing_only() {
        let allocation = allocate(&items(), TradeTerm::Exw);
        assert_eq!(allocation.seller_total, 1_000.0 + 2_000.0);
        assert_eq!(allocation.payer_of(CostItemKind::Product), Some(Payer::Seller));
        assert_eq!(allocation.payer_of(CostItemKind::InlandOrigin), Some(Payer::Buyer));
    }

    #[test]
    fn test_line_items_fixed_across_terms() {
        let items = items();
        let allocations: Vec<TradeTermAllocation> =
            TradeTerm::ALL.iter().map(|&t| allocate(&items, t)).collect();

        for allocation in &allocations {
            let kinds: Vec<CostItemKind> = allocation.items.iter().map(|i| i.kind).collect();
            assert_eq!(kinds, CostItemKind::ALL.to_vec());
            assert!((allocation.grand_total() - 55_000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_seller_total_monotonic() {
        let items = items();
        let totals: Vec<f64> = TradeTerm::ALL
            .iter()
            .map(|&t| allocate(&items, t).seller_total)
            .collect();
        for pair in totals.windows(2) {
            assert!(pair[0] <= pair[1], "卖方合计必须单调不减: {:?}", totals);
        }
        assert_eq!(totals[4], 55_000.0, "DDP 卖方承担全部");
    }

    #[test]
    fn test_cif_adds_insurance_over_cfr() {
        let items = items();
        let cfr = allocate(&items, TradeTerm::Cfr);
        let cif = allocate(&items, TradeTerm::Cif);
        assert_eq!(cif.seller_total - cfr.seller_total, 7_000.0);
        assert_eq!(cif.payer_of(CostItemKind::Insurance), Some(Payer::Seller));
        assert_eq!(cif.payer_of(CostItemKind::Duty), Some(Payer::Buyer));
    }
}
