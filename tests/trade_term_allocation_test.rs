// ==========================================
// TradeTermAllocator 引擎集成测试
// ==========================================
// 测试目标: 验证费用行构建与贸易术语分摊
// 覆盖范围: 行集合固定, 卖方合计单调, 关税基数口径, 保险基数
// ==========================================


use export_pricing::config::{DutyBasis, EngineConfig};
use export_pricing::domain::{
    CostItemKind, CostLineItem, Destination, PackingMode, Payer, ProductSpec, TradeTerm,
};
use export_pricing::engine::{
    CostInputs, ModeCostCalculator, ShipmentSpecCalculator, TradeTermAllocator,
};
use test_helpers::*;

// ==========================================
// 测试辅助函数
// ==========================================

fn build_items(
    config: &EngineConfig,
    product: &ProductSpec,
    destination: &Destination,
    quantity: u32,
) -> Vec<CostLineItem> {
    let spec = ShipmentSpecCalculator::new(config).compute(product, quantity, PackingMode::Assembled, 0.7);
    let modes = ModeCostCalculator::new(config).compute(&spec, 1.0);
    TradeTermAllocator::new(config).build_cost_items(&CostInputs {
        product,
        spec: &spec,
        chosen_mode: modes.best_ocean(),
        destination,
        target_margin_rate: 0.25,
    })
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_cost_items_for_500_units_to_japan() {
    let config = default_config();
    let items = build_items(&config, &shelf(), &sample_destination("japan"), 500);

    let amount = |kind: CostItemKind| {
        items
            .iter()
            .find(|i| i.kind == kind)
            .map(|i| i.amount)
            .unwrap_or_else(|| panic!("缺少费用行 {}", kind))
    };

    assert_eq!(items.len(), 10);
    assert_approx(amount(CostItemKind::Product), 30_000_000.0, "产品");
    assert_approx(amount(CostItemKind::Packing), 1_750_000.0, "包装");
    assert_approx(amount(CostItemKind::InlandOrigin), 200_000.0, "起运地内陆");
    assert_approx(amount(CostItemKind::OriginCustomsDoc), 50_000.0, "单证");
    assert_approx(amount(CostItemKind::OriginTerminal), 202_500.0, "起运港码头");
    assert_approx(amount(CostItemKind::InternationalFreight), 877_500.0, "国际运费");
    assert_approx(amount(CostItemKind::Insurance), 2_660.0, "保险 = 0.2% × 1,330,000");
    assert_approx(amount(CostItemKind::DestinationTerminal), 120_000.0, "目的港码头");
    assert_approx(amount(CostItemKind::Duty), 0.0, "家具零关税");
    assert_approx(amount(CostItemKind::DestinationInland), 180_000.0, "目的地配送");
}

#[test]
fn test_fob_seller_total() {
    let config = default_config();
    let items = build_items(&config, &shelf(), &sample_destination("japan"), 500);
    let fob = TradeTermAllocator::new(&config).allocate(&items, TradeTerm::Fob);

    assert_approx(fob.seller_total, 32_202_500.0, "FOB 卖方合计");
    assert_eq!(fob.payer_of(CostItemKind::InternationalFreight), Some(Payer::Buyer));
}

#[test]
fn test_seller_total_non_decreasing_across_terms() {
    let config = default_config();
    for quantity in [1_u32, 500, 2_000] {
        let items = build_items(&config, &shelf(), &dutiable_destination(0.08), quantity);
        let allocations = TradeTermAllocator::new(&config).allocate_all(&items);

        let terms: Vec<TradeTerm> = allocations.iter().map(|a| a.trade_term).collect();
        assert_eq!(terms, TradeTerm::ALL.to_vec());

        for pair in allocations.windows(2) {
            assert!(
                pair[0].seller_total <= pair[1].seller_total,
                "{} → {}: 卖方合计不能下降",
                pair[0].trade_term,
                pair[1].trade_term
            );
        }
        let grand = allocations[0].grand_total();
        for allocation in &allocations {
            assert_approx(
                allocation.seller_total + allocation.buyer_total,
                grand,
                "卖买合计恒等于费用总额",
            );
        }
        assert_approx(allocations[4].buyer_total, 0.0, "DDP 买方不承担费用");
    }
}

#[test]
fn test_seller_sets_are_nested() {
    let config = default_config();
    let items = build_items(&config, &shelf(), &sample_destination("hong_kong"), 500);
    let allocator = TradeTermAllocator::new(&config);

    for (lower, higher) in TradeTerm::ALL.iter().zip(TradeTerm::ALL.iter().skip(1)) {
        let low = allocator.allocate(&items, *lower);
        let high = allocator.allocate(&items, *higher);
        for kind in CostItemKind::ALL {
            if low.payer_of(kind) == Some(Payer::Seller) {
                assert_eq!(
                    high.payer_of(kind),
                    Some(Payer::Seller),
                    "{} 在 {} 由卖方承担,在 {} 也必须如此",
                    kind,
                    lower,
                    higher
                );
            }
        }
    }
}

#[test]
fn test_duty_basis_policies_differ() {
    let destination = dutiable_destination(0.1);

    let plus_freight = default_config();
    let mut with_margin = default_config();
    with_margin.duty_basis = DutyBasis::ProductMarginFreight;

    let duty_of = |config: &EngineConfig| {
        build_items(config, &shelf(), &destination, 500)
            .into_iter()
            .find(|i| i.kind == CostItemKind::Duty)
            .map(|i| i.amount)
            .unwrap_or_default()
    };

    // (30,000,000 + 877,500) × 10%
    assert_approx(duty_of(&plus_freight), 3_087_750.0, "产品 + 运费口径");
    // (30,000,000 × 1.25 + 877,500) × 10%
    assert_approx(duty_of(&with_margin), 3_837_750.0, "产品 × (1 + 毛利) + 运费口径");
}

#[test]
fn test_duty_only_paid_by_seller_under_ddp() {
    let config = default_config();
    let items = build_items(&config, &shelf(), &dutiable_destination(0.1), 500);
    let allocator = TradeTermAllocator::new(&config);

    assert_eq!(allocator.allocate(&items, TradeTerm::Cif).payer_of(CostItemKind::Duty), Some(Payer::Buyer));
    assert_eq!(allocator.allocate(&items, TradeTerm::Ddp).payer_of(CostItemKind::Duty), Some(Payer::Seller));
}
