// ==========================================
// UnitEconomicsSolver 集成测试
// ==========================================
// 测试目标: 验证正向/反向定价与保本数量
// ==========================================


use export_pricing::domain::{CostItemKind, CostLineItem, CurrencyContext, TradeTerm};
use export_pricing::engine::{
    allocate, break_even_quantity, margin_rate, max_unit_cost_for_target_price,
    required_price_for_margin, EconomicsInputs, EngineError, UnitEconomicsSolver,
};
use test_helpers::*;

#[test]
fn test_target_margin_price() {
    let price = required_price_for_margin(1_000.0, 0.25).unwrap();
    assert!((price - 1_333.33).abs() < 0.01, "1,000 / 0.75 ≈ 1,333.33, 实际 {}", price);
    assert_approx(margin_rate(1_000.0, price), 0.25, "反算毛利率");
}

#[test]
fn test_full_margin_rejected() {
    assert_eq!(
        required_price_for_margin(1_000.0, 1.0),
        Err(EngineError::InvalidMarginRate(1.0))
    );
    assert!(max_unit_cost_for_target_price(1_000.0, 1.2).is_err());
}

#[test]
fn test_negative_margin_is_allowed() {
    // 亏本清货: 售价低于成本
    let price = required_price_for_margin(1_000.0, -0.25).unwrap();
    assert_approx(price, 800.0, "负毛利售价");
}

#[test]
fn test_max_cost_round_trips_target_price() {
    for margin in [0.0, 0.1, 0.25, 0.5, 0.9] {
        let cost = max_unit_cost_for_target_price(50_000.0, margin).unwrap();
        let price = required_price_for_margin(cost, margin).unwrap();
        assert_approx(price, 50_000.0, "目标价往返");
    }
}

#[test]
fn test_max_cost_rejects_non_positive_target_price() {
    assert_eq!(
        max_unit_cost_for_target_price(-5_000.0, 0.25),
        Err(EngineError::InvalidTargetPrice(-5_000.0))
    );
    assert_eq!(
        max_unit_cost_for_target_price(0.0, 0.25),
        Err(EngineError::InvalidTargetPrice(0.0))
    );
}

#[test]
fn test_break_even_scenarios() {
    assert_eq!(break_even_quantity(100_000.0, 50.0, 30.0), Ok(5_000));
    assert!(matches!(
        break_even_quantity(100_000.0, 20.0, 30.0),
        Err(EngineError::NoBreakEven { .. })
    ));
}

#[test]
fn test_solver_prefers_buyer_target_price() {
    let items = vec![
        CostLineItem { kind: CostItemKind::Product, amount: 600_000.0 },
        CostLineItem { kind: CostItemKind::Packing, amount: 20_000.0 },
        CostLineItem { kind: CostItemKind::InlandOrigin, amount: 80_000.0 },
    ];
    let allocation = allocate(&items, TradeTerm::Fob);
    let currency = CurrencyContext::new("KRW", 1_400.0);

    let economics = UnitEconomicsSolver::solve(&EconomicsInputs {
        allocation: &allocation,
        quantity: 10,
        variable_cost_per_unit: 62_000.0,
        target_margin_rate: 0.25,
        buyer_target_price: Some(84_000.0),
        currency: &currency,
    })
    .unwrap();

    assert_approx(economics.unit_cost, 70_000.0, "单件成本");
    assert_approx(economics.unit_sell_price, 84_000.0, "按买方目标价");
    assert_approx(economics.margin_amount, 14_000.0, "单件毛利");
    assert_approx(economics.unit_sell_price_usd, 60.0, "美元售价");
    // 固定 80,000 / (84,000 - 62,000) → 4
    assert_eq!(economics.break_even_quantity, Some(4));
}
