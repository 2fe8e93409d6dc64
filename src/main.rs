// ==========================================
// 出口物流报价系统 - 命令行入口
// ==========================================
// 用法:
//   export-quote <product_id> <quantity> <packing> <term> <destination> [market] [usd_rate]
// 例如:
//   export-quote module_shelf_9in1 500 modular CIF japan 1.2 1460
// 输出: { summary: 取整摘要, document: 报价单全精度 } JSON (stdout); 日志写 stderr
// ==========================================

use anyhow::{anyhow, bail, Context};
use export_pricing::api::{QuoteApi, QuoteRequest};
use export_pricing::config::ConfigManager;
use export_pricing::engine::UnavailableRateProvider;
use export_pricing::{logging, PackingMode, TradeTerm};
use std::sync::Arc;

const USAGE: &str =
    "用法: export-quote <product_id> <quantity> <packing> <term> <destination> [market] [usd_rate]";

fn parse_request(args: &[String]) -> anyhow::Result<QuoteRequest> {
    if args.len() < 5 || args.len() > 7 {
        bail!("参数个数错误\n{}", USAGE);
    }

    let quantity: i64 = args[1]
        .trim()
        .parse()
        .with_context(|| format!("数量无法解析: {}", args[1]))?;
    let packing_mode: PackingMode = args[2].parse().map_err(|e: String| anyhow!(e))?;
    let trade_term: TradeTerm = args[3].parse().map_err(|e: String| anyhow!(e))?;

    let mut request = QuoteRequest::new(&args[0], &args[4], quantity, packing_mode, trade_term);

    if let Some(raw) = args.get(5) {
        let market: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("市场系数无法解析: {}", raw))?;
        request.market_condition = Some(market);
    }
    if let Some(raw) = args.get(6) {
        let rate: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("汇率无法解析: {}", raw))?;
        request.usd_rate = Some(rate);
    }

    Ok(request)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let config = ConfigManager::load_default().context("配置加载失败")?;
    if let Some(path) = config.source() {
        tracing::info!(path = %path.display(), "使用配置文件");
    }

    // 命令行模式不接在线汇率,未给出时使用配置回落值
    let api = QuoteApi::new(config, Arc::new(UnavailableRateProvider));
    let document = api.quote(&request)?;

    let output = serde_json::json!({
        "summary": document.summary(),
        "document": document,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
