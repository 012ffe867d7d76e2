use rapporto::RatioRequest;
use rapporto_demos::common::{build_rapporto, pair};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Register both exchanges (mock in CI when RAPPORTO_DEMOS_USE_MOCK is set).
    let rapporto = build_rapporto()?;

    // 2. Describe the request the way a UI would: range tag, interval, exchange, pair.
    let exchange = "binance";
    let req = RatioRequest::new(
        "3 months",
        "1d",
        exchange,
        pair(exchange, "ETH", "USDT"),
        pair(exchange, "BTC", "USDT"),
    );
    println!(
        "Computing {}/{} on {} ({}, {})...",
        req.symbol_a, req.symbol_b, req.exchange, req.range_tag, req.interval
    );

    // 3. Run the pipeline: resolve, fetch both sides, align, divide.
    let report = rapporto.run(&req).await?;

    // 4. Print a short summary and the most recent points.
    println!(
        "window {} .. {}",
        report.window.start().format("%Y-%m-%d"),
        report.window.end().format("%Y-%m-%d")
    );
    println!(
        "points: {} / {}, aligned: {}, plotted: {}, excluded: {}",
        report.points_a,
        report.points_b,
        report.aligned,
        report.series.len(),
        report.excluded
    );
    println!("\n{:<12} | {:>14}", "Date", "Ratio");
    println!("{:-<13}|{:-<15}", "", "");
    for p in report.series.iter().rev().take(5).rev() {
        println!("{:<12} | {:>14.6}", p.ts.format("%Y-%m-%d"), p.ratio);
    }

    Ok(())
}
