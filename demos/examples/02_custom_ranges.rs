use rapporto::{CalendarOffset, RangeTable, Rapporto, RatioRequest};
use rapporto_demos::common::{get_providers, pair};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A presentation layer can offer its own range labels.
    let ranges = RangeTable::empty()
        .with_entry("48 hours", CalendarOffset::Hours(48))
        .with_entry("Quarter", CalendarOffset::Months(3))
        .with_entry("Decade", CalendarOffset::Years(10));

    let rapporto = get_providers()
        .into_iter()
        .fold(Rapporto::builder(), |b, p| b.with_provider(p))
        .ranges(ranges)
        .fetch_timeout(std::time::Duration::from_secs(20))
        .build()?;

    println!("Exchanges: {}", rapporto.exchanges().join(", "));
    println!("Ranges:    {}", rapporto.range_tags().collect::<Vec<_>>().join(", "));
    let intervals: Vec<&str> = rapporto
        .supported_intervals("gateio")?
        .iter()
        .map(|i| i.code())
        .collect();
    println!("gateio intervals: {}", intervals.join(" "));

    let exchange = "gateio";
    let req = RatioRequest::new(
        "48 hours",
        "1h",
        exchange,
        pair(exchange, "SOL", "USDT"),
        pair(exchange, "ETH", "USDT"),
    );
    let report = rapporto.run(&req).await?;
    println!(
        "{}/{} hourly over 48 hours: {} points",
        report.symbol_a,
        report.symbol_b,
        report.series.len()
    );
    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        println!("first {} = {:.6}", first.ts, first.ratio);
        println!("last  {} = {:.6}", last.ts, last.ratio);
    }

    // Tags the table does not know fail loudly.
    let bad = RatioRequest::new("1 fortnight", "1h", exchange, &req.symbol_a, &req.symbol_b);
    match rapporto.run(&bad).await {
        Err(e) => println!("expected failure: {e}"),
        Ok(_) => println!("unexpected success"),
    }

    Ok(())
}
