use futures::future::join_all;
use rapporto::RatioRequest;
use rapporto_demos::common::{build_rapporto, pair};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rapporto = build_rapporto()?;

    // Each request runs the pipeline once; independent requests can run side by side.
    let pairs = [("ETH", "BTC"), ("SOL", "ETH"), ("BNB", "BTC")];
    let requests: Vec<RatioRequest> = ["binance", "gateio"]
        .iter()
        .flat_map(|ex| {
            pairs.iter().map(move |(a, b)| {
                RatioRequest::new("6 months", "1d", *ex, pair(ex, a, "USDT"), pair(ex, b, "USDT"))
            })
        })
        .collect();

    let results = join_all(requests.iter().map(|r| rapporto.run(r))).await;

    println!("{:<8} | {:<20} | {:>8} | {:>14}", "Exchange", "Pair", "Points", "Latest");
    println!("{:-<9}|{:-<22}|{:-<10}|{:-<15}", "", "", "", "");
    for (req, res) in requests.iter().zip(results) {
        let label = format!("{}/{}", req.symbol_a, req.symbol_b);
        match res {
            Ok(report) => {
                let latest = report
                    .series
                    .last()
                    .map(|p| format!("{:.6}", p.ratio))
                    .unwrap_or_default();
                println!(
                    "{:<8} | {:<20} | {:>8} | {:>14}",
                    report.exchange,
                    label,
                    report.series.len(),
                    latest
                );
            }
            Err(e) => println!("{:<8} | {:<20} | error: {e}", req.exchange, label),
        }
    }

    Ok(())
}
