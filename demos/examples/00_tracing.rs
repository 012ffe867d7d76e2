use rapporto::RatioRequest;
use rapporto_demos::common::{build_rapporto, pair};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,rapporto=trace,rapporto_binance=debug,rapporto_middleware=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let rapporto = build_rapporto()?;

    let req = RatioRequest::new(
        "1 week",
        "1h",
        "binance",
        pair("binance", "ETH", "USDT"),
        pair("binance", "BTC", "USDT"),
    );
    let report = rapporto.run(&req).await?;
    tracing::info!(points = report.series.len(), excluded = report.excluded, "done");

    Ok(())
}
