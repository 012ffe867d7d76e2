use rapporto::{RapportoError, RatioRequest};
use rapporto_demos::common::build_rapporto;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rapporto = build_rapporto()?;

    // Requests arrive as JSON from the presentation layer.
    let body = r#"{
        "range_tag": "1 month",
        "interval": "4h",
        "exchange": "binance",
        "symbol_a": "BNBUSDT",
        "symbol_b": "ETHUSDT"
    }"#;
    let req: RatioRequest = serde_json::from_str(body)?;

    let mut report = rapporto.run(&req).await?;
    let total = report.series.len();
    report.series.truncate(3);
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("({total} points in full)");

    // Errors serialize too, with a machine-readable kind next to the message.
    let bad: RatioRequest = serde_json::from_str(
        r#"{"range_tag":"1 month","interval":"4h","exchange":"kraken","symbol_a":"BNBUSDT","symbol_b":"ETHUSDT"}"#,
    )?;
    if let Err(e) = rapporto.run(&bad).await {
        print_error(&e)?;
    }

    Ok(())
}

fn print_error(e: &RapportoError) -> Result<(), serde_json::Error> {
    println!("error ({:?}): {e}", e.kind());
    println!("{}", serde_json::to_string(e)?);
    Ok(())
}
