use finreport::{ClientConfig, ReportClient, ReportError, annotate, unmatched};
use finreport_demos::common::{init_tracing, server_addr};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut tickers: Vec<String> = std::env::args().skip(1).collect();
    if tickers.is_empty() {
        tickers.push("AAPL".to_string());
    }

    let addr = server_addr();
    println!("Connecting to {addr}...");
    let mut client = ReportClient::connect(addr.as_str(), ClientConfig::default()).await?;

    for ticker in &tickers {
        let report = match client.fetch(ticker).await {
            Ok(r) => r,
            // the server answered; keep the session going
            Err(ReportError::Remote { message }) => {
                println!("{ticker}: {message}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!("\n=== {ticker} ===");
        if let Some(pct) = report.quotes.change_pct() {
            println!("Change over period: {pct:+.2}%");
        }
        for row in report.summary.rows() {
            println!("{:<24} {:>12}  {}", row.label, row.value, row.description);
        }

        println!("\nNews on trading days:");
        for point in annotate(&report) {
            for item in &point.news {
                println!("  {} @ {:.2}  {}", point.point.date, point.point.price, item.title);
            }
        }
        let off_days = unmatched(&report.quotes, &report.news);
        if !off_days.is_empty() {
            println!("News on non-trading days:");
            for item in off_days {
                println!("  {}  {}", item.date, item.title);
            }
        }

        println!("\nAll news ({}):", report.news.len());
        for item in &report.news {
            println!("  {}  {}  <{}>", item.date, item.title, item.link);
        }
    }

    client.exit().await?;
    Ok(())
}
