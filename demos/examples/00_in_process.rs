use finreport::{ClientConfig, ReportClient, Server, ServerConfig, annotate};
use finreport_demos::common::{init_tracing, mock_reporter};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,finreport=debug
    init_tracing();

    // 1. Serve from the fixture sources on an ephemeral port.
    let server = Server::bind("127.0.0.1:0", mock_reporter()?, ServerConfig::default()).await?;
    let addr = server.local_addr()?;
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let serving = tokio::spawn(server.run_until(async move {
        let _ = stop_rx.await;
    }));

    // 2. One session: a good ticker, a forced failure, then Exit.
    let mut client = ReportClient::connect(addr, ClientConfig::default()).await?;
    let report = client.fetch("AAPL").await?;
    println!(
        "AAPL: {} closes, {} summary rows, {} news, {} annotated days",
        report.quotes.len(),
        report.summary.len(),
        report.news.len(),
        annotate(&report).len()
    );
    match client.fetch("FAIL").await {
        Err(e) => println!("FAIL: {e}"),
        Ok(_) => println!("FAIL: unexpectedly succeeded"),
    }
    client.exit().await?;

    // 3. Stop accepting and wait for the accept loop to finish.
    let _ = stop_tx.send(());
    serving.await??;
    Ok(())
}
