use finreport::{Server, ServerConfig};
use finreport_demos::common::{init_tracing, mock_reporter, server_addr};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info
    init_tracing();

    let addr = server_addr();
    let server = Server::bind(addr.as_str(), mock_reporter()?, ServerConfig::default()).await?;
    println!("Serving mock reports on {} (Ctrl-C to stop)", server.local_addr()?);

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
