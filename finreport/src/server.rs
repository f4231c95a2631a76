use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use finreport_core::{
    Command, FrameError, ReportError, Response, ServerConfig, WireConfig, read_frame, write_frame,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::core::Reporter;

// pause after a failed accept (e.g. EMFILE) before trying again
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server answering report requests, one task per connection.
///
/// Sessions share nothing but the [`Reporter`]; a failing session never
/// affects the listener or other sessions.
pub struct Server {
    listener: TcpListener,
    reporter: Arc<Reporter>,
    cfg: ServerConfig,
}

impl Server {
    /// Bind a listener on `addr`.
    ///
    /// # Errors
    /// Returns `ReportError::Transport` if the address cannot be bound.
    pub async fn bind(
        addr: impl ToSocketAddrs,
        reporter: Arc<Reporter>,
        cfg: ServerConfig,
    ) -> Result<Self, ReportError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            reporter,
            cfg,
        })
    }

    /// The bound address; useful after binding port 0.
    ///
    /// # Errors
    /// Returns `ReportError::Transport` if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr, ReportError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process ends.
    ///
    /// # Errors
    /// Currently never returns an error; the signature leaves room for fatal
    /// listener failures.
    pub async fn run(self) -> Result<(), ReportError> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Sessions already running are left to finish on their own.
    ///
    /// # Errors
    /// Currently never returns an error.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ReportError>
    where
        F: Future<Output = ()>,
    {
        #[cfg(feature = "tracing")]
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(%addr, "report server listening");
        }
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    #[cfg(feature = "tracing")]
                    tracing::info!("report server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(%peer, "connection accepted");
                        #[cfg(not(feature = "tracing"))]
                        let _ = peer;
                        let reporter = Arc::clone(&self.reporter);
                        let wire = self.cfg.wire;
                        tokio::spawn(async move {
                            match serve_session(stream, &reporter, &wire).await {
                                Ok(()) => {
                                    #[cfg(feature = "tracing")]
                                    tracing::info!(%peer, "connection closed");
                                }
                                Err(_e) => {
                                    #[cfg(feature = "tracing")]
                                    tracing::warn!(%peer, error = %_e, "session terminated");
                                }
                            }
                        });
                    }
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::error!(error = %_e, "accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }
    }
}

/// Run one session over any byte stream until the peer sends `Exit` or
/// closes the connection.
///
/// Requests are answered strictly in order. Validation and source failures
/// travel back as `Response::Error` and the session continues.
///
/// # Errors
/// Returns the frame or transport error that ended the session. A response
/// too large to frame is replaced by an error response instead.
pub async fn serve_session<S>(
    mut stream: S,
    reporter: &Reporter,
    wire: &WireConfig,
) -> Result<(), ReportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let Some(cmd) = read_frame::<_, Command>(&mut stream, wire).await? else {
            return Ok(());
        };
        match cmd {
            Command::Exit => return Ok(()),
            Command::Fetch { ticker } => {
                let resp = reporter.build_report(&ticker).await;
                match write_frame(&mut stream, &resp, wire).await {
                    Ok(()) => {}
                    // nothing was written yet, so the session can still answer
                    Err(ReportError::Frame(e @ FrameError::Oversized { .. })) => {
                        let fallback = Response::error(format!("report for {ticker} too large: {e}"));
                        write_frame(&mut stream, &fallback, wire).await?;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }
}
