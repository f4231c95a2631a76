use finreport_core::{
    ClientConfig, Command, Report, ReportError, Response, WireConfig, read_frame, write_frame,
};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

/// One client session with a report server.
///
/// Requests are strictly sequential. A server-side error (`Response::Error`)
/// is returned as [`ReportError::Remote`] and the session stays usable; any
/// framing or transport failure ends the session, after which every call
/// returns [`ReportError::SessionClosed`]. There is no automatic reconnect.
pub struct ReportClient<S = TcpStream> {
    stream: Option<S>,
    wire: WireConfig,
}

impl ReportClient<TcpStream> {
    /// Connect to a report server.
    ///
    /// # Errors
    /// Returns `ReportError::Connection` if the connection cannot be
    /// established within `cfg.connect_timeout`.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "finreport::client::connect", skip(addr, cfg)))]
    pub async fn connect(addr: impl ToSocketAddrs, cfg: ClientConfig) -> Result<Self, ReportError> {
        let stream = tokio::time::timeout(cfg.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| ReportError::connection("connect timed out"))?
            .map_err(ReportError::connection)?;
        Ok(Self::from_stream(stream, cfg.wire))
    }
}

impl<S> ReportClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Run a session over an already-connected byte stream.
    pub const fn from_stream(stream: S, wire: WireConfig) -> Self {
        Self {
            stream: Some(stream),
            wire,
        }
    }

    /// Returns `true` until a fatal error or [`exit`](Self::exit) ends the session.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Request the report for `ticker` and wait for the answer.
    ///
    /// # Errors
    /// - `Remote` when the server answers with an error (session continues).
    /// - `Connection` on a framing or transport failure (session ends).
    /// - `SessionClosed` if the session has already ended.
    pub async fn fetch(&mut self, ticker: &str) -> Result<Report, ReportError> {
        let stream = self.stream.as_mut().ok_or(ReportError::SessionClosed)?;
        match exchange(stream, &Command::fetch(ticker), &self.wire).await {
            Ok(Response::Ok(report)) => Ok(report),
            Ok(Response::Error { message }) => Err(ReportError::remote(message)),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "client session lost");
                self.stream = None;
                Err(match e {
                    ReportError::Connection(_) => e,
                    other => ReportError::connection(other),
                })
            }
        }
    }

    /// Send `Exit` and close the session.
    ///
    /// # Errors
    /// Returns `Connection` if the command cannot be delivered and
    /// `SessionClosed` if the session had already ended.
    pub async fn exit(mut self) -> Result<(), ReportError> {
        let mut stream = self.stream.take().ok_or(ReportError::SessionClosed)?;
        write_frame(&mut stream, &Command::Exit, &self.wire)
            .await
            .map_err(ReportError::connection)?;
        // the server closes its side on Exit; a failed shutdown changes nothing
        let _ = stream.shutdown().await;
        Ok(())
    }
}

async fn exchange<S>(stream: &mut S, cmd: &Command, wire: &WireConfig) -> Result<Response, ReportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    write_frame(stream, cmd, wire).await?;
    read_frame(stream, wire)
        .await?
        .ok_or_else(|| ReportError::connection("server closed the connection"))
}
