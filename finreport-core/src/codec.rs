//! Frame layout: a 4-byte big-endian unsigned body length, then exactly that
//! many bytes of UTF-8 JSON.
//!
//! Readers never assume one `read` returns a whole frame; they loop until the
//! declared number of bytes has arrived or the peer closes the stream.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use finreport_types::{FrameError, ReportError, WireConfig};

/// Width of the length prefix in bytes.
pub const HEADER_LEN: usize = 4;

fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

fn check_len(len: u64, cfg: &WireConfig) -> Result<u32, FrameError> {
    let max = u64::from(cfg.max_frame_len);
    if len > max {
        return Err(FrameError::Oversized { len, max });
    }
    u32::try_from(len).map_err(|_| FrameError::Oversized { len, max })
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, FrameError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| FrameError::Malformed(format!("body is not valid UTF-8: {e}")))?;
    serde_json::from_str(text).map_err(|e| FrameError::Malformed(e.to_string()))
}

/// Encode a message into a single frame.
///
/// # Errors
/// Returns `FrameError::Oversized` if the JSON body exceeds `cfg.max_frame_len`,
/// or `FrameError::Malformed` if the message cannot be serialized.
pub fn encode<T: Serialize + ?Sized>(msg: &T, cfg: &WireConfig) -> Result<Vec<u8>, FrameError> {
    let body = serde_json::to_vec(msg).map_err(|e| FrameError::Malformed(e.to_string()))?;
    let len = check_len(to_u64(body.len()), cfg)?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode exactly one frame held in `bytes`.
///
/// # Errors
/// - `Truncated` if `bytes` ends before the prefix or the declared body does.
/// - `Oversized` if the prefix declares more than `cfg.max_frame_len` bytes.
/// - `Malformed` if bytes trail the frame or the body is not valid UTF-8/JSON.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], cfg: &WireConfig) -> Result<T, FrameError> {
    let Some((header, body)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(FrameError::Truncated {
            expected: to_u64(HEADER_LEN),
            received: to_u64(bytes.len()),
        });
    };
    let len = check_len(u64::from(u32::from_be_bytes(*header)), cfg)?;
    let received = to_u64(body.len());
    match received.cmp(&u64::from(len)) {
        core::cmp::Ordering::Less => Err(FrameError::Truncated {
            expected: u64::from(len),
            received,
        }),
        core::cmp::Ordering::Greater => Err(FrameError::Malformed(format!(
            "{} trailing bytes after frame",
            received - u64::from(len)
        ))),
        core::cmp::Ordering::Equal => decode_body(body),
    }
}

/// Read one frame from `reader`.
///
/// Returns `Ok(None)` if the stream ends cleanly before the first prefix byte,
/// which is how a peer that simply disconnects between messages looks.
///
/// # Errors
/// - `ReportError::Frame` for oversized, truncated or malformed frames.
/// - `ReportError::Transport` if the underlying stream fails.
pub async fn read_frame<R, T>(reader: &mut R, cfg: &WireConfig) -> Result<Option<T>, ReportError>
where
    R: AsyncRead + Unpin + ?Sized,
    T: DeserializeOwned,
{
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = reader.read(&mut header[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(FrameError::Truncated {
                expected: to_u64(HEADER_LEN),
                received: to_u64(filled),
            }
            .into());
        }
        filled += n;
    }

    let len = match check_len(u64::from(u32::from_be_bytes(header)), cfg) {
        Ok(len) => len,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %e, "rejecting frame before allocating body");
            return Err(e.into());
        }
    };

    let mut body = vec![0u8; usize::try_from(len).map_err(|_| FrameError::Oversized {
        len: u64::from(len),
        max: u64::from(cfg.max_frame_len),
    })?];
    let mut received = 0;
    while received < body.len() {
        let n = reader.read(&mut body[received..]).await?;
        if n == 0 {
            return Err(FrameError::Truncated {
                expected: u64::from(len),
                received: to_u64(received),
            }
            .into());
        }
        received += n;
    }

    Ok(Some(decode_body(&body)?))
}

/// Encode `msg` and write it to `writer` as one frame, then flush.
///
/// # Errors
/// - `ReportError::Frame` if the message cannot be encoded within limits.
/// - `ReportError::Transport` if the underlying stream fails.
pub async fn write_frame<W, T>(writer: &mut W, msg: &T, cfg: &WireConfig) -> Result<(), ReportError>
where
    W: AsyncWrite + Unpin + ?Sized,
    T: Serialize + ?Sized,
{
    let bytes = encode(msg, cfg)?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finreport_types::Command;

    fn frame(body: &[u8]) -> Vec<u8> {
        let mut out = u32::try_from(body.len()).unwrap().to_be_bytes().to_vec();
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn encode_prefixes_big_endian_length() {
        let bytes = encode(&Command::Exit, &WireConfig::default()).unwrap();
        let body = br#"{"cmd":"exit"}"#;
        assert_eq!(&bytes[..HEADER_LEN], &[0, 0, 0, 14]);
        assert_eq!(&bytes[HEADER_LEN..], body);
    }

    #[test]
    fn encode_rejects_body_above_limit() {
        let cfg = WireConfig { max_frame_len: 8 };
        let err = encode(&Command::fetch("AAPL"), &cfg).unwrap_err();
        assert!(matches!(err, FrameError::Oversized { max: 8, .. }));
    }

    #[test]
    fn decode_reports_truncation_and_trailing_bytes() {
        let cfg = WireConfig::default();
        let full = frame(br#"{"cmd":"exit"}"#);

        let err = decode::<Command>(&full[..2], &cfg).unwrap_err();
        assert_eq!(
            err,
            FrameError::Truncated {
                expected: 4,
                received: 2
            }
        );

        let err = decode::<Command>(&full[..full.len() - 1], &cfg).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { expected: 14, received: 13 }));

        let mut trailing = full.clone();
        trailing.push(b' ');
        assert!(matches!(
            decode::<Command>(&trailing, &cfg),
            Err(FrameError::Malformed(_))
        ));
    }

    #[test]
    fn decode_rejects_invalid_utf8_and_json() {
        let cfg = WireConfig::default();
        let bad_utf8 = frame(&[0xff, 0xfe, 0xfd]);
        assert!(matches!(
            decode::<Command>(&bad_utf8, &cfg),
            Err(FrameError::Malformed(_))
        ));
        let bad_json = frame(br#"{"cmd":"launch"}"#);
        assert!(matches!(
            decode::<Command>(&bad_json, &cfg),
            Err(FrameError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn read_frame_reassembles_chunked_reads() {
        let body = br#"{"cmd":"fetch","ticker":"AAPL"}"#;
        let bytes = frame(body);
        let mut reader = tokio_test::io::Builder::new()
            .read(&bytes[..1])
            .read(&bytes[1..3])
            .read(&bytes[3..10])
            .read(&bytes[10..])
            .build();
        let cmd: Option<Command> = read_frame(&mut reader, &WireConfig::default())
            .await
            .unwrap();
        assert_eq!(cmd, Some(Command::fetch("AAPL")));
    }

    #[tokio::test]
    async fn read_frame_returns_none_on_clean_eof() {
        let mut reader = tokio_test::io::Builder::new().build();
        let cmd: Option<Command> = read_frame(&mut reader, &WireConfig::default())
            .await
            .unwrap();
        assert!(cmd.is_none());
    }

    #[tokio::test]
    async fn read_frame_rejects_oversized_prefix_before_body() {
        let cfg = WireConfig { max_frame_len: 1024 };
        let mut reader = tokio_test::io::Builder::new()
            .read(&(1024u32 + 1).to_be_bytes())
            .build();
        let err = read_frame::<_, Command>(&mut reader, &cfg)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Frame(FrameError::Oversized {
                len: 1025,
                max: 1024
            })
        ));
    }

    #[tokio::test]
    async fn read_frame_reports_eof_inside_frame() {
        let bytes = frame(br#"{"cmd":"exit"}"#);
        let mut reader = tokio_test::io::Builder::new().read(&bytes[..8]).build();
        let err = read_frame::<_, Command>(&mut reader, &WireConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Frame(FrameError::Truncated {
                expected: 14,
                received: 4
            })
        ));

        let mut reader = tokio_test::io::Builder::new().read(&bytes[..3]).build();
        let err = read_frame::<_, Command>(&mut reader, &WireConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Frame(FrameError::Truncated { expected: 4, received: 3 })
        ));
    }

    #[tokio::test]
    async fn read_frame_surfaces_transport_errors() {
        let mut reader = tokio_test::io::Builder::new()
            .read_error(std::io::Error::from(std::io::ErrorKind::ConnectionReset))
            .build();
        let err = read_frame::<_, Command>(&mut reader, &WireConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Transport(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn write_then_read_over_duplex() {
        let (mut a, mut b) = tokio::io::duplex(16);
        let cfg = WireConfig::default();
        let writer = tokio::spawn(async move {
            write_frame(&mut a, &Command::fetch("MSFT"), &cfg).await.unwrap();
            write_frame(&mut a, &Command::Exit, &cfg).await.unwrap();
        });
        let first: Option<Command> = read_frame(&mut b, &cfg).await.unwrap();
        let second: Option<Command> = read_frame(&mut b, &cfg).await.unwrap();
        writer.await.unwrap();
        let third: Option<Command> = read_frame(&mut b, &cfg).await.unwrap();
        assert_eq!(first, Some(Command::fetch("MSFT")));
        assert_eq!(second, Some(Command::Exit));
        assert_eq!(third, None);
    }
}
