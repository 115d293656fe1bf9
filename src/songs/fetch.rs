use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::emitter::Emitter;
use crate::error::FetchError;
use crate::songs::{Song, SongsEvent};

pub const SONGS_PATH: &str = "/getSongs";

/// Seam for the single outbound GET.
#[async_trait]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<String, FetchError>;
}

pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn parse(base: &str) -> Result<Self, FetchError> {
        Ok(Self::new(Url::parse(base)?))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = self.base.join(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

pub fn parse_songs(body: &str) -> Result<Vec<Song>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Requests the song list once and, if it arrives intact, emits exactly one
/// replace. On failure nothing is emitted and the error is returned for the
/// caller to report. No retry.
pub async fn load_remote_list<T>(
    transport: &T,
    emitter: Emitter<SongsEvent>,
) -> Result<usize, FetchError>
where
    T: Transport + ?Sized,
{
    let songs = match transport.get(SONGS_PATH).await.and_then(|body| parse_songs(&body)) {
        Ok(songs) => songs,
        Err(err) => {
            warn!(%err, "song list not loaded");
            return Err(err);
        }
    };
    let count = songs.len();
    debug!(count, "songs loaded");
    emitter.emit(SongsEvent::ReplaceSongs(songs));
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Answers a single request with `status` and `body`, returning the
    /// transport's base url and the request line it received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base, handle)
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, server) = serve_once("404 Not Found", "nope");
        let transport = HttpTransport::parse(&base).unwrap();
        let result = transport.get(SONGS_PATH).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404 })));
        assert_eq!(server.join().unwrap(), "GET /getSongs HTTP/1.1");
    }

    #[tokio::test]
    async fn success_returns_body() {
        let body = r#"[{"artist":"A","title":"T1"}]"#;
        let (base, server) = serve_once("200 OK", body);
        let transport = HttpTransport::parse(&base).unwrap();
        let fetched = transport.get(SONGS_PATH).await.unwrap();
        assert_eq!(fetched, body);
        assert_eq!(parse_songs(&fetched).unwrap(), vec![Song::new("A", "T1")]);
        server.join().unwrap();
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let songs =
            parse_songs(r#"[{"artist":"A","title":"T1","year":1999}]"#).unwrap();
        assert_eq!(songs, vec![Song::new("A", "T1")]);
    }

    #[test]
    fn parse_rejects_non_list() {
        assert!(matches!(
            parse_songs(r#"{"artist":"A","title":"T1"}"#),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn path_joins_onto_base() {
        let transport = HttpTransport::parse("http://localhost:3000/app/").unwrap();
        assert_eq!(
            transport.base().join(SONGS_PATH).unwrap().as_str(),
            "http://localhost:3000/getSongs"
        );
    }
}
