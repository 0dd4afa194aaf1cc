//! Catalog provider backed by the WeWantWaste `skips/by-location` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use skiphire_core::{
    model::{CatalogQuery, RawSkip},
    ports::{CatalogError, CatalogPort},
};

/// Production API root.
pub const BASE_URL: &str = "https://app.wewantwaste.co.uk/api";

const USER_AGENT: &str = concat!("skiphire/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by the provider.
///
/// `timeout` bounds the whole request; `None` waits as long as the server does.
///
/// # Errors
///
/// Returns a [`reqwest::Error`] when the TLS backend cannot be initialised.
pub fn http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Catalog backend for WeWantWaste.
pub struct WeWantWastePort {
    client: Client,
    base_url: String,
}

impl WeWantWastePort {
    /// Create a port talking to the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a port talking to another API root, e.g. a staging host.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }
}

#[async_trait]
impl CatalogPort for WeWantWastePort {
    fn name(&self) -> &str {
        "wewantwaste"
    }

    async fn raw_catalog(&self, query: &CatalogQuery) -> Result<Vec<RawSkip>, CatalogError> {
        let req = self
            .client
            .get(format!("{}/skips/by-location", self.base_url))
            .query(&[
                ("postcode", query.postcode.trim()),
                ("area", query.area.trim()),
            ]);

        fetch_json(req).await
    }
}

// Sends the request, maps non-success statuses, and decodes the body.
async fn fetch_json(req: RequestBuilder) -> Result<Vec<RawSkip>, CatalogError> {
    let resp = req.send().await?;
    let status = resp.status();
    debug!(%status, url = %resp.url(), "catalog response");

    if !status.is_success() {
        warn!(%status, "catalog request rejected");
        return Err(CatalogError::Status {
            status: status.as_u16(),
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    const CATALOG: &str = r#"[
        {"id":17933,"size":4,"hire_period_days":14,"transport_cost":null,"per_tonne_cost":null,
         "price_before_vat":278,"vat":20,"postcode":"NR32","area":"","forbidden":false,
         "created_at":"2025-04-03T13:51:46.897146","updated_at":"2025-04-07T13:16:52.813",
         "allowed_on_road":true,"allows_heavy_waste":true},
        {"id":17934,"size":6,"hire_period_days":14,"transport_cost":null,"per_tonne_cost":null,
         "price_before_vat":305,"vat":20,"postcode":"NR32","area":"","forbidden":false,
         "created_at":"2025-04-03T13:51:46.897146","updated_at":"2025-04-07T13:16:52.813",
         "allowed_on_road":true,"allows_heavy_waste":true}
    ]"#;

    /// Accept one connection, answer with `status` and `body`, and hand back the request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let head = read_head(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.expect("shutdown");
            head
        });
        (format!("http://{addr}/api"), handle)
    }

    async fn read_head(socket: &mut TcpStream) -> String {
        let mut head = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !head.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut chunk).await.expect("read");
            if read == 0 {
                break;
            }
            head.extend_from_slice(chunk.get(..read).expect("read within buffer"));
        }
        String::from_utf8(head).expect("utf-8 request head")
    }

    fn port(base_url: &str) -> WeWantWastePort {
        let client = http_client(None).expect("client");
        WeWantWastePort::with_base_url(client, base_url)
    }

    fn query() -> CatalogQuery {
        CatalogQuery::new("NR32", "Lowestoft")
    }

    #[tokio::test]
    async fn decodes_catalog_and_sends_location() {
        let (base_url, server) = serve_once("200 OK", CATALOG).await;

        let records = port(&base_url).raw_catalog(&query()).await.expect("catalog");

        let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, [17_933, 17_934]);

        let head = server.await.expect("server task");
        let request_line = head.lines().next().expect("request line");
        assert_eq!(
            request_line,
            "GET /api/skips/by-location?postcode=NR32&area=Lowestoft HTTP/1.1"
        );
        assert!(head.contains("user-agent: skiphire/"), "missing user agent in:\n{head}");
    }

    #[tokio::test]
    async fn empty_array_is_empty_catalog() {
        let (base_url, _server) = serve_once("200 OK", "[]").await;
        let records = port(&base_url).raw_catalog(&query()).await.expect("catalog");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let (base_url, _server) =
            serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;

        let err = port(&base_url)
            .raw_catalog(&query())
            .await
            .expect_err("500 must fail");

        assert!(matches!(err, CatalogError::Status { status: 500 }), "{err:?}");
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn not_found_carries_status() {
        let (base_url, _server) = serve_once("404 Not Found", "").await;
        let err = port(&base_url)
            .raw_catalog(&query())
            .await
            .expect_err("404 must fail");
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn record_missing_price_fails_the_batch() {
        let (base_url, _server) = serve_once(
            "200 OK",
            r#"[{"id":1,"size":4,"hire_period_days":14,"vat":20,"allowed_on_road":true,"allows_heavy_waste":true}]"#,
        )
        .await;

        let err = port(&base_url)
            .raw_catalog(&query())
            .await
            .expect_err("missing price must fail");

        assert!(matches!(err, CatalogError::Decode(_)), "{err:?}");
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr: SocketAddr = listener.local_addr().expect("local addr");
        drop(listener);

        let err = port(&format!("http://{addr}/api"))
            .raw_catalog(&query())
            .await
            .expect_err("closed port must fail");

        assert!(matches!(err, CatalogError::Network(_)), "{err:?}");
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn configured_timeout_aborts_slow_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept");
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = http_client(Some(Duration::from_millis(200))).expect("client");
        let err = WeWantWastePort::with_base_url(client, format!("http://{addr}/api"))
            .raw_catalog(&query())
            .await
            .expect_err("slow server must time out");

        match err {
            CatalogError::Network(inner) => assert!(inner.is_timeout(), "{inner:?}"),
            other => panic!("expected a network timeout, got {other:?}"),
        }
        server.abort();
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = http_client(None).expect("client");
        let port = WeWantWastePort::with_base_url(client, "https://example.test/api/");
        assert_eq!(port.base_url, "https://example.test/api");
    }
}
