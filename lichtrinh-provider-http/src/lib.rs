//! Backend implementation talking to the itinerary generation API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use lichtrinh_core::{
    model::{Itinerary, ItineraryId},
    ports::{ItineraryPort, PortError},
    request::GenerateItineraryRequest,
};

const API_VERSION: [&str; 2] = ["api", "v1"];

/// Itinerary backend reached over HTTP.
pub struct HttpItineraryPort {
    client: Client,
    base_url: String,
}

impl HttpItineraryPort {
    /// Create a port bound to `base_url`, e.g. `https://api.example.com`.
    ///
    /// An empty base URL is accepted; every call then fails with
    /// [`PortError::NotConfigured`] without touching the network.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PortError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(PortError::NotConfigured("API base URL is empty".to_owned()));
        }

        let mut url = Url::parse(base).map_err(|err| {
            PortError::NotConfigured(format!("invalid API base URL {base}: {err}"))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                PortError::NotConfigured(format!("API base URL {base} cannot have a path"))
            })?
            .pop_if_empty()
            .extend(API_VERSION)
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ItineraryPort for HttpItineraryPort {
    async fn generate(&self, request: &GenerateItineraryRequest) -> Result<Itinerary, PortError> {
        let url = self.endpoint(&["itineraries", "generate"])?;
        debug!(%url, "POST generate");
        let req = self.client.post(url).json(request);
        fetch_json(req).await
    }

    async fn itinerary(&self, id: &ItineraryId) -> Result<Itinerary, PortError> {
        let url = self.endpoint(&["itineraries", &id.0])?;
        debug!(%url, "GET itinerary");
        match fetch_json(self.client.get(url)).await {
            Err(PortError::Api { status: 404, .. }) => Err(PortError::NotFound(id.clone())),
            other => other,
        }
    }
}

/// Build a shared HTTP client with the given request timeout.
///
/// # Errors
///
/// Returns a [`PortError`] when the TLS backend cannot be initialised.
pub fn client(timeout: Duration) -> Result<Client, PortError> {
    Client::builder()
        .user_agent(concat!("lichtrinh/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(PortError::from)
}

/// Build the backend port for `base_url`.
#[must_use]
pub fn port(client: Client, base_url: impl Into<String>) -> Arc<dyn ItineraryPort> {
    Arc::new(HttpItineraryPort::new(client, base_url))
}

// Send, check the status and decode the JSON body.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let resp = req
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(PortError::from)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(api_error(status, body));
    }

    resp.json().await.map_err(PortError::from)
}

fn api_error(status: StatusCode, body: String) -> PortError {
    let body = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_owned()
    } else {
        body
    };
    PortError::Api {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;

    const SAMPLE_JSON: &str = include_str!("../../testdata/itinerary.json");

    /// Serve a single canned response and hand back the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut raw = Vec::new();
            let mut buf = [0_u8; 4096];
            loop {
                let read = socket.read(&mut buf).await.expect("read");
                if read == 0 {
                    break;
                }
                raw.extend_from_slice(buf.get(..read).expect("slice"));
                let text = String::from_utf8_lossy(&raw);
                if let Some((head, rest)) = text.split_once("\r\n\r\n") {
                    let length = head
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if rest.len() >= length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
            sender.send(String::from_utf8_lossy(&raw).into_owned()).ok();
        });

        (format!("http://{addr}"), receiver)
    }

    fn local_client() -> Client {
        Client::builder().no_proxy().build().expect("client")
    }

    fn request() -> GenerateItineraryRequest {
        GenerateItineraryRequest {
            destination_id: "ha-giang".to_owned(),
            departure_province_id: "ha-giang-city".to_owned(),
            num_days: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 11, 5).expect("date"),
            budget_amount: 6_000_000,
            pace: None,
            companion_codes: Some(vec!["friends".to_owned()]),
            vibe_codes: Some(vec!["foodie".to_owned()]),
            keep_same_accommodation: None,
        }
    }

    #[tokio::test]
    async fn generate_posts_json_and_decodes() {
        let (base, received) = serve_once("201 Created", SAMPLE_JSON).await;
        let port = HttpItineraryPort::new(local_client(), base);

        let itinerary = port.generate(&request()).await.expect("itinerary");
        assert_eq!(itinerary.id.0, "it-42");

        let raw = received.await.expect("request");
        assert!(raw.starts_with("POST /api/v1/itineraries/generate HTTP/1.1"));
        let (_, body) = raw.split_once("\r\n\r\n").expect("body");
        let json: serde_json::Value = serde_json::from_str(body).expect("json");
        assert_eq!(json["start_date"], "2026-11-05");
        assert_eq!(json["num_days"], 3);
    }

    #[tokio::test]
    async fn fetch_uses_id_path() {
        let (base, received) = serve_once("200 OK", SAMPLE_JSON).await;
        let port = HttpItineraryPort::new(local_client(), format!("{base}/"));

        let itinerary = port
            .itinerary(&ItineraryId("it-42".to_owned()))
            .await
            .expect("itinerary");
        assert_eq!(itinerary.days.len(), 3);

        let raw = received.await.expect("request");
        assert!(raw.starts_with("GET /api/v1/itineraries/it-42 HTTP/1.1"));
    }

    #[tokio::test]
    async fn missing_itinerary_is_not_found() {
        let (base, _received) = serve_once("404 Not Found", "").await;
        let port = HttpItineraryPort::new(local_client(), base);

        let err = port
            .itinerary(&ItineraryId("nope".to_owned()))
            .await
            .expect_err("not found");
        assert!(matches!(err, PortError::NotFound(ItineraryId(ref id)) if id == "nope"));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let (base, _received) =
            serve_once("500 Internal Server Error", "{\"detail\":\"boom\"}").await;
        let port = HttpItineraryPort::new(local_client(), base);

        let err = port.generate(&request()).await.expect_err("api error");
        assert_eq!(err.to_string(), "API error 500: {\"detail\":\"boom\"}");
    }

    #[tokio::test]
    async fn malformed_json_is_a_network_error() {
        let (base, _received) = serve_once("200 OK", "{\"id\":").await;
        let port = HttpItineraryPort::new(local_client(), base);

        let err = port
            .itinerary(&ItineraryId("it-42".to_owned()))
            .await
            .expect_err("decode error");
        assert!(matches!(err, PortError::Network(_)));
    }

    #[tokio::test]
    async fn empty_base_url_is_not_configured() {
        let port = HttpItineraryPort::new(local_client(), "");
        let err = port.generate(&request()).await.expect_err("not configured");
        assert!(matches!(err, PortError::NotConfigured(_)));
    }

    #[test]
    fn empty_error_body_uses_reason() {
        let err = api_error(StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");
    }
}
