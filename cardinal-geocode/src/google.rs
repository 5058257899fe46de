use cardinal_logic::{Geocoder, Lookup, LookupError, prelude::*};
use log::debug;
use reqwest::{StatusCode, Url};

use crate::{config::GeocoderConfig, response::parse_response};

/// [Geocoder] backed by the Google Maps geocoding API
pub struct GoogleGeocoder {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Self::with_client(config, client)
    }

    /// Use a preconfigured client, the config's timeout is left to the caller
    pub fn with_client(config: GeocoderConfig, client: reqwest::Client) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid geocoding endpoint {}", config.endpoint))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
        })
    }

    fn request_url(&self, place_name: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", place_name)
            .append_pair("key", &self.api_key);
        url
    }
}

// Errors are stripped of their URL, it carries the API key
fn network_error(err: reqwest::Error) -> LookupError {
    LookupError::Network(err.without_url().to_string())
}

impl Geocoder for GoogleGeocoder {
    async fn lookup(&self, place_name: &str) -> Result<Lookup, LookupError> {
        debug!("Calling geocoding API for [{place_name}]");

        let resp = self
            .client
            .get(self.request_url(place_name))
            .send()
            .await
            .map_err(network_error)?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LookupError::Auth(format!("HTTP {}", resp.status())));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(LookupError::Quota(format!("HTTP {}", resp.status())));
            }
            status if !status.is_success() => {
                return Err(LookupError::Network(format!("HTTP {status}")));
            }
            _ => {}
        }

        let body = resp.bytes().await.map_err(network_error)?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardinal_logic::Coordinate;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    fn geocoder(endpoint: &str) -> GoogleGeocoder {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        GoogleGeocoder::with_client(
            GeocoderConfig::new("test-key").with_endpoint(endpoint),
            client,
        )
        .unwrap()
    }

    /// Serve exactly one canned HTTP response, returns the endpoint and the raw request
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0; 4096];
            let n = stream.read(&mut buf).await.unwrap();
            let resp = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        (format!("http://{addr}/maps/api/geocode/json"), handle)
    }

    #[test]
    fn builds_request_url() {
        let url =
            geocoder("https://example.com/geocode/json").request_url("Saint-Émilion, France");
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();

        assert_eq!(url.path(), "/geocode/json");
        assert_eq!(
            pairs,
            vec![
                ("address".to_string(), "Saint-Émilion, France".to_string()),
                ("key".to_string(), "test-key".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(GoogleGeocoder::new(GeocoderConfig::new("k").with_endpoint("not a url")).is_err());
    }

    #[tokio::test]
    async fn looks_up_over_http() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"results":[{"geometry":{"location":{"lat":45.764043,"lng":4.835659}}}],
                "status":"OK"}"#,
        )
        .await;

        let lookup = geocoder(&endpoint).lookup("Lyon").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(
            lookup,
            Lookup::Found(Coordinate::new(45.764043, 4.835659).unwrap())
        );
        assert!(request.starts_with("GET /maps/api/geocode/json?address=Lyon&key=test-key"));
    }

    #[tokio::test]
    async fn http_status_errors() {
        let (endpoint, server) = serve_once("403 Forbidden", "{}").await;
        let result = geocoder(&endpoint).lookup("Lyon").await;
        server.await.unwrap();
        assert!(matches!(result, Err(LookupError::Auth(_))));

        let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;
        let result = geocoder(&endpoint).lookup("Lyon").await;
        server.await.unwrap();
        assert!(matches!(result, Err(LookupError::Network(_))));
    }
}
