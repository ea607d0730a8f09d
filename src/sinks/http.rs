//! HTTP remote sink
//!
//! Sends the nested JSON payload to a configured endpoint as an HTTP/1.1
//! POST over a plain TCP connection. Any response, regardless of status
//! code, counts as success; only transport failures are errors. Delivery is
//! never retried and has no timeout.

use super::Sink;
use crate::core::{LoggerConfig, LoggerError, Payload, Result, Severity};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[derive(Debug, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
    path: String,
}

impl Endpoint {
    fn host_header(&self) -> String {
        if self.port == 80 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Posts payloads to the endpoint currently configured on the logger.
/// With no endpoint configured, delivery is a silent no-op.
pub struct HttpSink {
    config: Arc<RwLock<LoggerConfig>>,
}

impl HttpSink {
    pub fn new(config: Arc<RwLock<LoggerConfig>>) -> Self {
        Self { config }
    }

    fn parse_endpoint(url: &str) -> Result<Endpoint> {
        let rest = url.strip_prefix("http://").ok_or_else(|| {
            LoggerError::endpoint(url, "only http:// endpoints are supported")
        })?;

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        if authority.is_empty() {
            return Err(LoggerError::endpoint(url, "missing host"));
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    LoggerError::endpoint(url, format!("invalid port '{}'", port))
                })?;
                (host, port)
            }
            None => (authority, 80),
        };

        Ok(Endpoint {
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    async fn post(&self, endpoint: &Endpoint, body: &[u8]) -> Result<()> {
        let mut stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await?;

        let request = format!(
            "POST {} HTTP/1.1\r\n\
             Host: {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            endpoint.path,
            endpoint.host_header(),
            body.len()
        );

        stream.write_all(request.as_bytes()).await?;
        stream.write_all(body).await?;
        stream.flush().await?;

        // Drain the response; the status code is deliberately ignored.
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await?;

        Ok(())
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn deliver(&self, _level: Severity, payload: &Payload) -> Result<()> {
        let endpoint_url = { self.config.read().remote_endpoint.clone() };
        let Some(url) = endpoint_url else {
            // No endpoint configured: no network call, no error.
            return Ok(());
        };

        let endpoint = Self::parse_endpoint(&url)?;
        let body = serde_json::to_vec(payload)?;
        self.post(&endpoint, &body).await
    }

    fn name(&self) -> &str {
        "http-remote"
    }
}
