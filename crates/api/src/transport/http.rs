use async_trait::async_trait;
use paygate_types::{Configuration, GatewayError, RawResponse};
use reqwest::{Client, header, multipart::Form};
use serde_json::Value;
use tracing::debug;

use super::{PreparedRequest, RequestBody, Transport};

/// [`Transport`] backed by `reqwest`.
///
/// The client refuses plain-text URLs, keeps reqwest's certificate
/// verification on, and keeps no idle connections, so every call opens a
/// fresh connection.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Configuration) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .https_only(true)
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .user_agent(config.user_agent())
            .build()
            .map_err(|error| GatewayError::transport(format!("build http client: {error}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, GatewayError> {
        let PreparedRequest {
            method,
            url,
            mut headers,
            body,
        } = request;

        let builder = match body {
            RequestBody::Empty => self.http.request(method, url).headers(headers),
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|error| GatewayError::transport(format!("encode body: {error}")))?;
                self.http.request(method, url).headers(headers).body(bytes)
            }
            RequestBody::Multipart(fields) => {
                // reqwest writes its own content type carrying the boundary.
                headers.remove(header::CONTENT_TYPE);
                let form = fields.into_iter().fold(Form::new(), |form, (name, value)| {
                    let text = match value {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    form.text(name, text)
                });
                self.http.request(method, url).headers(headers).multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|error| GatewayError::transport(format!("Network error: {error}")))?;

        let status = response.status().as_u16();
        let mut raw = RawResponse::new(status, Vec::<u8>::new());
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            raw.headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        raw.body = response
            .bytes()
            .await
            .map_err(|error| GatewayError::transport(format!("read body: {error}")))?
            .to_vec();

        debug!(status, body_len = raw.body.len(), "transport response received");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_types::Provider;
    use reqwest::{Method, Url, header::HeaderMap};

    #[tokio::test]
    async fn plain_http_urls_are_refused_before_connecting() {
        let config = Configuration::builder(Provider::Bluesnap)
            .basic("merchant", "secret")
            .build()
            .expect("config");
        let transport = ReqwestTransport::new(&config).expect("transport");
        let request = PreparedRequest {
            method: Method::GET,
            url: Url::parse("http://127.0.0.1:9/services/2/report/AccountBalance").expect("url"),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        };

        let error = transport.execute(request).await.expect_err("https only");
        assert!(matches!(error, GatewayError::Transport { .. }));
    }
}
