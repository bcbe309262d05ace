//! Low-level HTTP client: `SmjHttp`.
//!
//! One method per service operation, one request per call. Returns raw JSON;
//! decoding into wire types happens in the sub-clients. `SmjClient` wraps this.

use crate::auth::{CredentialTransport, Credentials};
use crate::error::HttpError;
use crate::network::{LOGIN_OPTION, PRICE_LIST_OPTION};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Low-level HTTP client for the SMJ REST API.
#[derive(Clone)]
pub struct SmjHttp {
    base_url: String,
    client: Client,
}

impl SmjHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>?option=<option>`, or `&option=` if the base already has a query.
    pub fn endpoint(&self, option: &str) -> String {
        let sep = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}option={}",
            self.base_url,
            sep,
            urlencoding::encode(option)
        )
    }

    // ── Prices ───────────────────────────────────────────────────────────

    pub async fn price_list_today(&self) -> Result<serde_json::Value, HttpError> {
        let url = self.endpoint(PRICE_LIST_OPTION);
        self.get_json(&url).await
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    /// Submit credentials.
    pub async fn login(
        &self,
        credentials: &Credentials,
        transport: CredentialTransport,
    ) -> Result<serde_json::Value, HttpError> {
        let fields = format!(
            "mobileNumber={}&password={}",
            urlencoding::encode(&credentials.mobile_number),
            urlencoding::encode(&credentials.password)
        );
        let url = self.endpoint(LOGIN_OPTION);

        let req = match transport {
            CredentialTransport::FormBody => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(fields),
            CredentialTransport::Query => self.client.get(format!("{}&{}", url, fields)),
        };
        self.send(req).await
    }

    // ── Generic ──────────────────────────────────────────────────────────

    /// One GET, parsed as JSON.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        self.send(self.client.get(url)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// Send and parse. The service puts JSON answers (rejections included)
    /// behind any status code, so the body decides: a JSON body is returned
    /// whatever the status, and the status only classifies bodies that do not
    /// parse.
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, HttpError> {
        let resp = req.send().await.map_err(classify)?;
        let status = resp.status();
        let body = resp.text().await.map_err(classify)?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    tracing::debug!(status = status.as_u16(), "JSON body on error status");
                }
                Ok(parsed)
            }
            Err(e) if status.is_success() => Err(HttpError::Decode(e.to_string())),
            Err(_) => Err(status_error(status, body)),
        }
    }
}

fn status_error(status: StatusCode, body: String) -> HttpError {
    match status.as_u16() {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        400..=499 => HttpError::BadRequest(body),
        code => HttpError::ServerError { status: code, body },
    }
}

/// reqwest errors carry the request URL, which for the query transport holds
/// the password. Strip it before the error can reach a log line.
fn classify(e: reqwest::Error) -> HttpError {
    let e = e.without_url();
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_decode() {
        HttpError::Decode(e.to_string())
    } else {
        HttpError::Reqwest(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_server::serve_once;

    fn http(base: &str) -> SmjHttp {
        SmjHttp::new(base, Duration::from_secs(5)).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::new("9876543210", "p&ss=w+ord x")
    }

    #[test]
    fn test_endpoint_appends_option() {
        let h = http("https://example.com/RestApi/restApiPHP.php");
        assert_eq!(
            h.endpoint(PRICE_LIST_OPTION),
            "https://example.com/RestApi/restApiPHP.php?option=PriceListToday"
        );
    }

    #[test]
    fn test_endpoint_respects_existing_query() {
        let h = http("https://example.com/api.php?v=2");
        assert_eq!(
            h.endpoint(LOGIN_OPTION),
            "https://example.com/api.php?v=2&option=LoginVerifyCustomer"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(http("https://example.com/").base_url(), "https://example.com");
    }

    #[tokio::test]
    async fn test_form_body_login_request() {
        let (base, server) = serve_once("200 OK", r#"{"success":true}"#).await;

        let body = http(&base)
            .login(&credentials(), CredentialTransport::FormBody)
            .await
            .unwrap();
        assert_eq!(body["success"], true);

        let request = server.await.unwrap();
        assert!(
            request.starts_with("POST /api.php?option=LoginVerifyCustomer HTTP/1.1\r\n"),
            "{request}"
        );
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("\r\n\r\nmobileNumber=9876543210&password=p%26ss%3Dw%2Bord%20x"));
    }

    #[tokio::test]
    async fn test_query_login_request() {
        let (base, server) = serve_once("200 OK", r#"{"status":"success"}"#).await;

        http(&base)
            .login(&credentials(), CredentialTransport::Query)
            .await
            .unwrap();

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap_or_default();
        assert_eq!(
            request_line,
            "GET /api.php?option=LoginVerifyCustomer&mobileNumber=9876543210\
             &password=p%26ss%3Dw%2Bord%20x HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_json_body_on_error_status_is_returned() {
        let (base, _server) =
            serve_once("401 Unauthorized", r#"{"status":"fail","message":"bad password"}"#).await;

        let body = http(&base)
            .login(&credentials(), CredentialTransport::Query)
            .await
            .unwrap();
        assert_eq!(body["message"], "bad password");
    }

    #[tokio::test]
    async fn test_price_body_on_server_error_is_returned() {
        let (base, _server) =
            serve_once("500 Internal Server Error", r#"{"1gramPrice":"6543.21"}"#).await;

        let body = http(&base).price_list_today().await.unwrap();
        assert_eq!(body["1gramPrice"], "6543.21");
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = http(&base).price_list_today().await.unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_non_json_error_status_is_classified() {
        let (base, _server) = serve_once("503 Service Unavailable", "try later").await;

        let err = http(&base).price_list_today().await.unwrap_err();
        assert!(
            matches!(err, HttpError::ServerError { status: 503, ref body } if body == "try later"),
            "{err:?}"
        );
    }
}
