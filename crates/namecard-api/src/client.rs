// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Namecard contact backend.
//!
//! Provides [`HttpGateway`], the [`ContactGateway`] implementation that
//! talks to the real backend. Session credentials are cookie-based and
//! carried by the client's cookie store; no token is managed here.
//!
//! Every call is a single attempt: extraction and persistence are
//! user-triggered, low-stakes actions and the surrounding pipeline reports
//! failure for an explicit user retry instead of retrying silently.

use std::time::Duration;

use async_trait::async_trait;
use namecard_config::model::ApiConfig;
use namecard_core::types::{Contact, ExtractOutcome, UsageSnapshot, UserProfile};
use namecard_core::{ContactGateway, NamecardError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::types::{ApiErrorBody, ExtractTextRequest, SuccessResponse};

/// HTTP gateway to the contact backend.
///
/// Holds a cookie store so the backend session survives across calls
/// within one client lifetime.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, NamecardError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NamecardError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The backend base URL this gateway talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a transport-level failure into the gateway error taxonomy.
    fn transport_err(e: reqwest::Error) -> NamecardError {
        NamecardError::Gateway {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }

    /// Check the response status: 401 is the distinct session-expiry
    /// signal, any other non-2xx becomes a gateway error carrying the
    /// backend's `detail` when one is present.
    async fn check_status(response: Response) -> Result<Response, NamecardError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(NamecardError::Unauthorized);
        }
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => format!("backend returned {status}: {}", err.detail),
            Err(_) => format!("backend returned {status}"),
        };
        Err(NamecardError::Gateway {
            message,
            source: None,
        })
    }

    /// Decode a JSON body, mapping parse failures into gateway errors.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, NamecardError> {
        let body = response.text().await.map_err(Self::transport_err)?;
        serde_json::from_str(&body).map_err(|e| NamecardError::Gateway {
            message: format!("failed to parse backend response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Expect a `{ "success": true }` envelope.
    async fn expect_success(response: Response) -> Result<(), NamecardError> {
        let envelope: SuccessResponse = Self::decode(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(NamecardError::Gateway {
                message: "backend declined the request".into(),
                source: None,
            })
        }
    }
}

#[async_trait]
impl ContactGateway for HttpGateway {
    async fn extract_from_image(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<ExtractOutcome, NamecardError> {
        debug!(filename, bytes = image.len(), "submitting image for extraction");

        let part = reqwest::multipart::Part::bytes(image).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.url("/api/extract-contact"))
            .multipart(form)
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn extract_from_text(&self, text: &str) -> Result<ExtractOutcome, NamecardError> {
        debug!(chars = text.len(), "submitting text for extraction");

        let response = self
            .client
            .post(self.url("/api/extract-contact"))
            .json(&ExtractTextRequest { text })
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn append_contact(&self, contact: &Contact) -> Result<(), NamecardError> {
        debug!(contact_id = %contact.id, "appending contact");

        let response = self
            .client
            .post(self.url("/api/append-contact"))
            .json(contact)
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::expect_success(response).await
    }

    async fn update_contact(
        &self,
        id: &str,
        contact: &Contact,
    ) -> Result<Contact, NamecardError> {
        debug!(contact_id = id, "updating contact");

        let response = self
            .client
            .put(self.url(&format!("/api/contacts/{id}")))
            .json(contact)
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), NamecardError> {
        debug!(contact_id = id, "deleting contact");

        let response = self
            .client
            .delete(self.url(&format!("/api/contacts/{id}")))
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::expect_success(response).await
    }

    async fn list_contacts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Contact>, NamecardError> {
        let mut request = self.client.get(self.url("/api/contacts"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await.map_err(Self::transport_err)?;
        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn current_user(&self) -> Result<UserProfile, NamecardError> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn scan_usage(&self) -> Result<UsageSnapshot, NamecardError> {
        let response = self
            .client
            .get(self.url("/api/user/scan-usage"))
            .send()
            .await
            .map_err(Self::transport_err)?;

        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    async fn logout(&self) -> Result<(), NamecardError> {
        let response = self
            .client
            .get(self.url("/auth/logout"))
            .send()
            .await
            .map_err(Self::transport_err)?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_gateway(base_url: &str) -> HttpGateway {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        HttpGateway::new(&config).unwrap()
    }

    fn contact_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "company": "Acme Corp",
            "email": "jane@acme.test",
            "createdAt": "2026-08-01T10:00:00Z"
        })
    }

    fn sample_contact() -> Contact {
        serde_json::from_value(contact_json("c-1", "Jane Smith")).unwrap()
    }

    #[tokio::test]
    async fn extract_from_text_posts_json_and_parses_outcome() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/extract-contact"))
            .and(body_json(serde_json::json!({"text": "Jane Smith, Acme"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contact": contact_json("c-1", "Jane Smith"),
                "autoSaved": true
            })))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let outcome = gateway.extract_from_text("Jane Smith, Acme").await.unwrap();
        assert_eq!(outcome.contact.name, "Jane Smith");
        assert!(outcome.auto_saved);
    }

    #[tokio::test]
    async fn extract_from_image_sends_multipart() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/extract-contact"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contact": contact_json("c-2", "Card Person"),
                "autoSaved": false
            })))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let outcome = gateway
            .extract_from_image(vec![0xFF, 0xD8, 0xFF], "card.jpg")
            .await
            .unwrap();
        assert_eq!(outcome.contact.id, "c-2");
        assert!(!outcome.auto_saved);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_distinct_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let err = gateway.current_user().await.unwrap_err();
        assert!(err.is_unauthorized(), "got: {err}");
    }

    #[tokio::test]
    async fn backend_detail_is_surfaced_in_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/append-contact"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "detail": "sheet write failed"
            })))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let err = gateway.append_contact(&sample_contact()).await.unwrap_err();
        assert!(err.to_string().contains("sheet write failed"), "got: {err}");
    }

    #[tokio::test]
    async fn append_success_false_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/append-contact"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": false})),
            )
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        assert!(gateway.append_contact(&sample_contact()).await.is_err());
    }

    #[tokio::test]
    async fn list_contacts_carries_pagination_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .and(query_param("limit", "25"))
            .and(query_param("offset", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contact_json("c-1", "Jane Smith"),
                contact_json("c-2", "John Doe"),
            ])))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let contacts = gateway.list_contacts(Some(25), Some(50)).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].name, "John Doe");
    }

    #[tokio::test]
    async fn update_returns_canonical_contact() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/contacts/c-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(contact_json("c-1", "Jane Q. Smith")),
            )
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let updated = gateway
            .update_contact("c-1", &sample_contact())
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane Q. Smith");
    }

    #[tokio::test]
    async fn scan_usage_parses_counters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/user/scan-usage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "scansUsed": 9,
                "contactsSaved": 4,
                "isPremium": false
            })))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let usage = gateway.scan_usage().await.unwrap();
        assert_eq!(usage.scans_used, 9);
        assert_eq!(usage.contacts_saved, 4);
        assert!(!usage.is_premium);
    }

    #[tokio::test]
    async fn transient_failure_is_not_retried() {
        let server = MockServer::start().await;

        // Exactly one request: the gateway's single-attempt contract.
        Mock::given(method("POST"))
            .and(path("/api/extract-contact"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let err = gateway.extract_from_text("anything").await.unwrap_err();
        assert!(!err.is_unauthorized());
        server.verify().await;
    }
}
