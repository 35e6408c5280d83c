//! SOAP client for the availability backend
//!
//! `POST {endpoint}` with a `checkAvailability` envelope, one attempt per
//! call, bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::application::ports::AvailabilityGateway;
use crate::config::BackendConfig;
use crate::domain::availability::{AvailabilityQuery, AvailabilityResponse};
use crate::domain::{DomainError, DomainResult};
use crate::support::soap_envelope::{self, SoapCodecError, SOAP_CONTENT_TYPE};
use crate::support::wsdl::CHECK_AVAILABILITY_ACTION;

pub struct SoapAvailabilityClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SoapAvailabilityClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::BackendUnavailable(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> DomainResult<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

/// Map a reply body to a result, given whether the HTTP status was a success.
///
/// A fault is the backend refusing or failing, so it counts as unavailable
/// whatever the status. A non-success status without a readable envelope is
/// likewise a backend problem. Only a success status with an unreadable body
/// is a decode error.
fn interpret_reply(success: bool, body: &str) -> DomainResult<AvailabilityResponse> {
    match soap_envelope::decode_response(body) {
        Ok(response) if success => Ok(response),
        Ok(_) => Err(DomainError::BackendUnavailable(
            "non-success status with a regular response body".into(),
        )),
        Err(SoapCodecError::Fault(fault)) => Err(DomainError::BackendUnavailable(fault.to_string())),
        Err(e) if success => Err(DomainError::Decode(e.to_string())),
        Err(e) => Err(DomainError::BackendUnavailable(e.to_string())),
    }
}

#[async_trait]
impl AvailabilityGateway for SoapAvailabilityClient {
    async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> DomainResult<AvailabilityResponse> {
        let envelope = soap_envelope::encode_request(query)
            .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;

        debug!(endpoint = %self.endpoint, room_type = query.room_type(), "Calling checkAvailability");
        let started = std::time::Instant::now();

        let reply = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", CHECK_AVAILABILITY_ACTION)
            .body(envelope)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, "Availability backend unreachable: {}", e);
                DomainError::BackendUnavailable(e.to_string())
            })?;

        let status = reply.status();
        let body = reply
            .text()
            .await
            .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;

        metrics::histogram!("availability_backend_latency_seconds")
            .record(started.elapsed().as_secs_f64());

        let result = interpret_reply(status.is_success(), &body);
        if let Err(e) = &result {
            warn!(endpoint = %self.endpoint, %status, "checkAvailability failed: {}", e);
        }
        result
    }
}
