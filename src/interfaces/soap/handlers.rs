//! SOAP endpoint of the availability responder
//!
//! `POST /wsdl` takes a `checkAvailability` envelope; `GET /wsdl` returns
//! the service description. Faults use HTTP 500 as SOAP 1.1 requires.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error, warn};

use crate::application::AvailabilityResponder;
use crate::domain::DomainError;
use crate::support::soap_envelope::{self, FaultCode, SOAP_CONTENT_TYPE};

#[derive(Clone)]
pub struct SoapState {
    pub responder: Arc<AvailabilityResponder>,
    /// Rendered once at startup with the public endpoint address
    pub wsdl: Arc<str>,
}

/// Last resort when even the fault cannot be serialized
const FALLBACK_FAULT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
    "<soap:Body><soap:Fault><faultcode>soap:Server</faultcode>",
    "<faultstring>Internal server error</faultstring></soap:Fault></soap:Body></soap:Envelope>"
);

fn fault(code: FaultCode, message: &str) -> (StatusCode, String) {
    let body = soap_envelope::encode_fault(code, message).unwrap_or_else(|e| {
        error!("Failed to encode SOAP fault: {}", e);
        FALLBACK_FAULT.to_string()
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Run one SOAP call end to end: decode, answer, encode.
pub async fn dispatch(responder: &AvailabilityResponder, body: &str) -> (StatusCode, String) {
    let request = match soap_envelope::decode_request(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected SOAP request: {}", e);
            return fault(FaultCode::Client, &e.to_string());
        }
    };
    debug!(?request, "checkAvailability");

    let response = match responder.handle(request).await {
        Ok(response) => response,
        Err(DomainError::InvalidRequest(message)) => return fault(FaultCode::Client, &message),
        Err(e) => {
            error!("checkAvailability failed: {}", e);
            return fault(FaultCode::Server, &e.public_message());
        }
    };

    match soap_envelope::encode_response(&response) {
        Ok(xml) => (StatusCode::OK, xml),
        Err(e) => {
            error!("Failed to encode checkAvailability response: {}", e);
            fault(FaultCode::Server, "Internal server error")
        }
    }
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)], body).into_response()
}

/// `POST /wsdl`
pub async fn soap_endpoint(State(state): State<SoapState>, body: Bytes) -> Response {
    let (status, xml) = match std::str::from_utf8(&body) {
        Ok(text) => dispatch(&state.responder, text).await,
        Err(e) => {
            warn!("Rejected SOAP request: body is not UTF-8 ({})", e);
            fault(FaultCode::Client, "Request body is not valid UTF-8")
        }
    };
    xml_response(status, xml)
}

/// `GET /wsdl` (also answers `GET /wsdl?wsdl`)
pub async fn wsdl_document(State(state): State<SoapState>) -> Response {
    xml_response(StatusCode::OK, state.wsdl.to_string())
}
