//! SOAP 1.1 envelope codec for the `checkAvailability` operation
//!
//! Both directions of the document-literal contract live here:
//!
//! - **Request**  `Envelope/Body/avail:checkAvailability{startDate, endDate, roomType}`
//! - **Response** `Envelope/Body/tns:checkAvailabilityResponse/rooms/room*{room_id, room_type, available_date, status}`
//! - **Fault**    `Envelope/Body/Fault{faultcode, faultstring}`
//!
//! Encoding goes through `quick_xml::Writer`, so every substituted value is
//! escaped. Decoding matches envelope and operation elements by namespace URI,
//! never by prefix, and turns the `room` list into a `Vec` whatever its
//! length.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use super::xml_tree::XmlElement;
use crate::domain::availability::{
    AvailabilityQuery, AvailabilityResponse, CheckAvailabilityRequest, RoomAvailability,
    DATE_FORMAT,
};

// ── Namespaces ─────────────────────────────────────────────────

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const AVAILABILITY_NS: &str = "http://example.com/availability";

/// Content type for both directions
pub const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

const REQUEST_ELEMENT: &str = "checkAvailability";
const RESPONSE_ELEMENT: &str = "checkAvailabilityResponse";

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoapCodecError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Document is not a SOAP envelope (root: {0})")]
    NotAnEnvelope(String),

    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("Unsupported operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("{0}")]
    Fault(SoapFault),

    #[error("Failed to write envelope: {0}")]
    Encode(String),
}

// ── Fault ──────────────────────────────────────────────────────

/// Who is to blame for a fault (SOAP 1.1 `faultcode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// The request was wrong (missing field, unknown operation, bad XML)
    Client,
    /// The responder failed to process a valid request
    Server,
}

impl FaultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "soap:Client",
            Self::Server => "soap:Server",
        }
    }
}

/// A decoded SOAP fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOAP fault {}: {}", self.code, self.message)
    }
}

// ── Encoding ───────────────────────────────────────────────────

type XmlWriter = Writer<Vec<u8>>;

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), SoapCodecError> {
    writer
        .write_event(event)
        .map_err(|e| SoapCodecError::Encode(e.to_string()))
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), SoapCodecError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

/// Writes `<{env}:Envelope ...><{env}:Body>`, runs `body`, then closes both.
fn write_envelope<F>(
    env_prefix: &str,
    op_prefix: &str,
    with_header: bool,
    body: F,
) -> Result<String, SoapCodecError>
where
    F: FnOnce(&mut XmlWriter) -> Result<(), SoapCodecError>,
{
    let envelope = format!("{}:Envelope", env_prefix);
    let header = format!("{}:Header", env_prefix);
    let body_name = format!("{}:Body", env_prefix);
    let env_xmlns = format!("xmlns:{}", env_prefix);
    let op_xmlns = format!("xmlns:{}", op_prefix);

    let mut writer = Writer::new(Vec::new());
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(
        &mut writer,
        Event::Start(BytesStart::new(envelope.as_str()).with_attributes([
            (env_xmlns.as_str(), SOAP_ENV_NS),
            (op_xmlns.as_str(), AVAILABILITY_NS),
        ])),
    )?;
    if with_header {
        write(&mut writer, Event::Empty(BytesStart::new(header.as_str())))?;
    }
    write(&mut writer, Event::Start(BytesStart::new(body_name.as_str())))?;
    body(&mut writer)?;
    write(&mut writer, Event::End(BytesEnd::new(body_name.as_str())))?;
    write(&mut writer, Event::End(BytesEnd::new(envelope.as_str())))?;

    String::from_utf8(writer.into_inner()).map_err(|e| SoapCodecError::Encode(e.to_string()))
}

/// Encode a `checkAvailability` request envelope.
///
/// Children are written in schema order: `startDate`, `endDate`, `roomType`.
pub fn encode_request(query: &AvailabilityQuery) -> Result<String, SoapCodecError> {
    let start = query.start_date().format(DATE_FORMAT).to_string();
    let end = query.end_date().format(DATE_FORMAT).to_string();

    write_envelope("soapenv", "avail", true, |w| {
        write(w, Event::Start(BytesStart::new("avail:checkAvailability")))?;
        write_text_element(w, "avail:startDate", &start)?;
        write_text_element(w, "avail:endDate", &end)?;
        write_text_element(w, "avail:roomType", query.room_type())?;
        write(w, Event::End(BytesEnd::new("avail:checkAvailability")))
    })
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-06-02T00:00:00.000Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Encode a `checkAvailabilityResponse` envelope.
///
/// An empty response is written as `<rooms/>`: the collection is present
/// but holds no `room`.
pub fn encode_response(response: &AvailabilityResponse) -> Result<String, SoapCodecError> {
    write_envelope("soap", "tns", false, |w| {
        write(w, Event::Start(BytesStart::new("tns:checkAvailabilityResponse")))?;
        if response.is_empty() {
            write(w, Event::Empty(BytesStart::new("rooms")))?;
        } else {
            write(w, Event::Start(BytesStart::new("rooms")))?;
            for room in response.rooms() {
                write(w, Event::Start(BytesStart::new("room")))?;
                write_text_element(w, "room_id", &room.room_id.to_string())?;
                write_text_element(w, "room_type", &room.room_type)?;
                write_text_element(w, "available_date", &format_timestamp(&room.available_date))?;
                write_text_element(w, "status", &room.status)?;
                write(w, Event::End(BytesEnd::new("room")))?;
            }
            write(w, Event::End(BytesEnd::new("rooms")))?;
        }
        write(w, Event::End(BytesEnd::new("tns:checkAvailabilityResponse")))
    })
}

/// Encode a SOAP 1.1 fault envelope
pub fn encode_fault(code: FaultCode, message: &str) -> Result<String, SoapCodecError> {
    write_envelope("soap", "tns", false, |w| {
        write(w, Event::Start(BytesStart::new("soap:Fault")))?;
        write_text_element(w, "faultcode", code.as_str())?;
        write_text_element(w, "faultstring", message)?;
        write(w, Event::End(BytesEnd::new("soap:Fault")))
    })
}

// ── Decoding ───────────────────────────────────────────────────

/// Parse a document and return its SOAP `Body`.
///
/// A `Fault` inside the body is reported as [`SoapCodecError::Fault`].
fn open_body(xml: &str) -> Result<XmlElement, SoapCodecError> {
    let root = XmlElement::parse(xml).map_err(|e| SoapCodecError::Malformed(e.to_string()))?;
    if !root.is(SOAP_ENV_NS, "Envelope") {
        return Err(SoapCodecError::NotAnEnvelope(root.name));
    }

    let mut root = root;
    let index = root
        .children
        .iter()
        .position(|c| c.is(SOAP_ENV_NS, "Body"))
        .ok_or(SoapCodecError::MissingElement("Body"))?;
    let body = root.children.swap_remove(index);

    if let Some(fault) = body.child_ns(SOAP_ENV_NS, "Fault") {
        return Err(SoapCodecError::Fault(SoapFault {
            code: fault.child_text("faultcode").unwrap_or_default().to_string(),
            message: fault.child_text("faultstring").unwrap_or_default().to_string(),
        }));
    }
    Ok(body)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Decode a `checkAvailability` request envelope.
///
/// Missing or empty fields come back as `None`; deciding whether that is
/// acceptable is up to the responder.
pub fn decode_request(xml: &str) -> Result<CheckAvailabilityRequest, SoapCodecError> {
    let body = open_body(xml)?;
    let operation = match body.child_ns(AVAILABILITY_NS, REQUEST_ELEMENT) {
        Some(op) => op,
        None => {
            return Err(match body.children.first() {
                Some(other) => SoapCodecError::UnknownOperation(other.name.clone()),
                None => SoapCodecError::MissingElement(REQUEST_ELEMENT),
            })
        }
    };

    Ok(CheckAvailabilityRequest {
        start_date: non_empty(operation.child_text("startDate")),
        end_date: non_empty(operation.child_text("endDate")),
        room_type: non_empty(operation.child_text("roomType")),
    })
}

fn required_text<'a>(room: &'a XmlElement, field: &'static str) -> Result<&'a str, SoapCodecError> {
    room.child_text(field)
        .ok_or(SoapCodecError::MissingElement(field))
}

fn decode_room(room: &XmlElement) -> Result<RoomAvailability, SoapCodecError> {
    let raw_id = required_text(room, "room_id")?;
    let room_id = raw_id.parse::<i32>().map_err(|_| SoapCodecError::InvalidValue {
        field: "room_id",
        value: raw_id.to_string(),
    })?;

    let raw_date = required_text(room, "available_date")?;
    let available_date = DateTime::parse_from_rfc3339(raw_date)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SoapCodecError::InvalidValue {
            field: "available_date",
            value: raw_date.to_string(),
        })?;

    Ok(RoomAvailability {
        room_id,
        room_type: required_text(room, "room_type")?.to_string(),
        available_date,
        status: required_text(room, "status")?.to_string(),
    })
}

/// Decode a `checkAvailabilityResponse` envelope.
///
/// Zero, one or many `room` elements all produce a sequence; a missing
/// `rooms` wrapper is treated as zero rooms.
pub fn decode_response(xml: &str) -> Result<AvailabilityResponse, SoapCodecError> {
    let body = open_body(xml)?;
    let response = body
        .child_ns(AVAILABILITY_NS, RESPONSE_ELEMENT)
        .ok_or(SoapCodecError::MissingElement(RESPONSE_ELEMENT))?;

    let rooms = match response.child("rooms") {
        Some(rooms) => rooms
            .children_named("room")
            .map(decode_room)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(AvailabilityResponse::new(rooms))
}

// ── Tests ──────────────────────────────────────────────────────
