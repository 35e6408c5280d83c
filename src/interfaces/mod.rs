//! Inbound adapters: the REST front door and the SOAP responder endpoint

pub mod http;
pub mod soap;
