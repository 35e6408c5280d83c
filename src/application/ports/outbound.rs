//! Outbound ports: calls the broker makes to other services
//!
//! [`AvailabilityGateway`] is how the reservation orchestrator reaches the
//! availability backend. The production implementation is the SOAP client in
//! [`crate::infrastructure::soap_client`]; tests plug in fakes.

use async_trait::async_trait;

use crate::domain::availability::{AvailabilityQuery, AvailabilityResponse};
use crate::domain::DomainResult;

#[async_trait]
pub trait AvailabilityGateway: Send + Sync {
    /// Ask the backend which rooms of `query.room_type()` are free in the
    /// range. Rooms come back in backend order.
    ///
    /// Transport failures and faults map to `BackendUnavailable`, unreadable
    /// replies to `Decode`.
    async fn check_availability(&self, query: &AvailabilityQuery)
        -> DomainResult<AvailabilityResponse>;
}
