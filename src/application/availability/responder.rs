//! Availability responder service
//!
//! Backend side of `checkAvailability`: validate the request, read the
//! availability table, hand rows back in store order.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::availability::{AvailabilityQuery, AvailabilityResponse, CheckAvailabilityRequest};
use crate::domain::{DomainResult, RepositoryProvider};

pub struct AvailabilityResponder {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityResponder {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Answer a decoded `checkAvailability` call.
    ///
    /// Missing or malformed fields fail with `InvalidRequest` before the
    /// store is touched. No match is an empty response, not an error.
    pub async fn handle(&self, request: CheckAvailabilityRequest) -> DomainResult<AvailabilityResponse> {
        let query = AvailabilityQuery::try_from(request)?;
        self.check(&query).await
    }

    pub async fn check(&self, query: &AvailabilityQuery) -> DomainResult<AvailabilityResponse> {
        let rooms = self
            .repos
            .availability()
            .find_available(query)
            .await
            .map_err(|e| {
                error!(room_type = query.room_type(), "Availability lookup failed: {}", e);
                e
            })?;

        debug!(
            room_type = query.room_type(),
            start = %query.start_date(),
            end = %query.end_date(),
            matches = rooms.len(),
            "Availability checked"
        );
        metrics::counter!("availability_checks_total").increment(1);

        Ok(AvailabilityResponse::new(rooms))
    }
}
