use thiserror::Error;

/// Failure taxonomy shared by the orchestrator, the responder and the
/// repositories.
///
/// The `Display` text carries full detail and is meant for server-side logs.
/// What a client gets to see is [`DomainError::public_message`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("No rooms available")]
    NoAvailability,

    #[error("Availability backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Malformed availability response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Errors caused by the caller (reported with their specific message).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::NotFound { .. } | Self::NoAvailability
        )
    }

    /// Message safe to put in a client-visible payload.
    ///
    /// Store, decode and backend failures collapse to generic text; their
    /// detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::NoAvailability => "No rooms available".to_string(),
            Self::BackendUnavailable(_) => "Availability service unavailable".to_string(),
            Self::Decode(_) => "Invalid response from availability service".to_string(),
            Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Store(format!("Database error: {}", e))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_detail_never_reaches_public_message() {
        let err = DomainError::Store(
            "Database error: near \"SELEC\": syntax error in SELECT room_id FROM availability"
                .into(),
        );
        assert!(!err.is_client_error());
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("SELECT room_id"));
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = DomainError::InvalidRequest("roomType is required".into());
        assert!(err.is_client_error());
        assert_eq!(err.public_message(), "roomType is required");

        assert_eq!(DomainError::NoAvailability.public_message(), "No rooms available");
        assert_eq!(
            DomainError::not_found("Reservation", 7).public_message(),
            "Reservation not found"
        );
    }

    #[test]
    fn backend_and_decode_are_server_side() {
        assert!(!DomainError::BackendUnavailable("connect refused".into()).is_client_error());
        assert!(!DomainError::Decode("missing rooms".into()).is_client_error());
    }
}
