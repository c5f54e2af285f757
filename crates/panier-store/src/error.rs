//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  READ side (load cart, load promo code)                                 │
//! │    missing / corrupt / unreadable ──► logged, empty state returned      │
//! │    (never reaches the caller)                                           │
//! │                                                                         │
//! │  WRITE side (save cart, save/clear promo code)                          │
//! │    io::Error ─────────► StoreError::Io                                  │
//! │    serde_json::Error ─► StoreError::Serialization                       │
//! │                                                                         │
//! │  INPUT side (add a product)                                             │
//! │    CoreError ─────────► StoreError::Core                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use panier_core::CoreError;
use thiserror::Error;

/// Persistence and use-case errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the backing storage failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The cart refused the change (invalid product, quantity overflow).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use panier_core::ValidationError;

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::from(ValidationError::Required {
            field: "id".to_string(),
        })
        .into();
        assert_eq!(err.to_string(), "Validation error: id is required");
    }

    #[test]
    fn test_io_error_message() {
        let err: StoreError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.to_string(), "Storage I/O failed: read-only");
    }
}
