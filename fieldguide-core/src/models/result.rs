//! The uniform result shape returned by the service façade.

use serde::{Deserialize, Serialize};

/// Outcome of a façade operation.
///
/// `success == false` always carries a human-readable `error` suitable for
/// direct display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainResult<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> DomainResult<T> {
    /// Creates a successful result.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failed result with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Returns the error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the error message when the operation failed or when a
    /// success carries no payload.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}

impl DomainResult<()> {
    /// Creates a successful result with no payload.
    pub fn done() -> Self {
        Self::ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_message() {
        let result: DomainResult<i64> = DomainResult::failure("No active session");
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("No active session"));
        assert_eq!(result.into_result(), Err("No active session".to_string()));
    }

    #[test]
    fn test_ok_serializes_without_error() {
        let json = serde_json::to_value(DomainResult::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_done_into_result() {
        assert_eq!(DomainResult::done().into_result(), Ok(()));
    }
}
