//! Shared error type across ZAK crates.

use thiserror::Error;

use crate::contract::kernel::KernelFailure;

/// Client-facing error classes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Internal or kernel-side failure.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ZakError>;

/// Unified error type used by core and gateway.
///
/// Every `BadRequest` variant carries "Invalid" in its message; nothing else
/// does. Callers surface the message verbatim in `{error}` bodies.
#[derive(Debug, Error)]
pub enum ZakError {
    #[error("Invalid monetary type: floats not permitted. Use string ('10.50') or integer minor units.")]
    InvalidMonetaryType,
    #[error("Invalid monetary format: string must be numeric decimal.")]
    InvalidMonetaryFormat,
    #[error("Invalid monetary input: must be string or integer minor units, got {0}.")]
    InvalidMonetaryInput(&'static str),
    #[error("Invalid payload: Body must be a JSON object")]
    InvalidPayload,
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Kernel(#[from] KernelFailure),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ZakError {
    /// Map internal error to a stable client-facing class.
    ///
    /// Only malformed bodies and "Invalid ..." failures are the client's fault.
    /// A missing field is not: it surfaces as an internal failure.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ZakError::InvalidMonetaryType
            | ZakError::InvalidMonetaryFormat
            | ZakError::InvalidMonetaryInput(_)
            | ZakError::InvalidPayload
            | ZakError::MalformedBody(_) => ClientCode::BadRequest,
            ZakError::MissingField(_)
            | ZakError::Kernel(_)
            | ZakError::Config(_)
            | ZakError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Stable machine-readable code, recorded as the audit `errorCode`.
    pub fn code(&self) -> &'static str {
        match self {
            ZakError::InvalidMonetaryType => "INVALID_MONETARY_TYPE",
            ZakError::InvalidMonetaryFormat => "INVALID_MONETARY_FORMAT",
            ZakError::InvalidMonetaryInput(_) => "INVALID_MONETARY_INPUT",
            ZakError::InvalidPayload => "INVALID_PAYLOAD",
            ZakError::MalformedBody(_) => "MALFORMED_BODY",
            ZakError::MissingField(_) => "MISSING_FIELD",
            ZakError::Kernel(_) => "KERNEL_FAILURE",
            ZakError::Config(_) => "CONFIG",
            ZakError::Internal(_) => "INTERNAL",
        }
    }
}
