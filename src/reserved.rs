//! Error codes that errorex registers for itself.
//!
//! These codes are present in every registry from the start, before any
//! application code runs, and can never be registered again. The string
//! constants are what ends up in serialized errors; the typed
//! [`ErrorCode`] handles are what Rust code should construct errors with.

use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::error::Error;

use serde::{Deserialize, Serialize};

use crate::{
    ErrorCode,
    registry::{CodeEntry, CodeMap},
};

/// Code of errors that could not be classified any further.
pub const UNKNOWN_ERROR: &str = "errorex.000";
/// Code raised when an error code is used before being registered.
pub const CODE_NOT_REGISTERED: &str = "errorex.001";
/// Code raised when an error code is registered twice.
pub const CODE_ALREADY_REGISTERED: &str = "errorex.002";
/// Code raised when a detail does not have the type registered for its code.
pub const DETAIL_TYPE_MISMATCH: &str = "errorex.003";
/// Code raised when registering after the registry was sealed.
pub const REGISTRY_SEALED: &str = "errorex.004";

/// Typed handle for [`UNKNOWN_ERROR`].
pub const UNKNOWN_ERROR_CODE: ErrorCode<UnknownErrorDetail> = ErrorCode::declare(UNKNOWN_ERROR);
/// Typed handle for [`CODE_NOT_REGISTERED`].
pub const CODE_NOT_REGISTERED_CODE: ErrorCode<CodeDetail> = ErrorCode::declare(CODE_NOT_REGISTERED);
/// Typed handle for [`CODE_ALREADY_REGISTERED`].
pub const CODE_ALREADY_REGISTERED_CODE: ErrorCode<CodeDetail> =
    ErrorCode::declare(CODE_ALREADY_REGISTERED);
/// Typed handle for [`DETAIL_TYPE_MISMATCH`].
pub const DETAIL_TYPE_MISMATCH_CODE: ErrorCode<DetailTypeMismatchDetail> =
    ErrorCode::declare(DETAIL_TYPE_MISMATCH);
/// Typed handle for [`REGISTRY_SEALED`].
pub const REGISTRY_SEALED_CODE: ErrorCode<CodeDetail> = ErrorCode::declare(REGISTRY_SEALED);

/// Detail of an [`UNKNOWN_ERROR`].
///
/// `detail` holds the message of the original error. `causes` holds the
/// messages of its [`source`](Error::source) chain, outermost first, and is
/// left out of the serialized form when empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownErrorDetail {
    /// Message of the original error.
    pub detail: String,
    /// Messages of the errors in the source chain of the original error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl UnknownErrorDetail {
    /// Creates a detail holding only a message.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            causes: Vec::new(),
        }
    }

    /// Captures the message and the source chain of `err`.
    ///
    /// # Examples
    ///
    /// ```
    /// use errorex::UnknownErrorDetail;
    ///
    /// let err = std::io::Error::other("connection reset");
    /// let detail = UnknownErrorDetail::from_error(&err);
    /// assert_eq!(detail.detail, "connection reset");
    /// assert!(detail.causes.is_empty());
    /// ```
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            detail: err.to_string(),
            causes,
        }
    }
}

/// Detail of the reserved codes that only need to name the offending code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDetail {
    /// The code that was misused.
    pub code: String,
}

/// Detail of a [`DETAIL_TYPE_MISMATCH`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailTypeMismatchDetail {
    /// Name of the detail type registered for the code.
    pub expected_type: String,
    /// Name of the detail type that was supplied.
    pub actual_type: String,
}

fn entry<D: 'static>(code: &'static str, description: &'static str) -> CodeEntry {
    CodeEntry::of::<D>(Cow::Borrowed(code), Cow::Borrowed(description))
}

/// The table every registry starts from.
pub(crate) fn table() -> CodeMap {
    [
        entry::<UnknownErrorDetail>(UNKNOWN_ERROR, "Unknown errorex"),
        entry::<CodeDetail>(CODE_NOT_REGISTERED, "Errorex code not registered"),
        entry::<CodeDetail>(CODE_ALREADY_REGISTERED, "Errorex code already registered"),
        entry::<DetailTypeMismatchDetail>(DETAIL_TYPE_MISMATCH, "Errorex detail type mismatch"),
        entry::<CodeDetail>(REGISTRY_SEALED, "Errorex registry sealed"),
    ]
    .into_iter()
    .map(|entry| (entry.code.clone(), entry))
    .collect()
}
