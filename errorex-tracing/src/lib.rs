#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Tracing events for errorex.
//!
//! errorex itself never logs. This crate adds two ways of turning its errors
//! into [`tracing`] events:
//!
//! - [`TracingConverter`] is a converter that sits at the head of a chain and
//!   reports how the rest of the chain classified each error.
//! - [`ExTraceExt`] logs an [`Ex`] (or the error of a `Result`) as a
//!   structured event at the point where it is handled.
//!
//! # Quick Start
//!
//! ```
//! use errorex::{
//!     ConverterChain,
//!     converter::{Passthrough, UnknownConverter},
//! };
//! use errorex_tracing::{ExTraceExt, TracingConverter};
//!
//! let chain = ConverterChain::builder()
//!     .with(TracingConverter::new())
//!     .with(Passthrough)
//!     .build_total(UnknownConverter);
//!
//! // Emits a warning with `code = "errorex.000"`: the error is only
//! // classified as unknown, by the last converter of the chain.
//! let ex = chain.convert(&std::io::Error::other("disk full"));
//!
//! // Emits an error event with `code` and `detail` fields.
//! let ex = ex.trace_ex();
//! ```
//!
//! # Environment Variables
//!
//! - `ERROREX_TRACING` - Comma-separated options:
//!   - `unclassified` - Only log errors the chain could not classify

use std::sync::OnceLock;

use errorex::{
    Ex, UNKNOWN_ERROR,
    converter::{ErrorConverter, Next},
    registry,
};

/// A converter that logs the classification outcome of the rest of the
/// chain.
///
/// Put it first in a chain. It never classifies anything itself: it hands
/// every error to its successors and emits an event for the result.
///
/// - Errors that come out with a registered code other than
///   [`UNKNOWN_ERROR`] are logged at `DEBUG`, with the `code` field.
/// - Errors that come out as [`UNKNOWN_ERROR`], or not at all, are logged at
///   `WARN`. Those are the errors a chain is missing a converter for.
///
/// # Examples
///
/// ```
/// use errorex::ConverterChain;
/// use errorex_tracing::TracingConverter;
///
/// // Only warn about chain misses, regardless of ERROREX_TRACING.
/// let chain = ConverterChain::builder()
///     .with(TracingConverter {
///         log_classified: false,
///     })
///     .build();
///
/// assert!(chain.convert(&std::fmt::Error).is_none());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TracingConverter {
    /// Whether errors the chain classified are logged too.
    ///
    /// When `false`, only unclassified errors produce an event.
    pub log_classified: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ErrorexTracingEnvOptions {
    unclassified_only: bool,
}

impl ErrorexTracingEnvOptions {
    fn get() -> &'static Self {
        static ERROREX_TRACING_FLAGS: OnceLock<ErrorexTracingEnvOptions> = OnceLock::new();

        ERROREX_TRACING_FLAGS.get_or_init(|| match std::env::var_os("ERROREX_TRACING") {
            Some(var) => Self::parse(&var.to_string_lossy()),
            None => Self::default(),
        })
    }

    fn parse(var: &str) -> Self {
        let mut options = Self::default();
        for v in var.split(',') {
            if v.trim().eq_ignore_ascii_case("unclassified") {
                options.unclassified_only = true;
            }
        }
        options
    }
}

impl TracingConverter {
    /// Creates a new [`TracingConverter`] configured from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `ERROREX_TRACING` - Comma-separated options:
    ///   - `unclassified` - Only log errors the chain could not classify
    ///
    /// The variable is read once per process.
    pub fn new() -> Self {
        let env_options = ErrorexTracingEnvOptions::get();

        Self {
            log_classified: !env_options.unclassified_only,
        }
    }
}

impl Default for TracingConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorConverter for TracingConverter {
    fn convert(&self, err: &(dyn std::error::Error + 'static), next: Next<'_>) -> Option<Ex> {
        let result = next.convert(err);
        match &result {
            Some(ex) if ex.code() != UNKNOWN_ERROR => {
                if self.log_classified {
                    tracing::debug!(error = %err, code = ex.code(), "error classified");
                }
            }
            Some(ex) => {
                tracing::warn!(error = %err, code = ex.code(), "error classified as unknown");
            }
            None => {
                tracing::warn!(error = %err, "error not classified");
            }
        }
        result
    }
}

/// Extension trait for logging [`Ex`] values.
///
/// The event is emitted at `ERROR` level with these fields:
///
/// - `code`: the error code
/// - `detail`: the detail as JSON, or the serialization failure
/// - `description`: the description the code was registered with
///
/// # Examples
///
/// ```
/// use errorex::{UNKNOWN_ERROR_CODE, UnknownErrorDetail};
/// use errorex_tracing::ExTraceExt;
///
/// fn load() -> errorex::Result<Vec<u8>> {
///     Err(UNKNOWN_ERROR_CODE.new(UnknownErrorDetail::new("disk full")))
/// }
///
/// let result = load().trace_ex();
/// assert!(result.is_err());
/// ```
pub trait ExTraceExt: Sized {
    /// Logs the error, if any, and returns `self` unchanged.
    fn trace_ex(self) -> Self;
}

impl ExTraceExt for Ex {
    fn trace_ex(self) -> Self {
        emit(&self);
        self
    }
}

impl<T> ExTraceExt for Result<T, Ex> {
    fn trace_ex(self) -> Self {
        if let Err(ex) = &self {
            emit(ex);
        }
        self
    }
}

fn emit(ex: &Ex) {
    let description = registry::describe(ex.code()).unwrap_or_default();
    let detail = ex
        .detail_json()
        .unwrap_or_else(|err| format!("failed to marshal detail: {err}"));
    tracing::error!(
        code = ex.code(),
        detail = %detail,
        description = %description,
        "{ex}"
    );
}
