//! Classifying arbitrary errors into [`Ex`] values.
//!
//! A [`ConverterChain`] is an ordered list of [`ErrorConverter`]s. An error
//! enters at the head; each converter either resolves it into an [`Ex`],
//! ending the dispatch, or hands it to the rest of the chain through
//! [`Next`]. If nobody resolves the error the chain returns `None`.
//!
//! A well-formed chain starts with [`Passthrough`], so errors that already are
//! an [`Ex`] come out untouched, and ends with [`UnknownConverter`], so every
//! error comes out classified. [`ConverterChainBuilder::build_total`] makes
//! that last guarantee part of the type.
//!
//! # Examples
//!
//! ```
//! use errorex::{
//!     UNKNOWN_ERROR, UnknownErrorDetail,
//!     converter::{self, ConverterChain, Passthrough, UnknownConverter},
//!     register_error_code,
//! };
//!
//! #[derive(Debug, serde::Serialize)]
//! struct IoDetail {
//!     kind: String,
//! }
//!
//! let io_failure = register_error_code::<IoDetail>("docs.io", "I/O failure");
//!
//! let chain = ConverterChain::builder()
//!     .with(Passthrough)
//!     .with(converter::downcast(move |err: &std::io::Error| {
//!         io_failure.new(IoDetail {
//!             kind: format!("{:?}", err.kind()),
//!         })
//!     }))
//!     .build_total(UnknownConverter);
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
//! assert_eq!(chain.convert(&io).code(), "docs.io");
//!
//! let fmt = std::fmt::Error;
//! let unknown = chain.convert(&fmt);
//! assert_eq!(unknown.code(), UNKNOWN_ERROR);
//! assert_eq!(
//!     unknown.detail::<UnknownErrorDetail>().unwrap().detail,
//!     "an error occurred when formatting an argument"
//! );
//! ```

mod builtin;
mod chain;

use alloc::boxed::Box;
use core::error::Error;

pub use self::{
    builtin::{
        Delegate, DowncastConverter, FnConverter, Passthrough, UnknownConverter, downcast, from_fn,
    },
    chain::{ConverterChain, ConverterChainBuilder, TotalConverter, TotalConverterChain},
};
use crate::Ex;

/// A node of a [`ConverterChain`].
///
/// Implementors either resolve `err` into an [`Ex`] or pass it on with
/// `next.convert(err)`. The default implementation does the latter, so a
/// converter that never resolves anything is just an empty impl.
///
/// # Examples
///
/// ```
/// use core::error::Error;
///
/// use errorex::{
///     Ex,
///     converter::{ConverterChain, ErrorConverter, Next},
///     register_error_code,
/// };
///
/// struct TimeoutConverter;
///
/// impl ErrorConverter for TimeoutConverter {
///     fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
///         if err.to_string().contains("timed out") {
///             Some(errorex::new("docs.timeout_converter", err.to_string()))
///         } else {
///             next.convert(err)
///         }
///     }
/// }
///
/// register_error_code::<String>("docs.timeout_converter", "Timeout");
///
/// let chain = ConverterChain::builder().with(TimeoutConverter).build();
/// let err = std::io::Error::other("request timed out");
/// assert_eq!(chain.convert(&err).unwrap().code(), "docs.timeout_converter");
/// assert!(chain.convert(&std::fmt::Error).is_none());
/// ```
pub trait ErrorConverter: 'static + Send + Sync {
    /// Resolves `err` or delegates it to the rest of the chain.
    fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
        next.convert(err)
    }

    /// A name for this converter, used when describing a chain.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// The part of a chain that follows the converter currently running.
#[derive(Copy, Clone)]
pub struct Next<'a> {
    rest: &'a [Box<dyn ErrorConverter>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(rest: &'a [Box<dyn ErrorConverter>]) -> Self {
        Self { rest }
    }

    /// The end of a chain: converting through it always returns `None`.
    #[must_use]
    pub const fn end() -> Self {
        Self { rest: &[] }
    }

    /// Returns whether nothing follows.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// Runs the rest of the chain on `err`.
    pub fn convert(self, err: &(dyn Error + 'static)) -> Option<Ex> {
        let (head, rest) = self.rest.split_first()?;
        head.convert(err, Next::new(rest))
    }
}

impl core::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.rest.iter().map(|converter| converter.name()))
            .finish()
    }
}
