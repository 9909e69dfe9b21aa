//! Marker traits describing what may be attached to an [`Ex`] and what counts
//! as a registered error.
//!
//! # Detail payloads
//!
//! Every registered code fixes the Rust type of the detail carried by its
//! occurrences. Any type implementing [`Detail`] can play that role: the
//! trait is blanket-implemented for everything that is
//! [`Serialize`](serde::Serialize), [`Debug`](core::fmt::Debug), `Send`,
//! `Sync` and `'static`, so in practice a `#[derive(Debug, Serialize)]` is all
//! a detail type needs.
//!
//! ```
//! use errorex::markers::Detail;
//!
//! #[derive(Debug, serde::Serialize)]
//! struct FieldDetail {
//!     field: String,
//!     value: String,
//! }
//!
//! fn takes_detail<D: Detail>(_: D) {}
//! takes_detail(FieldDetail {
//!     field: "name".to_string(),
//!     value: "John".to_string(),
//! });
//! ```
//!
//! # The `Coded` capability
//!
//! [`Coded`] is the capability tested by [`is`](crate::is): "this error
//! carries a registered code". It is sealed and only implemented by [`Ex`],
//! so testing for it is a plain downcast rather than a probe for a
//! same-named method.

use core::error::Error;

use crate::Ex;

/// Types that can be used as the detail payload of an [`Ex`].
pub trait Detail: serde::Serialize + core::fmt::Debug + Send + Sync + 'static {}

impl<D> Detail for D where D: serde::Serialize + core::fmt::Debug + Send + Sync + 'static {}

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::Ex {}
}

/// An error that carries a registered error code.
///
/// This trait is sealed: [`Ex`] is its only implementor.
pub trait Coded: sealed::Sealed + Error {
    /// Returns the registered error code.
    fn code(&self) -> &str;
}

impl Coded for Ex {
    #[inline]
    fn code(&self) -> &str {
        Ex::code(self)
    }
}

/// Returns the [`Ex`] behind `err`, if `err` is one.
///
/// # Examples
///
/// ```
/// use errorex::{UNKNOWN_ERROR_CODE, UnknownErrorDetail, markers};
///
/// let ex = UNKNOWN_ERROR_CODE.new(UnknownErrorDetail::new("boom"));
/// let err: &(dyn core::error::Error + 'static) = &ex;
/// assert!(markers::as_ex(err).is_some());
///
/// let io = std::io::Error::other("boom");
/// assert!(markers::as_ex(&io).is_none());
/// ```
#[inline]
#[must_use]
pub fn as_ex<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Ex> {
    err.downcast_ref::<Ex>()
}

/// Returns `err` viewed through the [`Coded`] capability, if it has it.
#[inline]
#[must_use]
pub fn as_coded<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn Coded> {
    as_ex(err).map(|ex| ex as &dyn Coded)
}
