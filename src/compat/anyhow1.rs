//! Integration with the [`anyhow`] 1.x error handling library.
//!
//! This module specifically supports `anyhow` version 1.x. To enable this
//! integration, add the `compat-anyhow1` feature flag to your `Cargo.toml`.
//!
//! An [`anyhow::Error`] implements [`AsDynError`], so it can be classified
//! with [`ClassifyExt`](super::ClassifyExt). An [`Ex`] wrapped in an
//! `anyhow::Error` is still seen by [`Passthrough`](crate::converter::Passthrough):
//!
//! ```
//! use errorex::{
//!     UNKNOWN_ERROR_CODE, UnknownErrorDetail,
//!     compat::ClassifyExt,
//!     converter::{ConverterChain, Passthrough},
//! };
//!
//! let ex = UNKNOWN_ERROR_CODE.new(UnknownErrorDetail::new("boom"));
//! let wrapped = anyhow::Error::new(ex.clone());
//!
//! let chain = ConverterChain::builder().with(Passthrough).build();
//! assert!(wrapped.classify_with(&chain).unwrap().ptr_eq(&ex));
//! ```
//!
//! Going the other way needs nothing from this crate: [`Ex`] is
//! `Error + Send + Sync + 'static`, so `?` converts it into an
//! [`anyhow::Error`].

use core::error::Error;

use super::AsDynError;
use crate::Ex;

impl AsDynError for anyhow::Error {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

/// Returns the [`Ex`] held by an [`anyhow::Error`], if it holds one.
///
/// Context added with [`anyhow::Context`] hides the [`Ex`] from
/// [`Passthrough`](crate::converter::Passthrough), but not from this
/// function, which follows anyhow's own downcasting rules.
#[must_use]
pub fn find_ex(err: &anyhow::Error) -> Option<&Ex> {
    err.downcast_ref::<Ex>()
}
