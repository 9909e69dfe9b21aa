//! Running errors held by other error handling libraries through converter
//! chains.
//!
//! A [`ConverterChain`] takes a plain `&(dyn Error + 'static)`. Error types
//! that own their error behind a pointer, such as boxed trait objects or
//! [`anyhow::Error`](https://docs.rs/anyhow), implement [`AsDynError`] so
//! they can be classified directly with [`ClassifyExt`].
//!
//! # Available Integrations
//!
//! - Boxed error trait objects (`Box<dyn Error>` and
//!   `Box<dyn Error + Send + Sync>`), always available.
//! - [`anyhow1`] - `anyhow::Error` from the `anyhow` 1.x library (requires
//!   the `compat-anyhow1` feature flag).
//!
//! # Example
//!
//! ```
//! use core::error::Error;
//!
//! use errorex::{
//!     compat::ClassifyExt,
//!     converter::{ConverterChain, Passthrough, UnknownConverter},
//! };
//!
//! let chain = ConverterChain::builder()
//!     .with(Passthrough)
//!     .build_total(UnknownConverter);
//!
//! let boxed: Box<dyn Error + Send + Sync> = "plain message".into();
//! let ex = boxed.classify_total(&chain);
//! assert_eq!(
//!     ex.to_string(),
//!     r#"{"code": "errorex.000", "detail": {"detail":"plain message"}}"#
//! );
//! ```

use alloc::boxed::Box;
use core::error::Error;

use crate::{
    Ex,
    converter::{ConverterChain, TotalConverterChain},
};

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;

/// Types that hold an error and can lend it out as a trait object.
pub trait AsDynError {
    /// Returns the held error.
    fn as_dyn_error(&self) -> &(dyn Error + 'static);
}

impl AsDynError for Box<dyn Error> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl AsDynError for Box<dyn Error + Send + Sync> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl AsDynError for Ex {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

/// Extension methods to classify an [`AsDynError`] through a chain.
pub trait ClassifyExt: AsDynError {
    /// Runs the held error through `chain`.
    fn classify_with(&self, chain: &ConverterChain) -> Option<Ex> {
        chain.convert(self.as_dyn_error())
    }

    /// Runs the held error through a chain that always resolves.
    fn classify_total(&self, chain: &TotalConverterChain) -> Ex {
        chain.convert(self.as_dyn_error())
    }
}

impl<T: AsDynError + ?Sized> ClassifyExt for T {}
