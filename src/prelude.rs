//! Commonly used items for convenient importing.
//!
//! ```rust
//! use errorex::prelude::*;
//!
//! #[derive(Debug, serde::Serialize)]
//! struct Quota {
//!     limit: u32,
//! }
//!
//! let quota = register_error_code::<Quota>("prelude.quota", "Quota exceeded");
//!
//! let chain = ConverterChain::builder()
//!     .with(Passthrough)
//!     .build_total(UnknownConverter);
//!
//! let ex = quota.new(Quota { limit: 10 });
//! assert!(chain.convert(&ex).ptr_eq(&ex));
//! ```
//!
//! # What's Included
//!
//! - **[`Ex`]** and **[`ErrorCode`]**: the error type and typed code handles
//! - **[`register_error_code`]**, **[`new`]** and **[`is`]**: the registry
//!   entry points
//! - **[`ConverterChain`]**, **[`ErrorConverter`]**, **[`Passthrough`]**,
//!   **[`UnknownConverter`]**: converter chains
//! - **[`ClassifyExt`]**: classifying boxed and foreign errors
//! - **[`Detail`]**: the bound on detail types

pub use crate::{
    ErrorCode, Ex,
    compat::ClassifyExt,
    converter::{ConverterChain, ErrorConverter, Next, Passthrough, UnknownConverter},
    is,
    markers::Detail,
    new, register_error_code,
};
