#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Registered error codes with typed details.
//!
//! ## Overview
//!
//! errorex lets a codebase define a closed vocabulary of error codes. Each
//! code is registered once, with a description and the Rust type of the
//! **detail** that every occurrence of the code carries. Errors are then
//! created as [`Ex`] values, which are checked against the registry at
//! construction: an [`Ex`] with an unregistered code, or with a detail of
//! the wrong type, cannot exist.
//!
//! ## Quick Example
//!
//! ```
//! use errorex::{ErrorCode, is};
//!
//! #[derive(Debug, serde::Serialize)]
//! struct FieldDetail {
//!     field: String,
//!     value: String,
//! }
//!
//! const INVALID_FIELD: ErrorCode<FieldDetail> = ErrorCode::declare("app.E001");
//!
//! // Once, at startup.
//! INVALID_FIELD.register("A field has an invalid value");
//!
//! let ex = INVALID_FIELD.new(FieldDetail {
//!     field: "name".to_string(),
//!     value: "John".to_string(),
//! });
//!
//! assert!(is(Some(&ex), "app.E001"));
//! assert_eq!(
//!     ex.to_string(),
//!     r#"{"code": "app.E001", "detail": {"field":"name","value":"John"}}"#
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - The **[registry]** is a process-wide table from code to description and
//!   detail type. It is append-only, and can be [sealed](registry::seal) once
//!   startup is over.
//! - An **[`Ex`]** is an immutable error holding a registered code and its
//!   detail. Its [`Display`](core::fmt::Display) output is the canonical
//!   string `{"code": "...", "detail": ...}`, the detail being serialized
//!   with [`serde_json`].
//! - An **[`ErrorCode<D>`]** is a typed handle for a code whose detail type
//!   is `D`. Creating errors through it moves the detail type check to
//!   compile time.
//! - A **[converter chain](converter)** classifies errors of unknown origin
//!   into [`Ex`] values, trying a sequence of converters in order.
//!
//! ## Misuse
//!
//! Registering a code twice, using an unregistered code and passing the wrong
//! detail type are programming errors. The plain entry points panic on them
//! with a [`Misuse`]; every one of them has a `try_` variant returning the
//! [`Misuse`] instead. The panic message is the canonical string of an error
//! under one of the [reserved codes](reserved):
//!
//! ```should_panic
//! // panics with {"code": "errorex.001", "detail": {"code":"app.unknown"}}
//! let _ = errorex::new("app.unknown", ());
//! ```
//!
//! ## Features
//!
//! - `std` (default): uses the standard library's `RwLock` for the registry.
//!   Without it the crate is `no_std` (with `alloc`) and uses a spin lock.
//! - `compat-anyhow1`: classification of `anyhow::Error` values, see
//!   [`compat::anyhow1`].
//!
//! ## Ecosystem
//!
//! - **[`errorex-tracing`]** - A converter logging classification outcomes
//!   with `tracing`, and helpers to log [`Ex`] values as structured events.
//!
//! [`errorex-tracing`]: https://docs.rs/errorex-tracing

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod compat;
pub mod converter;
pub mod markers;
pub mod prelude;
pub mod registry;
pub mod reserved;

mod code;
mod ex;
mod misuse;

pub use self::{
    code::ErrorCode,
    converter::{ConverterChain, ErrorConverter, TotalConverterChain},
    ex::{Ex, is, new, try_is, try_new},
    misuse::Misuse,
    registry::{register_error_code, try_register_error_code},
    reserved::{
        CODE_ALREADY_REGISTERED, CODE_ALREADY_REGISTERED_CODE, CODE_NOT_REGISTERED,
        CODE_NOT_REGISTERED_CODE, CodeDetail, DETAIL_TYPE_MISMATCH, DETAIL_TYPE_MISMATCH_CODE,
        DetailTypeMismatchDetail, REGISTRY_SEALED, REGISTRY_SEALED_CODE, UNKNOWN_ERROR,
        UNKNOWN_ERROR_CODE, UnknownErrorDetail,
    },
};

/// A [`Result`](core::result::Result) type alias where the error is [`Ex`].
///
/// # Examples
///
/// ```
/// fn might_fail() -> errorex::Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T, E = Ex> = core::result::Result<T, E>;
