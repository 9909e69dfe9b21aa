//! The process-wide table of registered error codes.
//!
//! # Lifecycle
//!
//! The registry has two phases:
//!
//! - **Open**: codes can be registered with
//!   [`register_error_code`](crate::register_error_code) or
//!   [`ErrorCode::register`](crate::ErrorCode::register). This is meant to
//!   happen during startup.
//! - **Sealed**: after [`seal`] returns, every registration attempt fails with
//!   [`Misuse::RegistrySealed`]. Lookups keep working from any thread.
//!
//! The table itself sits behind a read-write lock, so registering while other
//! threads construct errors is safe, just not recommended: sealing is how a
//! program states that its vocabulary is complete.
//!
//! The [reserved codes](crate::reserved) are present in both phases and
//! cannot be registered again.
//!
//! # Examples
//!
//! ```
//! use errorex::{register_error_code, registry};
//!
//! #[derive(Debug, serde::Serialize)]
//! struct QuotaDetail {
//!     limit: u32,
//! }
//!
//! register_error_code::<QuotaDetail>("docs.quota", "Quota exceeded");
//!
//! let entry = registry::lookup("docs.quota").unwrap();
//! assert_eq!(entry.description(), "Quota exceeded");
//! assert!(entry.detail_type_name().ends_with("QuotaDetail"));
//! ```

mod entry;
mod lock;

use alloc::{borrow::Cow, vec::Vec};
use core::any::TypeId;

use indexmap::map::Entry;

pub use self::entry::CodeEntry;
use self::lock::RegistryLock;
use crate::{ErrorCode, Misuse, markers::Detail};

pub(crate) type CodeMap = indexmap::IndexMap<Cow<'static, str>, CodeEntry, rustc_hash::FxBuildHasher>;

static REGISTRY: RegistryLock = RegistryLock::new();

pub(crate) fn insert(entry: CodeEntry) -> Result<(), Misuse> {
    let mut table = REGISTRY.write();

    if REGISTRY.is_sealed() {
        return Err(Misuse::RegistrySealed {
            code: entry.code.into_owned(),
        });
    }

    match table.entry(entry.code.clone()) {
        Entry::Occupied(occupied) => Err(Misuse::AlreadyRegistered {
            code: occupied.key().clone().into_owned(),
        }),
        Entry::Vacant(vacant) => {
            vacant.insert(entry);
            Ok(())
        }
    }
}

/// Registers `code` with detail type `D`, returning a typed handle for it.
///
/// The detail type plays the role of an exemplar: every error later created
/// under `code` must carry a `D`.
///
/// # Panics
///
/// Panics with [`Misuse::AlreadyRegistered`] if `code` is already registered,
/// and with [`Misuse::RegistrySealed`] if the registry is sealed. Both are
/// programming errors; use [`try_register_error_code`] to handle them instead.
///
/// # Examples
///
/// ```
/// use errorex::register_error_code;
///
/// #[derive(Debug, serde::Serialize)]
/// struct FieldDetail {
///     field: String,
///     value: String,
/// }
///
/// let invalid_field = register_error_code::<FieldDetail>("docs.E001", "Invalid field");
/// let ex = invalid_field.new(FieldDetail {
///     field: "name".to_string(),
///     value: "John".to_string(),
/// });
/// assert_eq!(ex.code(), "docs.E001");
/// ```
#[track_caller]
pub fn register_error_code<D: Detail>(
    code: impl Into<Cow<'static, str>>,
    description: impl Into<Cow<'static, str>>,
) -> ErrorCode<D> {
    try_register_error_code(code, description).unwrap_or_else(|misuse| misuse.raise())
}

/// Non-panicking version of [`register_error_code`].
///
/// # Examples
///
/// ```
/// use errorex::{Misuse, try_register_error_code};
///
/// assert!(try_register_error_code::<String>("docs.twice", "First").is_ok());
/// assert_eq!(
///     try_register_error_code::<String>("docs.twice", "Second").unwrap_err(),
///     Misuse::AlreadyRegistered {
///         code: "docs.twice".to_string()
///     }
/// );
/// ```
pub fn try_register_error_code<D: Detail>(
    code: impl Into<Cow<'static, str>>,
    description: impl Into<Cow<'static, str>>,
) -> Result<ErrorCode<D>, Misuse> {
    let code = code.into();
    insert(CodeEntry::of::<D>(code.clone(), description.into()))?;
    Ok(ErrorCode::from_cow(code))
}

/// Returns the entry registered for `code`.
#[must_use]
pub fn lookup(code: &str) -> Option<CodeEntry> {
    REGISTRY.read().get(code).cloned()
}

/// Returns whether `code` is registered.
#[must_use]
pub fn is_registered(code: &str) -> bool {
    REGISTRY.read().contains_key(code)
}

/// Returns the description registered for `code`.
#[must_use]
pub fn describe(code: &str) -> Option<Cow<'static, str>> {
    lookup(code).map(|entry| entry.description)
}

/// Returns every registered entry, reserved codes first, then in
/// registration order.
#[must_use]
pub fn entries() -> Vec<CodeEntry> {
    REGISTRY.read().values().cloned().collect()
}

/// Ends the registration phase.
///
/// Sealing is idempotent and permanent for the lifetime of the process.
///
/// # Examples
///
/// ```no_run
/// use errorex::{Misuse, registry, try_register_error_code};
///
/// registry::seal();
/// assert!(registry::is_sealed());
/// assert_eq!(
///     try_register_error_code::<String>("docs.late", "Too late").unwrap_err(),
///     Misuse::RegistrySealed {
///         code: "docs.late".to_string()
///     }
/// );
/// ```
pub fn seal() {
    REGISTRY.seal();
}

/// Returns whether [`seal`] has been called.
#[must_use]
pub fn is_sealed() -> bool {
    REGISTRY.is_sealed()
}

/// Resolves `code` and checks that it accepts details of type `D`.
pub(crate) fn resolve<D: Detail>(code: &str) -> Result<Cow<'static, str>, Misuse> {
    let entry = lookup(code).ok_or_else(|| Misuse::NotRegistered { code: code.into() })?;
    if entry.detail_type_id != TypeId::of::<D>() {
        return Err(Misuse::DetailTypeMismatch {
            expected: entry.detail_type_name,
            actual: core::any::type_name::<D>(),
        });
    }
    Ok(entry.code)
}

#[cfg(test)]
mod tests {
    use alloc::{
        format,
        string::{String, ToString},
    };

    use super::*;
    use crate::reserved;

    #[derive(Debug, serde::Serialize)]
    struct Message {
        message: String,
    }

    #[test]
    fn test_reserved_codes_always_present() {
        for code in [
            reserved::UNKNOWN_ERROR,
            reserved::CODE_NOT_REGISTERED,
            reserved::CODE_ALREADY_REGISTERED,
            reserved::DETAIL_TYPE_MISMATCH,
            reserved::REGISTRY_SEALED,
        ] {
            assert!(is_registered(code), "{code} should be reserved");
        }
        assert_eq!(
            describe(reserved::UNKNOWN_ERROR).as_deref(),
            Some("Unknown errorex")
        );
    }

    #[test]
    fn test_register_and_lookup() {
        try_register_error_code::<Message>("registry.test.lookup", "lookup test").unwrap();

        let entry = lookup("registry.test.lookup").unwrap();
        assert_eq!(entry.code(), "registry.test.lookup");
        assert_eq!(entry.description(), "lookup test");
        assert_eq!(entry.detail_type_id(), TypeId::of::<Message>());
        assert!(entry.detail_type_name().ends_with("Message"));
        assert!(entry.accepts::<Message>());
        assert!(!entry.accepts::<String>());
    }

    #[test]
    fn test_register_twice_fails() {
        try_register_error_code::<Message>("registry.test.twice", "first").unwrap();
        let err = try_register_error_code::<String>("registry.test.twice", "second").unwrap_err();
        assert_eq!(
            err,
            Misuse::AlreadyRegistered {
                code: "registry.test.twice".to_string()
            }
        );
        // The first registration wins.
        assert_eq!(describe("registry.test.twice").as_deref(), Some("first"));
    }

    #[test]
    fn test_reserved_codes_cannot_be_registered() {
        let err = try_register_error_code::<Message>(reserved::UNKNOWN_ERROR, "hijack").unwrap_err();
        assert!(matches!(err, Misuse::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_resolve_checks_detail_type() {
        try_register_error_code::<Message>("registry.test.resolve", "resolve test").unwrap();
        assert_eq!(
            resolve::<Message>("registry.test.resolve").unwrap(),
            "registry.test.resolve"
        );
        assert!(matches!(
            resolve::<String>("registry.test.resolve"),
            Err(Misuse::DetailTypeMismatch { actual, .. }) if actual == "alloc::string::String"
        ));
        assert!(matches!(
            resolve::<Message>("registry.test.missing"),
            Err(Misuse::NotRegistered { code }) if code == "registry.test.missing"
        ));
    }

    #[test]
    fn test_entries_keep_registration_order() {
        try_register_error_code::<Message>("registry.test.order.a", "a").unwrap();
        try_register_error_code::<Message>("registry.test.order.b", "b").unwrap();

        let entries = entries();
        assert_eq!(entries[0].code(), reserved::UNKNOWN_ERROR);
        let a = entries.iter().position(|e| e.code() == "registry.test.order.a");
        let b = entries.iter().position(|e| e.code() == "registry.test.order.b");
        assert!(a.unwrap() < b.unwrap());
    }

    #[test]
    fn test_concurrent_registrations_on_seeded_table() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    assert!(is_registered(reserved::REGISTRY_SEALED));
                    try_register_error_code::<Message>(
                        format!("registry.test.concurrent.{i}"),
                        "concurrent",
                    )
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        for i in 0..8 {
            assert!(is_registered(&format!("registry.test.concurrent.{i}")));
        }
    }
}
