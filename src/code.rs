use alloc::borrow::Cow;
use core::{error::Error, fmt, marker::PhantomData};

use crate::{
    Ex, Misuse,
    markers::Detail,
    registry::{self, CodeEntry},
};

/// A typed handle for an error code whose occurrences carry a `D`.
///
/// Creating errors through a handle lets the compiler check the detail
/// shape: [`ErrorCode::new`] only accepts a `D`. The handle can be obtained
/// from [`register_error_code`](crate::register_error_code), or declared as a
/// constant and registered at startup:
///
/// ```
/// use errorex::ErrorCode;
///
/// #[derive(Debug, serde::Serialize)]
/// struct TimeoutDetail {
///     after_ms: u64,
/// }
///
/// const TIMEOUT: ErrorCode<TimeoutDetail> = ErrorCode::declare("docs.timeout");
///
/// TIMEOUT.register("Operation timed out");
///
/// let ex = TIMEOUT.new(TimeoutDetail { after_ms: 250 });
/// assert_eq!(
///     ex.to_string(),
///     r#"{"code": "docs.timeout", "detail": {"after_ms":250}}"#
/// );
/// ```
///
/// Declaring a handle does not register the code; creating an error through
/// an unregistered handle panics with [`Misuse::NotRegistered`].
pub struct ErrorCode<D> {
    code: Cow<'static, str>,
    _detail: PhantomData<fn() -> D>,
}

impl<D> Clone for ErrorCode<D> {
    fn clone(&self) -> Self {
        Self {
            code: self.code.clone(),
            _detail: PhantomData,
        }
    }
}

impl<D> fmt::Debug for ErrorCode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCode")
            .field("code", &self.code)
            .field("detail", &core::any::type_name::<D>())
            .finish()
    }
}

impl<D> fmt::Display for ErrorCode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl<D> PartialEq for ErrorCode<D> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl<D> Eq for ErrorCode<D> {}

impl<D> ErrorCode<D> {
    /// Declares a handle for `code` without registering it.
    #[must_use]
    pub const fn declare(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            _detail: PhantomData,
        }
    }

    pub(crate) fn from_cow(code: Cow<'static, str>) -> Self {
        Self {
            code,
            _detail: PhantomData,
        }
    }

    /// The error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl<D: Detail> ErrorCode<D> {
    /// Registers this code with detail type `D`.
    ///
    /// # Panics
    ///
    /// Panics with [`Misuse::AlreadyRegistered`] or [`Misuse::RegistrySealed`],
    /// like [`register_error_code`](crate::register_error_code).
    #[track_caller]
    pub fn register(&self, description: impl Into<Cow<'static, str>>) -> Self {
        self.try_register(description).unwrap_or_else(|misuse| misuse.raise())
    }

    /// Non-panicking version of [`register`](Self::register).
    pub fn try_register(&self, description: impl Into<Cow<'static, str>>) -> Result<Self, Misuse> {
        registry::insert(CodeEntry::of::<D>(self.code.clone(), description.into()))?;
        Ok(self.clone())
    }

    /// Creates an error with this code.
    ///
    /// # Panics
    ///
    /// Panics with [`Misuse::NotRegistered`] if the code was never
    /// registered, and with [`Misuse::DetailTypeMismatch`] if it was
    /// registered with a detail type other than `D`.
    #[track_caller]
    #[must_use]
    pub fn new(&self, detail: D) -> Ex {
        self.try_new(detail).unwrap_or_else(|misuse| misuse.raise())
    }

    /// Non-panicking version of [`new`](Self::new).
    pub fn try_new(&self, detail: D) -> Result<Ex, Misuse> {
        let code = registry::resolve::<D>(&self.code)?;
        Ok(Ex::from_parts(code, detail))
    }

    /// Returns whether `err` is an [`Ex`] with this code.
    ///
    /// Unlike [`is`](crate::is), this does not require the code to be
    /// registered: an unregistered handle simply never matches.
    #[must_use]
    pub fn matches(&self, err: &(dyn Error + 'static)) -> bool {
        crate::markers::as_ex(err).is_some_and(|ex| ex.code() == self.code())
    }

    /// Returns the registry entry for this code, if registered.
    #[must_use]
    pub fn entry(&self) -> Option<CodeEntry> {
        registry::lookup(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::*;
    use crate::reserved;

    #[derive(Debug, PartialEq, serde::Serialize)]
    struct Limit {
        limit: u32,
    }

    const DECLARED: ErrorCode<Limit> = ErrorCode::declare("code.test.declared");
    const NEVER_REGISTERED: ErrorCode<Limit> = ErrorCode::declare("code.test.never");

    #[test]
    fn test_error_code_send_sync() {
        static_assertions::assert_impl_all!(ErrorCode<Limit>: Send, Sync, Clone);
        static_assertions::assert_impl_all!(ErrorCode<*const ()>: Send, Sync);
    }

    #[test]
    fn test_declared_code_round_trip() {
        DECLARED.register("declared test");

        let ex = DECLARED.new(Limit { limit: 3 });
        assert_eq!(ex.code(), "code.test.declared");
        assert_eq!(ex.detail::<Limit>(), Some(&Limit { limit: 3 }));
        assert!(DECLARED.matches(&ex));
        assert_eq!(DECLARED.entry().unwrap().description(), "declared test");
    }

    #[test]
    fn test_unregistered_handle() {
        assert_eq!(
            NEVER_REGISTERED.try_new(Limit { limit: 1 }).unwrap_err(),
            Misuse::NotRegistered {
                code: "code.test.never".to_string()
            }
        );
        assert!(NEVER_REGISTERED.entry().is_none());
    }

    #[test]
    #[should_panic(expected = r#"{"code": "errorex.001", "detail": {"code":"code.test.never.panics"}}"#)]
    fn test_unregistered_handle_panics() {
        let _ = ErrorCode::<Limit>::declare("code.test.never.panics").new(Limit { limit: 1 });
    }

    #[test]
    fn test_handle_disagreeing_with_registration() {
        crate::register_error_code::<String>("code.test.disagree", "disagree test");
        let wrong: ErrorCode<Limit> = ErrorCode::declare("code.test.disagree");
        assert_eq!(
            wrong.try_new(Limit { limit: 1 }).unwrap_err(),
            Misuse::DetailTypeMismatch {
                expected: "alloc::string::String",
                actual: core::any::type_name::<Limit>(),
            }
        );
    }

    #[test]
    fn test_reserved_handles_are_usable() {
        let ex = reserved::UNKNOWN_ERROR_CODE.new(reserved::UnknownErrorDetail::new("boom"));
        assert_eq!(ex.code(), reserved::UNKNOWN_ERROR);
        assert!(!reserved::CODE_NOT_REGISTERED_CODE.matches(&ex));
    }
}
