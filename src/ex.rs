use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
};
use core::{
    any::{Any, TypeId},
    error::Error,
    fmt,
};

use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{Misuse, markers::Detail, registry};

struct ExData<D> {
    code: Cow<'static, str>,
    detail: D,
}

trait UntypedExData: 'static + Send + Sync {
    fn code(&self) -> &str;
    fn detail_any(&self) -> &dyn Any;
    fn detail_debug(&self) -> &dyn fmt::Debug;
    fn detail_type_name(&self) -> &'static str;
    fn detail_json(&self) -> Result<String, serde_json::Error>;
}

impl<D: Detail> UntypedExData for ExData<D> {
    fn code(&self) -> &str {
        &self.code
    }

    fn detail_any(&self) -> &dyn Any {
        &self.detail
    }

    fn detail_debug(&self) -> &dyn fmt::Debug {
        &self.detail
    }

    fn detail_type_name(&self) -> &'static str {
        core::any::type_name::<D>()
    }

    fn detail_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.detail)
    }
}

/// An error carrying a registered code and a detail of the type registered
/// for that code.
///
/// An `Ex` can only be created through [`new`](crate::new),
/// [`try_new`](crate::try_new) or an [`ErrorCode`](crate::ErrorCode) handle,
/// all of which check the code and the detail type up front. Every live `Ex`
/// is therefore well-formed.
///
/// `Ex` is immutable and cheap to clone: clones share the same allocation.
///
/// # Canonical string
///
/// The [`Display`](fmt::Display) implementation produces
/// `{"code": "<code>", "detail": <detail as JSON>}`. If the detail cannot be
/// serialized, the detail becomes a string describing the failure instead, so
/// formatting an `Ex` never fails.
///
/// ```
/// use errorex::register_error_code;
///
/// #[derive(Debug, PartialEq, serde::Serialize)]
/// struct FieldDetail {
///     field: String,
///     value: String,
/// }
///
/// let code = register_error_code::<FieldDetail>("docs.ex.E001", "Invalid field");
/// let ex = code.new(FieldDetail {
///     field: "name".to_string(),
///     value: "John".to_string(),
/// });
///
/// assert_eq!(ex.code(), "docs.ex.E001");
/// assert_eq!(ex.detail::<FieldDetail>().unwrap().value, "John");
/// assert_eq!(
///     ex.to_string(),
///     r#"{"code": "docs.ex.E001", "detail": {"field":"name","value":"John"}}"#
/// );
/// ```
#[derive(Clone)]
pub struct Ex(Arc<dyn UntypedExData>);

impl Ex {
    /// Builds an `Ex` without consulting the registry.
    ///
    /// Callers must have resolved `code` to an entry accepting `D`.
    pub(crate) fn from_parts<D: Detail>(code: Cow<'static, str>, detail: D) -> Self {
        let data: Arc<ExData<D>> = Arc::new(ExData { code, detail });
        Self(data.unsize(unsize::Coercion!(to dyn UntypedExData)))
    }

    /// The registered error code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.0.code()
    }

    /// The detail, if it is of type `D`.
    #[must_use]
    pub fn detail<D: Detail>(&self) -> Option<&D> {
        self.0.detail_any().downcast_ref()
    }

    /// The detail as [`Any`].
    #[must_use]
    pub fn detail_any(&self) -> &dyn Any {
        self.0.detail_any()
    }

    /// The [`TypeId`] of the detail.
    #[must_use]
    pub fn detail_type_id(&self) -> TypeId {
        self.0.detail_any().type_id()
    }

    /// The name of the detail type, as reported by [`core::any::type_name`].
    #[must_use]
    pub fn detail_type_name(&self) -> &'static str {
        self.0.detail_type_name()
    }

    /// The detail serialized as JSON.
    pub fn detail_json(&self) -> Result<String, serde_json::Error> {
        self.0.detail_json()
    }

    /// Returns whether this error has the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code() == code
    }

    /// Returns whether `self` and `other` are the same error rather than
    /// merely equal ones.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(&*self.0, &*other.0)
    }

    /// The canonical string, see the [type-level docs](Ex#canonical-string).
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        format!("{self}")
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.into()).to_string()
}

impl fmt::Display for Ex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = json_string(self.code());
        match self.0.detail_json() {
            Ok(detail) => write!(f, r#"{{"code": {code}, "detail": {detail}}}"#),
            Err(err) => {
                let detail = json_string(&format!("failed to marshal detail: {err}"));
                write!(f, r#"{{"code": {code}, "detail": {detail}}}"#)
            }
        }
    }
}

impl fmt::Debug for Ex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ex")
            .field("code", &self.code())
            .field("detail", self.0.detail_debug())
            .finish()
    }
}

impl Error for Ex {}

/// Creates an error with a code resolved at runtime.
///
/// Prefer an [`ErrorCode`](crate::ErrorCode) handle where the code is known
/// statically: it moves the detail type check to compile time.
///
/// # Panics
///
/// Panics with [`Misuse::NotRegistered`] if `code` is not registered, and
/// with [`Misuse::DetailTypeMismatch`] if `D` is not the detail type
/// registered for `code`.
///
/// # Examples
///
/// ```
/// use errorex::register_error_code;
///
/// register_error_code::<String>("docs.new", "Free-form failure");
///
/// let ex = errorex::new("docs.new", "disk full".to_string());
/// assert_eq!(ex.to_string(), r#"{"code": "docs.new", "detail": "disk full"}"#);
/// ```
#[track_caller]
#[must_use]
pub fn new<D: Detail>(code: &str, detail: D) -> Ex {
    try_new(code, detail).unwrap_or_else(|misuse| misuse.raise())
}

/// Non-panicking version of [`new`].
pub fn try_new<D: Detail>(code: &str, detail: D) -> Result<Ex, Misuse> {
    let code = registry::resolve::<D>(code)?;
    Ok(Ex::from_parts(code, detail))
}

/// Returns whether `err` is an [`Ex`] with the given code.
///
/// Returns `false` for `None` and for errors that are not an [`Ex`].
///
/// # Panics
///
/// Panics with [`Misuse::NotRegistered`] if `code` is not registered:
/// testing against a code that does not exist is a programming error.
///
/// # Examples
///
/// ```
/// use errorex::{UNKNOWN_ERROR, UNKNOWN_ERROR_CODE, UnknownErrorDetail, is};
///
/// let ex = UNKNOWN_ERROR_CODE.new(UnknownErrorDetail::new("boom"));
/// assert!(is(Some(&ex), UNKNOWN_ERROR));
/// assert!(!is(None, UNKNOWN_ERROR));
/// assert!(!is(Some(&std::io::Error::other("boom")), UNKNOWN_ERROR));
/// ```
#[track_caller]
#[must_use]
pub fn is(err: Option<&(dyn Error + 'static)>, code: &str) -> bool {
    try_is(err, code).unwrap_or_else(|misuse| misuse.raise())
}

/// Non-panicking version of [`is`].
pub fn try_is(err: Option<&(dyn Error + 'static)>, code: &str) -> Result<bool, Misuse> {
    if !registry::is_registered(code) {
        return Err(Misuse::NotRegistered { code: code.into() });
    }
    Ok(err
        .and_then(crate::markers::as_coded)
        .is_some_and(|coded| coded.code() == code))
}
