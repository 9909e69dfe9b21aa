use alloc::string::{String, ToString};
use core::fmt;

use crate::{
    Ex,
    reserved::{self, CodeDetail, DetailTypeMismatchDetail},
};

/// A contract violation by the caller of this crate.
///
/// Misuse is not an ordinary error: registering a code twice, using a code
/// that was never registered or supplying the wrong detail type are bugs to
/// fix, not conditions to recover from. The panicking entry points
/// ([`new`](crate::new), [`is`](crate::is),
/// [`register_error_code`](crate::register_error_code), ...) panic with the
/// misuse as message; the `try_` variants return it instead.
///
/// A misuse displays as the canonical string of the equivalent error under
/// one of the [reserved codes](crate::reserved):
///
/// ```
/// use errorex::Misuse;
///
/// let misuse = Misuse::NotRegistered {
///     code: "app.E404".to_string(),
/// };
/// assert_eq!(
///     misuse.to_string(),
///     r#"{"code": "errorex.001", "detail": {"code":"app.E404"}}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Misuse {
    /// The code was already registered.
    AlreadyRegistered {
        /// The offending code.
        code: String,
    },
    /// The code was used without being registered.
    NotRegistered {
        /// The offending code.
        code: String,
    },
    /// The detail type does not match the one registered for the code.
    DetailTypeMismatch {
        /// The registered detail type.
        expected: &'static str,
        /// The supplied detail type.
        actual: &'static str,
    },
    /// The code was registered after the registry was sealed.
    RegistrySealed {
        /// The offending code.
        code: String,
    },
}

impl Misuse {
    /// The reserved code this misuse is reported under.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Misuse::AlreadyRegistered { .. } => reserved::CODE_ALREADY_REGISTERED,
            Misuse::NotRegistered { .. } => reserved::CODE_NOT_REGISTERED,
            Misuse::DetailTypeMismatch { .. } => reserved::DETAIL_TYPE_MISMATCH,
            Misuse::RegistrySealed { .. } => reserved::REGISTRY_SEALED,
        }
    }

    /// Converts this misuse into the equivalent [`Ex`].
    #[must_use]
    pub fn to_ex(&self) -> Ex {
        let code = self.code().into();
        match self {
            Misuse::AlreadyRegistered { code: offending }
            | Misuse::NotRegistered { code: offending }
            | Misuse::RegistrySealed { code: offending } => Ex::from_parts(
                code,
                CodeDetail {
                    code: offending.clone(),
                },
            ),
            Misuse::DetailTypeMismatch { expected, actual } => Ex::from_parts(
                code,
                DetailTypeMismatchDetail {
                    expected_type: expected.to_string(),
                    actual_type: actual.to_string(),
                },
            ),
        }
    }

    #[cold]
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("{self}")
    }
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ex(), f)
    }
}

impl core::error::Error for Misuse {}

impl From<Misuse> for Ex {
    fn from(misuse: Misuse) -> Self {
        misuse.to_ex()
    }
}
