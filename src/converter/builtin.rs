use core::{error::Error, fmt, marker::PhantomData};

use super::{ErrorConverter, Next};
use crate::{
    Ex, markers,
    reserved::{self, UnknownErrorDetail},
};

/// A converter that resolves nothing and always delegates.
///
/// On its own, at the end of a chain, it returns `None` for every input.
#[derive(Copy, Clone, Debug, Default)]
pub struct Delegate;

impl ErrorConverter for Delegate {}

/// Returns errors that already are an [`Ex`] unchanged and delegates
/// everything else.
///
/// Meant to be the first converter of a chain, so that classified errors are
/// never wrapped a second time.
#[derive(Copy, Clone, Debug, Default)]
pub struct Passthrough;

impl ErrorConverter for Passthrough {
    fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
        match markers::as_ex(err) {
            Some(ex) => Some(ex.clone()),
            None => next.convert(err),
        }
    }
}

/// Classifies every error as [`UNKNOWN_ERROR`](crate::UNKNOWN_ERROR), with
/// its message (and the messages of its sources) as detail.
///
/// Meant to be the last converter of a chain: it never delegates, so nothing
/// placed after it runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnknownConverter;

impl UnknownConverter {
    /// Classifies `err` as an unknown error.
    #[must_use]
    pub fn classify(&self, err: &(dyn Error + 'static)) -> Ex {
        Ex::from_parts(
            reserved::UNKNOWN_ERROR.into(),
            UnknownErrorDetail::from_error(err),
        )
    }
}

impl ErrorConverter for UnknownConverter {
    fn convert(&self, err: &(dyn Error + 'static), _next: Next<'_>) -> Option<Ex> {
        Some(self.classify(err))
    }
}

/// A converter backed by a closure, see [`from_fn`].
#[derive(Copy, Clone)]
pub struct FnConverter<F> {
    f: F,
}

impl<F> fmt::Debug for FnConverter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}

/// Creates a converter from a closure returning `Some` for the errors it
/// resolves. Errors for which it returns `None` are delegated.
///
/// # Examples
///
/// ```
/// use errorex::{converter, register_error_code};
///
/// let empty = register_error_code::<()>("docs.fn.empty", "Empty message");
///
/// let chain = errorex::ConverterChain::builder()
///     .with(converter::from_fn(move |err| {
///         err.to_string().is_empty().then(|| empty.new(()))
///     }))
///     .build();
///
/// assert!(chain.convert(&std::io::Error::other("")).is_some());
/// assert!(chain.convert(&std::io::Error::other("not empty")).is_none());
/// ```
pub fn from_fn<F>(f: F) -> FnConverter<F>
where
    F: Fn(&(dyn Error + 'static)) -> Option<Ex> + Send + Sync + 'static,
{
    FnConverter { f }
}

impl<F> ErrorConverter for FnConverter<F>
where
    F: Fn(&(dyn Error + 'static)) -> Option<Ex> + Send + Sync + 'static,
{
    fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
        (self.f)(err).or_else(|| next.convert(err))
    }
}

/// A converter resolving every error of type `E`, see [`downcast`].
pub struct DowncastConverter<E, F> {
    map: F,
    _error: PhantomData<fn(&E)>,
}

impl<E, F: Clone> Clone for DowncastConverter<E, F> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            _error: PhantomData,
        }
    }
}

impl<E, F> fmt::Debug for DowncastConverter<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DowncastConverter")
            .field("error", &core::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}

/// Creates a converter that resolves every error of the concrete type `E`
/// with `map`, and delegates errors of any other type.
///
/// Only the error itself is inspected, not its sources.
pub fn downcast<E, F>(map: F) -> DowncastConverter<E, F>
where
    E: Error + 'static,
    F: Fn(&E) -> Ex + Send + Sync + 'static,
{
    DowncastConverter {
        map,
        _error: PhantomData,
    }
}

impl<E, F> ErrorConverter for DowncastConverter<E, F>
where
    E: Error + 'static,
    F: Fn(&E) -> Ex + Send + Sync + 'static,
{
    fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
        match err.downcast_ref::<E>() {
            Some(err) => Some((self.map)(err)),
            None => next.convert(err),
        }
    }

    fn name(&self) -> &'static str {
        core::any::type_name::<E>()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{boxed::Box, string::ToString, vec, vec::Vec};

    use super::*;
    use crate::{UNKNOWN_ERROR, is, register_error_code};

    #[derive(Debug, thiserror::Error)]
    #[error("test error")]
    struct TestError;

    fn tail(converter: impl ErrorConverter) -> Vec<Box<dyn ErrorConverter>> {
        vec![Box::new(converter)]
    }

    #[test]
    fn test_converters_send_sync() {
        static_assertions::assert_impl_all!(Delegate: ErrorConverter, Copy);
        static_assertions::assert_impl_all!(Passthrough: ErrorConverter, Copy);
        static_assertions::assert_impl_all!(UnknownConverter: ErrorConverter, Copy);
    }

    #[test]
    fn test_delegate_without_successor_returns_none() {
        assert!(Next::end().is_end());
        assert!(Delegate.convert(&TestError, Next::end()).is_none());
    }

    #[test]
    fn test_delegate_with_successor_delegates() {
        let rest = tail(UnknownConverter);
        assert!(!Next::new(&rest).is_end());
        let ex = Delegate.convert(&TestError, Next::new(&rest)).unwrap();
        assert!(is(Some(&ex), UNKNOWN_ERROR));
    }

    #[test]
    fn test_passthrough_returns_same_ex() {
        let ex = UnknownConverter.classify(&TestError);
        let out = Passthrough.convert(&ex, Next::end()).unwrap();
        assert!(out.ptr_eq(&ex));
    }

    #[test]
    fn test_passthrough_delegates_foreign_errors() {
        assert!(Passthrough.convert(&TestError, Next::end()).is_none());

        let rest = tail(UnknownConverter);
        let out = Passthrough.convert(&TestError, Next::new(&rest)).unwrap();
        assert_eq!(out.code(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_unknown_converter_ignores_successor() {
        let rest = tail(Passthrough);
        let out = UnknownConverter.convert(&TestError, Next::new(&rest)).unwrap();
        assert_eq!(
            out.to_string(),
            r#"{"code": "errorex.000", "detail": {"detail":"test error"}}"#
        );
    }

    #[test]
    fn test_from_fn_delegates_on_none() {
        let converter = from_fn(|_| None);
        assert!(converter.convert(&TestError, Next::end()).is_none());

        let rest = tail(UnknownConverter);
        assert!(converter.convert(&TestError, Next::new(&rest)).is_some());
    }

    #[test]
    fn test_downcast_matches_concrete_type_only() {
        let code = register_error_code::<alloc::string::String>(
            "converter.test.downcast",
            "Downcast test",
        );
        let converter = downcast(move |err: &TestError| code.new(err.to_string()));

        let out = converter.convert(&TestError, Next::end()).unwrap();
        assert_eq!(out.code(), "converter.test.downcast");
        assert!(
            converter
                .convert(&std::io::Error::other("test error"), Next::end())
                .is_none()
        );
        assert!(converter.name().ends_with("TestError"));
    }
}
