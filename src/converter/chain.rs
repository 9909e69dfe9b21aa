use alloc::{boxed::Box, vec::Vec};
use core::{error::Error, fmt};

use triomphe::Arc;
use unsize::CoerceUnsize;

use super::{ErrorConverter, Next, UnknownConverter};
use crate::Ex;

/// An ordered, immutable list of [`ErrorConverter`]s.
///
/// Chains are assembled once with [`ConverterChain::builder`]. After that
/// their structure cannot change, so a chain can be shared between threads
/// and used concurrently.
///
/// A chain is itself an [`ErrorConverter`]: nesting one chain inside another
/// runs the inner chain first and delegates to the outer successor if the
/// inner chain returns `None`.
pub struct ConverterChain {
    converters: Vec<Box<dyn ErrorConverter>>,
}

impl ConverterChain {
    /// Starts building a chain.
    #[must_use]
    pub fn builder() -> ConverterChainBuilder {
        ConverterChainBuilder::new()
    }

    /// Runs `err` through the chain.
    ///
    /// Returns `None` when no converter resolved it.
    pub fn convert(&self, err: &(dyn Error + 'static)) -> Option<Ex> {
        Next::new(&self.converters).convert(err)
    }

    /// The number of converters in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns whether the chain has no converters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Iterates over the names of the converters, head first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.converters.iter().map(|converter| converter.name())
    }
}

impl ErrorConverter for ConverterChain {
    fn convert(&self, err: &(dyn Error + 'static), next: Next<'_>) -> Option<Ex> {
        ConverterChain::convert(self, err).or_else(|| next.convert(err))
    }
}

impl fmt::Debug for ConverterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConverterChain")
            .field(&Next::new(&self.converters))
            .finish()
    }
}

/// Builder for [`ConverterChain`], see [`ConverterChain::builder`].
///
/// Converters run in the order they were added.
#[derive(Default)]
pub struct ConverterChainBuilder {
    converters: Vec<Box<dyn ErrorConverter>>,
}

impl fmt::Debug for ConverterChainBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConverterChainBuilder")
            .field(&Next::new(&self.converters))
            .finish()
    }
}

impl ConverterChainBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Appends a converter to the chain.
    #[must_use]
    pub fn with<C: ErrorConverter>(mut self, converter: C) -> Self {
        self.converters.push(Box::new(converter));
        self
    }

    /// Appends an already boxed converter to the chain.
    #[must_use]
    pub fn with_boxed(mut self, converter: Box<dyn ErrorConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> ConverterChain {
        ConverterChain {
            converters: self.converters,
        }
    }

    /// Finishes the chain with a converter that always resolves.
    ///
    /// `last` becomes the final node of the chain, so converters placed
    /// before it see its result through [`Next`]. The resulting chain never
    /// returns `None`.
    #[must_use]
    pub fn build_total<T: TotalConverter>(mut self, last: T) -> TotalConverterChain {
        let last: Arc<dyn TotalConverter> =
            Arc::new(last).unsize(unsize::Coercion!(to dyn TotalConverter));
        self.converters.push(Box::new(TotalNode(last.clone())));
        TotalConverterChain {
            chain: self.build(),
            last,
        }
    }
}

/// A converter that resolves every error.
pub trait TotalConverter: 'static + Send + Sync {
    /// Resolves `err`.
    fn convert_total(&self, err: &(dyn Error + 'static)) -> Ex;

    /// A name for this converter, used when describing a chain.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl TotalConverter for UnknownConverter {
    fn convert_total(&self, err: &(dyn Error + 'static)) -> Ex {
        self.classify(err)
    }
}

impl<F> TotalConverter for F
where
    F: Fn(&(dyn Error + 'static)) -> Ex + Send + Sync + 'static,
{
    fn convert_total(&self, err: &(dyn Error + 'static)) -> Ex {
        self(err)
    }
}

/// The final node of a [`TotalConverterChain`].
struct TotalNode(Arc<dyn TotalConverter>);

impl ErrorConverter for TotalNode {
    fn convert(&self, err: &(dyn Error + 'static), _next: Next<'_>) -> Option<Ex> {
        Some(self.0.convert_total(err))
    }

    fn name(&self) -> &'static str {
        self.0.name()
    }
}

/// A [`ConverterChain`] ending in a [`TotalConverter`], so that every error
/// is classified.
pub struct TotalConverterChain {
    chain: ConverterChain,
    last: Arc<dyn TotalConverter>,
}

impl TotalConverterChain {
    /// Runs `err` through the chain.
    ///
    /// A converter that stops the dispatch without resolving (returning
    /// `None` instead of calling [`Next::convert`]) does not escape the
    /// guarantee: the final converter then resolves `err` directly.
    pub fn convert(&self, err: &(dyn Error + 'static)) -> Ex {
        self.chain
            .convert(err)
            .unwrap_or_else(|| self.last.convert_total(err))
    }

    /// The whole chain, final converter included.
    #[must_use]
    pub fn chain(&self) -> &ConverterChain {
        &self.chain
    }
}

impl ErrorConverter for TotalConverterChain {
    fn convert(&self, err: &(dyn Error + 'static), _next: Next<'_>) -> Option<Ex> {
        Some(TotalConverterChain::convert(self, err))
    }
}

impl fmt::Debug for TotalConverterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TotalConverterChain")
            .field(&Next::new(&self.chain.converters))
            .finish()
    }
}
