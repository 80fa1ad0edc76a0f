//! Resolution of parsed templates against runtime values.

mod context;
mod error;
mod info;
mod resolve;
pub(crate) mod walker;

use std::ops::Range;
use std::sync::Arc;

pub use context::ResolveContext;
pub use error::{ConfigError, ResolveWarning};
pub use info::{ParsingInfo, ResolvingInfo};
pub(crate) use resolve::resolve;

use crate::types::{Attributes, StyledText};

/// Computes the replacement of an input substitution from its content.
pub type InputFn<S> = Arc<dyn Fn(S) -> S + Send + Sync>;

/// Computes the replacement of an output substitution from its content.
pub type OutputFn<D> = Arc<dyn Fn(D) -> D + Send + Sync>;

/// Applies an attribute span over a byte range. Must not change the plain
/// text.
pub type AttributeFn<D> = Arc<dyn Fn(&mut D, Range<usize>) + Send + Sync>;

/// Converts the source representation into the output representation,
/// keeping the plain text unchanged.
pub type IdentityFn<S, D> = Arc<dyn Fn(S) -> D + Send + Sync>;

/// Identity conversion for templates resolved into their own
/// representation.
pub fn identity<S: 'static>() -> IdentityFn<S, S> {
    Arc::new(|source| source)
}

/// Conversion from plain text to styled text carrying `attributes`.
pub fn styled_identity(attributes: Attributes) -> IdentityFn<String, StyledText> {
    Arc::new(move |source| StyledText::new(source, attributes.clone()))
}

/// Wraps a closure as an [`InputFn`] or [`OutputFn`].
pub fn substitution<T>(
    f: impl Fn(T) -> T + Send + Sync + 'static,
) -> Arc<dyn Fn(T) -> T + Send + Sync> {
    Arc::new(f)
}

/// A substitution that ignores the content and always yields `value`.
pub fn constant<T: Clone + Send + Sync + 'static>(
    value: T,
) -> Arc<dyn Fn(T) -> T + Send + Sync> {
    Arc::new(move |_| value.clone())
}
