//! Internal implementation details.

pub(crate) mod circular;

pub(crate) use circular::{ResolutionStack, StackGuard, MAX_DEPTH};
