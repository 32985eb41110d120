//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::DiError;
use crate::registration::BindingId;
use crate::token::Token;

/// Deepest dependency chain resolved before giving up with `DepthExceeded`.
pub(crate) const MAX_DEPTH: usize = 1024;

/// Tokens currently being resolved on one call stack, outermost first.
#[derive(Debug, Default)]
pub(crate) struct ResolutionStack {
    frames: Vec<Token>,
}

impl ResolutionStack {
    pub(crate) fn contains(&self, token: &Token) -> bool {
        self.frames.iter().any(|t| t == token)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Marks a token InProgress for as long as the guard lives.
///
/// The frame is popped on drop, so the token returns to idle on success,
/// on error propagation and during panic unwinding.
pub(crate) struct StackGuard<'a> {
    stack: &'a RefCell<ResolutionStack>,
    token: Token,
}

impl<'a> StackGuard<'a> {
    pub(crate) fn enter(
        stack: &'a RefCell<ResolutionStack>,
        token: &Token,
        binding_id: BindingId,
    ) -> Result<Self, DiError> {
        let mut frames = stack.borrow_mut();

        // Circular detection BEFORE pushing the new token
        if frames.contains(token) {
            let path = frames
                .frames
                .iter()
                .chain(std::iter::once(token))
                .map(Token::to_string)
                .collect();
            return Err(DiError::CircularDependency {
                token: token.to_string(),
                binding_id: binding_id.to_string(),
                path,
            });
        }

        if frames.depth() >= MAX_DEPTH {
            return Err(DiError::DepthExceeded(MAX_DEPTH));
        }

        frames.frames.push(token.clone());
        drop(frames);

        Ok(Self {
            stack,
            token: token.clone(),
        })
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        let mut frames = self.stack.borrow_mut();
        if let Some(last) = frames.frames.pop() {
            debug_assert_eq!(last, self.token);
        }
    }
}
