//! Static validation of the declared dependency graph.
//!
//! Walks declared dependencies without running any activator, so missing
//! bindings and cycles surface before the first resolution. Dependencies a
//! factory resolves by hand through the container token are invisible here.

use std::collections::HashMap;

use crate::error::{DiError, DiResult};
use crate::internal::MAX_DEPTH;
use crate::registration::Registry;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Validates every binding in registration order and reports the first
/// problem found.
pub(crate) fn validate_graph(registry: &Registry) -> DiResult<()> {
    let mut marks: HashMap<Token, Mark> = HashMap::new();
    let mut path: Vec<Token> = Vec::new();

    for (token, _) in registry.iter() {
        visit(registry, token, &mut marks, &mut path)?;
    }
    Ok(())
}

fn visit(
    registry: &Registry,
    token: &Token,
    marks: &mut HashMap<Token, Mark>,
    path: &mut Vec<Token>,
) -> DiResult<()> {
    let registration = registry.get(token).ok_or_else(|| DiError::UnresolvedDependency {
        token: token.to_string(),
    })?;

    match marks.get(token) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|t| t == token).unwrap_or(0);
            let cycle = path[start..]
                .iter()
                .chain(std::iter::once(token))
                .map(Token::to_string)
                .collect();
            return Err(DiError::CircularDependency {
                token: token.to_string(),
                binding_id: registration.id.to_string(),
                path: cycle,
            });
        }
        None => {}
    }

    if path.len() >= MAX_DEPTH {
        return Err(DiError::DepthExceeded(MAX_DEPTH));
    }

    marks.insert(token.clone(), Mark::Visiting);
    path.push(token.clone());
    for dependency in registration.dependencies.iter() {
        visit(registry, dependency, marks, path)?;
    }
    path.pop();
    marks.insert(token.clone(), Mark::Done);
    Ok(())
}
