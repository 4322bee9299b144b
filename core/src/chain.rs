//! Persistent, append-only rule sequence.
//!
//! A snoc list of `Arc` links: appending allocates one link pointing at the
//! previous tail, so every older chain stays intact and shares its prefix
//! with every chain derived from it.

use crate::Rule;
use std::sync::Arc;

struct Link<I, O> {
    rule: Box<dyn Rule<I, O>>,
    prev: Option<Arc<Link<I, O>>>,
}

impl<I, O> Drop for Link<I, O> {
    // Unlink iteratively so dropping a long, unshared chain cannot overflow the stack.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(link) = prev {
            match Arc::try_unwrap(link) {
                Ok(mut link) => prev = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

pub(crate) struct RuleChain<I, O> {
    tail: Option<Arc<Link<I, O>>>,
    len: usize,
}

impl<I, O> RuleChain<I, O> {
    pub(crate) fn new() -> Self {
        Self { tail: None, len: 0 }
    }

    /// A new chain with `rule` appended. `self` is untouched.
    pub(crate) fn push(&self, rule: Box<dyn Rule<I, O>>) -> Self {
        Self {
            tail: Some(Arc::new(Link {
                rule,
                prev: self.tail.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Rules in declaration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Rule<I, O>> + '_ {
        let mut links = Vec::with_capacity(self.len);
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            links.push(link);
            cursor = link.prev.as_deref();
        }
        links.into_iter().rev().map(|link| &*link.rule)
    }
}

impl<I, O> Clone for RuleChain<I, O> {
    fn clone(&self) -> Self {
        Self {
            tail: self.tail.clone(),
            len: self.len,
        }
    }
}
