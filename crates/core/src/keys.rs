//! Composite key construction
//!
//! A composite key is `namespace`, the separator, then `key`. Separator and
//! escape characters inside either part are prefixed with the escape
//! character, so distinct pairs never collide while plain keys such as
//! `test-5` keep their familiar shape.

use fragcache_domain::constants::{KEY_ESCAPE, KEY_SEPARATOR};
use fragcache_domain::CompositeKey;

/// Builds and decomposes composite keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyComposer;

impl KeyComposer {
    /// Composer using the `-` separator
    pub fn new() -> Self {
        Self
    }

    /// Combine a namespace and key into one slot identifier
    pub fn compose(&self, namespace: &str, key: &str) -> CompositeKey {
        let mut composed = String::with_capacity(namespace.len() + key.len() + 1);
        escape_into(&mut composed, namespace);
        composed.push(KEY_SEPARATOR);
        escape_into(&mut composed, key);
        CompositeKey::from_composed(composed)
    }

    /// Recover `(namespace, key)` from a composed key.
    ///
    /// Returns `None` for strings `compose` could not have produced.
    pub fn split(&self, composite: &CompositeKey) -> Option<(String, String)> {
        let mut namespace = None;
        let mut current = String::new();
        let mut chars = composite.as_str().chars();

        while let Some(c) = chars.next() {
            match c {
                KEY_ESCAPE => match chars.next() {
                    Some(escaped @ (KEY_ESCAPE | KEY_SEPARATOR)) => current.push(escaped),
                    _ => return None,
                },
                KEY_SEPARATOR => {
                    if namespace.is_some() {
                        return None;
                    }
                    namespace = Some(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }

        namespace.map(|namespace| (namespace, current))
    }
}

fn escape_into(out: &mut String, part: &str) {
    for c in part.chars() {
        if c == KEY_SEPARATOR || c == KEY_ESCAPE {
            out.push(KEY_ESCAPE);
        }
        out.push(c);
    }
}
