//! Handler resolution with ancestor fallback.
//!
//! A visitor declares which kinds it renders directly. For any other kind the
//! resolver walks the ancestor chain and uses the first handled kind. Results
//! are memoised process-wide per `(visitor, kind)`; concurrent misses compute
//! the same answer, so a second write is harmless.

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::ast::Kind;
use crate::error::{CompileError, CompileResult};

/// Something that can be dispatched on node kinds.
pub trait Visitor {
    /// Stable identity of the visitor type, used as the cache key.
    fn name(&self) -> &'static str;

    /// Whether the visitor has a handler for exactly this kind.
    fn handles(&self, kind: Kind) -> bool;
}

static DISPATCH_CACHE: Lazy<DashMap<(&'static str, Kind), Option<Kind>>> = Lazy::new(DashMap::new);

/// The kind whose handler renders `kind` for this visitor.
pub fn resolve<V: Visitor + ?Sized>(visitor: &V, kind: Kind) -> CompileResult<Kind> {
    let key = (visitor.name(), kind);
    let hit = DISPATCH_CACHE.get(&key).map(|entry| *entry);
    let resolved = match hit {
        Some(resolved) => resolved,
        None => {
            let found = kind.ancestors().find(|k| visitor.handles(*k));
            tracing::trace!(
                visitor = visitor.name(),
                kind = %kind,
                handler = ?found,
                "dispatch cache miss"
            );
            DISPATCH_CACHE.insert(key, found);
            found
        }
    };
    resolved.ok_or(CompileError::UnsupportedVisit(kind))
}

/// The cached resolution for `(visitor, kind)`, if one has been recorded.
pub fn cached(visitor: &'static str, kind: Kind) -> Option<Option<Kind>> {
    DISPATCH_CACHE.get(&(visitor, kind)).map(|entry| *entry)
}
