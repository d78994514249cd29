use std::collections::HashSet;

use parking_lot::Mutex;

use crate::{ExternalRating, RatingRequest, RatingResolver, ResolveError};

type GuardKey = (Option<i64>, Option<String>);

/// Call-site de-duplication of resolutions.
///
/// A caller keeps one guard for its lifetime; each `(tmdb_id, imdb_id)` pair
/// is resolved at most once through it. Independent callers use independent
/// guards and may still race on the cache.
#[derive(Debug, Default)]
pub struct ResolveGuard {
    issued: Mutex<HashSet<GuardKey>>,
}

impl ResolveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the request's identifier pair. Returns `false` if it was already issued.
    pub fn try_claim(&self, request: &RatingRequest) -> bool {
        let key = (request.tmdb_id, request.imdb_id().map(str::to_string));
        self.issued.lock().insert(key)
    }

    /// Resolve unless this identifier pair has already been issued.
    pub async fn resolve_once(
        &self,
        resolver: &RatingResolver,
        request: &RatingRequest,
    ) -> Option<Result<ExternalRating, ResolveError>> {
        if !self.try_claim(request) {
            tracing::debug!(
                "Skipping duplicate resolution for TMDB {:?} / IMDb {:?}",
                request.tmdb_id,
                request.imdb_id()
            );
            return None;
        }
        Some(resolver.resolve(request).await)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.lock().len()
    }
}
