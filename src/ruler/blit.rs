use log::trace;

use crate::render::{RenderCacheKey, RenderList};

/// Background captured beneath the ruler for the fast-redraw path.
#[derive(Debug, Clone, Default)]
pub(crate) struct BackgroundCache {
    key: Option<RenderCacheKey>,
    render: RenderList,
}

impl BackgroundCache {
    pub(crate) fn get(&self, key: &RenderCacheKey) -> Option<&RenderList> {
        if self.key.as_ref() == Some(key) {
            trace!(generation = key.generation; "Reusing cached ruler background");
            Some(&self.render)
        } else {
            trace!(generation = key.generation; "Ruler background cache miss");
            None
        }
    }

    pub(crate) fn store(&mut self, key: RenderCacheKey, render: RenderList) {
        self.key = Some(key);
        self.render = render;
    }

    /// Drop the cache when it was captured under another key.
    pub(crate) fn retain_if(&mut self, key: &RenderCacheKey) {
        if self.key.as_ref() != Some(key) {
            self.invalidate();
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.key = None;
        self.render = RenderList::new();
    }

    #[cfg(test)]
    pub(crate) fn is_valid(&self) -> bool {
        self.key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;
    use crate::view::{Range, Viewport};

    fn key(generation: u64) -> RenderCacheKey {
        RenderCacheKey {
            viewport: Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)),
            size: (100, 100),
            generation,
        }
    }

    #[test]
    fn hit_requires_matching_key() {
        let mut cache = BackgroundCache::default();
        let mut render = RenderList::new();
        render.push(RenderCommand::ClipEnd);
        cache.store(key(1), render);
        assert_eq!(cache.get(&key(1)).map(RenderList::len), Some(1));
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn retain_if_drops_stale_background() {
        let mut cache = BackgroundCache::default();
        cache.store(key(1), RenderList::new());
        cache.retain_if(&key(1));
        assert!(cache.is_valid());
        cache.retain_if(&key(2));
        assert!(!cache.is_valid());
    }
}
