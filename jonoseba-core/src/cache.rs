use std::collections::HashMap;

use crate::model::{Complaint, ContentKey, GalleryImage, NewsItem, SiteContentBlock};

/// Identity of a cached query, mirroring the query keys of the original
/// site: one per public section plus the admin variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Content(ContentKey),
    AdminContent,
    News,
    AdminNews,
    Gallery,
    AdminGallery,
    AdminComplaints,
}

/// Mutations that complete against the remote store. Each one invalidates a
/// fixed set of query identities, listed in [`invalidations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ContentUpsert,
    NewsInsert,
    NewsDelete,
    GalleryInsert,
    GalleryDelete,
    ComplaintInsert,
    ComplaintStatusUpdate,
}

/// The mutation → invalidated-queries mapping as one static table. A content
/// save invalidates every per-key content query, the same way the original
/// invalidated the whole `site-content` prefix.
pub const fn invalidations(mutation: Mutation) -> &'static [QueryKey] {
    match mutation {
        Mutation::ContentUpsert => &[
            QueryKey::AdminContent,
            QueryKey::Content(ContentKey::Hero),
            QueryKey::Content(ContentKey::Biography),
            QueryKey::Content(ContentKey::Vision),
        ],
        Mutation::NewsInsert | Mutation::NewsDelete => &[QueryKey::News, QueryKey::AdminNews],
        Mutation::GalleryInsert | Mutation::GalleryDelete => {
            &[QueryKey::Gallery, QueryKey::AdminGallery]
        }
        Mutation::ComplaintInsert | Mutation::ComplaintStatusUpdate => {
            &[QueryKey::AdminComplaints]
        }
    }
}

/// Lifecycle of one cached query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    NotAsked,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A query slot: last-known result plus staleness. Invalidation keeps the
/// old data visible while the refetch is in flight.
#[derive(Debug, Clone)]
pub struct Query<T> {
    pub state: QueryState<T>,
    stale: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            state: QueryState::NotAsked,
            stale: false,
        }
    }
}

impl<T> Query<T> {
    /// True when the next access should trigger a fetch.
    pub fn needs_fetch(&self) -> bool {
        match self.state {
            QueryState::NotAsked => true,
            QueryState::Loading => false,
            QueryState::Ready(_) | QueryState::Failed(_) => self.stale,
        }
    }

    pub fn begin(&mut self) {
        self.stale = false;
        self.state = QueryState::Loading;
    }

    pub fn resolve(&mut self, result: Result<T, String>) {
        self.state = match result {
            Ok(data) => QueryState::Ready(data),
            Err(message) => QueryState::Failed(message),
        };
    }

    fn mark_stale(&mut self) {
        self.stale = true;
    }
}

/// All cached queries of the running app. Entries live for the whole
/// session; only invalidation forces a refetch.
#[derive(Default)]
pub struct QueryCache {
    pub content: HashMap<ContentKey, Query<Option<SiteContentBlock>>>,
    pub admin_content: Query<Vec<SiteContentBlock>>,
    pub news: Query<Vec<NewsItem>>,
    pub admin_news: Query<Vec<NewsItem>>,
    pub gallery: Query<Vec<GalleryImage>>,
    pub admin_gallery: Query<Vec<GalleryImage>>,
    pub admin_complaints: Query<Vec<Complaint>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_query(&mut self, key: ContentKey) -> &mut Query<Option<SiteContentBlock>> {
        self.content.entry(key).or_default()
    }

    /// Marks every query the mutation affects stale, synchronously, as part
    /// of the mutation's completion.
    pub fn apply(&mut self, mutation: Mutation) {
        for key in invalidations(mutation) {
            self.mark_stale(*key);
        }
    }

    fn mark_stale(&mut self, key: QueryKey) {
        match key {
            QueryKey::Content(content_key) => self.content_query(content_key).mark_stale(),
            QueryKey::AdminContent => self.admin_content.mark_stale(),
            QueryKey::News => self.news.mark_stale(),
            QueryKey::AdminNews => self.admin_news.mark_stale(),
            QueryKey::Gallery => self.gallery.mark_stale(),
            QueryKey::AdminGallery => self.admin_gallery.mark_stale(),
            QueryKey::AdminComplaints => self.admin_complaints.mark_stale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_query_needs_fetch_once() {
        let mut query: Query<Vec<NewsItem>> = Query::default();
        assert!(query.needs_fetch());

        query.begin();
        assert!(query.state.is_loading());
        assert!(!query.needs_fetch());

        query.resolve(Ok(Vec::new()));
        assert!(!query.needs_fetch());
    }

    #[test]
    fn invalidation_keeps_data_but_forces_refetch() {
        let mut cache = QueryCache::new();
        cache.news.begin();
        cache.news.resolve(Ok(Vec::new()));

        cache.apply(Mutation::NewsInsert);
        assert!(cache.news.needs_fetch());
        assert!(cache.news.state.data().is_some());
    }

    #[test]
    fn news_mutations_touch_both_news_queries_and_nothing_else() {
        let mut cache = QueryCache::new();
        for query in [&mut cache.news, &mut cache.admin_news] {
            query.begin();
            query.resolve(Ok(Vec::new()));
        }
        cache.gallery.begin();
        cache.gallery.resolve(Ok(Vec::new()));
        cache.admin_complaints.begin();
        cache.admin_complaints.resolve(Ok(Vec::new()));

        cache.apply(Mutation::NewsDelete);
        assert!(cache.news.needs_fetch());
        assert!(cache.admin_news.needs_fetch());
        assert!(!cache.gallery.needs_fetch());
        assert!(!cache.admin_complaints.needs_fetch());
    }

    #[test]
    fn content_upsert_invalidates_every_section_key() {
        let keys = invalidations(Mutation::ContentUpsert);
        assert!(keys.contains(&QueryKey::AdminContent));
        for key in ContentKey::ALL {
            assert!(keys.contains(&QueryKey::Content(key)));
        }
    }

    #[test]
    fn complaint_mutations_only_touch_the_admin_list() {
        assert_eq!(
            invalidations(Mutation::ComplaintInsert),
            &[QueryKey::AdminComplaints]
        );
        assert_eq!(
            invalidations(Mutation::ComplaintStatusUpdate),
            &[QueryKey::AdminComplaints]
        );
    }

    #[test]
    fn failed_query_refetches_after_invalidation() {
        let mut cache = QueryCache::new();
        cache.gallery.begin();
        cache.gallery.resolve(Err("HTTP 500".to_string()));
        assert!(!cache.gallery.needs_fetch());

        cache.apply(Mutation::GalleryInsert);
        assert!(cache.gallery.needs_fetch());
    }
}
