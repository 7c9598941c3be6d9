//! The post store - owns the post collection and mirrors it to a blob store.
//!
//! Every mutation rewrites the whole collection. Persistence is best-effort:
//! a failed write is recorded in [`PostStore::error`] and flagged by
//! [`PostStore::has_unsaved_changes`], but the in-memory change stands.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{IdGenerator, Post, PostDraft, PostId};
use crate::error::StoreError;
use crate::ports::BlobStore;

/// Key the post collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "blog_posts";

/// Post store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Blob store key holding the serialized collection.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Authoritative post collection, newest first.
pub struct PostStore {
    blob: Arc<dyn BlobStore>,
    config: StoreConfig,
    posts: Vec<Post>,
    ids: IdGenerator,
    loading: bool,
    error: Option<StoreError>,
    unsaved_changes: bool,
}

impl PostStore {
    /// Create the store and load the saved collection.
    ///
    /// Load failures do not fail construction; they are left in [`Self::error`].
    pub async fn open(blob: Arc<dyn BlobStore>, config: StoreConfig) -> Self {
        let mut store = Self {
            blob,
            config,
            posts: Vec::new(),
            ids: IdGenerator::new(),
            loading: true,
            error: None,
            unsaved_changes: false,
        };
        store.load().await;
        store
    }

    /// Read the collection from the blob store, replacing the in-memory posts.
    ///
    /// On failure the current posts are kept (empty on first load).
    pub async fn load(&mut self) {
        self.loading = true;

        match self.read_posts().await {
            Ok(posts) => {
                self.posts = posts;
                for post in &self.posts {
                    self.ids.observe(post.id());
                }
                self.error = None;
                self.unsaved_changes = false;
                tracing::debug!(count = self.posts.len(), "Posts loaded");
            }
            Err(e) => {
                tracing::error!(error = %e, key = %self.config.storage_key, "Error loading posts");
                self.error = Some(e);
            }
        }

        self.loading = false;
    }

    async fn read_posts(&self) -> Result<Vec<Post>, StoreError> {
        let bytes = self
            .blob
            .get(&self.config.storage_key)
            .await
            .map_err(|e| StoreError::Load(e.to_string()))?;

        let Some(bytes) = bytes else {
            return Ok(Vec::new());
        };

        let parsed: Vec<Post> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Load(e.to_string()))?;

        let mut seen = HashSet::with_capacity(parsed.len());
        let mut posts = Vec::with_capacity(parsed.len());
        for mut post in parsed {
            if !seen.insert(post.id()) {
                tracing::warn!(post_id = %post.id(), "Dropping saved post with duplicate id");
                continue;
            }
            if post.resync_slug() {
                tracing::debug!(post_id = %post.id(), slug = %post.slug(), "Saved slug did not match title");
            }
            posts.push(post);
        }
        Ok(posts)
    }

    /// Add a new post at the front of the collection.
    pub async fn create(&mut self, draft: PostDraft) -> Post {
        let now = Utc::now();
        let id = match self.ids.next_at(now) {
            Some(id) => id,
            None => {
                let id = self.lowest_free_id();
                tracing::warn!(post_id = %id, "Timestamp ids exhausted, reusing a free id");
                id
            }
        };
        let post = Post::new(id, draft, now);

        if let Some(existing) = self.get_by_slug(post.slug()) {
            tracing::warn!(
                post_id = %id,
                shadowed_by = %existing.id(),
                slug = %post.slug(),
                "New post shares a slug with an existing post"
            );
        }

        tracing::debug!(post_id = %id, slug = %post.slug(), "Post created");
        self.posts.insert(0, post.clone());
        self.persist().await;
        post
    }

    /// Smallest positive id no post holds. Fewer posts than ids always exist.
    fn lowest_free_id(&self) -> PostId {
        let taken: HashSet<u64> = self.posts.iter().map(|post| post.id().get()).collect();
        let free = (1..=u64::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or_default();
        PostId::new(free)
    }

    /// Replace the editable fields of a post.
    ///
    /// Returns `None` without touching storage when no post has `id`.
    pub async fn update(&mut self, id: PostId, draft: PostDraft) -> Option<Post> {
        let Some(post) = self.posts.iter_mut().find(|post| post.id() == id) else {
            tracing::debug!(post_id = %id, "Update skipped, no such post");
            return None;
        };

        post.apply(draft);
        let updated = post.clone();

        tracing::debug!(post_id = %id, slug = %updated.slug(), "Post updated");
        self.persist().await;
        Some(updated)
    }

    /// Remove a post. A missing id is not an error.
    pub async fn delete(&mut self, id: PostId) -> Option<Post> {
        let Some(index) = self.posts.iter().position(|post| post.id() == id) else {
            tracing::debug!(post_id = %id, "Delete skipped, no such post");
            return None;
        };

        let removed = self.posts.remove(index);
        tracing::debug!(post_id = %id, "Post deleted");
        self.persist().await;
        Some(removed)
    }

    pub fn get_by_id(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id() == id)
    }

    /// First post (in display order) with this slug.
    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug() == slug)
    }

    /// Every post with this slug. Only the first is reachable through [`Self::get_by_slug`].
    pub fn find_all_by_slug(&self, slug: &str) -> Vec<&Post> {
        self.posts.iter().filter(|post| post.slug() == slug).collect()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure from the last load or write-back, if any.
    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// `true` while the saved collection lags behind memory.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    async fn persist(&mut self) {
        match self.write_posts().await {
            Ok(()) => {
                self.error = None;
                self.unsaved_changes = false;
            }
            Err(e) => {
                tracing::error!(error = %e, key = %self.config.storage_key, "Error saving posts");
                self.error = Some(e);
                self.unsaved_changes = true;
            }
        }
    }

    async fn write_posts(&self) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(&self.posts).map_err(|e| StoreError::Save(e.to_string()))?;
        self.blob
            .set(&self.config.storage_key, &bytes)
            .await
            .map_err(|e| StoreError::Save(e.to_string()))
    }
}

impl fmt::Debug for PostStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostStore")
            .field("storage_key", &self.config.storage_key)
            .field("posts", &self.posts.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("unsaved_changes", &self.unsaved_changes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::generate_slug;
    use crate::ports::BlobStoreError;

    /// Blob store whose reads and writes can be switched off.
    #[derive(Default)]
    struct TestBlobStore {
        values: Mutex<HashMap<String, Vec<u8>>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl TestBlobStore {
        fn with_value(key: &str, value: &[u8]) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            store
        }

        fn raw(&self, key: &str) -> Option<Vec<u8>> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl BlobStore for TestBlobStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(BlobStoreError::Io(std::io::Error::other("disk unavailable")));
            }
            Ok(self.raw(key))
        }

        async fn set(&self, key: &str, value: &[u8]) -> Result<(), BlobStoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(BlobStoreError::QuotaExceeded {
                    size: value.len(),
                    quota: 0,
                });
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }
    }

    fn draft(title: &str, author: &str) -> PostDraft {
        PostDraft::new(title, format!("All about {title}"), author, None).unwrap()
    }

    async fn open(blob: &Arc<TestBlobStore>) -> PostStore {
        PostStore::open(blob.clone(), StoreConfig::default()).await
    }

    #[tokio::test]
    async fn test_open_without_saved_posts() {
        let blob = Arc::new(TestBlobStore::default());
        let store = open(&blob).await;
        assert!(store.posts().is_empty());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_create_then_get_by_id() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;

        let created = store.create(draft("Hello, World!", "Ada")).await;
        let found = store.get_by_id(created.id()).unwrap();

        assert_eq!(found.title(), "Hello, World!");
        assert_eq!(found.content(), "All about Hello, World!");
        assert_eq!(found.author(), "Ada");
        assert_eq!(found.slug(), generate_slug("Hello, World!"));
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_create_prepends_with_unique_ids() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;

        let first = store.create(draft("First", "Ada")).await;
        let second = store.create(draft("Second", "Ada")).await;

        assert_ne!(first.id(), second.id());
        let titles: Vec<_> = store.posts().iter().map(Post::title).collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[tokio::test]
    async fn test_create_persists_collection() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        store.create(draft("Persisted", "Ada")).await;

        let raw = blob.raw(DEFAULT_STORAGE_KEY).unwrap();
        let saved: Vec<Post> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(saved, store.posts());
    }

    #[tokio::test]
    async fn test_update_changes_slug_not_identity() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let original = store.create(draft("Old title", "Ada")).await;

        let updated = store
            .update(original.id(), draft("Brand new title", "Grace"))
            .await
            .unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.slug(), "brand-new-title");
        assert_eq!(updated.author(), "Grace");
        assert!(store.get_by_slug("old-title").is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_order() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let a = store.create(draft("A", "Ada")).await;
        store.create(draft("B", "Ada")).await;
        store.create(draft("C", "Ada")).await;

        store.update(a.id(), draft("A2", "Ada")).await;

        let titles: Vec<_> = store.posts().iter().map(Post::title).collect();
        assert_eq!(titles, ["C", "B", "A2"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_silent_noop() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        store.create(draft("Only", "Ada")).await;
        let before = store.posts().to_vec();

        assert!(store.update(PostId::new(1), draft("Ghost", "Ada")).await.is_none());
        assert_eq!(store.posts(), before.as_slice());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_silent_noop() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        store.create(draft("Keep me", "Ada")).await;
        let before = store.posts().to_vec();

        assert!(store.delete(PostId::new(12345)).await.is_none());
        assert_eq!(store.posts(), before.as_slice());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_and_persists() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let a = store.create(draft("A", "Ada")).await;
        let b = store.create(draft("B", "Ada")).await;

        let removed = store.delete(a.id()).await.unwrap();
        assert_eq!(removed.id(), a.id());
        assert!(store.get_by_id(a.id()).is_none());

        let saved: Vec<Post> =
            serde_json::from_slice(&blob.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), b.id());
    }

    #[tokio::test]
    async fn test_reload_round_trip() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        store
            .create(PostDraft::new("With image", "Body", "Ada", Some("https://img.test/a.png")).unwrap())
            .await;
        store.create(draft("Without image", "Grace")).await;

        let reopened = open(&blob).await;
        assert_eq!(reopened.posts(), store.posts());
    }

    #[tokio::test]
    async fn test_ids_stay_unique_after_reload() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let first = store.create(draft("First", "Ada")).await;

        let mut reopened = open(&blob).await;
        let second = reopened.create(draft("Second", "Ada")).await;
        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn test_corrupt_blob_sets_load_error() {
        let blob = Arc::new(TestBlobStore::with_value(DEFAULT_STORAGE_KEY, b"{not json"));
        let store = open(&blob).await;

        assert!(store.posts().is_empty());
        assert!(!store.is_loading());
        assert!(matches!(store.error(), Some(StoreError::Load(_))));
    }

    #[tokio::test]
    async fn test_unreadable_blob_sets_load_error() {
        let blob = Arc::new(TestBlobStore::default());
        blob.fail_reads.store(true, Ordering::SeqCst);
        let store = open(&blob).await;

        assert!(store.posts().is_empty());
        assert!(!store.is_loading());
        match store.error() {
            Some(StoreError::Load(message)) => assert!(message.contains("disk unavailable")),
            other => panic!("expected a load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_posts() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let post = store.create(draft("Kept", "Ada")).await;

        blob.fail_reads.store(true, Ordering::SeqCst);
        store.load().await;

        assert!(store.get_by_id(post.id()).is_some());
        assert!(!store.is_loading());
        assert!(matches!(store.error(), Some(StoreError::Load(_))));
    }

    #[tokio::test]
    async fn test_load_accepts_posts_without_created_at() {
        let json = br#"[{"id":1704412800000,"title":"Legacy","content":"Body","author":"Ada","slug":"legacy"}]"#;
        let blob = Arc::new(TestBlobStore::with_value(DEFAULT_STORAGE_KEY, json));
        let store = open(&blob).await;

        assert!(store.error().is_none());
        assert_eq!(store.posts().len(), 1);
        let post = store.get_by_slug("legacy").unwrap();
        assert_eq!(
            post.created_at(),
            "2024-01-05T00:00:00Z".parse::<chrono::DateTime<Utc>>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_after_largest_id_stays_unique() {
        let json = br#"[{"id":18446744073709551615,"title":"Last","content":"Body","author":"Ada","slug":"last","createdAt":"2024-01-05T00:00:00Z"}]"#;
        let blob = Arc::new(TestBlobStore::with_value(DEFAULT_STORAGE_KEY, json));
        let mut store = open(&blob).await;
        assert!(store.error().is_none());

        let first = store.create(draft("One", "Ada")).await;
        let second = store.create(draft("Two", "Ada")).await;

        assert_eq!(store.posts().len(), 3);
        let ids: HashSet<PostId> = store.posts().iter().map(Post::id).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(first.id(), PostId::new(u64::MAX));
        assert_ne!(second.id(), first.id());
        assert_eq!(store.get_by_id(PostId::new(u64::MAX)).unwrap().title(), "Last");
    }

    #[tokio::test]
    async fn test_load_accepts_saved_json() {
        let json = br#"[{"id":1704412800000,"title":"Saved","content":"Body","author":"Ada","slug":"saved","createdAt":"2024-01-05T00:00:00.000Z"}]"#;
        let blob = Arc::new(TestBlobStore::with_value(DEFAULT_STORAGE_KEY, json));
        let store = open(&blob).await;

        let post = store.get_by_slug("saved").unwrap();
        assert_eq!(post.id(), PostId::new(1_704_412_800_000));
        assert_eq!(post.image(), None);
    }

    #[tokio::test]
    async fn test_load_drops_duplicate_ids_and_fixes_slugs() {
        let json = br#"[
            {"id":1,"title":"First Post","content":"a","author":"Ada","slug":"stale","createdAt":"2024-01-05T00:00:00Z"},
            {"id":1,"title":"Copy","content":"b","author":"Ada","slug":"copy","createdAt":"2024-01-05T00:00:00Z"}
        ]"#;
        let blob = Arc::new(TestBlobStore::with_value(DEFAULT_STORAGE_KEY, json));
        let store = open(&blob).await;

        assert_eq!(store.posts().len(), 1);
        assert_eq!(store.posts()[0].slug(), "first-post");
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_state() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        blob.fail_writes.store(true, Ordering::SeqCst);

        let post = store.create(draft("Unsaved", "Ada")).await;

        assert!(store.get_by_id(post.id()).is_some());
        assert!(matches!(store.error(), Some(StoreError::Save(_))));
        assert!(store.has_unsaved_changes());
        assert!(blob.raw(DEFAULT_STORAGE_KEY).is_none());

        blob.fail_writes.store(false, Ordering::SeqCst);
        store.create(draft("Saved", "Ada")).await;

        assert!(store.error().is_none());
        assert!(!store.has_unsaved_changes());
        let saved: Vec<Post> =
            serde_json::from_slice(&blob.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[tokio::test]
    async fn test_slug_collisions_resolve_to_first_match() {
        let blob = Arc::new(TestBlobStore::default());
        let mut store = open(&blob).await;
        let older = store.create(draft("Same Title", "Ada")).await;
        let newer = store.create(draft("Same title!", "Grace")).await;

        assert_eq!(store.get_by_slug("same-title").unwrap().id(), newer.id());
        let all: Vec<_> = store
            .find_all_by_slug("same-title")
            .into_iter()
            .map(Post::id)
            .collect();
        assert_eq!(all, [newer.id(), older.id()]);
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let blob = Arc::new(TestBlobStore::default());
        let config = StoreConfig {
            storage_key: "drafts".to_string(),
        };
        let mut store = PostStore::open(blob.clone(), config).await;
        store.create(draft("Keyed", "Ada")).await;

        assert!(blob.raw("drafts").is_some());
        assert!(blob.raw(DEFAULT_STORAGE_KEY).is_none());
    }
}
