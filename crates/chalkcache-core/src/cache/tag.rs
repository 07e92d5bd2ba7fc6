use std::collections::{HashMap, HashSet};

use super::key::CacheKey;

/// Entity families the dashboard caches, one kind per resource group
/// (plus the approval queue, which is tagged separately from the roster
/// so rejecting a pending teacher does not stale every teacher list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Teacher,
    TeacherRequest,
    LeaveRequest,
    Attendance,
    Salary,
    Schedule,
    Student,
    Dashboard,
    Auth,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Teacher => "Teacher",
            TagKind::TeacherRequest => "TeacherRequest",
            TagKind::LeaveRequest => "LeaveRequest",
            TagKind::Attendance => "Attendance",
            TagKind::Salary => "Salary",
            TagKind::Schedule => "Schedule",
            TagKind::Student => "Student",
            TagKind::Dashboard => "Dashboard",
            TagKind::Auth => "Auth",
        }
    }
}

/// Either one concrete entity or the collection-as-a-whole sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagId {
    List,
    Id(String),
}

/// Label attached to cached data to target invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    pub id: TagId,
}

impl Tag {
    /// The collection sentinel for a kind, e.g. `("LeaveRequest", "LIST")`.
    pub fn list(kind: TagKind) -> Self {
        Self {
            kind,
            id: TagId::List,
        }
    }

    /// A single-entity tag, e.g. `("LeaveRequest", "64f...")`.
    pub fn id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: TagId::Id(id.into()),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            TagId::List => write!(f, "{}:LIST", self.kind.as_str()),
            TagId::Id(id) => write!(f, "{}:{}", self.kind.as_str(), id),
        }
    }
}

/// Inverted index from tag to the cache keys currently providing it.
///
/// Kept consistent with the union of every entry's tag set: indexing and
/// de-indexing happen in the same locked step as the entry write. All
/// operations are O(changed tags), not O(entries).
#[derive(Debug, Default)]
pub struct TagIndex {
    by_tag: HashMap<Tag, HashSet<CacheKey>>,
    by_key: HashMap<CacheKey, HashSet<Tag>>,
}

impl TagIndex {
    /// Replace `key`'s tag set: remove it from every bucket it was in, then
    /// add it to the buckets for `tags`.
    pub fn index(&mut self, key: &CacheKey, tags: &[Tag]) {
        self.remove(key);

        if tags.is_empty() {
            return;
        }

        let mut set = HashSet::with_capacity(tags.len());
        for tag in tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
            set.insert(tag.clone());
        }
        self.by_key.insert(key.clone(), set);
    }

    /// Drop `key` from the index entirely (entry eviction).
    pub fn remove(&mut self, key: &CacheKey) {
        let Some(old_tags) = self.by_key.remove(key) else {
            return;
        };
        for tag in old_tags {
            if let Some(bucket) = self.by_tag.get_mut(&tag) {
                bucket.remove(key);
                if bucket.is_empty() {
                    self.by_tag.remove(&tag);
                }
            }
        }
    }

    /// Cache keys currently providing `tag`.
    pub fn lookup(&self, tag: &Tag) -> Vec<CacheKey> {
        self.by_tag
            .get(tag)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Union of keys providing any of `tags`, deduplicated.
    pub fn lookup_all(&self, tags: &[Tag]) -> Vec<CacheKey> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for tag in tags {
            if let Some(bucket) = self.by_tag.get(tag) {
                for key in bucket {
                    if seen.insert(key.clone()) {
                        keys.push(key.clone());
                    }
                }
            }
        }
        keys
    }

    /// Tags currently provided by `key`.
    pub fn tags_of(&self, key: &CacheKey) -> Vec<Tag> {
        self.by_key
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn key(name: &str) -> CacheKey {
        CacheKey::new(name, &Value::Null)
    }

    #[test]
    fn test_index_and_lookup() {
        let mut index = TagIndex::default();
        let list_key = key("getLeaveRequests");
        index.index(
            &list_key,
            &[
                Tag::list(TagKind::LeaveRequest),
                Tag::id(TagKind::LeaveRequest, "a1"),
            ],
        );

        assert_eq!(index.lookup(&Tag::list(TagKind::LeaveRequest)), vec![list_key.clone()]);
        assert_eq!(
            index.lookup(&Tag::id(TagKind::LeaveRequest, "a1")),
            vec![list_key]
        );
        assert!(index.lookup(&Tag::id(TagKind::LeaveRequest, "b2")).is_empty());
    }

    #[test]
    fn test_reindex_replaces_old_buckets() {
        let mut index = TagIndex::default();
        let k = key("getLeaveRequests");
        index.index(&k, &[Tag::id(TagKind::LeaveRequest, "a1")]);
        // Refetch returned a different record set
        index.index(&k, &[Tag::id(TagKind::LeaveRequest, "b2")]);

        assert!(index.lookup(&Tag::id(TagKind::LeaveRequest, "a1")).is_empty());
        assert_eq!(index.lookup(&Tag::id(TagKind::LeaveRequest, "b2")), vec![k]);
    }

    #[test]
    fn test_remove_cleans_empty_buckets() {
        let mut index = TagIndex::default();
        let k = key("getAllTeachers");
        index.index(&k, &[Tag::list(TagKind::Teacher)]);
        index.remove(&k);

        assert!(index.lookup(&Tag::list(TagKind::Teacher)).is_empty());
        assert!(index.tags_of(&k).is_empty());
    }

    #[test]
    fn test_lookup_all_deduplicates() {
        let mut index = TagIndex::default();
        let k = key("getAllTeachers");
        index.index(
            &k,
            &[Tag::list(TagKind::Teacher), Tag::id(TagKind::Teacher, "t1")],
        );

        let keys = index.lookup_all(&[
            Tag::list(TagKind::Teacher),
            Tag::id(TagKind::Teacher, "t1"),
        ]);
        assert_eq!(keys, vec![k]);
    }

    #[test]
    fn test_shared_tag_spans_keys() {
        let mut index = TagIndex::default();
        let list_key = key("getLeaveRequests");
        let detail_key = key("getLeaveRequestById");
        index.index(
            &list_key,
            &[
                Tag::list(TagKind::LeaveRequest),
                Tag::id(TagKind::LeaveRequest, "a1"),
            ],
        );
        index.index(&detail_key, &[Tag::id(TagKind::LeaveRequest, "a1")]);

        let mut keys = index.lookup(&Tag::id(TagKind::LeaveRequest, "a1"));
        keys.sort();
        let mut expected = vec![list_key, detail_key];
        expected.sort();
        assert_eq!(keys, expected);
    }
}
