//! In-memory slug store used by the unit tests in this crate.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use regex::Regex;

use crate::entity_creator::{SlugCandidate, SlugStore};
use crate::error::CoreError;
use crate::slug_resolver::{IterationOrder, SlugLookup, SlugScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCandidate {
    pub slug: String,
    pub scope: SlugScope,
}

impl TestCandidate {
    pub fn new(slug: &str, scope: SlugScope) -> Self {
        Self {
            slug: slug.to_string(),
            scope,
        }
    }
}

impl SlugCandidate for TestCandidate {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn scope(&self) -> SlugScope {
        self.scope
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEntity {
    pub id: usize,
    pub slug: String,
}

/// Rows are kept in creation order; the last row is the newest.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(String, SlugScope)>>,
    /// Slugs taken by a writer whose rows the lookup cannot see yet.
    hidden: HashSet<String>,
    fail_lookup: bool,
    fail_insert: bool,
    pub inserts: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn with_rows(rows: &[(&str, SlugScope)]) -> Self {
        Self {
            rows: Mutex::new(rows.iter().map(|(s, scope)| (s.to_string(), *scope)).collect()),
            ..Self::default()
        }
    }

    pub fn with_hidden(mut self, slug: &str) -> Self {
        self.hidden.insert(slug.to_string());
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    pub fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SlugLookup for MemoryStore {
    async fn find_latest_variant(
        &self,
        base: &str,
        scope: SlugScope,
        order: IterationOrder,
    ) -> Result<Option<String>, CoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup {
            return Err(CoreError::storage(
                "find latest variant",
                std::io::Error::other("connection reset"),
            ));
        }

        let re = Regex::new(&crate::slug::variant_pattern(base)).expect("valid pattern");
        let rows = self.rows.lock().expect("lock");
        let mut matches: Vec<(usize, &String)> = rows
            .iter()
            .enumerate()
            .filter(|(_, (slug, row_scope))| *row_scope == scope && re.is_match(slug))
            .map(|(seq, (slug, _))| (seq, slug))
            .collect();

        match order {
            IterationOrder::LatestCreated => {
                matches.sort_by_key(|(seq, _)| std::cmp::Reverse(*seq))
            }
            IterationOrder::HighestSuffix => matches.sort_by_key(|(_, slug)| {
                let suffix = re
                    .captures(slug)
                    .and_then(|caps| caps.get(1))
                    .map_or("", |m| m.as_str());
                std::cmp::Reverse(suffix.parse::<u128>().unwrap_or(u128::MAX))
            }),
        }

        Ok(matches.first().map(|(_, slug)| (*slug).clone()))
    }
}

#[async_trait]
impl SlugStore for MemoryStore {
    type Candidate = TestCandidate;
    type Entity = TestEntity;

    fn entity_name(&self) -> &'static str {
        "TestEntity"
    }

    async fn insert(&self, candidate: &TestCandidate) -> Result<TestEntity, CoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert {
            return Err(CoreError::storage(
                "insert test entity",
                std::io::Error::other("disk full"),
            ));
        }

        let mut rows = self.rows.lock().expect("lock");
        let taken = self.hidden.contains(&candidate.slug)
            || rows
                .iter()
                .any(|(slug, scope)| *slug == candidate.slug && *scope == candidate.scope);
        if taken {
            return Err(CoreError::AlreadyExists {
                entity: "TestEntity",
                slug: candidate.slug.clone(),
            });
        }

        rows.push((candidate.slug.clone(), candidate.scope));
        Ok(TestEntity {
            id: rows.len(),
            slug: candidate.slug.clone(),
        })
    }
}
