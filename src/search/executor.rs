//! Search execution across the persisted collections

use super::error::SearchError;
use super::fallback::fallback_suggestions;
use super::models::SearchRequest;
use crate::config::SearchSettings;
use crate::matching::{Needle, RECORD_FIELDS};
use crate::metrics::Metrics;
use crate::models::{Business, Category, Event, Location};
use crate::results::{
    BranchError, BusinessHit, CategoryHit, EventHit, FallbackSuggestions, Pagination,
    SearchResultSet, SearchResults, UnresponsiveCollection,
};
use crate::store::{Collection, RecordStore, StoreError};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Outcome of reading one collection
enum Branch<T> {
    Skipped,
    Ready(Vec<T>),
    Degraded(BranchError),
    Offline(String),
}

impl<T> Branch<T> {
    fn items(&self) -> Option<&[T]> {
        match self {
            Self::Ready(items) => Some(items),
            _ => None,
        }
    }
}

/// Record filters shared by the three collections
struct Filters<'a> {
    needle: &'a Needle,
    city: Option<String>,
    category: Option<&'a str>,
}

impl<'a> Filters<'a> {
    fn new(needle: &'a Needle, request: &'a SearchRequest) -> Self {
        Self {
            needle,
            city: request.city.as_deref().map(|c| c.trim().to_lowercase()),
            category: request.category.as_deref().map(str::trim),
        }
    }

    fn city_matches(&self, city: &str) -> bool {
        self.city
            .as_deref()
            .map_or(true, |wanted| city.to_lowercase().contains(wanted))
    }

    fn business(&self, business: &Business) -> bool {
        self.city_matches(&business.city)
            && self.category.map_or(true, |id| {
                business.category_id == id || business.subcategory_id.as_deref() == Some(id)
            })
            && self.needle.matches(business, RECORD_FIELDS)
    }

    fn event(&self, event: &Event) -> bool {
        self.city_matches(&event.city)
            && self.category.map_or(true, |id| event.category_id == id)
            && self.needle.matches(event, RECORD_FIELDS)
    }

    /// Categories have no city.
    fn category(&self, category: &Category) -> bool {
        self.category.map_or(true, |id| category.id == id)
            && self.needle.matches(category, RECORD_FIELDS)
    }
}

/// Global search over businesses, events and categories
pub struct GlobalSearch {
    store: Arc<dyn RecordStore>,
    settings: SearchSettings,
    metrics: Arc<Metrics>,
}

impl GlobalSearch {
    pub fn new(store: Arc<dyn RecordStore>, settings: SearchSettings) -> Self {
        Self {
            store,
            settings,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Execute a search as of now
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResultSet, SearchError> {
        self.search_at(request, Utc::now()).await
    }

    /// Execute a search, deciding which events are upcoming relative to `now`
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchResultSet, SearchError> {
        let span = info_span!(
            "search",
            request_id = %Uuid::new_v4(),
            store = self.store.name(),
        );
        self.execute(request, now).instrument(span).await
    }

    fn validate(&self, request: &SearchRequest) -> Result<Needle, SearchError> {
        let min = self.settings.min_query_length.max(1);
        match Needle::new(&request.query) {
            Some(needle) if needle.len() >= min => Ok(needle),
            needle => {
                let actual = needle.map_or(0, |n| n.len());
                debug!("Rejecting query of {} characters", actual);
                self.metrics.inc_rejected();
                Err(SearchError::QueryTooShort { min, actual })
            }
        }
    }

    async fn execute(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchResultSet, SearchError> {
        let needle = self.validate(request)?;
        self.metrics.inc_search();

        let timeout = self.settings.effective_timeout(request.timeout_limit);
        let deadline = Instant::now() + timeout;
        let wanted = |collection| request.search_type.includes(collection);

        debug!(
            "Searching '{}' ({:?}) with timeout {:?}",
            needle.as_str(),
            request.search_type,
            timeout
        );

        let (businesses, events, categories) = tokio::join!(
            self.read(
                Collection::Businesses,
                wanted(Collection::Businesses),
                deadline,
                self.store.businesses(),
            ),
            self.read(
                Collection::Events,
                wanted(Collection::Events),
                deadline,
                self.store.events(),
            ),
            self.read(
                Collection::Categories,
                wanted(Collection::Categories),
                deadline,
                self.store.categories(),
            ),
        );

        let mut unresponsive = Vec::new();
        let mut queried = 0;
        for (collection, outcome) in [
            (Collection::Businesses, status(&businesses)),
            (Collection::Events, status(&events)),
            (Collection::Categories, status(&categories)),
        ] {
            match outcome {
                Status::Skipped => {}
                Status::Ready => queried += 1,
                Status::Degraded(error) => {
                    queried += 1;
                    unresponsive.push(UnresponsiveCollection { collection, error });
                }
                Status::Offline(reason) => {
                    error!("Store offline while reading {}: {}", collection, reason);
                    return Err(SearchError::Unavailable(reason));
                }
            }
        }

        if queried > 0 && unresponsive.len() == queried {
            error!("All {} queried collections failed", queried);
            return Err(SearchError::Unavailable(
                "no collection could be read".to_string(),
            ));
        }

        let filters = Filters::new(&needle, request);

        let matched_businesses: Vec<&Business> = businesses
            .items()
            .unwrap_or_default()
            .iter()
            .filter(|b| b.is_searchable() && filters.business(b))
            .collect();

        let upcoming_only = self.settings.upcoming_events_only;
        let matched_events: Vec<&Event> = events
            .items()
            .unwrap_or_default()
            .iter()
            .filter(|e| e.is_searchable(upcoming_only, now) && filters.event(e))
            .collect();

        let matched_categories: Vec<&Category> = categories
            .items()
            .unwrap_or_default()
            .iter()
            .filter(|c| c.is_active && filters.category(c))
            .collect();

        let total = matched_businesses.len() + matched_events.len() + matched_categories.len();
        let lang = request.lang;
        let limit = request.effective_limit(self.settings.default_limit, self.settings.max_limit);

        let (mut results, pagination) = match request.search_type.collection() {
            None => {
                let caps = &self.settings.caps;
                let results = SearchResults {
                    businesses: render(&matched_businesses, 0..caps.businesses, |b| {
                        BusinessHit::new(b, lang)
                    }),
                    events: render(&matched_events, 0..caps.events, |e| EventHit::new(e, lang)),
                    categories: render(&matched_categories, 0..caps.categories, |c| {
                        CategoryHit::new(c, lang)
                    }),
                    total,
                    suggestions: None,
                };
                (results, Pagination::single(total, limit))
            }
            Some(_) => {
                let pagination = Pagination::paged(request.page, limit, total);
                let window = pagination.window();
                let results = SearchResults {
                    businesses: render(&matched_businesses, window.clone(), |b| {
                        BusinessHit::new(b, lang)
                    }),
                    events: render(&matched_events, window.clone(), |e| EventHit::new(e, lang)),
                    categories: render(&matched_categories, window, |c| CategoryHit::new(c, lang)),
                    total,
                    suggestions: None,
                };
                (results, pagination)
            }
        };

        if total == 0 {
            self.metrics.inc_zero_results();
            let fallback = self
                .fallback(request, deadline, businesses, categories)
                .await;
            results.suggestions = Some(fallback);
        }

        info!(
            "Search '{}' ({:?}) matched {} records, {} unresponsive",
            needle.as_str(),
            request.search_type,
            total,
            unresponsive.len()
        );

        Ok(SearchResultSet {
            query: request.query.trim().to_string(),
            results,
            pagination,
            unresponsive,
        })
    }

    /// Read one collection under the shared deadline
    async fn read<T, F>(
        &self,
        collection: Collection,
        wanted: bool,
        deadline: Instant,
        read: F,
    ) -> Branch<T>
    where
        F: Future<Output = Result<Vec<T>, StoreError>>,
    {
        if !wanted {
            return Branch::Skipped;
        }

        let start = Instant::now();
        match timeout_at(deadline, read).await {
            Ok(Ok(items)) => {
                let elapsed = start.elapsed();
                self.metrics
                    .record_read(collection, elapsed.as_millis() as u64);
                debug!(
                    "Read {} {} records in {:?}",
                    items.len(),
                    collection,
                    elapsed
                );
                Branch::Ready(items)
            }
            Ok(Err(StoreError::Unavailable(reason))) => {
                warn!("Collection {} unavailable: {}", collection, reason);
                self.metrics.record_failure(collection);
                Branch::Degraded(BranchError::Unavailable)
            }
            Ok(Err(StoreError::Offline(reason))) => Branch::Offline(reason),
            Err(_) => {
                warn!("Timeout reading collection {}", collection);
                self.metrics.record_failure(collection);
                Branch::Degraded(BranchError::Timeout)
            }
        }
    }

    /// Build the zero-result block, reusing collections already read.
    ///
    /// Reference reads that fail leave their part of the block empty.
    async fn fallback(
        &self,
        request: &SearchRequest,
        deadline: Instant,
        businesses: Branch<Business>,
        categories: Branch<Category>,
    ) -> FallbackSuggestions {
        let businesses = async {
            match businesses {
                Branch::Ready(items) => items,
                _ => self.reference(deadline, "businesses", self.store.businesses()).await,
            }
        };
        let categories = async {
            match categories {
                Branch::Ready(items) => items,
                _ => self.reference(deadline, "categories", self.store.categories()).await,
            }
        };
        let locations = self.reference::<Location, _>(deadline, "locations", self.store.locations());

        let (businesses, categories, locations) = tokio::join!(businesses, categories, locations);

        fallback_suggestions(
            &locations,
            &categories,
            &businesses,
            &self.settings.fallback,
            request.lang,
        )
    }

    async fn reference<T, F>(&self, deadline: Instant, what: &str, read: F) -> Vec<T>
    where
        F: Future<Output = Result<Vec<T>, StoreError>>,
    {
        match timeout_at(deadline, read).await {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                warn!("Fallback suggestions without {}: {}", what, e);
                Vec::new()
            }
            Err(_) => {
                warn!("Fallback suggestions without {}: timed out", what);
                Vec::new()
            }
        }
    }
}

enum Status {
    Skipped,
    Ready,
    Degraded(BranchError),
    Offline(String),
}

fn status<T>(branch: &Branch<T>) -> Status {
    match branch {
        Branch::Skipped => Status::Skipped,
        Branch::Ready(_) => Status::Ready,
        Branch::Degraded(error) => Status::Degraded(error.clone()),
        Branch::Offline(reason) => Status::Offline(reason.clone()),
    }
}

/// Render the records inside `window`
fn render<T, H>(matched: &[&T], window: std::ops::Range<usize>, hit: impl Fn(&T) -> H) -> Vec<H> {
    let end = window.end.min(matched.len());
    let start = window.start.min(end);
    matched[start..end].iter().map(|record| hit(*record)).collect()
}
