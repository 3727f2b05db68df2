//! HTTP request handlers

use super::state::AppState;
use crate::autocomplete::{Suggestion, Surface};
use crate::locales::{parse_accept_language, Language, MESSAGES};
use crate::results::SearchResultSet;
use crate::search::{SearchError, SearchRequest, SearchType};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Pick the display language: explicit `lang`, then Accept-Language, then the default.
fn negotiate_language(lang: Option<&str>, headers: &HeaderMap, default: Language) -> Language {
    lang.and_then(Language::parse)
        .or_else(|| {
            headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_accept_language)
        })
        .unwrap_or(default)
}

/// Error body for 4xx/5xx responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

fn error_response(status: StatusCode, error: &'static str, message: String) -> Response {
    (status, Json(ErrorResponse { error, message })).into_response()
}

fn search_error_response(err: &SearchError, lang: Language) -> Response {
    let message = err.user_message(lang);
    match err {
        SearchError::QueryTooShort { .. } => {
            error_response(StatusCode::BAD_REQUEST, "validation", message)
        }
        SearchError::Unavailable(reason) => {
            warn!("Search failed: {}", reason);
            error_response(StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", message)
        }
    }
}

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// all, businesses, events or categories
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub city: Option<String>,
    /// Category or subcategory id
    pub category: Option<String>,
    /// Page number
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Language
    pub lang: Option<String>,
    /// Timeout in seconds
    pub timeout: Option<f64>,
}

/// Search response, with a localized note when nothing matched
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub result: SearchResultSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    let lang = negotiate_language(params.lang.as_deref(), &headers, state.default_language());

    let search_type = match params.search_type.as_deref() {
        None => SearchType::All,
        Some(name) => match SearchType::parse(name) {
            Some(search_type) => search_type,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "validation",
                    MESSAGES.unknown_search_type(lang, name),
                )
            }
        },
    };

    let mut request = SearchRequest::new(params.q.unwrap_or_default())
        .with_type(search_type)
        .with_page(params.page.unwrap_or(1))
        .with_lang(lang);
    if let Some(city) = params.city {
        request = request.with_city(city);
    }
    if let Some(category) = params.category {
        request = request.with_category(category);
    }
    if let Some(limit) = params.limit {
        request = request.with_limit(limit);
    }
    if let Some(timeout) = params.timeout {
        request = request.with_timeout(timeout);
    }

    match state.search.search(&request).await {
        Ok(result) => {
            let message = result
                .is_empty()
                .then(|| MESSAGES.no_results(lang, &result.query));
            (
                [(header::CONTENT_LANGUAGE, lang.code())],
                Json(SearchResponse { result, message }),
            )
                .into_response()
        }
        Err(err) => search_error_response(&err, lang),
    }
}

/// Query parameters for autocomplete
#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteParams {
    pub q: Option<String>,
    pub lang: Option<String>,
    /// Named dropdown surface, defaults to the header search box
    pub surface: Option<String>,
}

/// A suggestion with its resolved link
#[derive(Debug, Serialize)]
pub struct SuggestionEntry {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub href: String,
}

impl From<Suggestion> for SuggestionEntry {
    fn from(suggestion: Suggestion) -> Self {
        let href = suggestion.target().href();
        Self { suggestion, href }
    }
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub query: String,
    pub lang: Language,
    /// Text direction of the labels
    pub dir: &'static str,
    pub suggestions: Vec<SuggestionEntry>,
}

impl AutocompleteResponse {
    fn new(query: String, lang: Language, suggestions: Vec<Suggestion>) -> Self {
        Self {
            query,
            lang,
            dir: if lang.is_rtl() { "rtl" } else { "ltr" },
            suggestions: suggestions.into_iter().map(SuggestionEntry::from).collect(),
        }
    }
}

/// Unknown surfaces fall back to the default one; the dropdown never errors.
fn surface(name: Option<&str>) -> Surface {
    match name {
        None => Surface::default(),
        Some(name) => Surface::parse(name).unwrap_or_else(|| {
            debug!("Unknown surface '{}', using default", name);
            Surface::default()
        }),
    }
}

/// Autocomplete handler
pub async fn autocomplete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AutocompleteParams>,
) -> Json<AutocompleteResponse> {
    let lang = negotiate_language(params.lang.as_deref(), &headers, state.default_language());
    let caps = state.settings.suggest.caps(surface(params.surface.as_deref()));
    let query = params.q.unwrap_or_default();

    let suggestions = state.engine.build(&query, lang, &caps);
    state.metrics.inc_suggestions();

    Json(AutocompleteResponse::new(query, lang, suggestions))
}

/// Browse-all handler: every enabled entity, sorted by name
pub async fn autocomplete_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AutocompleteParams>,
) -> Json<AutocompleteResponse> {
    let lang = negotiate_language(params.lang.as_deref(), &headers, state.default_language());
    let caps = state.settings.suggest.caps(surface(params.surface.as_deref()));

    let suggestions = state.engine.build_all(lang, &caps);
    state.metrics.inc_suggestions();

    Json(AutocompleteResponse::new(String::new(), lang, suggestions))
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> Response {
    if !state.settings.general.enable_metrics {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(state.metrics.snapshot()).into_response()
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "instance": state.instance_name(),
    }))
}
