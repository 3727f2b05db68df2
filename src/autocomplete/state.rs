//! Dropdown interaction as a pure reducer
//!
//! The hosting surface forwards input events and renders whatever state
//! comes back. There are no timers: every query change rebuilds the list
//! synchronously.

use super::engine::SuggestionEngine;
use super::suggestion::{NavigationTarget, Suggestion};
use crate::config::SuggestionCaps;
use crate::locales::Language;
use serde::{Deserialize, Serialize};

/// Dropdown visibility and cursor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Dropdown {
    #[default]
    Closed,
    Open {
        suggestions: Vec<Suggestion>,
        /// `None` means free text: Enter submits the query.
        selected: Option<usize>,
    },
}

impl Dropdown {
    fn open(suggestions: Vec<Suggestion>) -> Self {
        Self::Open {
            suggestions,
            selected: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Open { suggestions, .. } => suggestions,
            Self::Closed => &[],
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            Self::Open { selected, .. } => *selected,
            Self::Closed => None,
        }
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected().and_then(|i| self.suggestions().get(i))
    }
}

/// Everything the reducer needs to know about one input box
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub query: String,
    pub lang: Language,
    /// Set by an explicit "show all"; cleared by typing or blur
    pub browse_all: bool,
    pub dropdown: Dropdown,
}

impl Interaction {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            ..Default::default()
        }
    }
}

/// Input forwarded by the hosting surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    QueryChanged(String),
    ShowAll,
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Focus left the surface containing the input and dropdown
    Blur,
    LanguageChanged(Language),
}

/// Final action produced by Enter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "commit", rename_all = "snake_case")]
pub enum Commit {
    Navigate { target: NavigationTarget },
    Submit { query: String },
}

impl Commit {
    pub fn href(&self) -> String {
        match self {
            Self::Navigate { target } => target.href(),
            Self::Submit { query } => format!("/search?q={}", urlencoding::encode(query)),
        }
    }
}

/// Result of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Interaction,
    pub commit: Option<Commit>,
}

impl Transition {
    fn to(state: Interaction) -> Self {
        Self {
            state,
            commit: None,
        }
    }
}

/// Reducer bound to an engine and a surface's caps
#[derive(Debug, Clone, Copy)]
pub struct Autocomplete<'a> {
    engine: &'a SuggestionEngine,
    caps: SuggestionCaps,
}

impl<'a> Autocomplete<'a> {
    pub fn new(engine: &'a SuggestionEngine, caps: SuggestionCaps) -> Self {
        Self { engine, caps }
    }

    fn suggestions_for(&self, state: &Interaction) -> Vec<Suggestion> {
        if state.browse_all {
            self.engine.build_all(state.lang, &self.caps)
        } else {
            self.engine.build(&state.query, state.lang, &self.caps)
        }
    }

    pub fn reduce(&self, mut state: Interaction, event: InputEvent) -> Transition {
        match event {
            InputEvent::QueryChanged(query) => {
                state.query = query;
                if state.query.trim().is_empty() {
                    state.dropdown = if state.browse_all {
                        Dropdown::open(self.suggestions_for(&state))
                    } else {
                        Dropdown::Closed
                    };
                } else {
                    state.browse_all = false;
                    state.dropdown = Dropdown::open(self.suggestions_for(&state));
                }
                Transition::to(state)
            }

            InputEvent::ShowAll => {
                state.browse_all = state.query.trim().is_empty();
                state.dropdown = Dropdown::open(self.suggestions_for(&state));
                Transition::to(state)
            }

            InputEvent::ArrowDown | InputEvent::ArrowUp => {
                if let Dropdown::Open {
                    suggestions,
                    selected,
                } = &mut state.dropdown
                {
                    let len = suggestions.len();
                    if len > 0 {
                        *selected = Some(match (&event, *selected) {
                            (InputEvent::ArrowDown, Some(i)) => (i + 1) % len,
                            (InputEvent::ArrowDown, None) => 0,
                            (_, Some(i)) => (i + len - 1) % len,
                            (_, None) => len - 1,
                        });
                    }
                }
                Transition::to(state)
            }

            InputEvent::Enter => {
                let chosen = std::mem::take(&mut state.dropdown)
                    .selected_suggestion()
                    .map(|s| s.target().clone());
                state.browse_all = false;

                let commit = match chosen {
                    Some(target) => Some(Commit::Navigate { target }),
                    None => {
                        let query = state.query.trim();
                        (!query.is_empty()).then(|| Commit::Submit {
                            query: query.to_string(),
                        })
                    }
                };
                Transition { state, commit }
            }

            InputEvent::Escape => {
                state.dropdown = Dropdown::Closed;
                state.browse_all = false;
                Transition::to(state)
            }

            InputEvent::Blur => {
                state.query.clear();
                state.browse_all = false;
                state.dropdown = Dropdown::Closed;
                Transition::to(state)
            }

            InputEvent::LanguageChanged(lang) => {
                state.lang = lang;
                if let Dropdown::Open { selected, .. } = state.dropdown {
                    // Matching ignores the display language, so order and length hold
                    let suggestions = self.suggestions_for(&state);
                    let selected = selected.filter(|i| *i < suggestions.len());
                    state.dropdown = Dropdown::Open {
                        suggestions,
                        selected,
                    };
                }
                Transition::to(state)
            }
        }
    }

    /// Apply a sequence of events, returning the final state and every commit.
    pub fn replay(
        &self,
        state: Interaction,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> (Interaction, Vec<Commit>) {
        events
            .into_iter()
            .fold((state, Vec::new()), |(state, mut commits), event| {
                let step = self.reduce(state, event);
                commits.extend(step.commit);
                (step.state, commits)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuggestSettings;
    use crate::store::{testdata, RecordStore};
    use rstest::rstest;
    use std::sync::Arc;

    async fn engine() -> SuggestionEngine {
        let catalog = testdata::store().catalog().await.unwrap();
        SuggestionEngine::new(Arc::new(catalog))
    }

    fn typed(query: &str) -> InputEvent {
        InputEvent::QueryChanged(query.to_string())
    }

    #[tokio::test]
    async fn test_typing_opens_with_no_selection() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let step = ac.reduce(Interaction::new(Language::De), typed("Berl"));
        assert!(step.commit.is_none());
        assert!(step.state.dropdown.is_open());
        assert_eq!(step.state.dropdown.selected(), None);
        assert_eq!(step.state.dropdown.suggestions()[0].label(), "Berlin");
    }

    #[tokio::test]
    async fn test_clearing_query_closes() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (state, commits) = ac.replay(
            Interaction::new(Language::De),
            [typed("Ber"), InputEvent::ArrowDown, typed("")],
        );
        assert_eq!(state.dropdown, Dropdown::Closed);
        assert!(state.dropdown.suggestions().is_empty());
        assert!(commits.is_empty());
    }

    #[rstest]
    #[case::down_from_none(&[InputEvent::ArrowDown], Some(0))]
    #[case::down_twice(&[InputEvent::ArrowDown, InputEvent::ArrowDown], Some(1))]
    #[case::up_from_none(&[InputEvent::ArrowUp], Some(LAST))]
    #[case::up_from_first(&[InputEvent::ArrowDown, InputEvent::ArrowUp], Some(LAST))]
    #[case::down_wraps(&[InputEvent::ArrowUp, InputEvent::ArrowDown], Some(0))]
    #[tokio::test]
    async fn test_cursor_wraps(#[case] keys: &[InputEvent], #[case] expected: Option<usize>) {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (state, _) = ac.replay(Interaction::new(Language::De), [typed("e")]);
        let len = state.dropdown.suggestions().len();
        assert!(len > 2);

        let (state, _) = ac.replay(state, keys.iter().cloned());
        let expected = expected.map(|i| if i == LAST { len - 1 } else { i });
        assert_eq!(state.dropdown.selected(), expected);
    }

    const LAST: usize = usize::MAX;

    #[tokio::test]
    async fn test_cursor_stays_in_bounds() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().compact);

        let mut state = ac.reduce(Interaction::new(Language::De), typed("ä")).state;
        let len = state.dropdown.suggestions().len();
        for step in 0..40 {
            let key = if step % 3 == 0 {
                InputEvent::ArrowUp
            } else {
                InputEvent::ArrowDown
            };
            state = ac.reduce(state, key).state;
            let selected = state.dropdown.selected().expect("cursor set");
            assert!(selected < len);
        }
    }

    #[tokio::test]
    async fn test_arrows_on_closed_or_empty_are_noops() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let closed = Interaction::new(Language::De);
        assert_eq!(ac.reduce(closed.clone(), InputEvent::ArrowDown).state, closed);

        let (state, _) = ac.replay(
            Interaction::new(Language::De),
            [typed("zzzz"), InputEvent::ArrowDown, InputEvent::ArrowUp],
        );
        assert!(state.dropdown.is_open());
        assert_eq!(state.dropdown.selected(), None);
    }

    #[tokio::test]
    async fn test_enter_with_selection_navigates() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (state, commits) = ac.replay(
            Interaction::new(Language::De),
            [typed("Berl"), InputEvent::ArrowDown, InputEvent::Enter],
        );
        assert_eq!(state.dropdown, Dropdown::Closed);
        assert_eq!(state.query, "Berl");
        assert_eq!(
            commits,
            vec![Commit::Navigate {
                target: NavigationTarget::Location {
                    location_id: "berlin".to_string()
                }
            }]
        );
        assert_eq!(commits[0].href(), "/locations/berlin");
    }

    #[tokio::test]
    async fn test_enter_without_selection_submits_query() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (state, commits) = ac.replay(
            Interaction::new(Language::De),
            [typed(" Zahnarzt Mitte "), InputEvent::Enter],
        );
        assert!(!state.dropdown.is_open());
        assert_eq!(
            commits,
            vec![Commit::Submit {
                query: "Zahnarzt Mitte".to_string()
            }]
        );
        assert_eq!(commits[0].href(), "/search?q=Zahnarzt%20Mitte");
    }

    #[tokio::test]
    async fn test_enter_on_empty_query_commits_nothing() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);
        let step = ac.reduce(Interaction::new(Language::De), InputEvent::Enter);
        assert!(step.commit.is_none());
    }

    #[tokio::test]
    async fn test_escape_keeps_query_blur_clears_it() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (state, _) = ac.replay(
            Interaction::new(Language::De),
            [typed("Ham"), InputEvent::ArrowDown, InputEvent::Escape],
        );
        assert_eq!(state.dropdown, Dropdown::Closed);
        assert_eq!(state.query, "Ham");

        let state = ac.reduce(state, InputEvent::Blur).state;
        assert_eq!(state.dropdown, Dropdown::Closed);
        assert!(state.query.is_empty());
    }

    #[tokio::test]
    async fn test_browse_all_lifecycle() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let ac = Autocomplete::new(&engine, caps);

        let state = ac.reduce(Interaction::new(Language::De), InputEvent::ShowAll).state;
        assert!(state.browse_all);
        assert_eq!(
            state.dropdown.suggestions(),
            engine.build_all(Language::De, &caps).as_slice()
        );

        // re-sending an empty query keeps the full list
        let state = ac.reduce(state, typed("")).state;
        assert!(state.browse_all);
        assert!(state.dropdown.is_open());

        // typing leaves browse-all; clearing afterwards closes
        let state = ac.reduce(state, typed("B")).state;
        assert!(!state.browse_all);
        let state = ac.reduce(state, typed("")).state;
        assert_eq!(state.dropdown, Dropdown::Closed);

        // blur ends browse-all as well
        let state = ac.reduce(state, InputEvent::ShowAll).state;
        let state = ac.reduce(state, InputEvent::Blur).state;
        assert!(!state.browse_all);
        assert_eq!(state.dropdown, Dropdown::Closed);
    }

    #[tokio::test]
    async fn test_show_all_with_query_refreshes_matches() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let ac = Autocomplete::new(&engine, caps);

        let (state, _) = ac.replay(
            Interaction::new(Language::De),
            [typed("Berl"), InputEvent::Escape, InputEvent::ShowAll],
        );
        assert!(!state.browse_all);
        assert_eq!(
            state.dropdown.suggestions(),
            engine.build("Berl", Language::De, &caps).as_slice()
        );
    }

    #[tokio::test]
    async fn test_language_change_keeps_selection_and_target() {
        let engine = engine().await;
        let ac = Autocomplete::new(&engine, SuggestSettings::default().header);

        let (before, _) = ac.replay(
            Interaction::new(Language::De),
            [typed("Haus"), InputEvent::ArrowDown],
        );
        let after = ac
            .reduce(before.clone(), InputEvent::LanguageChanged(Language::En))
            .state;

        let old = before.dropdown.selected_suggestion().unwrap();
        let new = after.dropdown.selected_suggestion().unwrap();
        assert_eq!(old.target(), new.target());
        assert_eq!(old.label(), "Hausärzte");
        assert_eq!(new.label(), "General practitioners");

        let (_, commits) = ac.replay(after, [InputEvent::Enter]);
        assert_eq!(commits[0].href(), "/categories/aerzte/hausaerzte");
    }
}
