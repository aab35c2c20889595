//! End-to-end search flows driven through `handle_event`, with canned API
//! bodies standing in for the host's web requests.

use std::collections::BTreeMap;

use serde_json::json;
use zsplash::app::{Phase, SearchSession};
use zsplash::api::{ApiClient, SearchRequest};
use zsplash::domain::PER_PAGE;
use zsplash::{handle_event, Action, AppState, Event, InputMode, Theme};

fn state() -> AppState {
    AppState::new(Theme::default()).with_client(ApiClient::new("test-key").unwrap())
}

fn submit(state: &mut AppState, text: &str) -> Vec<Action> {
    state.input.clear();
    state.input_mode = InputMode::Typing;
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    handle_event(state, &Event::Submit).unwrap().1
}

fn load_more(state: &mut AppState) -> Vec<Action> {
    handle_event(state, &Event::LoadMore).unwrap().1
}

fn only_fetch(actions: Vec<Action>) -> SearchRequest {
    match actions.as_slice() {
        [Action::Fetch(request)] => request.clone(),
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

fn page_body(prefix: &str, count: usize, total_pages: u32) -> Vec<u8> {
    let results: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("{prefix}-{i}"),
                "description": format!("{prefix} photo {i}"),
                "alt_description": null,
                "color": "#c0a080",
                "urls": {
                    "small": format!("https://images.example/{prefix}/{i}?w=400"),
                    "regular": format!("https://images.example/{prefix}/{i}?w=1080"),
                },
            })
        })
        .collect();
    json!({
        "total": u64::from(total_pages) * PER_PAGE as u64,
        "total_pages": total_pages,
        "results": results,
    })
    .to_string()
    .into_bytes()
}

fn ok_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("content-type".to_string(), "application/json".to_string())])
}

fn respond(state: &mut AppState, request: &SearchRequest, status: u16, body: Vec<u8>) -> bool {
    let event = Event::SearchResponse {
        status,
        headers: ok_headers(),
        body,
        context: request.context.clone(),
    };
    handle_event(state, &event).unwrap().0
}

fn ids(state: &AppState) -> Vec<String> {
    state.session.results().iter().map(|p| p.id.clone()).collect()
}

#[test]
fn whitespace_query_never_fetches() {
    let mut state = state();

    let actions = submit(&mut state, "   \t ");

    assert!(actions.iter().all(|a| !matches!(a, Action::Fetch(_))));
    assert!(matches!(actions.as_slice(), [Action::ScheduleTimer { .. }]));
    assert_eq!(state.session.phase(), Phase::Idle);
    assert!(state.session.results().is_empty());
    assert!(state.session.page().is_first());
}

#[test]
fn whitespace_query_keeps_existing_results() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &request, 200, page_body("fox", 12, 5));

    let actions = submit(&mut state, "  ");

    assert!(!actions.iter().any(|a| matches!(a, Action::Fetch(_))));
    assert_eq!(state.session.results().len(), 12);
    assert_eq!(state.session.query().map(|q| q.as_str()), Some("fox"));
}

#[test]
fn same_query_twice_fetches_once() {
    let mut state = state();

    let first = submit(&mut state, "fox");
    let second = submit(&mut state, "  fox ");

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn request_carries_query_page_and_credential() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "red fox"));

    assert_eq!(
        request.url,
        "https://api.unsplash.com/search/photos?query=red%20fox&page=1&per_page=12"
    );
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some("Client-ID test-key")
    );
}

#[test]
fn late_response_for_superseded_query_is_ignored() {
    let mut state = state();
    let cats = only_fetch(submit(&mut state, "cats"));
    let dogs = only_fetch(submit(&mut state, "dogs"));

    let rendered = respond(&mut state, &cats, 200, page_body("cats", 12, 3));
    assert!(!rendered);
    assert!(state.session.results().is_empty());
    assert!(state.session.is_loading());

    respond(&mut state, &dogs, 200, page_body("dogs", 12, 3));
    assert_eq!(state.session.results().len(), 12);
    assert!(ids(&state).iter().all(|id| id.starts_with("dogs")));
}

#[test]
fn pages_accumulate_in_request_order() {
    let mut state = state();
    let sizes = [12, 12, 7];

    let mut request = only_fetch(submit(&mut state, "lake"));
    for (n, size) in sizes.iter().enumerate() {
        respond(&mut state, &request, 200, page_body(&format!("p{}", n + 1), *size, 3));
        if n + 1 < sizes.len() {
            request = only_fetch(load_more(&mut state));
        }
    }

    assert_eq!(state.session.results().len(), sizes.iter().sum::<usize>());
    let ids = ids(&state);
    assert_eq!(ids.first().map(String::as_str), Some("p1-0"));
    assert_eq!(ids[12], "p2-0");
    assert_eq!(ids.last().map(String::as_str), Some("p3-6"));
}

#[test]
fn load_more_is_refused_while_loading() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));

    assert!(load_more(&mut state).is_empty());

    respond(&mut state, &request, 200, page_body("fox", 12, 5));
    let next = only_fetch(load_more(&mut state));
    assert!(next.url.contains("page=2"));
    assert!(load_more(&mut state).is_empty());
}

#[test]
fn fox_loads_all_five_pages_then_stops() {
    let mut state = state();
    let mut request = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &request, 200, page_body("fox1", 12, 5));

    for page in 2..=5 {
        assert!(state.compute_viewmodel(40, 120).load_more);
        request = only_fetch(load_more(&mut state));
        assert!(request.url.contains(&format!("page={page}&")));
        respond(&mut state, &request, 200, page_body(&format!("fox{page}"), 12, 5));
    }

    assert_eq!(state.session.results().len(), 60);
    assert!(load_more(&mut state).is_empty());
    assert!(!state.compute_viewmodel(40, 120).load_more);
}

#[test]
fn failed_second_page_keeps_first_and_recovers() {
    let mut state = state();
    let first = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &first, 200, page_body("fox1", 12, 5));

    let second = only_fetch(load_more(&mut state));
    let error_body = br#"{"errors":["Internal server error"]}"#.to_vec();
    let rendered = respond(&mut state, &second, 500, error_body);

    assert!(rendered);
    assert_eq!(state.session.results().len(), 12);
    assert_eq!(state.session.phase(), Phase::Error);
    let status = state.compute_viewmodel(40, 120).status.unwrap();
    assert!(status.text.contains("Internal server error"));

    let again = only_fetch(load_more(&mut state));
    assert!(again.url.contains("page=2&"));
    respond(&mut state, &again, 200, page_body("fox2", 12, 5));

    assert!(state.session.error().is_none());
    assert_eq!(state.session.results().len(), 24);
    assert_eq!(ids(&state)[12], "fox2-0");
}

#[test]
fn blank_submit_after_failure_still_shows_its_notice() {
    let mut state = state();
    let first = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &first, 200, page_body("fox1", 12, 5));
    let second = only_fetch(load_more(&mut state));
    respond(&mut state, &second, 500, br#"{"errors":["Internal server error"]}"#.to_vec());

    submit(&mut state, " ");
    let status = state.compute_viewmodel(40, 120).status.unwrap();
    assert_eq!(status.text, "Please enter a search term!");

    // Esc clears the visible notice and the fetch error shows again.
    handle_event(&mut state, &Event::Escape).unwrap();
    let status = state.compute_viewmodel(40, 120).status.unwrap();
    assert!(status.text.contains("Internal server error"));
}

#[test]
fn blank_submit_while_loading_more_shows_its_notice() {
    let mut state = state();
    let first = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &first, 200, page_body("fox1", 12, 5));
    only_fetch(load_more(&mut state));

    submit(&mut state, "  ");

    assert!(state.session.is_loading());
    let status = state.compute_viewmodel(40, 120).status.unwrap();
    assert_eq!(status.text, "Please enter a search term!");
}

#[test]
fn failed_first_page_can_be_retried() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));

    let event = Event::SearchResponse {
        status: 400,
        headers: BTreeMap::new(),
        body: b"dns error: failed to lookup address".to_vec(),
        context: request.context.clone(),
    };
    handle_event(&mut state, &event).unwrap();
    assert_eq!(state.session.phase(), Phase::Error);
    assert!(load_more(&mut state).is_empty());
    // Same query again stays a no-op even after a failure.
    assert!(submit(&mut state, "fox").is_empty());

    state.input_mode = InputMode::Browsing;
    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
    let retried = only_fetch(actions);
    assert!(retried.url.contains("page=1&"));

    respond(&mut state, &retried, 200, page_body("fox", 12, 2));
    assert_eq!(state.session.phase(), Phase::Success);
}

#[test]
fn malformed_body_is_an_error_not_a_panic() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));

    respond(&mut state, &request, 200, b"<html>not json</html>".to_vec());

    assert_eq!(state.session.phase(), Phase::Error);
    assert!(state.session.results().is_empty());
}

#[test]
fn empty_results_show_a_transient_notice() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "qwxzzy"));

    let (_, actions) = handle_event(
        &mut state,
        &Event::SearchResponse {
            status: 200,
            headers: ok_headers(),
            body: page_body("none", 0, 0),
            context: request.context.clone(),
        },
    )
    .unwrap();

    assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 3 }]);
    let vm = state.compute_viewmodel(40, 120);
    assert!(vm.status.unwrap().text.contains("qwxzzy"));
    assert!(!vm.load_more);

    handle_event(&mut state, &Event::Tick).unwrap();
    assert!(state.compute_viewmodel(40, 120).status.is_none());
}

#[test]
fn modal_opens_on_activate_and_closes() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &request, 200, page_body("fox", 12, 1));
    state.set_viewport(40, 120);

    handle_event(&mut state, &Event::Escape).unwrap();
    assert_eq!(state.input_mode, InputMode::Browsing);
    handle_event(&mut state, &Event::MoveRight).unwrap();
    handle_event(&mut state, &Event::Activate).unwrap();

    let selected = state.selected_image.clone().unwrap();
    assert_eq!(selected.index, 1);
    assert_eq!(selected.url, "https://images.example/fox/1?w=1080");

    let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).unwrap();
    assert_eq!(
        actions,
        vec![Action::OpenInBrowser {
            url: "https://images.example/fox/1?w=1080".to_string()
        }]
    );

    handle_event(&mut state, &Event::CloseModal).unwrap();
    assert!(state.selected_image.is_none());
}

#[test]
fn new_query_resets_cursor_and_modal() {
    let mut state = state();
    let request = only_fetch(submit(&mut state, "fox"));
    respond(&mut state, &request, 200, page_body("fox", 12, 1));
    state.cursor = 5;
    state.open_modal();

    only_fetch(submit(&mut state, "owl"));

    assert_eq!(state.cursor, 0);
    assert!(state.selected_image.is_none());
    assert!(state.session.results().is_empty());
}

#[test]
fn session_can_be_driven_without_the_ui() {
    let mut session = SearchSession::new();
    let token = session.submit_query("fox").unwrap().unwrap();
    assert_eq!(token.generation, session.generation());
    assert_eq!(session.phase(), Phase::Loading);
}
