// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end turn processing against scripted collaborators.

use std::sync::Arc;

use causerie_core::types::{ResponseFormat, Role, WeatherReport};
use causerie_core::{CauserieError, LookupError, TURN_FAILED_MESSAGE};
use causerie_router::{
    Answer, ConversationRouter, Session, SessionTable, ToolAnswer, ToolToggles, TurnOptions,
};
use causerie_test_utils::{MockProvider, MockSearch, MockStocks, MockWeather};

struct Fixture {
    provider: MockProvider,
    weather: MockWeather,
    stocks: MockStocks,
    search: MockSearch,
    router: ConversationRouter,
}

fn fixture_with(provider: MockProvider, weather: MockWeather, stocks: MockStocks) -> Fixture {
    let search = MockSearch::returning("Résultats de recherche pour \"rust\":\n\n1. **Rust**\n");
    let router = ConversationRouter::new(
        Arc::new(provider.clone()),
        Arc::new(weather.clone()),
        Arc::new(stocks.clone()),
        Arc::new(search.clone()),
    );
    Fixture {
        provider,
        weather,
        stocks,
        search,
        router,
    }
}

fn fixture(replies: &[&str]) -> Fixture {
    fixture_with(
        MockProvider::with_responses(replies.iter().copied()),
        MockWeather::new(),
        MockStocks::new(),
    )
}

fn session(toggles: ToolToggles) -> Session {
    Session::new("llama3.2", toggles)
}

async fn turn(f: &Fixture, session: &mut Session, text: &str) -> Result<Answer, CauserieError> {
    f.router
        .process_turn(session, text, TurnOptions::default())
        .await
}

#[tokio::test]
async fn plain_reply_is_returned_unchanged() {
    let f = fixture(&["Je vais bien, merci !"]);
    let mut s = session(ToolToggles::new(true, true));

    let answer = turn(&f, &mut s, "Comment vas-tu ?").await.unwrap();

    assert_eq!(answer, Answer::Text("Je vais bien, merci !".into()));
    assert_eq!(f.provider.call_count().await, 1);
    assert_eq!(f.weather.call_count().await, 0);
    assert_eq!(f.stocks.call_count().await, 0);
    assert_eq!(f.search.call_count().await, 0);
    assert_eq!(s.history().len(), 2);
    assert_eq!(s.history()[1].content, "Je vais bien, merci !");
}

#[tokio::test]
async fn weather_call_is_composed_and_tagged() {
    let report = WeatherReport {
        city: "Lyon".into(),
        country: "FR".into(),
        temperature: 19.5,
        feels_like: 19.1,
        description: "ciel dégagé".into(),
        icon: "01d".into(),
    };
    let f = fixture_with(
        MockProvider::with_responses([
            r#"{"tool":"get_weather","city":"Lyon"}"#,
            "☀️ Actuellement à Lyon, le ciel est dégagé et il fait 19.5°C.",
        ]),
        MockWeather::returning(report),
        MockStocks::new(),
    );
    let mut s = session(ToolToggles::default());

    let answer = turn(&f, &mut s, "Quel temps fait-il à Lyon ?").await.unwrap();

    match &answer {
        Answer::Tool(ToolAnswer::Weather { text, data }) => {
            assert_eq!(data.city, "Lyon");
            assert!(!text.is_empty());
        }
        other => panic!("expected weather answer, got {other:?}"),
    }
    assert_eq!(f.weather.cities().await, vec!["Lyon"]);
    assert_eq!(s.history().len(), 2);
    assert_eq!(s.history()[1].content, answer.text());
}

#[tokio::test]
async fn weather_keyword_requests_json_mode() {
    let f = fixture(&["Bonjour"]);
    let mut s = session(ToolToggles::default());
    turn(&f, &mut s, "la météo demain ?").await.unwrap();
    assert_eq!(f.provider.requests().await[0].format, ResponseFormat::Json);
}

#[tokio::test]
async fn composition_request_shape() {
    let f = fixture(&[r#"{"tool":"get_weather","city":"Nice"}"#, "Il fait beau à Nice."]);
    let mut s = session(ToolToggles::default());
    turn(&f, &mut s, "Et à Nice ?").await.unwrap();

    let requests = f.provider.requests().await;
    assert_eq!(requests.len(), 2);
    let compose = &requests[1];
    assert_eq!(compose.format, ResponseFormat::Text);
    assert!(compose.messages.iter().all(|m| m.role != Role::System));
    let n = compose.messages.len();
    assert_eq!(compose.messages[n - 2].role, Role::Assistant);
    assert_eq!(
        compose.messages[n - 2].content,
        "Ok, je vais chercher la météo pour Nice."
    );
    assert_eq!(compose.messages[n - 1].role, Role::User);
    assert!(compose.messages[n - 1].content.contains("\"city\":\"Nice\""));
}

#[tokio::test]
async fn weather_is_honoured_with_every_toggle_combination() {
    for toggles in [
        ToolToggles::new(false, false),
        ToolToggles::new(true, false),
        ToolToggles::new(false, true),
        ToolToggles::new(true, true),
    ] {
        let f = fixture(&[r#"{"tool":"get_weather","city":"Paris"}"#, "Il pleut."]);
        let mut s = session(toggles);
        let answer = turn(&f, &mut s, "météo Paris").await.unwrap();
        assert!(matches!(answer, Answer::Tool(ToolAnswer::Weather { .. })));
        assert_eq!(f.weather.call_count().await, 1);
    }
}

#[tokio::test]
async fn weather_error_becomes_apology_without_second_call() {
    let f = fixture_with(
        MockProvider::with_responses([r#"{"tool":"get_weather","city":"Atlantis"}"#]),
        MockWeather::failing(LookupError::NotFound("city not found".into())),
        MockStocks::new(),
    );
    let mut s = session(ToolToggles::default());

    let answer = turn(&f, &mut s, "météo à Atlantis").await.unwrap();

    assert!(answer.is_plain());
    assert!(answer.text().contains("city not found"));
    assert_eq!(f.provider.call_count().await, 1);
    assert_eq!(s.history().len(), 2);
}

#[tokio::test]
async fn search_disabled_falls_back_to_classification_text() {
    let raw = r#"{"tool":"web_search","query":"rust"}"#;
    let f = fixture(&[raw]);
    let mut s = session(ToolToggles::new(false, true));

    let answer = turn(&f, &mut s, "cherche rust sur le web").await.unwrap();

    assert_eq!(answer, Answer::Text(raw.into()));
    assert_eq!(f.search.call_count().await, 0);
    assert_eq!(f.provider.call_count().await, 1);
}

#[tokio::test]
async fn search_enabled_composes_plain_text() {
    let f = fixture(&[r#"{"tool":"web_search","query":"rust"}"#, "Rust est un langage."]);
    let mut s = session(ToolToggles::new(true, false));

    let answer = turn(&f, &mut s, "what is rust").await.unwrap();

    assert_eq!(answer, Answer::Text("Rust est un langage.".into()));
    assert_eq!(f.search.queries().await, vec!["rust"]);
    let compose = &f.provider.requests().await[1];
    let last = compose.messages.last().unwrap();
    assert!(last.content.contains("1. **Rust**"));
}

#[tokio::test]
async fn finance_disabled_falls_back_to_classification_text() {
    let raw = r#"{"tool":"get_stock","symbol":"AAPL"}"#;
    let f = fixture(&[raw]);
    let mut s = session(ToolToggles::new(true, false));

    let answer = turn(&f, &mut s, "cours de AAPL").await.unwrap();

    assert_eq!(answer, Answer::Text(raw.into()));
    assert_eq!(f.stocks.call_count().await, 0);
}

#[tokio::test]
async fn finance_enabled_returns_tagged_quote() {
    let f = fixture(&[r#"{"tool":"get_stock","symbol":"aapl"}"#, "📈 AAPL à 190.5$."]);
    let mut s = session(ToolToggles::new(false, true));

    let answer = turn(&f, &mut s, "prix de l'action Apple").await.unwrap();

    match answer {
        Answer::Tool(ToolAnswer::Finance { data, text }) => {
            assert_eq!(data.symbol, "AAPL");
            assert_eq!(text, "📈 AAPL à 190.5$.");
        }
        other => panic!("expected finance answer, got {other:?}"),
    }
}

#[tokio::test]
async fn finance_error_becomes_apology() {
    let f = fixture_with(
        MockProvider::with_responses([r#"{"tool":"get_stock","symbol":"ZZZZ"}"#]),
        MockWeather::new(),
        MockStocks::failing(LookupError::NotFound("Stock symbol \"ZZZZ\" not found.".into())),
    );
    let mut s = session(ToolToggles::new(false, true));

    let answer = turn(&f, &mut s, "action ZZZZ").await.unwrap();

    assert_eq!(
        answer.text(),
        "Désolé, je n'ai pas pu récupérer les données financières : Stock symbol \"ZZZZ\" not found."
    );
    assert_eq!(f.provider.call_count().await, 1);
}

#[tokio::test]
async fn truncated_json_is_treated_as_text() {
    let raw = r#"{"tool": "get_stock", sym"#;
    let f = fixture(&[raw]);
    let mut s = session(ToolToggles::new(true, true));

    let answer = turn(&f, &mut s, "action Apple").await.unwrap();

    assert_eq!(answer, Answer::Text(raw.into()));
    assert_eq!(f.stocks.call_count().await, 0);
}

#[tokio::test]
async fn classification_failure_rolls_back() {
    let provider = MockProvider::with_responses(["Salut !"]);
    let f = fixture_with(provider.clone(), MockWeather::new(), MockStocks::new());
    let mut s = session(ToolToggles::default());
    turn(&f, &mut s, "bonjour").await.unwrap();
    let before = s.history().to_vec();

    provider.push_failure("connection refused").await;
    let err = turn(&f, &mut s, "encore là ?").await.unwrap_err();

    assert!(matches!(err, CauserieError::TurnFailed { .. }));
    assert_eq!(err.to_string(), TURN_FAILED_MESSAGE);
    assert_eq!(s.history(), before.as_slice());
}

#[tokio::test]
async fn composition_failure_rolls_back() {
    let provider = MockProvider::with_responses([r#"{"tool":"get_weather","city":"Lyon"}"#]);
    provider.push_failure("timeout").await;
    let f = fixture_with(provider, MockWeather::new(), MockStocks::new());
    let mut s = session(ToolToggles::default());

    let err = turn(&f, &mut s, "météo Lyon").await.unwrap_err();

    assert!(matches!(err, CauserieError::TurnFailed { .. }));
    assert!(s.history().is_empty());
    assert_eq!(f.weather.call_count().await, 1);
}

#[tokio::test]
async fn successful_turns_grow_history_by_two() {
    let f = fixture(&[
        "Bonjour !",
        r#"{"tool":"get_weather","city":"Lyon"}"#,
        "Il fait 19.5°C.",
        "Avec plaisir.",
    ]);
    let mut s = session(ToolToggles::default());
    for (i, text) in ["salut", "météo Lyon", "merci"].into_iter().enumerate() {
        turn(&f, &mut s, text).await.unwrap();
        assert_eq!(s.history().len(), 2 * (i + 1));
    }
    let roles: Vec<Role> = s.history().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
}

#[tokio::test]
async fn turn_options_update_session_toggles() {
    let f = fixture(&[r#"{"tool":"web_search","query":"rust"}"#, "Rust !"]);
    let mut s = session(ToolToggles::default());

    f.router
        .process_turn(
            &mut s,
            "cherche rust",
            TurnOptions {
                web_search_enabled: Some(true),
                finance_enabled: None,
            },
        )
        .await
        .unwrap();

    assert!(s.toggles().web_search_enabled);
    assert_eq!(f.search.call_count().await, 1);
    let system = &f.provider.requests().await[0].messages[0];
    assert!(system.content.contains("web_search"));
}

#[tokio::test]
async fn turns_on_one_session_are_serialized() {
    let f = Arc::new(fixture(&["un", "deux"]));
    let table = SessionTable::default();
    let (_, shared) = table.create_session("llama3.2");

    let mut handles = Vec::new();
    for text in ["premier", "second"] {
        let f = Arc::clone(&f);
        let shared = Arc::clone(&shared);
        handles.push(tokio::spawn(async move {
            let mut session = shared.lock().await;
            f.router
                .process_turn(&mut session, text, TurnOptions::default())
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let session = shared.lock().await;
    assert_eq!(session.history().len(), 4);
    let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
}
