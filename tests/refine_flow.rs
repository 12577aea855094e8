use serde_json::json;
use shortcodebot::ai::{AiConfig, AnthropicClient};
use shortcodebot::handlers::{analyze, ExtractionInput};
use shortcodebot::{extract, refine_exercise, CompletionError, RefineError, Session, VersionStore};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPLY: &str = r#"ENUNCIADO: Complete the sentences.

ACTIVIDAD 1:
- Texto original: The sky is ___.
- Tipo de shortcode: fill-in-the-blanks
- Shortcode generado: [fill-in-the-blanks text="The sky is [text|blue]."][/fill-in-the-blanks]
"#;

fn client(server: &MockServer) -> AnthropicClient {
    AnthropicClient::new(&AiConfig {
        api_key: "k".into(),
        model: "m".into(),
        messages_url: format!("{}/v1/messages", server.uri()),
        api_version: "2023-06-01".into(),
        extract_max_tokens: 4000,
        refine_max_tokens: 1000,
        timeout_secs: 5,
    })
    .unwrap()
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "content": [{ "type": "text", "text": text }] }))
}

#[tokio::test]
async fn successful_refinement_appends_one_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Hazlo insensible a mayúsculas"))
        .respond_with(reply(
            "SHORTCODE REFINADO: [fill-in-the-blanks text=\"The sky is [text|blue].\" casesensitive=\"false\"][/fill-in-the-blanks]\n\nEXPLICACIÓN: Añadido casesensitive.",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = extract(REPLY);
    let mut versions = VersionStore::new();
    versions.seed_all(&result);
    let seed = versions.history("1").to_vec();

    let refined = refine_exercise(
        &client(&server),
        Some(&result),
        &mut versions,
        "1",
        "Hazlo insensible a mayúsculas",
        1000,
    )
    .await
    .unwrap();

    let history = versions.history("1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], seed[0]);
    assert_eq!(history[1].shortcode, refined.shortcode);
    assert_eq!(history[1].explanation.as_deref(), Some("Añadido casesensitive."));
    assert!(versions.current("1", "").contains("casesensitive=\"false\""));
}

#[tokio::test]
async fn second_refinement_starts_from_current_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("[writing][/writing]"))
        .respond_with(reply("SHORTCODE REFINADO: [writing maxtime=\"5\"][/writing]"))
        .expect(1)
        .mount(&server)
        .await;

    let result = extract(REPLY);
    let mut versions = VersionStore::new();
    versions.seed_all(&result);
    versions.append("1", "[writing][/writing]", Some("cambio de tipo".into()));

    refine_exercise(&client(&server), Some(&result), &mut versions, "1", "añade tiempo", 1000)
        .await
        .unwrap();
    assert_eq!(versions.history("1").len(), 3);
    assert_eq!(versions.current("1", ""), "[writing maxtime=\"5\"][/writing]");
}

#[tokio::test]
async fn failed_call_leaves_history_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = extract(REPLY);
    let mut versions = VersionStore::new();
    versions.seed_all(&result);
    let before = versions.history("1").to_vec();

    let err = refine_exercise(&client(&server), Some(&result), &mut versions, "1", "x", 1000)
        .await
        .unwrap_err();
    assert!(matches!(err, RefineError::Completion(_)));
    assert_eq!(versions.history("1"), before.as_slice());
}

#[tokio::test]
async fn unlabeled_reply_is_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("Lo siento, no puedo ayudar con eso."))
        .mount(&server)
        .await;

    let result = extract(REPLY);
    let mut versions = VersionStore::new();
    versions.seed_all(&result);

    let err = refine_exercise(&client(&server), Some(&result), &mut versions, "1", "x", 1000)
        .await
        .unwrap_err();
    assert!(matches!(err, RefineError::MissingShortcode));
    assert_eq!(versions.history("1").len(), 1);
}

#[tokio::test]
async fn unknown_exercise_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("SHORTCODE REFINADO: [a][/a]"))
        .expect(0)
        .mount(&server)
        .await;

    let result = extract(REPLY);
    let mut versions = VersionStore::new();
    versions.seed_all(&result);

    let err = refine_exercise(&client(&server), Some(&result), &mut versions, "9", "x", 1000)
        .await
        .unwrap_err();
    assert!(matches!(err, RefineError::UnknownExercise(n) if n == "9"));

    let err = refine_exercise(&client(&server), None, &mut versions, "1", "x", 1000)
        .await
        .unwrap_err();
    assert!(matches!(err, RefineError::NoResult));
}

#[tokio::test]
async fn failed_extraction_keeps_result_and_histories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::default();
    session.install(extract(REPLY), REPLY.to_string());
    session.versions.append(
        "1",
        "[fill-in-the-blanks text=\"The sky is [text|blue].\" casesensitive=\"false\"][/fill-in-the-blanks]",
        Some("Añadido casesensitive.".into()),
    );
    session.published_group = Some(9);
    let result = session.result.clone();
    let history = session.versions.history("1").to_vec();

    let err = analyze(
        &client(&server),
        &mut session,
        ExtractionInput::Text("1. Escribe sobre tu ciudad.".into()),
        4000,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CompletionError::Status { status: 500, .. }));
    assert_eq!(session.result, result);
    assert_eq!(session.versions.history("1"), history.as_slice());
    assert_eq!(session.last_reply.as_deref(), Some(REPLY));
    assert_eq!(session.published_group, Some(9));
    assert_eq!(
        session.activity().back().map(|a| a.event.as_str()),
        Some("Extraction failed")
    );
}
