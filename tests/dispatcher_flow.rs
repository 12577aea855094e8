use serde_json::json;
use shortcodebot::ai::{AiConfig, AnthropicClient};
use shortcodebot::publish::{PublishClient, PublishConfig};
use shortcodebot::{schema, Config, Sessions};
use teloxide::prelude::*;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXTRACTION_REPLY: &str = "ENUNCIADO: Completa las frases.\n\nACTIVIDAD 1:\n- Texto original: El cielo es ___.\n- Tipo de shortcode: fill-in-the-blanks\n- Shortcode generado: [fill-in-the-blanks text=\"El cielo es [text|azul].\"][/fill-in-the-blanks]\n";
const REFINE_REPLY: &str = "SHORTCODE REFINADO: [fill-in-the-blanks text=\"El cielo es [text|azul].\" casesensitive=\"false\"][/fill-in-the-blanks]\nEXPLICACIÓN: Sin distinguir mayúsculas.";

fn me() -> teloxide::types::Me {
    teloxide::types::Me {
        user: teloxide::types::User {
            id: teloxide::types::UserId(1),
            is_bot: true,
            first_name: "Test".into(),
            last_name: None,
            username: Some("testbot".into()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        },
        can_join_groups: true,
        can_read_all_group_messages: true,
        supports_inline_queries: false,
        can_connect_to_business: false,
    }
}

fn text_update(id: i32, text: &str) -> Update {
    let mut message = json!({
        "message_id": id,
        "date": 0,
        "chat": { "id": 1, "type": "private" },
        "text": text,
    });
    if text.starts_with('/') {
        let len = text.split_whitespace().next().map_or(0, |c| c.chars().count());
        message["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": len }]);
    }
    serde_json::from_str(&json!({ "update_id": id, "message": message }).to_string()).unwrap()
}

async fn telegram_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/botTEST/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"ok":true,"result":{"message_id":1,"date":0,"chat":{"id":1,"type":"private"}}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    server
}

fn config(model_server: &MockServer) -> Config {
    Config {
        ai: Some(AiConfig {
            api_key: "k".into(),
            model: "m".into(),
            messages_url: format!("{}/v1/messages", model_server.uri()),
            api_version: "2023-06-01".into(),
            extract_max_tokens: 4000,
            refine_max_tokens: 1000,
            timeout_secs: 5,
        }),
        publish: None,
        export_filename: "resultados_analisis.txt".into(),
        url_check_timeout_secs: 1,
    }
}

#[tokio::test]
async fn extract_refine_export_flow() {
    let telegram = telegram_server().await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("Extraer ejercicios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "content": [{ "type": "text", "text": EXTRACTION_REPLY }] }),
        ))
        .expect(1)
        .mount(&model)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("Refinar un shortcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "content": [{ "type": "text", "text": REFINE_REPLY }] }),
        ))
        .expect(1)
        .mount(&model)
        .await;

    let bot = Bot::new("TEST").set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let config = config(&model);
    let ai = Some(AnthropicClient::new(config.ai.as_ref().unwrap()).unwrap());
    let publisher: Option<PublishClient> = None;
    let sessions = Sessions::new();
    let handler = schema();

    for update in [
        text_update(1, "1. El cielo es ___."),
        text_update(2, "/refine 1 que no distinga mayúsculas"),
        text_update(3, "/export"),
    ] {
        let _ = handler
            .dispatch(dptree::deps![
                update,
                bot.clone(),
                me(),
                sessions.clone(),
                ai.clone(),
                publisher.clone(),
                config.clone()
            ])
            .await;
    }

    model.verify().await;

    let handle = sessions.get(ChatId(1)).await;
    let session = handle.lock().await;
    assert_eq!(session.versions.history("1").len(), 2);
    assert!(session.versions.current("1", "").contains("casesensitive"));
    assert_eq!(session.activity().len(), 3);

    let requests = telegram.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .any(|r| r.url.path().to_lowercase().ends_with("/senddocument")));
}

#[tokio::test]
async fn missing_model_config_is_reported_without_calls() {
    let telegram = telegram_server().await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&model)
        .await;

    let bot = Bot::new("TEST").set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let mut config = config(&model);
    config.ai = None;
    let ai: Option<AnthropicClient> = None;
    let publisher: Option<PublishClient> = None;
    let sessions = Sessions::new();

    let _ = schema()
        .dispatch(dptree::deps![
            text_update(1, "1. Escribe una redacción."),
            bot,
            me(),
            sessions.clone(),
            ai,
            publisher,
            config
        ])
        .await;

    model.verify().await;
    let requests = telegram.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("ANTHROPIC_API_KEY"));
    assert!(sessions.get(ChatId(1)).await.lock().await.result.is_none());
}

#[tokio::test]
async fn publish_retry_reuses_group_created_before_append_failed() {
    let telegram = telegram_server().await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "content": [{ "type": "text", "text": EXTRACTION_REPLY }] }),
        ))
        .mount(&model)
        .await;
    let cms = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/questiongroups"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 77 })))
        .expect(1)
        .mount(&cms)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/questiongroups/77"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&cms)
        .await;

    let bot = Bot::new("TEST").set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let config = config(&model);
    let ai = Some(AnthropicClient::new(config.ai.as_ref().unwrap()).unwrap());
    let publisher = Some(
        PublishClient::new(&PublishConfig {
            base_url: cms.uri(),
            api_key: None,
            language: "es".into(),
            group_status: "draft".into(),
            timeout_secs: 5,
        })
        .unwrap(),
    );
    let sessions = Sessions::new();
    let handler = schema();

    for update in [
        text_update(1, "1. El cielo es ___."),
        text_update(2, "/publish"),
        text_update(3, "/publish"),
    ] {
        let _ = handler
            .dispatch(dptree::deps![
                update,
                bot.clone(),
                me(),
                sessions.clone(),
                ai.clone(),
                publisher.clone(),
                config.clone()
            ])
            .await;
    }

    cms.verify().await;
    let handle = sessions.get(ChatId(1)).await;
    assert_eq!(handle.lock().await.published_group, Some(77));
}

#[tokio::test]
async fn text_command_with_body_on_next_line_is_analyzed() {
    let telegram = telegram_server().await;
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("El cielo es ___."))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "content": [{ "type": "text", "text": EXTRACTION_REPLY }] }),
        ))
        .expect(1)
        .mount(&model)
        .await;

    let bot = Bot::new("TEST").set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let config = config(&model);
    let ai = Some(AnthropicClient::new(config.ai.as_ref().unwrap()).unwrap());
    let publisher: Option<PublishClient> = None;
    let sessions = Sessions::new();

    let _ = schema()
        .dispatch(dptree::deps![
            text_update(1, "/text\n1. El cielo es ___."),
            bot,
            me(),
            sessions.clone(),
            ai,
            publisher,
            config
        ])
        .await;

    model.verify().await;
    let handle = sessions.get(ChatId(1)).await;
    assert_eq!(handle.lock().await.versions.history("1").len(), 1);
}
