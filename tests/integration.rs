use dream_service::{
    ai::MockImageGenerationClient,
    app::{App, AppServices},
    client::{render_image, DreamClient, DreamSession, SubmitState},
    server::FALLBACK_ERROR_MESSAGE,
    Error,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Start the service on an ephemeral port and return its base URL.
async fn spawn_service(provider: MockImageGenerationClient) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = App::with_services(
        AppServices {
            image_gen: Arc::new(provider),
        },
        addr.port(),
    );
    tokio::spawn(async move {
        app.serve(listener).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_prompt_round_trip() {
    let provider = MockImageGenerationClient::new()
        .with_image_response("https://example.com/a.png".to_string());
    let base_url = spawn_service(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/dream", base_url))
        .json(&serde_json::json!({ "prompt": "a cat" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "image": "https://example.com/a.png" })
    );
    assert_eq!(provider.get_prompts(), vec!["a cat"]);
}

#[tokio::test]
async fn test_provider_message_reaches_client() {
    let provider = MockImageGenerationClient::new().with_failure("rate limited".to_string());
    let base_url = spawn_service(provider).await;

    let err = DreamClient::new(base_url)
        .submit_prompt("a cat")
        .await
        .unwrap_err();

    match err {
        Error::Service { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("rate limited"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_opaque_provider_failure_uses_fallback() {
    let provider = MockImageGenerationClient::new().with_opaque_failure();
    let base_url = spawn_service(provider).await;

    let mut session = DreamSession::new(DreamClient::new(base_url));
    let state = session.submit("a cat").await.clone();

    assert_eq!(state, SubmitState::Failed(FALLBACK_ERROR_MESSAGE.to_string()));
    assert!(!session.form().button().disabled);
}

#[tokio::test]
async fn test_same_prompt_twice_calls_provider_twice() {
    let provider = MockImageGenerationClient::new()
        .with_image_response("https://example.com/1.png".to_string())
        .with_image_response("https://example.com/2.png".to_string());
    let base_url = spawn_service(provider.clone()).await;

    let mut session = DreamSession::new(DreamClient::new(base_url));
    session.submit("a lighthouse").await;
    let first = session.form().result_html().to_string();
    session.submit("a lighthouse").await;
    let second = session.form().result_html().to_string();

    assert_eq!(provider.get_call_count(), 2);
    assert_eq!(provider.get_prompts(), vec!["a lighthouse", "a lighthouse"]);
    assert_eq!(first, render_image("https://example.com/1.png"));
    assert_eq!(second, render_image("https://example.com/2.png"));
}

#[tokio::test]
async fn test_rendered_image_is_returned_reference() {
    let reference = "data:image/png;base64,iVBORw0KGgo=";
    let provider = MockImageGenerationClient::new().with_image_response(reference.to_string());
    let base_url = spawn_service(provider).await;

    let client = DreamClient::new(base_url.clone());
    let image = client.submit_prompt("a cat").await.unwrap();
    assert_eq!(image, reference);

    let mut session = DreamSession::new(DreamClient::new(base_url));
    assert_eq!(session.submit("a cat").await, &SubmitState::Idle);
    assert_eq!(
        session.form().result_html(),
        format!(r#"<img src="{}" width="512" />"#, reference)
    );
}

#[tokio::test]
async fn test_unreachable_service_fails_cleanly() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = DreamSession::new(DreamClient::new(format!("http://{}", addr)));
    let state = session.submit("a cat").await.clone();

    assert!(matches!(state, SubmitState::Failed(_)));
    assert!(!session.form().button().disabled);
}
