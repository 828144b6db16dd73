mod common;

#[cfg(test)]
mod tests {
    use crate::common::server::{TEST_TOKEN, sender_for};
    use assert_matches::assert_matches;
    use push_probe::configuration::parse_endpoint;
    use push_probe::notifications::{FailureKind, HttpNotificationSender, TransportError};
    use push_probe::payload::{ContentType, NotificationPayload};
    use push_probe::traits::NotificationSender;
    use reqwest::Url;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_deliver_success() {
        let mock_server = MockServer::start().await;

        let expected_body = serde_json::json!({
            "title": "Prio 0",
            "message": "Some text",
            "extras": { "client::display": { "contentType": "text/html" } },
            "priority": 0
        });

        Mock::given(method("POST"))
            .and(path("/message"))
            .and(query_param("token", TEST_TOKEN))
            .and(header("content-type", "application/json"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"$abc","title":"Prio 0"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = NotificationPayload::html("Prio 0", "Some text").with_priority(0);
        let result = sender_for(&mock_server).deliver(&payload).await;

        let response = result.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"id":"$abc","title":"Prio 0"}"#);
    }

    #[tokio::test]
    async fn test_deliver_out_of_range_priorities() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/message"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let sender = sender_for(&mock_server);
        for priority in [-5, 21] {
            let payload = NotificationPayload::html(format!("Prio {priority}"), "Some text")
                .with_priority(priority);
            assert!(sender.deliver(&payload).await.is_ok());
        }

        let requests = mock_server.received_requests().await.unwrap();
        let priorities: Vec<_> = requests
            .iter()
            .map(|r| serde_json::from_slice::<serde_json::Value>(&r.body).unwrap()["priority"].clone())
            .collect();
        assert_eq!(priorities, [serde_json::json!(-5), serde_json::json!(21)]);
    }

    #[tokio::test]
    async fn test_deliver_without_priority_sends_no_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let payload = NotificationPayload::html("No Prio", "Some text");
        sender_for(&mock_server).deliver(&payload).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("priority").is_none());
    }

    #[tokio::test]
    async fn test_deliver_error_403_is_not_a_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&mock_server)
            .await;

        let payload = NotificationPayload::html("Prio 3", "Some text").with_priority(3);
        let result = sender_for(&mock_server).deliver(&payload).await;

        // The request itself succeeded, the service just said no
        let response = result.unwrap();
        assert_eq!(response.status, 403);
        assert_eq!(response.body, "forbidden");
    }

    #[tokio::test]
    async fn test_deliver_unreachable_endpoint() {
        let endpoint = Url::parse("http://127.0.0.1:1/message").unwrap();
        let sender = HttpNotificationSender::new(endpoint, TEST_TOKEN, None).unwrap();

        let result = sender.deliver(&NotificationPayload::html("t", "m")).await;

        assert_matches!(result, Err(TransportError { kind: FailureKind::Connect, .. }));
    }

    #[tokio::test]
    async fn test_deliver_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let endpoint = Url::parse(&format!("{}/message", mock_server.uri())).unwrap();
        let sender =
            HttpNotificationSender::new(endpoint, TEST_TOKEN, Some(Duration::from_millis(200))).unwrap();

        let result = sender.deliver(&NotificationPayload::html("t", "m")).await;

        assert_matches!(result, Err(TransportError { kind: FailureKind::Timeout, .. }));
    }

    #[tokio::test]
    async fn test_deliver_sends_exactly_one_configured_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let endpoint = parse_endpoint(&format!("{}/message?token=old", mock_server.uri())).unwrap();
        let sender = HttpNotificationSender::new(endpoint, "new tok&x", None).unwrap();
        sender.deliver(&NotificationPayload::html("t", "m")).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let tokens: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(tokens, ["new tok&x"]);
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_token() {
        let endpoint = Url::parse("http://127.0.0.1:1/message").unwrap();
        let sender = HttpNotificationSender::new(endpoint, TEST_TOKEN, None).unwrap();

        let error = sender.deliver(&NotificationPayload::html("t", "m")).await.unwrap_err();

        assert!(!error.message.contains(TEST_TOKEN));
        assert!(!error.to_string().contains("token="));
    }

    #[tokio::test]
    async fn test_deliver_plain_text_content_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({
                "title": "Plain",
                "message": "<b>not bold</b>",
                "extras": { "client::display": { "contentType": "text/plain" } }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = NotificationPayload::new("Plain", "<b>not bold</b>", ContentType::Plain);
        let response = sender_for(&mock_server).deliver(&payload).await.unwrap();

        assert_eq!(response.status, 200);
    }
}
