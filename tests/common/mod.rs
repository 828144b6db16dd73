#![allow(dead_code)]

/// Shared helpers for tests that talk to a mock PushBits server
pub mod server {
    use push_probe::notifications::HttpNotificationSender;
    use push_probe::payload::NotificationPayload;
    use reqwest::Url;
    use wiremock::MockServer;

    pub const TEST_TOKEN: &str = "AxZTwBZXs2YK1J5IZa0f";

    /// Sender pointed at `<mock>/message` with the test token
    pub fn sender_for(mock_server: &MockServer) -> HttpNotificationSender {
        let endpoint = Url::parse(&format!("{}/message", mock_server.uri())).unwrap();
        HttpNotificationSender::new(endpoint, TEST_TOKEN, None).unwrap()
    }

    /// Payloads the mock server received, decoded, in arrival order
    pub async fn received_payloads(mock_server: &MockServer) -> Vec<NotificationPayload> {
        mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}
