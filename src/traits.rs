use crate::notifications::{DeliveryResponse, TransportError};
use crate::payload::NotificationPayload;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Trait for delivering a single notification payload
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send the payload and return the raw response, whatever its status
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryResponse, TransportError>;
}
