use std::collections::HashMap;
use async_trait::async_trait;
use tracing::log::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// Structured-log publisher for dev mode and tests. Events land in the log
// stream instead of a message bus, with the same payload the bus would see.
#[derive(Debug, Default)]
pub struct LogsPublisher {
    topics: HashMap<String, String>,
}

impl LogsPublisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventPublisher for LogsPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, LibraryError> {
        let arn = format!("local:{}", topic);
        self.topics.insert(topic.to_string(), arn.clone());
        Ok(arn)
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, LibraryError> {
        Ok(self.topics.values().cloned().collect())
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = serde_json::to_string(event)?;
        info!("published event {}: {}", event.name, json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::{factory, GatewayPublisherVia};

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::added("test-name", "aggregate", "key",
                                       &HashMap::from([("k".to_string(), "v".to_string())]), &data)
            .expect("build event");
        let mut publisher = factory::create_publisher(GatewayPublisherVia::Logs).await;
        let arn = publisher.create_topic(event.name.as_str()).await.expect("should create topic");
        publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&arn));
    }
}
