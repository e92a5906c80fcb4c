use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogsPublisher;
use crate::gateway::sns::publisher::SnsPublisher;
use crate::utils::ddb::build_sns_client;

pub(crate) async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            Box::new(SnsPublisher::new(client))
        }
        GatewayPublisherVia::Logs => {
            Box::new(LogsPublisher::new())
        }
    }
}
