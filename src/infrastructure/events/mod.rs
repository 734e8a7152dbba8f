mod broadcast_event_publisher;

pub use broadcast_event_publisher::BroadcastEventPublisher;
