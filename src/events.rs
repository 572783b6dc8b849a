use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Events emitted by the warehouse services. Consumed by the background
/// processor; a retrying transaction-log mirror would attach here as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Stock placement events
    StockPlaced {
        stock_id: i32,
        product_id: i32,
        slot: String,
        quantity: i32,
    },
    StockMoved {
        stock_id: i32,
        from_slot: String,
        to_slot: String,
    },
    StockUpdated(i32),
    StockConsumed {
        stock_id: i32,
        quantity: i32,
        exhausted: bool,
    },
    StockOutflow {
        stock_id: i32,
        client_id: Option<i32>,
        quantity: i32,
        exhausted: bool,
    },
    StockDiscarded {
        stock_id: i32,
        slot: String,
    },

    // Rack events
    RackCreated {
        rack_id: i32,
        rack_code: String,
        slot_count: u64,
    },
    RackReconfigured {
        rack_id: i32,
        rack_code: String,
        slot_count: u64,
    },
    RackDeleted(i32),

    // Alert events
    AlertRaised(i32),

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
        metadata: serde_json::Value,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Background consumer for the event channel. Runs until every sender is
/// dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");

    while let Some(event) = receiver.recv().await {
        match &event {
            Event::StockPlaced {
                stock_id,
                product_id,
                slot,
                quantity,
            } => {
                info!(
                    stock_id,
                    product_id, %slot, quantity, "Stock placed"
                );
            }
            Event::StockMoved {
                stock_id,
                from_slot,
                to_slot,
            } => {
                info!(stock_id, %from_slot, %to_slot, "Stock relocated");
            }
            Event::StockUpdated(stock_id) => {
                info!(stock_id, "Stock updated");
            }
            Event::StockConsumed {
                stock_id,
                quantity,
                exhausted,
            } => {
                info!(stock_id, quantity, exhausted, "Stock consumed");
            }
            Event::StockOutflow {
                stock_id,
                client_id,
                quantity,
                exhausted,
            } => {
                info!(stock_id, ?client_id, quantity, exhausted, "Stock sent out");
            }
            Event::StockDiscarded { stock_id, slot } => {
                info!(stock_id, %slot, "Stock discarded");
            }
            Event::RackCreated {
                rack_id,
                rack_code,
                slot_count,
            } => {
                info!(rack_id, %rack_code, slot_count, "Rack created");
            }
            Event::RackReconfigured {
                rack_id,
                rack_code,
                slot_count,
            } => {
                info!(rack_id, %rack_code, slot_count, "Rack reconfigured");
            }
            Event::RackDeleted(rack_id) => {
                info!(rack_id, "Rack deleted");
            }
            Event::AlertRaised(alert_id) => {
                info!(alert_id, "Alert raised");
            }
            Event::Generic {
                message,
                timestamp,
                metadata,
            } => {
                info!(%message, %timestamp, %metadata, "Generic event");
            }
        }
    }

    warn!("Event processing loop has ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::StockUpdated(7))
            .await
            .expect("send should succeed");

        match rx.recv().await {
            Some(Event::StockUpdated(id)) => assert_eq!(id, 7),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        assert!(sender.send(Event::RackDeleted(1)).await.is_err());
    }
}
