//! Order event publication for the email notifier.
//!
//! Events go out on NATS as a fire-and-forget side channel: publish failures
//! are logged and ignored, never retried, and never fail the request. The
//! service runs fine with no broker configured.

use serde::Serialize;

use crate::models::{Order, OrderItem, OrderStatus};

const SUBJECT_ORDER_CREATED: &str = "parfum.orders.created";
const SUBJECT_STATUS_CHANGED: &str = "parfum.orders.status_changed";

#[derive(Debug, Serialize)]
struct OrderCreated<'a> {
    order: &'a Order,
    items: &'a [OrderItem],
}

#[derive(Debug, Serialize)]
struct StatusChanged<'a> {
    order: &'a Order,
    previous_status: OrderStatus,
    should_send_email: bool,
}

pub async fn order_created(nats: &Option<async_nats::Client>, order: &Order, items: &[OrderItem]) {
    publish(nats, SUBJECT_ORDER_CREATED, &OrderCreated { order, items }).await;
}

pub async fn status_changed(
    nats: &Option<async_nats::Client>,
    order: &Order,
    previous_status: OrderStatus,
    should_send_email: bool,
) {
    publish(
        nats,
        SUBJECT_STATUS_CHANGED,
        &StatusChanged {
            order,
            previous_status,
            should_send_email,
        },
    )
    .await;
}

async fn publish<T: Serialize>(nats: &Option<async_nats::Client>, subject: &str, event: &T) {
    let Some(client) = nats else { return };
    let payload = match serde_json::to_vec(event) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, subject, "failed to serialize order event");
            return;
        }
    };
    if let Err(e) = client.publish(subject.to_string(), payload.into()).await {
        tracing::warn!(error = %e, subject, "failed to publish order event");
    }
}
