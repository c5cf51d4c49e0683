//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket.

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::services::NotificationService;

use super::types::Notification;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Notifications as they are created or deleted
    async fn notification_change<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> impl Stream<Item = Notification> + 'ctx {
        let service = ctx.data_unchecked::<NotificationService>();
        let receiver = service.subscribe();

        // Lagged receivers drop the missed events and keep streaming
        BroadcastStream::new(receiver).filter_map(|result| result.ok().map(Notification::from))
    }
}
