use super::prelude::*;
use crate::services::NotificationService;

#[derive(Default)]
pub struct NotificationMutations;

#[Object]
impl NotificationMutations {
    /// Create a notification and push it to notificationChange subscribers
    #[graphql(guard = "AuthGuard")]
    async fn add_notification(
        &self,
        ctx: &Context<'_>,
        title: String,
        text: String,
    ) -> Result<Option<Notification>> {
        let service = ctx.data_unchecked::<NotificationService>();

        let record = service
            .create(CreateNotification { title, text })
            .await
            .map_err(db_error)?;

        Ok(Some(record.into()))
    }

    /// Delete a notification and push the removed row to subscribers
    #[graphql(guard = "AuthGuard")]
    async fn delete_notification(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Notification>> {
        let service = ctx.data_unchecked::<NotificationService>();
        let id = parse_id(&id)?;

        let record = service
            .delete(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("Notification", id))?;

        Ok(Some(record.into()))
    }
}
