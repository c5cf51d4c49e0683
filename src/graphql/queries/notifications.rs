use super::prelude::*;

#[derive(Default)]
pub struct NotificationQueries;

#[Object]
impl NotificationQueries {
    /// Get all notifications, oldest first
    #[graphql(guard = "AuthGuard")]
    async fn get_all_notifications(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<Vec<Option<Notification>>>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.notifications().list().await.map_err(db_error)?;

        Ok(Some(
            records
                .into_iter()
                .map(|r| Some(Notification::from(r)))
                .collect(),
        ))
    }

    /// Get a single notification by ID
    #[graphql(guard = "AuthGuard")]
    async fn get_notification(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Notification>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db.notifications().get_by_id(id).await.map_err(db_error)?;
        Ok(record.map(Notification::from))
    }
}
