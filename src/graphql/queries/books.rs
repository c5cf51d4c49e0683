use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Get all books
    #[graphql(guard = "AuthGuard")]
    async fn get_all_books(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Book>>>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.books().list().await.map_err(db_error)?;

        Ok(Some(records.into_iter().map(|r| Some(Book::from(r))).collect()))
    }

    /// Get a book by ID
    #[graphql(guard = "AuthGuard")]
    async fn get_book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db.books().get_by_id(id).await.map_err(db_error)?;
        Ok(record.map(Book::from))
    }
}
