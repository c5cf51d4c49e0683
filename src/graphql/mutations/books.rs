use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book
    #[graphql(guard = "AuthGuard")]
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        publisher: Option<String>,
        release_date: Option<String>,
        page_count: Option<String>,
        volume: Option<String>,
    ) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .books()
            .create(CreateBook {
                title,
                author,
                publisher,
                release_date,
                page_count,
                volume,
            })
            .await
            .map_err(db_error)?;

        Ok(Some(record.into()))
    }

    /// Update the book with the given title
    #[graphql(guard = "AuthGuard")]
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        publisher: Option<String>,
        release_date: Option<String>,
        page_count: Option<String>,
        volume: Option<String>,
    ) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .books()
            .update_by_title(
                &title,
                UpdateBook {
                    author,
                    publisher,
                    release_date,
                    page_count,
                    volume,
                },
            )
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("Book", &title))?;

        Ok(Some(record.into()))
    }

    /// Delete a book
    #[graphql(guard = "AuthGuard")]
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db
            .books()
            .delete(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("Book", id))?;

        Ok(Some(record.into()))
    }
}
