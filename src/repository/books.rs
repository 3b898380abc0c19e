//! Books repository for database operations.
//!
//! Every operation is scoped to the owning user; a book is never visible
//! or mutable through a query that does not carry its owner's id.

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, NewBook, SortOrder},
};

const BOOK_COLUMNS: &str =
    "id, user_id, title, author, isbn, cover_edition_key, rating, notes, status, genre, created_at";

/// Build the SELECT statement for a filtered listing.
///
/// Filters compose conjunctively as a numbered-parameter predicate list;
/// values are never interpolated into the SQL text. One bind per
/// predicate, in declaration order: search pattern, status, rating.
fn list_sql(query: &BookQuery) -> String {
    let mut conditions = vec!["user_id = $1".to_string()];

    if query.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${n} OR author ILIKE ${n})",
            n = conditions.len() + 1
        ));
    }
    if query.status.is_some() {
        conditions.push(format!("status = ${}", conditions.len() + 1));
    }
    if query.rating.is_some() {
        conditions.push(format!("rating = ${}", conditions.len() + 1));
    }

    format!(
        "SELECT {} FROM books WHERE {} ORDER BY {}",
        BOOK_COLUMNS,
        conditions.join(" AND "),
        order_clause(query.sort.unwrap_or_default())
    )
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Oldest => "created_at ASC",
        SortOrder::Highest => "rating DESC NULLS LAST",
        SortOrder::Newest => "created_at DESC",
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a user's books with optional filters and sort order
    pub async fn list(&self, user_id: i32, query: &BookQuery) -> AppResult<Vec<Book>> {
        let sql = list_sql(query);

        let mut builder = sqlx::query_as::<_, Book>(&sql).bind(user_id);
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(rating) = query.rating {
            builder = builder.bind(rating);
        }

        let books = builder.fetch_all(&self.pool).await?;

        Ok(books)
    }

    /// Insert a new book and return the persisted record
    pub async fn create(&self, user_id: i32, book: &NewBook) -> AppResult<Book> {
        let sql = format!(
            r#"
            INSERT INTO books (user_id, title, author, isbn, cover_edition_key, rating, notes, status, genre)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let created = sqlx::query_as::<_, Book>(&sql)
            .bind(user_id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(&book.cover_edition_key)
            .bind(book.rating)
            .bind(&book.notes)
            .bind(book.status)
            .bind(&book.genre)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Delete a book owned by the given user.
    ///
    /// Returns the number of rows affected. Zero rows means the book does
    /// not exist or belongs to another user; callers treat both the same.
    pub async fn delete(&self, id: i32, user_id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
