//! Book list management service

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, NewBook},
    repository::Repository,
    services::openlibrary::OpenLibraryService,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    openlibrary: OpenLibraryService,
}

impl BooksService {
    pub fn new(repository: Repository, openlibrary: OpenLibraryService) -> Self {
        Self {
            repository,
            openlibrary,
        }
    }

    /// List the user's books with optional filters and sort order
    pub async fn list(&self, user_id: i32, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(user_id, query).await
    }

    /// Create a book for the user.
    ///
    /// When the caller supplies no ISBN (or a blank one), the Open Library
    /// resolver is consulted with title and author before the insert.
    /// Unresolved identifiers are stored as empty strings.
    pub async fn create(&self, user_id: i32, payload: CreateBook) -> AppResult<Book> {
        let supplied_isbn = payload
            .isbn
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let (isbn, cover_edition_key) = match supplied_isbn {
            Some(isbn) => (isbn.to_string(), String::new()),
            None => {
                let resolved = self
                    .openlibrary
                    .resolve(&payload.title, Some(&payload.author))
                    .await;
                (
                    resolved.isbn.unwrap_or_default(),
                    resolved.cover_edition_key.unwrap_or_default(),
                )
            }
        };

        let record = NewBook {
            title: payload.title,
            author: payload.author,
            isbn,
            cover_edition_key,
            rating: payload.rating,
            notes: payload.notes,
            status: payload.status,
            genre: payload.genre,
        };

        self.repository.books.create(user_id, &record).await
    }

    /// Delete one of the user's books.
    ///
    /// A miss (no such book, or someone else's) affects zero rows and is
    /// reported as success; callers cannot tell the two cases apart.
    pub async fn delete(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        let rows = self.repository.books.delete(book_id, user_id).await?;
        if rows == 0 {
            tracing::debug!("Delete affected no rows for book {}", book_id);
        }
        Ok(())
    }
}
