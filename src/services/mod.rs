//! Business logic services

pub mod auth;
pub mod books;
pub mod openlibrary;

use crate::{config::OpenLibraryConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, openlibrary_config: &OpenLibraryConfig) -> AppResult<Self> {
        let openlibrary = openlibrary::OpenLibraryService::new(openlibrary_config)?;
        Ok(Self {
            auth: auth::AuthService::new(repository.clone()),
            books: books::BooksService::new(repository, openlibrary),
        })
    }
}
