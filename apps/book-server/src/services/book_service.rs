//! Book search and CRUD.

use std::sync::Arc;

use api_protocol::requests::{CreateBookRequest, ListBooksQuery, UpdateBookRequest};
use book_store::{BookFilter, BookStore};
use entities::{Book, BookUpdate, ObjectId};

use crate::error::{ServerError, ServerResult};
use crate::middleware::AuthenticatedUser;

/// Parses a path ID, rejecting anything that is not a 24-digit hex ObjectId.
pub fn parse_book_id(id: &str) -> ServerResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| ServerError::InvalidRequest("Please enter correct id.".to_string()))
}

fn book_not_found() -> ServerError {
    ServerError::NotFound("Book not found.".to_string())
}

/// Book operations on top of a [`BookStore`].
pub struct BookService<S> {
    store: Arc<S>,
}

impl<S: BookStore> BookService<S> {
    /// Creates a new book service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns one page of books whose title contains the keyword.
    pub async fn find_all(&self, query: &ListBooksQuery) -> ServerResult<Vec<Book>> {
        let filter = BookFilter::page(query.page_number(), query.keyword.clone());
        Ok(self.store.list_books(filter).await?)
    }

    /// Stores a new book owned by `user`.
    pub async fn create(
        &self,
        request: CreateBookRequest,
        user: &AuthenticatedUser,
    ) -> ServerResult<Book> {
        let book = Book::new(
            user.id,
            request.title,
            request.description,
            request.author,
            request.price,
            request.category,
        );
        book.validate()?;

        let book = self.store.create_book(book).await?;

        tracing::info!(book_id = %book.id, user_id = %user.id, "Book created");

        Ok(book)
    }

    /// Fetches a book. The ID is checked before the store is queried.
    pub async fn find_by_id(&self, id: &str) -> ServerResult<Book> {
        let id = parse_book_id(id)?;

        self.store
            .get_book(id)
            .await?
            .ok_or_else(book_not_found)
    }

    /// Applies a partial update after re-running the field rules.
    pub async fn update_by_id(&self, id: &str, request: UpdateBookRequest) -> ServerResult<Book> {
        let id = parse_book_id(id)?;
        let update = BookUpdate::from(request);
        update.validate()?;

        let book = self
            .store
            .update_book(id, update)
            .await?
            .ok_or_else(book_not_found)?;

        tracing::info!(book_id = %id, "Book updated");

        Ok(book)
    }

    /// Deletes a book and returns what was removed.
    pub async fn delete_by_id(&self, id: &str) -> ServerResult<Book> {
        let id = parse_book_id(id)?;

        let book = self
            .store
            .delete_book(id)
            .await?
            .ok_or_else(book_not_found)?;

        tracing::info!(book_id = %id, "Book deleted");

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use book_store::{MemoryBookStore, StoreResult};
    use entities::{Category, User};

    use super::*;

    fn service() -> (BookService<MemoryBookStore>, Arc<MemoryBookStore>) {
        let store = Arc::new(MemoryBookStore::new());
        (BookService::new(Arc::clone(&store)), store)
    }

    fn owner() -> AuthenticatedUser {
        AuthenticatedUser {
            id: ObjectId::parse_str("61c0ccf11d7bf83d153d7c06").unwrap(),
            name: "Ghulam".to_string(),
            email: "ghulam1@gmail.com".to_string(),
        }
    }

    fn create_request(title: &str) -> CreateBookRequest {
        CreateBookRequest {
            title: title.to_string(),
            description: "Book Description".to_string(),
            author: "Author".to_string(),
            price: 100.0,
            category: Category::Fantasy,
        }
    }

    fn query(page: &str, keyword: &str) -> ListBooksQuery {
        ListBooksQuery {
            page: Some(page.to_string()),
            keyword: Some(keyword.to_string()),
        }
    }

    /// Store that fails the test if any operation reaches it.
    struct UntouchedStore;

    #[async_trait]
    impl BookStore for UntouchedStore {
        async fn create_user(&self, _: User) -> StoreResult<User> {
            panic!("store must not be called")
        }
        async fn get_user(&self, _: ObjectId) -> StoreResult<Option<User>> {
            panic!("store must not be called")
        }
        async fn get_user_by_email(&self, _: &str) -> StoreResult<Option<User>> {
            panic!("store must not be called")
        }
        async fn create_book(&self, _: Book) -> StoreResult<Book> {
            panic!("store must not be called")
        }
        async fn get_book(&self, _: ObjectId) -> StoreResult<Option<Book>> {
            panic!("store must not be called")
        }
        async fn list_books(&self, _: BookFilter) -> StoreResult<Vec<Book>> {
            panic!("store must not be called")
        }
        async fn update_book(&self, _: ObjectId, _: BookUpdate) -> StoreResult<Option<Book>> {
            panic!("store must not be called")
        }
        async fn delete_book(&self, _: ObjectId) -> StoreResult<Option<Book>> {
            panic!("store must not be called")
        }
    }

    #[tokio::test]
    async fn test_create_sets_owner() {
        let (service, store) = service();
        let user = owner();

        let book = service.create(create_request("New Book"), &user).await.unwrap();

        assert_eq!(book.user, user.id);
        assert_eq!(book.title, "New Book");
        assert_eq!(store.get_book(book.id).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let service = BookService::new(Arc::new(UntouchedStore));
        let mut request = create_request("New Book");
        request.price = -1.0;

        let result = service.create(request, &owner()).await;
        assert!(matches!(result, Err(ServerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_book() {
        let (service, _) = service();
        let created = service.create(create_request("New Book"), &owner()).await.unwrap();

        let found = service.find_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_malformed_id_before_store() {
        let service = BookService::new(Arc::new(UntouchedStore));

        for id in ["invalid-id", "", "61c0ccf11d7bf83d153d7c0", "61c0ccf11d7bf83d153d7c0z"] {
            let result = service.find_by_id(id).await;
            assert!(
                matches!(result, Err(ServerError::InvalidRequest(_))),
                "{id}"
            );
        }
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let (service, _) = service();

        let result = service.find_by_id("61c0ccf11d7bf83d153d7c06").await;
        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_filters_by_keyword_and_pages_by_ten() {
        let (service, _) = service();
        let user = owner();

        for i in 0..12 {
            service
                .create(create_request(&format!("Testing volume {i}")), &user)
                .await
                .unwrap();
        }
        service.create(create_request("Other"), &user).await.unwrap();

        let first = service.find_all(&query("1", "test")).await.unwrap();
        assert_eq!(first.len(), 10);
        assert!(first.iter().all(|b| b.title.to_lowercase().contains("test")));

        let second = service.find_all(&query("2", "TEST")).await.unwrap();
        assert_eq!(second.len(), 2);

        let everything = service.find_all(&ListBooksQuery::default()).await.unwrap();
        assert_eq!(everything.len(), 10);
    }

    #[tokio::test]
    async fn test_update_by_id() {
        let (service, _) = service();
        let user = owner();
        let created = service.create(create_request("New Book"), &user).await.unwrap();

        let request = UpdateBookRequest {
            title: Some("Updated name".to_string()),
            ..Default::default()
        };
        let updated = service
            .update_by_id(&created.id.to_hex(), request)
            .await
            .unwrap();

        assert_eq!(updated.title, "Updated name");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.user, user.id);
    }

    #[tokio::test]
    async fn test_update_by_id_reruns_validation() {
        let service = BookService::new(Arc::new(UntouchedStore));

        let request = UpdateBookRequest {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        let result = service
            .update_by_id("61c0ccf11d7bf83d153d7c06", request)
            .await;

        assert!(matches!(result, Err(ServerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_update_by_id_missing_is_not_found() {
        let (service, _) = service();

        let request = UpdateBookRequest {
            price: Some(5.0),
            ..Default::default()
        };
        let result = service
            .update_by_id("61c0ccf11d7bf83d153d7c06", request)
            .await;

        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_by_id_returns_deleted_book() {
        let (service, store) = service();
        let created = service.create(create_request("New Book"), &owner()).await.unwrap();

        let deleted = service.delete_by_id(&created.id.to_hex()).await.unwrap();

        assert_eq!(deleted, created);
        assert!(store.get_book(created.id).await.unwrap().is_none());

        let again = service.delete_by_id(&created.id.to_hex()).await;
        assert!(matches!(again, Err(ServerError::NotFound(_))));
    }
}
