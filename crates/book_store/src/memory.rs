//! In-memory book store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Book, BookUpdate, ObjectId, User};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;

use crate::{BookFilter, BookStore, StoreError, StoreResult};

/// In-memory book store for tests and runs without a database.
#[derive(Debug, Default, Clone)]
pub struct MemoryBookStore {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
    books: Arc<RwLock<HashMap<ObjectId, Book>>>,
}

impl MemoryBookStore {
    /// Creates a new in-memory book store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compiles the keyword into a literal, case-insensitive matcher.
pub(crate) fn keyword_matcher(keyword: &str) -> StoreResult<Regex> {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .map_err(|e| StoreError::Other(e.to_string()))
}

#[async_trait]
impl BookStore for MemoryBookStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::already_exists("User", user.id.to_hex()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::already_exists("User", user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    // =========================================================================
    // Book operations
    // =========================================================================

    async fn create_book(&self, book: Book) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.id) {
            return Err(StoreError::already_exists("Book", book.id.to_hex()));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: ObjectId) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.get(&id).cloned())
    }

    async fn list_books(&self, filter: BookFilter) -> StoreResult<Vec<Book>> {
        let matcher = filter.keyword.as_deref().map(keyword_matcher).transpose()?;

        let books = self.books.read().await;
        let mut result: Vec<Book> = books
            .values()
            .filter(|b| match &matcher {
                Some(matcher) => matcher.is_match(&b.title),
                None => true,
            })
            .cloned()
            .collect();
        result.sort_by_key(|b| b.id);

        let skip = filter
            .skip
            .map_or(0, |s| usize::try_from(s).unwrap_or(usize::MAX));
        let limit = filter
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(result.into_iter().skip(skip).take(limit).collect())
    }

    async fn update_book(&self, id: ObjectId, update: BookUpdate) -> StoreResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.get_mut(&id).map(|book| {
            book.apply(&update);
            book.clone()
        }))
    }

    async fn delete_book(&self, id: ObjectId) -> StoreResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use entities::Category;

    use super::*;

    fn book(owner: ObjectId, title: &str) -> Book {
        Book::new(owner, title, "Book Description", "Author", 100.0, Category::Fantasy)
    }

    #[tokio::test]
    async fn test_user_crud() {
        let store = MemoryBookStore::new();

        let user = User::new("Ghulam", "hafiz@gmail.com", "hashedPassword");
        let created = store.create_user(user).await.unwrap();

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "hafiz@gmail.com");

        let by_email = store
            .get_user_by_email("hafiz@gmail.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(store
            .get_user_by_email("nobody@gmail.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryBookStore::new();

        store
            .create_user(User::new("hafiz", "hafiz@gmail.com", "hash-1"))
            .await
            .unwrap();
        let err = store
            .create_user(User::new("other", "hafiz@gmail.com", "hash-2"))
            .await
            .unwrap_err();

        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_book_crud() {
        let store = MemoryBookStore::new();
        let owner = ObjectId::new();

        // Create
        let created = store.create_book(book(owner, "New Book")).await.unwrap();
        assert_eq!(created.user, owner);

        // Get
        let fetched = store.get_book(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // Update
        let update = BookUpdate {
            title: Some("Updated name".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_book(created.id, update.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Updated name");
        assert_eq!(updated.user, owner);
        assert!(store
            .update_book(ObjectId::new(), update)
            .await
            .unwrap()
            .is_none());

        // Delete
        let deleted = store.delete_book(created.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(store.get_book(created.id).await.unwrap().is_none());
        assert!(store.delete_book(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_books_keyword_is_case_insensitive_substring() {
        let store = MemoryBookStore::new();
        let owner = ObjectId::new();

        store.create_book(book(owner, "A Test of Wills")).await.unwrap();
        store.create_book(book(owner, "LATEST news")).await.unwrap();
        store.create_book(book(owner, "Unrelated")).await.unwrap();

        let filter = BookFilter::page(1, Some("test".to_string()));
        let books = store.list_books(filter).await.unwrap();

        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A Test of Wills", "LATEST news"]);
    }

    #[tokio::test]
    async fn test_list_books_keyword_is_literal() {
        let store = MemoryBookStore::new();
        let owner = ObjectId::new();

        store.create_book(book(owner, "C++ Primer")).await.unwrap();
        store.create_book(book(owner, "Cat")).await.unwrap();

        let books = store
            .list_books(BookFilter::page(1, Some("c++".to_string())))
            .await
            .unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "C++ Primer");
    }

    #[tokio::test]
    async fn test_list_books_paginates_in_insertion_order() {
        let store = MemoryBookStore::new();
        let owner = ObjectId::new();

        for i in 0..25 {
            store
                .create_book(book(owner, &format!("Book {i:02}")))
                .await
                .unwrap();
        }

        let first = store.list_books(BookFilter::page(1, None)).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "Book 00");

        let third = store.list_books(BookFilter::page(3, None)).await.unwrap();
        assert_eq!(third.len(), 5);
        assert_eq!(third[0].title, "Book 20");

        let all = store.list_books(BookFilter::default()).await.unwrap();
        assert_eq!(all.len(), 25);

        let beyond = store
            .list_books(BookFilter::page(u64::MAX, None))
            .await
            .unwrap();
        assert!(beyond.is_empty());
    }
}
