//! MongoDB-backed book store.

use async_trait::async_trait;
use bson::{doc, Document};
use chrono::Utc;
use entities::{Book, BookUpdate, ObjectId, User};
use futures_util::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};

use crate::{BookFilter, BookStore, StoreError, StoreResult};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

const USERS_COLLECTION: &str = "users";
const BOOKS_COLLECTION: &str = "books";

/// Book store persisting to the `users` and `books` collections.
#[derive(Debug, Clone)]
pub struct MongoBookStore {
    users: Collection<User>,
    books: Collection<Book>,
}

impl MongoBookStore {
    /// Connects to `uri`, selects `database` and ensures the indexes exist.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let store = Self::from_database(&client.database(database));
        store.ensure_indexes().await?;

        tracing::info!(database = %database, "Connected to MongoDB");

        Ok(store)
    }

    /// Wraps the collections of an existing database handle.
    pub fn from_database(database: &Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
            books: database.collection(BOOKS_COLLECTION),
        }
    }

    /// Creates the unique index on user email.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

/// Returns true if the driver error is a duplicate key write error.
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Builds the query document for a book listing.
pub(crate) fn title_filter(keyword: Option<&str>) -> Document {
    match keyword {
        Some(keyword) => doc! {
            "title": {
                "$regex": regex::escape(keyword),
                "$options": "i",
            }
        },
        None => Document::new(),
    }
}

/// Builds the `$set` document for a partial update.
pub(crate) fn update_document(update: &BookUpdate) -> StoreResult<Document> {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &update.description {
        set.insert("description", description.as_str());
    }
    if let Some(author) = &update.author {
        set.insert("author", author.as_str());
    }
    if let Some(price) = update.price {
        set.insert("price", price);
    }
    if let Some(category) = update.category {
        set.insert("category", bson::to_bson(&category)?);
    }
    set.insert("updated_at", bson::DateTime::from_chrono(Utc::now()));

    Ok(doc! { "$set": set })
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::already_exists("User", user.email)),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    async fn create_book(&self, book: Book) -> StoreResult<Book> {
        match self.books.insert_one(&book).await {
            Ok(_) => Ok(book),
            Err(e) if is_duplicate_key(&e) => {
                Err(StoreError::already_exists("Book", book.id.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_book(&self, id: ObjectId) -> StoreResult<Option<Book>> {
        Ok(self.books.find_one(doc! { "_id": id }).await?)
    }

    async fn list_books(&self, filter: BookFilter) -> StoreResult<Vec<Book>> {
        let mut find = self
            .books
            .find(title_filter(filter.keyword.as_deref()))
            .sort(doc! { "_id": 1 });
        // The server takes a signed 64-bit skip.
        if let Some(skip) = filter.skip {
            find = find.skip(skip.min(i64::MAX as u64));
        }
        if let Some(limit) = filter.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await?;
        let books: Vec<Book> = cursor.try_collect().await?;
        Ok(books)
    }

    async fn update_book(&self, id: ObjectId, update: BookUpdate) -> StoreResult<Option<Book>> {
        Ok(self
            .books
            .find_one_and_update(doc! { "_id": id }, update_document(&update)?)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_book(&self, id: ObjectId) -> StoreResult<Option<Book>> {
        Ok(self.books.find_one_and_delete(doc! { "_id": id }).await?)
    }
}

#[cfg(test)]
mod tests {
    use entities::Category;

    use super::*;

    #[test]
    fn test_title_filter_escapes_keyword() {
        let filter = title_filter(Some("c++ (2nd)"));
        let title = filter.get_document("title").unwrap();

        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(2nd\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_title_filter_without_keyword_matches_all() {
        assert!(title_filter(None).is_empty());
    }

    #[test]
    fn test_update_document_sets_only_supplied_fields() {
        let update = BookUpdate {
            title: Some("Updated name".to_string()),
            price: Some(12.5),
            category: Some(Category::Crime),
            ..Default::default()
        };

        let document = update_document(&update).unwrap();
        let set = document.get_document("$set").unwrap();

        assert_eq!(set.get_str("title").unwrap(), "Updated name");
        assert_eq!(set.get_f64("price").unwrap(), 12.5);
        assert_eq!(set.get_str("category").unwrap(), "Crime");
        assert!(set.get_datetime("updated_at").is_ok());
        assert!(!set.contains_key("author"));
        assert!(!set.contains_key("user"));
    }
}
