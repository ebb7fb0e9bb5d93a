use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::ReturnDocument,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::models::{Book, NewBook};
use super::repository::BookStore;

pub const COLLECTION: &str = "books";

/// Shape of a book inside MongoDB.
///
/// `year` decodes from any BSON number (`Int32`, `Int64` or `Double`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    author: String,
    year: Number,
    genre: String,
}

impl BookDocument {
    fn into_book(self) -> anyhow::Result<Book> {
        let id = self.id.context("stored book has no _id")?;
        Ok(Book {
            id: id.to_hex(),
            title: self.title,
            author: self.author,
            year: self.year,
            genre: self.genre,
        })
    }
}

impl From<NewBook> for BookDocument {
    fn from(book: NewBook) -> Self {
        Self {
            id: None,
            title: book.title,
            author: book.author,
            year: book.year,
            genre: book.genre,
        }
    }
}

/// [`BookStore`] backed by the `books` collection.
#[derive(Clone)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

/// Ids that are not valid ObjectIds can never match a record.
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        let documents: Vec<BookDocument> = self
            .collection
            .find(doc! {})
            .await
            .context("find books")?
            .try_collect()
            .await
            .context("read books cursor")?;

        documents.into_iter().map(BookDocument::into_book).collect()
    }

    async fn insert(&self, book: NewBook) -> anyhow::Result<Book> {
        let mut document = BookDocument::from(book);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .context("insert book")?;

        document.id = Some(
            result
                .inserted_id
                .as_object_id()
                .context("inserted _id is not an ObjectId")?,
        );
        document.into_book()
    }

    async fn replace(&self, id: &str, book: NewBook) -> anyhow::Result<Option<Book>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let fields = bson::to_document(&BookDocument::from(book)).context("encode book")?;
        let update = doc! { "$set": fields };

        self.collection
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await
            .context("update book")?
            .map(BookDocument::into_book)
            .transpose()
    }

    async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .context("delete book")?;

        Ok(result.deleted_count > 0)
    }
}
