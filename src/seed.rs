//! Sample bookstore data for setting up a collection the demonstration steps can run against.
use crate::errors::DbError;
use crate::store::DocumentStore;
use mongodb::bson::{Document, doc};

#[allow(clippy::too_many_arguments)]
fn book(
    title: &str,
    author: &str,
    genre: &str,
    published_year: i32,
    price: f64,
    in_stock: bool,
    pages: i32,
    publisher: &str,
) -> Document {
    doc! {
        "title": title,
        "author": author,
        "genre": genre,
        "published_year": published_year,
        "price": price,
        "in_stock": in_stock,
        "pages": pages,
        "publisher": publisher,
    }
}

#[must_use]
pub fn sample_books() -> Vec<Document> {
    vec![
        book("To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 12.99, true, 336, "J. B. Lippincott & Co."),
        book("1984", "George Orwell", "Dystopian", 1949, 10.99, true, 328, "Secker & Warburg"),
        book("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1925, 9.99, true, 180, "Charles Scribner's Sons"),
        book("Brave New World", "Aldous Huxley", "Dystopian", 1932, 11.5, false, 311, "Chatto & Windus"),
        book("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true, 310, "George Allen & Unwin"),
        book("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1951, 8.99, true, 224, "Little, Brown and Company"),
        book("Pride and Prejudice", "Jane Austen", "Romance", 1813, 7.99, true, 432, "T. Egerton"),
        book("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", 1954, 19.99, true, 1178, "Allen & Unwin"),
        book("Animal Farm", "George Orwell", "Political Satire", 1945, 8.5, false, 112, "Secker & Warburg"),
        book("The Alchemist", "Paulo Coelho", "Fiction", 1988, 10.99, true, 197, "HarperOne"),
        book("Moby Dick", "Herman Melville", "Adventure", 1851, 12.5, false, 635, "Harper & Brothers"),
        book("Wuthering Heights", "Emily Brontë", "Gothic Fiction", 1847, 9.99, true, 342, "Thomas Cautley Newby"),
        book("Harry Potter and the Deathly Hallows", "J.K. Rowling", "Fantasy", 2007, 15.99, true, 607, "Bloomsbury"),
        book("The Testaments", "Margaret Atwood", "Dystopian", 2019, 18.99, true, 419, "Nan A. Talese"),
    ]
}

/// Drops the collection and inserts `docs`. Returns the inserted count.
///
/// # Errors
/// Propagates store errors.
pub async fn seed_with<S: DocumentStore>(store: &S, docs: Vec<Document>) -> Result<usize, DbError> {
    store.drop_collection().await?;
    let n = store.insert_many(docs).await?;
    log::info!("seeded {n} documents into {}", store.collection_name());
    Ok(n)
}

/// Replaces the collection's contents with `sample_books()`.
///
/// # Errors
/// Propagates store errors.
pub async fn seed_collection<S: DocumentStore>(store: &S) -> Result<usize, DbError> {
    seed_with(store, sample_books()).await
}
