//! Data access for the `books` table.
//!
//! Every function runs a single statement on a caller-owned connection, so
//! the caller decides whether it is a pooled session or a transaction.
//! Update and delete are single atomic statements: there is no window between
//! finding a row and changing it.

use sqlx::SqliteConnection;

use super::models::{Book, NewBook};

/// Insert a new record and return it with its assigned id.
pub async fn insert(conn: &mut SqliteConnection, book: &NewBook) -> Result<Book, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "INSERT INTO books (title, author, price, quantity)
         VALUES (?, ?, ?, ?)
         RETURNING id, title, author, price, quantity",
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.price)
    .bind(book.quantity)
    .fetch_one(&mut *conn)
    .await
}

/// Every record, oldest first.
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, quantity FROM books ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, quantity FROM books WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Replace every mutable field of the record; `None` if no record has this id.
pub async fn update_by_id(
    conn: &mut SqliteConnection,
    id: i64,
    book: &NewBook,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "UPDATE books
         SET title = ?, author = ?, price = ?, quantity = ?
         WHERE id = ?
         RETURNING id, title, author, price, quantity",
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.price)
    .bind(book.quantity)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Remove the record; `false` if no record has this id.
pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Records whose title contains `q`, ignoring ASCII case.
///
/// `instr` keeps this a literal match: `%` and `_` in `q` are not wildcards.
/// An empty `q` matches every record.
pub async fn search_by_title(
    conn: &mut SqliteConnection,
    q: &str,
) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, quantity FROM books
         WHERE instr(lower(title), lower(?)) > 0
         ORDER BY id",
    )
    .bind(q)
    .fetch_all(&mut *conn)
    .await
}

/// First record with exactly this title, if any.
pub async fn find_by_title(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, quantity FROM books
         WHERE title = ?
         ORDER BY id
         LIMIT 1",
    )
    .bind(title)
    .fetch_optional(&mut *conn)
    .await
}
