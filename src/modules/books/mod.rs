pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod validation;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstore_kernel::{InitCtx, Module, SchemaDefinition};
use serde_json::json;

use handlers::BooksState;

/// Books inventory module: CRUD and title search over the `books` table
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route(
                "/books",
                get(handlers::list_books).post(handlers::create_book),
            )
            .route(
                "/books/",
                get(handlers::list_books).post(handlers::create_book),
            )
            .route(
                "/books/{book_id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .route("/search", get(handlers::search_books))
            .route("/search/", get(handlers::search_books))
            .with_state(BooksState::new(ctx.db.clone()))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn schema(&self) -> Vec<SchemaDefinition> {
        vec![SchemaDefinition {
            id: "001_books",
            ddl: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id       INTEGER PRIMARY KEY AUTOINCREMENT,
                    title    TEXT    NOT NULL,
                    author   TEXT    NOT NULL,
                    price    REAL    NOT NULL CHECK (price > 0),
                    quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 0)
                );
                CREATE INDEX IF NOT EXISTS ix_books_title ON books (title);
                "#,
        }]
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.seed.enabled {
            seed::seed_samples(ctx.db).await?;
        } else {
            tracing::info!(module = self.name(), "sample seeding disabled");
        }

        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

fn book_ref() -> serde_json::Value {
    json!({ "$ref": "#/components/schemas/Book" })
}

fn book_list() -> serde_json::Value {
    json!({ "type": "array", "items": book_ref() })
}

fn message_ref() -> serde_json::Value {
    json!({ "$ref": "#/components/schemas/Message" })
}

fn book_id_param() -> serde_json::Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn book_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "Welcome message",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("Welcome message", message_ref())
                    }
                }
            },
            "/books/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("List of books", book_list()),
                        "500": error_response("Record store fault")
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_body(),
                    "responses": {
                        "200": json_response("Created book", book_ref()),
                        "422": error_response("Validation error"),
                        "500": error_response("Record store fault")
                    }
                }
            },
            "/books/{book_id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": json_response("The book", book_ref()),
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book id")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "requestBody": book_body(),
                    "responses": {
                        "200": json_response("Updated book", book_ref()),
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": json_response("Deletion acknowledgement", message_ref()),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/search/": {
                "get": {
                    "summary": "Search books by title",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "q",
                        "in": "query",
                        "required": true,
                        "description": "Case-insensitive title substring",
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": json_response("Matching books", book_list()),
                        "422": error_response("Missing query parameter")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string", "minLength": 2 },
                        "author": { "type": "string", "minLength": 2 },
                        "price": { "type": "number", "exclusiveMinimum": 0 },
                        "quantity": { "type": "integer", "minimum": 0 }
                    },
                    "required": ["id", "title", "author", "price", "quantity"]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "minLength": 2 },
                        "author": { "type": "string", "minLength": 2 },
                        "price": { "type": "number", "exclusiveMinimum": 0 },
                        "quantity": { "type": "integer", "minimum": 0, "default": 1 }
                    },
                    "required": ["title", "author", "price"]
                },
                "Message": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
