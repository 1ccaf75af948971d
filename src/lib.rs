//! Bookstore application library
//!
//! Provides the `books` module and the bootstrap sequence that wires it into
//! the kernel, the record store and the HTTP facade.

pub mod app;
pub mod modules;

pub use app::App;
