//! Sample records inserted at startup.

use sqlx::SqlitePool;

use super::models::NewBook;
use super::repository;

/// A literal sample record.
#[derive(Debug, Clone, Copy)]
pub struct SampleBook {
    pub title: &'static str,
    pub author: &'static str,
    pub price: f64,
    pub quantity: i64,
}

impl SampleBook {
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.to_string(),
            author: self.author.to_string(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

pub const SAMPLE_BOOKS: [SampleBook; 3] = [
    SampleBook {
        title: "Python Basics",
        author: "John Doe",
        price: 299.99,
        quantity: 5,
    },
    SampleBook {
        title: "FastAPI Guide",
        author: "Jane Smith",
        price: 399.99,
        quantity: 3,
    },
    SampleBook {
        title: "Data Science 101",
        author: "Alice Brown",
        price: 499.99,
        quantity: 7,
    },
];

/// Outcome of one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert each sample whose exact title is not already stored.
///
/// Runs in one transaction, so a failure leaves the store untouched.
pub async fn seed_samples(pool: &SqlitePool) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for sample in &SAMPLE_BOOKS {
        if repository::find_by_title(&mut tx, sample.title)
            .await?
            .is_some()
        {
            report.skipped += 1;
            continue;
        }

        repository::insert(&mut tx, &sample.to_new_book()).await?;
        report.inserted += 1;
    }

    tx.commit().await?;

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "sample books seeded"
    );
    Ok(report)
}
