use std::path::Path;

use tokio::fs;
use tokio_rusqlite::Connection;

use crate::Result;

pub mod items;
pub mod records;
pub mod seed;

pub use items::{Item, Pool};
pub use records::{AnswerStats, MistakeCount};

async fn init(conn: &Connection) -> tokio_rusqlite::Result<()> {
    conn.call(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
                PRAGMA journal_size_limit = 6144000;",
        )?;

        Ok(())
    })
    .await
}

/// Handle to the quiz database. Clones share the same connection.
#[derive(Clone)]
pub struct Store {
    conn: Connection,
}

impl Store {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Store> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let conn = Connection::open(path).await?;

        init(&conn).await?;

        Ok(Store { conn })
    }

    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Store> {
        let conn = Connection::open_in_memory().await?;

        Ok(Store { conn })
    }

    /// Creates the tables if they are missing and imports `seed` into an empty
    /// catalog. Safe to call on every start.
    pub async fn initialize(&self, seed: Option<&Path>) -> Result<()> {
        items::create_table(&self.conn).await?;
        records::create_table(&self.conn).await?;

        let Some(seed) = seed else {
            return Ok(());
        };

        if !fs::try_exists(seed).await? {
            tracing::info!(path = %seed.display(), "no seed vocabulary found");
            return Ok(());
        }

        if items::count(&self.conn).await? > 0 {
            return Ok(());
        }

        let rows = seed::read_rows(seed).await?;
        let inserted = items::insert(&self.conn, rows).await?;
        tracing::info!(path = %seed.display(), inserted, "seed vocabulary imported");

        Ok(())
    }

    /// Appends every row of a vocabulary file, whatever the catalog holds already.
    pub async fn import_items<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let rows = seed::read_rows(path.as_ref()).await?;
        let inserted = items::insert(&self.conn, rows).await?;
        tracing::info!(path = %path.as_ref().display(), inserted, "vocabulary imported");

        Ok(inserted)
    }

    pub async fn list_items(&self, pool: Pool) -> Result<Vec<Item>> {
        Ok(items::list(&self.conn, pool).await?)
    }

    pub async fn meanings(&self) -> Result<Vec<String>> {
        Ok(items::meanings(&self.conn).await?)
    }

    pub async fn record_answer(&self, item_id: i64, is_correct: bool) -> Result<()> {
        records::insert(&self.conn, item_id, is_correct).await?;

        Ok(())
    }

    pub async fn mistake_ranking(&self, limit: usize) -> Result<Vec<MistakeCount>> {
        Ok(records::mistake_ranking(&self.conn, limit).await?)
    }

    pub async fn answer_stats(&self) -> Result<AnswerStats> {
        Ok(records::stats(&self.conn).await?)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
