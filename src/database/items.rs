use rusqlite::params;
use tokio_rusqlite::{Connection, Result};

use super::seed::SeedRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub word: String,
    pub meaning: String,
}

/// Which items a quiz may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    All,
    /// Items answered incorrectly at least once.
    Review,
}

pub async fn create_table(conn: &Connection) -> Result<()> {
    conn.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT,
                meaning TEXT
            )",
            (),
        )?;

        Ok(())
    })
    .await
}

pub async fn count(conn: &Connection) -> Result<usize> {
    conn.call(|conn| {
        let count: i64 = conn.query_row("SELECT count(*) FROM items", [], |row| row.get(0))?;

        Ok(count as usize)
    })
    .await
}

pub async fn insert(conn: &Connection, rows: Vec<SeedRow>) -> Result<usize> {
    conn.call(move |conn| {
        let ta = conn.transaction()?;
        let mut stmt_id = ta.prepare("INSERT INTO items (id, word, meaning) VALUES (?1, ?2, ?3)")?;
        let mut stmt = ta.prepare("INSERT INTO items (word, meaning) VALUES (?1, ?2)")?;

        let mut inserted = 0;
        for row in rows {
            inserted += match row.id {
                Some(id) => stmt_id.execute(params![id, row.word, row.meaning])?,
                None => stmt.execute(params![row.word, row.meaning])?,
            };
        }

        drop(stmt_id);
        drop(stmt);
        ta.commit()?;

        Ok(inserted)
    })
    .await
}

pub async fn list(conn: &Connection, pool: Pool) -> Result<Vec<Item>> {
    conn.call(move |conn| {
        let query = match pool {
            Pool::All => "SELECT id, word, meaning FROM items",
            Pool::Review => {
                "SELECT DISTINCT i.id, i.word, i.meaning
                FROM items i
                JOIN records r ON i.id = r.item_id
                WHERE r.is_correct = 0"
            }
        };
        let mut stmt = conn.prepare(query)?;

        let rows = stmt.query_map([], |row| {
            Ok(Item {
                id: row.get(0)?,
                word: row.get(1)?,
                meaning: row.get(2)?,
            })
        })?;

        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }

        Ok(items)
    })
    .await
}

pub async fn meanings(conn: &Connection) -> Result<Vec<String>> {
    conn.call(|conn| {
        let mut stmt = conn.prepare("SELECT meaning FROM items")?;

        let rows = stmt.query_map([], |row| row.get::<usize, String>(0))?;

        let mut meanings = Vec::new();
        for meaning in rows {
            meanings.push(meaning?);
        }

        Ok(meanings)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::records;

    fn row(word: &str, meaning: &str) -> SeedRow {
        SeedRow {
            id: None,
            word: word.to_owned(),
            meaning: meaning.to_owned(),
        }
    }

    async fn catalog() -> Connection {
        let conn = Connection::open_in_memory().await.unwrap();
        create_table(&conn).await.unwrap();
        records::create_table(&conn).await.unwrap();
        insert(
            &conn,
            vec![
                row("사과", "apple"),
                row("바나나", "banana"),
                row("포도", "grape"),
                row("딸기", "strawberry"),
            ],
        )
        .await
        .unwrap();
        conn
    }

    #[tokio::test]
    async fn fresh_catalog_has_nothing_to_review() {
        let conn = catalog().await;

        assert_eq!(list(&conn, Pool::All).await.unwrap().len(), 4);
        assert!(list(&conn, Pool::Review).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn review_pool_holds_missed_items_once() {
        let conn = catalog().await;
        records::insert(&conn, 1, false).await.unwrap();
        records::insert(&conn, 1, false).await.unwrap();
        records::insert(&conn, 2, true).await.unwrap();
        records::insert(&conn, 3, true).await.unwrap();
        records::insert(&conn, 3, false).await.unwrap();

        let mut review: Vec<i64> = list(&conn, Pool::Review)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        review.sort();

        assert_eq!(review, vec![1, 3]);
    }

    #[tokio::test]
    async fn review_after_single_miss_is_that_item() {
        let conn = catalog().await;
        records::insert(&conn, 1, false).await.unwrap();

        let review = list(&conn, Pool::Review).await.unwrap();

        assert_eq!(
            review,
            vec![Item {
                id: 1,
                word: String::from("사과"),
                meaning: String::from("apple"),
            }]
        );
    }

    #[tokio::test]
    async fn explicit_ids_are_kept() {
        let conn = Connection::open_in_memory().await.unwrap();
        create_table(&conn).await.unwrap();
        insert(
            &conn,
            vec![SeedRow {
                id: Some(42),
                word: String::from("물"),
                meaning: String::from("water"),
            }],
        )
        .await
        .unwrap();

        let items = list(&conn, Pool::All).await.unwrap();

        assert_eq!(items[0].id, 42);
        assert_eq!(count(&conn).await.unwrap(), 1);
        assert_eq!(meanings(&conn).await.unwrap(), vec![String::from("water")]);
    }
}
