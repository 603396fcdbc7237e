use rusqlite::params;
use tokio_rusqlite::{Connection, Result};

use super::items::Item;

/// One row of the most-missed ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeCount {
    pub item: Item,
    pub mistakes: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerStats {
    pub answered: u32,
    pub correct: u32,
}

pub async fn create_table(conn: &Connection) -> Result<()> {
    conn.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                item_id INTEGER,
                is_correct INTEGER,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            (),
        )?;

        Ok(())
    })
    .await
}

pub async fn insert(conn: &Connection, item_id: i64, is_correct: bool) -> Result<()> {
    conn.call(move |conn| {
        conn.execute(
            "INSERT INTO records (item_id, is_correct) VALUES (?1, ?2)",
            params![item_id, is_correct],
        )?;

        Ok(())
    })
    .await
}

pub async fn mistake_ranking(conn: &Connection, limit: usize) -> Result<Vec<MistakeCount>> {
    conn.call(move |conn| {
        let mut stmt = conn.prepare(
            "SELECT i.id, i.word, i.meaning, COUNT(*) AS mistakes
            FROM records r
            JOIN items i ON r.item_id = i.id
            WHERE r.is_correct = 0
            GROUP BY i.id
            ORDER BY mistakes DESC
            LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            Ok(MistakeCount {
                item: Item {
                    id: row.get(0)?,
                    word: row.get(1)?,
                    meaning: row.get(2)?,
                },
                mistakes: row.get(3)?,
            })
        })?;

        let mut ranking = Vec::new();
        for row in rows {
            ranking.push(row?);
        }

        Ok(ranking)
    })
    .await
}

pub async fn stats(conn: &Connection) -> Result<AnswerStats> {
    conn.call(|conn| {
        let stats = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_correct), 0) FROM records",
            [],
            |row| {
                Ok(AnswerStats {
                    answered: row.get(0)?,
                    correct: row.get(1)?,
                })
            },
        )?;

        Ok(stats)
    })
    .await
}
