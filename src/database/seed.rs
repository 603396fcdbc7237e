use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::Result;

/// One line of a vocabulary file with header `word,meaning` and an optional `id` column.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub word: String,
    pub meaning: String,
}

pub async fn read_rows(path: &Path) -> Result<Vec<SeedRow>> {
    let bytes = fs::read(path).await?;

    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<Vec<SeedRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);

    let mut rows = Vec::new();
    for row in reader.deserialize::<SeedRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_word_and_meaning() {
        let rows = parse("word,meaning\n사과,apple\n바나나, banana \n".as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].word, "사과");
        assert_eq!(rows[1].meaning, "banana");
        assert!(rows.iter().all(|row| row.id.is_none()));
    }

    #[test]
    fn reads_optional_id_column() {
        let rows = parse("id,word,meaning\n7,포도,grape\n".as_bytes()).unwrap();

        assert_eq!(rows[0].id, Some(7));
        assert_eq!(rows[0].word, "포도");
    }

    #[test]
    fn quoted_meanings_may_contain_commas() {
        let rows = parse("word,meaning\n가다,\"to go, to leave\"\n".as_bytes()).unwrap();

        assert_eq!(rows[0].meaning, "to go, to leave");
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(parse("word\n사과\n".as_bytes()).is_err());
    }
}
