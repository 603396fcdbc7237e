use std::path::PathBuf;

/// Number of rows shown in the most-missed ranking.
pub const RANKING_LIMIT: usize = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    /// Vocabulary imported on first start, when the items table is still empty.
    pub seed_path: PathBuf,
    pub ranking_limit: usize,
    /// Default tracing filter, `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./db/hangul_quiz.db"),
            seed_path: PathBuf::from("./hangul4_vocab.csv"),
            ranking_limit: RANKING_LIMIT,
            log_filter: String::from("info"),
        }
    }
}
