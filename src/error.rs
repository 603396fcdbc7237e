#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database request failed: {0}")]
    TokioRusqliteFailed(tokio_rusqlite::Error),
    #[error("database request failed: {0}")]
    RusqliteFailed(rusqlite::Error),
    #[error("error reading file: {0}")]
    IOFailed(std::io::Error),
    #[error("error reading vocabulary csv: {0}")]
    CsvFailed(csv::Error),
    #[error("there are no questions for this mode")]
    EmptyCandidatePool,
    #[error("only {meanings} distinct meanings in the vocabulary, add more vocabulary before quizzing (at least 4 are needed)")]
    InsufficientCatalog { meanings: usize },
    #[error("window could not be started: {0}")]
    GuiFailed(iced::Error),
}

impl Error {
    /// Conditions that stop a quiz from starting without anything having failed.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyCandidatePool | Self::InsufficientCatalog { .. })
    }
}

impl From<tokio_rusqlite::Error> for Error {
    fn from(error: tokio_rusqlite::Error) -> Self {
        match error {
            tokio_rusqlite::Error::Other(error) => match error.downcast::<Self>() {
                Ok(error) => *error,
                Err(error) => Self::TokioRusqliteFailed(tokio_rusqlite::Error::Other(error)),
            },
            _ => Self::TokioRusqliteFailed(error),
        }
    }
}

impl From<Error> for tokio_rusqlite::Error {
    fn from(error: Error) -> Self {
        Self::Other(Box::new(error))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::RusqliteFailed(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::IOFailed(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvFailed(error)
    }
}

impl From<iced::Error> for Error {
    fn from(error: iced::Error) -> Self {
        Self::GuiFailed(error)
    }
}
