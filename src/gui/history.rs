use std::path::PathBuf;

use iced::{
    alignment::{Horizontal, Vertical},
    widget::{text, text::Shaping, Button, Column, Container, Row, Text},
    Alignment, Element, Length, Task,
};
use rfd::AsyncFileDialog;

use crate::database::{AnswerStats, MistakeCount, Store};

use super::Tab;

pub struct HistoryTab {
    store: Store,
    limit: usize,
    ranking: Vec<MistakeCount>,
    stats: AnswerStats,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded { ranking: Vec<MistakeCount>, stats: AnswerStats },
    SetImportFile,
    ImportFileSet { path: Option<PathBuf> },
    Imported(usize),
    Error(String),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Quiz(Task<super::QuizMessage>),
}

impl HistoryTab {
    pub fn new(store: Store, limit: usize) -> HistoryTab {
        HistoryTab {
            store,
            limit,
            ranking: Vec::new(),
            stats: AnswerStats::default(),
            status: None,
            error: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Refresh => {
                let store = self.store.clone();
                let limit = self.limit;
                Action::Run(Task::perform(
                    async move {
                        let ranking = store.mistake_ranking(limit).await?;
                        let stats = store.answer_stats().await?;
                        crate::Result::Ok((ranking, stats))
                    },
                    |res| match res {
                        Ok((ranking, stats)) => Message::Loaded { ranking, stats },
                        Err(e) => Message::Error(e.to_string()),
                    },
                ))
            }
            Message::Loaded { ranking, stats } => {
                self.ranking = ranking;
                self.stats = stats;
                self.error = None;
                Action::None
            }
            Message::SetImportFile => Action::Run(Task::perform(
                AsyncFileDialog::new()
                    .set_title("Vocabulary")
                    .add_filter("CSV", &["csv"])
                    .pick_file(),
                |file_handle| Message::ImportFileSet {
                    path: file_handle.map(|file_handle| file_handle.into()),
                },
            )),
            Message::ImportFileSet { path } => match path {
                Some(path) => {
                    let store = self.store.clone();
                    Action::Run(Task::perform(
                        async move { store.import_items(path).await },
                        |res| match res {
                            Ok(inserted) => Message::Imported(inserted),
                            Err(e) => Message::Error(e.to_string()),
                        },
                    ))
                }
                None => Action::None,
            },
            Message::Imported(inserted) => {
                self.status = Some(format!("Imported {inserted} words."));
                self.error = None;
                Action::Quiz(Task::done(super::QuizMessage::Retry))
            }
            Message::Error(error) => {
                tracing::error!(%error, "history request failed");
                self.error = Some(error);
                Action::None
            }
        }
    }
}

fn ranking_row<'a>(rank: String, word: String, meaning: String, mistakes: String) -> Row<'a, Message> {
    Row::new()
        .spacing(16)
        .push(Text::new(rank).width(Length::FillPortion(1)))
        .push(
            Text::new(word)
                .shaping(Shaping::Advanced)
                .width(Length::FillPortion(3)),
        )
        .push(
            Text::new(meaning)
                .shaping(Shaping::Advanced)
                .width(Length::FillPortion(4)),
        )
        .push(Text::new(mistakes).width(Length::FillPortion(2)))
}

impl Tab for HistoryTab {
    type Message = super::Message;

    fn content(&self) -> Element<'_, Self::Message> {
        let error = self
            .error
            .as_ref()
            .map(|error| Text::new(error).style(text::danger));

        let mut column = Column::new()
            .align_x(Alignment::Center)
            .max_width(600)
            .padding(20)
            .spacing(16)
            .push_maybe(error)
            .push(Text::new("Most missed words").size(24))
            .push(Text::new(format!(
                "Answered: {}, correct: {}",
                self.stats.answered, self.stats.correct
            )));

        if self.ranking.is_empty() {
            column = column.push(Text::new("No records yet. Try the quiz!"));
        } else {
            let mut table = Column::new().spacing(8).push(ranking_row(
                String::from("#"),
                String::from("Word"),
                String::from("Meaning"),
                String::from("Mistakes"),
            ));

            for (rank, row) in self.ranking.iter().enumerate() {
                table = table.push(ranking_row(
                    (rank + 1).to_string(),
                    row.item.word.clone(),
                    row.item.meaning.clone(),
                    row.mistakes.to_string(),
                ));
            }

            column = column.push(table);
        }

        let status = self.status.as_ref().map(|status| Text::new(status));

        column = column
            .push(Button::new(Text::new("Import vocabulary")).on_press(Message::SetImportFile))
            .push_maybe(status);

        let content: Element<'_, Message> = Container::new(column)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into();

        content.map(super::Message::History)
    }
}
