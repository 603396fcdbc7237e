use iced::{
    alignment::{Horizontal, Vertical},
    widget::{text, text::Shaping, Button, Column, Container, Text},
    Alignment, Element, Length, Task,
};

use crate::{
    database::{Pool, Store},
    quiz::{self, Question},
    session::{Mode, Session},
    Result,
};

use super::Tab;

pub struct QuizTab {
    store: Store,
    session: Session,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Prepared { mode: Mode, question: Option<Question> },
    Unavailable { mode: Mode, reason: String },
    Choose(String),
    Recorded,
    Next,
    Retry,
    Error { mode: Option<Mode>, error: String },
}

pub enum Action {
    None,
    Run(Task<Message>),
}

async fn prepare_question(store: Store, pool: Pool) -> Result<Option<Question>> {
    let candidates = store.list_items(pool).await?;
    if candidates.is_empty() {
        return Ok(None);
    }

    let meanings = store.meanings().await?;

    quiz::prepare(&candidates, &meanings, &mut rand::thread_rng())
}

impl QuizTab {
    pub fn new(store: Store, mode: Mode) -> QuizTab {
        QuizTab {
            store,
            session: Session::new(mode),
            error: None,
        }
    }

    /// Follows a tab switch. Re-selecting the current mode retries a load
    /// that came up empty before.
    pub fn select(&mut self, mode: Mode) -> Action {
        self.session.set_mode(mode);
        self.session.retry();
        self.error = None;

        self.load()
    }

    /// Requests a question when the session has none.
    pub fn load(&mut self) -> Action {
        if !self.session.needs_question() {
            return Action::None;
        }

        let mode = self.session.mode();
        let Some(pool) = mode.pool() else {
            return Action::None;
        };

        self.session.begin_loading();
        let store = self.store.clone();

        Action::Run(Task::perform(prepare_question(store, pool), move |res| match res {
            Ok(question) => Message::Prepared { mode, question },
            Err(e) if e.is_warning() => Message::Unavailable {
                mode,
                reason: e.to_string(),
            },
            Err(e) => Message::Error {
                mode: Some(mode),
                error: e.to_string(),
            },
        }))
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Prepared { mode, question } => {
                if question.is_none() && mode == self.session.mode() {
                    tracing::warn!(%mode, "no items to quiz");
                }
                self.session.present(mode, question);
                Action::None
            }
            Message::Unavailable { mode, reason } => {
                tracing::warn!(%mode, %reason, "quiz unavailable");
                self.session.fail(mode, reason);
                Action::None
            }
            Message::Choose(choice) => match self.session.answer(&choice) {
                Some(answer) => {
                    let store = self.store.clone();
                    Action::Run(Task::perform(
                        async move { store.record_answer(answer.item_id, answer.is_correct).await },
                        |res| match res {
                            Ok(()) => Message::Recorded,
                            Err(e) => Message::Error {
                                mode: None,
                                error: e.to_string(),
                            },
                        },
                    ))
                }
                None => Action::None,
            },
            Message::Recorded => {
                tracing::debug!("answer recorded");
                Action::None
            }
            Message::Next => {
                if self.session.next() {
                    self.error = None;
                }
                self.load()
            }
            Message::Retry => {
                self.session.retry();
                self.load()
            }
            Message::Error { mode, error } => {
                tracing::error!(%error, "quiz storage failure");
                if let Some(mode) = mode {
                    self.session.fail(mode, String::from("The question could not be loaded."));
                }
                self.error = Some(error);
                Action::None
            }
        }
    }
}

impl Tab for QuizTab {
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
            .push_maybe(error);

        if let Some(notice) = self.session.notice() {
            column = column.push(Text::new(notice));
        }

        if let Some(question) = self.session.question() {
            let enabled = self.session.options_enabled();

            column = column
                .push(Text::new(format!("Mode: {}", self.session.mode())))
                .push(
                    Text::new(format!("Q: what does {} mean?", question.word))
                        .shaping(Shaping::Advanced)
                        .size(32),
                )
                .push(Text::new("Choose the correct meaning:"));

            for option in &question.options {
                column = column.push(
                    Button::new(
                        Text::new(option)
                            .shaping(Shaping::Advanced)
                            .align_x(Horizontal::Center)
                            .width(Length::Fill),
                    )
                    .width(Length::Fill)
                    .on_press_maybe(enabled.then(|| Message::Choose(option.clone()))),
                );
            }
        }

        if let Some(feedback) = self.session.feedback() {
            let style = if feedback.is_correct() {
                text::success
            } else {
                text::danger
            };

            column = column
                .push(
                    Text::new(feedback.to_string())
                        .shaping(Shaping::Advanced)
                        .style(style),
                )
                .push(
                    Button::new(Text::new("Next question"))
                        .on_press_maybe(self.session.next_enabled().then_some(Message::Next)),
                );
        }

        let content: Element<'_, Message> = Container::new(column)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into();

        content.map(super::Message::Quiz)
    }
}
