use history::{HistoryTab, Message as HistoryMessage};
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{Column, Container},
    Element, Length, Task,
};
use iced_aw::{TabLabel, Tabs};
use quiz::{Message as QuizMessage, QuizTab};

use crate::{config::Config, database::Store, session::Mode};

mod history;
mod quiz;

const TAB_PADDING: u16 = 16;

pub fn run(config: Config, store: Store) -> iced::Result {
    iced::application(App::title, App::update, App::view).run_with(move || App::new(config, store))
}

struct App {
    active_tab: TabId,
    quiz_tab: QuizTab,
    history_tab: HistoryTab,
}

#[derive(Clone, Debug)]
enum Message {
    TabSelected(TabId),
    Quiz(QuizMessage),
    History(HistoryMessage),
}

#[derive(Clone, PartialEq, Eq, Debug)]
enum TabId {
    Quiz,
    Review,
    History,
}

impl TabId {
    fn mode(&self) -> Mode {
        match self {
            TabId::Quiz => Mode::Quiz,
            TabId::Review => Mode::Review,
            TabId::History => Mode::History,
        }
    }

    fn label(&self) -> TabLabel {
        TabLabel::Text(String::from(match self {
            TabId::Quiz => "Quiz",
            TabId::Review => "Review",
            TabId::History => "History",
        }))
    }
}

impl App {
    fn new(config: Config, store: Store) -> (App, Task<Message>) {
        let mut quiz_tab = QuizTab::new(store.clone(), Mode::Quiz);
        let history_tab = HistoryTab::new(store, config.ranking_limit);

        let task = match quiz_tab.load() {
            quiz::Action::None => Task::none(),
            quiz::Action::Run(task) => task.map(Message::Quiz),
        };

        let app = App {
            active_tab: TabId::Quiz,
            quiz_tab,
            history_tab,
        };

        (app, task)
    }

    fn title(&self) -> String {
        String::from("Hangul Quiz")
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(selected) => {
                let quiz = match self.quiz_tab.select(selected.mode()) {
                    quiz::Action::None => Task::none(),
                    quiz::Action::Run(task) => task.map(Message::Quiz),
                };
                let history = if selected == TabId::History {
                    Task::done(Message::History(HistoryMessage::Refresh))
                } else {
                    Task::none()
                };
                self.active_tab = selected;

                Task::batch([quiz, history])
            }
            Message::Quiz(message) => match self.quiz_tab.update(message) {
                quiz::Action::None => Task::none(),
                quiz::Action::Run(task) => task.map(Message::Quiz),
            },
            Message::History(message) => match self.history_tab.update(message) {
                history::Action::None => Task::none(),
                history::Action::Run(task) => task.map(Message::History),
                history::Action::Quiz(task) => task.map(Message::Quiz),
            },
        }
    }

    fn view(&self) -> Element<'_, Message> {
        Tabs::new(Message::TabSelected)
            .push(TabId::Quiz, TabId::Quiz.label(), self.quiz_tab.view())
            .push(TabId::Review, TabId::Review.label(), self.quiz_tab.view())
            .push(TabId::History, TabId::History.label(), self.history_tab.view())
            .set_active_tab(&self.active_tab)
            .into()
    }
}

trait Tab {
    type Message;

    fn view(&self) -> Element<'_, Self::Message> {
        let column = Column::new()
            .spacing(20)
            .push(self.content())
            .align_x(iced::Alignment::Center);

        Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .padding(TAB_PADDING)
            .into()
    }

    fn content(&self) -> Element<'_, Self::Message>;
}
