use std::fmt;

use crate::{database::Pool, quiz::Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Quiz,
    Review,
    History,
}

impl Mode {
    /// Items a question may be drawn from, `None` for modes that ask nothing.
    pub fn pool(self) -> Option<Pool> {
        match self {
            Mode::Quiz => Some(Pool::All),
            Mode::Review => Some(Pool::Review),
            Mode::History => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Mode::Quiz => write!(f, "quiz"),
            Mode::Review => write!(f, "review"),
            Mode::History => write!(f, "history"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct { answer: String },
    Incorrect { answer: String },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Feedback::Correct { answer } => write!(f, "Correct! {answer}"),
            Feedback::Incorrect { answer } => write!(f, "Wrong... the answer is: {answer}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NoQuestion,
    AwaitingAnswer(Question),
    Answered { question: Question, feedback: Feedback },
}

/// The answer to write to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub item_id: i64,
    pub is_correct: bool,
}

#[derive(Debug)]
pub struct Session {
    mode: Mode,
    phase: Phase,
    loading: bool,
    /// Why the last load produced no question.
    notice: Option<String>,
}

impl Session {
    pub fn new(mode: Mode) -> Session {
        Session {
            mode,
            phase: Phase::NoQuestion,
            loading: false,
            notice: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.phase {
            Phase::NoQuestion => None,
            Phase::AwaitingAnswer(question) | Phase::Answered { question, .. } => Some(question),
        }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.phase {
            Phase::Answered { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    /// Switching to another mode drops any outstanding question unrecorded.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }

        tracing::info!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
        self.reset();
    }

    /// Whether a new question should be requested for the current mode.
    pub fn needs_question(&self) -> bool {
        self.mode.pool().is_some()
            && self.phase == Phase::NoQuestion
            && !self.loading
            && self.notice.is_none()
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Installs a freshly prepared question. Results for a mode that is no
    /// longer active are ignored.
    pub fn present(&mut self, mode: Mode, question: Option<Question>) {
        if mode != self.mode {
            return;
        }
        self.loading = false;

        match question {
            Some(question) if self.phase == Phase::NoQuestion => {
                self.phase = Phase::AwaitingAnswer(question);
            }
            Some(_) => {}
            None => self.notice = Some(crate::error::Error::EmptyCandidatePool.to_string()),
        }
    }

    /// Records why no question could be prepared for `mode`.
    pub fn fail(&mut self, mode: Mode, notice: String) {
        if mode != self.mode {
            return;
        }
        self.loading = false;
        self.notice = Some(notice);
    }

    /// Locks in `choice`. Returns the answer to persist, or `None` when no
    /// question is awaiting an answer.
    pub fn answer(&mut self, choice: &str) -> Option<Answer> {
        let Phase::AwaitingAnswer(question) = &self.phase else {
            return None;
        };

        let is_correct = question.is_correct(choice);
        let feedback = if is_correct {
            Feedback::Correct {
                answer: question.answer.clone(),
            }
        } else {
            Feedback::Incorrect {
                answer: question.answer.clone(),
            }
        };
        let answer = Answer {
            item_id: question.item_id,
            is_correct,
        };

        let question = question.clone();
        self.phase = Phase::Answered { question, feedback };

        Some(answer)
    }

    /// Discards the answered question.
    pub fn next(&mut self) -> bool {
        if !matches!(self.phase, Phase::Answered { .. }) {
            return false;
        }

        self.reset();
        true
    }

    /// Clears the notice so the current mode is tried again, for example after
    /// new vocabulary was imported.
    pub fn retry(&mut self) {
        if self.phase == Phase::NoQuestion {
            self.notice = None;
        }
    }

    pub fn options_enabled(&self) -> bool {
        matches!(self.phase, Phase::AwaitingAnswer(_))
    }

    pub fn next_enabled(&self) -> bool {
        matches!(self.phase, Phase::Answered { .. })
    }

    fn reset(&mut self) {
        self.phase = Phase::NoQuestion;
        self.loading = false;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{database::Store, quiz};

    fn question() -> Question {
        Question {
            item_id: 1,
            word: String::from("사과"),
            answer: String::from("apple"),
            options: ["grape", "apple", "banana", "strawberry"].map(String::from),
        }
    }

    fn awaiting(mode: Mode) -> Session {
        let mut session = Session::new(mode);
        session.begin_loading();
        session.present(mode, Some(question()));
        session
    }

    #[test]
    fn quiz_modes_need_a_question() {
        assert!(Session::new(Mode::Quiz).needs_question());
        assert!(Session::new(Mode::Review).needs_question());
        assert!(!Session::new(Mode::History).needs_question());
    }

    #[test]
    fn no_second_load_while_one_is_pending() {
        let mut session = Session::new(Mode::Quiz);
        session.begin_loading();

        assert!(!session.needs_question());
    }

    #[test]
    fn presenting_awaits_an_answer() {
        let session = awaiting(Mode::Quiz);

        assert_eq!(&session.phase, &Phase::AwaitingAnswer(question()));
        assert!(session.options_enabled());
        assert!(!session.next_enabled());
        assert!(!session.needs_question());
    }

    #[test]
    fn correct_choice_is_recorded_as_correct() {
        let mut session = awaiting(Mode::Quiz);

        let answer = session.answer("apple").unwrap();

        assert_eq!(answer, Answer { item_id: 1, is_correct: true });
        assert_eq!(
            session.feedback(),
            Some(&Feedback::Correct { answer: String::from("apple") })
        );
    }

    #[test]
    fn every_other_choice_is_recorded_as_incorrect() {
        for choice in ["grape", "banana", "strawberry"] {
            let mut session = awaiting(Mode::Quiz);

            let answer = session.answer(choice).unwrap();

            assert!(!answer.is_correct);
            let feedback = session.feedback().unwrap();
            assert!(!feedback.is_correct());
            assert!(feedback.to_string().contains("apple"));
        }
    }

    #[test]
    fn answered_question_is_locked() {
        let mut session = awaiting(Mode::Quiz);
        session.answer("grape").unwrap();

        assert!(session.answer("apple").is_none());
        assert!(!session.options_enabled());
        assert!(session.next_enabled());
        assert!(!session.feedback().unwrap().is_correct());
    }

    #[test]
    fn answering_without_a_question_is_inert() {
        let mut session = Session::new(Mode::Quiz);

        assert!(session.answer("apple").is_none());
        assert_eq!(&session.phase, &Phase::NoQuestion);
    }

    #[test]
    fn next_returns_to_no_question() {
        let mut session = awaiting(Mode::Review);
        assert!(!session.next());

        session.answer("apple");
        assert!(session.next());

        assert_eq!(&session.phase, &Phase::NoQuestion);
        assert!(session.feedback().is_none());
        assert!(session.needs_question());
    }

    #[test]
    fn switching_mode_resets_the_question() {
        let mut session = awaiting(Mode::Quiz);

        session.set_mode(Mode::Review);

        assert_eq!(session.mode(), Mode::Review);
        assert_eq!(&session.phase, &Phase::NoQuestion);
        assert!(session.needs_question());
    }

    #[test]
    fn reselecting_mode_keeps_the_question() {
        let mut session = awaiting(Mode::Quiz);

        session.set_mode(Mode::Quiz);

        assert_eq!(&session.phase, &Phase::AwaitingAnswer(question()));
    }

    #[test]
    fn late_results_for_another_mode_are_dropped() {
        let mut session = Session::new(Mode::Quiz);
        session.begin_loading();
        session.set_mode(Mode::Review);

        session.present(Mode::Quiz, Some(question()));

        assert_eq!(&session.phase, &Phase::NoQuestion);
        assert!(session.needs_question());
    }

    #[test]
    fn empty_pool_leaves_a_notice() {
        let mut session = Session::new(Mode::Review);
        session.begin_loading();

        session.present(Mode::Review, None);

        assert_eq!(&session.phase, &Phase::NoQuestion);
        assert!(session.notice().is_some());
        assert!(!session.needs_question());

        session.retry();
        assert!(session.needs_question());
    }

    #[test]
    fn failed_load_leaves_a_notice() {
        let mut session = Session::new(Mode::Quiz);
        session.begin_loading();

        session.fail(Mode::Quiz, String::from("add more vocabulary"));

        assert_eq!(session.notice(), Some("add more vocabulary"));
        assert!(!session.needs_question());
    }

    async fn scenario_store() -> (Store, tempfile::NamedTempFile) {
        let mut seed = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        seed.write_all("id,word,meaning\n1,사과,apple\n2,바나나,banana\n3,포도,grape\n4,딸기,strawberry\n".as_bytes())
            .unwrap();

        let store = Store::open_in_memory().await.unwrap();
        store.initialize(Some(seed.path())).await.unwrap();
        (store, seed)
    }

    async fn load(store: &Store, session: &mut Session, rng: &mut StdRng) {
        let mode = session.mode();
        let pool = mode.pool().unwrap();
        session.begin_loading();
        let candidates = store.list_items(pool).await.unwrap();
        let meanings = store.meanings().await.unwrap();
        let question = quiz::prepare(&candidates, &meanings, rng).unwrap();
        session.present(mode, question);
    }

    #[tokio::test]
    async fn review_is_empty_until_a_miss() {
        let (store, _seed) = scenario_store().await;
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new(Mode::Review);

        load(&store, &mut session, &mut rng).await;

        assert_eq!(&session.phase, &Phase::NoQuestion);
        assert!(session.notice().is_some());
    }

    #[tokio::test]
    async fn missed_item_comes_back_in_review() {
        let (store, _seed) = scenario_store().await;
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new(Mode::Quiz);

        // Answer wrongly until item 1 has been missed.
        loop {
            load(&store, &mut session, &mut rng).await;
            let question = session.question().unwrap().clone();
            let wrong = question
                .options
                .iter()
                .find(|option| **option != question.answer)
                .unwrap()
                .clone();
            let answer = if question.item_id == 1 {
                session.answer(&wrong).unwrap()
            } else {
                session.answer(&question.answer).unwrap()
            };
            store.record_answer(answer.item_id, answer.is_correct).await.unwrap();
            session.next();
            if question.item_id == 1 {
                break;
            }
        }

        session.set_mode(Mode::Review);
        for _ in 0..20 {
            load(&store, &mut session, &mut rng).await;
            let question = session.question().unwrap().clone();
            assert_eq!(question.item_id, 1);
            assert_eq!(question.answer, "apple");
            let mut options = question.options.to_vec();
            options.sort();
            assert_eq!(options, vec!["apple", "banana", "grape", "strawberry"]);

            session.answer("apple");
            session.next();
        }

        let ranking = store.mistake_ranking(15).await.unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].item.id, 1);
        assert_eq!(ranking[0].mistakes, 1);
    }
}
