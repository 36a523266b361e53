use std::time::Instant;

use quizforge_core::{QuizSession, StudyMode};

/// Local date as `YYYY-MM-DD`, the display format for session dates.
pub fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// A quiz attempt in progress.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub session: QuizSession,
    /// Index into `session.questions`.
    pub current: usize,
    /// Whether feedback for the current question is shown (practice mode).
    pub revealed: bool,
    /// Cursor over the current question's options.
    pub option_cursor: usize,
    started: Instant,
}

impl ActiveRun {
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            current: 0,
            revealed: false,
            option_cursor: 0,
            started: Instant::now(),
        }
    }

    pub fn current_question(&self) -> Option<&quizforge_core::Question> {
        self.session.questions.get(self.current)
    }

    pub fn current_answered(&self) -> bool {
        self.current_question().is_some_and(|q| q.is_answered())
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.session.questions.len()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Register the option at `idx` as the answer to the current question.
    ///
    /// The first selection locks in; repeats for the same question are ignored.
    /// In practice mode a registered answer reveals feedback immediately.
    pub fn select_option(&mut self, idx: usize) -> bool {
        let choice = match self
            .session
            .questions
            .get(self.current)
            .and_then(|q| q.options.get(idx))
        {
            Some(c) => c.clone(),
            None => return false,
        };
        let registered = self.session.answer(self.current, &choice);
        if registered && self.session.mode == StudyMode::Practice {
            self.revealed = true;
        }
        registered
    }

    /// Move to the next question. Returns false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.session.questions.len() {
            self.current += 1;
            self.revealed = false;
            self.option_cursor = 0;
            true
        } else {
            false
        }
    }
}
