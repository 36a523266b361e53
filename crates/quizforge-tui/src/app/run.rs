use super::{App, Screen};
use crate::model::run::{ActiveRun, today_stamp};

use quizforge_core::QuizSession;

impl App {
    /// Start taking a quiz. The attempt clock starts now.
    pub(super) fn begin_run(&mut self, session: QuizSession) {
        let screen = Screen::for_mode(session.mode);
        self.run = Some(ActiveRun::new(session));
        self.screen = screen;
    }

    /// Move to the next question, or finalize on the last one.
    /// Advancing requires an answer to the current question.
    pub(super) fn run_advance(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if !run.current_answered() {
            return;
        }
        if !run.advance() {
            self.finalize_run();
        }
    }

    /// Score the attempt and show results.
    ///
    /// Also the early-exit path: whatever is unanswered counts as incorrect.
    pub(super) fn finalize_run(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        let elapsed = run.elapsed_secs();
        let mut session = run.session;
        session.finalize(elapsed);

        self.results_session = Some(session.id.clone());
        self.sessions.insert(0, session);
        self.recent_cursor = 0;
        self.review_cursor = 0;
        self.screen = Screen::Results;
    }

    /// Re-take a past session with the same questions, as a new attempt.
    pub(super) fn retry_session(&mut self, id: &str) {
        let Some(fresh) = self
            .session_by_id(id)
            .map(|s| s.fresh_attempt(today_stamp()))
        else {
            return;
        };
        self.begin_run(fresh);
    }
}
