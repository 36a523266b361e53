//! Session lifecycle: composition, answer capture, scoring, finalization.

use crate::model::{CoverImage, Question, QuizSession, StudyMode, new_id};

/// Display title for a session generated from `document_name`.
pub fn derive_title(document_name: &str) -> String {
    format!("Quiz: {}", document_name)
}

/// Topic label for a session: the document name without its extension.
pub fn derive_topic(document_name: &str) -> String {
    match document_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => document_name.to_string(),
    }
}

impl QuizSession {
    /// Assemble a new session from generated questions.
    ///
    /// `total_questions` is fixed to the question count here and never
    /// changes afterwards. Score starts at zero; answer fields are empty.
    pub fn compose(
        title: String,
        topic: String,
        date: String,
        questions: Vec<Question>,
        mode: StudyMode,
        cover_image: Option<CoverImage>,
    ) -> Self {
        let total = questions.len() as u32;
        Self {
            id: new_id("session"),
            title,
            topic,
            date,
            score: 0,
            total_questions: total,
            questions,
            mode,
            cover_image,
            time_elapsed: None,
        }
    }

    /// Record the user's choice for the question at `index`.
    ///
    /// The first selection locks the question; later selections are no-ops.
    /// Returns whether the choice was recorded.
    pub fn answer(&mut self, index: usize, choice: &str) -> bool {
        let Some(q) = self.questions.get_mut(index) else {
            return false;
        };
        if q.user_answer.is_some() {
            return false;
        }
        q.is_correct = Some(choice == q.correct_answer);
        q.user_answer = Some(choice.to_string());
        true
    }

    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    /// Number of questions whose recorded answer equals the correct one.
    pub fn correct_count(&self) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.user_answer.as_deref() == Some(q.correct_answer.as_str()))
            .count() as u32
    }

    /// Close out a run: one point per matching answer, unanswered counts as
    /// incorrect, elapsed wall-clock seconds frozen in.
    pub fn finalize(&mut self, elapsed_secs: u64) {
        self.score = self.correct_count();
        self.time_elapsed = Some(elapsed_secs);
    }

    /// Clear all per-question answer state and the outcome fields.
    pub fn reset_answers(&mut self) {
        for q in &mut self.questions {
            q.reset_answer();
        }
        self.score = 0;
        self.time_elapsed = None;
    }

    /// A new attempt at the same question set: fresh id and date, answers
    /// reset. The original record is left untouched.
    pub fn fresh_attempt(&self, date: String) -> QuizSession {
        let mut attempt = self.clone();
        attempt.id = new_id("session");
        attempt.date = date;
        attempt.reset_answers();
        attempt
    }

    /// Score as a whole percentage (0 when the session has no questions).
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            0
        } else {
            self.score * 100 / self.total_questions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Prompt {}", id),
            kind: QuestionKind::MultipleChoice,
            options: vec![
                "Alpha".to_string(),
                "Beta".to_string(),
                "Gamma".to_string(),
                "Delta".to_string(),
            ],
            correct_answer: correct.to_string(),
            explanation: String::new(),
            visual_prompt: String::new(),
            user_answer: None,
            is_correct: None,
        }
    }

    fn session(n: usize) -> QuizSession {
        let questions = (0..n).map(|i| question(&format!("q{}", i), "Alpha")).collect();
        QuizSession::compose(
            "Quiz: notes.pdf".to_string(),
            "notes".to_string(),
            "2026-08-25".to_string(),
            questions,
            StudyMode::Practice,
            None,
        )
    }

    #[test]
    fn compose_fixes_total_to_question_count() {
        let s = session(7);
        assert_eq!(s.total_questions, 7);
        assert_eq!(s.total_questions as usize, s.questions.len());
        assert_eq!(s.score, 0);
        assert!(s.time_elapsed.is_none());
    }

    #[test]
    fn first_answer_locks_question() {
        let mut s = session(3);
        assert!(s.answer(0, "Beta"));
        // Second selection on the same question is ignored
        assert!(!s.answer(0, "Alpha"));
        assert_eq!(s.questions[0].user_answer.as_deref(), Some("Beta"));
        assert_eq!(s.questions[0].is_correct, Some(false));
    }

    #[test]
    fn answer_is_idempotent_for_same_choice() {
        let mut s = session(3);
        assert!(s.answer(1, "Alpha"));
        assert!(!s.answer(1, "Alpha"));
        assert_eq!(s.questions[1].user_answer.as_deref(), Some("Alpha"));
        assert_eq!(s.correct_count(), 1);
    }

    #[test]
    fn answer_out_of_range_is_rejected() {
        let mut s = session(2);
        assert!(!s.answer(5, "Alpha"));
        assert_eq!(s.answered_count(), 0);
    }

    #[test]
    fn score_counts_exact_matches_only() {
        let mut s = session(10);
        for i in 0..7 {
            s.answer(i, "Alpha");
        }
        for i in 7..10 {
            s.answer(i, "Gamma");
        }
        s.finalize(95);
        assert_eq!(s.score, 7);
        assert_eq!(s.time_elapsed, Some(95));
        assert_eq!(s.percentage(), 70);
    }

    #[test]
    fn partial_run_scores_answered_only() {
        let mut s = session(10);
        s.answer(0, "Alpha");
        s.answer(1, "Alpha");
        s.answer(2, "Beta");
        s.finalize(12);
        // 2 correct of the 3 answered; the 7 unanswered count as incorrect
        assert_eq!(s.score, 2);
        assert_eq!(s.answered_count(), 3);
        assert_eq!(s.total_questions, 10);
    }

    #[test]
    fn reset_answers_clears_outcome() {
        let mut s = session(4);
        s.answer(0, "Alpha");
        s.answer(1, "Beta");
        s.finalize(30);
        s.reset_answers();
        assert_eq!(s.score, 0);
        assert!(s.time_elapsed.is_none());
        assert!(s.questions.iter().all(|q| q.user_answer.is_none()));
        assert!(s.questions.iter().all(|q| q.is_correct.is_none()));
    }

    #[test]
    fn fresh_attempt_gets_new_identity_and_clean_answers() {
        let mut s = session(4);
        s.answer(0, "Alpha");
        s.finalize(10);

        let attempt = s.fresh_attempt("2026-08-26".to_string());
        assert_ne!(attempt.id, s.id);
        assert_eq!(attempt.date, "2026-08-26");
        assert_eq!(attempt.score, 0);
        assert!(attempt.questions.iter().all(|q| q.user_answer.is_none()));
        // Question set itself is carried over
        assert_eq!(attempt.questions.len(), s.questions.len());
        assert_eq!(attempt.questions[0].id, s.questions[0].id);
        // The original stays finalized
        assert_eq!(s.score, 1);
        assert_eq!(s.time_elapsed, Some(10));
    }

    #[test]
    fn derive_title_and_topic() {
        assert_eq!(derive_title("biology.pdf"), "Quiz: biology.pdf");
        assert_eq!(derive_topic("biology.pdf"), "biology");
        assert_eq!(derive_topic("no_extension"), "no_extension");
        assert_eq!(derive_topic(".hidden"), ".hidden");
    }

    #[test]
    fn percentage_handles_empty_session() {
        let s = session(0);
        assert_eq!(s.percentage(), 0);
    }
}
