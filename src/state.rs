use tracing::warn;

use crate::error::FetchError;
use crate::models::{Owner, Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Pending,
    Success,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    CreationDate,
    AnswerCount,
    ViewCount,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::CreationDate => "Creation Date",
            Self::AnswerCount => "Answer Count",
            Self::ViewCount => "View Count",
        }
    }
}

/// The single store behind the question browser. All mutation goes through
/// the transition methods below so the fetch/sort/select contracts stay
/// testable without a rendering surface.
///
/// Invariant: `questions` is non-empty whenever `status == Success`. A failed
/// fetch keeps whatever was previously held, so the stale list stays
/// browsable behind the error message.
#[derive(Debug)]
pub struct QueryState {
    user_id: String,
    status: RequestStatus,
    questions: Vec<Question>,
    active_link: Option<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            user_id: String::new(),
            status: RequestStatus::Idle,
            questions: Vec::new(),
            active_link: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }

    /// Owner of the first question, which the API guarantees carries the
    /// profile fields on a non-empty result. Drives the header display.
    pub fn first_owner(&self) -> Option<&Owner> {
        self.questions.first().and_then(|q| q.owner.as_ref())
    }

    /// Enters `Pending`, clearing any prior failure indicator. Terminal
    /// states are re-entrant; resubmitting simply overwrites them.
    pub fn begin_fetch(&mut self, user_id: &str) {
        self.user_id = user_id.to_string();
        self.status = RequestStatus::Pending;
    }

    /// Resolves the pending fetch. Success replaces the question list
    /// wholesale; any failure is logged and collapsed to `Fail`, leaving the
    /// previous list untouched.
    pub fn finish_fetch(&mut self, result: Result<Vec<Question>, FetchError>) {
        match result {
            Ok(items) => {
                self.questions = items;
                self.status = RequestStatus::Success;
            }
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "fetch failed");
                self.status = RequestStatus::Fail;
            }
        }
    }

    /// Reorders the held questions in place, descending by the chosen field.
    /// The sort is stable, so equal keys keep their current relative order
    /// and reapplying a criterion is a no-op.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::CreationDate => self
                .questions
                .sort_by(|a, b| b.creation_date.cmp(&a.creation_date)),
            SortKey::AnswerCount => self
                .questions
                .sort_by(|a, b| b.answer_count.cmp(&a.answer_count)),
            SortKey::ViewCount => self
                .questions
                .sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        }
    }

    pub fn select(&mut self, link: &str) {
        self.active_link = Some(link.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.active_link = None;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{QueryState, RequestStatus, SortKey};
    use crate::error::FetchError;
    use crate::models::{Owner, Question};

    fn question(id: u64, creation_date: i64, answer_count: u32, view_count: u64) -> Question {
        Question {
            question_id: id,
            title: format!("question {id}"),
            link: format!("https://stackoverflow.com/questions/{id}"),
            creation_date,
            answer_count,
            view_count,
            owner: Some(Owner {
                display_name: "Jon Skeet".to_string(),
                reputation: 1421775,
                profile_image: None,
            }),
        }
    }

    fn fetched(questions: Vec<Question>) -> QueryState {
        let mut state = QueryState::new();
        state.begin_fetch("22656");
        state.finish_fetch(Ok(questions));
        state
    }

    #[test]
    fn starts_idle_and_empty() {
        let state = QueryState::new();
        assert_eq!(state.status(), RequestStatus::Idle);
        assert!(state.questions().is_empty());
        assert!(state.active_link().is_none());
    }

    #[test]
    fn successful_fetch_replaces_questions_wholesale() {
        let mut state = fetched(vec![question(1, 30, 0, 10), question(2, 20, 1, 50)]);
        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.questions().len(), 2);
        assert_eq!(state.user_id(), "22656");
        assert_eq!(state.first_owner().unwrap().display_name, "Jon Skeet");

        state.begin_fetch("22656");
        state.finish_fetch(Ok(vec![question(9, 5, 2, 7)]));
        assert_eq!(state.questions().len(), 1);
        assert_eq!(state.questions()[0].question_id, 9);
    }

    #[test]
    fn pending_clears_failure_and_failure_keeps_stale_questions() {
        let mut state = fetched(vec![question(1, 30, 0, 10)]);

        state.begin_fetch("no-such-user");
        assert_eq!(state.status(), RequestStatus::Pending);

        state.finish_fetch(Err(FetchError::NoQuestions));
        assert_eq!(state.status(), RequestStatus::Fail);
        assert_eq!(state.questions().len(), 1);
        assert_eq!(state.questions()[0].question_id, 1);

        state.begin_fetch("22656");
        assert_eq!(state.status(), RequestStatus::Pending);
    }

    #[test]
    fn failure_before_any_success_leaves_questions_empty() {
        let mut state = QueryState::new();
        state.begin_fetch("");
        state.finish_fetch(Err(FetchError::NoQuestions));
        assert_eq!(state.status(), RequestStatus::Fail);
        assert!(state.questions().is_empty());
    }

    #[rstest]
    #[case(SortKey::CreationDate, &[3, 1, 2])]
    #[case(SortKey::AnswerCount, &[2, 3, 1])]
    #[case(SortKey::ViewCount, &[2, 1, 3])]
    fn sorts_descending_by_criterion(#[case] key: SortKey, #[case] expected: &[u64]) {
        // id 1: created 30, 0 answers, 10 views
        // id 2: created 20, 5 answers, 50 views
        // id 3: created 40, 2 answers,  5 views
        let mut state = fetched(vec![
            question(1, 30, 0, 10),
            question(2, 20, 5, 50),
            question(3, 40, 2, 5),
        ]);

        state.sort_by(key);
        let ids: Vec<u64> = state.questions().iter().map(|q| q.question_id).collect();
        assert_eq!(ids, expected);
        assert_eq!(state.questions().len(), 3);
    }

    #[test]
    fn sorting_is_stable_and_idempotent() {
        let mut state = fetched(vec![
            question(1, 10, 3, 100),
            question(2, 20, 3, 100),
            question(3, 30, 3, 100),
        ]);

        // All answer counts tie, so the current order must survive.
        state.sort_by(SortKey::AnswerCount);
        let once: Vec<u64> = state.questions().iter().map(|q| q.question_id).collect();
        assert_eq!(once, vec![1, 2, 3]);

        state.sort_by(SortKey::AnswerCount);
        let twice: Vec<u64> = state.questions().iter().map(|q| q.question_id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn select_and_clear_do_not_touch_questions_or_status() {
        let mut state = fetched(vec![question(1, 30, 0, 10)]);
        let link = state.questions()[0].link.clone();

        state.select(&link);
        assert_eq!(state.active_link(), Some(link.as_str()));

        state.clear_selection();
        assert!(state.active_link().is_none());
        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.questions().len(), 1);
    }
}
