use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::warn;
use tui::widgets::ListState;

use crate::api::StackExchangeClient;
use crate::error::FetchError;
use crate::models::Question;
use crate::state::{QueryState, SortKey};

pub enum Mode {
    /// Typing a user ID into the input field.
    Input,
    /// Browsing the fetched question list.
    Questions,
    /// Reading the selected question's page in the embedded viewer.
    Viewer(ViewerPane),
}

pub struct ViewerPane {
    pub question: Question,
    /// Raw HTML of the question's page; the UI renders it through html2text.
    pub body: String,
    pub scroll: u16,
}

type FetchResult = Result<Vec<Question>, FetchError>;

pub struct App {
    pub query: QueryState,
    pub input: String,
    pub sort: SortKey,
    pub list: ListState,
    pub mode: Mode,
    client: StackExchangeClient,
    // In-flight fetch token. Submitting again replaces it, so a superseded
    // response is discarded instead of racing the new one.
    in_flight: Option<Receiver<FetchResult>>,
}

impl App {
    pub fn new(client: StackExchangeClient) -> Self {
        Self {
            query: QueryState::new(),
            input: String::new(),
            sort: SortKey::CreationDate,
            list: ListState::default(),
            mode: Mode::Input,
            client,
            in_flight: None,
        }
    }

    pub fn accepting_input(&self) -> bool {
        matches!(self.mode, Mode::Input)
    }

    pub fn in_viewer(&self) -> bool {
        matches!(self.mode, Mode::Viewer(_))
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Kicks off a fetch for the typed user ID on a worker thread and keeps
    /// the receiver as the in-flight token.
    pub fn submit_fetch(&mut self) {
        let user_id = self.input.trim().to_string();
        self.query.begin_fetch(&user_id);

        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        thread::spawn(move || {
            // A send failure means this request was superseded; the result
            // is simply dropped.
            let _ = tx.send(client.fetch_user_questions(&user_id));
        });
        self.in_flight = Some(rx);
    }

    /// Polls the in-flight fetch once per tick and resolves the pending
    /// state when the worker delivers.
    pub fn poll_fetch(&mut self) {
        let Some(rx) = &self.in_flight else { return };
        match rx.try_recv() {
            Ok(result) => {
                self.in_flight = None;
                let fetched = result.is_ok();
                self.query.finish_fetch(result);
                if fetched {
                    self.sort = SortKey::CreationDate;
                    self.list.select(Some(0));
                    self.mode = Mode::Questions;
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                self.query.finish_fetch(Err(FetchError::Aborted));
            }
        }
    }

    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.query.sort_by(key);
    }

    pub fn edit_user_id(&mut self) {
        if let Mode::Questions = self.mode {
            self.mode = Mode::Input;
        }
    }

    pub fn on_up(&mut self) {
        match &mut self.mode {
            Mode::Input => {}
            Mode::Questions => {
                let len = self.query.questions().len();
                if len == 0 {
                    return;
                }
                let i = match self.list.selected() {
                    Some(i) => if i == 0 { len - 1 } else { i - 1 },
                    None => 0,
                };
                self.list.select(Some(i));
            }
            Mode::Viewer(v) => v.scroll = v.scroll.saturating_sub(1),
        }
    }

    pub fn on_down(&mut self) {
        match &mut self.mode {
            Mode::Input => {}
            Mode::Questions => {
                let len = self.query.questions().len();
                if len == 0 {
                    return;
                }
                let i = match self.list.selected() {
                    Some(i) => if i + 1 == len { 0 } else { i + 1 },
                    None => 0,
                };
                self.list.select(Some(i));
            }
            Mode::Viewer(v) => v.scroll += 1,
        }
    }

    pub fn on_page_up(&mut self) {
        match &mut self.mode {
            Mode::Input => {}
            Mode::Questions => {
                if self.query.questions().is_empty() {
                    return;
                }
                let i = match self.list.selected() {
                    Some(i) => i.saturating_sub(5),
                    None => 0,
                };
                self.list.select(Some(i));
            }
            Mode::Viewer(v) => v.scroll = v.scroll.saturating_sub(5),
        }
    }

    pub fn on_page_down(&mut self) {
        match &mut self.mode {
            Mode::Input => {}
            Mode::Questions => {
                let len = self.query.questions().len();
                if len == 0 {
                    return;
                }
                let i = match self.list.selected() {
                    Some(i) => if i + 5 >= len { len - 1 } else { i + 5 },
                    None => 0,
                };
                self.list.select(Some(i));
            }
            Mode::Viewer(v) => v.scroll += 5,
        }
    }

    /// Records the highlighted question's link as active and opens its page
    /// in the viewer. A page that fails to load still opens the viewer with
    /// a placeholder so the dismiss flow stays the same.
    pub fn on_enter(&mut self) {
        if let Mode::Questions = self.mode {
            let Some(question) = self
                .list
                .selected()
                .and_then(|i| self.query.questions().get(i))
                .cloned()
            else {
                return;
            };

            self.query.select(&question.link);
            let body = self.client.fetch_page(&question.link).unwrap_or_else(|err| {
                warn!(link = %question.link, error = %err, "failed to load question page");
                "<p>Failed to load page.</p>".to_string()
            });
            self.mode = Mode::Viewer(ViewerPane {
                question,
                body,
                scroll: 0,
            });
        }
    }

    /// Dismisses the viewer, returning to the list exactly as it was.
    pub fn on_back(&mut self) {
        if let Mode::Viewer(_) = self.mode {
            self.query.clear_selection();
            self.mode = Mode::Questions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Mode};
    use crate::api::StackExchangeClient;
    use crate::models::Question;
    use crate::state::RequestStatus;

    fn question(id: u64, view_count: u64) -> Question {
        Question {
            question_id: id,
            title: format!("question {id}"),
            link: format!("https://stackoverflow.com/questions/{id}"),
            creation_date: 1_600_000_000 + id as i64,
            answer_count: 0,
            view_count,
            owner: None,
        }
    }

    fn app_with_questions(n: u64) -> App {
        let mut app = App::new(StackExchangeClient::new("stackoverflow"));
        app.query.begin_fetch("22656");
        app.query
            .finish_fetch(Ok((1..=n).map(|id| question(id, id * 10)).collect()));
        app.mode = Mode::Questions;
        app.list.select(Some(0));
        app
    }

    #[test]
    fn starts_in_input_mode_idle() {
        let app = App::new(StackExchangeClient::new("stackoverflow"));
        assert!(app.accepting_input());
        assert!(!app.is_fetching());
        assert_eq!(app.query.status(), RequestStatus::Idle);
    }

    #[test]
    fn list_navigation_wraps_both_ways() {
        let mut app = app_with_questions(3);

        app.on_up();
        assert_eq!(app.list.selected(), Some(2));
        app.on_down();
        assert_eq!(app.list.selected(), Some(0));
        app.on_down();
        assert_eq!(app.list.selected(), Some(1));
    }

    #[test]
    fn page_moves_clamp_at_the_ends() {
        let mut app = app_with_questions(3);

        app.on_page_down();
        assert_eq!(app.list.selected(), Some(2));
        app.on_page_up();
        assert_eq!(app.list.selected(), Some(0));
    }

    #[test]
    fn navigation_on_an_empty_list_is_a_no_op() {
        let mut app = App::new(StackExchangeClient::new("stackoverflow"));
        app.mode = Mode::Questions;
        app.on_up();
        app.on_down();
        app.on_page_down();
        assert_eq!(app.list.selected(), None);
    }
}
