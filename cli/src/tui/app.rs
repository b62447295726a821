use ratatui::widgets::TableState;
use swipedo_core::service::session::Result as SessionResult;
use swipedo_core::time::today;
use swipedo_core::{CompletedPlacement, Mode, Session, TagSet, TaskId, TaskRow};
use tracing::debug;

pub struct App {
    pub session: Session,
    pub state: TableState,
    pub cursor_position: usize,
}

impl App {
    pub fn new(placement: CompletedPlacement) -> App {
        App {
            session: Session::new(placement, TagSet::defaults(), today()),
            state: TableState::default(),
            cursor_position: 0,
        }
    }

    /// Rows for the current frame, positions resolved now.
    pub fn rows(&self) -> Vec<TaskRow> {
        self.session.rows()
    }

    pub fn tick(&mut self) {
        self.session.set_today(today());
    }

    // Refused actions leave the screen unchanged; the reason only goes to the log.
    fn apply<T>(&self, action: &str, result: SessionResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(action, error = %e, "action ignored");
                None
            }
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        let i = self.state.selected()?;
        self.session.list().id_at(i).ok()
    }

    fn select_id(&mut self, id: TaskId) {
        if let Some(i) = self.session.list().position_of(id) {
            self.state.select(Some(i));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.list().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    pub fn next(&mut self) {
        let len = self.session.list().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.leave_revealed();
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.session.list().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.leave_revealed();
        self.state.select(Some(i));
    }

    // Moving off a revealed row closes it, like scrolling away from a swipe.
    fn leave_revealed(&mut self) {
        if matches!(self.session.mode(), Mode::Revealed { .. }) {
            self.session.cancel();
        }
    }

    pub fn toggle(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.toggle(id);
            if self.apply("toggle", result).is_some() {
                self.select_id(id);
            }
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.begin_edit(id);
            if self.apply("edit", result).is_some() {
                self.cursor_position = self.current_line().chars().count();
            }
        }
    }

    pub fn reveal(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.reveal(id);
            self.apply("reveal", result);
        }
    }

    pub fn quick_delete(&mut self) {
        let result = self.session.quick_delete();
        if self.apply("quick delete", result).is_some() {
            self.clamp_selection();
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.request_delete(id);
            self.apply("request delete", result);
        }
    }

    pub fn confirm_delete(&mut self) {
        let result = self.session.confirm_delete();
        self.apply("confirm delete", result);
        self.clamp_selection();
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
        self.cursor_position = 0;
    }

    pub fn begin_pick_date(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.session.begin_pick_date(id);
            self.apply("pick date", result);
        }
    }

    pub fn shift_date(&mut self, days: i64) {
        let result = self.session.shift_picked_date(days);
        self.apply("shift date", result);
    }

    pub fn pick_today(&mut self) {
        let result = self.session.pick_today();
        self.apply("pick today", result);
    }

    pub fn confirm_date(&mut self) {
        let id = match self.session.mode() {
            Mode::PickingDate { id, .. } => Some(*id),
            _ => None,
        };
        let result = self.session.confirm_date();
        if let (Some(()), Some(id)) = (self.apply("confirm date", result), id) {
            self.select_id(id);
        }
    }

    pub fn clear_date(&mut self) {
        let id = match self.session.mode() {
            Mode::PickingDate { id, .. } => Some(*id),
            _ => None,
        };
        let result = self.session.clear_date();
        if let (Some(()), Some(id)) = (self.apply("clear date", result), id) {
            self.select_id(id);
        }
    }

    // --- Text input (add line and inline edit share the cursor) ---

    pub fn enter_add_mode(&mut self) {
        let result = self.session.start_add();
        if self.apply("add", result).is_some() {
            self.cursor_position = 0;
        }
    }

    pub fn current_line(&self) -> String {
        self.session
            .add_input()
            .or_else(|| self.session.edit_buffer())
            .unwrap_or_default()
            .to_string()
    }

    fn set_line(&mut self, line: String) {
        let result = if self.session.add_input().is_some() {
            self.session.set_add_input(line)
        } else {
            self.session.set_edit_buffer(line)
        };
        self.apply("type", result);
    }

    fn byte_index(line: &str, chars: usize) -> usize {
        line.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    pub fn input_char(&mut self, c: char) {
        let mut line = self.current_line();
        line.insert(Self::byte_index(&line, self.cursor_position), c);
        self.cursor_position += 1;
        self.set_line(line);
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let mut line = self.current_line();
            line.remove(Self::byte_index(&line, self.cursor_position - 1));
            self.cursor_position -= 1;
            self.set_line(line);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.current_line().chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Tab: complete a `#tag` if one is being typed, otherwise flip the date
    /// suggestion.
    pub fn tab(&mut self) {
        match self.session.complete_tag() {
            Ok(true) => self.cursor_position = self.current_line().chars().count(),
            Ok(false) => {
                let result = self.session.toggle_suggestion();
                self.apply("accept suggestion", result);
            }
            Err(e) => debug!(error = %e, "action ignored"),
        }
    }

    pub fn submit(&mut self) {
        if self.session.add_input().is_some() {
            let result = self.session.submit_add();
            if let Some(id) = self.apply("submit add", result) {
                self.select_id(id);
            }
        } else if self.session.edit_buffer().is_some() {
            let result = self.session.commit_edit();
            self.apply("commit edit", result);
        }
        self.cursor_position = 0;
        self.clamp_selection();
    }
}
