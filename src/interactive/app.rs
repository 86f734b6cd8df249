//! Application state and event handling for the interactive roster

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::events::AppEvent;
use super::form::{AssignFormState, LegendField, LegendFormState, TextInput};
use super::messages::MessageLog;
use crate::api::RosterBackend;
use crate::calendar::HolidayTable;
use crate::config::Config;
use crate::error::LegendError;
use crate::legend_editor::{LegendEditor, DELETED_MESSAGE};
use crate::roster::{DayCursor, DayList, Employee, MonthGrid, RosterBook, Viewer};
use crate::schedule::{enrich_all, Category, LegendEntry, MasterData, ScheduleEntry};
use crate::utils::month_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Grid,
    Day,
    Legend,
    LegendForm,
    ConfirmDelete,
    Assign,
    Help,
}

/// The three top-level screens, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Grid,
    Day,
    Legend,
}

impl View {
    pub fn next(&self) -> View {
        match self {
            View::Grid => View::Day,
            View::Day => View::Legend,
            View::Legend => View::Grid,
        }
    }

    pub fn previous(&self) -> View {
        match self {
            View::Grid => View::Legend,
            View::Day => View::Grid,
            View::Legend => View::Day,
        }
    }

    pub fn mode(&self) -> AppMode {
        match self {
            View::Grid => AppMode::Grid,
            View::Day => AppMode::Day,
            View::Legend => AppMode::Legend,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Grid => "Jadwal Bulanan",
            View::Day => "Jadwal Harian",
            View::Legend => "Keterangan",
        }
    }
}

/// Backend work queued by a key press, run after the next draw so the
/// loading overlay is visible while it is in flight
#[derive(Debug, Clone)]
pub enum PendingAction {
    LoadMonth { year: i32, month: u32 },
    SaveSchedule(ScheduleEntry),
    SaveLegend,
    DeleteLegend(LegendEntry),
}

impl PendingAction {
    fn loading_message(&self) -> &'static str {
        match self {
            PendingAction::LoadMonth { .. } => "Memuat jadwal...",
            PendingAction::SaveSchedule(_) | PendingAction::SaveLegend => "Menyimpan...",
            PendingAction::DeleteLegend(_) => "Menghapus...",
        }
    }
}

pub struct App {
    backend: Box<dyn RosterBackend>,
    pub config: Config,
    pub viewer: Viewer,
    pub holidays: HolidayTable,
    pub today: NaiveDate,

    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub master: MasterData,
    pub employees: Vec<Employee>,
    pub book: RosterBook,

    pub grid: MonthGrid,
    /// Selected day, shared by the grid and the day list
    pub cursor: DayCursor,
    pub day_list: DayList,
    pub legend: Vec<(Category, Vec<LegendEntry>)>,

    pub mode: AppMode,
    pub view: View,
    pub selected_row: usize,
    pub legend_section: usize,
    pub legend_index: usize,
    pub legend_form: Option<LegendFormState>,
    pub assign_form: Option<AssignFormState>,
    pub pending_delete: Option<LegendEntry>,
    pending: Option<PendingAction>,

    pub messages: MessageLog,
    pub loading: bool,
    pub loading_message: String,
}

impl App {
    /// Create the app and load the month containing `today`
    pub async fn new(
        backend: Box<dyn RosterBackend>,
        config: Config,
        holidays: HolidayTable,
        today: NaiveDate,
    ) -> Result<Self> {
        let viewer = Viewer::new(config.can_edit, config.user_nip.as_deref());
        let (year, month) = (today.year(), today.month0());
        let (master, employees, book) = fetch_month(backend.as_ref(), year, month).await?;

        let mut app = Self {
            backend,
            viewer,
            holidays,
            today,
            year,
            month,
            master,
            employees,
            book,
            grid: MonthGrid {
                year,
                month,
                headers: Vec::new(),
                rows: Vec::new(),
            },
            cursor: DayCursor::new(year, month, today),
            day_list: DayList {
                date_key: String::new(),
                day: 1,
                day_name: "",
                is_today: false,
                entries: Vec::new(),
            },
            legend: Vec::new(),
            mode: AppMode::Grid,
            view: View::Grid,
            selected_row: 0,
            legend_section: 0,
            legend_index: 0,
            legend_form: None,
            assign_form: None,
            pending_delete: None,
            pending: None,
            messages: MessageLog::new(),
            loading: false,
            loading_message: String::new(),
            config,
        };
        app.rebuild();
        app.messages.info(format!(
            "Memuat {} pegawai untuk {} {}",
            app.employees.len(),
            month_name(month),
            year
        ));
        Ok(app)
    }

    pub fn backend(&self) -> &dyn RosterBackend {
        self.backend.as_ref()
    }

    /// Recompute every derived view from the current snapshot
    pub fn rebuild(&mut self) {
        self.grid = MonthGrid::build(
            self.year,
            self.month,
            &self.employees,
            &self.book,
            &self.master,
            &self.holidays,
            &self.viewer,
        );
        if self.cursor.year != self.year || self.cursor.month != self.month {
            self.cursor = DayCursor::new(self.year, self.month, self.today);
        }
        self.rebuild_day_list();
        self.legend = enrich_all(&self.master.shifts, &self.master.units);

        self.selected_row = self.selected_row.min(self.employees.len().saturating_sub(1));
        self.legend_section = self.legend_section.min(self.legend.len().saturating_sub(1));
        self.clamp_legend_index();
    }

    fn rebuild_day_list(&mut self) {
        self.day_list = DayList::build(
            &self.cursor,
            &self.employees,
            &self.book,
            &self.master,
            &self.viewer,
        );
    }

    fn clamp_legend_index(&mut self) {
        let len = self.current_legend_entries().len();
        self.legend_index = self.legend_index.min(len.saturating_sub(1));
    }

    pub fn current_category(&self) -> Category {
        self.legend
            .get(self.legend_section)
            .map(|(category, _)| *category)
            .unwrap_or(Category::Primary)
    }

    pub fn current_legend_entries(&self) -> &[LegendEntry] {
        self.legend
            .get(self.legend_section)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_legend_entry(&self) -> Option<&LegendEntry> {
        self.current_legend_entries().get(self.legend_index)
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.employees.get(self.selected_row)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn queue(&mut self, action: PendingAction) {
        self.loading = true;
        self.loading_message = action.loading_message().to_string();
        self.pending = Some(action);
    }

    /// Handle one terminal event. Returns `false` when the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> Result<bool> {
        let key = match event {
            AppEvent::Key(key) => key,
            AppEvent::Resize => return Ok(true),
        };

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(false);
        }
        if self.loading {
            return Ok(true);
        }

        match self.mode {
            AppMode::Grid | AppMode::Day => Ok(self.handle_roster_key(key)),
            AppMode::Legend => Ok(self.handle_legend_key(key)),
            AppMode::LegendForm => {
                self.handle_legend_form_key(key);
                Ok(true)
            }
            AppMode::ConfirmDelete => {
                self.handle_confirm_delete_key(key);
                Ok(true)
            }
            AppMode::Assign => {
                self.handle_assign_key(key);
                Ok(true)
            }
            AppMode::Help => {
                self.mode = self.view.mode();
                Ok(true)
            }
        }
    }

    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.mode = view.mode();
    }

    /// Keys shared by the three top-level views
    fn handle_view_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(false),
            KeyCode::Tab => {
                self.switch_view(self.view.next());
                Some(true)
            }
            KeyCode::BackTab => {
                self.switch_view(self.view.previous());
                Some(true)
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
                Some(true)
            }
            KeyCode::Char('r') => {
                self.queue(PendingAction::LoadMonth {
                    year: self.year,
                    month: self.month,
                });
                Some(true)
            }
            KeyCode::PageUp | KeyCode::Char('[') => {
                let (year, month) = shift_month(self.year, self.month, -1);
                self.queue(PendingAction::LoadMonth { year, month });
                Some(true)
            }
            KeyCode::PageDown | KeyCode::Char(']') => {
                let (year, month) = shift_month(self.year, self.month, 1);
                self.queue(PendingAction::LoadMonth { year, month });
                Some(true)
            }
            KeyCode::Char('t') => {
                self.queue(PendingAction::LoadMonth {
                    year: self.today.year(),
                    month: self.today.month0(),
                });
                Some(true)
            }
            _ => None,
        }
    }

    fn handle_roster_key(&mut self, key: KeyEvent) -> bool {
        if let Some(keep_running) = self.handle_view_key(key) {
            return keep_running;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_row + 1 < self.employees.len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor.prev();
                self.rebuild_day_list();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.next();
                self.rebuild_day_list();
            }
            KeyCode::Home => {
                self.cursor.select(1);
                self.rebuild_day_list();
            }
            KeyCode::End => {
                let last = self.cursor.days_in_month();
                self.cursor.select(last);
                self.rebuild_day_list();
            }
            KeyCode::Enter => self.open_assign(),
            _ => {}
        }
        true
    }

    /// Open the dialog for the selected (employee, day) cell
    pub fn open_assign(&mut self) {
        let cell = match self.grid.cell(self.selected_row, self.cursor.day) {
            Some(cell) => cell,
            None => return,
        };
        if !cell.clickable {
            self.messages
                .warning("Anda hanya dapat membuka jadwal milik sendiri.");
            return;
        }
        let employee = match self.selected_employee() {
            Some(employee) => employee.clone(),
            None => return,
        };
        let date_key = cell.date_key.clone();
        let record = self.book.record_for_cell(&employee.employee_id, &date_key);
        self.assign_form = Some(AssignFormState::new(
            employee,
            date_key,
            record,
            !self.viewer.can_edit,
        ));
        self.mode = AppMode::Assign;
    }

    fn close_assign(&mut self) {
        self.assign_form = None;
        self.mode = self.view.mode();
    }

    fn handle_assign_key(&mut self, key: KeyEvent) {
        let form = match self.assign_form.as_mut() {
            Some(form) => form,
            None => {
                self.mode = self.view.mode();
                return;
            }
        };

        if form.read_only {
            self.close_assign();
            return;
        }

        match key.code {
            KeyCode::Esc => self.close_assign(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.current_field = form.current_field.toggle();
            }
            KeyCode::Enter => {
                let entry = form.to_entry();
                self.queue(PendingAction::SaveSchedule(entry));
            }
            _ => edit_text(form.current_input_mut(), key),
        }
    }

    fn handle_legend_key(&mut self, key: KeyEvent) -> bool {
        if let Some(keep_running) = self.handle_view_key(key) {
            return keep_running;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.legend_index = self.legend_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.legend_index + 1 < self.current_legend_entries().len() {
                    self.legend_index += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.legend_section = self.legend_section.saturating_sub(1);
                self.clamp_legend_index();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.legend_section + 1 < self.legend.len() {
                    self.legend_section += 1;
                }
                self.clamp_legend_index();
            }
            KeyCode::Char('a') => self.open_legend_form(false),
            KeyCode::Char('e') | KeyCode::Enter => self.open_legend_form(true),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            _ => {}
        }
        true
    }

    /// Open the add form, or the edit form for the selected entry
    pub fn open_legend_form(&mut self, edit: bool) {
        if !self.viewer.can_edit {
            self.messages.error(LegendError::NotAllowed.to_string());
            return;
        }
        let editing = if edit {
            match self.selected_legend_entry() {
                Some(entry) => Some(entry.clone()),
                None => return,
            }
        } else {
            None
        };
        self.legend_form = Some(LegendFormState::new(self.current_category(), editing));
        self.mode = AppMode::LegendForm;
    }

    /// Ask before deleting the selected entry. System entries are refused
    /// without asking.
    pub fn request_delete(&mut self) {
        if !self.viewer.can_edit {
            self.messages.error(LegendError::NotAllowed.to_string());
            return;
        }
        let entry = match self.selected_legend_entry() {
            Some(entry) => entry.clone(),
            None => return,
        };
        if !entry.is_from_db() {
            self.messages.error(LegendError::SystemEntry.to_string());
            return;
        }
        self.pending_delete = Some(entry);
        self.mode = AppMode::ConfirmDelete;
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent) {
        self.mode = AppMode::Legend;
        let entry = match self.pending_delete.take() {
            Some(entry) => entry,
            None => return,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.queue(PendingAction::DeleteLegend(entry));
            }
            _ => self.messages.info("Dibatalkan."),
        }
    }

    fn handle_legend_form_key(&mut self, key: KeyEvent) {
        let form = match self.legend_form.as_mut() {
            Some(form) => form,
            None => {
                self.mode = AppMode::Legend;
                return;
            }
        };

        match key.code {
            KeyCode::Esc => {
                self.legend_form = None;
                self.mode = AppMode::Legend;
            }
            KeyCode::Tab | KeyCode::Down => form.current_field = form.current_field.next(),
            KeyCode::BackTab | KeyCode::Up => form.current_field = form.current_field.previous(),
            KeyCode::Enter => self.queue(PendingAction::SaveLegend),
            KeyCode::Left if form.current_field == LegendField::Color => form.previous_color(),
            KeyCode::Right | KeyCode::Char(' ') if form.current_field == LegendField::Color => {
                form.next_color()
            }
            _ => {
                if let Some(input) = form.current_input_mut() {
                    edit_text(input, key);
                }
            }
        }
    }

    /// Run the queued backend action, if any
    pub async fn run_pending(&mut self) {
        let action = match self.pending.take() {
            Some(action) => action,
            None => return,
        };

        match action {
            PendingAction::LoadMonth { year, month } => self.load_month(year, month).await,
            PendingAction::SaveSchedule(entry) => self.save_schedule(entry).await,
            PendingAction::SaveLegend => self.save_legend().await,
            PendingAction::DeleteLegend(entry) => self.delete_legend(entry).await,
        }

        self.loading = false;
        self.loading_message.clear();
    }

    /// Replace the snapshot with `year`/`month`. On failure the current
    /// month and data stay as they were.
    pub async fn load_month(&mut self, year: i32, month: u32) {
        match fetch_month(self.backend.as_ref(), year, month).await {
            Ok((master, employees, book)) => {
                self.year = year;
                self.month = month;
                self.master = master;
                self.employees = employees;
                self.book = book;
                self.rebuild();
                self.messages
                    .info(format!("Jadwal {} {} dimuat", month_name(month), year));
            }
            Err(e) => {
                tracing::warn!(year, month, error = %e, "failed to load roster month");
                self.messages.error(format!("Gagal memuat jadwal: {}", e));
            }
        }
    }

    /// Refresh the master lists only; used after legend edits
    async fn refresh_master(&mut self) {
        match self.backend.fetch_master_data().await {
            Ok(master) => {
                self.master = master;
                self.rebuild();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to refresh master data");
                self.messages
                    .warning(format!("Gagal memuat ulang keterangan: {}", e));
            }
        }
    }

    async fn save_schedule(&mut self, entry: ScheduleEntry) {
        if !self.viewer.can_edit {
            self.messages.error(LegendError::NotAllowed.to_string());
            self.close_assign();
            return;
        }
        match self.backend.save_schedule(&entry).await {
            Ok(()) => {
                tracing::info!(
                    employee_id = %entry.employee_id,
                    date = %entry.date,
                    "schedule saved"
                );
                self.book
                    .insert(&entry.employee_id, &entry.date, entry.record.clone());
                self.rebuild();
                self.close_assign();
                self.messages.success("Jadwal berhasil disimpan");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save schedule");
                self.messages.error(format!("Gagal menyimpan: {}", e));
            }
        }
    }

    async fn save_legend(&mut self) {
        let form = match self.legend_form.as_ref() {
            Some(form) => form,
            None => return,
        };
        let editor = LegendEditor::new(self.backend.as_ref(), self.viewer.can_edit);
        let result = editor
            .save(form.category, form.editing.as_ref(), &form.to_form())
            .await;

        match result {
            Ok(outcome) => {
                self.legend_form = None;
                self.mode = AppMode::Legend;
                self.messages.success(outcome.message());
                self.refresh_master().await;
            }
            // The form stays open so the input can be corrected
            Err(e) => self.messages.error(e.to_string()),
        }
    }

    async fn delete_legend(&mut self, entry: LegendEntry) {
        let editor = LegendEditor::new(self.backend.as_ref(), self.viewer.can_edit);
        match editor.delete(&entry).await {
            Ok(()) => {
                self.messages.success(DELETED_MESSAGE);
                self.refresh_master().await;
            }
            Err(e) => self.messages.error(e.to_string()),
        }
    }

    /// Drop faded messages; called once per frame
    pub fn tick(&mut self) {
        self.messages.prune_expired();
    }
}

/// Apply a text editing key to `input`
fn edit_text(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_char_before(),
        KeyCode::Delete => input.delete_char_at(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_to_start(),
        KeyCode::End => input.move_to_end(),
        _ => {}
    }
}

/// Move a zero-based month by `delta`, carrying into the year
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 + delta;
    (total.div_euclid(12), total.rem_euclid(12) as u32)
}

async fn fetch_month(
    backend: &dyn RosterBackend,
    year: i32,
    month: u32,
) -> crate::error::Result<(MasterData, Vec<Employee>, RosterBook)> {
    let (master, employees, schedules) = tokio::try_join!(
        backend.fetch_master_data(),
        backend.fetch_employees(),
        backend.fetch_schedules(year, month),
    )?;
    Ok((master, employees, RosterBook::from_entries(schedules)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MasterPayload;
    use crate::error::{ApiError, RosterError};
    use crate::schedule::{MasterKind, MasterShift, MasterUnit, ScheduleRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        fail: AtomicBool,
    }

    struct MockBackend(Arc<Recorder>);

    impl MockBackend {
        fn check(&self, call: String) -> crate::error::Result<()> {
            self.0.calls.lock().unwrap().push(call);
            if self.0.fail.load(Ordering::SeqCst) {
                Err(RosterError::Api(ApiError::ConnectionFailed("down".to_string())))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl RosterBackend for MockBackend {
        async fn fetch_master_data(&self) -> crate::error::Result<MasterData> {
            self.check("master".to_string())?;
            Ok(MasterData::new(
                vec![MasterShift {
                    id: "1".to_string(),
                    code: "P".to_string(),
                    name: "Pagi".to_string(),
                    color: "#ffffff".to_string(),
                    start_time: Some("07:00".to_string()),
                    end_time: Some("14:30".to_string()),
                    is_active: true,
                    category: None,
                }],
                vec![MasterUnit {
                    id: "7".to_string(),
                    code: "PK".to_string(),
                    name: "Packing".to_string(),
                    color: "#a3e635".to_string(),
                }],
            ))
        }

        async fn fetch_employees(&self) -> crate::error::Result<Vec<Employee>> {
            self.check("users".to_string())?;
            Ok(vec![
                Employee::new("1", "Ani", "100"),
                Employee::new("2", "Budi", "200"),
            ])
        }

        async fn fetch_schedules(&self, year: i32, month: u32) -> crate::error::Result<Vec<ScheduleEntry>> {
            self.check(format!("schedules {} {}", year, month))?;
            Ok(vec![ScheduleEntry {
                employee_id: "200".to_string(),
                date: format!("{}-{:02}-03", year, month + 1),
                record: ScheduleRecord::new(Some("P"), None),
            }])
        }

        async fn save_schedule(&self, entry: &ScheduleEntry) -> crate::error::Result<()> {
            self.check(format!("save {} {}", entry.employee_id, entry.date))
        }

        async fn create_master(&self, kind: MasterKind, payload: &MasterPayload) -> crate::error::Result<()> {
            self.check(format!("create {} {}", kind.endpoint(), payload.code))
        }

        async fn update_master(
            &self,
            kind: MasterKind,
            id: &str,
            payload: &MasterPayload,
        ) -> crate::error::Result<()> {
            self.check(format!("update {} {} {}", kind.endpoint(), id, payload.code))
        }

        async fn delete_master(&self, kind: MasterKind, id: &str) -> crate::error::Result<()> {
            self.check(format!("delete {} {}", kind.endpoint(), id))
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    async fn app(can_edit: bool, nip: Option<&str>) -> (App, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let config = Config {
            can_edit,
            user_nip: nip.map(str::to_string),
            ..Config::default()
        };
        let app = App::new(
            Box::new(MockBackend(recorder.clone())),
            config,
            HolidayTable::new(),
            today(),
        )
        .await
        .unwrap();
        recorder.calls.lock().unwrap().clear();
        (app, recorder)
    }

    fn calls(recorder: &Recorder) -> Vec<String> {
        recorder.calls.lock().unwrap().clone()
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2024, 0, -1), (2023, 11));
        assert_eq!(shift_month(2024, 11, 1), (2025, 0));
        assert_eq!(shift_month(2024, 5, 1), (2024, 6));
    }

    #[tokio::test]
    async fn test_initial_load_selects_today() {
        let (app, _) = app(true, None).await;
        assert_eq!((app.year, app.month), (2024, 5));
        assert_eq!(app.cursor.day, 3);
        assert_eq!(app.grid.rows.len(), 2);
        assert!(app.day_list.is_today);
        assert_eq!(app.day_list.entries[1].code, "P");
        assert_eq!(app.legend.len(), 3);
    }

    #[tokio::test]
    async fn test_month_navigation_goes_through_pending() {
        let (mut app, recorder) = app(true, None).await;
        assert!(app.handle_event(key(KeyCode::Char(']'))).unwrap());
        assert!(app.loading);
        assert!(app.has_pending());

        app.run_pending().await;
        assert!(!app.loading);
        assert_eq!((app.year, app.month), (2024, 6));
        assert_eq!(app.cursor.day, 1);
        assert!(calls(&recorder).contains(&"schedules 2024 6".to_string()));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_snapshot() {
        let (mut app, recorder) = app(true, None).await;
        recorder.fail.store(true, Ordering::SeqCst);
        app.handle_event(key(KeyCode::PageUp)).unwrap();
        app.run_pending().await;
        assert_eq!((app.year, app.month), (2024, 5));
        assert_eq!(app.master.shifts.len(), 1);
        assert_eq!(app.employees.len(), 2);
        assert!(app.messages.last().unwrap().text.starts_with("Gagal memuat jadwal"));
    }

    #[tokio::test]
    async fn test_viewer_can_only_open_own_record() {
        let (mut app, _) = app(false, Some("200")).await;
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, AppMode::Grid);

        app.handle_event(key(KeyCode::Down)).unwrap();
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, AppMode::Assign);
        assert!(app.assign_form.as_ref().unwrap().read_only);

        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, AppMode::Grid);
        assert!(!app.has_pending());
    }

    #[tokio::test]
    async fn test_assign_saves_and_updates_grid() {
        let (mut app, recorder) = app(true, None).await;
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, AppMode::Assign);
        app.handle_event(key(KeyCode::Char('p'))).unwrap();
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('p'))).unwrap();
        app.handle_event(key(KeyCode::Char('k'))).unwrap();
        app.handle_event(key(KeyCode::Enter)).unwrap();
        app.run_pending().await;

        assert_eq!(calls(&recorder), vec!["save 100 2024-06-03".to_string()]);
        assert_eq!(app.mode, AppMode::Grid);
        let cell = app.grid.cell(0, 3).unwrap();
        assert!(cell.resolved.as_ref().unwrap().is_combined());
    }

    #[tokio::test]
    async fn test_system_entry_delete_is_refused_without_request() {
        let (mut app, recorder) = app(true, None).await;
        app.switch_view(View::Legend);
        let system = app
            .current_legend_entries()
            .iter()
            .position(|e| !e.is_from_db())
            .unwrap();
        app.legend_index = system;
        app.handle_event(key(KeyCode::Char('d'))).unwrap();

        assert_eq!(app.mode, AppMode::Legend);
        assert!(calls(&recorder).is_empty());
        assert_eq!(
            app.messages.last().unwrap().text,
            "Item ini bersifat sistem dan tidak bisa dihapus."
        );
    }

    #[tokio::test]
    async fn test_delete_unit_after_confirmation() {
        let (mut app, recorder) = app(true, None).await;
        app.switch_view(View::Legend);
        app.handle_event(key(KeyCode::Right)).unwrap();
        assert_eq!(app.current_category(), Category::Task);
        let unit = app
            .current_legend_entries()
            .iter()
            .position(|e| e.id.as_deref() == Some("7"))
            .unwrap();
        app.legend_index = unit;

        app.handle_event(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        app.handle_event(key(KeyCode::Char('y'))).unwrap();
        app.run_pending().await;

        assert_eq!(calls(&recorder), vec!["delete units 7".to_string(), "master".to_string()]);
        assert_eq!(app.messages.last().unwrap().text, DELETED_MESSAGE);
    }

    #[tokio::test]
    async fn test_legend_form_requires_edit_rights() {
        let (mut app, _) = app(false, None).await;
        app.switch_view(View::Legend);
        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.mode, AppMode::Legend);
        assert!(app.legend_form.is_none());
    }

    #[tokio::test]
    async fn test_add_symbol_from_form() {
        let (mut app, recorder) = app(true, None).await;
        app.switch_view(View::Legend);
        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.mode, AppMode::LegendForm);
        for c in "sr".chars() {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_event(key(KeyCode::Tab)).unwrap();
        for c in "Siang".chars() {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_event(key(KeyCode::Enter)).unwrap();
        app.run_pending().await;

        assert_eq!(calls(&recorder)[0], "create shifts SR");
        assert_eq!(app.mode, AppMode::Legend);
        assert!(app.legend_form.is_none());
    }

    #[tokio::test]
    async fn test_failed_legend_save_keeps_form_open() {
        let (mut app, recorder) = app(true, None).await;
        app.switch_view(View::Legend);
        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        app.handle_event(key(KeyCode::Char('x'))).unwrap();
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('y'))).unwrap();
        recorder.fail.store(true, Ordering::SeqCst);
        app.handle_event(key(KeyCode::Enter)).unwrap();
        app.run_pending().await;

        assert_eq!(app.mode, AppMode::LegendForm);
        assert!(app.legend_form.is_some());
        assert!(app.messages.last().unwrap().text.starts_with("Gagal menyimpan"));
    }
}
