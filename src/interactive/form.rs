//! Form state for the legend editor and the cell assignment dialog

use crate::legend_editor::{LegendForm, MAX_CODE_LEN, PRESET_COLORS};
use crate::roster::Employee;
use crate::schedule::{normalize_code, Category, LegendEntry, ScheduleEntry, ScheduleRecord};

/// Single-line text input with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
    max_len: Option<usize>,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.max_len.map_or(false, |max| self.len() >= max) {
            return;
        }
        let pos = self.cursor.min(self.len());
        let idx = self.byte_index(pos);
        self.value.insert(idx, c);
        self.cursor = pos + 1;
    }

    /// Backspace
    pub fn delete_char_before(&mut self) {
        let pos = self.cursor.min(self.len());
        if pos > 0 {
            let idx = self.byte_index(pos - 1);
            self.value.remove(idx);
            self.cursor = pos - 1;
        }
    }

    /// Delete key
    pub fn delete_char_at(&mut self) {
        let pos = self.cursor.min(self.len());
        if pos < self.len() {
            let idx = self.byte_index(pos);
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    /// Value with a block cursor drawn at the cursor position
    pub fn display_with_cursor(&self) -> String {
        let idx = self.byte_index(self.cursor.min(self.len()));
        let mut display = self.value.clone();
        display.insert(idx, '█');
        display
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendField {
    Code,
    Name,
    Color,
}

impl LegendField {
    pub fn all() -> [LegendField; 3] {
        [LegendField::Code, LegendField::Name, LegendField::Color]
    }

    pub fn next(&self) -> LegendField {
        match self {
            LegendField::Code => LegendField::Name,
            LegendField::Name => LegendField::Color,
            LegendField::Color => LegendField::Code,
        }
    }

    pub fn previous(&self) -> LegendField {
        match self {
            LegendField::Code => LegendField::Color,
            LegendField::Name => LegendField::Code,
            LegendField::Color => LegendField::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LegendField::Code => "Kode",
            LegendField::Name => "Nama Keterangan",
            LegendField::Color => "Pilih Warna Visual",
        }
    }
}

/// Add or edit dialog for one legend symbol
#[derive(Debug, Clone)]
pub struct LegendFormState {
    pub category: Category,
    /// Entry being edited; `None` when adding
    pub editing: Option<LegendEntry>,
    pub code: TextInput,
    pub name: TextInput,
    /// Palette choices; an edited color outside the presets is appended
    pub palette: Vec<String>,
    pub color_index: usize,
    pub current_field: LegendField,
}

impl LegendFormState {
    pub fn new(category: Category, editing: Option<LegendEntry>) -> Self {
        let form = match &editing {
            Some(entry) => LegendForm::from_entry(entry),
            None => LegendForm::default(),
        };

        let mut palette: Vec<String> = PRESET_COLORS.iter().map(|c| c.to_string()).collect();
        let color_index = match palette
            .iter()
            .position(|c| c.eq_ignore_ascii_case(&form.color))
        {
            Some(i) => i,
            None => {
                palette.push(form.color.clone());
                palette.len() - 1
            }
        };

        Self {
            category,
            editing,
            code: TextInput::new(&form.code).with_max_len(MAX_CODE_LEN),
            name: TextInput::new(&form.name),
            palette,
            color_index,
            current_field: LegendField::Code,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            " Edit Simbol "
        } else {
            " Tambah Simbol Baru "
        }
    }

    pub fn color(&self) -> &str {
        self.palette
            .get(self.color_index)
            .map(String::as_str)
            .unwrap_or(PRESET_COLORS[0])
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % self.palette.len();
    }

    pub fn previous_color(&mut self) {
        self.color_index = (self.color_index + self.palette.len() - 1) % self.palette.len();
    }

    /// The text input under focus, `None` on the color picker
    pub fn current_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.current_field {
            LegendField::Code => Some(&mut self.code),
            LegendField::Name => Some(&mut self.name),
            LegendField::Color => None,
        }
    }

    pub fn to_form(&self) -> LegendForm {
        LegendForm::new(&self.code.value, &self.name.value, self.color())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignField {
    Shift,
    Task,
}

impl AssignField {
    pub fn toggle(&self) -> AssignField {
        match self {
            AssignField::Shift => AssignField::Task,
            AssignField::Task => AssignField::Shift,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignField::Shift => "Kode Shift",
            AssignField::Task => "Kode Tugas",
        }
    }
}

/// Dialog for one (employee, day) cell
#[derive(Debug, Clone)]
pub struct AssignFormState {
    pub employee: Employee,
    pub date_key: String,
    pub shift: TextInput,
    pub task: TextInput,
    pub current_field: AssignField,
    /// Viewers without edit rights only see the assignment
    pub read_only: bool,
}

impl AssignFormState {
    pub fn new(
        employee: Employee,
        date_key: String,
        record: Option<&ScheduleRecord>,
        read_only: bool,
    ) -> Self {
        let shift = record.and_then(|r| r.shift_code.as_deref()).unwrap_or("");
        let task = record.and_then(|r| r.task_code.as_deref()).unwrap_or("");
        Self {
            employee,
            date_key,
            shift: TextInput::new(shift),
            task: TextInput::new(task),
            current_field: AssignField::Shift,
            read_only,
        }
    }

    pub fn current_input_mut(&mut self) -> &mut TextInput {
        match self.current_field {
            AssignField::Shift => &mut self.shift,
            AssignField::Task => &mut self.task,
        }
    }

    /// Blank codes are sent as missing
    pub fn to_entry(&self) -> ScheduleEntry {
        let code = |input: &TextInput| {
            let normalized = normalize_code(&input.value);
            if normalized.is_empty() {
                None
            } else {
                Some(normalized)
            }
        };
        ScheduleEntry {
            employee_id: self.employee.employee_id.clone(),
            date: self.date_key.clone(),
            record: ScheduleRecord {
                shift_code: code(&self.shift),
                task_code: code(&self.task),
            },
        }
    }
}
