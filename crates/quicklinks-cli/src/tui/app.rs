//! Application state and logic

use std::time::{Duration, Instant};

use quicklinks_core::{
    AccessPolicy, LinkEntry, LinkListEditor, LinkStore, MenuContext, OptionStore, Row, RowField,
    RowId,
};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating and rearranging rows
    Normal,
    /// Typing into one field of the selected row
    Editing,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Rows being edited
    pub editor: LinkListEditor,
    /// Display position of the selected row
    pub selected: usize,
    /// Unsaved changes since the last load or save
    pub dirty: bool,
    /// Field being typed into
    pub edit_field: RowField,
    /// Text of the field being typed into
    pub edit_buffer: String,
    /// Cursor position in the edit buffer, in chars
    pub edit_cursor: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Waiting for `y` to confirm a reset
    pub confirm_reset: bool,
    /// Quit was pressed once with unsaved changes
    pub confirm_quit: bool,
}

impl App {
    /// Start editing the given list
    pub fn new(entries: &[LinkEntry]) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            editor: LinkListEditor::from_entries(entries),
            selected: 0,
            dirty: false,
            edit_field: RowField::Label,
            edit_buffer: String::new(),
            edit_cursor: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            error_message: None,
            confirm_reset: false,
            confirm_quit: false,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn selected_id(&self) -> Option<RowId> {
        self.editor.id_at(self.selected)
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.selected_id().and_then(|id| self.editor.get(id))
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.editor.len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.editor.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.editor.len() {
            self.select_last();
        }
    }

    fn select(&mut self, id: RowId) {
        if let Some(pos) = self.editor.position(id) {
            self.selected = pos;
        }
    }

    /// Move the selected row up, keeping it selected
    pub fn move_selected_up(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.editor.move_up(id) {
            self.select(id);
            self.dirty = true;
        }
    }

    /// Move the selected row down, keeping it selected
    pub fn move_selected_down(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.editor.move_down(id) {
            self.select(id);
            self.dirty = true;
        }
    }

    /// Flip the selected row's enabled flag
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let enabled = self.editor.get(id).map(|row| row.enabled).unwrap_or(false);
        if self.editor.toggle_enabled(id, !enabled) {
            self.dirty = true;
        }
    }

    /// Append a link, select it and start typing its label
    pub fn add_link(&mut self) {
        let id = self.editor.add_link();
        self.select(id);
        self.dirty = true;
        self.start_editing(RowField::Label);
    }

    /// Append a separator and select it
    pub fn add_separator(&mut self) {
        let id = self.editor.add_separator();
        self.select(id);
        self.dirty = true;
        self.set_status("Added separator");
    }

    /// Remove the selected row
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(row) = self.editor.remove_row(id) {
            self.dirty = true;
            self.clamp_selection();
            self.set_status(format!("Removed '{}'", row.label));
        }
    }

    /// Start typing into a field of the selected row
    pub fn start_editing(&mut self, field: RowField) {
        let Some(value) = self.selected_row().map(|row| row.field(field).to_string()) else {
            return;
        };
        self.edit_buffer = value;
        self.edit_cursor = self.edit_buffer.chars().count();
        self.edit_field = field;
        self.input_mode = InputMode::Editing;
    }

    /// Write the buffer into the selected row
    fn commit_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let changed = self
            .editor
            .get(id)
            .map(|row| row.field(self.edit_field) != self.edit_buffer)
            .unwrap_or(false);
        if changed {
            self.editor
                .edit_field(id, self.edit_field, self.edit_buffer.clone());
            self.dirty = true;
        }
    }

    /// Keep the typed value and move on to the next field
    pub fn next_field(&mut self) {
        self.commit_edit();
        self.start_editing(self.edit_field.next());
    }

    /// Keep the typed value and go back to navigation
    pub fn finish_editing(&mut self) {
        self.commit_edit();
        self.input_mode = InputMode::Normal;
    }

    /// Drop the typed value
    pub fn cancel_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    fn byte_index(&self) -> usize {
        self.edit_buffer
            .char_indices()
            .nth(self.edit_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.edit_buffer.len())
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.edit_buffer.insert(index, c);
        self.edit_cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.edit_cursor == 0 {
            return;
        }
        self.edit_cursor -= 1;
        let index = self.byte_index();
        self.edit_buffer.remove(index);
    }

    pub fn cursor_left(&mut self) {
        self.edit_cursor = self.edit_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.edit_cursor < self.edit_buffer.chars().count() {
            self.edit_cursor += 1;
        }
    }

    /// Save the current rows, then show them as stored
    pub fn save<S: OptionStore>(
        &mut self,
        store: &LinkStore<S>,
        access: &dyn AccessPolicy,
    ) -> anyhow::Result<()> {
        let links = store.save(access, &self.editor.serialize())?;
        let count = links.len();
        self.reload(&store.load());
        self.set_status(format!("Saved {} entries", count));
        Ok(())
    }

    /// Discard the stored list and show the defaults
    pub fn reset<S: OptionStore>(
        &mut self,
        store: &LinkStore<S>,
        access: &dyn AccessPolicy,
    ) -> anyhow::Result<()> {
        store.reset(access)?;
        self.reload(&store.load());
        self.set_status("Reset to defaults");
        Ok(())
    }

    fn reload(&mut self, entries: &[LinkEntry]) {
        self.editor = LinkListEditor::from_entries(entries);
        self.dirty = false;
        self.clamp_selection();
    }

    /// Ask before quitting with unsaved changes
    pub fn request_quit(&mut self) {
        if !self.dirty || self.confirm_quit {
            self.should_quit = true;
        } else {
            self.confirm_quit = true;
            self.set_status("Unsaved changes. Press q again to discard, w to save.");
        }
    }

    /// Resolved target of the selected link, if it goes anywhere
    pub fn selected_target(&self, ctx: &MenuContext) -> Option<String> {
        let entry = self.selected_row()?.to_entry();
        if entry.is_separator() || entry.url.is_empty() {
            return None;
        }
        Some(ctx.resolve(&entry.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicklinks_core::seed::default_links;
    use quicklinks_core::{AllowAll, MemoryOptionStore, TokenPolicy};

    fn app() -> App {
        App::new(&[
            LinkEntry::link("🅰", "A", "a.php"),
            LinkEntry::separator("─── S ───"),
            LinkEntry::link("🅲", "C", "https://c.example"),
        ])
    }

    fn labels(app: &App) -> Vec<String> {
        app.editor.rows().map(|(_, r)| r.label.clone()).collect()
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
        app.select_first();
        assert_eq!(app.selected, 0);
        app.select_last();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_move_keeps_selection_on_row() {
        let mut app = app();
        app.move_selected_down();
        assert_eq!(labels(&app), vec!["─── S ───", "A", "C"]);
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_row().unwrap().label, "A");
        assert!(app.dirty);

        app.select_first();
        app.dirty = false;
        app.move_selected_up();
        assert!(!app.dirty);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut app = app();
        app.toggle_selected();
        assert!(!app.selected_row().unwrap().enabled);

        app.select_last();
        app.remove_selected();
        assert_eq!(labels(&app), vec!["A", "─── S ───"]);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_add_link_starts_editing_label() {
        let mut app = app();
        app.add_link();
        assert_eq!(app.selected, 3);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.edit_field, RowField::Label);

        for c in "Tools".chars() {
            app.insert_char(c);
        }
        app.next_field();
        assert_eq!(app.edit_field, RowField::Url);
        for c in "tools.php".chars() {
            app.insert_char(c);
        }
        app.finish_editing();

        let row = app.selected_row().unwrap();
        assert_eq!(row.label, "Tools");
        assert_eq!(row.url, "tools.php");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_edit_buffer_is_char_aware() {
        let mut app = app();
        app.select_next();
        app.start_editing(RowField::Label);
        assert_eq!(app.edit_cursor, 9);

        for _ in 0..4 {
            app.cursor_left();
        }
        app.delete_char();
        app.insert_char('X');
        assert_eq!(app.edit_buffer, "─── X ───");

        app.cancel_editing();
        assert_eq!(app.selected_row().unwrap().label, "─── S ───");
    }

    #[test]
    fn test_save_and_reset() {
        let store = LinkStore::new(MemoryOptionStore::new());
        let mut app = app();
        app.move_selected_down();
        app.save(&store, &AllowAll).unwrap();

        assert!(!app.dirty);
        assert_eq!(store.load()[0].label, "─── S ───");

        app.reset(&store, &AllowAll).unwrap();
        assert_eq!(app.editor.len(), default_links().len());
    }

    #[test]
    fn test_denied_save_keeps_changes() {
        let store = LinkStore::new(MemoryOptionStore::new());
        let mut app = app();
        app.remove_selected();

        let denied = TokenPolicy::new(false, None, None);
        assert!(app.save(&store, &denied).is_err());
        assert!(app.dirty);
        assert_eq!(app.editor.len(), 2);
    }

    #[test]
    fn test_quit_asks_when_dirty() {
        let mut app = app();
        app.request_quit();
        assert!(app.should_quit);

        let mut app = self::app();
        app.toggle_selected();
        app.request_quit();
        assert!(!app.should_quit);
        app.request_quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_selected_target() {
        let ctx = MenuContext::new("/admin/", "admin.php?page=quick-links");
        let mut app = app();
        assert_eq!(app.selected_target(&ctx).as_deref(), Some("/admin/a.php"));
        app.select_next();
        assert!(app.selected_target(&ctx).is_none());
        app.select_next();
        assert_eq!(
            app.selected_target(&ctx).as_deref(),
            Some("https://c.example")
        );
    }
}
