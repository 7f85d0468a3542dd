//! Ordered list editor
//!
//! Holds the rows being edited before they are submitted. Each row gets a
//! [`RowId`] when it is created. Ids only ever increase and are never handed
//! out twice in one session, so a row keeps its id however it is moved and
//! whatever else is removed.
//!
//! Rows live in a map keyed by id; display order is a separate list of ids.
//! [`LinkListEditor::serialize`] walks that list to produce the
//! [`Submission`] that `LinkStore::save` consumes.

use std::collections::HashMap;
use std::fmt;

use crate::models::{
    LinkEntry, DEFAULT_ICON, DEFAULT_SEPARATOR_LABEL, NO_URL, SEPARATOR_ICON,
};
use crate::submission::{format_manifest, FieldSet, Submission, ENABLED_ON};

/// Stable identity of an editor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u32);

impl RowId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable text inputs of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Icon,
    Label,
    Url,
    Color,
}

impl RowField {
    pub const ALL: [RowField; 4] = [RowField::Icon, RowField::Label, RowField::Url, RowField::Color];

    pub fn name(&self) -> &'static str {
        match self {
            RowField::Icon => "icon",
            RowField::Label => "label",
            RowField::Url => "url",
            RowField::Color => "color",
        }
    }

    /// The next field in tab order, wrapping
    pub fn next(self) -> Self {
        match self {
            RowField::Icon => RowField::Label,
            RowField::Label => RowField::Url,
            RowField::Url => RowField::Color,
            RowField::Color => RowField::Icon,
        }
    }
}

impl std::str::FromStr for RowField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icon" => Ok(RowField::Icon),
            "label" => Ok(RowField::Label),
            "url" => Ok(RowField::Url),
            "color" => Ok(RowField::Color),
            other => Err(format!(
                "Unknown field '{}'. Valid fields: icon, label, url, color",
                other
            )),
        }
    }
}

/// One row as the editor holds it, unsanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub icon: String,
    pub label: String,
    pub url: String,
    pub color: String,
    pub enabled: bool,
}

impl Row {
    fn blank_link() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            label: String::new(),
            url: String::new(),
            color: String::new(),
            enabled: true,
        }
    }

    fn blank_separator() -> Self {
        Self {
            icon: SEPARATOR_ICON.to_string(),
            label: DEFAULT_SEPARATOR_LABEL.to_string(),
            url: NO_URL.to_string(),
            color: String::new(),
            enabled: true,
        }
    }

    pub fn field(&self, field: RowField) -> &str {
        match field {
            RowField::Icon => &self.icon,
            RowField::Label => &self.label,
            RowField::Url => &self.url,
            RowField::Color => &self.color,
        }
    }

    fn field_mut(&mut self, field: RowField) -> &mut String {
        match field {
            RowField::Icon => &mut self.icon,
            RowField::Label => &mut self.label,
            RowField::Url => &mut self.url,
            RowField::Color => &mut self.color,
        }
    }

    fn field_set(&self) -> FieldSet {
        FieldSet::new(&self.icon, &self.label, &self.url, &self.color)
    }

    /// View the row as an entry (for previews; no sanitizing is applied)
    pub fn to_entry(&self) -> LinkEntry {
        LinkEntry {
            icon: self.icon.clone(),
            label: self.label.clone(),
            url: self.url.clone(),
            enabled: self.enabled,
            color: self.color.clone(),
        }
    }
}

impl From<&LinkEntry> for Row {
    fn from(entry: &LinkEntry) -> Self {
        Self {
            icon: entry.icon.clone(),
            label: entry.label.clone(),
            url: entry.url.clone(),
            color: entry.color.clone(),
            enabled: entry.enabled,
        }
    }
}

/// In-memory ordered editor for a link list
#[derive(Debug, Clone, Default)]
pub struct LinkListEditor {
    rows: HashMap<RowId, Row>,
    order: Vec<RowId>,
    next_id: u32,
}

impl LinkListEditor {
    /// Empty editor
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing list; rows get ids `0..n` in list order
    pub fn from_entries(entries: &[LinkEntry]) -> Self {
        let mut editor = Self::new();
        for entry in entries {
            editor.push(Row::from(entry));
        }
        editor
    }

    fn push(&mut self, row: Row) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.insert(id, row);
        self.order.push(id);
        id
    }

    /// Append a blank, enabled link row
    pub fn add_link(&mut self) -> RowId {
        self.push(Row::blank_link())
    }

    /// Append an enabled separator row
    pub fn add_separator(&mut self) -> RowId {
        self.push(Row::blank_separator())
    }

    /// Remove a row. Other rows keep their ids and relative order.
    pub fn remove_row(&mut self, id: RowId) -> Option<Row> {
        let row = self.rows.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(row)
    }

    pub fn can_move_up(&self, id: RowId) -> bool {
        matches!(self.position(id), Some(pos) if pos > 0)
    }

    pub fn can_move_down(&self, id: RowId) -> bool {
        matches!(self.position(id), Some(pos) if pos + 1 < self.order.len())
    }

    /// Swap with the previous row. Returns false (and does nothing) for the
    /// first row or an unknown id.
    pub fn move_up(&mut self, id: RowId) -> bool {
        if !self.can_move_up(id) {
            return false;
        }
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.order.swap(pos - 1, pos);
        true
    }

    /// Swap with the next row. Returns false (and does nothing) for the last
    /// row or an unknown id.
    pub fn move_down(&mut self, id: RowId) -> bool {
        if !self.can_move_down(id) {
            return false;
        }
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.order.swap(pos, pos + 1);
        true
    }

    /// Set a row's enabled flag. Position is unchanged.
    pub fn toggle_enabled(&mut self, id: RowId, value: bool) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) => {
                row.enabled = value;
                true
            }
            None => false,
        }
    }

    /// Replace one text input of a row
    pub fn edit_field(&mut self, id: RowId, field: RowField, value: impl Into<String>) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row.field_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    /// Display position of a row
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Id of the row at a display position
    pub fn id_at(&self, position: usize) -> Option<RowId> {
        self.order.get(position).copied()
    }

    /// Ids in display order
    pub fn ids(&self) -> &[RowId] {
        &self.order
    }

    /// Rows in display order
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &Row)> + '_ {
        self.order.iter().filter_map(|id| self.rows.get(id).map(|row| (*id, row)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Produce the submission for the current display order
    pub fn serialize(&self) -> Submission {
        let mut submission = Submission {
            order: format_manifest(&self.order.iter().map(RowId::as_u32).collect::<Vec<_>>()),
            ..Default::default()
        };

        for (id, row) in self.rows() {
            submission.fields.insert(id.as_u32(), row.field_set());
            if row.enabled {
                submission.enabled.insert(id.as_u32(), ENABLED_ON.to_string());
            }
        }

        submission
    }
}
