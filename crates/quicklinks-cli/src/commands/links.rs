//! Link list command handlers
//!
//! Every edit goes the same way the settings screen does: load the current
//! list, apply the change in a `LinkListEditor`, then save the editor's
//! submission. Positions on the command line are 1-based, as `list` shows.

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use quicklinks_core::{
    build_menu, AccessPolicy, LinkList, LinkListEditor, LinkStore, MenuContext, OptionStore,
    RowField, RowId, StoreError, Submission,
};

use crate::editor::{confirm, read_input};
use crate::output::Output;

/// List all entries, including disabled ones
pub fn list<S: OptionStore>(store: &LinkStore<S>, output: &Output) -> Result<()> {
    output.print_entries(&store.load());
    Ok(())
}

/// Show the toolbar menu as it would render
pub fn menu<S: OptionStore>(store: &LinkStore<S>, ctx: &MenuContext, output: &Output) -> Result<()> {
    output.print_menu(&build_menu(&store.load(), ctx));
    Ok(())
}

/// Append a link
pub fn add<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    label: String,
    url: String,
    icon: Option<String>,
    color: Option<String>,
    output: &Output,
) -> Result<()> {
    apply(store, access, |editor| {
        let id = editor.add_link();
        editor.edit_field(id, RowField::Label, label.as_str());
        editor.edit_field(id, RowField::Url, url);
        if let Some(icon) = icon {
            editor.edit_field(id, RowField::Icon, icon);
        }
        if let Some(color) = color {
            editor.edit_field(id, RowField::Color, color);
        }
        Ok(())
    })?;

    output.success(&format!("Added link: {}", label));
    Ok(())
}

/// Append a separator
pub fn add_separator<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    label: Option<String>,
    output: &Output,
) -> Result<()> {
    let links = apply(store, access, |editor| {
        let id = editor.add_separator();
        if let Some(label) = label {
            editor.edit_field(id, RowField::Label, label);
        }
        Ok(())
    })?;

    output.success(&format!("Added separator at position {}", links.len()));
    Ok(())
}

/// Remove the entry at a position
pub fn remove<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    position: usize,
    output: &Output,
) -> Result<()> {
    let mut editor = LinkListEditor::from_entries(&store.load());
    let id = row_at(&editor, position)?;

    if output.should_prompt() {
        let label = editor.get(id).map(|r| r.label.as_str()).unwrap_or_default();
        println!("Remove entry {}: {}", position, label);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = editor
        .remove_row(id)
        .ok_or_else(|| anyhow!("No entry at position {}", position))?;
    save(store, access, &editor.serialize())?;

    output.success(&format!("Removed: {}", removed.label));
    Ok(())
}

/// Move the entry at a position one place up
pub fn move_up<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    position: usize,
    output: &Output,
) -> Result<()> {
    let mut editor = LinkListEditor::from_entries(&store.load());
    let id = row_at(&editor, position)?;

    if !editor.move_up(id) {
        output.message("Already at the top.");
        return Ok(());
    }
    save(store, access, &editor.serialize())?;

    output.success(&format!("Moved entry {} to {}", position, position - 1));
    Ok(())
}

/// Move the entry at a position one place down
pub fn move_down<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    position: usize,
    output: &Output,
) -> Result<()> {
    let mut editor = LinkListEditor::from_entries(&store.load());
    let id = row_at(&editor, position)?;

    if !editor.move_down(id) {
        output.message("Already at the bottom.");
        return Ok(());
    }
    save(store, access, &editor.serialize())?;

    output.success(&format!("Moved entry {} to {}", position, position + 1));
    Ok(())
}

/// Enable or disable the entry at a position
pub fn set_enabled<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    position: usize,
    enabled: bool,
    output: &Output,
) -> Result<()> {
    apply(store, access, |editor| {
        let id = row_at(editor, position)?;
        editor.toggle_enabled(id, enabled);
        Ok(())
    })?;

    let state = if enabled { "Enabled" } else { "Disabled" };
    output.success(&format!("{} entry {}", state, position));
    Ok(())
}

/// Change one field of the entry at a position
pub fn set_field<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    position: usize,
    field: &str,
    value: String,
    output: &Output,
) -> Result<()> {
    let field: RowField = field.parse().map_err(|e: String| anyhow!(e))?;

    let links = apply(store, access, |editor| {
        let id = row_at(editor, position)?;
        editor.edit_field(id, field, value);
        Ok(())
    })?;

    // Show the value as stored, after normalization
    let stored = links
        .get(position - 1)
        .map(|entry| match field {
            RowField::Icon => entry.icon.clone(),
            RowField::Label => entry.label.clone(),
            RowField::Url => entry.url.clone(),
            RowField::Color => entry.color.clone(),
        })
        .unwrap_or_default();

    output.success(&format!("Set {} of entry {} = {}", field.name(), position, stored));
    Ok(())
}

/// Save a full editor submission read from a file or stdin
pub fn submit<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    source: &Path,
    output: &Output,
) -> Result<()> {
    let content = read_input(source)?;
    let submission: Submission =
        serde_json::from_str(&content).context("Failed to parse submission JSON")?;

    let links = save(store, access, &submission)?;

    output.success(&format!("Saved {} entries", links.len()));
    Ok(())
}

/// Print the current list as an editor submission, ready for `submit`
pub fn export<S: OptionStore>(store: &LinkStore<S>) -> Result<()> {
    let submission = LinkListEditor::from_entries(&store.load()).serialize();
    println!(
        "{}",
        serde_json::to_string_pretty(&submission).context("Failed to encode submission")?
    );
    Ok(())
}

/// Discard the stored list and go back to the defaults
pub fn reset<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    yes: bool,
    output: &Output,
) -> Result<()> {
    if !yes && output.should_prompt() {
        println!("This replaces your quick links with the defaults.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset(access).map_err(describe)?;

    output.success("Quick links reset to defaults");
    Ok(())
}

/// Load, edit, save. Returns the list as stored.
fn apply<S, F>(store: &LinkStore<S>, access: &dyn AccessPolicy, edit: F) -> Result<LinkList>
where
    S: OptionStore,
    F: FnOnce(&mut LinkListEditor) -> Result<()>,
{
    let mut editor = LinkListEditor::from_entries(&store.load());
    edit(&mut editor)?;
    save(store, access, &editor.serialize())
}

fn save<S: OptionStore>(
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    submission: &Submission,
) -> Result<LinkList> {
    store.save(access, submission).map_err(describe)
}

/// Map a 1-based position to the row identity
fn row_at(editor: &LinkListEditor, position: usize) -> Result<RowId> {
    position
        .checked_sub(1)
        .and_then(|index| editor.id_at(index))
        .ok_or_else(|| {
            anyhow!(
                "No entry at position {} (the list has {} entries)",
                position,
                editor.len()
            )
        })
}

/// Attach a hint to store errors the user can act on
fn describe(err: StoreError) -> anyhow::Error {
    let hint = match &err {
        StoreError::AccessDenied(_) => {
            Some("Pass --token, or check access_token and read_only in the config.")
        }
        StoreError::Storage(e) => e.recovery_suggestion(),
        _ => None,
    };

    match hint {
        Some(hint) => anyhow!("{}\n{}", err, hint),
        None => anyhow!(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use quicklinks_core::seed::default_links;
    use quicklinks_core::{AllowAll, LinkEntry, MemoryOptionStore, TokenPolicy};
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn store_with(entries: &[LinkEntry]) -> LinkStore<MemoryOptionStore> {
        let store = LinkStore::new(MemoryOptionStore::new());
        store
            .save(&AllowAll, &LinkListEditor::from_entries(entries).serialize())
            .unwrap();
        store
    }

    fn abc() -> LinkStore<MemoryOptionStore> {
        store_with(&[
            LinkEntry::link("🅰", "A", "a.php"),
            LinkEntry::link("🅱", "B", "b.php"),
            LinkEntry::link("🅲", "C", "c.php"),
        ])
    }

    fn labels<S: OptionStore>(store: &LinkStore<S>) -> Vec<String> {
        store.load().into_iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_add_link() {
        let store = abc();
        add(
            &store,
            &AllowAll,
            "Tools".into(),
            "tools.php".into(),
            None,
            Some("#abc".into()),
            &quiet(),
        )
        .unwrap();

        let links = store.load();
        assert_eq!(links.len(), 4);
        assert_eq!(links[3].label, "Tools");
        assert_eq!(links[3].icon, "🔗");
        assert_eq!(links[3].color, "#abc");
        assert!(links[3].enabled);
    }

    #[test]
    fn test_add_separator() {
        let store = abc();
        add_separator(&store, &AllowAll, None, &quiet()).unwrap();
        add_separator(&store, &AllowAll, Some("─── Mine ───".into()), &quiet()).unwrap();

        let links = store.load();
        assert_eq!(links[3].label, "─── Section ───");
        assert!(links[3].is_separator());
        assert_eq!(links[4].label, "─── Mine ───");
    }

    #[test]
    fn test_remove() {
        let store = abc();
        remove(&store, &AllowAll, 2, &quiet()).unwrap();
        assert_eq!(labels(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_position_out_of_range() {
        let store = abc();
        assert!(remove(&store, &AllowAll, 0, &quiet()).is_err());
        assert!(remove(&store, &AllowAll, 4, &quiet()).is_err());
        assert_eq!(labels(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_moves() {
        let store = abc();
        move_up(&store, &AllowAll, 3, &quiet()).unwrap();
        assert_eq!(labels(&store), vec!["A", "C", "B"]);

        move_down(&store, &AllowAll, 1, &quiet()).unwrap();
        assert_eq!(labels(&store), vec!["C", "A", "B"]);

        // Boundaries are a no-op
        move_up(&store, &AllowAll, 1, &quiet()).unwrap();
        move_down(&store, &AllowAll, 3, &quiet()).unwrap();
        assert_eq!(labels(&store), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_enable_disable() {
        let store = abc();
        set_enabled(&store, &AllowAll, 2, false, &quiet()).unwrap();
        let links = store.load();
        assert!(!links[1].enabled);
        assert_eq!(links.len(), 3);

        set_enabled(&store, &AllowAll, 2, true, &quiet()).unwrap();
        assert!(store.load()[1].enabled);
    }

    #[test]
    fn test_set_field() {
        let store = abc();
        set_field(&store, &AllowAll, 1, "label", " <i>Alpha</i> ".into(), &quiet()).unwrap();
        set_field(&store, &AllowAll, 1, "color", "red".into(), &quiet()).unwrap();

        let links = store.load();
        assert_eq!(links[0].label, "Alpha");
        assert_eq!(links[0].color, "");

        assert!(set_field(&store, &AllowAll, 1, "href", "x".into(), &quiet()).is_err());
    }

    #[test]
    fn test_denied_edit_reports_hint() {
        let store = abc();
        let denied = TokenPolicy::new(true, Some("secret".into()), None);

        let err = move_up(&store, &denied, 2, &quiet()).unwrap_err();
        assert!(err.to_string().contains("--token"));
        assert_eq!(labels(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_export_then_submit() {
        let store = abc();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submission.json");

        let mut submission = LinkListEditor::from_entries(&store.load()).serialize();
        submission.order = "2,0".to_string();
        fs::write(&path, serde_json::to_string(&submission).unwrap()).unwrap();

        submit(&store, &AllowAll, &path, &quiet()).unwrap();
        assert_eq!(labels(&store), vec!["C", "A"]);
    }

    #[test]
    fn test_submit_rejects_bad_json() {
        let store = abc();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        assert!(submit(&store, &AllowAll, &path, &quiet()).is_err());
        assert_eq!(labels(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_reset() {
        let store = abc();
        reset(&store, &AllowAll, true, &quiet()).unwrap();
        assert_eq!(store.load(), default_links());

        let read_only = TokenPolicy::new(false, None, None);
        let store = abc();
        assert!(reset(&store, &read_only, true, &quiet()).is_err());
        assert_eq!(labels(&store), vec!["A", "B", "C"]);
    }
}
