use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::{App, EditorController, ListController};
use crate::config::Config;
use crate::entity::{Note, NoteId};
use crate::error::{NoteboxError, Result};
use crate::storage::{FileKv, NoteStore, STORAGE_FILE};
use crate::warnings::{check_usage, format_warning};

use super::session::run_session;

const NOTEBOX_DIR: &str = ".notebox";

#[derive(Serialize)]
struct NoteJson<'a> {
    id: &'a NoteId,
    #[serde(flatten)]
    note: &'a Note,
}

/// Find the project root by looking for .notebox/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(NOTEBOX_DIR).is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_store(root: &Path) -> Result<(NoteStore<FileKv>, Config)> {
    let notebox_dir = root.join(NOTEBOX_DIR);
    if !notebox_dir.is_dir() {
        return Err(NoteboxError::NotInitialized);
    }

    let config = Config::load(&notebox_dir)?;
    let kv = FileKv::open(notebox_dir.join(STORAGE_FILE), config.quota_bytes)?;
    tracing::debug!(path = %kv.path().display(), "opened storage");

    Ok((NoteStore::with_config(kv, &config), config))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn print_usage_warnings(store: &NoteStore<FileKv>) {
    for warning in check_usage(store.kv().used_bytes(), store.kv().quota_bytes()) {
        eprintln!("{}", format_warning(&warning));
    }
}

fn print_note(id: &NoteId, note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&NoteJson { id, note })?);
    } else {
        println!("Note {}", id);
        println!("Name: {}", note.name);
        if !note.content.is_empty() {
            println!("\n{}", note.content);
        }
    }
    Ok(())
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;
    let notebox_dir = root.join(NOTEBOX_DIR);

    if notebox_dir.exists() {
        return Err(NoteboxError::AlreadyInitialized);
    }

    fs::create_dir_all(&notebox_dir)?;
    FileKv::create(notebox_dir.join(STORAGE_FILE))?;
    Config::default().save(&notebox_dir)?;

    println!("Initialized notebox project in {}", root.display());
    Ok(())
}

pub fn handle_list(json: bool) -> Result<()> {
    let root = find_project_root();
    let (mut store, config) = open_store(&root)?;

    let mut list = ListController::new(config.preview_chars);
    let summaries = list.refresh(&mut store);

    if json {
        println!("{}", serde_json::to_string_pretty(summaries)?);
    } else if summaries.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for s in summaries {
            println!("  {} {}", s.id, s.name);
            if !s.preview.is_empty() {
                println!("      {}", s.preview.replace('\n', " "));
            }
        }
    }

    Ok(())
}

pub fn handle_new(
    name: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let root = find_project_root();
    let (mut store, _config) = open_store(&root)?;

    let content = if stdin { Some(read_stdin()?) } else { content };

    let id = store.create()?;
    let mut editor = EditorController::open(&mut store, id);
    if let Some(name) = name {
        editor.set_name(&mut store, name)?;
    }
    if let Some(content) = content {
        editor.set_content(&mut store, content)?;
    }

    let note = editor.note();
    let id = editor.save();

    if json {
        print_note(&id, &note, true)?;
    } else {
        println!("Created note {} - {}", id, note.name);
    }
    print_usage_warnings(&store);

    Ok(())
}

pub fn handle_get(id: String, json: bool) -> Result<()> {
    let root = find_project_root();
    let (mut store, _config) = open_store(&root)?;

    let id = NoteId::from(id);
    if !store.contains(&id) {
        eprintln!("Note {} not found, showing a blank note.", id);
    }
    let note = store.get(&id);

    print_note(&id, &note, json)
}

pub fn handle_edit(
    id: String,
    name: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let root = find_project_root();
    let (mut store, _config) = open_store(&root)?;

    let content = if stdin { Some(read_stdin()?) } else { content };
    if name.is_none() && content.is_none() {
        eprintln!("Nothing to change. Use --name, --content or --stdin.");
        return Ok(());
    }

    let id = NoteId::from(id);
    if !store.contains(&id) {
        tracing::info!(id = %id, "editing absent note, starting from a blank note");
    }

    let mut editor = EditorController::open(&mut store, id);
    if let Some(name) = name {
        editor.set_name(&mut store, name)?;
    }
    if let Some(content) = content {
        editor.set_content(&mut store, content)?;
    }

    let note = editor.note();
    let id = editor.save();

    if json {
        print_note(&id, &note, true)?;
    } else {
        println!("Updated note {} - {}", id, note.name);
    }
    print_usage_warnings(&store);

    Ok(())
}

pub fn handle_delete(id: String, force: bool) -> Result<()> {
    let root = find_project_root();
    let (mut store, _config) = open_store(&root)?;

    let id = NoteId::from(id);
    let note = match store.load_all().get(&id) {
        Some(note) => note.clone(),
        None => {
            println!("Note {} not found, nothing to delete.", id);
            return Ok(());
        }
    };

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", id, note.name);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NoteboxError::ConfirmationRequired(
                "use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    store.delete(&id)?;

    println!("Deleted note {} - {}", id, note.name);
    Ok(())
}

pub fn handle_session() -> Result<()> {
    let root = find_project_root();
    let (store, config) = open_store(&root)?;

    let mut app = App::new(store, config.preview_chars);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut app, stdin.lock(), stdout.lock())?;

    print_usage_warnings(app.store());
    Ok(())
}
