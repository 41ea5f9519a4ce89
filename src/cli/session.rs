//! Line-driven front end for [`App`].
//!
//! While listing:
//!
//! ```text
//! list | new | open <id> | delete <id> | help | quit
//! ```
//!
//! While editing:
//!
//! ```text
//! show | name <text> | content <text> | append <text> | save | help | quit
//! ```

use std::io::{BufRead, Write};

use crate::app::{App, ListAction, View};
use crate::entity::NoteId;
use crate::error::Result;
use crate::storage::KeyValueStore;

const LIST_HELP: &str = "Commands: list, new, open <id>, delete <id>, help, quit";
const EDIT_HELP: &str =
    "Commands: show, name <text>, content <text>, append <text>, save, help, quit";

enum Flow {
    Continue,
    Quit,
}

/// Run commands from `input` until `quit` or end of input.
///
/// A failed command is reported on `out` and the session carries on in the
/// same state.
pub fn run_session<S, R, W>(app: &mut App<S>, input: R, mut out: W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    print_view(app, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let result = match app.view() {
            View::Listing => listing_command(app, cmd, arg, &mut out),
            View::Editing(_) => editing_command(app, cmd, arg, &mut out),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }

    out.flush()?;
    Ok(())
}

fn listing_command<S: KeyValueStore, W: Write>(
    app: &mut App<S>,
    cmd: &str,
    arg: &str,
    out: &mut W,
) -> Result<Flow> {
    match cmd {
        "list" | "ls" => print_view(app, out)?,
        "new" => {
            app.activate(ListAction::Create)?;
            print_view(app, out)?;
        }
        "open" | "select" if !arg.is_empty() => {
            app.activate(ListAction::Select(NoteId::from(arg)))?;
            print_view(app, out)?;
        }
        "delete" | "rm" if !arg.is_empty() => {
            app.activate(ListAction::Delete(NoteId::from(arg)))?;
            print_view(app, out)?;
        }
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => writeln!(out, "{}", LIST_HELP)?,
        _ => writeln!(out, "Unknown command '{}'. {}", cmd, LIST_HELP)?,
    }
    Ok(Flow::Continue)
}

fn editing_command<S: KeyValueStore, W: Write>(
    app: &mut App<S>,
    cmd: &str,
    arg: &str,
    out: &mut W,
) -> Result<Flow> {
    match cmd {
        "show" => print_view(app, out)?,
        "name" => app.edit_name(arg)?,
        "content" => app.edit_content(arg)?,
        "append" => {
            let mut content = app
                .editor()
                .map(|e| e.content().to_string())
                .unwrap_or_default();
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(arg);
            app.edit_content(content)?;
        }
        "save" => {
            app.save()?;
            print_view(app, out)?;
        }
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => writeln!(out, "{}", EDIT_HELP)?,
        _ => writeln!(out, "Unknown command '{}'. {}", cmd, EDIT_HELP)?,
    }
    Ok(Flow::Continue)
}

fn print_view<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    match app.editor() {
        Some(editor) => {
            writeln!(out, "Editing {}", editor.id())?;
            writeln!(out, "Name: {}", editor.name())?;
            writeln!(out, "Content:\n{}", editor.content())?;
        }
        None => {
            let summaries = app.summaries();
            if summaries.is_empty() {
                writeln!(out, "No notes found.")?;
            } else {
                writeln!(out, "Notes:")?;
                for s in summaries {
                    writeln!(out, "  {} {} | {}", s.id, s.name, s.preview.replace('\n', " "))?;
                }
            }
        }
    }
    Ok(())
}
