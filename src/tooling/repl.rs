//! Interactive practice prompt
//!
//! Each line the learner types becomes one session intent. Items are addressed by their
//! name in the current folder, the same way they would be clicked in a file manager.

use crate::error::ApiError;
use crate::session::{Session, SessionView};
use crate::tooling::format::{format_breadcrumb, format_view_text};
use crate::types::NodeId;
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  ls                      show the current folder
  cd <folder>             open a folder (cd .. goes back)
  back                    go back to the parent folder
  mkdir [name]            create a folder (named \"New folder\" if no name is given)
  touch [name]            create a file
  rename <item> <name>    rename an item
  rm <item>               delete an item
  mv <item> <folder>      move an item into a folder (.. for the parent folder)
  find <name>             show where an item is
  next                    continue after a completed level
  restart                 start the current level again
  restart-game            start over from the first level
  help                    show this help
  quit                    leave
Quote names that contain spaces: rename \"New folder\" School";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    List,
    Enter(String),
    Back,
    MakeFolder(Option<String>),
    MakeFile(Option<String>),
    Rename { item: String, name: String },
    Delete(String),
    Move { item: String, target: String },
    Find(String),
    Next,
    RestartLevel,
    RestartGame,
    Help,
    Quit,
}

/// What the prompt should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    Continue(String),
    Quit,
}

impl ReplCommand {
    /// Parse one line. `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let words = split_words(line)?;
        let Some((command, args)) = words.split_first() else {
            return Ok(None);
        };
        let joined = || {
            if args.is_empty() {
                None
            } else {
                Some(args.join(" "))
            }
        };
        let one = |usage: &str| -> Result<String, String> {
            match args {
                [arg] => Ok(arg.clone()),
                _ => Err(format!("Usage: {}", usage)),
            }
        };
        let parsed = match command.to_ascii_lowercase().as_str() {
            "ls" | "dir" => ReplCommand::List,
            "cd" | "open" => {
                let folder = one("cd <folder>")?;
                if folder == ".." {
                    ReplCommand::Back
                } else {
                    ReplCommand::Enter(folder)
                }
            }
            "back" | ".." => ReplCommand::Back,
            "mkdir" => ReplCommand::MakeFolder(joined()),
            "touch" => ReplCommand::MakeFile(joined()),
            "rename" | "ren" => match args {
                [item, name] => ReplCommand::Rename {
                    item: item.clone(),
                    name: name.clone(),
                },
                _ => return Err("Usage: rename <item> <new name>".to_string()),
            },
            "rm" | "del" | "delete" => ReplCommand::Delete(one("rm <item>")?),
            "mv" | "move" => match args {
                [item, target] => ReplCommand::Move {
                    item: item.clone(),
                    target: target.clone(),
                },
                _ => return Err("Usage: mv <item> <folder>".to_string()),
            },
            "find" | "where" => ReplCommand::Find(joined().ok_or("Usage: find <name>")?),
            "next" => ReplCommand::Next,
            "restart" => ReplCommand::RestartLevel,
            "restart-game" => ReplCommand::RestartGame,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => return Err(format!("Unknown command: {} (type 'help')", other)),
        };
        Ok(Some(parsed))
    }
}

/// Split on whitespace, keeping double-quoted runs together
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;
    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if in_quotes {
        return Err("Unclosed quote".to_string());
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

fn lookup(view: &SessionView, name: &str) -> Result<NodeId, String> {
    view.child_named(name)
        .map(|n| n.id.clone())
        .ok_or_else(|| format!("No item called \"{}\" here", name))
}

fn lookup_target(view: &SessionView, name: &str) -> Result<NodeId, String> {
    if name == ".." {
        let depth = view.navigation.len();
        return if depth >= 2 {
            Ok(view.navigation[depth - 2].clone())
        } else {
            Err("Already at the top folder".to_string())
        };
    }
    lookup(view, name)
}

/// Create a node and commit its name right away, as a file manager's inline edit would.
fn create_named(session: &Session, view: SessionView, name: Option<String>) -> SessionView {
    let Some(id) = view.rename_target.clone() else {
        return view;
    };
    let name = match name {
        Some(name) => name,
        None => match view.nodes.get(&id) {
            Some(node) => node.name.clone(),
            None => return view,
        },
    };
    session.commit_rename(&id, &name)
}

/// Apply one command to the session and render the result.
pub fn execute(session: &Session, command: ReplCommand) -> Result<ReplOutcome, ApiError> {
    debug!(command = ?command, "Prompt command");
    let current = session.view();
    let view = match command {
        ReplCommand::Quit => return Ok(ReplOutcome::Quit),
        ReplCommand::Help => return Ok(ReplOutcome::Continue(HELP.to_string())),
        ReplCommand::List => current,
        ReplCommand::Find(name) => {
            let found = current
                .nodes
                .find_by_name(&name)
                .map(|node| current.nodes.path_of(&node.id).join(" / "))
                .unwrap_or_else(|| format!("Nothing called \"{}\" anywhere", name));
            return Ok(ReplOutcome::Continue(found));
        }
        ReplCommand::Back => session.go_back(),
        ReplCommand::Enter(name) => match lookup(&current, &name) {
            Ok(id) => session.enter_folder(&id),
            Err(msg) => return Ok(ReplOutcome::Continue(msg)),
        },
        ReplCommand::MakeFolder(name) => create_named(session, session.create_folder(), name),
        ReplCommand::MakeFile(name) => create_named(session, session.create_file(), name),
        ReplCommand::Rename { item, name } => match lookup(&current, &item) {
            Ok(id) => {
                session.start_rename(&id);
                session.commit_rename(&id, &name)
            }
            Err(msg) => return Ok(ReplOutcome::Continue(msg)),
        },
        ReplCommand::Delete(item) => match lookup(&current, &item) {
            Ok(id) => session.delete(&id),
            Err(msg) => return Ok(ReplOutcome::Continue(msg)),
        },
        ReplCommand::Move { item, target } => {
            match (lookup(&current, &item), lookup_target(&current, &target)) {
                (Ok(id), Ok(target)) => session.move_node(&id, &target),
                (Err(msg), _) | (_, Err(msg)) => return Ok(ReplOutcome::Continue(msg)),
            }
        }
        ReplCommand::Next => match session.advance_after_level_complete() {
            Ok(view) => view,
            Err(ApiError::InvalidTransition(_)) => {
                return Ok(ReplOutcome::Continue(
                    "Finish the current level first".to_string(),
                ))
            }
            Err(e) => return Err(e),
        },
        ReplCommand::RestartLevel => session.restart_level(),
        ReplCommand::RestartGame => session.restart_game(),
    };
    Ok(ReplOutcome::Continue(format_view_text(&view)))
}

/// Read commands until the learner quits or input ends.
pub fn run(session: &Session) -> Result<(), ApiError> {
    use dialoguer::Input;

    println!("{}", format_view_text(&session.view()));
    println!("Type 'help' for the list of commands.");
    loop {
        let prompt = format_breadcrumb(&session.view());
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApiError::TerminalError(e.to_string()))?;

        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                println!("{}", format_view_text(&session.view()));
                continue;
            }
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        match execute(session, command)? {
            ReplOutcome::Continue(output) => println!("{}", output),
            ReplOutcome::Quit => break,
        }
    }
    info!("Practice session ended");
    session.shutdown();
    Ok(())
}
