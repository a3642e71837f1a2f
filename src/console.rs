//! Line-based front-end for the launcher.
//!
//! Reads one command per stdin line and prints list events as they arrive.
//! Stands in for a graphical launcher grid.

use crate::services::launcher::LauncherHandle;
use capy_apps::{LauncherError, ListEvent, ViewMode};
use log::debug;
use std::io::BufRead;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

const HELP: &str = "\
commands:
  list                                  show visible entries
  search [query]                        filter by name or id, empty to clear
  move <from> <to> <page> <page_size>   reorder within a page
  launch <id>                           start an entry
  dock add <id> | dock remove <id>      ask the dock to pin or unpin
  save                                  persist the list order
  rescan                                rescan the applications directory
  help | quit";

/// One parsed console command.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Search(String),
    Move {
        from: usize,
        to: usize,
        page: usize,
        page_size: usize,
    },
    Launch(String),
    DockAdd(String),
    DockRemove(String),
    Save,
    Rescan,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "list" | "ls" => Ok(ConsoleCommand::List),
        "search" => Ok(ConsoleCommand::Search(rest.to_string())),
        "move" => {
            let numbers = rest
                .split_whitespace()
                .map(|part| part.parse::<usize>().map_err(|_| ParseError::InvalidNumber(part.to_string())))
                .collect::<Result<Vec<_>, _>>()?;

            match numbers[..] {
                [from, to, page, page_size] => Ok(ConsoleCommand::Move {
                    from,
                    to,
                    page,
                    page_size,
                }),
                _ => Err(ParseError::Missing("<from> <to> <page> <page_size>")),
            }
        }
        "launch" => required(rest, "<id>").map(ConsoleCommand::Launch),
        "dock" => {
            let (action, id) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match action {
                "add" => required(id.trim(), "<id>").map(ConsoleCommand::DockAdd),
                "remove" => required(id.trim(), "<id>").map(ConsoleCommand::DockRemove),
                _ => Err(ParseError::Missing("add|remove")),
            }
        }
        "save" => Ok(ConsoleCommand::Save),
        "rescan" => Ok(ConsoleCommand::Rescan),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn required(value: &str, what: &'static str) -> Result<String, ParseError> {
    if value.is_empty() {
        Err(ParseError::Missing(what))
    } else {
        Ok(value.to_string())
    }
}

/// Run until stdin closes or `quit` is entered.
pub async fn run(launcher: &LauncherHandle) -> std::io::Result<()> {
    let mut lines = spawn_stdin_reader()?;
    let mut events = launcher.subscribe();
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => execute(launcher, command).await,
                    Err(e) => println!("{}", e),
                }
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => debug!("Console skipped {} list events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}

async fn execute(launcher: &LauncherHandle, command: ConsoleCommand) {
    let result = match command {
        ConsoleCommand::List => print_rows(launcher).await,
        ConsoleCommand::Search(query) => {
            launcher.search(query);
            print_rows(launcher).await
        }
        ConsoleCommand::Move {
            from,
            to,
            page,
            page_size,
        } => launcher.move_item(from, to, page, page_size).await,
        ConsoleCommand::Launch(id) => launcher.launch(id).await,
        ConsoleCommand::DockAdd(id) => {
            launcher.send_to_dock(id);
            Ok(())
        }
        ConsoleCommand::DockRemove(id) => {
            launcher.remove_from_dock(id);
            Ok(())
        }
        ConsoleCommand::Save => launcher.save().await,
        ConsoleCommand::Rescan => {
            launcher.rescan();
            Ok(())
        }
        ConsoleCommand::Help => {
            println!("{}", HELP);
            Ok(())
        }
        ConsoleCommand::Quit => Ok(()),
    };

    if let Err(e) = result {
        println!("error: {}", e);
    }
}

async fn print_rows(launcher: &LauncherHandle) -> Result<(), LauncherError> {
    let snapshot = launcher.snapshot().await?;

    for (row, item) in snapshot.rows.iter().enumerate() {
        println!("{:>4}  {:<32} {}", row, item.name, item.id);
    }
    match snapshot.mode {
        ViewMode::Normal => println!("{} entries", snapshot.rows.len()),
        ViewMode::Search => println!("{} entries matching \"{}\"", snapshot.rows.len(), snapshot.query),
    }
    Ok(())
}

fn print_event(event: &ListEvent) {
    match event {
        ListEvent::Inserted { id, .. } => println!("+ {}", id),
        ListEvent::Removed { id, .. } => println!("- {}", id),
        ListEvent::Moved { from, to } => println!("moved {} -> {}", from, to),
        ListEvent::Launched { id } => println!("launching {}", id),
        ListEvent::Refreshed => println!("list refreshed"),
        ListEvent::Reset | ListEvent::LayoutChanged => {}
    }
}

/// Forward stdin lines from a plain thread.
fn spawn_stdin_reader() -> std::io::Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("list"), Ok(ConsoleCommand::List));
        assert_eq!(parse_command("  save "), Ok(ConsoleCommand::Save));
        assert_eq!(parse_command("rescan"), Ok(ConsoleCommand::Rescan));
        assert_eq!(parse_command("quit"), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_search_keeps_spaces() {
        assert_eq!(
            parse_command("search web browser"),
            Ok(ConsoleCommand::Search("web browser".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(ConsoleCommand::Search(String::new())));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_command("move 0 2 1 5"),
            Ok(ConsoleCommand::Move {
                from: 0,
                to: 2,
                page: 1,
                page_size: 5
            })
        );
        assert_eq!(
            parse_command("move 0 2"),
            Err(ParseError::Missing("<from> <to> <page> <page_size>"))
        );
        assert_eq!(
            parse_command("move 0 x 1 5"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn test_parse_launch_and_dock() {
        let id = "/usr/share/applications/firefox.desktop";
        assert_eq!(parse_command(&format!("launch {}", id)), Ok(ConsoleCommand::Launch(id.to_string())));
        assert_eq!(parse_command(&format!("dock add {}", id)), Ok(ConsoleCommand::DockAdd(id.to_string())));
        assert_eq!(
            parse_command(&format!("dock remove {}", id)),
            Ok(ConsoleCommand::DockRemove(id.to_string()))
        );
        assert_eq!(parse_command("launch"), Err(ParseError::Missing("<id>")));
        assert_eq!(parse_command("dock pin x"), Err(ParseError::Missing("add|remove")));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("fly"), Err(ParseError::Unknown("fly".to_string())));
    }
}
