//! Interactive portal session.
//!
//! Navigation state lives only as long as the shell, exactly like a browser
//! tab; the session itself goes through the configured storage.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use medinest_core::navigation::View;
use medinest_core::session::UserType;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context as LineContext, Editor, Helper};

use super::utils::{
    Attribute, access_label, describe_view, parse_attribute, print_history, print_state,
    user_from_attributes,
};
use super::{Context, Portal};

const COMMANDS: &[&str] = &[
    "go", "back", "login", "logout", "update", "status", "history", "views", "help", "quit",
];

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Go(View),
    Back,
    Login(UserType, Vec<Attribute>),
    Logout,
    Update(Vec<Attribute>),
    Status,
    History,
    Views,
    Help,
    Quit,
}

fn parse_attributes<'a>(args: impl Iterator<Item = &'a str>) -> Result<Vec<Attribute>, String> {
    args.map(parse_attribute).collect()
}

fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let parsed = match command {
        "go" | "open" => {
            let target = words.next().ok_or("usage: go <view>")?;
            ShellCommand::Go(target.parse::<View>().map_err(|e| e.to_string())?)
        }
        "back" => ShellCommand::Back,
        "login" => {
            let user_type = words
                .next()
                .ok_or("usage: login <patient|doctor> [key=value ...]")?
                .parse::<UserType>()
                .map_err(|e| e.to_string())?;
            ShellCommand::Login(user_type, parse_attributes(words)?)
        }
        "logout" => ShellCommand::Logout,
        "update" => {
            let attributes = parse_attributes(words)?;
            if attributes.is_empty() {
                return Err("usage: update key=value [key=value ...]".to_string());
            }
            ShellCommand::Update(attributes)
        }
        "status" => ShellCommand::Status,
        "history" => ShellCommand::History,
        "views" => ShellCommand::Views,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(parsed))
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  go <view>                       navigate to a screen");
    println!("  back                            return to the previous screen");
    println!("  login <patient|doctor> [k=v..]  sign in with profile attributes");
    println!("  logout                          sign out");
    println!("  update k=v [k=v..]              merge attributes into the profile");
    println!("  status | history | views        inspect the portal");
    println!("  quit                            leave the shell");
}

/// Runs one command. Returns `false` when the shell should exit.
fn execute(portal: &mut Portal, command: ShellCommand) -> bool {
    let before = portal.current_view();

    match command {
        ShellCommand::Go(view) => {
            portal.navigate_to(view);
            if portal.current_view() != view {
                println!(
                    "{} {} is not available, redirected",
                    "!".yellow(),
                    view.as_str()
                );
            }
        }
        ShellCommand::Back => {
            portal.go_back();
        }
        ShellCommand::Login(user_type, attributes) => {
            match portal.login(user_from_attributes(attributes), user_type) {
                Ok(()) => println!("{}", "Signed in".green()),
                Err(e) => eprintln!("{} {}", "Login failed:".red(), e),
            }
        }
        ShellCommand::Logout => match portal.logout() {
            Ok(()) => println!("{}", "Signed out".green()),
            Err(e) => eprintln!("{} {}", "Logout failed:".red(), e),
        },
        ShellCommand::Update(attributes) => {
            match portal.update_user(user_from_attributes(attributes)) {
                Ok(()) => println!("{}", "Profile updated".green()),
                Err(e) => eprintln!("{} {}", "Update failed:".red(), e),
            }
        }
        ShellCommand::Status => print_state(portal),
        ShellCommand::History => print_history(portal),
        ShellCommand::Views => {
            for view in View::all() {
                println!("  {:<22} {}", view.as_str(), access_label(view));
            }
        }
        ShellCommand::Help => print_help(),
        ShellCommand::Quit => return false,
    }

    if portal.current_view() != before {
        println!("{} {}", "→".bright_blue(), describe_view(portal));
        if portal.current_view().is_feature() {
            println!("  {}", "type 'back' to return".dimmed());
        }
    }
    true
}

/// Completes command names, then view identifiers after `go`.
#[derive(Clone)]
struct ShellHelper {
    views: Vec<&'static str>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            views: View::all().map(|view| view.as_str()).collect(),
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<&'static str>) {
        match line.split_once(' ') {
            None => (
                0,
                COMMANDS
                    .iter()
                    .copied()
                    .filter(|cmd| cmd.starts_with(line))
                    .collect(),
            ),
            Some(("go", partial)) if !partial.contains(' ') => (
                line.len() - partial.len(),
                self.views
                    .iter()
                    .copied()
                    .filter(|view| view.starts_with(partial))
                    .collect(),
            ),
            Some(("login", partial)) if !partial.contains(' ') => (
                line.len() - partial.len(),
                ["patient", "doctor"]
                    .into_iter()
                    .filter(|t| t.starts_with(partial))
                    .collect(),
            ),
            _ => (0, Vec::new()),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &LineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &LineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, candidates) = self.candidates(line);
        let typed = &line[start..];
        match candidates.as_slice() {
            [only] if only.len() > typed.len() => Some(only[typed.len()..].to_string()),
            _ => None,
        }
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((command, rest)) if COMMANDS.contains(&command) => {
                Owned(format!("{} {}", command.bright_cyan(), rest))
            }
            None if COMMANDS.contains(&line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for ShellHelper {}

pub fn run(context: &Context) -> Result<()> {
    let mut portal = context.open_portal()?;

    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new()));

    println!("{}", "MediNest portal shell. Type 'help' for commands.".bold());
    print_state(&portal);

    loop {
        let prompt = format!("{}> ", portal.current_view().as_str());
        match editor.readline(&prompt) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if !execute(&mut portal, command) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(message) => eprintln!("{} {}", "Error:".red(), message),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", "Bye".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medinest_application::PortalApp;
    use medinest_core::storage::MemoryStorage;
    use serde_json::Value;

    fn portal() -> Portal {
        PortalApp::start(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("go ai-assistant").unwrap(),
            Some(ShellCommand::Go(View::AiAssistant))
        );
        assert_eq!(parse_command("back").unwrap(), Some(ShellCommand::Back));
        assert_eq!(
            parse_command("login doctor name=Bob").unwrap(),
            Some(ShellCommand::Login(
                UserType::Doctor,
                vec![("name".to_string(), Value::String("Bob".to_string()))]
            ))
        );
        assert_eq!(parse_command("exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("go billing").unwrap_err().contains("billing"));
        assert!(parse_command("go").is_err());
        assert!(parse_command("login admin").is_err());
        assert!(parse_command("update").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_execute_session_flow() {
        let mut portal = portal();
        assert!(execute(&mut portal, ShellCommand::Go(View::Fitness)));
        assert_eq!(portal.current_view(), View::Home);

        execute(&mut portal, ShellCommand::Login(UserType::Patient, Vec::new()));
        assert_eq!(portal.current_view(), View::PatientDashboard);

        execute(&mut portal, ShellCommand::Go(View::Fitness));
        execute(&mut portal, ShellCommand::Back);
        assert_eq!(portal.current_view(), View::PatientDashboard);

        assert!(!execute(&mut portal, ShellCommand::Quit));
    }

    #[test]
    fn test_completion_candidates() {
        let helper = ShellHelper::new();
        assert_eq!(helper.candidates("lo"), (0, vec!["login", "logout"]));
        assert_eq!(
            helper.candidates("go medicine-r"),
            (3, vec!["medicine-reminders"])
        );
        assert_eq!(helper.candidates("login d"), (6, vec!["doctor"]));
        assert_eq!(helper.candidates("update name="), (0, Vec::new()));
    }
}
