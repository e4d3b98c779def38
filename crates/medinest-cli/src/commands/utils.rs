use colored::Colorize;
use medinest_core::navigation::{Access, View};
use medinest_core::session::User;
use serde_json::Value;

use super::Portal;

/// A `key=value` profile attribute.
pub type Attribute = (String, Value);

/// Parses `key=value`. Values that are valid JSON (`42`, `true`,
/// `{"a":1}`) keep their type; anything else is stored as a string.
pub fn parse_attribute(raw: &str) -> Result<Attribute, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn user_from_attributes(attributes: Vec<Attribute>) -> User {
    attributes
        .into_iter()
        .fold(User::new(), |user, (key, value)| user.with_attribute(key, value))
}

pub fn build_user(
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    attributes: Vec<Attribute>,
) -> User {
    let mut user = user_from_attributes(attributes);
    for (key, value) in [("id", id), ("name", name), ("email", email)] {
        if let Some(value) = value {
            user.set_attribute(key, value);
        }
    }
    user
}

pub fn access_label(view: View) -> colored::ColoredString {
    match view.access() {
        Access::Entry => "entry".cyan(),
        Access::Public => "public".green(),
        Access::Protected => "protected".yellow(),
    }
}

/// One-line description of where the portal currently is.
pub fn describe_view(portal: &Portal) -> String {
    let view = portal.current_view();
    format!("{} ({})", view.title().bold(), view.as_str().dimmed())
}

pub fn print_state(portal: &Portal) {
    println!("{} {}", "Screen:".bright_blue(), describe_view(portal));

    match (portal.user(), portal.user_type()) {
        (Some(user), Some(user_type)) if portal.is_authenticated() => {
            let name = user.name().or(user.email()).unwrap_or("(unnamed)");
            println!(
                "{} {} as {}",
                "Signed in:".bright_blue(),
                name.bold(),
                user_type.to_string().cyan()
            );
        }
        _ => println!("{} {}", "Signed in:".bright_blue(), "no".dimmed()),
    }

    if let Some(previous) = portal.navigation().previous_view() {
        println!("{} {}", "Back to:".bright_blue(), previous.as_str().dimmed());
    }
}

pub fn print_history(portal: &Portal) {
    if portal.history().is_empty() {
        println!("{}", "History is empty".dimmed());
        return;
    }
    for (index, view) in portal.history().iter().enumerate().rev() {
        println!("  {:>2}. {}", index + 1, view.as_str());
    }
}
