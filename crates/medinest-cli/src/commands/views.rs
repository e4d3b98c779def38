use colored::Colorize;
use medinest_core::navigation::View;

use super::utils::access_label;

pub fn run() {
    println!(
        "{:<22} {:<24} {}",
        "VIEW".bold(),
        "TITLE".bold(),
        "ACCESS".bold()
    );
    for view in View::all() {
        println!(
            "{:<22} {:<24} {}",
            view.as_str(),
            view.title(),
            access_label(view)
        );
    }
}
