//! Terminal reports for exercise instructions, verification and solutions.

use std::path::Path;

use console::Style;

use crate::exercise::{Hint, Solution, TaskResult};
use crate::format::format;

const ARROW: &str = "\u{2192}";
const CHECK_MARK: &str = "\u{2705}";
const CROSS_MARK: &str = "\u{274c}";

fn heading() -> Style {
    Style::new().bold().underlined()
}

/// Indents continuation lines so they align under the arrow marker.
fn arrow_lines(text: &str) -> String {
    text.replace('\n', "\n     ")
}

/// Prints the full instruction block for one exercise.
pub fn print_exercise(id: &str, topic: &str, description: &str, tasks: &[String], hints: &[Hint]) {
    let banner = Style::new().yellow().bright();
    let id_mark = Style::new().blue().bold().underlined();
    println!(
        "{}",
        banner.apply_to(format!(
            "=======================================================================\n\
             =========================== {} ==============================\n\
             =======================================================================\n",
            id_mark.apply_to(format!("Exercise #{id}"))
        ))
    );

    println!("{}", heading().apply_to("Exercise topic"));
    println!("{}\n", format(topic));

    println!("{}", heading().apply_to("Description"));
    println!("{}\n", format(description));

    println!(
        "{}",
        heading().apply_to("To complete this exercise you need to do the following tasks:")
    );
    for task in tasks {
        println!("  {ARROW} {}", arrow_lines(&format(task)));
    }

    if !hints.is_empty() {
        println!("{}", heading().italic().apply_to("\nHints:"));
        for hint in hints {
            println!("  {ARROW} {}", arrow_lines(&render_hint(hint)));
        }
    }
    println!();
}

fn render_hint(hint: &Hint) -> String {
    let mut parts = Vec::new();
    if let Some(text) = &hint.link_text {
        let cmd = Style::new().green().bright().italic();
        let url = hint.link_url.as_deref().unwrap_or("");
        parts.push(format!(
            "{} {}",
            cmd.apply_to(format(text)),
            Style::new().dim().apply_to(format!("({url})"))
        ));
    }
    if let Some(description) = hint.description.as_deref().filter(|d| !d.is_empty()) {
        parts.push(
            Style::new()
                .italic()
                .apply_to(format(description))
                .to_string(),
        );
    }
    parts.join(" ").trim().to_string()
}

/// Prints the pass/fail report for one exercise's check run.
pub fn print_results(id: &str, results: &[TaskResult]) {
    println!(
        "{}",
        Style::new()
            .yellow()
            .bright()
            .bold()
            .underlined()
            .apply_to(format!("Verification results for exercise #{id}:"))
    );
    for result in results {
        if result.passed {
            println!(
                "  {CHECK_MARK}  {}",
                Style::new().green().apply_to(format(&result.text))
            );
        } else {
            let details = result
                .failure_details
                .as_deref()
                .map(|details| {
                    Style::new()
                        .white()
                        .italic()
                        .apply_to(format!("({})", format(details)))
                        .to_string()
                })
                .unwrap_or_default();
            println!(
                "  {CROSS_MARK}  {} {}",
                Style::new().red().bright().apply_to(format(&result.text)),
                details
            );
        }
    }
    println!();
}

/// Prints the worked solution steps for one exercise.
pub fn print_solutions(id: &str, solutions: &[Solution]) {
    println!(
        "{}",
        Style::new()
            .yellow()
            .bright()
            .bold()
            .underlined()
            .apply_to(format!("Possible solution for exercise #{id}:"))
    );
    for step in solutions {
        let command = step
            .command
            .as_deref()
            .map(|command| {
                format!(
                    "{} - ",
                    Style::new().blue().bright().italic().apply_to(command)
                )
            })
            .unwrap_or_default();
        let text = format!(
            "{command}{}",
            Style::new().green().apply_to(format(&step.description))
        );
        println!("  {ARROW} {}", arrow_lines(&text));
    }
    println!();
}

/// Prints the guidance shown when `start` finds the sandbox already there.
pub fn print_already_started(id: &str) {
    let red = Style::new().red().bright();
    let cmd = Style::new().green().italic();
    println!(
        "\n{}\n",
        red.apply_to(format!(
            ">>> The exercise #{id} is already in progress <<<"
        ))
    );
    println!("{}", heading().apply_to("You can use:"));
    println!(
        " - {} command to reset the state and start over",
        cmd.apply_to("clean")
    );
    println!(
        " - {} command to just print the exercise's details again",
        cmd.apply_to("print")
    );
    println!();
}

/// Prints the folder-removal notice emitted by `clean`.
pub fn print_removing_folder(folder: &Path) {
    println!(
        "{}",
        Style::new()
            .italic()
            .apply_to(format!(" >> removing folder {}", folder.display()))
    );
}
