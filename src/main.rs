//! Workshop CLI.
//!
//! Resolves an exercise id, dispatches to the chosen lifecycle operation
//! and reports fatal errors through the process exit code.

use clap::{Parser, Subcommand};
use console::Style;
use futures::future::join_all;

use git_workshop::error::{Error, Result};
use git_workshop::exercise::Exercise;
use git_workshop::exercises;
use git_workshop::format::format;

const WELCOME: &str = r#"
  ____ _ _      __        __         _        _
 / ___(_) |_    \ \      / /__  _ __| | _____| |__   ___  _ __
| |  _| | __|    \ \ /\ / / _ \| '__| |/ / __| '_ \ / _ \| '_ \
| |_| | | |_      \ V  V / (_) | |  |   <\__ \ | | | (_) | |_) |
 \____|_|\__|      \_/\_/ \___/|_|  |_|\_\___/_| |_|\___/| .__/
                                                         |_|
"#;

#[derive(Parser)]
#[command(
    name = "gw",
    version,
    about = "Interactive Git workshop with disposable sandbox repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// An exercise selector: a 1-based number or the literal `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    All,
    Id(usize),
}

fn parse_target(value: &str) -> std::result::Result<Target, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(Target::All);
    }
    value
        .parse::<usize>()
        .map(Target::Id)
        .map_err(|_| format!("expected an exercise number or 'all', got '{value}'"))
}

#[derive(Subcommand)]
enum Command {
    /// Start an exercise - pass the exercise number as a parameter.
    Start { exercise: usize },
    /// Clean up an exercise and start it over.
    Restart { exercise: usize },
    /// Check an exercise - prints the results and explanations for failed tasks.
    Check { exercise: usize },
    /// Show a possible solution for an exercise.
    Solution { exercise: usize },
    /// Clean up after an exercise (delete its folder); accepts `all`.
    Clean {
        #[arg(value_parser = parse_target)]
        exercise: Target,
    },
    /// Print exercise details; accepts `all`, or no argument for the listing.
    Print {
        #[arg(value_parser = parse_target)]
        exercise: Option<Target>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{:?}", Error::from(e));
            std::process::exit(1);
        }
    };
    let registry = exercises::build_all(&root);

    if let Err(e) = run(cli, &registry).await {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, registry: &[Exercise]) -> Result<()> {
    let Some(command) = cli.command else {
        print_welcome(registry);
        return Ok(());
    };

    match command {
        Command::Start { exercise } => {
            resolve(registry, exercise)?.start().await?;
        }
        Command::Restart { exercise } => {
            resolve(registry, exercise)?.restart().await?;
        }
        Command::Check { exercise } => {
            resolve(registry, exercise)?.check().await?;
        }
        Command::Solution { exercise } => {
            resolve(registry, exercise)?.print_solution();
        }
        Command::Clean { exercise } => match exercise {
            Target::All => {
                for outcome in join_all(registry.iter().map(Exercise::clean)).await {
                    outcome?;
                }
            }
            Target::Id(id) => resolve(registry, id)?.clean().await?,
        },
        Command::Print { exercise } => match exercise {
            None => print_listing(registry),
            Some(Target::All) => {
                for exercise in registry {
                    exercise.print_details();
                }
            }
            Some(Target::Id(id)) => resolve(registry, id)?.print_details(),
        },
    }
    Ok(())
}

fn resolve(registry: &[Exercise], id: usize) -> Result<&Exercise> {
    id.checked_sub(1)
        .and_then(|index| registry.get(index))
        .ok_or(Error::UnknownExercise {
            id,
            max: registry.len(),
        })
}

fn print_listing(registry: &[Exercise]) {
    println!("{}", format("title[Exercises]:"));
    let id_style = Style::new().green().bright().underlined();
    let tldr_style = Style::new().cyan().bright().italic();
    for exercise in registry {
        let pad = if exercise.id().len() > 1 { "" } else { " " };
        println!(
            "  - Exercise {}  {pad}- {}",
            id_style.apply_to(exercise.id()),
            tldr_style.apply_to(exercise.tldr())
        );
    }
}

fn print_welcome(registry: &[Exercise]) {
    println!("{}", Style::new().cyan().bright().apply_to(WELCOME));
    println!(
        "{}",
        format(
            "title[Intro]:\n\
             The workshop consists of a few exercises. They are independent and can be executed in any order,\n\
             though they are provided in some logical order so it's recommended to do them in that order.\n\
             When starting an exercise, a new sub-folder will be created in the current folder for it,\n\
             so it's recommended to run this workshop in a dedicated folder - you can create one in your home directory.\n\
             This command will create a folder in your home dir and take you there:\n\n\
             \x20  cmd[cd ~ && mkdir git-workshop && cd git-workshop]\n\n\
             title[Commands]:\n\
             There are a few commands available in this workshop. Most of the commands expect an opt[N] argument - the number of an exercise.\n\
             italic[Basic commands]:\n\
             \x20 - cmd[gw print]        - print the list of available exercises.\n\
             \x20 - cmd[gw start <N>]    - starts an exercise. It will set up the environment (folder) for the exercise and print out the instructions.\n\
             \x20 - cmd[gw check <N>]    - checks the exercise execution. It will print out the results and explanations for failed tasks.\n\
             \x20 - cmd[gw solution <N>] - prints out a possible solution for the exercise.\n\n\
             title[Flow]:\n\
             \x20  - Run cmd[gw start 1].\n\
             \x20  - Read the instructions and execute the listed tasks.\n\
             \x20    - italic[It is convenient to have 2 terminals open] - in the first you run the cmd[gw] commands,\n\
             \x20      in the 2nd open the exercise folder and perform the tasks.\n\
             \x20  - Once ready, run cmd[gw check 1] and see the results.\n\
             \x20  - You can fix failed tasks if needed and run cmd[gw check 1] again as many times as needed.\n\
             \x20  - Run cmd[gw solution 1] to see a possible solution.\n\
             \x20  - Start all over again with the next exercise.\n\n\
             title[Additional commands]:\n\
             \x20 - cmd[gw print <N>]    - prints out an exercise's instructions (without creating the setup).\n\
             \x20 - cmd[gw clean <N>]    - cleans up an exercise's setup (deletes the dedicated folder).\n\
             \x20 - cmd[gw restart <N>]  - cleans up an exercise's setup and runs the start again.\n\
             \x20 - cmd[gw print all]    - prints out all the exercises' instructions.\n\
             \x20 - cmd[gw clean all]    - cleans up all the exercises' setup.\n"
        )
    );
    print_listing(registry);
}
