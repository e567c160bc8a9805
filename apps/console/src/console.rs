//! Interactive terminal front end. One page is active at a time; commands
//! are read line by line from stdin and dispatched to that page.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::api::Api;
use crate::errors::AppError;
use crate::pages::{ApplicationsPage, CandidatesPage, Dashboard, JobsPage, RowAction};
use crate::ui::{ToastKind, Ui};

/// Terminal `Ui`. Owns stdin so that confirmation answers and commands are
/// read from the same stream.
pub struct TerminalUi {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(stdin()).lines()),
        }
    }

    /// Next input line, or `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        flush();
        self.lines.lock().await.next_line().await.ok().flatten()
    }
}

fn flush() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

#[async_trait]
impl Ui for TerminalUi {
    async fn alert(&self, message: &str) {
        println!("[alert] {message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        let answer = self.read_line(&format!("{message} [y/N] ")).await;
        matches!(
            answer.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    async fn toast(&self, message: &str, kind: ToastKind) {
        let tag = match kind {
            ToastKind::Error => "error",
        };
        println!("[{tag}] {message}");
    }
}

enum ActivePage {
    Candidates(CandidatesPage),
    Jobs(JobsPage),
    Applications(ApplicationsPage),
    Dashboard(Dashboard),
}

impl ActivePage {
    fn open(name: PageName, api: &Api, ui: Arc<dyn Ui>) -> Self {
        match name {
            PageName::Candidates => {
                ActivePage::Candidates(CandidatesPage::new(api.candidates.clone(), ui))
            }
            PageName::Jobs => ActivePage::Jobs(JobsPage::new(api.jobs.clone(), ui)),
            PageName::Applications => {
                ActivePage::Applications(ApplicationsPage::new(api.clone(), ui))
            }
            PageName::Dashboard => ActivePage::Dashboard(Dashboard::new(api.clone(), ui)),
        }
    }

    async fn load(&mut self) {
        match self {
            ActivePage::Candidates(p) => {
                p.load().await;
            }
            ActivePage::Jobs(p) => {
                p.load().await;
            }
            ActivePage::Applications(p) => {
                p.load().await;
            }
            ActivePage::Dashboard(p) => {
                p.load().await;
            }
        }
    }

    fn to_html(&self) -> Result<String, AppError> {
        match self {
            ActivePage::Candidates(p) => p.to_html(),
            ActivePage::Jobs(p) => p.to_html(),
            ActivePage::Applications(p) => p.to_html(),
            ActivePage::Dashboard(p) => p.to_html(),
        }
    }

    fn show(&self) {
        match self.to_html() {
            Ok(html) => println!("{html}"),
            Err(e) => error!("Rendering page failed: {e}"),
        }
    }
}

/// One line of console input.
#[derive(Parser, Debug)]
#[command(name = "console", no_binary_name = true, about = "Recruiting console")]
struct Input {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PageName {
    Candidates,
    Jobs,
    Applications,
    Dashboard,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Open a page and load it
    Page { name: PageName },
    /// Print the current page
    Show,
    /// Reload the current page from the backend
    Reload,
    /// Set a form field; the rest of the line is the value
    Set {
        field: String,
        #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Create a record, or save the one being edited
    Submit,
    /// Leave edit mode and clear the form
    Cancel,
    /// Edit the listed row with this id
    Edit { id: i64 },
    /// Delete the listed row with this id, after confirmation
    Delete { id: i64 },
    /// Select the candidate that receives the resume (candidates page)
    Select { id: i64 },
    /// Choose the resume file to upload (candidates page)
    File {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        path: Vec<String>,
    },
    /// Upload the chosen resume (candidates page)
    Upload,
    /// Leave the console
    #[command(visible_alias = "exit")]
    Quit,
}

/// Words are split on whitespace, so runs of spaces inside a value
/// collapse to one.
fn parse(line: &str) -> Result<Command, clap::Error> {
    Input::try_parse_from(line.split_whitespace()).map(|input| input.command)
}

/// Runs the console until `quit` or end of input.
pub async fn run(api: Api, ui: Arc<TerminalUi>) -> Result<()> {
    let dyn_ui: Arc<dyn Ui> = ui.clone();
    let mut page = ActivePage::open(PageName::Dashboard, &api, dyn_ui.clone());
    page.load().await;
    page.show();
    Input::command().print_help()?;

    while let Some(line) = ui.read_line("> ").await {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse(&line) {
            Ok(command) => command,
            Err(e) => {
                // Also covers `help`, which clap reports as an error kind.
                let _ = e.print();
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Page { name } => {
                info!("Opening {name:?} page");
                page = ActivePage::open(name, &api, dyn_ui.clone());
                page.load().await;
            }
            Command::Show => {}
            Command::Reload => page.load().await,
            other => apply(&mut page, other).await,
        }
        page.show();
    }

    Ok(())
}

async fn apply(page: &mut ActivePage, command: Command) {
    match (page, command) {
        (ActivePage::Candidates(p), Command::Set { field, value }) => {
            set(p.crud.set_field(&field, value.join(" ")), &field)
        }
        (ActivePage::Jobs(p), Command::Set { field, value }) => {
            set(p.set_field(&field, value.join(" ")), &field)
        }
        (ActivePage::Applications(p), Command::Set { field, value }) => {
            set(p.crud.set_field(&field, value.join(" ")), &field)
        }

        (ActivePage::Candidates(p), Command::Submit) => {
            p.submit().await;
        }
        (ActivePage::Jobs(p), Command::Submit) => {
            p.submit().await;
        }
        (ActivePage::Applications(p), Command::Submit) => {
            p.submit().await;
        }

        (ActivePage::Candidates(p), Command::Cancel) => p.crud.cancel(),
        (ActivePage::Jobs(p), Command::Cancel) => p.cancel(),
        (ActivePage::Applications(p), Command::Cancel) => p.cancel(),

        (page, Command::Edit { id }) => row(page, id, RowAction::Edit).await,
        (page, Command::Delete { id }) => row(page, id, RowAction::Delete).await,

        (ActivePage::Candidates(p), Command::Select { id }) => p.select(id).await,
        (ActivePage::Candidates(p), Command::File { path }) => p.choose_file(path.join(" ")),
        (ActivePage::Candidates(p), Command::Upload) => {
            p.upload().await;
        }

        _ => println!("that command is not available on this page"),
    }
}

async fn row(page: &mut ActivePage, id: i64, action: RowAction) {
    match page {
        ActivePage::Candidates(p) => {
            p.dispatch(id, action).await;
        }
        ActivePage::Jobs(p) => {
            p.dispatch(id, action).await;
        }
        ActivePage::Applications(p) => {
            p.dispatch(id, action).await;
        }
        ActivePage::Dashboard(_) => println!("that command is not available on this page"),
    }
}

fn set(known: bool, field: &str) {
    if !known {
        println!("no field named '{field}' on this page");
    }
}
