//! Interactive search driven by stdin
//!
//! Every line read from stdin counts as one edit of the search box and is fed to a
//! [`SearchController`]. State changes are rendered as they are published.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use atty::Stream;
use colored::Colorize;
use indicatif::ProgressBar;
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::client::{print_error, BaseClient};
use crate::controller::{SearchController, SearchState, UiState};
use crate::progress::search_spinner;

use super::base::Matcher;
use super::search::exit_without_runtime;

/// Search as you type, one edit per line of stdin
#[derive(StructOpt, Debug)]
#[structopt(about = "Search as you type, reading one edit per line from stdin")]
pub struct InteractiveCommand {
    /// Quiescence window before an edit is searched
    #[structopt(long, default_value = "100", help = "Debounce window in milliseconds")]
    pub debounce_ms: u64,
}

impl Matcher for InteractiveCommand {
    fn process(self, client: &BaseClient) {
        let runtime = Runtime::new().unwrap_or_else(|err| exit_without_runtime(err));

        if let Err(err) = runtime.block_on(self.run(client.clone())) {
            print_error(format!("Could not read from stdin: {}", err));
            std::process::exit(exitcode::IOERR);
        }
    }
}

impl InteractiveCommand {
    pub async fn run(&self, client: BaseClient) -> io::Result<()> {
        let window = Duration::from_millis(self.debounce_ms);
        let controller = SearchController::with_debounce(Arc::new(client), window);

        let mut receiver = controller.subscribe();
        let printer = tokio::spawn(async move {
            let mut renderer = Renderer::new(atty::is(Stream::Stdout));
            while receiver.changed().await.is_ok() {
                let state = receiver.borrow_and_update().clone();
                renderer.render(&state);
            }
            renderer.finish();
        });

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            controller.set_query_text(line);
        }

        debug!("stdin closed, waiting for the last search");
        let last = controller.close().await;
        debug!(state = %last.ui_state, "last search done");

        let _ = printer.await;

        Ok(())
    }
}

/// Prints state changes, skipping those that only touched the query text.
struct Renderer {
    interactive: bool,
    spinner: Option<ProgressBar>,
    last: Option<(UiState, Vec<String>)>,
}

impl Renderer {
    fn new(interactive: bool) -> Self {
        Renderer {
            interactive,
            spinner: None,
            last: None,
        }
    }

    fn render(&mut self, state: &SearchState) {
        let key: (UiState, Vec<String>) = (
            state.ui_state,
            state.results.iter().map(|i| i.id().to_string()).collect(),
        );
        if self.last.as_ref() == Some(&key) {
            return;
        }
        self.last = Some(key);

        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        match state.ui_state {
            UiState::Loading if self.interactive => {
                self.spinner = Some(search_spinner(&state.query_text));
            }
            UiState::Error => println!("{}", render_lines(state).join("\n").red()),
            _ => {
                for line in render_lines(state) {
                    println!("{}", line);
                }
            }
        }
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Plain-text rendering of a state.
fn render_lines(state: &SearchState) -> Vec<String> {
    match state.ui_state {
        UiState::Idle => Vec::new(),
        UiState::Loading => vec![format!("Searching '{}'...", state.query_text)],
        UiState::Error => vec!["Something went wrong".to_string()],
        UiState::Loaded if state.results.is_empty() && state.query_text.is_empty() => Vec::new(),
        UiState::Loaded if state.results.is_empty() => {
            vec![format!("No results for '{}'", state.query_text)]
        }
        UiState::Loaded => {
            let mut lines = vec![format!(
                "{} results for '{}'",
                state.results.len(),
                state.query_text
            )];
            for (index, item) in state.results.iter().enumerate() {
                lines.push(format!("{:>3}. {} by {}", index, item.title, item.author));
                lines.push(format!("     {}", item.id()));
            }
            lines
        }
    }
}
