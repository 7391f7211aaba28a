//! One-shot search commands
//!
//! `search` prints every item of the feed, `detail` prints the view model of a
//! single item.

use structopt::StructOpt;
use tokio::runtime::Runtime;

use crate::client::{print_error, BaseClient};
use crate::detail::ItemDetail;
use crate::error::SearchError;
use crate::search_api::{self, query::FeedQuery};

use super::base::{evaluate_and_print_response, Matcher};

/// Implements the Matcher trait for FeedQuery.
/// This allows the search query to be processed by the CLI framework.
impl Matcher for FeedQuery {
    fn process(self, client: &BaseClient) {
        let runtime = Runtime::new().unwrap_or_else(|err| exit_without_runtime(err));
        let response = runtime.block_on(search_api::search(client, &self));
        evaluate_and_print_response(response.map(|response| response.items));
    }
}

/// Show the details of one search result
#[derive(StructOpt, Debug)]
#[structopt(about = "Show the details of one search result")]
pub struct DetailCommand {
    /// The search text
    #[structopt(help = "The search text")]
    pub text: String,

    /// Position of the item in the results
    #[structopt(short, long, default_value = "0", help = "Index of the result to show")]
    pub index: usize,
}

impl DetailCommand {
    /// Searches and picks the requested item.
    ///
    /// Returns `Ok(None)` when the feed has fewer items than `index + 1`.
    pub async fn fetch(&self, client: &BaseClient) -> Result<Option<ItemDetail>, SearchError> {
        let response = search_api::search(client, &FeedQuery::new(self.text.as_str())).await?;
        Ok(response.items.get(self.index).map(ItemDetail::from))
    }
}

impl Matcher for DetailCommand {
    fn process(self, client: &BaseClient) {
        let runtime = Runtime::new().unwrap_or_else(|err| exit_without_runtime(err));

        match runtime.block_on(self.fetch(client)) {
            Ok(Some(detail)) => evaluate_and_print_response(Ok(detail)),
            Ok(None) => {
                print_error(format!(
                    "No result at index {} for '{}'",
                    self.index, self.text
                ));
                std::process::exit(exitcode::NOINPUT);
            }
            Err(err) => evaluate_and_print_response::<ItemDetail>(Err(err)),
        }
    }
}

pub(crate) fn exit_without_runtime(err: std::io::Error) -> ! {
    print_error(format!("Could not start the async runtime: {}", err));
    std::process::exit(exitcode::OSERR);
}
