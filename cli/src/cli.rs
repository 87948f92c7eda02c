//! Command-line surface for the `rana` binary.

use clap::{ArgAction, Parser, Subcommand};
use rana_client::config::{DEFAULT_ENDPOINT, ENDPOINT_ENV, KEY_ENV};
use rana_client::{ClientConfig, Query, QueryEncoding};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query a Rana server", long_about = None)]
pub struct Cli {
    /// API key, sent as HTTP Basic credentials
    #[arg(long, env = KEY_ENV, hide_env_values = true)]
    pub key: String,

    /// Server base URL
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Percent-encode query parameters instead of sending them raw
    #[arg(long = "percent-encode", action = ArgAction::SetTrue, global = true)]
    pub percent_encode: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch daily summaries ending today
    Summaries {
        /// How many days before today the range starts
        #[arg(short = 'd', long = "days", default_value_t = 7u64)]
        days: u64,
    },
    /// Issue a GET against an arbitrary path
    Request {
        /// Path appended to the endpoint, e.g. /api/v1/users/current
        path: String,
        /// Query parameter as key=value; repeatable, order is kept
        #[arg(short = 'q', long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
    /// Show the user the key belongs to
    Whoami,
    /// Print the Authorization header value for the key
    EncodeKey,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let encoding = if self.percent_encode {
            QueryEncoding::Percent
        } else {
            QueryEncoding::Legacy
        };
        ClientConfig::new(self.key.clone())
            .with_endpoint(&self.endpoint)
            .with_query_encoding(encoding)
    }
}

/// Build a `Query` from `--query` pairs, preserving their order.
pub fn query_from_pairs(pairs: &[(String, String)]) -> Query {
    pairs.iter().cloned().collect()
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}
