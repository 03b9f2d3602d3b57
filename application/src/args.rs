//! [`Args`] definitions.

use clap::Parser;
use service::read::listing::Sort;

/// Browser of the housing listings marketplace.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Persisted filters representation to browse with
    /// (e.g. `location=campus&price_max=5000&amenities=Furnished`).
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Sort order of the results.
    #[arg(
        short,
        long,
        default_value_t = Sort::default(),
        value_parser = parse_sort,
    )]
    pub sort: Sort,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Parses a [`Sort`] token.
fn parse_sort(token: &str) -> Result<Sort, String> {
    token.parse().map_err(|_| {
        format!(
            "expected one of: {}",
            Sort::ALL
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    })
}
