use std::{io, sync::OnceLock};

use application::{render, Args, Browser, Config};
use service::infra::{remote::http, Http, Session as _};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};
use url::Url;

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        query,
        sort,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { remote, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let endpoint = remote.endpoint.parse::<Url>().map_err(|e| {
        log::error!("`{}` is not a valid endpoint URL: {e}", remote.endpoint);
    })?;

    if remote.is_present() {
        log::debug!("browsing with a user session");
    } else {
        log::debug!("browsing as a guest");
    }

    let api = Http::new(
        &http::Config {
            endpoint,
            timeout: remote.timeout,
        },
        remote,
    )
    .map_err(|e| {
        log::error!("failed to initialize HTTP remote: {e}");
    })?;

    let mut browser = Browser::new(api);
    browser.set_sort(sort);

    if let Some(refresh) = browser.navigate(&query) {
        browser.refresh(refresh).await;
    }

    if let Some(e) = browser.error() {
        log::warn!("unable to load listings, nothing to show: {e}");
    }

    let chips = browser.chips();
    if !chips.is_empty() {
        println!("{}", render::chips(&chips));
    }

    let listings = browser.listings();
    println!("{} places", listings.len());
    for listing in listings {
        println!();
        println!("{}", render::card(listing));
    }

    log::info!(
        "share this search: /listings?{}",
        service::codec::encode(browser.active()),
    );

    Ok(())
}
