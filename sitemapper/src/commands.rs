use clap::{ArgAction, arg};
use std::path::PathBuf;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .about("Crawl a website and print its site map")
        .styles(CLAP_STYLING)
        .arg(
            arg!(--"base_url" <URL>)
                .required(true)
                .help("Root URL of the site; only pages on its host are mapped")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-i --"input" <PATH>)
                .required(false)
                .help("Newline-delimited list of URLs to map instead of crawling")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-m --"max" <NUM_URLS>)
                .required(false)
                .help("Maximum number of URLs to visit (or lines to read from --input)")
                .value_parser(clap::value_parser!(usize))
                .default_value("500"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Write the site map to a file (default: standard output)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-p --"pretty")
                .required(false)
                .help("Include page titles, aligned in a fixed-width column")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-w --"width" <COLUMNS>)
                .required(false)
                .help("Column to align titles to in --pretty output")
                .value_parser(clap::value_parser!(usize))
                .default_value("60"),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Suppress progress and status output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}
