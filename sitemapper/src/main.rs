use colored::Colorize;
use sitemapper::{MapRequest, command_argument_builder, handle_map, init_logging, log_level};

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let request = MapRequest::from_matches(&matches);

    init_logging(log_level(request.verbosity, request.quiet));

    if let Err(e) = handle_map(request).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
