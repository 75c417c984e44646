use anyhow::Result;
use character_browser::app::App;
use character_browser::config::Config;
use character_browser::logger;
use clap::{Arg, ArgMatches};

fn arguments<'a>() -> ArgMatches<'a> {
    clap::App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("character")
                .long("character")
                .value_name("ID")
                .help("Also show the details of the character with this ID")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Override the configured log level (error, warn, info, debug, trace, off)")
                .takes_value(true),
        )
        .get_matches()
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = arguments();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(level) = matches.value_of("log-level") {
        config.log_level = level.to_owned();
    }
    logger::init(&config.log_level)?;

    App::start(config, matches.value_of("character").map(str::to_owned)).await
}
