mod clap_app;
mod command;
mod error;
mod logger;
mod output;
mod rpc;

use {
    crate::{
        clap_app::get_clap_app,
        command::{parse_command, parse_config, process_command},
        error::CliError,
    },
    clap::{crate_description, crate_name, crate_version, ArgMatches},
    log::*,
    std::process::exit,
};

fn run(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let config = parse_config(matches)?;
    let command = parse_command(matches)?;
    debug!("running {command:?} with {:?}", config.trap);
    let output = process_command(&command, &config)?;
    println!("{output}");
    Ok(())
}

fn main() {
    logger::setup_with_default("info");
    let matches = get_clap_app(crate_name!(), crate_description!(), crate_version!()).get_matches();

    if let Err(err) = run(&matches) {
        error!("{err}");
        exit(1);
    }
}
