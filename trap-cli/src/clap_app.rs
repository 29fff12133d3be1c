use clap::{App, AppSettings, Arg, SubCommand};

fn is_parsable_u64(value: String) -> Result<(), String> {
    value
        .parse::<u64>()
        .map(|_| ())
        .map_err(|err| format!("{value:?} is not an unsigned integer: {err}"))
}

pub fn get_clap_app<'ab, 'v>(name: &str, about: &'ab str, version: &'v str) -> App<'ab, 'v> {
    App::new(name)
        .about(about)
        .version(version)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config_file")
                .long("config")
                .value_name("PATH")
                .takes_value(true)
                .help("JSON trap configuration file [default: built-in 2% value layout]"),
        )
        .arg(
            Arg::with_name("threshold")
                .long("threshold")
                .value_name("PERCENT")
                .takes_value(true)
                .validator(is_parsable_u64)
                .help("Override the configured percent threshold"),
        )
        .arg(
            Arg::with_name("layout")
                .long("layout")
                .value_name("LAYOUT")
                .takes_value(true)
                .possible_values(&["value", "value-with-threshold"])
                .help("Override the configured sample layout"),
        )
        .arg(
            Arg::with_name("output_format")
                .long("output")
                .value_name("FORMAT")
                .takes_value(true)
                .possible_values(&["json", "json-compact"])
                .help("Return information in specified output format"),
        )
        .subcommand(
            SubCommand::with_name("collect")
                .about("Sample the current base fee and print the encoded sample")
                .arg(
                    Arg::with_name("base_fee")
                        .long("base-fee")
                        .value_name("WEI")
                        .takes_value(true)
                        .validator(is_parsable_u64)
                        .conflicts_with("url")
                        .required_unless("url")
                        .help("Use this base fee instead of querying a node"),
                )
                .arg(
                    Arg::with_name("url")
                        .long("url")
                        .value_name("URL")
                        .takes_value(true)
                        .help("Ethereum JSON-RPC endpoint to read the latest base fee from"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .value_name("SECONDS")
                        .takes_value(true)
                        .default_value("10")
                        .validator(is_parsable_u64)
                        .help("JSON-RPC request timeout"),
                ),
        )
        .subcommand(
            SubCommand::with_name("should-respond")
                .about("Run the decision rule over hex-encoded samples, newest first")
                .arg(
                    Arg::with_name("samples")
                        .index(1)
                        .value_name("HEX")
                        .multiple(true)
                        .help("Encoded samples as produced by `collect`, newest first"),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Replay a series of base fees through the trap and summarize the alerts")
                .arg(
                    Arg::with_name("input")
                        .index(1)
                        .value_name("FILE")
                        .help(
                            "File with one base fee per line, oldest first; decimal or 0x-hex, \
                             `#` starts a comment [default: stdin]",
                        ),
                ),
        )
        .subcommand(
            SubCommand::with_name("emit")
                .about("Republish a hex payload as a BasefeeAlert event")
                .arg(
                    Arg::with_name("payload")
                        .index(1)
                        .value_name("HEX")
                        .required(true)
                        .help("Payload bytes, e.g. the payload of a triggered decision"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App<'static, 'static> {
        get_clap_app("basefee-trap", "test", "0.0.0")
    }

    #[test]
    fn test_collect_requires_a_source() {
        assert!(app().get_matches_from_safe(vec!["basefee-trap", "collect"]).is_err());
        assert!(app()
            .get_matches_from_safe(vec![
                "basefee-trap",
                "collect",
                "--base-fee",
                "1",
                "--url",
                "http://localhost:8545",
            ])
            .is_err());
        assert!(app()
            .get_matches_from_safe(vec!["basefee-trap", "collect", "--base-fee", "1"])
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(app()
            .get_matches_from_safe(vec!["basefee-trap", "--threshold", "-1", "replay"])
            .is_err());
    }

    #[test]
    fn test_should_respond_accepts_no_samples() {
        let matches = app()
            .get_matches_from_safe(vec!["basefee-trap", "should-respond"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("should-respond"));
    }
}
