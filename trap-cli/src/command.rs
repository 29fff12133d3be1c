use {
    crate::{
        error::{CliError, ProcessResult},
        output::{CliDecision, CliEmitted, CliReplaySummary, CliSample, OutputFormat},
        rpc::{parse_quantity, JsonRpcFeeSource},
    },
    basefee_trap::{
        emitter::{forward, Tee, EVENT_NAME},
        evaluate, BaseFeeTrap, Emitter, FeeSource, FixedFeeSource, LogEmitter, Payload,
        RecordingEmitter, SampleLayout, Sampler, SequenceFeeSource, Trap, TrapConfig,
    },
    clap::ArgMatches,
    log::*,
    std::{
        fs,
        io::{self, Read},
        path::PathBuf,
        time::Duration,
    },
};

#[derive(Debug, PartialEq, Eq)]
pub enum FeeSourceArg {
    Fixed(u64),
    JsonRpc { url: String, timeout: Duration },
}

#[derive(Debug, PartialEq, Eq)]
pub enum TrapCommand {
    Collect { source: FeeSourceArg },
    ShouldRespond { samples: Vec<Vec<u8>> },
    Replay { input: Option<PathBuf> },
    Emit { payload: Vec<u8> },
}

#[derive(Debug)]
pub struct CliConfig {
    pub trap: TrapConfig,
    pub output_format: OutputFormat,
}

fn parse_u64_arg(matches: &ArgMatches<'_>, name: &str) -> Result<Option<u64>, CliError> {
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|err| CliError::BadParameter(format!("--{name} {value:?}: {err}")))
        })
        .transpose()
}

/// Decode a hex argument, with or without a `0x` prefix.
pub fn decode_hex_arg(value: &str) -> Result<Vec<u8>, CliError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(digits)?)
}

/// Build the trap configuration from `--config` and the override flags.
pub fn parse_config(matches: &ArgMatches<'_>) -> Result<CliConfig, CliError> {
    let mut trap = match matches.value_of("config_file") {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let config: TrapConfig = serde_json::from_str(&contents)?;
            debug!("loaded trap config from {path}: {config:?}");
            config
        }
        None => TrapConfig::default(),
    };
    if let Some(threshold) = parse_u64_arg(matches, "threshold")? {
        trap.threshold_pct = threshold;
    }
    if let Some(layout) = matches.value_of("layout") {
        trap.layout = layout.parse::<SampleLayout>()?;
    }
    trap.validate()?;

    Ok(CliConfig {
        trap,
        output_format: OutputFormat::from_matches(matches.value_of("output_format")),
    })
}

pub fn parse_command(matches: &ArgMatches<'_>) -> Result<TrapCommand, CliError> {
    match matches.subcommand() {
        ("collect", Some(matches)) => {
            let source = match parse_u64_arg(matches, "base_fee")? {
                Some(base_fee) => FeeSourceArg::Fixed(base_fee),
                None => {
                    let url = matches
                        .value_of("url")
                        .ok_or_else(|| {
                            CliError::BadParameter("--base-fee or --url is required".to_string())
                        })?
                        .to_string();
                    let timeout = parse_u64_arg(matches, "timeout")?.unwrap_or(10);
                    FeeSourceArg::JsonRpc {
                        url,
                        timeout: Duration::from_secs(timeout),
                    }
                }
            };
            Ok(TrapCommand::Collect { source })
        }
        ("should-respond", Some(matches)) => {
            let samples = matches
                .values_of("samples")
                .map(|values| values.map(decode_hex_arg).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(TrapCommand::ShouldRespond { samples })
        }
        ("replay", Some(matches)) => Ok(TrapCommand::Replay {
            input: matches.value_of("input").map(PathBuf::from),
        }),
        ("emit", Some(matches)) => {
            let payload = decode_hex_arg(matches.value_of("payload").unwrap_or_default())?;
            Ok(TrapCommand::Emit { payload })
        }
        (name, _) => Err(CliError::BadParameter(format!("unknown subcommand {name:?}"))),
    }
}

pub fn process_command(command: &TrapCommand, config: &CliConfig) -> ProcessResult {
    match command {
        TrapCommand::Collect { source } => process_collect(source, config),
        TrapCommand::ShouldRespond { samples } => process_should_respond(samples, config),
        TrapCommand::Replay { input } => {
            let contents = match input {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            process_replay(&contents, config, &LogEmitter)
        }
        TrapCommand::Emit { payload } => process_emit(payload, config, &LogEmitter),
    }
}

fn process_collect(source: &FeeSourceArg, config: &CliConfig) -> ProcessResult {
    let source: Box<dyn FeeSource> = match source {
        FeeSourceArg::Fixed(base_fee) => Box::new(FixedFeeSource(*base_fee)),
        FeeSourceArg::JsonRpc { url, timeout } => {
            info!("reading latest base fee from {url}");
            Box::new(JsonRpcFeeSource::new(url, *timeout)?)
        }
    };
    let sample = Sampler::new(source, &config.trap).sample()?;
    Ok(config
        .output_format
        .formatted_string(&CliSample::new(&sample))?)
}

fn process_should_respond(samples: &[Vec<u8>], config: &CliConfig) -> ProcessResult {
    let decision = evaluate(samples, &config.trap)?;
    Ok(config
        .output_format
        .formatted_string(&CliDecision::new(&decision))?)
}

/// Parse replay input: one base fee per line, decimal or `0x` hex. Blank
/// lines and `#` comments are skipped.
pub fn parse_replay_input(contents: &str) -> Result<Vec<u64>, CliError> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((index, line))
        })
        .map(|(index, line)| {
            let parsed = if line.starts_with("0x") {
                parse_quantity(line)
            } else {
                line.parse::<u64>().map_err(|err| err.to_string())
            };
            parsed.map_err(|err| {
                CliError::BadParameter(format!(
                    "line {}: invalid base fee {line:?}: {err}",
                    index.saturating_add(1)
                ))
            })
        })
        .collect()
}

/// Run `contents` through a trap the way the operator would: collect per
/// block, keep the two newest samples, decide, forward on trigger.
pub fn process_replay<E: Emitter + ?Sized>(
    contents: &str,
    config: &CliConfig,
    emitter: &E,
) -> ProcessResult {
    let fees = parse_replay_input(contents)?;
    let count = fees.len();
    let trap = BaseFeeTrap::new(SequenceFeeSource::new(fees), config.trap.clone())?;
    let recorded = RecordingEmitter::new();
    let sink = Tee(emitter, &recorded);

    let mut summary = CliReplaySummary {
        samples: count,
        threshold_pct: trap.config().threshold_pct,
        ..CliReplaySummary::default()
    };
    let mut buffer: Vec<Vec<u8>> = Vec::with_capacity(2);
    for index in 0..count {
        buffer.insert(0, trap.collect()?);
        buffer.truncate(2);
        let (triggered, payload) = trap.should_respond(&buffer)?;
        summary.record(index, &Payload::classify(&payload)?);
        forward(&sink, triggered, &payload);
    }
    summary.emitted = recorded.len();
    info!(
        "replayed {} samples: {} spike(s) emitted",
        summary.samples, summary.emitted
    );
    Ok(config.output_format.formatted_string(&summary)?)
}

fn process_emit<E: Emitter + ?Sized>(
    payload: &[u8],
    config: &CliConfig,
    emitter: &E,
) -> ProcessResult {
    match Payload::classify(payload) {
        Ok(Payload::Spike(_)) => {}
        Ok(control) => warn!("emitting a control payload: {control}"),
        Err(err) => debug!("payload is not a trap payload: {err}"),
    }
    emitter.emit_signal(payload);
    let emitted = CliEmitted {
        event: EVENT_NAME.to_string(),
        data: format!("0x{}", hex::encode(payload)),
    };
    Ok(config.output_format.formatted_string(&emitted)?)
}
