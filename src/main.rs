use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use svgcode::{init_logging, Converter, Settings, SmoothCurves, BUILD_DATE, VERSION};
use tracing::{error, info, warn};

fn cli() -> Command {
    Command::new("svgcode")
        .version(VERSION)
        .about("Converts SVG path data into a G-code motion program")
        .after_help(format!("Built {}", BUILD_DATE))
        .arg(
            Arg::new("INPUT")
                .help("SVG documents to convert")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("OUTPUT")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the program to FILE (single input only)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("CONFIG")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Settings file (.toml or .json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SEGMENTS")
                .long("segments")
                .value_name("N")
                .help("Straight-line samples per curve")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("SMOOTH_CURVES")
                .long("smooth-curves")
                .value_name("MODE")
                .help("Handling of smooth curve shorthands")
                .value_parser(["skip", "flatten"]),
        )
        .arg(
            Arg::new("NO_CLEANUP")
                .long("no-cleanup")
                .help("Extract paths from the document as written")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("DUMP_COMMANDS")
                .long("dump-commands")
                .help("Print normalized drawing commands as JSON instead of G-code")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("JSON_LOGS")
                .long("json-logs")
                .help("Log one JSON object per event")
                .action(ArgAction::SetTrue),
        )
}

fn load_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let mut settings = match matches.get_one::<PathBuf>("CONFIG") {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("Failed to load default settings")?,
    };

    if let Some(segments) = matches.get_one::<usize>("SEGMENTS") {
        settings.flatten.segments = *segments;
    }
    if let Some(mode) = matches.get_one::<String>("SMOOTH_CURVES") {
        settings.curves.smooth = mode.parse::<SmoothCurves>()?;
    }
    if matches.get_flag("NO_CLEANUP") {
        settings.cleanup.enabled = false;
    }

    settings.validate()?;
    Ok(settings)
}

fn convert_one(converter: &Converter, input: &Path, dump: bool) -> anyhow::Result<String> {
    if dump {
        let commands = converter
            .normalize_file(input)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        let mut text = serde_json::to_string_pretty(&commands)?;
        text.push('\n');
        return Ok(text);
    }

    let conversion = converter
        .convert_file(input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    if !conversion.diagnostics.is_empty() {
        warn!(
            input = %input.display(),
            skipped = conversion.diagnostics.len(),
            "some commands produced no motion"
        );
    }
    Ok(converter.render(&conversion))
}

fn write_output(destination: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match destination {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "wrote program");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    // Initialize logging
    init_logging(matches.get_flag("JSON_LOGS"))?;

    let settings = load_settings(&matches)?;
    let converter = Converter::from_settings(&settings);

    let inputs: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("INPUT")
        .map(Iterator::collect)
        .unwrap_or_default();
    let output = matches.get_one::<PathBuf>("OUTPUT");
    let dump = matches.get_flag("DUMP_COMMANDS");

    if output.is_some() && inputs.len() > 1 {
        bail!("--output accepts a single input, got {}", inputs.len());
    }

    let mut failed = 0;
    for input in &inputs {
        let destination = match output {
            Some(path) => Some(path.clone()),
            None if inputs.len() > 1 => {
                Some(input.with_extension(if dump { "json" } else { "gcode" }))
            }
            None => None,
        };

        let result = convert_one(&converter, input, dump)
            .and_then(|text| write_output(destination.as_deref(), &text));
        if let Err(e) = result {
            error!("{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} inputs failed", failed, inputs.len());
    }
    Ok(())
}
