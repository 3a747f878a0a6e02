use racechart::api::{ChartKind, HighlightKey, RenderOptions, render_all};
use racechart::core::{
    build_roster, filter_by_distance, parse_results_json, results_json_url, search_roster,
    unique_distances,
};
use racechart::telemetry::init_default_tracing;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "\
Usage: racechart --input <results.json> [--out-dir <dir>] [--bucket <seconds>]
                 [--distance <value>] [--highlight <bib|name>]... [--options <file.json>]
       racechart --input <results.json> --list-distances
       racechart --input <results.json> --search <term>
       racechart --json-url <results page url>";

#[derive(Debug)]
enum Command {
    Render,
    ListDistances,
    Search(String),
    JsonUrl(String),
}

#[derive(Debug)]
struct CliArgs {
    command: Command,
    input: Option<PathBuf>,
    out_dir: PathBuf,
    options_path: Option<PathBuf>,
    bucket_seconds: Option<f64>,
    distance: Option<String>,
    highlights: Vec<HighlightKey>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    if let Command::JsonUrl(url) = &args.command {
        let json_url = results_json_url(url).map_err(|err| err.to_string())?;
        println!("{json_url}");
        return Ok(());
    }

    let input = args
        .input
        .as_ref()
        .ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    let raw = fs::read_to_string(input)
        .map_err(|err| format!("failed to read `{}`: {err}", input.display()))?;
    let records = parse_results_json(&raw).map_err(|err| err.to_string())?;

    match &args.command {
        Command::ListDistances => {
            for option in unique_distances(&records) {
                println!("{}\t{}", option.value, option.label);
            }
            Ok(())
        }
        Command::Search(term) => {
            let roster = build_roster(&records);
            for runner in search_roster(&roster, term) {
                println!("{}", runner.display_name);
            }
            Ok(())
        }
        Command::Render => render_charts(&args, &records),
        Command::JsonUrl(_) => Ok(()),
    }
}

fn render_charts(args: &CliArgs, records: &[racechart::core::ResultRecord]) -> Result<(), String> {
    let mut options = match &args.options_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            RenderOptions::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => RenderOptions::default(),
    };
    if let Some(seconds) = args.bucket_seconds {
        options.bucket_size_seconds = seconds;
    }
    if let Some(distance) = &args.distance {
        if filter_by_distance(records, distance).is_empty() {
            return Err(format!("no records for distance `{distance}`"));
        }
        options.distance = Some(distance.clone());
    }
    options.highlights.extend(args.highlights.iter().cloned());
    options.validate().map_err(|err| err.to_string())?;

    fs::create_dir_all(&args.out_dir)
        .map_err(|err| format!("failed to create `{}`: {err}", args.out_dir.display()))?;

    let mut written = 0usize;
    for (kind, result) in render_all(records, &options) {
        match result {
            Ok(svg) => {
                let path = output_path(&args.out_dir, kind);
                fs::write(&path, svg)
                    .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
                println!("wrote {}", path.display());
                written += 1;
            }
            Err(err) => eprintln!("skipped {}: {err}", kind.file_stem()),
        }
    }

    if written == 0 {
        return Err("no chart could be rendered".to_owned());
    }
    Ok(())
}

fn output_path(out_dir: &std::path::Path, kind: ChartKind) -> PathBuf {
    out_dir.join(format!("{}.svg", kind.file_stem()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        command: Command::Render,
        input: None,
        out_dir: PathBuf::from("."),
        options_path: None,
        bucket_seconds: None,
        distance: None,
        highlights: Vec::new(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--input" => cli.input = Some(PathBuf::from(value("--input")?)),
            "--out-dir" => cli.out_dir = PathBuf::from(value("--out-dir")?),
            "--options" => cli.options_path = Some(PathBuf::from(value("--options")?)),
            "--bucket" => {
                let raw = value("--bucket")?;
                let seconds = raw
                    .parse::<f64>()
                    .map_err(|_| format!("invalid --bucket value `{raw}`"))?;
                cli.bucket_seconds = Some(seconds);
            }
            "--distance" => cli.distance = Some(value("--distance")?),
            "--highlight" => cli.highlights.push(HighlightKey::parse(&value("--highlight")?)),
            "--list-distances" => cli.command = Command::ListDistances,
            "--search" => cli.command = Command::Search(value("--search")?),
            "--json-url" => cli.command = Command::JsonUrl(value("--json-url")?),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n{USAGE}"));
            }
        }
    }

    Ok(cli)
}
