// Command-line front end for bootstring.
//
// Reads text from a file or stdin, transcodes the first line (or every line
// with `--lines`) and writes the result followed by a newline. The scheme
// defaults to Punycode; every parameter can be overridden by a flag.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::CodePoint;
use crate::batch;
use crate::config::{Below, Config};
use crate::error::Result;
use crate::io::{first_line, from_code_points, read_input, to_code_points};

// ---------------------------------------------------------------------------
// Code point parsing (decimal, 0x.. or U+..)
// ---------------------------------------------------------------------------

fn parse_code_point(s: &str) -> std::result::Result<CodePoint, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty code point".into());
    }
    let parsed = if let Some(hex) = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix("U+"))
        .or_else(|| s.strip_prefix("u+"))
    {
        CodePoint::from_str_radix(hex, 16)
    } else {
        s.parse::<CodePoint>()
    };
    parsed.map_err(|e| format!("invalid code point '{s}': {e}"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Bootstring (RFC 3492) transcoder.
#[derive(Parser, Debug)]
#[command(
    name = "bootstring",
    version,
    about = "Bootstring / Punycode encoder and decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (errors only).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats (or the `config` listing) as JSON.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode Unicode text into the scheme's alphabet.
    Encode(TranscodeArgs),
    /// Decode scheme text back into Unicode.
    Decode(TranscodeArgs),
    /// Print the resolved scheme parameters.
    Config(SchemeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemeArg {
    Punycode,
}

impl SchemeArg {
    fn name(self) -> &'static str {
        match self {
            Self::Punycode => "punycode",
        }
    }
}

#[derive(Args, Debug)]
struct SchemeArgs {
    /// Base scheme; the options below override its parameters.
    #[arg(long, value_enum, default_value_t = SchemeArg::Punycode)]
    scheme: SchemeArg,

    /// Digit alphabet, one symbol per digit value.
    #[arg(long)]
    alphabet: Option<String>,

    /// Delimiter between the basic prefix and the encoded suffix.
    #[arg(long)]
    delimiter: Option<String>,

    /// Treat code points below this value as basic (decimal, 0x.. or U+..).
    #[arg(long, value_parser = parse_code_point)]
    basic_below: Option<CodePoint>,

    #[arg(long)]
    tmin: Option<usize>,

    #[arg(long)]
    tmax: Option<usize>,

    #[arg(long)]
    skew: Option<usize>,

    #[arg(long)]
    damp: Option<usize>,

    #[arg(long)]
    initial_bias: Option<usize>,

    /// First code point of the extended range (decimal, 0x.. or U+..).
    #[arg(long, value_parser = parse_code_point)]
    initial_n: Option<CodePoint>,
}

#[derive(Args, Debug)]
struct TranscodeArgs {
    /// Input file (stdin if omitted).
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted).
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Transcode every line instead of only the first.
    #[arg(long)]
    lines: bool,

    #[command(flatten)]
    scheme: SchemeArgs,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encode,
    Decode,
}

impl Direction {
    fn name(self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Transcode(Direction),
    Config,
}

struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    lines: bool,
    scheme: SchemeArg,
    config: Config,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn build_config(args: &SchemeArgs) -> Config {
    let mut config = match args.scheme {
        SchemeArg::Punycode => Config::punycode(),
    };
    if let Some(alphabet) = &args.alphabet {
        config.alphabet = to_code_points(alphabet);
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = to_code_points(delimiter);
    }
    if let Some(limit) = args.basic_below {
        config.basic = Arc::new(Below(limit));
    }
    config.tmin = args.tmin.unwrap_or(config.tmin);
    config.tmax = args.tmax.unwrap_or(config.tmax);
    config.skew = args.skew.unwrap_or(config.skew);
    config.damp = args.damp.unwrap_or(config.damp);
    config.initial_bias = args.initial_bias.unwrap_or(config.initial_bias);
    config.initial_n = args.initial_n.unwrap_or(config.initial_n);
    config
}

fn resolve_options(cli: Cli) -> Options {
    let (command, scheme_args, input_file, output_file, lines) = match cli.command {
        Cmd::Encode(args) => (
            Command::Transcode(Direction::Encode),
            args.scheme,
            args.input,
            args.output,
            args.lines,
        ),
        Cmd::Decode(args) => (
            Command::Transcode(Direction::Decode),
            args.scheme,
            args.input,
            args.output,
            args.lines,
        ),
        Cmd::Config(scheme) => (Command::Config, scheme, None, None, false),
    };

    Options {
        command,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        lines,
        scheme: scheme_args.scheme,
        config: build_config(&scheme_args),
        input_file,
        output_file,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("bootstring".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let opts = resolve_options(cli);
        let _ = opts.config.validate();
    }
}

fn code_points_to_display(cps: &[CodePoint]) -> String {
    from_code_points(cps).unwrap_or_else(|_| {
        cps.iter()
            .map(|cp| format!("U+{cp:04X}"))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Pretty-printed JSON followed by a newline.
fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config(opts: &Options) -> i32 {
    let config = &opts.config;
    if let Err(e) = config.validate() {
        eprintln!("bootstring: config: {e}");
        return e.exit_code();
    }

    let scheme = opts.scheme.name();
    let alphabet = code_points_to_display(&config.alphabet);
    let delimiter = code_points_to_display(&config.delimiter);

    if opts.json_output {
        let json = serde_json::json!({
            "scheme": scheme,
            "alphabet": alphabet,
            "base": config.base(),
            "delimiter": delimiter,
            "tmin": config.tmin,
            "tmax": config.tmax,
            "skew": config.skew,
            "damp": config.damp,
            "initial_bias": config.initial_bias,
            "initial_n": config.initial_n,
        });
        if let Err(e) = write_json(&mut io::stdout().lock(), &json) {
            eprintln!("bootstring: config: {e}");
            return 1;
        }
        return 0;
    }

    println!("SCHEME={scheme}");
    println!("ALPHABET={alphabet}");
    println!("BASE={}", config.base());
    println!("DELIMITER={delimiter}");
    println!("TMIN={}", config.tmin);
    println!("TMAX={}", config.tmax);
    println!("SKEW={}", config.skew);
    println!("DAMP={}", config.damp);
    println!("INITIAL_BIAS={}", config.initial_bias);
    println!("INITIAL_N=U+{:04X}", config.initial_n);
    println!("PARALLEL={}", cfg!(feature = "parallel") as u8);
    0
}

// ---------------------------------------------------------------------------
// Encode / decode commands
// ---------------------------------------------------------------------------

fn transcode_lines(opts: &Options, direction: Direction, lines: &[&str]) -> Result<Vec<String>> {
    let inputs: Vec<Vec<CodePoint>> = lines.iter().map(|line| to_code_points(line)).collect();
    let results = match direction {
        Direction::Encode => batch::encode_all(&opts.config, &inputs),
        Direction::Decode => batch::decode_all(&opts.config, &inputs),
    };
    results
        .into_iter()
        .enumerate()
        .map(|(i, result)| {
            result
                .and_then(|cps| from_code_points(&cps))
                .inspect_err(|e| {
                    if opts.lines {
                        log::info!("line {}: {e}", i + 1);
                    }
                })
        })
        .collect()
}

fn cmd_transcode(opts: &Options, direction: Direction) -> i32 {
    let name = direction.name();

    if let Err(e) = opts.config.validate() {
        eprintln!("bootstring: {name}: {e}");
        return e.exit_code();
    }

    let text = match read_input(opts.input_file.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            match &opts.input_file {
                Some(path) => eprintln!("bootstring: input file: {}: {e}", path.display()),
                None => eprintln!("bootstring: stdin: {e}"),
            }
            return 1;
        }
    };

    let lines: Vec<&str> = if opts.lines {
        text.lines().collect()
    } else {
        vec![first_line(&text)]
    };

    let outputs = match transcode_lines(opts, direction, &lines) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("bootstring: {name}: {e}");
            return e.exit_code();
        }
    };

    let mut writer: Box<dyn Write> = match &opts.output_file {
        None => Box::new(BufWriter::new(io::stdout().lock())),
        Some(path) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "bootstring: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return 1;
            }
            match File::create(path) {
                Ok(f) => Box::new(BufWriter::new(f)),
                Err(e) => {
                    eprintln!("bootstring: output file: {}: {e}", path.display());
                    return 1;
                }
            }
        }
    };

    for line in &outputs {
        if let Err(e) = writeln!(writer, "{line}") {
            eprintln!("bootstring: write error: {e}");
            return 1;
        }
    }
    if let Err(e) = writer.flush() {
        eprintln!("bootstring: write flush error: {e}");
        return 1;
    }

    let input_size: usize = lines.iter().map(|l| l.chars().count()).sum();
    let output_size: usize = outputs.iter().map(|l| l.chars().count()).sum();

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "bootstring: {name}: lines: {}, input code points: {input_size}, \
             output code points: {output_size}",
            lines.len()
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": name,
            "lines": lines.len(),
            "input_code_points": input_size,
            "output_code_points": output_size,
        });
        if let Err(e) = write_json(&mut io::stderr().lock(), &json) {
            eprintln!("bootstring: {name}: {e}");
            return 1;
        }
    }

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn default_log_filter(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(opts.quiet, opts.verbose)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    let exit_code = match opts.command {
        Command::Transcode(direction) => cmd_transcode(&opts, direction),
        Command::Config => cmd_config(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
