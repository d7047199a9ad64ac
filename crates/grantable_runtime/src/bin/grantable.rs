//! Grantable CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use grantable_runtime::{LoaderConfig, Repl, Session};
use tracing::Level;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    strict: bool,
    log_level: Option<Level>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--strict" => config.strict = true,
            "--log" => {
                i += 1;
                if i >= args.len() {
                    return Err("--log requires a level".into());
                }
                config.log_level = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --log level: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("grantable {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level.unwrap_or(Level::WARN))
        .with_target(false)
        .init();

    let loader_config = if config.strict {
        LoaderConfig::strict()
    } else {
        LoaderConfig::lenient()
    };
    let mut session = Session::new().with_loader_config(loader_config);

    // Queue rewards from every file
    for file in &config.files {
        let report = session.load_file(file)?;
        println!(
            "{}: {} reward(s), {} skipped",
            file.display(),
            report.grantables.len(),
            report.failures.len()
        );
        if config.batch_mode {
            for grantable in &report.grantables {
                println!("  {grantable}");
            }
        }
    }

    if config.batch_mode {
        return Ok(());
    }

    let mut repl = Repl::new()?.with_session(session);
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mgrantable\x1b[0m - Reward descriptor language

\x1b[1mUSAGE:\x1b[0m
    grantable [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Reward files to queue before starting the REPL
                  (one descriptor fragment per line)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Load files, print their rewards, and exit
    --strict           Fail on the first bad token instead of skipping it
    --log LEVEL        Log level on stderr: error, warn, info, debug, trace
                       (default: warn)

\x1b[1mEXAMPLES:\x1b[0m
    grantable                        Start interactive REPL
    grantable -b rewards.txt         Check a reward file and exit
    grantable --strict -b kits.txt   Reject the file on any bad token
    grantable --log debug kit.txt    Queue kit.txt with debug logging

\x1b[1mDESCRIPTORS:\x1b[0m
    $5, eco:5              Currency
    #vip.kit, perm:a.b     Permission
    @speed II 30s          Effect (type, level, duration)
    diamond_sword 16:5     Item with enchantments
    wool:red:16            Item with color data and amount
    (diamond, $10)         Group

\x1b[1mREPL COMMANDS:\x1b[0m
    :help                Show all commands
    :grant <descriptor>  Grant to the current recipient
    :inv                 Show the current recipient's state
    Ctrl+D               Exit REPL
    Ctrl+C               Cancel current input"
    );
}
