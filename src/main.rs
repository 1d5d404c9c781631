use clap::Parser;
use codeclip::logger::initialize_logger;
use codeclip::{
    collect, confirm, copy_to_clipboard, find_repo_root, CodeclipError, CollectOptions,
    IgnoreRules, DEFAULT_MAX_SIZE,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};

/// Copy every text file under the current directory to the clipboard
///
/// Files are concatenated with path headers, honoring .gitignore files up to
/// the repository root. Binary files are replaced by a marker and the output
/// stops at a size limit.
#[derive(Parser, Debug)]
#[command(name = "codeclip")]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Continue without asking when no git repository is found
    #[arg(short, long)]
    yes: bool,

    /// Maximum number of bytes to collect
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,

    /// Write the collected text to stdout instead of the clipboard
    #[arg(long)]
    print: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Copied { bytes: usize, truncated: bool },
    Printed { bytes: usize, truncated: bool },
    Cancelled,
}

fn run(args: &Args) -> Result<Outcome, CodeclipError> {
    let cwd = std::env::current_dir().map_err(CodeclipError::CurrentDir)?;
    debug!(cwd = %cwd.display(), "resolved working directory");

    if args.verbose {
        eprintln!("Searching for git repository from {}", cwd.display());
    }
    let root = match find_repo_root(&cwd) {
        Some(root) => {
            info!(root = %root.display(), "found git repository");
            if args.verbose {
                eprintln!("Using repository root: {}", root.display());
            }
            root
        }
        None => {
            if args.verbose {
                eprintln!("No git repository found");
            }
            let proceed = if args.yes {
                true
            } else if args.print {
                confirm(io::stdin().lock(), io::stderr()).map_err(CodeclipError::Prompt)?
            } else {
                confirm(io::stdin().lock(), io::stdout()).map_err(CodeclipError::Prompt)?
            };
            if !proceed {
                return Ok(Outcome::Cancelled);
            }
            cwd.clone()
        }
    };

    if args.verbose {
        eprintln!("Loading ignore rules from {} up to {}", cwd.display(), root.display());
    }
    let rules = IgnoreRules::load(&cwd, &root);
    let options = CollectOptions {
        max_size: args.max_size,
    };
    let collected = collect(&cwd, &rules, &options);

    if args.verbose {
        eprintln!(
            "Collected {} files, {} binary files and {} folders",
            collected.stats.files, collected.stats.binary_files, collected.stats.folders
        );
    }

    let bytes = collected.text.len();
    let truncated = collected.truncated;

    if args.print {
        if args.verbose {
            eprintln!("Writing {} bytes to stdout...", bytes);
        }
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(collected.text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| CodeclipError::IoError {
                path: "-".into(),
                source: e,
            })?;
        Ok(Outcome::Printed { bytes, truncated })
    } else {
        if args.verbose {
            eprintln!("Copying {} bytes to clipboard...", bytes);
        }
        copy_to_clipboard(&collected.text)?;
        Ok(Outcome::Copied { bytes, truncated })
    }
}

fn truncation_notice(max_size: usize) -> String {
    format!("Output truncated: size limit of {} bytes reached.", max_size)
}

fn report(args: &Args, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Cancelled => "Operation cancelled.".to_string(),
        Outcome::Copied { bytes, truncated } | Outcome::Printed { bytes, truncated } => {
            let mut status = match outcome {
                Outcome::Printed { .. } => format!("Wrote {} bytes to stdout.", bytes),
                _ => format!("Copied {} bytes to clipboard.", bytes),
            };
            if *truncated {
                status.push('\n');
                status.push_str(&truncation_notice(args.max_size));
            }
            status
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logger(args.verbose);

    match run(&args) {
        Ok(outcome) => {
            if !args.quiet {
                let status = report(&args, &outcome);
                if args.print {
                    eprintln!("{}", status);
                } else {
                    println!("{}", status);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e @ CodeclipError::ClipboardError(_)) => {
            eprintln!("Error: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
