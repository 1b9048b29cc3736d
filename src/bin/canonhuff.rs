use canonhuff::file::{compress_file, decompress_file};
use canonhuff::{Config, Header};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Canonical Huffman file compressor")]
struct Cli {
    /// Name prefix for compressed files.
    #[arg(long, global = true, default_value = canonhuff::config::DEFAULT_PREFIX)]
    prefix: String,

    /// Replace existing output files.
    #[arg(short, long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a file to `<prefix><name>` next to it.
    Compress { path: PathBuf },
    /// Restore a `<prefix><name>` file to `<name>`.
    Decompress { path: PathBuf },
    /// Print the header and code table of a compressed file.
    Inspect { path: PathBuf },
}

fn run(cli: Cli) -> canonhuff::Result<()> {
    let config = Config::new()
        .with_prefix(cli.prefix)
        .with_overwrite(cli.force);

    match cli.command {
        Command::Compress { path } => {
            let before = std::fs::metadata(&path)?.len();
            let target = compress_file(&config, &path)?;
            let after = std::fs::metadata(&target)?.len();
            info!(
                source = %path.display(),
                target = %target.display(),
                before,
                after,
                ratio = before as f64 / after.max(1) as f64,
                "compressed",
            );
        }
        Command::Decompress { path } => {
            let target = decompress_file(&config, &path)?;
            info!(source = %path.display(), target = %target.display(), "decompressed");
        }
        Command::Inspect { path } => {
            let raw = std::fs::read(&path)?;
            let (header, payload) = Header::parse(&raw)?;
            let code = header.canonical_code()?;
            print!("{}", header.summary());
            println!("header:   {} bytes", header.encoded_len());
            println!("payload:  {} bytes", payload.len());
            for (&symbol, &len) in code.symbols().iter().zip(code.lengths()) {
                let bits: String = code
                    .code(symbol)
                    .unwrap_or_default()
                    .iter()
                    .map(|&b| if b == 1 { '1' } else { '0' })
                    .collect();
                println!("  {symbol:02x} {len:>3} {bits}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
