use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_lme::export::{JsonContentSource, OutputFile, Settings, generate, parse_output_files, render_manifest};
use core_lme::setup_logging;

#[derive(Parser)]
#[command(name = "lme")]
#[command(about = "Site content -> llms.txt manifest exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the configured manifest files into the output directory
    Generate {
        /// Site export JSON to read content from
        #[arg(short, long, value_parser = validate_input_file)]
        content: PathBuf,

        /// Settings JSON (defaults apply when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Directory the manifest files are written into
        #[arg(short, long, default_value = ".", value_parser = validate_output_dir)]
        out_dir: PathBuf,

        /// Override the configured file selection (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        files: Vec<String>,
    },

    /// Render a single manifest to stdout without writing anything
    Render {
        /// Site export JSON to read content from
        #[arg(short, long, value_parser = validate_input_file)]
        content: PathBuf,

        /// Settings JSON (defaults apply when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Which manifest to render
        #[arg(short, long, default_value = "llms.txt")]
        file: String,
    },
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Output directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Output path is not a directory: {}", path.display()));
    }

    Ok(path)
}

fn load_settings(path: &Option<PathBuf>) -> Settings {
    match path {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                println!("ERROR: Cannot read settings ({path:?}) due to: {e}");
                std::process::exit(1)
            }
        },
        None => Settings::default(),
    }
}

fn load_source(path: &PathBuf) -> JsonContentSource {
    match JsonContentSource::load(path) {
        Ok(source) => source,
        Err(e) => {
            println!("ERROR: Cannot read site export ({path:?}) due to: {e}");
            std::process::exit(1)
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logging("lme=info");

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate {
            content,
            settings,
            out_dir,
            files,
        } => {
            let settings = load_settings(settings);
            let source = load_source(content);

            let requested = if files.is_empty() {
                settings.output_files()
            } else {
                parse_output_files(files)
            };
            let requested = match requested {
                Ok(files) if !files.is_empty() => files,
                Ok(_) => {
                    println!("ERROR: No output files selected.");
                    std::process::exit(1)
                }
                Err(e) => {
                    println!("ERROR: {e}");
                    std::process::exit(1)
                }
            };

            match generate(&settings, &source, out_dir, &requested).await {
                Ok(report) => {
                    for note in &report.notes {
                        println!("{note}");
                    }
                    println!("{}", report.summary());
                }
                Err(e) => {
                    println!("ERROR: Generation failed: {e}");
                    std::process::exit(1)
                }
            }
        }

        Commands::Render { content, settings, file } => {
            let settings = load_settings(settings);
            let source = load_source(content);

            let file = match OutputFile::parse(file) {
                Ok(file) => file,
                Err(e) => {
                    println!("ERROR: {e}");
                    std::process::exit(1)
                }
            };

            print!("{}", render_manifest(&settings, &source, file).await);
        }
    }
}
