//! tweetclean CLI - cleanse informal Indonesian tweets
//!
//! Serves the HTTP API or cleanses texts and CSV files offline.

use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tweetclean::batch::{self, DEFAULT_TEXT_COLUMN};
use tweetclean::config::{DEFAULT_BIND, DEFAULT_MAX_UPLOAD_BYTES};
use tweetclean::{BatchOptions, CleanseOptions, Cleanser, Lexicon, LexiconPaths, ServerConfig};

/// Cleansing pipeline and web API for Indonesian tweets
#[derive(Parser)]
#[command(
    name = "tweetclean",
    version,
    about = "Cleanse informal Indonesian tweets",
    long_about = "tweetclean - lowercasing, noise removal, profanity removal, slang \
                  normalization and stopword removal for Indonesian tweets.\n\n\
                  Usage:\n  \
                  tweetclean serve                Start the HTTP API\n  \
                  tweetclean text \"RT @user ...\"  Cleanse one text\n  \
                  tweetclean file data.csv        Cleanse the Tweet column of a CSV file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    lexicon: LexiconArgs,
}

#[derive(Args)]
struct LexiconArgs {
    /// Directory holding the default lexicon database files
    #[arg(long, global = true, env = "TWEETCLEAN_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Slang table (.db or .csv), overrides --data-dir
    #[arg(long, global = true, env = "TWEETCLEAN_SLANG")]
    slang: Option<PathBuf>,

    /// Profanity table (.db or .csv), overrides --data-dir
    #[arg(long, global = true, env = "TWEETCLEAN_PROFANITY")]
    profanity: Option<PathBuf>,

    /// Stopword table (.db or .csv), overrides --data-dir
    #[arg(long, global = true, env = "TWEETCLEAN_STOPWORDS")]
    stopwords: Option<PathBuf>,
}

impl LexiconArgs {
    fn paths(&self) -> LexiconPaths {
        let mut paths = LexiconPaths::in_dir(&self.data_dir);
        if let Some(ref slang) = self.slang {
            paths = paths.with_slang(slang);
        }
        if let Some(ref profanity) = self.profanity {
            paths = paths.with_profanity(profanity);
        }
        if let Some(ref stopwords) = self.stopwords {
            paths = paths.with_stopwords(stopwords);
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen address
        #[arg(short, long, env = "TWEETCLEAN_BIND", default_value = DEFAULT_BIND)]
        bind: String,

        /// Maximum upload size in megabytes
        #[arg(long, env = "TWEETCLEAN_MAX_UPLOAD_MB", default_value_t = DEFAULT_MAX_UPLOAD_BYTES / (1024 * 1024))]
        max_upload_mb: usize,
    },

    /// Cleanse a single text ("-" reads stdin)
    Text {
        /// Text to cleanse
        text: String,

        /// Lowercase and strip noise only (no lexicon)
        #[arg(long)]
        minimal: bool,
    },

    /// Cleanse every row of a CSV file
    File {
        /// Input CSV file
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the text column
        #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
        column: String,

        /// Output a JSON array instead of CSV
        #[arg(long)]
        json: bool,

        /// Lowercase and strip noise only (no lexicon)
        #[arg(long)]
        minimal: bool,
    },

    /// Show lexicon table sizes
    Lexicon,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "tweetclean=info,tower_http=info",
        _ => "tweetclean=warn",
    };
    init_tracing(default_filter);

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let paths = cli.lexicon.paths();

    match cli.command {
        Commands::Serve {
            bind,
            max_upload_mb,
        } => {
            let config = ServerConfig::new()
                .with_bind(&bind)?
                .with_lexicon(paths)
                .with_max_upload_mb(max_upload_mb)?;

            let lexicon = Lexicon::load(&config.lexicon).await?;
            println!(
                "{} Serving on http://{} (docs at /docs/)",
                "✓".green().bold(),
                config.bind
            );
            tweetclean::server::serve(&config, lexicon).await?;
        }

        Commands::Text { text, minimal } => {
            let text = if text == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text
            };

            let cleanser = load_cleanser(&paths, options_for(minimal)).await?;
            write_output(None, &cleanser.cleanse(&text))?;
        }

        Commands::File {
            input,
            output,
            column,
            json,
            minimal,
        } => {
            let cleanser = load_cleanser(&paths, options_for(minimal))
                .await?
                .with_batch_options(BatchOptions::new().with_text_column(&column));

            let pb = create_spinner("Reading file...");
            let bytes = fs::read(&input)?;
            let rows = cleanser.parse_rows(&bytes)?;
            debug!(file = %input.display(), rows = rows.len(), "batch file parsed");

            pb.set_message(format!("Cleansing {} rows...", rows.len()));
            let cleaned = batch::cleanse_rows(&rows, cleanser.lexicon(), cleanser.options());

            let rendered = if json {
                serde_json::to_string_pretty(&cleaned)?
            } else {
                let mut buf = Vec::new();
                batch::write_cleaned_csv(&rows, &cleaned, &column, &mut buf)?;
                String::from_utf8(buf)?
            };
            pb.finish_and_clear();

            write_output(output.as_ref(), rendered.trim_end())?;

            if let Some(path) = output {
                println!(
                    "{} Cleansed {} rows: {}",
                    "✓".green().bold(),
                    cleaned.len(),
                    path.display()
                );
            }
        }

        Commands::Lexicon => {
            let pb = create_spinner("Loading lexicon...");
            let lexicon = Lexicon::load(&paths).await?;
            pb.finish_and_clear();

            let stats = lexicon.stats();
            println!("{}", "Lexicon".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {} ({})", "Slang".bold(), stats.slang, paths.slang.display());
            println!(
                "{}: {} ({})",
                "Profanity".bold(),
                stats.profanity,
                paths.profanity.display()
            );
            println!(
                "{}: {} ({})",
                "Stopwords".bold(),
                stats.stopwords,
                paths.stopwords.display()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn options_for(minimal: bool) -> CleanseOptions {
    if minimal {
        CleanseOptions::minimal()
    } else {
        CleanseOptions::default()
    }
}

/// Loads the lexicon only when the chosen options consult it.
async fn load_cleanser(
    paths: &LexiconPaths,
    options: CleanseOptions,
) -> tweetclean::Result<Cleanser> {
    let lexicon = if options.uses_lexicon() {
        let pb = create_spinner("Loading lexicon...");
        let lexicon = Lexicon::load(paths).await;
        pb.finish_and_clear();
        lexicon?
    } else {
        Lexicon::default()
    };
    Ok(Cleanser::new(lexicon).with_options(options))
}

fn print_version() {
    println!("{} {}", "tweetclean".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Cleansing pipeline and web API for Indonesian tweets");
    println!();
    println!("Lexicon backends: SQLite (.db), CSV (.csv)");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
