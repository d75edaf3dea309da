use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gabc_core::{Deadline, Syllabifier};
use gabc_preface::{DialogueMode, GenerateOptions, Generator, Layout};
use gabc_syllabifier::{DictionarySyllabifier, StorePaths};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// gabcgen: sets the Preface of the Mass to the preface tone, in GABC.
/// Commands:
///   - generate [--input text.txt] [--out preface.gabc]   (text on STDIN when no input)
///   - syllabify WORD...                                   (debug)
#[derive(Parser, Debug)]
#[command(name = "gabcgen", version, about = "Preface tone GABC generator")]
struct Cli {
    /// Directory holding the liturgical and user syllable dictionaries
    #[arg(long, global = true, default_value = "assets/syllable_databases")]
    dict_dir: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Composes a preface: one phrase per line, a blank line between paragraphs
    Generate {
        /// Text file; read from STDIN when missing
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file; written to STDOUT when missing
        #[arg(long)]
        out: Option<PathBuf>,

        /// Dialogue tone: solemn or regional
        #[arg(long, default_value = "solemn")]
        dialogue: String,

        /// Roles come from the marks ending each line (=, *, //, +)
        #[arg(long)]
        marked: bool,
    },

    /// (Debug) Prints the syllables and stressed syllable of each word
    Syllabify {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn read_stdin_string() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).context("failed reading STDIN")?;
    Ok(buf)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let store = Arc::new(DictionarySyllabifier::new(StorePaths::in_dir(&cli.dict_dir)));
    store
        .load()
        .with_context(|| format!("failed loading syllable dictionaries from {}", cli.dict_dir.display()))?;

    match cli.cmd {
        Commands::Generate { input, out, dialogue, marked } => {
            let text = match input {
                Some(p) => fs::read_to_string(&p).with_context(|| format!("failed reading text: {}", p.display()))?,
                None => read_stdin_string()?,
            };
            let opts = GenerateOptions {
                dialogue: DialogueMode::from_name(&dialogue),
                layout: if marked { Layout::Marked } else { Layout::Positional },
            };
            let preface = Generator::new(store.clone())
                .compose(&opts, &text, &Deadline::none())
                .context("failed composing preface")?;

            match out {
                Some(p) => {
                    fs::write(&p, &preface.gabc).with_context(|| format!("failed writing {}", p.display()))?;
                    eprintln!("✓ wrote {}", p.display());
                }
                None => println!("{}", preface.gabc),
            }
        }

        // ----- DEBUG ROUTE -----
        Commands::Syllabify { words } => {
            let deadline = Deadline::none();
            for word in &words {
                let lower = word.to_lowercase();
                match store.syllabify(&lower, &deadline) {
                    Ok(s) => println!("{word}\t{}\t{}", s.slashed, s.tonic_index),
                    Err(e) => eprintln!("{word}\t{e}"),
                }
            }
            store.save().context("failed saving learned syllables")?;
        }
    }

    Ok(())
}
