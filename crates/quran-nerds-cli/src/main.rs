use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use quran_nerds_config::Config;
use quran_nerds_engine::{
    ChapterIndexCache, Editions, MirrorProvider, Normalization, PlaybackQueue, ResolvedReference,
    VerseComposer, VerseReferenceResolver, excerpt, normalize_markup, read_note,
    relative_note_path, scan_note_files, write_note,
};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "quran-nerds",
    version,
    about = "Verse citation tools for QuranNerds notes"
)]
struct Cli {
    /// Config file [default: ~/.config/quran-nerds/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verse data mirror directory, overriding the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite pasted verse citations into verse blocks
    Normalize {
        /// Note file or notes directory [default: notes_path from the config]
        path: Option<PathBuf>,

        /// Rewrite files in place instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Resolve a reference such as "Al-Baqara 1-4"
    Resolve { reference: String },

    /// List the recitation audio for a reference
    Play { reference: String },

    /// Build a verse block from a chapter number and verse or range
    Compose { chapter: String, verses: String },

    /// Print the plain-text excerpt of a note
    Excerpt {
        file: PathBuf,

        /// Maximum length in characters [default: excerpt_length from the config]
        #[arg(long)]
        max: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    log::debug!("verse data mirror: {}", config.data_dir.display());

    match cli.command {
        Command::Normalize { path, write } => {
            let path = path.unwrap_or_else(|| config.notes_path.clone());
            normalize(&path, write)
        }
        Command::Resolve { reference } => {
            let resolved = resolve(&config, &reference)?;
            println!("{resolved}");
            Ok(())
        }
        Command::Play { reference } => play(&config, &reference),
        Command::Compose { chapter, verses } => {
            let editions = Editions {
                arabic: config.editions.arabic.clone(),
                english: config.editions.english.clone(),
                bangla: config.editions.bangla.clone(),
            };
            let composer =
                VerseComposer::new(MirrorProvider::new(&config.data_dir)).with_editions(editions);
            let verse = composer.compose(&chapter, &verses)?;
            println!("{}", verse.to_markup());
            Ok(())
        }
        Command::Excerpt { file, max } => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            println!("{}", excerpt(&body, max.unwrap_or(config.excerpt_length)));
            Ok(())
        }
    }
}

/// Loads the config file, falling back to defaults rooted at the current
/// directory when there is none.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(Config::config_path, Path::to_path_buf);
    match Config::load_from_path(&path)? {
        Some(config) => {
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::new("."))
        }
    }
}

/// Notes to process: every note under a directory, or a single file.
fn note_targets(path: &Path) -> Result<(PathBuf, Vec<RelativePathBuf>)> {
    if path.is_dir() {
        let files = scan_note_files(path)?;
        let notes = files
            .iter()
            .filter_map(|file| relative_note_path(path, file))
            .collect();
        return Ok((path.to_path_buf(), notes));
    }

    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let Some(notes) = relative_note_path(&root, path) else {
        bail!("not a note file: {}", path.display());
    };
    Ok((root, vec![notes]))
}

fn normalize(path: &Path, write: bool) -> Result<()> {
    let single_file = !path.is_dir();
    let (root, notes) = note_targets(path)?;

    let mut rewritten = 0;
    for note in &notes {
        let body = read_note(note, &root)?;
        match normalize_markup(&body) {
            Normalization::Rewritten(markup) if write => {
                write_note(note, &root, &markup)?;
                println!("rewrote {note}");
                rewritten += 1;
            }
            Normalization::Rewritten(markup) if single_file => {
                println!("{markup}");
                rewritten += 1;
            }
            Normalization::Rewritten(_) => {
                println!("would rewrite {note}");
                rewritten += 1;
            }
            Normalization::Unchanged(markup) if single_file && !write => println!("{markup}"),
            Normalization::Unchanged(_) => log::info!("unchanged {note}"),
        }
    }

    eprintln!("{rewritten} of {} notes with new verse blocks", notes.len());
    Ok(())
}

fn resolver(config: &Config) -> VerseReferenceResolver<MirrorProvider> {
    let cache = ChapterIndexCache::new(MirrorProvider::new(&config.data_dir))
        .with_timeout(config.fetch_timeout());
    VerseReferenceResolver::new(cache)
}

fn resolve(config: &Config, reference: &str) -> Result<ResolvedReference> {
    match resolver(config).resolve(reference) {
        Some(resolved) => Ok(resolved),
        None => bail!("could not resolve {reference:?}"),
    }
}

fn play(config: &Config, reference: &str) -> Result<()> {
    let resolved = resolve(config, reference)?;
    let provider = MirrorProvider::new(&config.data_dir);
    let queue = PlaybackQueue::build(&provider, &resolved, &config.reciter_edition);

    for entry in queue.entries() {
        println!("{}:{}\t{}", entry.chapter, entry.verse, entry.url);
    }
    if !queue.skipped().is_empty() {
        eprintln!("skipped verses without audio: {:?}", queue.skipped());
    }
    if let Some(range) = queue.out_of_range() {
        eprintln!(
            "skipped verses {}-{}: past the end of any chapter",
            range.start(),
            range.end()
        );
    }
    if queue.is_empty() {
        bail!("no audio available for {resolved}");
    }
    Ok(())
}
