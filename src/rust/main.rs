use anyhow::Context;
use clap::{Parser, Subcommand};
use proteinstat::config::{AppConfig, AppConfigBuilder};
use proteinstat::handlers::{ProteinForm, SearchForm};
use proteinstat::search::write_results_csv;
use proteinstat::view::ReferenceView;
use proteinstat::{ProteinId, ProteinService, RocksProteinStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "proteinstat")]
#[command(about = "Analyze protein sequences and keep a searchable record of the results")]
#[command(version)]
struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sequence and store the result
    Analyze {
        /// Protein name
        #[arg(short, long)]
        name: String,

        /// Amino acid sequence (one-letter codes, case-insensitive)
        #[arg(short, long)]
        sequence: String,
    },
    /// Search stored proteins by name and/or sequence substring
    Search {
        /// Name must contain this text (case-sensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Sequence must contain this fragment
        #[arg(short, long)]
        sequence: Option<String>,

        /// Output CSV file path (optional - prints a table if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a stored protein
    Show {
        /// Protein id
        id: ProteinId,
    },
    /// Replace the name and sequence of a stored protein
    Edit {
        /// Protein id
        id: ProteinId,

        /// New protein name
        #[arg(short, long)]
        name: String,

        /// New amino acid sequence
        #[arg(short, long)]
        sequence: String,
    },
    /// Delete a stored protein
    Delete {
        /// Protein id
        id: ProteinId,
    },
    /// Print the amino acid reference table
    Info,
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let base = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let mut builder = AppConfigBuilder::from_config(base);
    if let Some(db) = &cli.db {
        builder = builder.db_path(db);
    }
    Ok(builder.build()?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(&cli)?;

    if let Commands::Info = cli.command {
        print!("{}", ReferenceView);
        return Ok(());
    }

    let store = RocksProteinStore::open(&config.store).with_context(|| {
        format!("Failed to open database {}", config.store.db_path.display())
    })?;
    let service = ProteinService::new(store, &config);
    let width = service.display().chart_width;

    match cli.command {
        Commands::Analyze { name, sequence } => {
            let view = service.analyze(&ProteinForm::new(&name, &sequence))?;
            println!("Stored protein with id {}\n", view.id);
            print!("{}", view.render(width));
        }
        Commands::Search { name, sequence, output } => {
            let view = service.search(&SearchForm { name, sequence })?;

            if let Some(output_path) = output {
                let file = std::fs::File::create(&output_path)?;
                write_results_csv(&view.results, file)?;
                println!(
                    "Wrote {} result(s) to {}",
                    view.results.len(),
                    output_path.display()
                );
            } else {
                print!("{}", view);
            }
        }
        Commands::Show { id } => {
            print!("{}", service.view(id)?.render(width));
        }
        Commands::Edit { id, name, sequence } => {
            let view = service.edit(id, &ProteinForm::new(&name, &sequence))?;
            println!("Updated protein {}\n", id);
            print!("{}", view.render(width));
        }
        Commands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted protein {}", id);
        }
        // printed before the store was opened
        Commands::Info => {}
    }

    let metrics = service.store().metrics();
    log::debug!("Store activity: {} operation(s), {:?}", metrics.total_operations(), metrics);
    Ok(())
}
