use clap::{Parser, Subcommand};
use docnav::{config, generate, output, scan};
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Sidebar generator for documentation directories")]
#[command(long_about = "\
Sidebar generator for documentation directories

Your filesystem is the data source. Directories become categories, documents
are ordered by front matter position or numeric prefix, and _category_ files
override how a category is shown.

Content structure:

  docs/
  ├── sidebar.toml                 # Generator settings (optional)
  ├── 01-intro.md                  # Doc \"intro\" (prefix orders, then is stripped)
  ├── 02-guides/                   # Category \"Guides\"
  │   ├── _category_.json          # label, position, collapsed, link, ...
  │   ├── index.md                 # Category landing page (index or README)
  │   ├── 01-setup.md              # sidebar_position in front matter wins
  │   └── 02-advanced/             # Nested category
  │       └── tuning.mdx
  └── _drafts/                     # Leading underscore = skipped

Resolution (first available wins):
  Position: front matter / _category_ position → number prefix → input order
  Label:    sidebar_label / _category_ label → title-cased directory name
  Link:     _category_ link → detected index document

Run 'docnav gen-config' to generate a documented sidebar.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and write the sidebar as JSON
    Build {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate the content directory and print the sidebar tree
    Check,
    /// Print a stock sidebar.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match cli.command {
        Command::Build { output } => {
            let sidebar = build_sidebar(&cli.source)?;
            let json = serde_json::to_string_pretty(&sidebar)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json)?;
                    info!("Wrote sidebar to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let sidebar = build_sidebar(&cli.source)?;
            output::print_sidebar(&sidebar);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, scan documents, and generate the configured sidebar slice.
fn build_sidebar(
    source: &Path,
) -> Result<Vec<docnav::types::SidebarItem>, Box<dyn std::error::Error>> {
    let config = config::load_config(source)?;
    let generator = generate::SidebarGenerator::new(config, source);

    let parser = generator.config().number_prefix_parser();
    let documents = scan::scan(source, parser.as_ref())?;
    info!("Found {} documents in {}", documents.len(), source.display());

    Ok(generator.generate(&documents)?)
}
