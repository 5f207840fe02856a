use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{self, EnvDirs};
use crate::error::{AppError, AppResult};
use crate::logging;
use crate::render::{render_preview, ThemeSource};
use crate::storage::FileStore;
use crate::theme::{apply_theme, RootStyle, Theme, ThemeRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "process-palette",
    about = "Manage color themes for BPMN diagrams and preview themed rendering",
    version
)]
pub struct Cli {
    /// Directory holding persisted theme data.
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List known themes; the active one is marked with `*`.
    Themes,

    /// Make a theme the active one.
    Select { id: String },

    /// Insert or replace a theme from a JSON file.
    Upsert { file: PathBuf },

    /// Print the active theme as a `:root` CSS block.
    Css,

    /// Draw a sample diagram with the active theme and print it as SVG.
    Preview,
}

pub fn run(cli: Cli) -> AppResult<()> {
    let app_config = config::load_app_config();
    logging::init(app_config.log_filter.as_deref());

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config::data_dir(&app_config, &EnvDirs::from_env())?,
    };
    tracing::info!(data_dir = %data_dir.display(), "opening theme store");

    let mut registry = ThemeRegistry::new(FileStore::new(data_dir));
    registry.init_from_storage();

    let stdout = std::io::stdout();
    execute(&cli.command, &mut registry, &mut stdout.lock())
}

pub fn execute(command: &Command, registry: &mut ThemeRegistry, out: &mut dyn Write) -> AppResult<()> {
    match command {
        Command::Themes => {
            for theme in registry.themes() {
                let marker = if theme.id == registry.current_theme().id {
                    '*'
                } else {
                    ' '
                };
                writeln!(out, "{marker} {}\t{}", theme.id, theme.name)?;
            }
        }
        Command::Select { id } => {
            if !registry.themes().iter().any(|theme| &theme.id == id) {
                return Err(AppError::UnknownTheme(id.clone()));
            }
            registry.set_current_theme(id);
            writeln!(out, "active theme: {id}")?;
        }
        Command::Upsert { file } => {
            let theme = read_theme_file(file)?;
            let id = theme.id.clone();
            registry.upsert_theme(theme);
            writeln!(out, "saved theme: {id}")?;
        }
        Command::Css => {
            let mut style = RootStyle::new();
            apply_theme(&mut style, registry.current_theme());
            write!(out, "{}", style.to_css())?;
        }
        Command::Preview => {
            let source = ThemeSource::Static(registry.current_theme().clone());
            write!(out, "{}", render_preview(source))?;
        }
    }
    Ok(())
}

fn read_theme_file(path: &Path) -> AppResult<Theme> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::ReadTheme {
        path: path.to_path_buf(),
        source,
    })?;
    let theme: Theme = serde_json::from_str(&contents)?;
    if theme.id.is_empty() {
        return Err(AppError::MissingThemeId);
    }
    Ok(theme)
}
