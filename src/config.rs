//! Startup settings.
//!
//! Defaults, overridden by `~/.corkboard/config.toml` when present, overridden
//! by command line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::layout::DesktopGrid;

const DEFAULT_IMAGES_DIR: &str = "assets/images";
const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub images_dir: PathBuf,
    /// Serve the built-in sample set instead of touching the filesystem.
    pub hosted: bool,
    pub desktop: DesktopGrid,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            hosted: false,
            desktop: DesktopGrid::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// On-disk form; every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub images_dir: Option<PathBuf>,
    pub hosted: Option<bool>,
    pub desktop: Option<DesktopGrid>,
    pub window_width: Option<f32>,
    pub window_height: Option<f32>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// A missing file is an empty config, not an error.
    pub fn read(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::from_io(path, e)),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
    pub hosted: bool,
    pub columns: Option<usize>,
    pub h_spacing: Option<f32>,
    pub v_spacing: Option<f32>,
}

impl CliArgs {
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let cli = CliArgs {
            config: args.opt_value_from_str("--config")?,
            images_dir: args.opt_value_from_str("--images-dir")?,
            hosted: args.contains("--hosted"),
            columns: args.opt_value_from_str("--columns")?,
            h_spacing: args.opt_value_from_str("--h-spacing")?,
            v_spacing: args.opt_value_from_str("--v-spacing")?,
        };
        let rest = args.finish();
        if !rest.is_empty() {
            log::warn!("Ignoring unexpected arguments: {:?}", rest);
        }
        Ok(cli)
    }
}

impl Config {
    pub fn resolve(file: FileConfig, cli: CliArgs) -> Self {
        let defaults = Config::default();
        let mut desktop = file.desktop.unwrap_or(defaults.desktop);
        if let Some(columns) = cli.columns {
            desktop.columns = columns;
        }
        if let Some(spacing) = cli.h_spacing {
            desktop.horizontal_spacing = spacing;
        }
        if let Some(spacing) = cli.v_spacing {
            desktop.vertical_spacing = spacing;
        }
        if desktop.columns == 0 {
            log::warn!("Desktop grid needs at least one column, using 1");
            desktop.columns = 1;
        }

        Config {
            images_dir: cli
                .images_dir
                .or(file.images_dir)
                .unwrap_or(defaults.images_dir),
            hosted: cli.hosted || file.hosted.unwrap_or(defaults.hosted),
            desktop,
            window_width: file.window_width.unwrap_or(defaults.window_width),
            window_height: file.window_height.unwrap_or(defaults.window_height),
        }
    }

    /// Read flags from the process arguments and the config file they point
    /// at. A broken config file is logged and skipped; bad flags are an error.
    pub fn load() -> Result<Self> {
        let cli = CliArgs::parse(pico_args::Arguments::from_env())?;
        let file = match cli.config.clone().or_else(default_config_path) {
            Some(path) => FileConfig::read(&path).unwrap_or_else(|e| {
                log::warn!("{}", e);
                FileConfig::default()
            }),
            None => FileConfig::default(),
        };
        let config = Self::resolve(file, cli);
        log::info!("{:?}", config);
        Ok(config)
    }
}

fn config_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|d| d.join(".corkboard"))
}

fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
