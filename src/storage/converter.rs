//! A project file on disk and the report file generated from it.
//!
//! The [`Converter`] ties the pieces together: it loads the [`RowStore`],
//! assembles the [`Tree`], renders the [`Report`] and writes it next to the
//! source with a `.txt` extension. Nothing is written unless every step
//! succeeds.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::{BuildError, Config, RenderError, Report, Tree},
    storage::{LoadError, RowStore},
};

/// Converts one project file into a plain-text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    source: PathBuf,
    config: Config,
}

/// Errors that can occur while converting a project file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The project file could not be read or parsed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The project tree could not be assembled.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The report could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The `ssm2txt.toml` next to the project file exists but could not be
    /// used.
    #[error("invalid configuration {}: {message}", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The source already has the report's extension, so writing the report
    /// would replace it.
    #[error("refusing to overwrite {} with its own report", .0.display())]
    OutputIsSource(PathBuf),

    /// The report could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// The report path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Converter {
    /// Prepares to convert the given project file, picking up an
    /// `ssm2txt.toml` from the same directory if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the configuration file exists but
    /// cannot be read or is invalid.
    pub fn new(source: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        let source = source.into();
        let config = load_config(source.parent().unwrap_or_else(|| Path::new("")))?;
        Ok(Self { source, config })
    }

    /// Prepares to convert the given project file with explicit settings.
    #[must_use]
    pub fn with_config(source: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            source: source.into(),
            config,
        }
    }

    /// The settings used for rendering.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The path the report is written to: the source path with its
    /// extension replaced by `txt`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.source.with_extension("txt")
    }

    /// Loads the project file and renders the report without writing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, the tree cannot be
    /// assembled or the report cannot be rendered.
    #[instrument(skip(self), fields(source = %self.source.display()))]
    pub fn render(&self) -> Result<String, ConvertError> {
        let store = RowStore::load(&self.source)?;
        let tree = Tree::build(&store)?;
        let text = Report::new(&tree, &store, &self.config).render()?;
        Ok(text)
    }

    /// Renders the report and writes it to [`Self::output_path`].
    ///
    /// Returns the path written to.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the report cannot be written.
    /// Nothing is written in either case.
    pub fn convert(&self) -> Result<PathBuf, ConvertError> {
        let output = self.output_path();
        if output == self.source {
            return Err(ConvertError::OutputIsSource(output));
        }

        let mut text = self.render()?;
        text.push('\n');

        std::fs::write(&output, text).map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;
        tracing::info!("Wrote report to {}", output.display());

        Ok(output)
    }
}

fn load_config(directory: &Path) -> Result<Config, ConvertError> {
    let path = directory.join(Config::FILE_NAME);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConvertError::Config {
                path,
                message: format!("Failed to read config file: {e}"),
            });
        }
    };
    Config::parse(&content).map_err(|message| ConvertError::Config { path, message })
}
