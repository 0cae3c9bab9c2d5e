//! Everything a command needs: configuration, the state directory, and the
//! review engine loaded from it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rdl_config::RedlineConfig;
use rdl_review::{
    EngineSettings, InMemoryRegistry, ReviewEngine, StateFile, SystemClock, TrailObserver,
};

use crate::cli::GlobalFlags;

pub struct AppContext {
    pub config: RedlineConfig,
    pub state_dir: PathBuf,
    pub engine: ReviewEngine<InMemoryRegistry>,
}

impl AppContext {
    /// Load `state.json` from the state directory and attach the review trail.
    pub fn init(config: RedlineConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let state_dir = resolve_state_dir(flags.state_dir.as_deref(), &config);
        let state = StateFile::load(&state_dir)
            .with_context(|| format!("failed to load state from {}", state_dir.display()))?;

        let clock = SystemClock::with_locale(
            config.review.timestamp_format.clone(),
            &config.review.timestamp_locale,
        );
        let mut engine = ReviewEngine::with_store(
            state.sessions,
            state.registry,
            Box::new(clock),
            EngineSettings::from(&config.review),
        );

        match TrailObserver::new(StateFile::trail_dir_in(&state_dir)) {
            Ok(trail) => engine.subscribe(Box::new(trail)),
            Err(error) => tracing::warn!(%error, "review trail disabled"),
        }

        Ok(Self {
            config,
            state_dir,
            engine,
        })
    }

    /// Write sessions and registry back to `state.json`.
    pub fn persist(self) -> anyhow::Result<()> {
        let (sessions, registry) = self.engine.into_parts();
        StateFile { registry, sessions }
            .save(&self.state_dir)
            .with_context(|| format!("failed to save state to {}", self.state_dir.display()))?;
        Ok(())
    }
}

fn resolve_state_dir(flag: Option<&str>, config: &RedlineConfig) -> PathBuf {
    flag.map_or_else(
        || PathBuf::from(&config.general.state_dir),
        PathBuf::from,
    )
}

/// Export directory: `--out` wins over `export.output_dir`.
#[must_use]
pub fn resolve_output_dir(out: Option<&str>, config: &RedlineConfig) -> PathBuf {
    out.map_or_else(
        || Path::new(&config.export.output_dir).to_path_buf(),
        PathBuf::from,
    )
}
