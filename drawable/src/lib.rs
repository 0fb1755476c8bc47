//! Android notification icon generation.
//!
//! A single source image is shrunk to fit each notification density, centered
//! on a transparent canvas, enhanced for visibility in the status bar and
//! written as a compressed png to `<res>/drawable-<dpi>/ic_notification.png`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod density;
pub mod enhance;
mod report;
mod scaler;

pub use density::{DensityTarget, NOTIFICATION_DENSITIES};
pub use report::{Summary, TargetOutcome};
pub use scaler::{center_offset, fit_within, write_png, Scaler};

pub const DEFAULT_ICON: &str = "assets/icons/icon.png";
pub const DEFAULT_RES: &str = "android/app/src/main/res";
pub const ICON_FILE_NAME: &str = "ic_notification.png";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub res_dir: PathBuf,
    pub file_name: &'static str,
    pub targets: &'static [DensityTarget],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: DEFAULT_ICON.into(),
            res_dir: DEFAULT_RES.into(),
            file_name: ICON_FILE_NAME,
            targets: &NOTIFICATION_DENSITIES,
        }
    }
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, res_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            res_dir: res_dir.into(),
            ..Default::default()
        }
    }

    pub fn output_dir(&self, target: &DensityTarget) -> PathBuf {
        self.res_dir.join(target.name)
    }

    pub fn output_path(&self, target: &DensityTarget) -> PathBuf {
        self.output_dir(target).join(self.file_name)
    }
}

/// Progress notifications emitted by [`generate_all_with`].
#[derive(Debug)]
pub enum Event<'a> {
    Start(&'a DensityTarget),
    Finish(&'a TargetOutcome),
}

/// Decodes `source`, renders a `size`x`size` notification icon and writes it
/// to `output` as png.
pub fn generate_icon(source: &Path, output: &Path, size: u32) -> Result<()> {
    Scaler::open(source)
        .and_then(|scaler| scaler.save(output, size))
        .with_context(|| format!("failed to create {}", output.display()))?;
    tracing::debug!("wrote {} ({size}x{size}px)", output.display());
    Ok(())
}

fn generate_target(config: &Config, target: &DensityTarget, path: &Path) -> Result<()> {
    let dir = config.output_dir(target);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    generate_icon(&config.input, path, target.size)
}

pub fn generate_all(config: &Config) -> Result<Summary> {
    generate_all_with(config, |_| {})
}

/// Generates every configured density in order.
///
/// Returns an error only when the source image does not exist, in which case
/// nothing is written. Failures of individual densities are recorded in the
/// returned [`Summary`] and do not stop the remaining ones.
pub fn generate_all_with(
    config: &Config,
    mut on_event: impl FnMut(Event<'_>),
) -> Result<Summary> {
    anyhow::ensure!(
        config.input.exists(),
        "source image {} not found",
        config.input.display()
    );
    let mut summary = Summary::default();
    for target in config.targets {
        on_event(Event::Start(target));
        let path = config.output_path(target);
        let result = generate_target(config, target, &path);
        if let Err(err) = &result {
            tracing::warn!("{}: {:#}", target.name, err);
        }
        let outcome = TargetOutcome {
            target: *target,
            path,
            result,
        };
        on_event(Event::Finish(&outcome));
        summary.push(outcome);
    }
    Ok(summary)
}
