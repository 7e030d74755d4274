use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::engine::{InteractionSettings, LayoutKind, RenderSettings, ZoomLimits};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub layout: LayoutKind,
    pub camera: ZoomLimits,
    pub interaction: InteractionSettings,
    pub render: RenderSettings,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ZoomLimits {
            min_zoom,
            max_zoom,
            focus_zoom,
        } = self.camera;

        if !(min_zoom.is_finite() && min_zoom > 0.0) {
            bail!("camera.min_zoom must be a positive number, got {min_zoom}");
        }
        if !(max_zoom.is_finite() && max_zoom >= min_zoom) {
            bail!("camera.max_zoom ({max_zoom}) must not be below camera.min_zoom ({min_zoom})");
        }
        if !(focus_zoom.is_finite() && focus_zoom > 0.0) {
            bail!("camera.focus_zoom must be a positive number, got {focus_zoom}");
        }

        let InteractionSettings {
            drag_threshold,
            wheel_zoom_in,
            wheel_zoom_out,
        } = self.interaction;

        if !(drag_threshold.is_finite() && drag_threshold >= 0.0) {
            bail!("interaction.drag_threshold must be zero or more, got {drag_threshold}");
        }
        if !(wheel_zoom_in.is_finite() && wheel_zoom_in > 1.0) {
            bail!("interaction.wheel_zoom_in must be above 1, got {wheel_zoom_in}");
        }
        if !(wheel_zoom_out.is_finite() && wheel_zoom_out > 0.0 && wheel_zoom_out < 1.0) {
            bail!("interaction.wheel_zoom_out must be between 0 and 1, got {wheel_zoom_out}");
        }

        let RenderSettings {
            label_zoom_threshold,
            emphasis_scale,
            ..
        } = self.render;

        if !label_zoom_threshold.is_finite() {
            bail!("render.label_zoom_threshold must be a number");
        }
        if !(emphasis_scale.is_finite() && emphasis_scale >= 1.0) {
            bail!("render.emphasis_scale must be at least 1, got {emphasis_scale}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ViewerConfig::parse("").expect("empty config");
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.camera.min_zoom, 0.1);
        assert_eq!(config.camera.max_zoom, 3.0);
        assert_eq!(config.camera.focus_zoom, 1.5);
        assert_eq!(config.render.label_zoom_threshold, 0.5);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ViewerConfig::parse(
            r#"
            layout = "clustered"

            [camera]
            max_zoom = 5.0

            [render]
            starfield = false
            "#,
        )
        .expect("valid config");

        assert_eq!(config.layout, LayoutKind::Clustered);
        assert_eq!(config.camera.max_zoom, 5.0);
        assert_eq!(config.camera.min_zoom, 0.1);
        assert!(!config.render.starfield);
        assert_eq!(config.render.star_count, RenderSettings::default().star_count);
        assert_eq!(config.interaction, InteractionSettings::default());
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(ViewerConfig::parse("[camera]\nmin_zoom = 0.0").is_err());
        assert!(ViewerConfig::parse("[camera]\nmin_zoom = 2.0\nmax_zoom = 1.0").is_err());
        assert!(ViewerConfig::parse("[interaction]\nwheel_zoom_in = 0.9").is_err());
        assert!(ViewerConfig::parse("[interaction]\nwheel_zoom_out = 1.2").is_err());
        assert!(ViewerConfig::parse("[render]\nemphasis_scale = 0.5").is_err());
        assert!(ViewerConfig::parse("layout = \"spiral\"").is_err());
        assert!(ViewerConfig::parse("zoom = 2").is_err());
    }
}
