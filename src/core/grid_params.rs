use std::path::{Path, PathBuf};

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::RenderStyle,
    error::{GridError, GridResult},
    file_io::{read_text_file, FilePrefix},
    parameter_grid::{ParameterGrid, ParameterRange},
};

pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/vsoch/juliart-grid";

/**
 * Everything needed to render a grid, assemble its gallery, and build its animation.
 * Loaded once (or defaulted) and then passed by reference through the whole run.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridParams {
    pub ca_range: ParameterRange,
    pub cb_range: ParameterRange,
    pub resolution: u32,
    pub iterations: u32,
    pub zoom: f64,
    pub font_size: u32,
    pub label_position: [u32; 2],
    pub label_color_rgb: [u8; 3],
    // Fixed style for every frame; sampled once per run when unset.
    pub style: Option<RenderStyle>,
    pub style_seed: Option<u64>,
    pub output_directory: PathBuf,
    pub images_directory: String,
    pub template_path: PathBuf,
    pub index_file: String,
    // `None` disables the animation.
    pub animation_file: Option<String>,
    pub animation_frame_delay_ms: u32,
    pub repository_url: String,
    pub background_color: String,
    // Fill the gallery's `cb` label from `ca`, as the first gallery generator did.
    pub mirror_ca_in_cb_label: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        GridParams {
            ca_range: ParameterRange::default(),
            cb_range: ParameterRange::default(),
            resolution: 250,
            iterations: 200,
            zoom: 1.8,
            font_size: 16,
            label_position: [10, 10],
            label_color_rgb: [255, 255, 255],
            style: None,
            style_seed: None,
            output_directory: PathBuf::from("."),
            images_directory: "images".to_owned(),
            template_path: PathBuf::from("template.html"),
            index_file: "index.html".to_owned(),
            animation_file: Some("juliaset_grid.gif".to_owned()),
            animation_frame_delay_ms: 100,
            repository_url: DEFAULT_REPOSITORY_URL.to_owned(),
            background_color: "white".to_owned(),
            mirror_ca_in_cb_label: false,
        }
    }
}

impl GridParams {
    pub fn from_file(path: &Path) -> GridResult<GridParams> {
        let params: GridParams = serde_json::from_str(&read_text_file(path)?)?;
        Ok(params)
    }

    pub fn validate(&self) -> GridResult<()> {
        self.ca_range.validate("ca_range")?;
        self.cb_range.validate("cb_range")?;
        if self.resolution == 0 {
            return Err(GridError::invalid_params("resolution must be positive"));
        }
        if self.iterations == 0 {
            return Err(GridError::invalid_params("iterations must be positive"));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(GridError::invalid_params(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if self.font_size == 0 {
            return Err(GridError::invalid_params("font_size must be positive"));
        }
        Ok(())
    }

    pub fn grid(&self) -> ParameterGrid {
        ParameterGrid::new(&self.ca_range, &self.cb_range)
    }

    /**
     * The style shared by every frame. Uses the fixed style when one is given,
     * otherwise samples one from the seed (or from entropy).
     */
    pub fn render_style(&self) -> RenderStyle {
        if let Some(style) = self.style {
            return style;
        }
        match self.style_seed {
            Some(seed) => RenderStyle::sample(&mut StdRng::seed_from_u64(seed)),
            None => RenderStyle::sample(&mut StdRng::from_entropy()),
        }
    }

    pub fn image_prefix(&self) -> FilePrefix {
        FilePrefix::new(&self.output_directory, &self.images_directory)
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_directory.join(&self.index_file)
    }

    pub fn animation_path(&self) -> Option<PathBuf> {
        self.animation_file
            .as_ref()
            .map(|file| self.output_directory.join(file))
    }

    pub fn params_snapshot_path(&self) -> PathBuf {
        self.output_directory.join("grid_params.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let params: GridParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, GridParams::default());
        assert_eq!(params.resolution, 250);
        assert_eq!(params.iterations, 200);
        assert_eq!(params.zoom, 1.8);
        assert_eq!(params.font_size, 16);
        assert_eq!(params.grid().len(), 400);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let params: GridParams = serde_json::from_str(
            r#"{ "resolution": 32, "animation_file": null, "ca_range": { "min": -0.2, "max": 0.2, "step": 0.1 } }"#,
        )
        .unwrap();
        assert_eq!(params.resolution, 32);
        assert_eq!(params.animation_file, None);
        assert_eq!(params.animation_path(), None);
        assert_eq!(params.grid().rows(), 4);
        assert_eq!(params.grid().cols(), 20);
        assert_eq!(params.iterations, 200);
    }

    #[test]
    fn test_validate_rejects_degenerate_params() {
        let mut params = GridParams::default();
        params.resolution = 0;
        assert!(params.validate().is_err());

        let mut params = GridParams::default();
        params.zoom = 0.0;
        assert!(params.validate().is_err());

        let mut params = GridParams::default();
        params.iterations = 0;
        assert!(params.validate().is_err());

        let mut params = GridParams::default();
        params.cb_range.step = 0.0;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("cb_range"));
    }

    #[test]
    fn test_render_style_resolution() {
        let fixed = RenderStyle {
            color_bias: 0.3,
            glow: 0.5,
        };
        let params = GridParams {
            style: Some(fixed),
            style_seed: Some(9),
            ..GridParams::default()
        };
        assert_eq!(params.render_style(), fixed);

        let seeded = GridParams {
            style_seed: Some(9),
            ..GridParams::default()
        };
        assert_eq!(seeded.render_style(), seeded.render_style());
    }

    #[test]
    fn test_output_paths() {
        let params = GridParams {
            output_directory: PathBuf::from("out"),
            ..GridParams::default()
        };
        assert_eq!(params.index_path(), PathBuf::from("out").join("index.html"));
        assert_eq!(
            params.animation_path(),
            Some(PathBuf::from("out").join("juliaset_grid.gif"))
        );
        assert_eq!(
            params.image_prefix().full_path("a.png"),
            PathBuf::from("out").join("images").join("a.png")
        );
    }
}
