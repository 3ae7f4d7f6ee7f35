#[cfg(test)]
mod tests {
    use std::path::Path;

    use glob::glob;
    use juliart_grid::{
        cli::render::render_grid,
        core::{
            animation::{AnimationOutcome, SkipReason},
            color_map::RenderStyle,
            gallery::GalleryData,
            grid_params::GridParams,
            parameter_grid::ParameterRange,
        },
        fractals::julia::JuliaSetGenerator,
    };

    const TEST_TEMPLATE: &str =
        "<html><a href=\"{{REPO}}\">repo</a>\n<script>\nconst data = {{DATA}};\n</script></html>";

    fn four_by_four_params(directory: &Path) -> GridParams {
        let template_path = directory.join("template.html");
        std::fs::write(&template_path, TEST_TEMPLATE).unwrap();
        let range = ParameterRange {
            min: -0.2,
            max: 0.2,
            step: 0.1,
        };
        GridParams {
            ca_range: range,
            cb_range: range,
            resolution: 32,
            iterations: 48,
            font_size: 8,
            style: Some(RenderStyle {
                color_bias: 0.1,
                glow: 0.5,
            }),
            output_directory: directory.to_path_buf(),
            template_path,
            ..GridParams::default()
        }
    }

    fn read_gallery_data(index_path: &Path) -> GalleryData {
        let page = std::fs::read_to_string(index_path).unwrap();
        let start = page.find("const data = ").unwrap() + "const data = ".len();
        let end = page.rfind(";\n</script>").unwrap();
        serde_json::from_str(&page[start..end]).unwrap()
    }

    fn frame_files(directory: &Path) -> Vec<String> {
        let pattern = format!("{}/images/*.png", directory.display());
        glob(&pattern)
            .expect("Failed to read glob pattern")
            .map(|entry| {
                entry
                    .unwrap()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn test_four_by_four_grid() {
        let directory = tempfile::tempdir().unwrap();
        let params = four_by_four_params(directory.path());

        let summary = render_grid(&params, &JuliaSetGenerator).unwrap();
        assert_eq!(summary.frames.len(), 16);

        let files = frame_files(directory.path());
        assert_eq!(files.len(), 16);
        for ca in ["-0.20", "-0.10", "0.00", "0.10"] {
            for cb in ["-0.20", "-0.10", "0.00", "0.10"] {
                let name = format!("ca_{}_cb_{}.png", ca, cb);
                assert!(files.contains(&name), "missing {}", name);
            }
        }

        let data = read_gallery_data(&summary.index_path);
        assert_eq!(data.bgcolor, "white");
        assert_eq!(data.image.len(), 16);
        for (entry, frame) in data.image.iter().zip(&summary.frames) {
            assert_eq!(entry.png, frame.path);
        }

        let origin = data
            .image
            .iter()
            .find(|entry| entry.ca == "0.00" && entry.cb == "0.00")
            .expect("no entry for the origin");
        assert_eq!(origin.x, 100.0);
        assert_eq!(origin.y, 100.0);
        assert_eq!(origin.png, "images/ca_0.00_cb_0.00.png");

        let page = std::fs::read_to_string(&summary.index_path).unwrap();
        assert!(page.contains("https://github.com/vsoch/juliart-grid"));
        assert!(!page.contains("{{"));

        let snapshot: GridParams = serde_json::from_str(
            &std::fs::read_to_string(directory.path().join("grid_params.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(snapshot.style, params.style);
    }

    #[cfg(feature = "animation")]
    #[test]
    fn test_animation_holds_every_frame() {
        let directory = tempfile::tempdir().unwrap();
        let params = four_by_four_params(directory.path());

        let summary = render_grid(&params, &JuliaSetGenerator).unwrap();
        let gif_path = directory.path().join("juliaset_grid.gif");
        match summary.animation {
            AnimationOutcome::Written { path, frame_count } => {
                assert_eq!(path, gif_path);
                assert_eq!(frame_count, 16);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(std::fs::metadata(&gif_path).unwrap().len() > 0);
    }

    #[cfg(feature = "animation")]
    #[test]
    fn test_failed_animation_still_completes_the_run() {
        let directory = tempfile::tempdir().unwrap();
        // A directory already sits where the GIF would go.
        std::fs::create_dir(directory.path().join("grid.gif")).unwrap();
        let params = GridParams {
            animation_file: Some("grid.gif".to_owned()),
            ..four_by_four_params(directory.path())
        };

        let summary = render_grid(&params, &JuliaSetGenerator).unwrap();
        assert!(matches!(summary.animation, AnimationOutcome::Failed(_)));
        assert_eq!(read_gallery_data(&summary.index_path).image.len(), 16);
        assert_eq!(frame_files(directory.path()).len(), 16);
    }

    #[test]
    fn test_skipped_animation_still_builds_the_gallery() {
        let directory = tempfile::tempdir().unwrap();
        let params = GridParams {
            animation_file: None,
            ..four_by_four_params(directory.path())
        };

        let summary = render_grid(&params, &JuliaSetGenerator).unwrap();
        assert!(matches!(
            summary.animation,
            AnimationOutcome::Skipped(SkipReason::Disabled)
        ));
        assert!(directory.path().join("index.html").is_file());
        assert!(directory.path().join("images").is_dir());
        assert_eq!(frame_files(directory.path()).len(), 16);
        assert!(!directory.path().join("juliaset_grid.gif").exists());
    }

    #[test]
    fn test_mirrored_cb_labels() {
        let directory = tempfile::tempdir().unwrap();
        let params = GridParams {
            mirror_ca_in_cb_label: true,
            animation_file: None,
            ..four_by_four_params(directory.path())
        };

        let summary = render_grid(&params, &JuliaSetGenerator).unwrap();
        let data = read_gallery_data(&summary.index_path);
        assert!(data.image.iter().all(|entry| entry.ca == entry.cb));
        // Positions still come from the true coordinates.
        assert_eq!(data.image[1].y, summary.frames[1].point.cb * 100.0 + 100.0);
    }
}
