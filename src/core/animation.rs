use std::path::{Path, PathBuf};

use crate::core::{
    error::{GridError, GridResult},
    gallery::FrameRecord,
    grid_params::GridParams,
};

/// Why the animation was not written. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    // Built without the `animation` feature.
    EncoderUnavailable,
    Disabled,
    NoFrames,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EncoderUnavailable => {
                write!(f, "GIF encoding requires the `animation` feature")
            }
            SkipReason::Disabled => write!(f, "no animation file is configured"),
            SkipReason::NoFrames => write!(f, "there are no frames to animate"),
        }
    }
}

#[derive(Debug)]
pub enum AnimationOutcome {
    Written { path: PathBuf, frame_count: usize },
    Skipped(SkipReason),
    /// Encoding was attempted and failed. The rest of the run is unaffected.
    Failed(GridError),
}

/**
 * Read back every frame, in the order it was rendered, and append it to an animated
 * GIF. A frame that cannot be decoded or an encoder failure is an error; callers
 * decide whether that is fatal.
 */
#[cfg(feature = "animation")]
pub fn encode_animation(
    frame_paths: &[PathBuf],
    output: &Path,
    frame_delay_ms: u32,
) -> GridResult<AnimationOutcome> {
    use image::codecs::gif::{GifEncoder, Repeat};
    use image::{Delay, Frame};

    if frame_paths.is_empty() {
        return Ok(AnimationOutcome::Skipped(SkipReason::NoFrames));
    }

    let file = std::fs::File::create(output).map_err(|err| GridError::io(output, err))?;
    let mut encoder = GifEncoder::new(std::io::BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|err| GridError::image(output, err))?;

    for path in frame_paths {
        let buffer = image::open(path)
            .map_err(|err| GridError::image(path, err))?
            .to_rgba8();
        let frame = Frame::from_parts(
            buffer,
            0,
            0,
            Delay::from_numer_denom_ms(frame_delay_ms, 1),
        );
        encoder
            .encode_frame(frame)
            .map_err(|err| GridError::image(output, err))?;
    }

    tracing::info!(
        "Wrote animation with {} frames to: {}",
        frame_paths.len(),
        output.display()
    );
    Ok(AnimationOutcome::Written {
        path: output.to_path_buf(),
        frame_count: frame_paths.len(),
    })
}

/// Built without the `animation` feature: there is no GIF encoder to call.
#[cfg(not(feature = "animation"))]
pub fn encode_animation(
    _frame_paths: &[PathBuf],
    _output: &Path,
    _frame_delay_ms: u32,
) -> GridResult<AnimationOutcome> {
    Ok(AnimationOutcome::Skipped(SkipReason::EncoderUnavailable))
}

/// Animate the rendered frames. Never fails the run: errors come back as `Failed`.
pub fn assemble_animation(params: &GridParams, frames: &[FrameRecord]) -> AnimationOutcome {
    let Some(output) = params.animation_path() else {
        return AnimationOutcome::Skipped(SkipReason::Disabled);
    };
    let frame_paths: Vec<PathBuf> = frames
        .iter()
        .map(|record| params.output_directory.join(&record.path))
        .collect();
    match encode_animation(&frame_paths, &output, params.animation_frame_delay_ms) {
        Ok(outcome) => outcome,
        Err(err) => AnimationOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_solid_frame(directory: &Path, name: &str, color: [u8; 3]) -> PathBuf {
        let path = directory.join(name);
        RgbImage::from_pixel(8, 8, Rgb(color)).save(&path).unwrap();
        path
    }

    #[test]
    fn test_disabled_animation_is_skipped() {
        let params = GridParams {
            animation_file: None,
            ..GridParams::default()
        };
        assert!(matches!(
            assemble_animation(&params, &[]),
            AnimationOutcome::Skipped(SkipReason::Disabled)
        ));
    }

    #[test]
    fn test_no_frames_is_skipped() {
        let directory = tempfile::tempdir().unwrap();
        let outcome = encode_animation(&[], &directory.path().join("a.gif"), 100).unwrap();
        assert!(matches!(outcome, AnimationOutcome::Skipped(_)));
        assert!(!directory.path().join("a.gif").exists());
    }

    #[cfg(feature = "animation")]
    #[test]
    fn test_frames_are_written_in_order() {
        use image::AnimationDecoder;

        let directory = tempfile::tempdir().unwrap();
        let frames = vec![
            write_solid_frame(directory.path(), "red.png", [255, 0, 0]),
            write_solid_frame(directory.path(), "blue.png", [0, 0, 255]),
            write_solid_frame(directory.path(), "green.png", [0, 255, 0]),
        ];
        let output = directory.path().join("grid.gif");

        match encode_animation(&frames, &output, 100).unwrap() {
            AnimationOutcome::Written { path, frame_count } => {
                assert_eq!(path, output);
                assert_eq!(frame_count, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let file = std::io::BufReader::new(std::fs::File::open(&output).unwrap());
        let decoded = image::codecs::gif::GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 3);
        // Palette quantization may shift channels slightly; the dominant one must survive.
        let dominant_channel = |index: usize| {
            let pixel = decoded[index].buffer().get_pixel(4, 4).0;
            (0..3).max_by_key(|&channel| pixel[channel]).unwrap_or(0)
        };
        assert_eq!(dominant_channel(0), 0);
        assert_eq!(dominant_channel(1), 2);
        assert_eq!(dominant_channel(2), 1);
    }

    #[cfg(feature = "animation")]
    #[test]
    fn test_missing_frame_is_an_error_not_a_skip() {
        let directory = tempfile::tempdir().unwrap();
        let frames = vec![
            write_solid_frame(directory.path(), "red.png", [255, 0, 0]),
            directory.path().join("never_rendered.png"),
        ];
        let err = encode_animation(&frames, &directory.path().join("grid.gif"), 100).unwrap_err();
        match err {
            GridError::Image { path, .. } => assert!(path.ends_with("never_rendered.png")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(feature = "animation")]
    #[test]
    fn test_missing_frame_fails_without_aborting() {
        use crate::core::parameter_grid::GridPoint;

        let directory = tempfile::tempdir().unwrap();
        let params = GridParams {
            output_directory: directory.path().to_path_buf(),
            ..GridParams::default()
        };
        let frames = vec![FrameRecord {
            point: GridPoint { ca: 0.0, cb: 0.0 },
            resolution: 8,
            iterations: 10,
            zoom: 1.0,
            path: "images/ca_0.00_cb_0.00.png".to_owned(),
        }];
        match assemble_animation(&params, &frames) {
            AnimationOutcome::Failed(GridError::Image { path, .. }) => {
                assert!(path.ends_with("ca_0.00_cb_0.00.png"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[cfg(not(feature = "animation"))]
    #[test]
    fn test_without_encoder_animation_is_skipped() {
        let directory = tempfile::tempdir().unwrap();
        let frame = write_solid_frame(directory.path(), "red.png", [255, 0, 0]);
        assert!(matches!(
            encode_animation(&[frame], &directory.path().join("grid.gif"), 100).unwrap(),
            AnimationOutcome::Skipped(SkipReason::EncoderUnavailable)
        ));
    }
}
