use std::collections::HashSet;
use std::path::PathBuf;

use image::Rgb;

use crate::{
    cli::args::JuliaGridArgs,
    core::{
        animation::{assemble_animation, AnimationOutcome},
        color_map::RenderStyle,
        error::GridResult,
        file_io::{frame_file_name, serialize_to_json},
        gallery::{assemble_gallery, FrameRecord},
        grid_params::GridParams,
        image_utils::write_image,
        parameter_grid::{GridPoint, ParameterGrid},
        stopwatch::Stopwatch,
        text::{coordinate_label, draw_text, text_width},
    },
    fractals::common::{FrameGenerator, FrameRequest},
};

/// What a completed run produced.
#[derive(Debug)]
pub struct GridSummary {
    pub frames: Vec<FrameRecord>,
    pub index_path: PathBuf,
    pub animation: AnimationOutcome,
}

/**
 * Resolve the parameters for a run: the params file (or defaults), then any
 * command-line overrides on top.
 */
pub fn load_params(args: &JuliaGridArgs) -> GridResult<GridParams> {
    let mut params = match &args.params_path {
        Some(path) => GridParams::from_file(std::path::Path::new(path))?,
        None => GridParams::default(),
    };
    if let Some(directory) = &args.output_directory {
        params.output_directory = directory.clone();
    }
    if let Some(seed) = args.seed {
        params.style_seed = Some(seed);
    }
    Ok(params)
}

/**
 * Render one frame: generate the image, stamp its coordinates onto it, and save it
 * under the images directory. Returns the record the later stages consume.
 */
pub fn render_frame<G: FrameGenerator>(
    params: &GridParams,
    style: RenderStyle,
    point: GridPoint,
    generator: &G,
) -> GridResult<FrameRecord> {
    let request = FrameRequest {
        point,
        resolution: params.resolution,
        iterations: params.iterations,
        zoom: params.zoom,
        style,
    };
    let mut image = generator.generate(&request)?;

    draw_text(
        &mut image,
        &coordinate_label(point.ca, point.cb),
        params.label_position,
        params.font_size,
        Rgb(params.label_color_rgb),
    );

    let prefix = params.image_prefix();
    let file_name = frame_file_name(point.ca, point.cb);
    write_image(&prefix.full_path(&file_name), &image)?;

    Ok(FrameRecord {
        point,
        resolution: request.resolution,
        iterations: request.iterations,
        zoom: request.zoom,
        path: prefix.relative_path(&file_name),
    })
}

/**
 * Render every point of the grid in row-major order. The first failure aborts the
 * whole batch. Points that share a file name overwrite each other; the later frame
 * wins, and each collision is logged.
 */
pub fn render_frames<G: FrameGenerator>(
    params: &GridParams,
    style: RenderStyle,
    grid: &ParameterGrid,
    generator: &G,
) -> GridResult<Vec<FrameRecord>> {
    params.image_prefix().create_sub_directory()?;

    let mut frames = Vec::with_capacity(grid.len());
    let mut written_paths = HashSet::new();
    for point in grid.points() {
        tracing::info!(
            "Generating for ca: {:8.2} and cb: {:8.2}",
            point.ca,
            point.cb
        );
        let record = render_frame(params, style, point, generator)?;
        if !written_paths.insert(record.path.clone()) {
            tracing::warn!(
                "Frame for ca={}, cb={} overwrote an earlier frame at {}",
                point.ca,
                point.cb,
                record.path
            );
        }
        frames.push(record);
    }
    Ok(frames)
}

/// How many pixels the widest frame label runs past the right edge of its frame.
pub fn label_overflow(params: &GridParams, grid: &ParameterGrid) -> Option<u32> {
    let widest = grid
        .points()
        .map(|point| text_width(&coordinate_label(point.ca, point.cb), params.font_size))
        .max()?;
    let right_edge = params.label_position[0].saturating_add(widest);
    (right_edge > params.resolution).then(|| right_edge - params.resolution)
}

/**
 * Full run: render all frames, then the gallery, then the animation. The animation
 * step cannot fail the run: a skip is logged as a warning and an encoding failure
 * as an error, and the summary carries the outcome either way.
 */
pub fn render_grid<G: FrameGenerator>(
    params: &GridParams,
    generator: &G,
) -> GridResult<GridSummary> {
    params.validate()?;
    let mut stopwatch = Stopwatch::new("Julia Grid Stopwatch".to_owned());

    let grid = params.grid();
    let style = params.render_style();
    tracing::info!(
        "Rendering {} x {} grid with color bias {:.3} and glow {:.3}",
        grid.rows(),
        grid.cols(),
        style.color_bias,
        style.glow
    );
    if let Some(overflow) = label_overflow(params, &grid) {
        tracing::warn!(
            "Frame labels run {} pixels past the frame edge and will be clipped",
            overflow
        );
    }

    let frames = render_frames(params, style, &grid, generator)?;
    stopwatch.record_split("render frames".to_owned());

    serialize_to_json(
        &params.params_snapshot_path(),
        &GridParams {
            style: Some(style),
            ..params.clone()
        },
    )?;

    let index_path = assemble_gallery(params, &frames)?;
    stopwatch.record_split("assemble gallery".to_owned());

    let animation = assemble_animation(params, &frames);
    match &animation {
        AnimationOutcome::Written { .. } => {}
        AnimationOutcome::Skipped(reason) => tracing::warn!("Skipping animation, {}.", reason),
        AnimationOutcome::Failed(err) => tracing::error!("Unable to write animation: {}", err),
    }
    stopwatch.record_split("assemble animation".to_owned());
    stopwatch.log_summary();

    Ok(GridSummary {
        frames,
        index_path,
        animation,
    })
}
