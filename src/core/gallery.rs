use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{
    error::GridResult,
    file_io::{read_text_file, to_indented_json, write_text_file},
    grid_params::GridParams,
    parameter_grid::GridPoint,
};

pub const REPOSITORY_TOKEN: &str = "{{REPO}}";
pub const DATA_TOKEN: &str = "{{DATA}}";

/**
 * One rendered frame, as retained after rendering: where it lives on disk (relative
 * to the output directory) and how it was rendered.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub point: GridPoint,
    pub resolution: u32,
    pub iterations: u32,
    pub zoom: f64,
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub iters: u32,
    pub png: String,
    pub ca: String,
    pub cb: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryData {
    pub bgcolor: String,
    pub image: Vec<GalleryEntry>,
}

/**
 * Affine map from a parameter value onto the gallery canvas: [-1, 1] -> [0, 200].
 */
pub fn parameter_to_pixel(value: f64) -> f64 {
    value * 100.0 + 100.0
}

pub fn gallery_entry(record: &FrameRecord, mirror_ca_in_cb_label: bool) -> GalleryEntry {
    let ca_label = format!("{:.2}", record.point.ca);
    let cb_label = if mirror_ca_in_cb_label {
        ca_label.clone()
    } else {
        format!("{:.2}", record.point.cb)
    };
    GalleryEntry {
        x: parameter_to_pixel(record.point.ca),
        y: parameter_to_pixel(record.point.cb),
        zoom: record.zoom,
        iters: record.iterations,
        png: record.path.clone(),
        ca: ca_label,
        cb: cb_label,
    }
}

/// One entry per frame, in frame order.
pub fn gallery_data(params: &GridParams, frames: &[FrameRecord]) -> GalleryData {
    GalleryData {
        bgcolor: params.background_color.clone(),
        image: frames
            .iter()
            .map(|record| gallery_entry(record, params.mirror_ca_in_cb_label))
            .collect(),
    }
}

/**
 * Substitute the repository link and the gallery payload into the template. Every
 * occurrence of each token is replaced; a template missing a token is still filled
 * but logged, since the page will then be missing its link or its images.
 */
pub fn fill_template(
    template: &str,
    repository_url: &str,
    data: &GalleryData,
) -> GridResult<String> {
    for token in [REPOSITORY_TOKEN, DATA_TOKEN] {
        if !template.contains(token) {
            tracing::warn!("Template has no {} token", token);
        }
    }
    let filled = template
        .replace(REPOSITORY_TOKEN, repository_url)
        .replace(DATA_TOKEN, &to_indented_json(data)?);
    Ok(filled)
}

/// Reads the template, fills it, and writes the gallery page. Returns its path.
pub fn assemble_gallery(params: &GridParams, frames: &[FrameRecord]) -> GridResult<PathBuf> {
    let template = read_text_file(&params.template_path)?;
    let page = fill_template(
        &template,
        &params.repository_url,
        &gallery_data(params, frames),
    )?;
    let index_path = params.index_path();
    write_text_file(&index_path, &page)?;
    Ok(index_path)
}
