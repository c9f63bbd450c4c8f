//! Level PNG → palettized BMP + sidecar JSON

use std::path::{Path, PathBuf};

use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;
use serde::Serialize;
use tracing::debug;

use super::quantize::{quantize_image, PaletteDepth};
use crate::codegen::OutputWriter;
use crate::error::{PipelineError, Result};

/// Asset description read by the game's image importer
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundSidecar {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpp_mode: Option<&'static str>,
}

impl BackgroundSidecar {
    pub fn regular_bg(depth: PaletteDepth) -> Self {
        Self {
            kind: "regular_bg",
            bpp_mode: match depth {
                PaletteDepth::Bpp4 => Some("bpp_4_auto"),
                PaletteDepth::Bpp8 => None,
            },
        }
    }
}

/// Files produced for one level background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundOutput {
    pub bitmap: PathBuf,
    pub sidecar: PathBuf,
    pub colors: usize,
}

/// Encode an RGBA image as an 8-bit palettized BMP
pub fn encode_indexed_bmp(
    rgba: &image::RgbaImage,
    depth: PaletteDepth,
    path: &Path,
) -> Result<(Vec<u8>, usize)> {
    let (width, height) = rgba.dimensions();
    let quantized = quantize_image(rgba.as_raw(), width as usize, height as usize, depth);

    let mut bytes = Vec::new();
    BmpEncoder::new(&mut bytes)
        .encode_with_palette(
            &quantized.indices,
            width,
            height,
            ExtendedColorType::L8,
            Some(quantized.palette.as_slice()),
        )
        .map_err(|source| PipelineError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((bytes, quantized.palette.len()))
}

/// Convert `source` into `levels_<asset_id>.bmp` and `.json` under `dest_dir`
pub fn convert_background(
    source: &Path,
    dest_dir: &Path,
    asset_id: &str,
    depth: PaletteDepth,
    writer: &mut OutputWriter,
) -> Result<BackgroundOutput> {
    if !source.is_file() {
        return Err(PipelineError::InputNotFound {
            path: source.to_path_buf(),
        });
    }

    let img = image::open(source).map_err(|source_err| PipelineError::Image {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let rgba = img.to_rgba8();

    let bitmap = dest_dir.join(format!("levels_{}.bmp", asset_id));
    let (bytes, colors) = encode_indexed_bmp(&rgba, depth, &bitmap)?;
    writer.write(&bitmap, &bytes)?;

    let sidecar = dest_dir.join(format!("levels_{}.json", asset_id));
    let json = serde_json::to_string_pretty(&BackgroundSidecar::regular_bg(depth))
        .map_err(|e| PipelineError::schema(sidecar.display().to_string(), e.to_string()))?;
    writer.write_str(&sidecar, &json)?;

    debug!(
        source = %source.display(),
        bitmap = %bitmap.display(),
        width = rgba.width(),
        height = rgba.height(),
        colors,
        "converted background"
    );

    Ok(BackgroundOutput {
        bitmap,
        sidecar,
        colors,
    })
}
