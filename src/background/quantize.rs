//! Palette quantization for GBA backgrounds
//!
//! Uses median-cut to reduce full-color images to an indexed palette.
//! Index 0 is reserved for fully transparent pixels (the GBA backdrop).

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Color of palette index 0
pub const TRANSPARENT_RGB: Rgb = [0, 0, 0];

/// Background palette sizes
/// 4-bit = 16 colors, 8-bit = 256 colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaletteDepth {
    /// 4-bit indexed (16 colors)
    Bpp4,
    /// 8-bit indexed (256 colors)
    #[default]
    Bpp8,
}

impl PaletteDepth {
    /// Number of colors in this palette depth
    #[inline]
    pub fn color_count(&self) -> usize {
        match self {
            PaletteDepth::Bpp4 => 16,
            PaletteDepth::Bpp8 => 256,
        }
    }
}

/// Result of quantizing an image
#[derive(Debug, Clone)]
pub struct QuantizeResult {
    pub width: usize,
    pub height: usize,
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
    /// Palette, entry 0 is [`TRANSPARENT_RGB`]
    pub palette: Vec<Rgb>,
}

/// Quantize RGBA pixels (4 bytes per pixel) to an indexed image
pub fn quantize_image(
    rgba_pixels: &[u8],
    width: usize,
    height: usize,
    depth: PaletteDepth,
) -> QuantizeResult {
    let colors: Vec<Rgb> = rgba_pixels
        .chunks(4)
        .filter(|p| p[3] > 0)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    // Reserve index 0 for transparent
    let colors_palette = if colors.is_empty() {
        Vec::new()
    } else {
        median_cut(&colors, depth.color_count() - 1)
    };

    let mut palette = Vec::with_capacity(colors_palette.len() + 1);
    palette.push(TRANSPARENT_RGB);
    palette.extend_from_slice(&colors_palette);

    let indices = rgba_pixels
        .chunks(4)
        .map(|chunk| {
            if chunk[3] == 0 {
                0
            } else {
                find_nearest_color(&[chunk[0], chunk[1], chunk[2]], &colors_palette) + 1
            }
        })
        .collect();

    QuantizeResult {
        width,
        height,
        indices,
        palette,
    }
}

/// Median cut color quantization
///
/// Repeatedly splits the bucket with the largest color volume along its
/// widest channel until there are `max_colors` buckets.
fn median_cut(colors: &[Rgb], max_colors: usize) -> Vec<Rgb> {
    let mut unique: Vec<Rgb> = colors.to_vec();
    unique.sort();
    unique.dedup();
    if unique.len() <= max_colors {
        return unique;
    }

    let mut buckets: Vec<Vec<Rgb>> = vec![colors.to_vec()];

    while buckets.len() < max_colors {
        let (split_idx, max_volume) = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (i, bucket_volume(b)))
            .max_by_key(|(_, v)| *v)
            .unwrap_or((0, 0));

        if max_volume == 0 {
            break;
        }

        let mut bucket = buckets.remove(split_idx);
        let ranges = bucket_ranges(&bucket);
        let axis = if ranges[0] >= ranges[1] && ranges[0] >= ranges[2] {
            0
        } else if ranges[1] >= ranges[2] {
            1
        } else {
            2
        };

        bucket.sort_by_key(|c| c[axis]);
        let right = bucket.split_off(bucket.len() / 2);
        buckets.push(bucket);
        buckets.push(right);
    }

    buckets.iter().map(|b| average_color(b)).collect()
}

/// Product of the channel ranges, 0 for single-color buckets
fn bucket_volume(colors: &[Rgb]) -> u32 {
    if colors.len() <= 1 {
        return 0;
    }
    let [r, g, b] = bucket_ranges(colors);
    // +1 so flat channels do not zero out a bucket that still varies
    let volume = (r as u32 + 1) * (g as u32 + 1) * (b as u32 + 1);
    if volume == 1 {
        0
    } else {
        volume
    }
}

fn bucket_ranges(colors: &[Rgb]) -> [u8; 3] {
    let mut min = [u8::MAX; 3];
    let mut max = [0u8; 3];
    for c in colors {
        for ch in 0..3 {
            min[ch] = min[ch].min(c[ch]);
            max[ch] = max[ch].max(c[ch]);
        }
    }
    [
        max[0].saturating_sub(min[0]),
        max[1].saturating_sub(min[1]),
        max[2].saturating_sub(min[2]),
    ]
}

fn average_color(colors: &[Rgb]) -> Rgb {
    if colors.is_empty() {
        return TRANSPARENT_RGB;
    }
    let mut sum = [0u64; 3];
    for c in colors {
        for ch in 0..3 {
            sum[ch] += c[ch] as u64;
        }
    }
    let n = colors.len() as u64;
    [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
}

/// Index of the nearest palette color
fn find_nearest_color(target: &Rgb, palette: &[Rgb]) -> u8 {
    let mut best_idx = 0u8;
    let mut best_dist = u32::MAX;

    for (i, color) in palette.iter().enumerate() {
        let dr = target[0].abs_diff(color[0]) as u32;
        let dg = target[1].abs_diff(color[1]) as u32;
        let db = target[2].abs_diff(color[2]) as u32;

        // Green weighted, the eye is most sensitive to it
        let dist = dr * dr + dg * dg * 2 + db * db;

        if dist < best_dist {
            best_dist = dist;
            best_idx = i as u8;
        }
        if dist == 0 {
            break;
        }
    }

    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_simple() {
        let rgba = vec![
            255, 0, 0, 255,    // Red
            0, 255, 0, 255,    // Green
            0, 0, 255, 255,    // Blue
            255, 255, 0, 255,  // Yellow
        ];

        let result = quantize_image(&rgba, 2, 2, PaletteDepth::Bpp4);

        assert_eq!(result.indices.len(), 4);
        assert_eq!(result.palette.len(), 5);
        for (i, idx) in result.indices.iter().enumerate() {
            assert!(*idx > 0, "Non-transparent pixel should have index > 0");
            let expected = [rgba[i * 4], rgba[i * 4 + 1], rgba[i * 4 + 2]];
            assert_eq!(result.palette[*idx as usize], expected);
        }
    }

    #[test]
    fn test_quantize_with_transparency() {
        let rgba = vec![
            255, 0, 0, 255,    // Red
            0, 255, 0, 255,    // Green
            0, 0, 255, 255,    // Blue
            9, 9, 9, 0,        // Transparent
        ];

        let result = quantize_image(&rgba, 2, 2, PaletteDepth::Bpp8);
        assert_eq!(result.indices[3], 0);
        assert_eq!(result.palette[0], TRANSPARENT_RGB);
    }

    #[test]
    fn test_palette_never_exceeds_depth() {
        // 64 distinct grays
        let rgba: Vec<u8> = (0..64u8).flat_map(|v| [v * 4, v * 4, v * 4, 255]).collect();

        let result = quantize_image(&rgba, 8, 8, PaletteDepth::Bpp4);
        assert!(result.palette.len() <= 16);
        assert!(result.indices.iter().all(|&i| (i as usize) < result.palette.len()));
    }

    #[test]
    fn test_fully_transparent_image() {
        let rgba = vec![0u8; 4 * 4];
        let result = quantize_image(&rgba, 2, 2, PaletteDepth::Bpp8);
        assert_eq!(result.palette, vec![TRANSPARENT_RGB]);
        assert!(result.indices.iter().all(|&i| i == 0));
    }

    #[test]
    fn test_find_nearest_color() {
        let palette = vec![[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]];

        assert_eq!(find_nearest_color(&[255, 0, 0], &palette), 1);
        assert_eq!(find_nearest_color(&[230, 20, 20], &palette), 1);
        assert_eq!(find_nearest_color(&[20, 230, 20], &palette), 2);
    }
}
