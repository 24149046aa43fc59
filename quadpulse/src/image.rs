use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

/// Decoded RGBA8 pixel buffer. Host-side only; meant to be dropped as
/// soon as the pixels are uploaded.
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Decodes a PNG file. With `flip`, rows are reordered bottom-up to
    /// match the GL texture origin.
    pub fn open<P: AsRef<Path>>(path: P, flip: bool) -> Result<Self, ImageError> {
        let file = File::open(path)?;

        Self::from_reader(BufReader::new(file), flip)
    }

    pub fn from_reader<R: Read>(reader: R, flip: bool) -> Result<Self, ImageError> {
        let decoder = png::Decoder::new(reader);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let pixels = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
            (png::ColorType::Rgb, png::BitDepth::Eight) => expand_rgb(&buf),
            (color, depth) => return Err(ImageError::Unsupported { color, depth }),
        };

        let mut image = Self {
            width: info.width,
            height: info.height,
            pixels,
        };

        if flip {
            image.flip_vertically();
        }

        Ok(image)
    }

    /// Single magenta pixel, stands in for a texture that failed to
    /// decode.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0xff, 0x00, 0xff, 0xff],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reverses row order in place.
    pub fn flip_vertically(&mut self) {
        let stride = self.width as usize * 4;

        if stride == 0 {
            return;
        }

        let flipped: Vec<u8> = self
            .pixels
            .chunks_exact(stride)
            .rev()
            .flatten()
            .copied()
            .collect();

        self.pixels = flipped;
    }
}

fn expand_rgb(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);

    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(0xff);
    }

    rgba
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported pixel format: {color:?} at {depth:?}")]
    Unsupported {
        color: png::ColorType,
        depth: png::BitDepth,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TOP_LEFT: [u8; 4] = [255, 0, 0, 255];
    const TOP_RIGHT: [u8; 4] = [0, 255, 0, 255];
    const BOTTOM_LEFT: [u8; 4] = [0, 0, 255, 255];
    const BOTTOM_RIGHT: [u8; 4] = [255, 255, 0, 255];

    fn corner_pixels() -> Vec<u8> {
        [TOP_LEFT, TOP_RIGHT, BOTTOM_LEFT, BOTTOM_RIGHT].concat()
    }

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }

        out
    }

    #[test]
    fn flip_reverses_row_order() {
        let mut image = Image {
            width: 2,
            height: 2,
            pixels: corner_pixels(),
        };

        image.flip_vertically();

        assert_eq!(image.pixels[0..4], BOTTOM_LEFT);
        assert_eq!(image.pixels[4..8], BOTTOM_RIGHT);
        assert_eq!(image.pixels[8..12], TOP_LEFT);
        assert_eq!(image.pixels[12..16], TOP_RIGHT);
    }

    #[test]
    fn double_flip_restores_row_order() {
        let mut image = Image {
            width: 2,
            height: 2,
            pixels: corner_pixels(),
        };

        image.flip_vertically();
        image.flip_vertically();

        assert_eq!(image.pixels, corner_pixels());
    }

    #[test]
    fn flipped_load_reverses_file_row_order() {
        let encoded = encode_png(2, 2, png::ColorType::Rgba, &corner_pixels());

        let natural = Image::from_reader(Cursor::new(&encoded), false).unwrap();
        let flipped = Image::from_reader(Cursor::new(&encoded), true).unwrap();

        assert_eq!(natural.pixels[0..4], TOP_LEFT);
        assert_eq!(flipped.pixels[0..4], BOTTOM_LEFT);
        assert_eq!(flipped.pixels[12..16], TOP_RIGHT);
    }

    #[test]
    fn rgb_input_gets_opaque_alpha() {
        let rgb = [10_u8, 20, 30, 40, 50, 60];
        let encoded = encode_png(2, 1, png::ColorType::Rgb, &rgb);

        let image = Image::from_reader(Cursor::new(&encoded), false).unwrap();

        assert_eq!(image.pixels(), &[10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn grayscale_input_is_rejected() {
        let encoded = encode_png(2, 1, png::ColorType::Grayscale, &[128, 129]);

        let result = Image::from_reader(Cursor::new(&encoded), false);

        assert!(matches!(result, Err(ImageError::Unsupported { .. })));
    }

    #[test]
    fn placeholder_is_one_opaque_pixel() {
        let image = Image::placeholder();

        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixels().len(), 4);
        assert_eq!(image.pixels()[3], 255);
    }
}
