use std::io::Cursor;

use anyhow::Context as _;
use image::{AnimationDecoder, ImageFormat, RgbaImage, codecs::gif::GifDecoder, imageops::FilterType};

use crate::{
    context::InitContext,
    data_structures::{material::Material, texture::Texture},
    resources::load_binary,
};

/// Edge length every sprite sheet frame is scaled to.
pub const SPRITE_SIZE: u32 = 64;

pub async fn load_texture(
    file_name: &str,
    wrap: wgpu::AddressMode,
    ctx: &InitContext,
) -> anyhow::Result<Material> {
    let data = load_binary(file_name).await?;
    let texture = Texture::from_bytes(&ctx.device, &ctx.queue, &data, file_name, wrap)?;
    Ok(Material::new(&ctx.device, file_name, texture, &ctx.texture_layout))
}

/// Load every frame of an animated GIF (or a still image as a single frame).
pub async fn load_sprite_sheet(file_name: &str, ctx: &InitContext) -> anyhow::Result<Vec<Material>> {
    let data = load_binary(file_name).await?;
    let frames =
        decode_frames(&data).with_context(|| format!("could not decode frames of {file_name}"))?;
    log::debug!("{file_name}: {} frame(s)", frames.len());
    Ok(frames
        .into_iter()
        .enumerate()
        .map(|(i, frame)| {
            let label = format!("{file_name}#{i}");
            let texture = Texture::from_image(
                &ctx.device,
                &ctx.queue,
                &frame.into(),
                Some(&label),
                wgpu::AddressMode::ClampToEdge,
            );
            Material::new(&ctx.device, &label, texture, &ctx.texture_layout)
        })
        .collect())
}

/// Decode the frames of a sprite sheet, each scaled to [`SPRITE_SIZE`] with nearest filtering.
pub fn decode_frames(bytes: &[u8]) -> anyhow::Result<Vec<RgbaImage>> {
    let frames = if image::guess_format(bytes)? == ImageFormat::Gif {
        GifDecoder::new(Cursor::new(bytes))?
            .into_frames()
            .collect_frames()?
            .into_iter()
            .map(|frame| frame.into_buffer())
            .collect()
    } else {
        vec![image::load_from_memory(bytes)?.to_rgba8()]
    };
    anyhow::ensure!(!frames.is_empty(), "image has no frames");
    Ok(frames
        .iter()
        .map(|frame| image::imageops::resize(frame, SPRITE_SIZE, SPRITE_SIZE, FilterType::Nearest))
        .collect())
}

#[cfg(test)]
mod tests {
    use image::{Delay, Frame, Rgba, codecs::gif::GifEncoder};

    use super::*;

    fn solid(colour: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(8, 8, Rgba(colour))
    }

    #[test]
    fn gif_frames_are_scaled_to_sprite_size() {
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            let frames = [solid([255, 0, 0, 255]), solid([0, 0, 255, 255])].map(|img| {
                Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(100, 1))
            });
            encoder.encode_frames(frames).unwrap();
        }

        let frames = decode_frames(&bytes).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.dimensions() == (SPRITE_SIZE, SPRITE_SIZE)));
        // GIF quantizes colours, so only compare dominant channels.
        let first = frames[0].get_pixel(63, 63).0;
        let second = frames[1].get_pixel(0, 0).0;
        assert!(first[0] > first[2]);
        assert!(second[2] > second[0]);
    }

    #[test]
    fn still_image_is_a_single_frame() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(solid([0, 255, 0, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let frames = decode_frames(&bytes).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].dimensions(), (SPRITE_SIZE, SPRITE_SIZE));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_frames(b"not an image").is_err());
    }
}
