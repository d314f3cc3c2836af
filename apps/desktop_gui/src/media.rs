//! Card image decoding.

/// Thumbnail edge length for card images.
const CARD_THUMBNAIL_EDGE: u32 = 320;

#[derive(Clone)]
pub(crate) struct PreviewImage {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) rgba: Vec<u8>,
}

pub(crate) fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width() > CARD_THUMBNAIL_EDGE || dynamic.height() > CARD_THUMBNAIL_EDGE
    {
        dynamic.thumbnail(CARD_THUMBNAIL_EDGE, CARD_THUMBNAIL_EDGE)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn small_images_keep_their_size() {
        let preview = decode_preview_image(&encode_png(12, 8)).expect("decode");
        assert_eq!((preview.width, preview.height), (12, 8));
        assert_eq!(preview.rgba.len(), 12 * 8 * 4);
    }

    #[test]
    fn large_images_are_thumbnailed_preserving_aspect() {
        let preview = decode_preview_image(&encode_png(1280, 640)).expect("decode");
        assert_eq!(preview.width, CARD_THUMBNAIL_EDGE as usize);
        assert_eq!(preview.height, CARD_THUMBNAIL_EDGE as usize / 2);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(decode_preview_image(b"<html>not an image</html>").is_err());
    }
}
