use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Downscale a frame to fit inside `max_width` x `max_height`.
/// Aspect ratio is preserved and smaller frames are returned untouched.
pub fn fit_frame(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if img.width() <= max_width && img.height() <= max_height {
        return img.clone();
    }
    img.resize(max_width, max_height, FilterType::CatmullRom)
}

/// Encode a frame as a JPEG still for upload
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> anyhow::Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| anyhow::anyhow!("Failed to encode frame as JPEG: {}", e))?;
    Ok(buf)
}

/// Prepare a captured frame for the recognizer: fit it to the capture size,
/// then encode it.
pub fn prepare_frame(
    img: &DynamicImage,
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> anyhow::Result<Vec<u8>> {
    let fitted = fit_frame(img, max_width, max_height);
    tracing::debug!(
        width = fitted.width(),
        height = fitted.height(),
        "encoding frame"
    );
    encode_jpeg(&fitted, quality)
}
