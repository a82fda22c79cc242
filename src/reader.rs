use image::DynamicImage;
use tracing::{debug, warn};

/// Scans an image for QR symbols with `rqrr` and returns the content of the first
/// one that decodes.
pub fn decode(img: &DynamicImage) -> Option<String> {
    let mut prepared = rqrr::PreparedImage::prepare(img.to_luma8());
    let grids = prepared.detect_grids();
    debug!(count = grids.len(), "Detected grids");

    for grid in grids {
        match grid.decode() {
            Ok((_, content)) => {
                debug!(len = content.len(), "Decoded grid");
                return Some(content);
            }
            Err(e) => warn!("Failed to decode grid: {e}"),
        }
    }
    None
}
