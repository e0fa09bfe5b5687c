use anyhow::Context;
use x3f_parse::logger;
use x3f_parse::x3f::{ParserConfig, X3fPipeline};

use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    logger::init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.x3f".to_string());

    let pipeline = X3fPipeline::new(ParserConfig::default());
    let container = pipeline
        .decode_file(&input)
        .with_context(|| format!("Failed to decode {}", input))?;
    let model = container.model();

    let header = model.header();
    info!("File format version {}", header.version);
    if let (Some(columns), Some(rows)) = (header.columns(), header.rows()) {
        info!(
            "Output size {}x{}, rotation {}",
            columns,
            rows,
            header.rotation_degrees().unwrap_or(0)
        );
    }
    if let Some(wb) = header.white_balance() {
        info!("White balance: {}", wb);
    }
    if let Some(mode) = header.color_mode() {
        info!("Color mode: {}", mode);
    }

    for (index, image) in model.images().iter().enumerate() {
        let payload = container.image_payload(index).map_or(0, <[u8]>::len);
        info!(
            "Image {}: {:?} {:?} {}x{}, {} payload bytes",
            index, image.kind, image.encoding, image.width, image.height, payload
        );
    }

    match model.calibration() {
        Some(camf) => info!(
            "Calibration type {} with header {:?}",
            camf.camf_type, camf.values
        ),
        None => warn!("No calibration section"),
    }

    let mut properties: Vec<_> = model.properties().iter().collect();
    properties.sort_unstable();
    for (name, value) in properties {
        info!("{} = {}", name, value);
    }

    Ok(())
}
