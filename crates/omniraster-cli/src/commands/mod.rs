pub mod info;
pub mod jumpman;
pub mod render;

use std::path::Path;

use omniraster_core::config::PaletteConfig;
use omniraster_core::Result;

/// Load a JSON palette configuration, or the defaults
pub fn load_config(path: Option<&Path>) -> Result<PaletteConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let config = PaletteConfig::from_json(&text)?;
            log::debug!("palette configuration from {}", path.display());
            Ok(config)
        },
        None => Ok(PaletteConfig::default()),
    }
}

/// File contents from `offset` on
pub fn read_from(path: &Path, offset: usize) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.get(offset..).map(<[u8]>::to_vec).unwrap_or_default())
}
