//! Deployment asset resolution
//!
//! Logos and companion fonts are optional deployment artifacts. Everything
//! here degrades with a warning instead of failing generation.

use crate::config::{
    COMPANION_BOLD_CANDIDATES, COMPANION_FONT_CANDIDATES, FONT_COMPANION, FONT_COMPANION_BOLD,
    LOGO_CANDIDATES,
};
use once_cell::sync::Lazy;
use pdf_canvas::Canvas;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Memoized resolutions, keyed by the joined candidate list
static RESOLVED: Lazy<Mutex<HashMap<String, Option<PathBuf>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// First existing file among the candidates
///
/// Results are cached for the process lifetime; deployments do not move
/// assets while the service runs.
pub fn resolve_asset(candidates: &[&str]) -> Option<PathBuf> {
    let key = candidates.join("|");
    if let Ok(cache) = RESOLVED.lock() {
        if let Some(found) = cache.get(&key) {
            return found.clone();
        }
    }
    let found = candidates
        .iter()
        .map(Path::new)
        .find(|path| path.is_file())
        .map(Path::to_path_buf);
    if let Ok(mut cache) = RESOLVED.lock() {
        cache.insert(key, found.clone());
    }
    found
}

/// Load the registry logo bytes, if a usable logo is deployed
///
/// SVG logos are skipped with a warning since the canvas only embeds raster
/// formats. A missing logo is normal in bare deployments.
pub fn load_logo() -> Option<Vec<u8>> {
    let path = match resolve_asset(LOGO_CANDIDATES) {
        Some(path) => path,
        None => {
            log::warn!("no registry logo found, rendering header without one");
            return None;
        }
    };
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    {
        log::warn!("SVG logo at {} is not supported, skipping", path.display());
        return None;
    }
    match std::fs::read(&path) {
        Ok(data) if looks_like_svg(&data) => {
            log::warn!("logo at {} contains SVG markup, skipping", path.display());
            None
        }
        Ok(data) => Some(data),
        Err(err) => {
            log::warn!("could not read logo at {}: {err}", path.display());
            None
        }
    }
}

// Raster formats start with binary magic; markup starts with '<'.
fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    String::from_utf8_lossy(head).trim_start().starts_with('<')
}

/// Register the Arabic companion faces on the canvas when deployed
///
/// Returns whether the regular companion is available. The bold face is
/// optional on top of that; table rendering falls back to the regular alias.
/// Failures degrade to French-only rendering, never abort generation.
pub fn load_companion_fonts(canvas: &mut Canvas) -> bool {
    let mut loaded = false;
    if let Some(path) = resolve_asset(COMPANION_FONT_CANDIDATES) {
        match canvas.load_font(FONT_COMPANION, &path) {
            Ok(Some(_)) => loaded = true,
            Ok(None) => {}
            Err(err) => log::warn!("companion font at {} not usable: {err}", path.display()),
        }
    } else {
        log::warn!("no companion font deployed, rendering French only");
    }
    if loaded {
        if let Some(path) = resolve_asset(COMPANION_BOLD_CANDIDATES) {
            if let Err(err) = canvas.load_font(FONT_COMPANION_BOLD, &path) {
                log::warn!(
                    "bold companion font at {} not usable: {err}",
                    path.display()
                );
            }
        }
    }
    loaded
}
