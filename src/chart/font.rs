use plotters::style::{FontStyle, register_font};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{info, warn};

pub const FONT_FAMILY: &str = "sans-serif";

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Registers the first readable font in `paths` for chart text, once per process.
///
/// Returns whether text can be drawn. Only the first call looks at its
/// `paths`: plotters keeps a single process-wide font table, so the outcome is
/// cached and every later call returns it unchanged, whatever paths it passes.
pub fn ensure_font(paths: &[PathBuf]) -> bool {
    *REGISTERED.get_or_init(|| register_first(paths))
}

fn register_first(paths: &[PathBuf]) -> bool {
    for path in paths {
        let Ok(bytes) = fs::read(path) else {
            continue;
        };
        // The font table keeps `'static` references.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                info!("Chart font: {}", path.display());
                return true;
            }
            Err(_) => warn!("Unusable font {}", path.display()),
        }
    }
    warn!("No usable font found; charts are drawn without text");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junk_and_missing_files_are_not_registered() {
        let dir = tempfile::tempdir().unwrap();
        let junk = dir.path().join("junk.ttf");
        fs::write(&junk, b"definitely not a font").unwrap();

        let paths = vec![dir.path().join("missing.ttf"), junk];
        assert!(!register_first(&paths));
        assert!(!register_first(&[]));
    }
}
