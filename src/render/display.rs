use std::path::Path;

use log::{info, warn};

/// Open `path` in the platform image viewer.
///
/// Best-effort: a missing display or a failing launcher is logged and
/// otherwise ignored.
pub fn show(path: &Path) {
    if !has_display_surface() {
        info!("no display available, not opening {}", path.display());
        return;
    }
    match open::that(path) {
        Ok(()) => info!("opened {} in the default viewer", path.display()),
        Err(e) => warn!("could not open {}: {e}", path.display()),
    }
}

/// On X11/Wayland systems a viewer can only appear when one of the session
/// variables is set. Other platforms always have a desktop.
#[cfg(all(unix, not(target_os = "macos")))]
fn has_display_surface() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn has_display_surface() -> bool {
    true
}

#[cfg(all(test, unix, not(target_os = "macos")))]
mod tests {
    use std::env;

    use super::*;

    // The only test that touches the session variables.
    #[test]
    fn empty_or_missing_session_vars_mean_no_display() {
        let saved: Vec<_> = ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .map(|var| (*var, env::var_os(var)))
            .collect();

        env::remove_var("DISPLAY");
        env::remove_var("WAYLAND_DISPLAY");
        assert!(!has_display_surface());

        env::set_var("DISPLAY", "");
        env::set_var("WAYLAND_DISPLAY", "");
        assert!(!has_display_surface());

        // skipped quietly, nothing is launched
        show(Path::new("does-not-exist.png"));

        env::set_var("WAYLAND_DISPLAY", "wayland-0");
        assert!(has_display_surface());

        for (var, value) in saved {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
    }
}
