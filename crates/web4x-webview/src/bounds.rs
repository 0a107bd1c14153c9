//! Window layout: toolbar strip on top, tab content below.

use web4x_tabs::Viewport;

/// Height of the toolbar webview in logical pixels.
pub const CHROME_HEIGHT: f64 = 76.0;

/// Convert a [`Viewport`] (f64 logical coords) to a wry `Rect`.
pub fn viewport_to_wry(viewport: Viewport) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(
            viewport.x, viewport.y,
        )),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            viewport.width,
            viewport.height,
        )),
    }
}

/// Split a window of `width` x `height` into the toolbar area and the
/// content area. The toolbar never exceeds the window height.
pub fn split_window(width: f64, height: f64, chrome_height: f64) -> (Viewport, Viewport) {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let chrome = chrome_height.clamp(0.0, height);
    (
        Viewport::new(0.0, 0.0, width, chrome),
        Viewport::new(0.0, chrome, width, height - chrome),
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_converts_to_wry_rect() {
        let wry_rect = viewport_to_wry(Viewport::new(100.0, 50.0, 800.0, 600.0));

        match wry_rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert!((pos.x - 100.0).abs() < f64::EPSILON);
                assert!((pos.y - 50.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical position"),
        }

        match wry_rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 800.0).abs() < f64::EPSILON);
                assert!((size.height - 600.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }

    #[test]
    fn split_puts_toolbar_on_top() {
        let (chrome, content) = split_window(1024.0, 768.0, CHROME_HEIGHT);
        assert_eq!(chrome, Viewport::new(0.0, 0.0, 1024.0, CHROME_HEIGHT));
        assert_eq!(
            content,
            Viewport::new(0.0, CHROME_HEIGHT, 1024.0, 768.0 - CHROME_HEIGHT)
        );
    }

    #[test]
    fn split_of_tiny_window_leaves_empty_content() {
        let (chrome, content) = split_window(300.0, 40.0, CHROME_HEIGHT);
        assert_eq!(chrome.height, 40.0);
        assert_eq!(content.y, 40.0);
        assert_eq!(content.height, 0.0);
    }

    #[test]
    fn split_of_minimized_window_is_zero_sized() {
        let (chrome, content) = split_window(0.0, 0.0, CHROME_HEIGHT);
        assert_eq!(chrome.height, 0.0);
        assert_eq!(content.height, 0.0);
        assert_eq!(content.width, 0.0);
    }
}
