//! Keyboard shortcuts.

use winit::keyboard::Key;

use web4x_tabs::WindowCommand;

/// Modifier state relevant to shortcuts. `ctrl` also covers Cmd on macOS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Name of a logical key: named keys by variant (`Tab`, `F5`), characters
/// lowercased.
pub(super) fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_lowercase()),
        _ => None,
    }
}

/// The command bound to `key` with `mods`, if any.
pub(super) fn shortcut(key: &str, mods: Modifiers) -> Option<WindowCommand> {
    let Modifiers { ctrl, alt, shift } = mods;
    let command = match key {
        "+" | "=" if ctrl => WindowCommand::ZoomIn,
        "-" if ctrl => WindowCommand::ZoomOut,
        "t" if ctrl && !shift => WindowCommand::NewTab,
        "w" if ctrl => WindowCommand::CloseCurrentTab,
        "r" if ctrl => WindowCommand::Reload,
        "h" if ctrl => WindowCommand::ShowHistory,
        "Tab" if ctrl && shift => WindowCommand::PreviousTab,
        "Tab" if ctrl => WindowCommand::NextTab,
        "Enter" if ctrl && shift => WindowCommand::OpenLinkInNewTab,
        "ArrowLeft" if alt => WindowCommand::Back,
        "ArrowRight" if alt => WindowCommand::Forward,
        "F5" => WindowCommand::Reload,
        "F12" => WindowCommand::DevTools,
        _ => return None,
    };
    Some(command)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NamedKey;

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };
    const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
    };
    const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
        shift: false,
    };
    const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    #[test]
    fn zoom_shortcuts() {
        assert_eq!(shortcut("+", CTRL), Some(WindowCommand::ZoomIn));
        assert_eq!(shortcut("=", CTRL), Some(WindowCommand::ZoomIn));
        assert_eq!(shortcut("+", CTRL_SHIFT), Some(WindowCommand::ZoomIn));
        assert_eq!(shortcut("-", CTRL), Some(WindowCommand::ZoomOut));
    }

    #[test]
    fn plain_keys_are_left_to_the_page() {
        assert_eq!(shortcut("+", NONE), None);
        assert_eq!(shortcut("t", NONE), None);
        assert_eq!(shortcut("ArrowLeft", NONE), None);
    }

    #[test]
    fn tab_shortcuts() {
        assert_eq!(shortcut("t", CTRL), Some(WindowCommand::NewTab));
        assert_eq!(shortcut("w", CTRL), Some(WindowCommand::CloseCurrentTab));
        assert_eq!(shortcut("Tab", CTRL), Some(WindowCommand::NextTab));
        assert_eq!(shortcut("Tab", CTRL_SHIFT), Some(WindowCommand::PreviousTab));
        assert_eq!(
            shortcut("Enter", CTRL_SHIFT),
            Some(WindowCommand::OpenLinkInNewTab)
        );
    }

    #[test]
    fn navigation_shortcuts() {
        assert_eq!(shortcut("ArrowLeft", ALT), Some(WindowCommand::Back));
        assert_eq!(shortcut("ArrowRight", ALT), Some(WindowCommand::Forward));
        assert_eq!(shortcut("F5", NONE), Some(WindowCommand::Reload));
        assert_eq!(shortcut("r", CTRL), Some(WindowCommand::Reload));
        assert_eq!(shortcut("F12", NONE), Some(WindowCommand::DevTools));
        assert_eq!(shortcut("h", CTRL), Some(WindowCommand::ShowHistory));
    }

    #[test]
    fn key_names() {
        assert_eq!(key_name(&Key::Named(NamedKey::Tab)).as_deref(), Some("Tab"));
        assert_eq!(key_name(&Key::Named(NamedKey::F5)).as_deref(), Some("F5"));
        assert_eq!(
            key_name(&Key::Character("T".into())).as_deref(),
            Some("t")
        );
    }
}
