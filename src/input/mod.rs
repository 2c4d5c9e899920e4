//! Keyboard shortcut resolution. Pure mapping from key + modifiers to an
//! engine command; the host feeds its key events through here and applies
//! the resulting action to the session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Escape,
    Delete,
    Backspace,
    Tab,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectAll,
    CopySelection,
    CutSelection,
    PasteClipboard,
    DeleteSelection,
    CancelInteraction,
    NextClass,
    PreviousClass,
    NextImage,
    PreviousImage,
    FitToWindow,
    SaveAnnotations,
    QuickAddClass,
}

fn resolve_ctrl_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('a') => Some(ShortcutAction::SelectAll),
        ShortcutKey::Character('c') => Some(ShortcutAction::CopySelection),
        ShortcutKey::Character('x') => Some(ShortcutAction::CutSelection),
        ShortcutKey::Character('v') => Some(ShortcutAction::PasteClipboard),
        ShortcutKey::Character('n') => Some(ShortcutAction::QuickAddClass),
        ShortcutKey::Character('s') => Some(ShortcutAction::SaveAnnotations),
        ShortcutKey::ArrowUp => Some(ShortcutAction::PreviousClass),
        ShortcutKey::ArrowDown => Some(ShortcutAction::NextClass),
        ShortcutKey::ArrowLeft => Some(ShortcutAction::PreviousImage),
        ShortcutKey::ArrowRight => Some(ShortcutAction::NextImage),
        _ => None,
    }
}

fn resolve_plain_shortcut(key: ShortcutKey, has_selection: bool) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('w') => Some(ShortcutAction::PreviousClass),
        ShortcutKey::Character('s') => Some(ShortcutAction::NextClass),
        ShortcutKey::Character('a') => Some(ShortcutAction::PreviousImage),
        ShortcutKey::Character('d') => Some(ShortcutAction::NextImage),
        ShortcutKey::Character('f') => Some(ShortcutAction::FitToWindow),
        ShortcutKey::Space => Some(ShortcutAction::NextImage),
        ShortcutKey::Escape => Some(ShortcutAction::CancelInteraction),
        ShortcutKey::Delete => Some(ShortcutAction::DeleteSelection),
        // Backspace deletes the selection when there is one, otherwise it
        // steps back to the previous image.
        ShortcutKey::Backspace if has_selection => Some(ShortcutAction::DeleteSelection),
        ShortcutKey::Backspace => Some(ShortcutAction::PreviousImage),
        _ => None,
    }
}

/// Resolve one key event. `has_selection` disambiguates Backspace.
pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    has_selection: bool,
) -> Option<ShortcutAction> {
    if modifiers.ctrl {
        return resolve_ctrl_shortcut(key);
    }
    if key == ShortcutKey::Tab {
        return Some(if modifiers.shift {
            ShortcutAction::PreviousClass
        } else {
            ShortcutAction::NextClass
        });
    }
    if modifiers.shift {
        return None;
    }
    resolve_plain_shortcut(key, has_selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MODIFIERS: ShortcutModifiers = ShortcutModifiers::new(false, false);
    const CTRL: ShortcutModifiers = ShortcutModifiers::new(true, false);
    const SHIFT: ShortcutModifiers = ShortcutModifiers::new(false, true);

    #[test]
    fn plain_letters_drive_class_and_image_navigation() {
        let cases = [
            ('w', ShortcutAction::PreviousClass),
            ('s', ShortcutAction::NextClass),
            ('a', ShortcutAction::PreviousImage),
            ('d', ShortcutAction::NextImage),
            ('f', ShortcutAction::FitToWindow),
        ];
        for (letter, expected) in cases {
            assert_eq!(
                resolve_shortcut(ShortcutKey::Character(letter), NO_MODIFIERS, false),
                Some(expected),
                "letter {letter}"
            );
        }
    }

    #[test]
    fn ctrl_combinations_drive_selection_and_clipboard() {
        let cases = [
            ('a', ShortcutAction::SelectAll),
            ('c', ShortcutAction::CopySelection),
            ('x', ShortcutAction::CutSelection),
            ('v', ShortcutAction::PasteClipboard),
            ('n', ShortcutAction::QuickAddClass),
            ('s', ShortcutAction::SaveAnnotations),
        ];
        for (letter, expected) in cases {
            assert_eq!(
                resolve_shortcut(ShortcutKey::Character(letter), CTRL, false),
                Some(expected),
                "ctrl+{letter}"
            );
        }
    }

    #[test]
    fn tab_cycles_classes_in_both_directions() {
        assert_eq!(
            resolve_shortcut(ShortcutKey::Tab, NO_MODIFIERS, false),
            Some(ShortcutAction::NextClass)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Tab, SHIFT, false),
            Some(ShortcutAction::PreviousClass)
        );
    }

    #[test]
    fn backspace_depends_on_selection_state() {
        assert_eq!(
            resolve_shortcut(ShortcutKey::Backspace, NO_MODIFIERS, true),
            Some(ShortcutAction::DeleteSelection)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Backspace, NO_MODIFIERS, false),
            Some(ShortcutAction::PreviousImage)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Delete, NO_MODIFIERS, false),
            Some(ShortcutAction::DeleteSelection)
        );
    }

    #[test]
    fn ctrl_arrows_mirror_the_letter_bindings() {
        assert_eq!(
            resolve_shortcut(ShortcutKey::ArrowUp, CTRL, false),
            Some(ShortcutAction::PreviousClass)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::ArrowRight, CTRL, false),
            Some(ShortcutAction::NextImage)
        );
        // bare arrows stay unbound
        assert_eq!(resolve_shortcut(ShortcutKey::ArrowUp, NO_MODIFIERS, false), None);
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        assert_eq!(
            resolve_shortcut(ShortcutKey::Character('q'), NO_MODIFIERS, false),
            None
        );
        assert_eq!(resolve_shortcut(ShortcutKey::Character('w'), SHIFT, false), None);
        assert_eq!(resolve_shortcut(ShortcutKey::Escape, CTRL, false), None);
    }
}
