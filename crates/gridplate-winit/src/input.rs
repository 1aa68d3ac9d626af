//! Translates winit input events into gridplate [`Msg`] values.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton as WButton};
use winit::keyboard::{Key as WKey, NamedKey};

use gridplate_core::{
    geom::Vec2,
    messages::{Key, MouseAction, MouseButton, Msg},
};

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

pub(crate) fn translate_keyboard(event: &KeyEvent) -> Option<Msg> {
    // Fresh presses only: auto-repeat is not a new press.
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }

    let key = match &event.logical_key {
        WKey::Named(named) => match named {
            NamedKey::Escape => Key::Escape,
            _ => return None,
        },
        WKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };

    Some(Msg::key(key))
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Convert a physical cursor position to logical pixels.
pub(crate) fn to_logical(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let logical = position.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}

pub(crate) fn translate_mouse_button(
    btn_state: ElementState,
    button: WButton,
    cursor: Vec2,
) -> Option<Msg> {
    let button = match button {
        WButton::Left => MouseButton::Main,
        WButton::Right => MouseButton::Secondary,
        WButton::Middle => MouseButton::Auxiliary,
        _ => return None,
    };
    let action = match btn_state {
        ElementState::Pressed => MouseAction::Press(button),
        ElementState::Released => MouseAction::Release(button),
    };
    Some(Msg::mouse(action, cursor))
}

pub(crate) fn translate_cursor_moved(cursor: Vec2) -> Msg {
    Msg::mouse(MouseAction::Move, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_position_divides_by_scale() {
        let p = to_logical(PhysicalPosition::new(260.0, 20.0), 2.0);
        assert_eq!(p, Vec2::new(130.0, 10.0));
    }

    #[test]
    fn left_release_carries_cursor() {
        let msg = translate_mouse_button(
            ElementState::Released,
            WButton::Left,
            Vec2::new(3.0, 4.0),
        );
        match msg {
            Some(Msg::Mouse { action, pos, .. }) => {
                assert_eq!(action, MouseAction::Release(MouseButton::Main));
                assert_eq!(pos, Vec2::new(3.0, 4.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn extra_buttons_are_ignored() {
        assert!(translate_mouse_button(ElementState::Pressed, WButton::Back, Vec2::ZERO).is_none());
    }
}
