//! Translation of winit window events into view manager input

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::view_manager::{CameraKey, ViewManager};

/// Pixel scroll distance treated as one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Maps a physical key to the camera action bound to it.
///
/// W/S move forward and back, A/D strafe, Q/E rise and sink,
/// P and O select perspective and orthographic projection.
pub fn camera_key(code: KeyCode) -> Option<CameraKey> {
    match code {
        KeyCode::KeyW => Some(CameraKey::Forward),
        KeyCode::KeyS => Some(CameraKey::Backward),
        KeyCode::KeyA => Some(CameraKey::Left),
        KeyCode::KeyD => Some(CameraKey::Right),
        KeyCode::KeyQ => Some(CameraKey::Up),
        KeyCode::KeyE => Some(CameraKey::Down),
        KeyCode::KeyP => Some(CameraKey::Perspective),
        KeyCode::KeyO => Some(CameraKey::Orthographic),
        _ => None,
    }
}

/// Scroll amount in wheel notches.
pub fn scroll_lines(delta: &MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (*x, *y),
        MouseScrollDelta::PixelDelta(p) => (
            p.x as f32 / PIXELS_PER_LINE,
            p.y as f32 / PIXELS_PER_LINE,
        ),
    }
}

/// Feeds a window event to the view manager.
///
/// Losing focus releases every held key; key releases that happen while
/// unfocused are not reported on every platform.
///
/// Returns true if the event was consumed.
pub fn apply_window_event(view: &mut ViewManager, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            view.mouse_position_callback(position.x as f32, position.y as f32);
            true
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = scroll_lines(delta);
            view.mouse_scroll_callback(x, y);
            true
        }
        WindowEvent::Focused(false) => {
            view.release_all();
            true
        }
        WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return false;
            };
            match camera_key(code) {
                Some(key) => {
                    view.press_key(key, event.state == ElementState::Pressed);
                    true
                }
                None => false,
            }
        }
        _ => false,
    }
}
