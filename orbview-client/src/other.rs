use std::collections::HashSet;

use glam::Vec2;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    mouse::MouseButton,
};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub position: Vec2,
    pub down: HashSet<MouseButton>,
    pub pressed: HashSet<MouseButton>,
}

/// Per-frame input gathered from SDL events.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub quit: bool,
    /// New window size in logical pixels, if the window was resized this frame.
    pub resized: Option<Vec2>,
}

impl InputState {
    /// Clears the edge-triggered state before polling a new frame.
    pub fn begin_frame(&mut self) {
        self.keyboard.pressed.clear();
        self.mouse.pressed.clear();
        self.resized = None;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.quit = true,
            Event::Window {
                win_event:
                    WindowEvent::Resized(width, height) | WindowEvent::SizeChanged(width, height),
                ..
            } => {
                self.resized = Some(Vec2::new(*width as f32, *height as f32));
            }
            Event::MouseMotion { x, y, .. } => {
                self.mouse.position = Vec2::new(*x as f32, *y as f32);
            }
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => {
                self.mouse.position = Vec2::new(*x as f32, *y as f32);
                self.mouse.down.insert(*mouse_btn);
                self.mouse.pressed.insert(*mouse_btn);
            }
            Event::MouseButtonUp { mouse_btn, .. } => {
                self.mouse.down.remove(mouse_btn);
            }
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.insert(*keycode);
                self.keyboard.pressed.insert(*keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.remove(keycode);
            }
            _ => {}
        }
    }

    pub fn clicked(&self) -> bool {
        self.mouse.pressed.contains(&MouseButton::Left)
    }
}
