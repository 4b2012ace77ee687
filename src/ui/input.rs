use crate::io::config::Config;
use crate::scene::context::ControlCommand;
use crate::scene::light::LightPreset;
use minifb::{Key, KeyRepeat, Window};

/// Step sizes applied per key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub rotation_speed: f32,
    pub zoom_speed: f32,
    pub spin_speed: f32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotation_speed: 0.08,
            zoom_speed: 0.15,
            spin_speed: 0.1,
        }
    }
}

impl KeyBindings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rotation_speed: config.camera.rotation_speed,
            zoom_speed: config.camera.zoom_speed,
            spin_speed: config.model.spin_speed,
        }
    }

    /// The command bound to `key`, if any.
    pub fn command_for(&self, key: Key) -> Option<ControlCommand> {
        let command = match key {
            Key::Up => ControlCommand::OrbitPitch(self.rotation_speed),
            Key::Down => ControlCommand::OrbitPitch(-self.rotation_speed),
            Key::Left => ControlCommand::OrbitYaw(-self.rotation_speed),
            Key::Right => ControlCommand::OrbitYaw(self.rotation_speed),
            Key::Q => ControlCommand::Spin(-self.spin_speed),
            Key::E => ControlCommand::Spin(self.spin_speed),
            Key::W => ControlCommand::Zoom(-self.zoom_speed),
            Key::S => ControlCommand::Zoom(self.zoom_speed),
            Key::R => ControlCommand::Reset,
            Key::Key1 => ControlCommand::SelectLight(LightPreset::Front),
            Key::Key2 => ControlCommand::SelectLight(LightPreset::Right),
            Key::Key3 => ControlCommand::SelectLight(LightPreset::Left),
            Key::Key4 => ControlCommand::SelectLight(LightPreset::Top),
            Key::Key5 => ControlCommand::SelectLight(LightPreset::Bottom),
            _ => return None,
        };
        Some(command)
    }

    /// Commands for a batch of pressed keys, in key order.
    pub fn commands_for_keys(&self, keys: &[Key]) -> Vec<ControlCommand> {
        keys.iter().filter_map(|&key| self.command_for(key)).collect()
    }
}

/// Reads key presses from the window. Held keys repeat.
pub struct KeyboardController {
    pub bindings: KeyBindings,
}

impl KeyboardController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn poll(&self, window: &Window) -> Vec<ControlCommand> {
        let keys = window.get_keys_pressed(KeyRepeat::Yes);
        self.bindings.commands_for_keys(&keys)
    }

    pub fn quit_requested(window: &Window) -> bool {
        !window.is_open() || window.is_key_down(Key::Escape)
    }
}

pub const CONTROLS_HELP: &[&str] = &[
    "Arrows: orbit camera",
    "Q/E: spin model",
    "W/S: zoom",
    "R: reset camera and model",
    "1-5: light preset (front, right, left, top, bottom)",
    "Esc: quit",
];
