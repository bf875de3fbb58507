//! Input signals: primary device type + per-frame look delta

use bevy::prelude::*;

/// Primary hardware class of the last input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum InputDeviceType {
    #[default]
    Unspecified,
    KeyboardAndMouse,
    Gamepad,
    Touch,
}

/// Host → aim assist: игрок переключил устройство ввода
///
/// `player: None` — применить ко всем aim assist instances.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InputDeviceChanged {
    pub player: Option<Entity>,
    pub device: InputDeviceType,
}

/// Per-frame look/aim delta of the player
///
/// `delta.x` — yaw (radians, rotation around +Y), `delta.y` — pitch (radians, up).
/// Host пишет сырой input до `update_aim_assist`; aim assist умножает его на
/// friction scale и добавляет magnetism pull; host применяет результат к камере.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LookInput {
    pub delta: Vec2,
}

impl LookInput {
    pub fn clear(&mut self) {
        self.delta = Vec2::ZERO;
    }
}
