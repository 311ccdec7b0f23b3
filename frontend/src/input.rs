use std::collections::HashMap;

use gb_core::core::machine::InputButton;
use sdl2::keyboard::Scancode;

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Default key bindings for the eight Game Boy buttons.
pub fn default_key_map(buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = match button.name {
            "Right" => Some(Scancode::Right),
            "Left" => Some(Scancode::Left),
            "Up" => Some(Scancode::Up),
            "Down" => Some(Scancode::Down),
            "A" => Some(Scancode::X),
            "B" => Some(Scancode::Z),
            "Select" => Some(Scancode::RShift),
            "Start" => Some(Scancode::Return),
            _ => None,
        };

        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}
