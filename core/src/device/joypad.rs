//! The P1 joypad register: two 4-bit button rows multiplexed onto one I/O
//! byte, selected by writing bits 4/5. A 0 bit means "pressed" throughout.

use crate::core::bus::InterruptState;
use crate::core::machine::InputButton;
use crate::core::savestate::{Reader, SaveStateError, Writer};

pub const BUTTON_RIGHT: u8 = 0;
pub const BUTTON_LEFT: u8 = 1;
pub const BUTTON_UP: u8 = 2;
pub const BUTTON_DOWN: u8 = 3;
pub const BUTTON_A: u8 = 4;
pub const BUTTON_B: u8 = 5;
pub const BUTTON_SELECT: u8 = 6;
pub const BUTTON_START: u8 = 7;

pub const INPUT_MAP: [InputButton; 8] = [
    InputButton { id: BUTTON_RIGHT, name: "Right" },
    InputButton { id: BUTTON_LEFT, name: "Left" },
    InputButton { id: BUTTON_UP, name: "Up" },
    InputButton { id: BUTTON_DOWN, name: "Down" },
    InputButton { id: BUTTON_A, name: "A" },
    InputButton { id: BUTTON_B, name: "B" },
    InputButton { id: BUTTON_SELECT, name: "Select" },
    InputButton { id: BUTTON_START, name: "Start" },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Joypad {
    pressed: [bool; 8],
    select: u8,
}

impl Joypad {
    pub fn new() -> Self {
        Self { pressed: [false; 8], select: 0x30 }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_button(&mut self, id: u8, pressed: bool) -> InterruptState {
        let Some(slot) = self.pressed.get_mut(id as usize) else {
            return InterruptState::default();
        };
        let was_pressed = *slot;
        *slot = pressed;
        let row_selected = (id < 4 && self.select & 0x10 == 0) || (id >= 4 && self.select & 0x20 == 0);
        if pressed && !was_pressed && row_selected {
            InterruptState { pending: InterruptState::JOYPAD }
        } else {
            InterruptState::default()
        }
    }

    pub fn save_state(&self, w: &mut Writer) {
        let mask: u8 = self.pressed.iter().enumerate().fold(0, |acc, (i, &p)| acc | ((p as u8) << i));
        w.save_uint("joypad.pressed", mask as u64);
        w.save_uint("joypad.select", self.select as u64);
    }

    pub fn load_state(&mut self, r: &Reader) -> Result<(), SaveStateError> {
        let mask = r.load_uint("joypad.pressed")?;
        for (i, slot) in self.pressed.iter_mut().enumerate() {
            *slot = mask & (1 << i) != 0;
        }
        self.select = r.load_uint("joypad.select")? as u8;
        Ok(())
    }

    pub fn write_select(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    pub fn read(&self) -> u8 {
        let mut p1 = self.select | 0x0f;
        if self.select & 0x10 == 0 {
            if self.pressed[BUTTON_RIGHT as usize] {
                p1 &= !0x01;
            }
            if self.pressed[BUTTON_LEFT as usize] {
                p1 &= !0x02;
            }
            if self.pressed[BUTTON_UP as usize] {
                p1 &= !0x04;
            }
            if self.pressed[BUTTON_DOWN as usize] {
                p1 &= !0x08;
            }
        }
        if self.select & 0x20 == 0 {
            if self.pressed[BUTTON_A as usize] {
                p1 &= !0x01;
            }
            if self.pressed[BUTTON_B as usize] {
                p1 &= !0x02;
            }
            if self.pressed[BUTTON_SELECT as usize] {
                p1 &= !0x04;
            }
            if self.pressed[BUTTON_START as usize] {
                p1 &= !0x08;
            }
        }
        p1 | 0xc0
    }
}
