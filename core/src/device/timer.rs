//! DIV and TIMA/TMA/TAC: the two independent counters driven off the same
//! machine-cycle budget the scheduler hands every component each step.

use crate::core::bus::InterruptState;
use crate::core::savestate::{Reader, SaveStateError, Writer};

const DIV_PERIOD: u32 = 64;
const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    div: u8,
    tima: u8,
    tma: u8,
    tac: u8,
    div_time: u32,
    tima_time: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn div(&self) -> u8 {
        self.div
    }

    /// Any write to DIV, regardless of value, resets it to zero.
    pub fn write_div(&mut self) {
        self.div = 0;
        self.div_time = 0;
    }

    pub fn tima(&self) -> u8 {
        self.tima
    }

    pub fn write_tima(&mut self, value: u8) {
        self.tima = value;
    }

    pub fn tma(&self) -> u8 {
        self.tma
    }

    pub fn write_tma(&mut self, value: u8) {
        self.tma = value;
    }

    pub fn tac(&self) -> u8 {
        self.tac | 0xf8
    }

    pub fn write_tac(&mut self, value: u8) {
        self.tac = value & 0x07;
    }

    pub fn save_state(&self, w: &mut Writer) {
        w.save_uint("timer.div", self.div as u64);
        w.save_uint("timer.tima", self.tima as u64);
        w.save_uint("timer.tma", self.tma as u64);
        w.save_uint("timer.tac", self.tac as u64);
        w.save_uint("timer.div_time", self.div_time as u64);
        w.save_uint("timer.tima_time", self.tima_time as u64);
    }

    pub fn load_state(&mut self, r: &Reader) -> Result<(), SaveStateError> {
        self.div = r.load_uint("timer.div")? as u8;
        self.tima = r.load_uint("timer.tima")? as u8;
        self.tma = r.load_uint("timer.tma")? as u8;
        self.tac = r.load_uint("timer.tac")? as u8;
        self.div_time = r.load_uint("timer.div_time")? as u32;
        self.tima_time = r.load_uint("timer.tima_time")? as u32;
        Ok(())
    }

    fn tima_period(&self) -> u32 {
        TIMA_PERIODS[(self.tac & 0x03) as usize]
    }

    /// Advances both counters by `cycles` machine cycles (T-states / 4,
    /// i.e. the same unit `Sm83::step()` returns), returning the interrupt
    /// mask to OR into IF.
    pub fn advance(&mut self, cycles: u32) -> InterruptState {
        let mut fired = 0u8;

        if self.tac & 0x04 != 0 {
            self.tima_time += cycles;
            let period = self.tima_period();
            while self.tima_time >= period {
                let (next, overflowed) = self.tima.overflowing_add(1);
                self.tima = if overflowed { self.tma } else { next };
                if overflowed {
                    fired |= InterruptState::TIMER;
                }
                self.tima_time -= period;
            }
        } else {
            self.tima_time = 0;
        }

        self.div_time += cycles;
        while self.div_time >= DIV_PERIOD {
            self.div = self.div.wrapping_add(1);
            self.div_time -= DIV_PERIOD;
        }

        InterruptState { pending: fired }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tima_overflow_reloads_from_tma_and_fires_timer() {
        let mut timer = Timer::new();
        timer.write_tma(0xaa);
        timer.write_tac(0x05); // enabled, period 16
        timer.write_tima(0xff);

        let fired = timer.advance(16);
        assert_eq!(timer.tima(), 0xaa);
        assert_eq!(fired.pending, InterruptState::TIMER);
    }

    #[test]
    fn disabled_tima_does_not_advance() {
        let mut timer = Timer::new();
        timer.write_tac(0x00);
        timer.advance(10_000);
        assert_eq!(timer.tima(), 0);
    }

    #[test]
    fn any_write_to_div_zeroes_it() {
        let mut timer = Timer::new();
        timer.advance(64 * 5);
        assert_eq!(timer.div(), 5);
        timer.write_div();
        assert_eq!(timer.div(), 0);
    }

    #[test]
    fn exact_period_boundary_fires_after_1024_cycles() {
        let mut timer = Timer::new();
        timer.write_tac(0x04); // enabled, period 1024
        timer.write_tima(0xff);
        timer.write_tma(0x00);
        let fired = timer.advance(1024);
        assert_eq!(timer.tima(), 0);
        assert_eq!(fired.pending, InterruptState::TIMER);
    }
}
