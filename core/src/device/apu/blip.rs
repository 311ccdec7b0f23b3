//! A minimal blip-style delta buffer: channels report amplitude *changes*
//! timestamped in CPU cycles rather than a sample every tick, and a box
//! filter resamples the accumulated step function down to the host rate
//! on demand. Much simpler than a true band-limited synthesis buffer, but
//! the same external contract (`add_delta`/`end_frame`/`read_samples`).

const CPU_CLOCK_HZ: u32 = 4_194_304;

pub struct BlipBuffer {
    /// Pending amplitude deltas, as (cpu-cycle timestamp, signed delta).
    deltas: Vec<(u32, i32)>,
    /// Running amplitude level carried from the previous `end_frame`.
    level: i32,
    frame_length: u32,
    output_rate: u32,
}

impl BlipBuffer {
    pub fn new(output_rate: u32) -> Self {
        Self {
            deltas: Vec::new(),
            level: 0,
            frame_length: 0,
            output_rate,
        }
    }

    pub fn add_delta(&mut self, time: u32, amplitude: i32) {
        if amplitude != 0 {
            self.deltas.push((time, amplitude));
        }
    }

    /// Marks `time` as the end of the current CPU-cycle frame; subsequent
    /// `add_delta` calls are timestamped relative to a new frame.
    pub fn end_frame(&mut self, time: u32) {
        self.frame_length = time;
    }

    /// Resamples the accumulated step function into `count` samples at
    /// `self.output_rate`, consuming the buffered deltas.
    pub fn read_samples(&mut self, dst: &mut [i16]) {
        let count = dst.len();
        if count == 0 || self.frame_length == 0 {
            return;
        }

        self.deltas.sort_by_key(|&(t, _)| t);

        let mut level = self.level;
        let mut delta_iter = self.deltas.iter().peekable();
        let cycles_per_sample = self.frame_length as f64 / count as f64;

        for (i, slot) in dst.iter_mut().enumerate() {
            let sample_end_cycle = ((i + 1) as f64 * cycles_per_sample) as u32;
            while let Some(&&(t, amp)) = delta_iter.peek() {
                if t > sample_end_cycle {
                    break;
                }
                level += amp;
                delta_iter.next();
            }
            *slot = level.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }

        self.level = level;
        self.deltas.clear();
        self.frame_length = 0;
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }
}

/// How many CPU cycles make up one sample period at the buffer's output rate.
pub fn cycles_per_host_sample(output_rate: u32) -> f64 {
    CPU_CLOCK_HZ as f64 / output_rate as f64
}
