/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "P1 Left", "Coin").
    pub name: &'static str,
}

/// Machine-agnostic interface for an emulated system.
///
/// The frontend is a pure rendering/input/audio-sink engine that does not
/// know about specific hardware (PPU modes, bank controllers, palette
/// formats, etc.) beyond what this trait exposes.
pub trait Machine {
    /// Native display resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation (advance the clock by one frame's worth of cycles).
    fn run_frame(&mut self);

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from `display_size()`).
    /// Pixels are stored left-to-right, top-to-bottom, 3 bytes per pixel (R, G, B).
    ///
    /// The machine is responsible for converting its internal video representation
    /// (e.g., 4bpp column-major video RAM + palette) into this standard format.
    fn render_frame(&self, buffer: &mut [u8]);

    /// Handle an input event. `button` is a machine-defined ID from `input_map()`.
    /// `pressed` is true for key-down, false for key-up.
    ///
    /// Called per-event, not per-frame. The frontend may call this multiple times
    /// between frames as input events arrive. Each call latches the button state
    /// so that `run_frame()` sees the accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    /// The frontend uses this to build key mappings and display configuration UI.
    fn input_map(&self) -> &[InputButton];

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);

    /// Battery-backed save data (cartridge RAM, plus RTC state where present),
    /// to be written to disk by the frontend. `None` if the machine has nothing
    /// worth persisting (no battery, no RTC).
    fn save_nvram(&self) -> Option<Vec<u8>>;

    /// Restore battery-backed save data previously returned by `save_nvram()`.
    /// Called before the first `reset()`; a no-op if the machine has none.
    fn load_nvram(&mut self, data: &[u8]);

    /// Fill `out` with interleaved stereo i16 samples at `audio_sample_rate()`.
    fn fill_audio(&mut self, out: &mut [i16]);

    /// Host sample rate the machine resamples its audio to. 0 if the machine
    /// produces no audio.
    fn audio_sample_rate(&self) -> u32;

    /// Nominal frames per second, for the driver's frame-pacing sleep.
    fn frame_rate_hz(&self) -> f64;
}
