use std::path::Path;
use std::sync::atomic::Ordering;

use gb_core::core::machine::Machine;
use gb_systems::GameBoySystem;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::audio;
use crate::input::KeyMap;
use crate::overlay;
use crate::serial::SerialLink;
use crate::video::Video;

pub fn run(
    machine: &mut GameBoySystem,
    key_map: &KeyMap,
    scale: u32,
    audio_sample_rate: u32,
    mut serial: Option<SerialLink>,
    save_state_path: &Path,
) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");
    let sdl_audio = sdl_context.audio().expect("Failed to init SDL audio");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "gb", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let audio_handle = audio::init(&sdl_audio, audio_sample_rate);
    if let Some((device, _, _)) = &audio_handle {
        device.resume();
    }

    let buffer_size = (width * height * 3) as usize;
    let mut framebuffer = vec![0u8; buffer_size];
    let samples_per_frame = (audio_sample_rate as f64 / machine.frame_rate_hz()).round() as usize;
    let mut audio_scratch = vec![0i16; samples_per_frame * 2];

    let mut show_fps = false;
    let mut frame_count: u32 = 0;
    let mut fps_timer = std::time::Instant::now();
    let mut fps_text = String::new();

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,
                Event::KeyDown { scancode: Some(Scancode::Escape), .. } => break 'main,
                Event::KeyDown { scancode: Some(Scancode::F3), repeat: false, .. } => {
                    show_fps = !show_fps;
                }
                Event::KeyDown { scancode: Some(Scancode::F5), repeat: false, .. } => {
                    if let Err(e) = std::fs::write(save_state_path, machine.save_state()) {
                        log::warn!("failed to write save state: {e}");
                    }
                }
                Event::KeyDown { scancode: Some(Scancode::F9), repeat: false, .. } => {
                    match std::fs::read_to_string(save_state_path) {
                        Ok(text) => {
                            if let Err(e) = machine.load_state(&text) {
                                log::warn!("failed to load save state: {e}");
                            }
                        }
                        Err(e) => log::warn!("no save state to load: {e}"),
                    }
                }
                Event::KeyDown { scancode: Some(sc), repeat: false, .. } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    }
                }
                Event::KeyUp { scancode: Some(sc), .. } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }
                _ => {}
            }
        }

        machine.run_frame();
        service_serial_link(machine, &mut serial);

        machine.render_frame(&mut framebuffer);
        if show_fps {
            overlay::draw_fps(&mut framebuffer, width as usize, &fps_text);
        }
        video.present(&framebuffer);

        if let Some((_, ring, _)) = &audio_handle {
            machine.fill_audio(&mut audio_scratch);
            let mut buf = ring.lock().unwrap();
            buf.extend(audio_scratch.iter().copied());
        }

        frame_count += 1;
        if fps_timer.elapsed().as_secs_f64() >= 1.0 {
            fps_text = format!("{:.1}", frame_count as f64 / fps_timer.elapsed().as_secs_f64());
            frame_count = 0;
            fps_timer = std::time::Instant::now();
        }
    }

    if let Some((device, _, fade_out)) = &audio_handle {
        fade_out.store(true, Ordering::Relaxed);
        std::thread::sleep(audio::fade_out_duration());
        device.pause();
    }
}

fn service_serial_link(machine: &mut GameBoySystem, serial: &mut Option<SerialLink>) {
    let Some(link) = serial else { return };
    if let Some(sb) = machine.serial_transfer_pending() {
        link.send(sb);
    }
    if let Some(reply) = link.try_recv() {
        machine.complete_serial_transfer(reply);
    }
}
