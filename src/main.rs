use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use log::{info, warn};
use raylib::prelude::*;

use std::path::PathBuf;
use std::time::Instant;

use softras::{Frame, InputSnapshot, ProjectedVertex, RenderContext, in_ndc_bounds};

#[derive(Parser, Debug)]
#[command(name = "softras", version, about = "Real-time software rasterizer")]
struct Options {
    /// Geometry file to render (reserved; the built-in cube is always used)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Width of the window
    #[arg(long, default_value_t = 640)]
    width: usize,
    /// Height of the window
    #[arg(long, default_value_t = 360)]
    height: usize,
    /// Target framerate of the window
    #[arg(short = 'r', long, default_value_t = 60)]
    fps: u32,
}

/// Float texture matching the framebuffer layout, so uploads are a plain
/// byte copy.
fn framebuffer_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    width: usize,
    height: usize,
) -> Result<Texture2D> {
    let mut image = Image::gen_image_color(width as i32, height as i32, Color::WHITE);
    image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R32G32B32A32);
    rl.load_texture_from_image(thread, &image)
        .map_err(anyhow::Error::msg)
        .context("framebuffer texture")
}

fn gather_input(rl: &mut RaylibHandle, width: usize, height: usize) -> InputSnapshot {
    // Integer center, same as the recenter below, so an untouched mouse
    // yields a zero offset.
    let center = Vector2::new((width / 2) as f32, (height / 2) as f32);
    let mouse = rl.get_mouse_position();
    let focused = rl.is_window_focused();
    if focused {
        rl.hide_cursor();
        rl.set_mouse_position(center);
    } else {
        rl.show_cursor();
    }
    InputSnapshot {
        focused,
        mouse_offset: Vec2::new(mouse.x - center.x, mouse.y - center.y),
        forward: rl.is_key_down(KeyboardKey::KEY_W),
        back: rl.is_key_down(KeyboardKey::KEY_S),
        left: rl.is_key_down(KeyboardKey::KEY_A),
        right: rl.is_key_down(KeyboardKey::KEY_D),
        rotation_faster: rl.is_key_down(KeyboardKey::KEY_HOME),
        rotation_slower: rl.is_key_down(KeyboardKey::KEY_END),
        movement_faster: rl.is_key_down(KeyboardKey::KEY_PAGE_UP),
        movement_slower: rl.is_key_down(KeyboardKey::KEY_PAGE_DOWN),
        reset: rl.is_key_down(KeyboardKey::KEY_Z),
    }
}

fn draw_overlay(d: &mut RaylibDrawHandle, frame: &Frame, width: usize, height: usize) {
    let pos = frame.camera.position;
    let rot = frame.camera.rotation;
    d.draw_text(
        &format!("Camera Pos: [{:.1}, {:.1}, {:.1}]", pos.x, pos.y, pos.z),
        0,
        25,
        20,
        Color::BLACK,
    );
    d.draw_text(
        &format!("Camera Rot: [{:.1}, {:.1}, {:.1}]", rot.x, rot.y, rot.z),
        0,
        50,
        20,
        Color::BLACK,
    );
    d.draw_text(
        &format!("Rotation Scale: {:.1}", frame.rotation_scale),
        0,
        75,
        20,
        Color::BLACK,
    );
    d.draw_text(
        &format!("Movement Scale: {:.1}", frame.movement_scale),
        0,
        100,
        20,
        Color::BLACK,
    );

    for (i, ProjectedVertex { pos: v }) in frame.projected.iter().enumerate() {
        if in_ndc_bounds(*v) {
            d.draw_circle_v(
                Vector2::new(
                    width as f32 * (v.x + 1.0) / 2.0,
                    height as f32 - height as f32 * (v.y + 1.0) / 2.0,
                ),
                3.0,
                Color::BLACK,
            );
        }
        d.draw_text(
            &format!("[{:.3}, {:.3}, {:.3}, {:.3}]", v.x, v.y, v.z, v.w),
            0,
            125 + 25 * i as i32,
            20,
            Color::BLACK,
        );
    }

    d.draw_fps(0, 0);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let options = Options::parse();
    if let Some(file) = &options.file {
        warn!(
            "geometry file {} ignored, rendering the built-in cube",
            file.display()
        );
    }

    let cores = num_cpus::get();
    rayon::ThreadPoolBuilder::new()
        .num_threads(cores)
        .build_global()
        .context("thread pool")?;
    info!(
        "rasterizing {}x{} on {cores} logical cores",
        options.width, options.height
    );

    let (mut rl, thread) = raylib::init()
        .size(options.width as i32, options.height as i32)
        .title("softras")
        .resizable()
        .build();
    rl.set_target_fps(options.fps);

    let mut texture = framebuffer_texture(&mut rl, &thread, options.width, options.height)?;
    let mut ctx = RenderContext::new(options.width, options.height);
    let mut snapshots = 0u32;
    let mut clock = Instant::now();

    while !rl.window_should_close() {
        let dt = clock.elapsed().as_secs_f32();
        clock = Instant::now();

        if rl.is_key_released(KeyboardKey::KEY_F11) {
            if !rl.is_window_fullscreen() {
                rl.set_window_size(get_monitor_width(0), get_monitor_height(0));
                rl.toggle_fullscreen();
            } else {
                rl.toggle_fullscreen();
                rl.set_window_size(options.width as i32, options.height as i32);
            }
            let center = Vector2::new(
                (rl.get_screen_width() / 2) as f32,
                (rl.get_screen_height() / 2) as f32,
            );
            rl.set_mouse_position(center);
        }

        let width = rl.get_screen_width().max(0) as usize;
        let height = rl.get_screen_height().max(0) as usize;
        let input = gather_input(&mut rl, width, height);

        let Some(frame) = ctx.frame(&input, width, height, dt) else {
            continue;
        };

        if frame.resized {
            texture = framebuffer_texture(&mut rl, &thread, width, height)?;
        }
        texture
            .update_texture(frame.framebuffer.as_bytes())
            .map_err(anyhow::Error::msg)
            .context("texture upload")?;

        if rl.is_key_released(KeyboardKey::KEY_F12) {
            let path = format!("softras-{snapshots:03}.png");
            match frame.framebuffer.save_png(&path) {
                Ok(()) => {
                    info!("saved {path}");
                    snapshots += 1;
                }
                Err(error) => warn!("snapshot failed: {error}"),
            }
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::WHITE);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        draw_overlay(&mut d, &frame, width, height);
    }

    Ok(())
}
