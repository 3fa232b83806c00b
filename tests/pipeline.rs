//! End-to-end pipeline tests.
//!
//! These drive [`RenderContext`] the way the window front end does,
//! frame by frame with input snapshots, and check what an observer of
//! the framebuffer would see.

use glam::Vec2;
use softras::{ColorF, InputSnapshot, RenderContext};

fn forward() -> InputSnapshot {
    InputSnapshot {
        forward: true,
        ..Default::default()
    }
}

fn written_pixels(ctx: &RenderContext) -> usize {
    ctx.framebuffer()
        .pixels()
        .iter()
        .filter(|&&p| p != ColorF::TRANSPARENT)
        .count()
}

fn depth_min(ctx: &RenderContext) -> f32 {
    ctx.depth()
        .values()
        .iter()
        .copied()
        .fold(f32::INFINITY, f32::min)
}

#[test]
fn walking_toward_the_cube_brings_it_closer() {
    let mut ctx = RenderContext::new(96, 96);
    ctx.frame(&InputSnapshot::default(), 96, 96, 0.0);
    let start_depth = depth_min(&ctx);
    let start_written = written_pixels(&ctx);
    assert!(start_written > 0);

    for _ in 0..10 {
        ctx.frame(&forward(), 96, 96, 0.1);
    }

    // One world unit forward: the near face sits one unit closer and
    // covers more of the viewport.
    let end_depth = depth_min(&ctx);
    assert!(
        end_depth < start_depth - 0.9,
        "depth went {start_depth} -> {end_depth}"
    );
    assert!(written_pixels(&ctx) > start_written);
}

#[test]
fn turning_the_camera_moves_the_cube_off_center() {
    let mut ctx = RenderContext::new(96, 96);
    ctx.frame(&InputSnapshot::default(), 96, 96, 0.0);
    let before = ctx.framebuffer().pixels().to_vec();

    let turn = InputSnapshot {
        focused: true,
        mouse_offset: Vec2::new(40.0, 0.0),
        ..Default::default()
    };
    ctx.frame(&turn, 96, 96, 0.016);
    assert_ne!(ctx.framebuffer().pixels(), &before[..]);
    assert_eq!(ctx.camera.rotation.y, 20.0);
}

#[test]
fn identical_input_scripts_render_identical_frames() {
    let script = [
        InputSnapshot {
            focused: true,
            mouse_offset: Vec2::new(12.0, -7.0),
            forward: true,
            ..Default::default()
        },
        InputSnapshot {
            left: true,
            movement_faster: true,
            ..Default::default()
        },
        InputSnapshot {
            focused: true,
            mouse_offset: Vec2::new(-3.0, 9.0),
            back: true,
            ..Default::default()
        },
    ];

    let mut first = RenderContext::new(80, 45);
    let mut second = RenderContext::new(80, 45);
    for input in &script {
        first.frame(input, 80, 45, 0.033);
        second.frame(input, 80, 45, 0.033);
    }

    assert_eq!(
        first.framebuffer().as_bytes(),
        second.framebuffer().as_bytes()
    );
    assert_eq!(first.depth().values(), second.depth().values());
    assert_eq!(first.camera, second.camera);
}

#[test]
fn snapshot_round_trips_through_png() {
    let mut ctx = RenderContext::new(48, 32);
    ctx.frame(&InputSnapshot::default(), 48, 32, 0.0);

    let path = std::env::temp_dir().join("softras-pipeline-snapshot.png");
    ctx.framebuffer().save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().into_rgba8();
    assert_eq!(decoded.dimensions(), (48, 32));
    let opaque = decoded.pixels().filter(|p| p.0[3] == 255).count();
    assert!(opaque > 0, "cube pixels should be opaque in the snapshot");

    let _ = std::fs::remove_file(&path);
}
