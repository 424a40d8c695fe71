//! Terravox - headless walkthrough
//!
//! Builds the scene, then drives the avatar with a scripted input sequence
//! at a fixed 60 Hz step: walk forward while slowly turning, jump now and
//! then, and click the centre of the screen every half second.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Scene config JSON (default: built-in defaults)
//!   --frames <N>      Frames to simulate (default: 600)
//!   --keys <CODES>    Comma-separated DOM key codes held throughout (default: KeyW)
//!   --dump <PATH>     Write the effective config to PATH and exit

use std::path::PathBuf;

use terravox::core::{
    input::{InputEvent, KeyCode, MouseButton},
    logging,
    time::FrameTimer,
    Error,
    Result,
};
use terravox::scene::{Scene, SceneConfig};

const STEP: f32 = 1.0 / 60.0;
const CLICK_EVERY: u64 = 30;
const JUMP_EVERY: u64 = 90;
/// Mouse counts per frame, a slow left-to-right sweep
const TURN_RATE: f32 = 3.0;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let frames = parse_u64_arg(&args, "--frames").unwrap_or(600);
    let held = parse_keys_arg(&args, "--keys")?.unwrap_or_else(|| vec![KeyCode::KeyW]);

    let config = match parse_path_arg(&args, "--config") {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };

    if let Some(path) = parse_path_arg(&args, "--dump") {
        config.save(&path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut scene = Scene::init(config)?;
    println!("=== Terravox ===");
    println!("Voxels: {}", scene.volume().len());
    println!("Frames: {}", frames);
    println!();

    scene.handle_event(InputEvent::PointerLock(true));
    for key in &held {
        scene.handle_event(InputEvent::KeyDown(*key));
    }

    let mut timer = FrameTimer::new();
    for frame in 1..=frames {
        scene.handle_event(InputEvent::MouseMotion { dx: TURN_RATE, dy: 0.0 });

        if frame % JUMP_EVERY == 0 {
            scene.handle_event(InputEvent::KeyDown(KeyCode::Space));
        } else if frame % JUMP_EVERY == 1 {
            scene.handle_event(InputEvent::KeyUp(KeyCode::Space));
        }
        if frame % CLICK_EVERY == 0 {
            scene.handle_event(InputEvent::Click(MouseButton::Left));
        }

        let report = scene.update(STEP);
        if report.removed > 0 {
            let p = scene.camera().position;
            log::debug!("Frame {}: removed {} voxel(s) from ({:.1}, {:.1}, {:.1})", frame, report.removed, p.x, p.y, p.z);
        }

        timer.tick();
        if timer.fps_refreshed() {
            log::debug!("FPS: {:.0}", timer.fps());
        }
    }

    let instances = scene.instances().len();
    let end = scene.camera().position;
    let stats = scene.teardown();

    println!("Removed:   {}", stats.removed);
    println!("Misses:    {}", stats.misses);
    println!("Instances: {}", instances);
    println!("Final eye: ({:.2}, {:.2}, {:.2})", end.x, end.y, end.z);

    Ok(())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_keys_arg(args: &[String], flag: &str) -> Result<Option<Vec<KeyCode>>> {
    let Some(list) = args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)) else {
        return Ok(None);
    };

    list.split(',')
        .map(|code| {
            KeyCode::from_code(code.trim())
                .ok_or_else(|| Error::Config(format!("unknown key code '{}'", code)))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_keys_arg() {
        let held = parse_keys_arg(&args(&["terravox", "--keys", "KeyW, ArrowLeft"]), "--keys").unwrap();
        assert_eq!(held, Some(vec![KeyCode::KeyW, KeyCode::ArrowLeft]));

        assert!(parse_keys_arg(&args(&["terravox"]), "--keys").unwrap().is_none());
        assert!(matches!(
            parse_keys_arg(&args(&["terravox", "--keys", "KeyW,KeyQ"]), "--keys"),
            Err(Error::Config(_))
        ));
    }
}
