extern crate chalk;

use std::time::Duration;

use chalk::prelude::*;

#[test]
fn defaults() {
    let settings = Settings::default();
    assert!(!settings.headless);
    assert_eq!(settings.engine.max_fps, 60);
    assert_eq!(settings.engine.stop_timeout(), Duration::from_secs(2));
    assert_eq!(settings.window.title, "Chalk");
    assert!(settings.audio.efx);
}

#[test]
fn from_json() {
    let json = r#"
    {
        "headless": true,
        "engine": { "max_fps": 30 },
        "window": { "title": "Demo", "size": { "x": 1024, "y": 768 } }
    }
    "#;

    let settings = Settings::from_json(json).unwrap();
    assert!(settings.headless);
    assert_eq!(settings.engine.max_fps, 30);
    assert_eq!(settings.engine.stop_timeout_ms, 2000);
    assert_eq!(settings.window.title, "Demo");
    assert_eq!(settings.window.size.x, 1024);
    assert_eq!(settings.window.size.y, 768);
    assert!(settings.window.vsync);
    assert_eq!(settings.video, VideoParams::default());

    assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    assert!(Settings::from_json("{ \"headless\": 3 }").is_err());
}

#[test]
fn json_round_trip() {
    let mut settings = Settings::default();
    settings.engine.max_fps = 0;
    settings.audio.efx = false;

    let json = settings.to_json().unwrap();
    assert_eq!(Settings::from_json(&json).unwrap(), settings);
}

#[test]
fn frame_duration() {
    let mut params = EngineParams::default();
    assert_eq!(params.min_frame_duration(), Some(Duration::from_nanos(16_666_666)));

    params.max_fps = 0;
    assert_eq!(params.min_frame_duration(), None);
}
