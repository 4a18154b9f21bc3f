//! End-to-end pitch scenarios through the public API.

use gc_core::action::ActionEvent;
use gc_core::calibration::{AnchorMap, AnchorRole, CalibrationSource};
use gc_core::config::{CoreConfig, FlightParams, TrailConfig};
use gc_core::flight::{Pitch, PitchFlight, ZoneLocation};
use gc_core::physics_constants::sim;
use gc_core::{GameCast, Vec3};

const FRAME_DT: f32 = 1.0 / 60.0;

fn standard_pitch() -> Pitch {
    Pitch::new(Vec3::new(0.0, 1.8, -18.44), ZoneLocation::new(0.0, 2.5), 150.0)
}

#[test]
fn test_fastball_settles_on_ground_with_bounded_trail() {
    let params = FlightParams::default();
    let trail = TrailConfig::default();
    let mut flight = PitchFlight::launch(standard_pitch(), Vec3::zeros(), params, &trail).unwrap();

    let mut ticks = 0;
    while !flight.is_at_rest() && ticks < sim::MAX_STEPS {
        flight.advance(FRAME_DT);
        ticks += 1;
        assert!(flight.trail().len() <= trail.effective_capacity());
        assert!(flight.position().y >= params.ground_level());
    }

    assert!(flight.is_at_rest(), "ball never settled after {ticks} frames");
    assert_eq!(flight.position().y, params.ground_level());
    assert_eq!(flight.state().velocity, Vec3::zeros());
    assert!(flight.trail().len() <= trail.effective_capacity());
}

#[test]
fn test_every_profile_settles() {
    for profile in ["default", "enhanced", "catcher_view"] {
        let cfg = CoreConfig::from_profile(profile).unwrap();
        let mut flight =
            PitchFlight::launch(standard_pitch(), Vec3::zeros(), cfg.flight, &cfg.trail).unwrap();
        let summary = flight.simulate_to_rest(FRAME_DT, sim::MAX_STEPS);
        assert!(summary.at_rest, "{profile} never settled");
        assert_eq!(summary.final_position.y, cfg.flight.ground_level(), "{profile}");
    }
}

#[test]
fn test_small_trail_keeps_latest_samples() {
    let trail = TrailConfig { capacity: 80 };
    let mut flight =
        PitchFlight::launch(standard_pitch(), Vec3::zeros(), FlightParams::default(), &trail).unwrap();
    let summary = flight.simulate_to_rest(0.002, sim::MAX_STEPS);

    assert!(summary.steps > 80);
    assert_eq!(flight.trail().len(), 80);
    let last = flight.trail().latest().unwrap();
    assert!((last.t_seconds - summary.elapsed_s).abs() < 1e-6);
    assert_eq!(last.position, summary.final_position);
}

#[test]
fn test_scaled_scene_gamecast() {
    // Field model authored at 2 units per meter, plate off-origin.
    let anchors = AnchorMap::from_named_nodes([
        ("HomePlate_Center", Vec3::new(4.0, 0.0, 10.0)),
        ("PitchersRubber", Vec3::new(4.0, 0.0, 10.0 - 36.88)),
    ]);
    let mut cast = GameCast::default();
    let cal = *cast.set_anchors(anchors, None);
    assert_eq!(cal.source, CalibrationSource::Anchors);
    assert!((cal.scale - 0.5).abs() < 1e-5);
    assert!(cast.plate().norm() < 1e-4);

    let out = cast.handle_event(&ActionEvent::new(Some("PITCH"), Some("FF 95 [0.0,0.0]")));
    assert!(out.launched);
    while let Some(tick) = cast.tick(FRAME_DT) {
        if tick.at_rest {
            break;
        }
    }

    let mark = cast.zone().recent().last().cloned().unwrap();
    assert_eq!(mark.cell, (1, 1));
    assert_eq!(cast.zone().grid().total(), 1);
    assert!(cast.anchors().contains(AnchorRole::Rubber));
}

#[test]
fn test_feed_sequence() {
    let mut cast = GameCast::default();
    let plays = [
        r#"{"type":"PITCH","desc":"FB 96 [0.1,0.5]"}"#,
        r#"{"type":"SWING","desc":"Hack [-0.2,0.2]"}"#,
        r#"{"type":"FOUL","desc":"Backstop [-0.7,0.9]"}"#,
        r#"{"type":"INPLAY","desc":"DOUBLE [0.2,0.1]"}"#,
        r#"{"type":"WALK","desc":"BB"}"#,
        r#"{"type":"FOUL","desc":"K swinging [-0.3,-0.4]"}"#,
        r#"[1, 2]"#,
    ];
    let actions: Vec<String> = plays
        .iter()
        .map(|json| match ActionEvent::from_json_str(json) {
            Ok(event) => {
                let out = cast.handle_event(&event);
                while let Some(tick) = cast.tick(FRAME_DT) {
                    if tick.at_rest {
                        break;
                    }
                }
                out.action.to_string()
            }
            Err(_) => gc_core::classify_json(&serde_json::json!([1, 2])).to_string(),
        })
        .collect();

    assert_eq!(
        actions,
        vec!["pitch", "swing", "foul", "contact", "walk", "strikeout", "idle"]
    );
    // One launched pitch plus four located non-pitch events.
    assert_eq!(cast.zone().grid().total(), 5);
}
