use afterglow_core::{Canvas, CircleMark, RadiusRange, TrailConfig, TrailEngine, Vec2, Viewport};

#[derive(Default)]
struct CountingCanvas {
    frame_marks: usize,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self, _viewport: Viewport) {
        self.frame_marks = 0;
    }

    fn fill_circle(&mut self, _mark: &CircleMark) {
        self.frame_marks += 1;
    }
}

fn fixed_radius(radius: f32) -> TrailConfig {
    TrailConfig {
        radius: RadiusRange {
            min: radius,
            max: radius,
        },
        ..TrailConfig::default()
    }
}

fn spawn_one(engine: &mut TrailEngine) {
    let interval = engine.config().spawn_interval;
    for _ in 0..interval {
        engine.pointer_moved(Vec2::new(200.0, 150.0));
    }
    assert_eq!(engine.particles().len(), 1);
}

#[test]
fn single_particle_lives_fifty_frames_then_stays_gone() {
    let mut engine = TrailEngine::new(fixed_radius(8.0), 1).unwrap();
    engine.resize(Viewport::new(640, 480));
    spawn_one(&mut engine);

    let mut canvas = CountingCanvas::default();
    let mut removed_at = None;
    for frame in 0..100 {
        let stats = engine.tick(&mut canvas);
        if stats.culled > 0 {
            assert!(removed_at.is_none(), "culled twice");
            removed_at = Some(frame);
        }
        if frame < 49 {
            assert_eq!(canvas.frame_marks, 1, "frame {frame}");
        } else {
            assert_eq!(canvas.frame_marks, 0, "frame {frame}");
        }
        if frame >= 50 {
            assert!(engine.particles().is_empty(), "frame {frame}");
        }
    }
    assert_eq!(removed_at, Some(50));
}

#[test]
fn small_particle_expires_by_radius_before_opacity() {
    let mut engine = TrailEngine::new(fixed_radius(4.0), 2).unwrap();
    spawn_one(&mut engine);

    let mut canvas = CountingCanvas::default();
    for _ in 0..40 {
        engine.tick(&mut canvas);
    }
    let particle = engine.particles()[0];
    assert_eq!(particle.age(), 40);
    assert!(particle.radius <= 0.0);
    assert!(particle.opacity > 0.0);

    let stats = engine.tick(&mut canvas);
    assert_eq!(stats.culled, 1);
    assert!(engine.particles().is_empty());
}

#[test]
fn decay_matches_closed_form_after_k_steps() {
    let mut engine = TrailEngine::new(fixed_radius(6.0), 3).unwrap();
    spawn_one(&mut engine);

    let mut canvas = CountingCanvas::default();
    for k in 1..=25u32 {
        engine.tick(&mut canvas);
        let p = engine.particles()[0];
        assert_eq!(p.opacity, 1.0 - k as f32 * 0.02);
        assert_eq!(p.radius, 6.0 - k as f32 * 0.1);
    }
}

#[test]
fn steady_pointer_motion_keeps_the_store_bounded() {
    let mut engine = TrailEngine::new(TrailConfig::default(), 4).unwrap();
    let mut canvas = CountingCanvas::default();
    let mut peak = 0;
    for frame in 0..600 {
        // Three moves per frame: one spawn per frame.
        for step in 0..3 {
            engine.pointer_moved(Vec2::new(frame as f32, step as f32));
        }
        let stats = engine.tick(&mut canvas);
        peak = peak.max(stats.live);
    }
    // One spawn per frame and at most 50 updates of life each.
    assert!(peak <= 51, "peak {peak}");
    assert!(peak >= 40, "peak {peak}");
}
