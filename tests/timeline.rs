use anyhow::Result;

use panim::engine::events::EventKind;
use panim::engine::events::interp::smoothstep;
use panim::engine::{ObjectId, PointField, Scene};
use panim::types::{Font, FontId, Point, Rgba, TextAlign, Texture, TextureId};

const TEX: Texture = Texture {
    id: TextureId(0),
    width: 20,
    height: 10,
};

const FONT: Font = Font {
    id: FontId(0),
    size: 36,
};

fn scene() -> Scene {
    Scene::new(1280, 720, Rgba::new(32, 32, 32, 255))
}

fn alpha(scene: &Scene, id: ObjectId) -> u8 {
    scene.object(id).color.a
}

fn anchor(scene: &Scene, id: ObjectId) -> Point {
    scene.object(id).anchor()
}

fn resolved_move_target(scene: &Scene) -> Option<Point> {
    scene.events().iter().find_map(|e| match &e.kind {
        EventKind::Move(m) => m.resolved_target(),
        _ => None,
    })
}

#[test]
fn fade_scenario_image_over_line() -> Result<()> {
    let mut scene = scene();
    let image = scene.add_image(&TEX, Rgba::TRANSPARENT, Point::new(100, 100), 1)?;
    let line = scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(50, 50), 0)?;
    scene.add_fade(image, Rgba::WHITE, 10, 30)?;
    scene.finalize();

    assert_eq!(scene.draw_order(), &[line, image]);

    let mut seen = Vec::new();
    for t in [0, 10, 25, 40, 41] {
        scene.tick(t);
        seen.push(alpha(&scene, image));
    }
    assert_eq!(seen, vec![0, 0, 127, 255, 255]);
    Ok(())
}

#[test]
fn fade_is_monotonic_between_endpoints() -> Result<()> {
    let mut scene = scene();
    let from = Rgba::new(250, 10, 128, 0);
    let to = Rgba::new(5, 240, 128, 255);
    let text = scene.add_text(&FONT, "x", from, Point::new(0, 0), TextAlign::Left, 0)?;
    scene.add_fade(text, to, 3, 17)?;
    scene.finalize();

    let mut colors = Vec::new();
    for t in 0..=20 {
        scene.tick(t);
        colors.push(scene.object(text).color);
    }

    assert_eq!(colors[3], from);
    assert_eq!(colors[20], to);
    for pair in colors.windows(2) {
        assert!(pair[0].r >= pair[1].r);
        assert!(pair[0].g <= pair[1].g);
        assert_eq!(pair[1].b, 128);
        assert!(pair[0].a <= pair[1].a);
    }
    Ok(())
}

#[test]
fn move_hits_its_endpoints() -> Result<()> {
    let mut scene = scene();
    let line = scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(10, 20), 0)?;
    scene.add_move(line, PointField::End, Point::new(110, -80), false, 4, 12)?;
    scene.finalize();

    for t in 0..=4 {
        scene.tick(t);
    }
    assert_eq!(scene.object(line).point(PointField::End), Some(Point::new(10, 20)));

    for t in 5..=16 {
        scene.tick(t);
    }
    assert_eq!(scene.object(line).point(PointField::End), Some(Point::new(110, -80)));
    Ok(())
}

#[test]
fn smoothstep_is_symmetric() {
    for i in 0..=100 {
        let c = i as f32 / 100.0;
        assert!((smoothstep(c) + smoothstep(1.0 - c) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn relative_move_resolves_once_per_activation() -> Result<()> {
    let mut scene = scene();
    let text = scene.add_text(&FONT, "a", Rgba::WHITE, Point::new(100, 100), TextAlign::Center, 0)?;
    scene.add_move(text, PointField::Anchor, Point::new(50, 0), true, 5, 10)?;
    scene.finalize();

    for t in 0..=5 {
        scene.tick(t);
    }
    assert_eq!(resolved_move_target(&scene), Some(Point::new(150, 100)));
    assert_eq!(anchor(&scene, text), Point::new(100, 100));

    for t in 6..=15 {
        scene.tick(t);
    }
    assert_eq!(anchor(&scene, text), Point::new(150, 100));

    // Scrub back and forward again.
    scene.seek(5);
    assert_eq!(resolved_move_target(&scene), Some(Point::new(150, 100)));
    for t in 6..=15 {
        scene.tick(t);
    }
    assert_eq!(anchor(&scene, text), Point::new(150, 100));

    // Re-activating without a rewind starts from the observed position.
    scene.tick(5);
    assert_eq!(resolved_move_target(&scene), Some(Point::new(200, 100)));
    Ok(())
}

#[test]
fn colocate_is_idempotent_within_a_frame() -> Result<()> {
    let mut scene = scene();
    let image = scene.add_image(&TEX, Rgba::WHITE, Point::new(200, 200), 0)?;
    let label = scene.add_text(&FONT, "1", Rgba::WHITE, Point::new(0, 0), TextAlign::Center, 1)?;
    scene.add_colocate(image, label, Point::new(0, 10), 3)?;
    scene.finalize();

    scene.tick(3);
    let first = anchor(&scene, label);
    scene.tick(3);
    assert_eq!(anchor(&scene, label), first);
    assert_eq!(first, Point::new(200, 210));
    Ok(())
}

#[test]
fn colocate_reads_positions_moved_earlier_in_the_frame() -> Result<()> {
    let mut scene = scene();
    let line = scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(0, 0), 0)?;
    let label = scene.add_text(&FONT, "0", Rgba::WHITE, Point::new(0, 0), TextAlign::Center, 1)?;
    // Registered first, but begins later.
    scene.add_colocate(line, label, Point::new(-10, 0), 10)?;
    scene.add_move(line, PointField::End, Point::new(100, 40), false, 0, 10)?;
    scene.finalize();

    for t in 0..=10 {
        scene.tick(t);
    }
    assert_eq!(anchor(&scene, label), Point::new(40, 20));
    Ok(())
}

#[test]
fn length_is_the_furthest_event_end() -> Result<()> {
    let mut scene = scene();
    let image = scene.add_image(&TEX, Rgba::WHITE, Point::new(0, 0), 0)?;
    let text = scene.add_text(&FONT, "t", Rgba::WHITE, Point::new(0, 0), TextAlign::Center, 0)?;
    assert_eq!(scene.length_in_frames(), 0);

    scene.add_fade(image, Rgba::TRANSPARENT, 10, 20)?;
    assert_eq!(scene.length_in_frames(), 30);

    scene.add_move(text, PointField::Anchor, Point::new(5, 5), false, 0, 12)?;
    assert_eq!(scene.length_in_frames(), 30);

    scene.add_colocate(text, image, Point::default(), 44)?;
    assert_eq!(scene.length_in_frames(), 45);

    scene.add_fade(text, Rgba::TRANSPARENT, 40, 0)?;
    assert_eq!(scene.length_in_frames(), 45);
    Ok(())
}

#[test]
fn finalize_is_idempotent() -> Result<()> {
    let mut scene = scene();
    let ids = [
        scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(1, 1), 3)?,
        scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(1, 1), -1)?,
        scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(1, 1), 3)?,
        scene.add_line(Rgba::WHITE, Point::new(0, 0), Point::new(1, 1), 0)?,
    ];
    scene.add_fade(ids[0], Rgba::TRANSPARENT, 20, 5)?;
    scene.add_fade(ids[1], Rgba::TRANSPARENT, 0, 5)?;
    scene.add_fade(ids[2], Rgba::TRANSPARENT, 20, 5)?;

    scene.finalize();
    let order = scene.draw_order().to_vec();
    let events = scene.events().to_vec();
    scene.finalize();

    assert_eq!(scene.draw_order(), order.as_slice());
    assert_eq!(scene.events(), events.as_slice());
    // Equal depths and begin frames keep insertion order.
    assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
    let begins: Vec<usize> = events.iter().map(|e| e.begin).collect();
    assert_eq!(begins, vec![0, 20, 20]);
    Ok(())
}
