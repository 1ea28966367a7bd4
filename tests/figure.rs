//! End-to-end figure assembly over a real surface.

use durer::helper::{MathCanvasOptions, StyledExt, create_math_canvas};
use durer::sampling::scatter_points;
use durer::style::{LineStyle, Style};
use durer::types::Color;
use durer::{Canvas, Vec2};

fn pixel(canvas: &Canvas, x: u32, y: u32) -> (u8, u8, u8, u8) {
    canvas.pixel(x, y).expect("pixel in bounds")
}

#[test]
fn full_figure_renders() {
    let style = Style::default();
    let opts = MathCanvasOptions {
        padding: 50.0,
        origin: Vec2::new(250.0, 150.0),
        scale: Vec2::new(50.0, 50.0),
        interval: Vec2::ONE,
    };
    let math = create_math_canvas(600, 400, &opts, &style).unwrap();

    math.draw_styled_function(&style, |x| x * x / 2.0, -3.0, 3.0, true);
    math.draw_tangent(|x| x * x / 2.0, 1.0, 0.8, &style.math.axis);
    math.draw_styled_segment(&style, Vec2::new(-2.0, 1.0), Vec2::new(-1.0, 2.0));
    math.draw_circle_mark_with_label(&style, Vec2::new(1.0, 0.5), "P");
    math.draw_bezier_arrow(Vec2::new(-2.5, 2.5), Vec2::new(-1.5, 1.5), &style.math.segment);
    math.draw_measure(
        Vec2::new(0.0, -1.0),
        Vec2::new(2.0, -1.0),
        12.0,
        10.0,
        false,
        "2",
        &style.math.axis,
        &style.font,
    );
    let scatter = scatter_points(20, -3.0..3.0, 0.0..3.0, 7);
    math.draw_points(&scatter, style.math.endpoint, 2.0);

    // the curve passes through the math origin, device (300, 200)
    let (r, _, b, _) = pixel(&math, 300, 200);
    assert!(r < 200 && b > 60);

    // outside the panel the figure background is untouched white
    assert_eq!(pixel(&math, 5, 5), (255, 255, 255, 255));

    let png = math.encode_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn nested_frames_share_one_surface() {
    let root = Canvas::new(200, 100).unwrap();
    root.fill_background(Color::WHITE);

    let left = root
        .sub_canvas(
            Vec2::ZERO,
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        )
        .unwrap();
    let right = root
        .sub_canvas(
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 10.0),
        )
        .unwrap();

    let pen = LineStyle::new(Color::BLACK, 2.0);
    left.draw_line(Vec2::new(-4.0, 0.0), Vec2::new(4.0, 0.0), &pen);
    right.draw_line(Vec2::new(0.0, -4.0), Vec2::new(0.0, 4.0), &pen);

    // both strokes land on the shared surface through their own frames
    assert!(pixel(&root, 50, 50).0 < 128);
    assert!(pixel(&root, 150, 30).0 < 128);
    // and the left frame's vertical center column stays white
    assert_eq!(pixel(&root, 50, 10).0, 255);
}

#[test]
fn grids_skip_degenerate_intervals_everywhere() {
    let root = Canvas::new(80, 80).unwrap();
    root.fill_background(Color::WHITE);
    let sub = root
        .sub_canvas(
            Vec2::new(10.0, 10.0),
            Vec2::new(60.0, 60.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(10.0, 10.0),
        )
        .unwrap();
    sub.draw_grid(Vec2::ZERO, &LineStyle::new(Color::BLACK, 1.0), None);
    sub.draw_grid(Vec2::new(1.0, 0.0), &LineStyle::new(Color::BLACK, 1.0), None);
    for (x, y) in [(40, 40), (20, 60), (60, 20)] {
        assert_eq!(pixel(&root, x, y), (255, 255, 255, 255));
    }
}
