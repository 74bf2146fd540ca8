use svgscene::paint::PaintSource;
use svgscene::svgvalues::{Color, Length, Paint};
use svgscene::tiny_skia::{ColorU8, Rect};
use svgscene::{Document, DrawCommand, LengthContext, LengthType, Record, RecordingCanvas};

fn record(text: &str) -> RecordingCanvas {
    let doc = Document::from_str(text).unwrap();
    let mut canvas = RecordingCanvas::new();
    doc.render(&mut canvas);
    canvas
}

fn color_u8(call: &svgscene::DrawCall) -> ColorU8 {
    call.paint.color().unwrap().to_color_u8()
}

#[test]
fn single_rect() {
    let text = "<svg width='100' height='50'>\
                <rect x='10' y='10' width='20' height='20' fill='#ff0000'/>\
                </svg>";

    let doc = Document::from_str(text).unwrap();
    assert_eq!(doc.intrinsic_size(), (100.0, 50.0));

    let mut canvas = RecordingCanvas::new();
    doc.render(&mut canvas);

    let draws = canvas.draws();
    assert_eq!(draws.len(), 1);
    match draws[0].command {
        DrawCommand::RRect { rx, ry, .. } => {
            assert_eq!(rx, 0.0);
            assert_eq!(ry, 0.0);
        }
        ref c => panic!("unexpected command {:?}", c),
    }
    assert!(draws[0].paint.is_fill());
    assert_eq!(color_u8(draws[0]), ColorU8::from_rgba(255, 0, 0, 255));
    assert_eq!(draws[0].device_bounds(), Rect::from_ltrb(10.0, 10.0, 30.0, 30.0));
}

#[test]
fn length_resolution() {
    let ctx = LengthContext::new((200.0, 100.0), 96.0);
    let half: Length = "50%".parse().unwrap();
    assert_eq!(ctx.resolve(half, LengthType::Horizontal), 100.0);
    assert_eq!(ctx.resolve(half, LengthType::Vertical), 50.0);
    assert_eq!(
        ctx.resolve(half, LengthType::Other),
        50.0 * (200.0f64 * 100.0).sqrt() / 100.0
    );

    let five = Length::new_number(5.0);
    for kind in [LengthType::Horizontal, LengthType::Vertical, LengthType::Other] {
        assert_eq!(ctx.resolve(five, kind), 5.0);
        // Resolving doesn't change the context.
        assert_eq!(ctx.resolve(five, kind), 5.0);
    }
    assert_eq!(ctx, LengthContext::new((200.0, 100.0), 96.0));
}

#[test]
fn style_matches_attributes() {
    let doc = Document::from_str(
        "<svg>\
            <rect style='fill:red; stroke : blue;junk'/>\
            <rect fill='red' stroke='blue'/>\
        </svg>",
    )
    .unwrap();

    let root = doc.root().unwrap();
    let a = root.children()[0].presentation();
    let b = root.children()[1].presentation();
    assert_eq!(a.fill, Some(Paint::Color(Color::new_rgb(255, 0, 0))));
    assert_eq!(a.fill, b.fill);
    assert_eq!(a.stroke, b.stroke);
}

#[test]
fn malformed_length() {
    let doc = Document::from_str("<svg><rect width='abc' height='10'/></svg>").unwrap();
    match doc.root().unwrap().children()[0].kind() {
        svgscene::NodeKind::Rect(r) => {
            assert_eq!(r.width, Length::zero());
            assert_eq!(r.height, Length::new_number(10.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn fill_is_inherited() {
    let canvas = record(
        "<svg width='100' height='100'>\
            <g fill='#00ff00'>\
                <rect width='10' height='10'/>\
                <rect width='10' height='10' fill='#0000ff'/>\
                <g><circle r='5'/></g>\
            </g>\
            <rect width='10' height='10'/>\
        </svg>",
    );

    let colors: Vec<_> = canvas.draws().into_iter().map(color_u8).collect();
    assert_eq!(
        colors,
        vec![
            ColorU8::from_rgba(0, 255, 0, 255),
            ColorU8::from_rgba(0, 0, 255, 255),
            ColorU8::from_rgba(0, 255, 0, 255),
            ColorU8::from_rgba(0, 0, 0, 255),
        ]
    );
}

#[test]
fn current_color() {
    let canvas = record(
        "<svg><g color='#0000ff'><rect width='10' height='10' fill='currentColor'/></g></svg>",
    );
    assert_eq!(color_u8(canvas.draws()[0]), ColorU8::from_rgba(0, 0, 255, 255));
}

#[test]
fn opacity_is_not_inherited() {
    let canvas = record(
        "<svg>\
            <g opacity='0.5'>\
                <rect width='10' height='10'/>\
                <rect width='10' height='10' opacity='0.5'/>\
            </g>\
        </svg>",
    );

    let layers = canvas
        .records()
        .iter()
        .filter(|r| matches!(r, Record::SaveLayer(_)))
        .count();
    assert_eq!(layers, 1);

    let alphas: Vec<_> = canvas.draws().into_iter().map(|d| color_u8(d).alpha()).collect();
    assert_eq!(alphas, vec![255, 128]);
}

#[test]
fn clip_path_is_not_inherited() {
    let canvas = record(
        "<svg>\
            <clipPath id='c'><rect width='5' height='5'/></clipPath>\
            <g clip-path='url(#c)'>\
                <rect width='10' height='10'/>\
                <g><rect width='10' height='10'/></g>\
            </g>\
        </svg>",
    );

    let clips = canvas
        .records()
        .iter()
        .filter(|r| matches!(r, Record::Clip(_)))
        .count();
    assert_eq!(clips, 1);
    assert_eq!(canvas.draws().len(), 2);
}

#[test]
fn empty_clip_path_hides_element() {
    let canvas = record(
        "<svg>\
            <clipPath id='c'/>\
            <rect width='10' height='10' clip-path='url(#c)'/>\
            <rect width='10' height='10' clip-path='url(#missing)'/>\
        </svg>",
    );
    assert_eq!(canvas.draws().len(), 1);
}

#[test]
fn gradient_stops_via_href() {
    let doc = Document::from_str(
        "<svg xmlns:xlink='http://www.w3.org/1999/xlink'>\
            <linearGradient id='a'>\
                <stop offset='0.8' stop-color='red'/>\
                <stop offset='-1' stop-color='green'/>\
                <stop offset='150%' stop-color='blue'/>\
            </linearGradient>\
            <radialGradient id='b' xlink:href='#a'/>\
        </svg>",
    )
    .unwrap();

    let node = doc.find_node_by_id("b").unwrap();
    let stops = node.gradient_stops(&doc.resolve_context());
    assert_eq!(stops.len(), 3);

    let offsets: Vec<_> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.8, 0.0, 1.0]);
    assert_eq!(stops[0].color, Color::new_rgb(255, 0, 0));
    assert_eq!(stops[2].color, Color::new_rgb(0, 0, 255));
}

#[test]
fn gradient_fill() {
    let canvas = record(
        "<svg>\
            <linearGradient id='lg'>\
                <stop offset='0' stop-color='red'/>\
                <stop offset='1' stop-color='blue'/>\
            </linearGradient>\
            <rect width='10' height='10' fill='url(#lg)'/>\
            <rect width='10' height='10' fill='url(#missing) green'/>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 2);
    assert!(matches!(draws[0].paint.source, PaintSource::Shader(_)));
    assert_eq!(color_u8(draws[1]), ColorU8::from_rgba(0, 128, 0, 255));
}

#[test]
fn gradient_href_loop() {
    let canvas = record(
        "<svg>\
            <linearGradient id='a' href='#b'/>\
            <linearGradient id='b' href='#a'/>\
            <rect width='10' height='10' fill='url(#a)'/>\
        </svg>",
    );
    assert!(canvas.draws().is_empty());
}

#[test]
fn pattern_href_chain() {
    let doc = Document::from_str(
        "<svg>\
            <pattern id='a' href='#b' width='10'/>\
            <pattern id='b' width='20' height='30'>\
                <rect width='5' height='5'/>\
            </pattern>\
        </svg>",
    )
    .unwrap();

    let node = doc.find_node_by_id("a").unwrap();
    let pattern = node.resolve_pattern(&doc.resolve_context()).unwrap();
    assert_eq!(pattern.width, Length::new_number(10.0));
    assert_eq!(pattern.height, Length::new_number(30.0));
    assert_eq!(pattern.content.len(), 1);
}

#[test]
fn pattern_inherits_missing_attributes() {
    let doc = Document::from_str(
        "<svg>\
            <pattern id='a' width='10'/>\
            <pattern id='b' href='#a' height='30'>\
                <rect width='5' height='5'/>\
            </pattern>\
        </svg>",
    )
    .unwrap();

    let node = doc.find_node_by_id("b").unwrap();
    let pattern = node.resolve_pattern(&doc.resolve_context()).unwrap();
    assert_eq!(pattern.width, Length::new_number(10.0));
    assert_eq!(pattern.height, Length::new_number(30.0));
    assert_eq!(pattern.content.len(), 1);
    assert!(std::rc::Rc::ptr_eq(&pattern.content[0], &node.children()[0]));
}

#[test]
fn pattern_self_reference() {
    let canvas = record(
        "<svg width='100' height='100'>\
            <pattern id='p' href='#p' width='10' height='10' patternUnits='userSpaceOnUse'>\
                <rect width='5' height='5' fill='url(#p)'/>\
            </pattern>\
            <rect width='50' height='50' fill='url(#p)'/>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 1);
    assert!(matches!(draws[0].paint.source, PaintSource::Pattern(_)));
}

#[test]
fn use_missing_target() {
    let doc = Document::from_str("<svg><use href='#nope'/></svg>").unwrap();
    let mut canvas = RecordingCanvas::new();
    doc.render(&mut canvas);
    assert!(canvas.draws().is_empty());

    let node = &doc.root().unwrap().children()[0];
    assert!(node.as_path(&doc.resolve_context()).is_none());
}

#[test]
fn use_references_ancestor() {
    let canvas = record(
        "<svg>\
            <g id='g'>\
                <rect width='10' height='10'/>\
                <use href='#g' x='20'/>\
            </g>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[1].device_bounds(), Rect::from_xywh(20.0, 0.0, 10.0, 10.0));
}

fn clip_bounds(canvas: &RecordingCanvas) -> Vec<Rect> {
    canvas
        .records()
        .iter()
        .filter_map(|r| match r {
            Record::Clip(path) => Some(path.bounds()),
            _ => None,
        })
        .collect()
}

#[test]
fn bbox_clip_on_use() {
    let canvas = record(
        "<svg>\
            <defs><rect id='r' width='10' height='10'/></defs>\
            <clipPath id='c' clipPathUnits='objectBoundingBox'>\
                <rect width='1' height='1'/>\
            </clipPath>\
            <use href='#r' x='20' clip-path='url(#c)'/>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].device_bounds(), Rect::from_xywh(20.0, 0.0, 10.0, 10.0));
    assert_eq!(
        clip_bounds(&canvas),
        vec![Rect::from_xywh(20.0, 0.0, 10.0, 10.0).unwrap()]
    );
}

#[test]
fn bbox_clip_on_nested_svg() {
    let canvas = record(
        "<svg width='100' height='100'>\
            <clipPath id='c' clipPathUnits='objectBoundingBox'>\
                <rect width='0.5' height='1'/>\
            </clipPath>\
            <svg x='10' y='10' width='50' height='50' viewBox='0 0 10 10' clip-path='url(#c)'>\
                <rect width='4' height='4'/>\
            </svg>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].device_bounds(), Rect::from_xywh(10.0, 10.0, 20.0, 20.0));
    // Half of the content width, in viewport coordinates.
    assert_eq!(
        clip_bounds(&canvas),
        vec![Rect::from_xywh(10.0, 10.0, 10.0, 20.0).unwrap()]
    );
}

#[test]
fn nested_svg_with_view_box() {
    let canvas = record(
        "<svg width='100' height='100'>\
            <svg x='10' y='10' width='50' height='50' viewBox='0 0 10 10'>\
                <rect width='10' height='10'/>\
                <rect width='50%' height='50%'/>\
            </svg>\
        </svg>",
    );

    let draws = canvas.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].device_bounds(), Rect::from_ltrb(10.0, 10.0, 60.0, 60.0));
    // Percentages resolve against the viewBox.
    assert_eq!(draws[1].device_bounds(), Rect::from_ltrb(10.0, 10.0, 35.0, 35.0));
}

#[test]
fn container_size_affects_percentages() {
    let mut doc = Document::from_str("<svg><rect width='50%' height='50%'/></svg>").unwrap();
    assert_eq!(doc.intrinsic_size(), (0.0, 0.0));
    assert_eq!(doc.container_size(), (100.0, 100.0));

    doc.set_container_size((40.0, 20.0));
    let mut canvas = RecordingCanvas::new();
    doc.render(&mut canvas);
    assert_eq!(canvas.draws()[0].device_bounds(), Rect::from_xywh(0.0, 0.0, 20.0, 10.0));
}

#[test]
fn from_stream() {
    let data: &[u8] = b"<svg width='10' height='20'/>";
    let doc = Document::from_stream(data).unwrap();
    assert_eq!(doc.intrinsic_size(), (10.0, 20.0));
}
