use inkboard::config::ColorSpec;
use inkboard::input::{MouseButton, PointerEvent, SurfaceController, ToolbarAction};
use inkboard::{Config, DrawingSurface, ExportEncoding, ExportFormat, Point, ToolMode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn surface_from_toml(text: &str) -> DrawingSurface {
    let config = Config::from_toml_str(text).unwrap();
    DrawingSurface::new(&config.surface)
}

fn drag(
    controller: &mut SurfaceController<impl inkboard::ConfirmClear>,
    from: (f64, f64),
    to: (f64, f64),
) {
    controller.on_pointer(PointerEvent::Down {
        button: MouseButton::Left,
        at: from.into(),
    });
    controller.on_pointer(PointerEvent::Move { at: to.into() });
    controller.on_pointer(PointerEvent::Up {
        button: MouseButton::Left,
    });
}

#[test]
fn configured_history_depth_bounds_undo() {
    init_logging();
    let surface = surface_from_toml(
        r#"
        [surface]
        width = 50
        height = 50
        max_undo_steps = 3
        "#,
    );
    let mut controller = SurfaceController::new(surface, || true);

    for row in 0..6 {
        let y = row as f64 * 8.0 + 4.5;
        drag(&mut controller, (2.0, y), (45.0, y));
    }
    assert_eq!(controller.surface().history().len(), 3);

    for _ in 0..5 {
        controller.on_toolbar(ToolbarAction::Undo);
    }
    let surface = controller.into_surface();
    assert_eq!(surface.history().len(), 1);
    // The oldest retained state is the one after stroke four.
    for row in 0..4 {
        let y = row * 8 + 4;
        assert_eq!(surface.buffer().pixel(20, y).unwrap().0, [0, 0, 0, 255]);
    }
    assert_eq!(surface.buffer().pixel(20, 36).unwrap().0, [0, 0, 0, 0]);
}

#[test]
fn erased_pixels_export_as_background() {
    init_logging();
    let mut surface = surface_from_toml(
        r##"
        [surface]
        width = 40
        height = 40
        background_color = "#ff8800"
        pen_color = [0, 0, 255]
        pen_width = 20.0
        eraser_width = 10.0
        "##,
    );
    assert!(surface.begin_stroke(Point::new(0.0, 20.0)));
    assert!(surface.extend_stroke(Point::new(40.0, 20.0)));
    assert!(surface.end_stroke());

    surface.set_tool(ToolMode::Eraser);
    assert!(surface.begin_stroke(Point::new(20.0, 0.0)));
    assert!(surface.extend_stroke(Point::new(20.0, 40.0)));
    assert!(surface.end_stroke());

    assert_eq!(surface.buffer().pixel(20, 20).unwrap().0, [0, 0, 0, 0]);
    assert_eq!(surface.buffer().pixel(5, 20).unwrap().0, [0, 0, 255, 255]);

    let exported = surface
        .export_image(ExportFormat::Png, 1.0, ExportEncoding::Blob)
        .unwrap();
    let decoded = image::load_from_memory(exported.as_bytes().unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.get_pixel(20, 20).0, [255, 136, 0, 255]);
    assert_eq!(decoded.get_pixel(5, 20).0, [0, 0, 255, 255]);
    assert_eq!(decoded.get_pixel(5, 2).0, [255, 136, 0, 255]);
}

#[test]
fn jpeg_export_is_opaque_and_sized() {
    init_logging();
    let mut surface = DrawingSurface::with_size(33, 17);
    surface.set_tool(ToolMode::Eraser);
    assert!(surface.begin_stroke(Point::new(0.0, 8.0)));
    assert!(surface.extend_stroke(Point::new(33.0, 8.0)));
    assert!(surface.end_stroke());

    let bytes = surface.to_blob(ExportFormat::Jpeg, 0.9).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (33, 17));
    // Lossy, but a uniform white background survives closely.
    let p = decoded.get_pixel(16, 8).0;
    assert!(p.iter().all(|c| *c >= 250), "unexpected pixel {p:?}");
}

#[test]
fn declined_clear_through_controller_keeps_drawing() {
    init_logging();
    let mut surface = DrawingSurface::with_size(30, 30);
    surface.set_pen_color(ColorSpec::from("red").resolve().unwrap());
    let mut controller = SurfaceController::new(surface, || false);
    drag(&mut controller, (2.0, 10.5), (28.0, 10.5));

    controller.on_toolbar(ToolbarAction::Clear);
    let surface = controller.surface();
    assert_eq!(surface.buffer().pixel(15, 10).unwrap().0, [255, 0, 0, 255]);
    assert_eq!(surface.history().len(), 2);
}

#[test]
fn configured_export_preferences_select_format() {
    init_logging();
    let config = Config::from_toml_str(
        r#"
        [surface]
        width = 24
        height = 12

        [export]
        format = "jpg"
        quality = 0.9
        "#,
    )
    .unwrap();
    let surface = DrawingSurface::new(&config.surface);

    let exported = surface
        .export_with(&config.export, ExportEncoding::DataUrl)
        .unwrap();
    let url = exported.as_data_url().unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));

    let exported = surface
        .export_with(&config.export, ExportEncoding::Blob)
        .unwrap();
    let bytes = exported.as_bytes().unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (24, 12));
}
