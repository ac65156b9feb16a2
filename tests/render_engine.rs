//! End-to-end render behavior through the public API.

use lumina_engine::{
    AttributeBundle, EngineError, Surface, classify_geometry, render, resolve_palette,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A bundle that exercises most layers: clipped layout, perspective
/// transform, blended overlays and the weathered texture pass.
fn rich_bundle() -> AttributeBundle {
    AttributeBundle {
        geo_motif: "fractal orbit lattices over a coordinate grid".into(),
        starfield: "nebula clouds and swirling currents".into(),
        ornament: "gilded rectangle mosaics with flourish vines".into(),
        color_theme: "radiant gold and deep ultramarine".into(),
        style: "luminous watercolor washes".into(),
        movement: "cosmic futurism".into(),
        mood: "bold and energetic".into(),
        texture: "cracked vintage varnish".into(),
        layout: "circular mandala frame".into(),
        symbolism: "unity and connection".into(),
        artist: "pollock with matisse cutouts".into(),
        lighting: "dramatic chiaroscuro".into(),
        perspective: "tilted dynamic angle".into(),
        adjective: "resplendent".into(),
        intensity: "fiercely".into(),
        closing: "in luminous harmony".into(),
    }
}

fn render_to_new_surface(bundle: &AttributeBundle, seed: f64, w: u32, h: u32) -> Surface {
    init_tracing();
    let mut surface = Surface::new(w, h).unwrap();
    render(&mut surface, bundle, seed).unwrap();
    surface
}

#[test]
fn identical_inputs_render_identical_pixels() {
    let bundle = rich_bundle();
    let a = render_to_new_surface(&bundle, 42.0, 200, 200);
    let b = render_to_new_surface(&bundle, 42.0, 200, 200);
    assert_eq!(a.data(), b.data());
}

#[test]
fn different_seeds_render_different_pixels() {
    let bundle = rich_bundle();
    let a = render_to_new_surface(&bundle, 42.0, 160, 160);
    let b = render_to_new_surface(&bundle, 43.0, 160, 160);
    assert_ne!(a.data(), b.data());
}

#[test]
fn non_finite_seed_fails_before_touching_the_surface() {
    init_tracing();
    let bundle = rich_bundle();
    let mut surface = Surface::new(64, 64).unwrap();
    let err = render(&mut surface, &bundle, f64::NAN).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(
        surface.data().iter().all(|&b| b == 0),
        "a failed render must leave the surface untouched"
    );
}

#[test]
fn empty_bundle_still_produces_a_composition() {
    // Every classifier falls back; nothing errors, the base coat covers the
    // whole surface and the fallback layers paint over it.
    let bundle = AttributeBundle::default();
    let surface = render_to_new_surface(&bundle, 7.0, 160, 120);

    assert!(classify_geometry("").used_fallback);
    assert!(
        surface.data().chunks_exact(4).all(|px| px[3] == 255),
        "the opaque base coat must reach every pixel"
    );

    // At least one pixel must differ from a plain background fill, proving
    // the fallback layers drew something on top of the base coat.
    let bg = resolve_palette("").background_rgba();
    let flat = [bg.r, bg.g, bg.b, 255];
    assert!(
        surface.data().chunks_exact(4).any(|px| px != flat),
        "fallback layers must paint over the background"
    );
}

#[test]
fn unknown_color_theme_matches_the_default_palette() {
    let mut named = rich_bundle();
    named.color_theme = "radiant gold and deep ultramarine".into();
    let mut unknown = rich_bundle();
    unknown.color_theme = "a theme nobody has heard of".into();

    let a = render_to_new_surface(&named, 11.0, 160, 160);
    let b = render_to_new_surface(&unknown, 11.0, 160, 160);
    assert_eq!(a.data(), b.data());
}

#[test]
fn circular_layout_confines_paint_to_the_disc() {
    let bundle = rich_bundle();
    let surface = render_to_new_surface(&bundle, 42.0, 200, 200);

    let center = surface.pixel(100, 100).unwrap();
    assert!(center[3] > 0, "center must be painted");

    // (8, 8) is well outside the clip disc and clear of the border stroke.
    let corner = surface.pixel(8, 8).unwrap();
    assert_eq!(corner, [0, 0, 0, 0], "outside the clip must stay transparent");
}

#[test]
fn full_bleed_layout_paints_the_corners() {
    let mut bundle = rich_bundle();
    bundle.layout = "flowing full-bleed expanse".into();
    let surface = render_to_new_surface(&bundle, 42.0, 200, 200);
    let corner = surface.pixel(8, 8).unwrap();
    assert!(corner[3] > 0, "unclipped renders cover the whole surface");
}

#[test]
fn cinematic_layout_draws_opaque_letterbox_bars() {
    let mut bundle = rich_bundle();
    bundle.layout = "panoramic cinematic".into();
    let surface = render_to_new_surface(&bundle, 42.0, 200, 200);

    // Bars cover the top and bottom 15%.
    let top = surface.pixel(100, 5).unwrap();
    assert_eq!(&top[0..3], &[0, 0, 0]);
    assert_eq!(top[3], 255);
    let bottom = surface.pixel(100, 195).unwrap();
    assert_eq!(bottom[3], 255);
}

#[test]
fn mood_changes_the_composition() {
    let mut calm = rich_bundle();
    calm.mood = "calm and meditative".into();
    let mut bold = rich_bundle();
    bold.mood = "bold and vibrant".into();

    let a = render_to_new_surface(&calm, 42.0, 160, 160);
    let b = render_to_new_surface(&bold, 42.0, 160, 160);
    assert_ne!(a.data(), b.data());
}
