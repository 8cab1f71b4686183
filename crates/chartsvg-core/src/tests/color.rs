use crate::*;

fn resolver() -> ColorResolver {
    ColorResolver::default()
}

#[test]
fn hex_and_named_colors_pass_through() {
    let r = resolver();
    assert_eq!(r.resolve(Some("#FF6384"), 0), DrawColor::literal("#FF6384"));
    assert_eq!(r.resolve(Some("#abc"), 0), DrawColor::literal("#abc"));
    assert_eq!(r.resolve(Some("steelblue"), 3), DrawColor::literal("steelblue"));
}

#[test]
fn rgba_is_normalized_to_fractional_channels() {
    let r = resolver();
    assert_eq!(
        r.resolve(Some("rgba(255,0,0,0.5)"), 0),
        DrawColor::Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 0.5
        }
    );
    assert_eq!(
        r.resolve(Some("rgba(255, 0, 0, 0.5)"), 0),
        r.resolve(Some("rgba(255,0,0,0.5)"), 0)
    );
}

#[test]
fn rgb_is_opaque_and_channels_are_clamped() {
    let r = resolver();
    let DrawColor::Rgba { r: red, g, b, a } = r.resolve(Some("rgb(300, 51, 0)"), 0) else {
        panic!("expected rgba");
    };
    assert_eq!(red, 1.0);
    assert!((g - 0.2).abs() < 1e-12);
    assert_eq!(b, 0.0);
    assert_eq!(a, 1.0);
}

#[test]
fn theme_tokens_resolve_through_the_table() {
    let r = resolver();
    let first = r.resolve(Some("var(--color-accent)"), 0);
    assert_eq!(first, DrawColor::literal("#007AFF"));
    assert_eq!(r.resolve(Some("var(--color-accent)"), 5), first);
    assert_eq!(
        r.resolve(Some("var(--color-secondary)"), 0),
        DrawColor::literal("#6C757D")
    );
}

#[test]
fn unknown_theme_tokens_infer_a_category() {
    let r = resolver();
    assert_eq!(
        r.resolve(Some("var(--my-danger-tone)"), 0),
        DrawColor::literal("#DC3545")
    );
    assert_eq!(
        r.resolve(Some("var(--kpi-up)"), 0),
        DrawColor::literal("#28A745")
    );
    assert_eq!(
        r.resolve(Some("var(--brand-primary-dark)"), 0),
        DrawColor::literal("#007AFF")
    );
    assert_eq!(
        r.resolve(Some("var(--chart-warning)"), 0),
        DrawColor::literal("#FFC107")
    );

    let res = r.resolve_detailed(Some("var(--mystery)"), 0);
    assert_eq!(res.color, DrawColor::literal("#36A2EB"));
    assert_eq!(res.fallback.as_deref(), Some("var(--mystery)"));
}

#[test]
fn malformed_tokens_fall_back_without_failing() {
    let r = resolver();
    for token in ["rgba(1,2)", "#zzzzzz", "hsl(10, 20%, 30%)", "rgba(1,2,3,.)"] {
        let res = r.resolve_detailed(Some(token), 0);
        assert_eq!(res.color, DrawColor::literal("#36A2EB"), "token {token}");
        assert!(res.fallback.is_some(), "token {token}");
    }
}

#[test]
fn missing_color_uses_palette_by_index() {
    let r = resolver();
    assert_eq!(r.resolve(None, 0), DrawColor::literal("#FF6384"));
    assert_eq!(r.resolve(Some("  "), 1), DrawColor::literal("#36A2EB"));
    assert_eq!(r.resolve(None, 9), DrawColor::literal("#36A2EB"));
}

#[test]
fn site_config_overrides_palette_and_categories() {
    let mut config = ChartConfig::default();
    config.deep_merge(&serde_json::json!({
        "palette": ["#111111", "#222222"],
        "colors": { "danger": "#990000" }
    }));
    let r = ColorResolver::from_config(&config);
    assert_eq!(r.resolve(None, 3), DrawColor::literal("#222222"));
    assert_eq!(
        r.resolve(Some("var(--alert-error)"), 0),
        DrawColor::literal("#990000")
    );
}

#[test]
fn draw_color_paint_and_alpha() {
    let c = DrawColor::Rgba {
        r: 1.0,
        g: 0.5,
        b: 0.0,
        a: 1.7,
    };
    assert_eq!(c.paint(), "rgb(255,128,0)");
    assert_eq!(c.alpha(), 1.0);
    assert_eq!(DrawColor::literal("red").alpha(), 1.0);
}

#[test]
fn token_parse_normalizes_theme_names() {
    assert_eq!(
        ColorToken::parse(" var( --color-success ) "),
        ColorToken::Theme("var(--color-success)".to_string())
    );
    assert_eq!(
        ColorToken::parse("var(--x, #fff)"),
        ColorToken::Theme("var(--x)".to_string())
    );
}
