//! End-to-end viewer behavior against a recording surface.
//!
//! Covers the observable contracts of the viewer:
//!
//! 1. Mode threshold at exactly `activation_threshold` and one below.
//! 2. Idempotent window recompute (no second render).
//! 3. Search totals, ordering and global numbering.
//! 4. Circular navigation.
//! 5. Full-text retrieval independent of render mode.
//! 6. Fixed scroll geometry across windows.
//!
//! Run with: cargo test -p querypad-view --test viewer_scenarios

use querypad_view::testing::RecordingSurface;
use querypad_view::{LineRange, MatchInfo, RenderMode, SpanKind, TextViewer, ViewerConfig};

fn viewer_with(config: ViewerConfig) -> TextViewer<RecordingSurface> {
    TextViewer::new(RecordingSurface::new(540.0), config).expect("valid config")
}

fn viewer() -> TextViewer<RecordingSurface> {
    viewer_with(ViewerConfig::default())
}

fn repeated(line: &str, n: usize) -> Vec<String> {
    vec![line.to_owned(); n]
}

// =============================================================================
// Mode threshold
// =============================================================================

#[test]
fn threshold_minus_one_is_direct() {
    let mut v = viewer();
    v.set_lines(repeated("x", 4_999));
    assert_eq!(v.mode(), RenderMode::Direct);
    assert_eq!(v.surface().last_block().unwrap().len(), 4_999);
}

#[test]
fn threshold_exactly_is_windowed() {
    let mut v = viewer();
    v.set_lines(repeated("x", 5_000));
    assert_eq!(v.mode(), RenderMode::Windowed);
    assert_eq!(v.surface().last_block().unwrap().len(), 90);
}

#[test]
fn mode_is_recomputed_on_every_document() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    assert_eq!(v.mode(), RenderMode::Windowed);
    v.set_lines(repeated("x", 10));
    assert_eq!(v.mode(), RenderMode::Direct);
    assert_eq!(v.window(), None);
    v.set_lines(repeated("x", 6_000));
    assert_eq!(v.window(), Some(LineRange::new(0, 90)));
}

#[test]
fn custom_threshold_is_honored() {
    let mut v = viewer_with(ViewerConfig::default().with_activation_threshold(3));
    v.set_text("a\nb\nc");
    assert_eq!(v.mode(), RenderMode::Windowed);
}

// =============================================================================
// Scenario A / B
// =============================================================================

#[test]
fn scenario_a_small_document_is_direct() {
    let mut v = viewer();
    v.set_lines(vec!["a".into(), "bb".into(), "ccc".into()]);
    assert_eq!(v.mode(), RenderMode::Direct);
    assert_eq!(v.full_text(), "a\nbb\nccc");
}

#[test]
fn scenario_b_first_window() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    assert_eq!(v.mode(), RenderMode::Windowed);
    // The initial render already materialized 0..90.
    assert_eq!(v.window(), Some(LineRange::new(0, 90)));
    assert_eq!(v.recompute_window(0.0, 540.0), None);
}

// =============================================================================
// Idempotent recompute
// =============================================================================

#[test]
fn identical_recompute_does_not_render_twice() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    assert_eq!(
        v.recompute_window(9_000.0, 540.0),
        Some(LineRange::new(470, 560))
    );
    let renders = v.surface().render_count();
    assert_eq!(v.recompute_window(9_000.0, 540.0), None);
    assert_eq!(v.surface().render_count(), renders);
}

#[test]
fn scrolling_within_one_line_does_not_render() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    v.recompute_window(9_000.0, 540.0);
    let renders = v.surface().render_count();
    for dy in 1..18 {
        assert_eq!(v.recompute_window(9_000.0 + f64::from(dy), 540.0), None);
    }
    assert_eq!(v.surface().render_count(), renders);
}

#[test]
fn only_window_lines_are_materialized() {
    let mut v = viewer();
    v.set_lines((0..20_000).map(|i| format!("{i}")).collect());
    v.recompute_window(18.0 * 10_000.0, 540.0);
    let block = v.surface().last_block().unwrap();
    assert_eq!(block.range, LineRange::new(9_970, 10_060));
    assert_eq!(block.lines.first().unwrap().text(), "9970");
    assert_eq!(block.lines.last().unwrap().text(), "10059");
    assert_eq!(v.surface().block_offset, 9_970.0 * 18.0);
    assert_eq!(v.surface().content_height, 20_000.0 * 18.0);
}

// =============================================================================
// Scenario C / D / E
// =============================================================================

fn scenario_c() -> TextViewer<RecordingSurface> {
    let mut v = viewer();
    v.set_lines(vec!["foo bar".into(), "BAR baz".into(), "no match".into()]);
    assert_eq!(v.search("bar"), 2);
    v
}

#[test]
fn scenario_c_search_records() {
    let v = scenario_c();
    let got: Vec<_> = v
        .matches()
        .iter()
        .map(|m| (m.line_index, m.start_col, m.end_col, m.matched_text.as_str()))
        .collect();
    assert_eq!(got, vec![(0, 4, 7, "bar"), (1, 0, 3, "BAR")]);
    assert_eq!(v.current_match_index(), Some(0));
    assert_eq!(
        v.match_info(),
        Some(MatchInfo {
            current: 1,
            total: 2
        })
    );
}

#[test]
fn scenario_c_current_match_is_rendered_distinctly() {
    let v = scenario_c();
    let block = v.surface().last_block().unwrap();
    let kinds: Vec<SpanKind> = block
        .lines
        .iter()
        .flat_map(|l| l.spans.iter().map(|s| s.kind))
        .filter(|k| *k != SpanKind::Plain)
        .collect();
    assert_eq!(kinds, vec![SpanKind::CurrentMatch, SpanKind::Match]);
}

#[test]
fn scenario_d_next_wraps() {
    let mut v = scenario_c();
    assert_eq!(v.next_match(), Some(1));
    assert_eq!(v.current_match_index(), Some(1));
    assert_eq!(v.surface().last_block().unwrap().current_match_line(), Some(1));
    assert_eq!(v.next_match(), Some(0));
    assert_eq!(v.current_match_index(), Some(0));
}

#[test]
fn scenario_e_empty_query_clears() {
    let mut v = scenario_c();
    assert_eq!(v.search(""), 0);
    assert_eq!(v.current_match_index(), None);
    assert_eq!(v.match_info(), None);
    assert_eq!(v.surface().last_block().unwrap().highlight_count(), 0);
    assert_eq!(v.next_match(), None);
    assert_eq!(v.prev_match(), None);
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn next_k_times_returns_to_start_and_prev_wraps() {
    let mut v = viewer_with(ViewerConfig::default().with_activation_threshold(100));
    v.set_lines((0..1_000).map(|i| format!("row {i} needle")).collect());
    assert_eq!(v.mode(), RenderMode::Windowed);
    let k = v.search("NEEDLE");
    assert_eq!(k, 1_000);
    for _ in 0..k {
        v.next_match();
    }
    assert_eq!(v.current_match_index(), Some(0));
    assert_eq!(v.prev_match(), Some(k - 1));
    assert_eq!(
        v.match_info(),
        Some(MatchInfo {
            current: k,
            total: k
        })
    );
}

#[test]
fn navigating_to_far_match_moves_window() {
    let mut v = viewer();
    let mut lines = repeated("filler", 50_000);
    lines[42_000] = "the needle".into();
    lines[7] = "needle first".into();
    v.set_lines(lines);
    assert_eq!(v.search("needle"), 2);
    assert!(v.window().unwrap().contains(7));

    assert_eq!(v.next_match(), Some(1));
    let window = v.window().unwrap();
    assert!(window.contains(42_000), "window {window:?} misses the match");
    let block = v.surface().last_block().unwrap();
    assert_eq!(block.current_match_line(), Some(42_000));
    assert_eq!(v.surface().scroll_offset, 42_000.0 * 18.0 - 270.0);

    assert_eq!(v.prev_match(), Some(0));
    assert_eq!(v.surface().scroll_offset, 0.0);
    assert!(v.window().unwrap().contains(7));
}

#[test]
fn greek_search_ignores_sigma_form() {
    let mut v = viewer();
    v.set_lines(vec![
        "\"city\": \"ΟΔΟΣ ΑΘΗΝΑΣ\"".into(),
        "\"street\": \"οδος\"".into(),
    ]);
    assert_eq!(v.search("οδος"), 2);
    assert_eq!(v.search("ΟΔΟΣ"), 2);
    let found: Vec<_> = v.matches().iter().map(|m| m.matched_text.as_str()).collect();
    assert_eq!(found, vec!["ΟΔΟΣ", "οδος"]);
    assert_eq!(v.search("αθηνας"), 1);
}

#[test]
fn search_does_not_scroll() {
    let mut v = viewer();
    let mut lines = repeated("filler", 50_000);
    lines[30_000] = "needle".into();
    v.set_lines(lines);
    v.search("needle");
    assert_eq!(v.surface().scroll_offset, 0.0);
    assert_eq!(v.surface().last_block().unwrap().highlight_count(), 0);
}

// =============================================================================
// Full text
// =============================================================================

#[test]
fn full_text_round_trips_in_both_modes() {
    let small = "{\n  \"a\": 1\n}";
    let mut v = viewer();
    v.set_text(small);
    assert_eq!(v.mode(), RenderMode::Direct);
    assert_eq!(v.full_text(), small);

    let large: String = (0..8_000)
        .map(|i| format!("  \"k{i}\": {i},"))
        .collect::<Vec<_>>()
        .join("\n");
    v.set_text(&large);
    assert_eq!(v.mode(), RenderMode::Windowed);
    assert_eq!(v.full_text(), large);
}

#[test]
fn empty_text_renders_empty_surface() {
    let mut v = viewer();
    v.set_text("");
    assert_eq!(v.total_lines(), 0);
    assert!(v.surface().last_block().unwrap().is_empty());
    assert_eq!(v.full_text(), "");
    assert_eq!(v.search("x"), 0);
}

// =============================================================================
// Frame coalescing and teardown
// =============================================================================

#[test]
fn scroll_storm_renders_once_per_frame() {
    let mut v = viewer();
    v.set_lines(repeated("x", 100_000));
    let renders = v.surface().render_count();

    for frame in 1..=50u32 {
        for step in 0..10u32 {
            v.surface_mut().scroll_offset = f64::from(frame * 1_000 + step * 3);
            v.on_scroll();
        }
        assert_eq!(v.surface().pending_frames.len(), 1);
        let token = v.surface_mut().fire_frame().unwrap();
        v.on_frame(token);
    }

    assert_eq!(v.surface().render_count(), renders + 50);
    assert_eq!(v.stats().frames_requested, 50);
    assert_eq!(v.stats().coalesced_notifications, 500);
}

#[test]
fn resize_recomputes_visible_count() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    v.surface_mut().viewport_height = 1_080.0;
    v.on_resize();
    let token = v.surface_mut().fire_frame().unwrap();
    assert_eq!(v.on_frame(token), Some(LineRange::new(0, 120)));
}

#[test]
fn destroy_releases_surface() {
    let mut v = viewer();
    v.set_lines(repeated("x", 6_000));
    v.on_scroll();
    v.destroy();
    assert!(!v.surface().subscribed);
    assert!(v.surface().pending_frames.is_empty());
    assert_eq!(v.surface().cancelled_frames.len(), 1);
}
