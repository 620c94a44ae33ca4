//! End-to-end checks of the updater against the in-memory diagram

use wavelane_core::{
    FullRefreshReason, IncrementalSkip, Level, MemoryDiagram, RefreshPath, RenderSurface,
    UpdateError, UpdaterConfig, WaveJson, WaveLaneUpdater,
};

const PATTERN: [Level; 5] = [Level::High, Level::High, Level::Low, Level::Unknown, Level::Low];

/// Level of lane `lane` at simulation step `step`
fn level_at(lane: usize, step: usize) -> Level {
    PATTERN[(step * (lane + 1) + lane) % PATTERN.len()]
}

fn filled_diagram(lanes: usize, ticks: usize) -> MemoryDiagram {
    let names: Vec<String> = (0..lanes).map(|i| format!("s{}", i)).collect();
    let mut description = WaveJson::new(names);
    description.set_buffer_len(ticks);
    for step in 0..ticks {
        let values: Vec<Level> = (0..lanes).map(|lane| level_at(lane, step)).collect();
        description.push_values(&values).unwrap();
    }
    MemoryDiagram::new(description, &UpdaterConfig::default())
}

/// Render the current description from scratch for comparison
fn fresh_render(diagram: &MemoryDiagram) -> MemoryDiagram {
    let mut fresh = MemoryDiagram::new(diagram.description().clone(), &UpdaterConfig::default());
    fresh.full_redraw();
    fresh
}

#[test]
fn incremental_updates_match_full_refresh() {
    let lanes = 3;
    let buffer_len = 8;

    let mut diagram = filled_diagram(lanes, 0);
    diagram.description_mut().set_buffer_len(buffer_len);
    let mut updater = WaveLaneUpdater::default();
    let mut incremental = 0;

    for step in 0..40u64 {
        let was_full = diagram.description().num_ticks() >= buffer_len;
        let values: Vec<Level> = (0..lanes).map(|lane| level_at(lane, step as usize)).collect();
        diagram.description_mut().push_values(&values).unwrap();

        // Host loop: force full refreshes until the diagram stops growing
        let tick = if was_full { step } else { 0 };
        let last_values = diagram.description().last_values();
        let report = updater.update(&mut diagram, Some(last_values.as_str()), tick);

        assert!(!report.has_diagnostics(), "step {}: {:?}", step, report.diagnostics);
        if report.is_incremental() {
            incremental += 1;
            assert_eq!(report.lanes_shifted, lanes);
            assert_eq!(report.lanes_appended, lanes);
            assert_eq!(diagram.visible_markers(), 0);
        } else {
            assert_eq!(diagram.visible_markers(), diagram.description().num_ticks());
        }

        let drift = diagram.drift(&fresh_render(&diagram));
        assert!(drift.is_empty(), "step {}: drift at {:?}", step, drift);
        assert!(diagram.viewport().is_at_end());
    }

    // Steps 0..=7 grow the buffer, step 8 is the first non-contiguous full tick
    assert_eq!(incremental, 40 - 9);
    assert_eq!(diagram.full_redraws(), 9);
}

#[test]
fn one_step_scrolls_exactly_one_tick() {
    let mut description = WaveJson::new(["a"]);
    description.set_buffer_len(3);
    for level in [Level::High, Level::Low, Level::High] {
        description.push_values(&[level]).unwrap();
    }
    let mut diagram = MemoryDiagram::new(description, &UpdaterConfig::default());
    let mut updater = WaveLaneUpdater::default();
    updater.refresh(&mut diagram);

    diagram.description_mut().push_values(&[Level::Low]).unwrap();
    let last_values = diagram.description().last_values();
    let report = updater.update(&mut diagram, Some(last_values.as_str()), 1);

    assert!(report.is_incremental());
    assert_eq!(
        diagram.lane_symbols(0).unwrap(),
        ["#nclk", "#000", "#pclk", "#111", "#nclk", "#000"]
    );
    assert!(diagram.drift(&fresh_render(&diagram)).is_empty());
}

#[test]
fn two_lane_scenario() {
    let mut diagram = filled_diagram(2, 5);
    let mut updater = WaveLaneUpdater::default();

    // Jumping straight to tick 5 is a full refresh that records last_tick = 5
    let report = updater.update(&mut diagram, Some("h,h"), 5);
    assert_eq!(
        report.path,
        RefreshPath::FullRefresh(FullRefreshReason::NonContiguous { last_tick: 0 })
    );
    assert_eq!(updater.last_tick(), 5);

    let before: Vec<Vec<String>> = (0..2)
        .map(|lane| diagram.lane_symbols(lane).unwrap().to_vec())
        .collect();

    let report = updater.update(&mut diagram, Some("l,."), 6);
    assert!(report.is_incremental());
    assert_eq!(updater.last_tick(), 6);

    for (lane, old) in before.iter().enumerate() {
        let now = diagram.lane_symbols(lane).unwrap();
        assert_eq!(&now[..8], &old[2..10], "lane {} not shifted", lane);
    }

    let lane0 = diagram.lane_symbols(0).unwrap();
    assert_eq!(&lane0[8..], ["#nclk", "#000"]);

    let lane1 = diagram.lane_symbols(1).unwrap();
    assert_eq!(lane1[8], before[1][9]);
    assert_eq!(lane1[9], before[1][9]);

    assert!(diagram.viewport().is_at_end());
    assert_eq!(diagram.visible_markers(), 0);
}

#[test]
fn unsupported_value_does_not_stop_other_lanes() {
    let mut diagram = filled_diagram(3, 4);
    let mut updater = WaveLaneUpdater::default();
    updater.refresh(&mut diagram);

    let report = updater.update(&mut diagram, Some("h,Z,X"), 1);

    assert!(report.is_incremental());
    assert_eq!(report.lanes_appended, 2);
    assert!(matches!(
        report.diagnostics.as_slice(),
        [UpdateError::UnsupportedValue { lane: 1, .. }]
    ));
    assert_eq!(&diagram.lane_symbols(0).unwrap()[6..], ["#pclk", "#111"]);
    assert_eq!(&diagram.lane_symbols(2).unwrap()[6..], ["#xxx", "#xxx"]);
}

#[test]
fn incremental_before_first_render_is_a_no_op() {
    let mut diagram = filled_diagram(2, 4);
    let mut updater = WaveLaneUpdater::default();

    let report = updater.update(&mut diagram, Some("h,l"), 1);

    assert_eq!(report.skipped, Some(IncrementalSkip::MissingReferenceLane));
    assert_eq!(diagram.full_redraws(), 0);
    assert_eq!(diagram.lane_count(), 0);
    assert_eq!(updater.last_tick(), 1);
}

#[test]
fn repeated_full_refresh_is_stable() {
    let mut diagram = filled_diagram(3, 6);
    let mut updater = WaveLaneUpdater::default();

    updater.refresh(&mut diagram);
    let first = diagram.render_text();
    updater.refresh(&mut diagram);

    assert_eq!(diagram.render_text(), first);
    assert!(diagram.drift(&fresh_render(&diagram)).is_empty());
    assert_eq!(diagram.full_redraws(), 2);
}
