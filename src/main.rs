//! Shotzones - NBA shot-location hot-zone dashboard built with Bevy
//!
//! Main entry point: data loading, app setup and the court view.

use bevy::{camera::ScalingMode, prelude::*};

use shotzones::constants::*;
use shotzones::{
    DashboardSettings, PlaybackState, SETTINGS_FILE, SeasonDataset, SeasonTimeline, SeasonView,
    add_timeline_systems, dashboard_resources, load_shots,
};

/// World units per court foot
const WORLD_SCALE: f32 = 12.0;
/// Visible world height (court plus title band)
const VIEW_HEIGHT: f32 = 720.0;
const LINE_THICKNESS: f32 = 2.0;
const SHOT_SIZE: f32 = 4.0;
const LAYUP_DOTS: usize = 48;

const BACKGROUND: Color = Color::srgb(0.12, 0.12, 0.14);
const COURT_LINE: Color = Color::srgb(0.75, 0.75, 0.75);
const LAYUP_LINE: Color = Color::srgb(0.45, 0.45, 0.85);
const TWO_PT_COLOR: Color = Color::srgb(0.30, 0.60, 1.00);
const THREE_PT_COLOR: Color = Color::srgb(1.00, 0.55, 0.15);
const ZONE_COLOR: Color = Color::srgba(1.00, 0.20, 0.20, 0.35);
const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
const TEXT_ACCENT: Color = Color::srgb(0.70, 0.70, 0.70);

/// Static court lines
#[derive(Component)]
struct CourtMarking;

/// Per-season entities, despawned on every refresh
#[derive(Component)]
struct SeasonMarker;

#[derive(Component)]
struct TitleText;

#[derive(Component)]
struct StatusText;

/// Plot-space feet to world coordinates
fn to_world(x: f64, y: f64) -> Vec2 {
    Vec2::new(x as f32 * WORLD_SCALE, y as f32 * WORLD_SCALE)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut settings = DashboardSettings::load();

    // Save settings on first run to ensure file exists
    if !std::path::Path::new(SETTINGS_FILE).exists()
        && let Err(e) = settings.save()
    {
        warn!("Failed to save initial settings: {}", e);
    }

    if let Err(e) = settings.apply_args(&args) {
        eprintln!("{}", e);
        eprintln!("Usage: shotzones [--shots PATH] [--season LABEL]");
        std::process::exit(2);
    }

    let loaded = match load_shots(&settings.shots_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let initial_season = Some(settings.initial_season.as_str()).filter(|s| !s.is_empty());
    let (dataset, timeline) = dashboard_resources(
        &loaded.records,
        &settings.dataset_options(),
        settings.play_step_secs,
        initial_season,
    );
    drop(loaded);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            resolution: bevy::window::WindowResolution::new(900, 760)
                .with_scale_factor_override(1.0),
            title: "Shotzones".into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(BACKGROUND))
    .insert_resource(dataset)
    .insert_resource(timeline)
    .add_systems(Startup, setup);

    add_timeline_systems(&mut app, true);

    app.add_systems(
        Update,
        (draw_season, update_title_text, update_status_text)
            .after(shotzones::refresh_season_view),
    )
    .run();
}

fn setup(mut commands: Commands, dataset: Res<SeasonDataset>) {
    // Camera - orthographic, whole half court plus title band
    let court_center = to_world(0.0, COURT_LENGTH / 2.0);
    commands.spawn((
        Camera2d,
        Transform::from_xyz(court_center.x, court_center.y + 40.0, 0.0),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    spawn_court_lines(&mut commands);

    let top = to_world(0.0, COURT_LENGTH).y;
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(TEXT_PRIMARY),
        Transform::from_xyz(0.0, top + 50.0, 1.0),
        TitleText,
    ));

    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(TEXT_ACCENT),
        Transform::from_xyz(0.0, top + 20.0, 1.0),
        StatusText,
    ));

    if dataset.is_empty() {
        warn!("No seasons to show");
    }
}

fn line_sprite(commands: &mut Commands, from: Vec2, to: Vec2, color: Color) {
    let size = Vec2::new(
        (to.x - from.x).abs().max(LINE_THICKNESS),
        (to.y - from.y).abs().max(LINE_THICKNESS),
    );
    let center = (from + to) / 2.0;
    commands.spawn((
        Sprite::from_color(color, size),
        Transform::from_xyz(center.x, center.y, 0.0),
        CourtMarking,
    ));
}

fn spawn_court_lines(commands: &mut Commands) {
    let bl = to_world(-COURT_HALF_WIDTH, 0.0);
    let br = to_world(COURT_HALF_WIDTH, 0.0);
    let tl = to_world(-COURT_HALF_WIDTH, COURT_LENGTH);
    let tr = to_world(COURT_HALF_WIDTH, COURT_LENGTH);

    line_sprite(commands, bl, br, COURT_LINE);
    line_sprite(commands, tl, tr, COURT_LINE);
    line_sprite(commands, bl, tl, COURT_LINE);
    line_sprite(commands, br, tr, COURT_LINE);

    // Layup exclusion circle, dotted
    for i in 0..LAYUP_DOTS {
        let angle = i as f64 / LAYUP_DOTS as f64 * std::f64::consts::TAU;
        let pos = to_world(
            LAYUP_CENTER.0 + LAYUP_RADIUS * angle.cos(),
            LAYUP_CENTER.1 + LAYUP_RADIUS * angle.sin(),
        );
        commands.spawn((
            Sprite::from_color(LAYUP_LINE, Vec2::splat(LINE_THICKNESS)),
            Transform::from_xyz(pos.x, pos.y, 0.0),
            CourtMarking,
        ));
    }
}

/// Replace the season's shots and hot zones whenever the view changes
fn draw_season(
    mut commands: Commands,
    view: Res<SeasonView>,
    existing: Query<Entity, With<SeasonMarker>>,
) {
    if !view.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    let Some(frame) = &view.frame else {
        return;
    };

    for zone in &frame.hot_zones {
        let min = to_world(zone.x_min, zone.y_min);
        let max = to_world(zone.x_max, zone.y_max);
        let center = (min + max) / 2.0;
        commands.spawn((
            Sprite::from_color(ZONE_COLOR, max - min),
            Transform::from_xyz(center.x, center.y, 0.5),
            SeasonMarker,
        ));
    }

    for (points, color) in [
        (&frame.two_pt_points, TWO_PT_COLOR),
        (&frame.three_pt_points, THREE_PT_COLOR),
    ] {
        for point in points {
            let pos = to_world(point.x, point.y);
            commands.spawn((
                Sprite::from_color(color, Vec2::splat(SHOT_SIZE)),
                Transform::from_xyz(pos.x, pos.y, 0.8),
                SeasonMarker,
            ));
        }
    }
}

fn update_title_text(view: Res<SeasonView>, mut text_query: Query<&mut Text2d, With<TitleText>>) {
    if !view.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = match &view.frame {
        Some(frame) => frame.title.clone(),
        None => "No shot data".to_string(),
    };
}

fn update_status_text(
    timeline: Res<SeasonTimeline>,
    view: Res<SeasonView>,
    mut text_query: Query<&mut Text2d, With<StatusText>>,
) {
    if !timeline.is_changed() && !view.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let position = if timeline.is_empty() {
        "-".to_string()
    } else {
        format!("{}/{}", timeline.current_index() + 1, timeline.len())
    };
    let (two_pt, three_pt) = view
        .frame
        .as_ref()
        .map(|f| (f.two_pt_points.len(), f.three_pt_points.len()))
        .unwrap_or((0, 0));
    let action = match timeline.state() {
        PlaybackState::Playing => "SPACE: stop",
        _ => "SPACE: play",
    };
    text.0 = format!(
        "Season {} [{}] | 2PT {} 3PT {} | {} | Left/Right: scrub | Home/End: jump",
        position,
        timeline.state().label(),
        two_pt,
        three_pt,
        action
    );
}
