use std::path::Path;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use renderer::{
    DotGrid, DotGridConfig, FrameLoop, Pixelate, PixelateConfig, PointerState,
    PointerTransition, Rgb, Shell, Surface, TextLayout, Tick, FALLBACK_DOT, FALLBACK_GLOW,
};
use sequencer::{Rotation, SectionId};
use siteconfig::{Palette, SiteConfig, ThemeName, ThemeState, ThemeSwitcher};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::compose;
use crate::paths::AppPaths;

/// Seed used when the caller does not supply one; keeps repeated runs
/// looking identical, which makes visual regressions easy to spot.
const DEFAULT_SEED: u64 = 0xb1ff;

/// Fraction of the window height above the hero band.
const HERO_TOP_FRACTION: f32 = 0.22;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Everything that has to be rebuilt when the theme changes.
struct Visuals {
    background: Rgb,
    card: Rgb,
    grid: DotGrid,
    hero: TextLayout,
}

fn build_visuals(
    config: &SiteConfig,
    theme: ThemeName,
    section: &str,
    width: u32,
    height: u32,
    seed: u64,
) -> Visuals {
    let palette = Palette::for_theme(theme);
    let dot_hex = config.dots.color.as_deref().unwrap_or(palette.dot);
    let glow_hex = config.dots.glow.as_deref().unwrap_or(palette.glow);
    let grid_config = DotGridConfig {
        dot_color: Rgb::from_hex_or(dot_hex, FALLBACK_DOT),
        glow_color: Rgb::from_hex_or(glow_hex, FALLBACK_GLOW),
        dot_radius: config.dots.radius,
        spacing: config.dots.spacing,
    };
    let colors = compose::hero_colors(&palette);
    Visuals {
        background: Rgb::from_hex_or(palette.background, Rgb::new(0x0f, 0x11, 0x17)),
        card: Rgb::from_hex_or(palette.surface, Rgb::new(0x16, 0x1a, 0x22)),
        grid: DotGrid::new(grid_config, width, height, seed),
        hero: compose::hero_layout(section, &colors),
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| paths.config_file());
    let config = SiteConfig::load_or_default(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    let state_path = paths.theme_state_file();
    let initial_theme = resolve_initial_theme(&args, &config, &state_path)?;
    let mut switcher = ThemeSwitcher::new(initial_theme);

    let (width, height) = args.size.unwrap_or((config.width, config.height));
    let fps = match args.fps {
        Some(fps) if fps > 0.0 => Some(fps),
        Some(_) => None,
        None => config.effective_fps(),
    };
    let seed = args.seed.unwrap_or(DEFAULT_SEED);

    tracing::debug!(
        config = %config_path.display(),
        state = %state_path.display(),
        theme = %switcher.current(),
        width,
        height,
        ?fps,
        "resolved vitrine startup"
    );

    let now = Instant::now();
    let sections: Vec<SectionId> = content::section_ids()
        .into_iter()
        .map(SectionId::new)
        .collect();
    let mut rotation = if args.no_rotate {
        None
    } else {
        Some(
            Rotation::new(sections, &config.rotation, seed, now)
                .context("building section rotation")?,
        )
    };
    let mut section = rotation
        .as_ref()
        .map(|r| r.current().0.clone())
        .unwrap_or_else(|| "experience".to_string());

    let mut visuals = build_visuals(&config, switcher.current(), &section, width, height, seed);

    // Hero band spans the full width so centered spans resolve against it.
    let hero_y = (height as f32 * HERO_TOP_FRACTION) as i32;
    let hero_height = (height as usize).saturating_sub(hero_y as usize);
    let mut pixelate = Pixelate::new(PixelateConfig::default(), width as usize, hero_height);
    pixelate.set_layout(&visuals.hero);

    let mut shell = Shell::new("Vitrine", width as usize, height as usize)
        .context("failed to create the deck window")?;
    let mut surface = Surface::new(width as usize, height as usize);
    let mut pointer = PointerState::default();
    let mut frame_loop = FrameLoop::new(fps);
    let stop = frame_loop.handle();

    while shell.is_open() && !shell.escape_pressed() {
        let now = Instant::now();
        match frame_loop.tick(now) {
            Tick::Stopped => break,
            Tick::Continue(sleep) => {
                if !sleep.is_zero() {
                    thread::sleep(sleep);
                }
            }
        }

        if shell.theme_toggle_pressed() {
            if let Some(new_theme) = switcher.begin_toggle() {
                visuals = build_visuals(&config, new_theme, &section, width, height, seed);
                pixelate.set_layout(&visuals.hero);
                ThemeState { theme: new_theme }
                    .persist(&state_path)
                    .with_context(|| format!("persisting theme to {}", state_path.display()))?;
                tracing::info!(theme = %new_theme, "theme switched");
                // This renderer swaps palettes within a single frame.
                switcher.complete_toggle();
            }
        }

        if let Some(rotation) = rotation.as_mut() {
            let change = if shell.skip_pressed() {
                rotation.skip(now)
            } else {
                rotation.tick(now)
            };
            if let Some(change) = change {
                section = change.section.0;
                let colors = compose::hero_colors(&Palette::for_theme(switcher.current()));
                visuals.hero = compose::hero_layout(&section, &colors);
                pixelate.set_layout(&visuals.hero);
            }
        }

        // Pointer in hero-band coordinates; None once it leaves the band.
        let sample = shell.pointer().and_then(|(x, y)| {
            let local_y = y - hero_y as f32;
            (local_y >= 0.0).then_some((x, local_y))
        });
        match pointer.update(sample) {
            PointerTransition::Entered => tracing::trace!("pointer entered hero band"),
            PointerTransition::Left => tracing::trace!("pointer left hero band"),
            PointerTransition::None => {}
        }
        pixelate.update_pointer(pointer.position());

        surface.clear(visuals.background);
        visuals.grid.advance_and_paint(&mut surface);
        surface.fill_rect(0, hero_y, width, hero_height as u32, visuals.card, 0.35);
        compose::offset_layout(&visuals.hero, hero_y).paint(&mut surface);
        pixelate.frame();
        pixelate.composite(&mut surface, 0, hero_y);

        shell.present(&surface).context("presenting frame")?;
    }

    // Cancel synchronously so nothing runs against the dropped window.
    stop.stop();
    Ok(())
}

/// CLI override beats the persisted choice; the persisted choice beats the
/// config default. Read before the first frame so the deck never flashes
/// the wrong theme.
fn resolve_initial_theme(
    args: &RunArgs,
    config: &SiteConfig,
    state_path: &Path,
) -> Result<ThemeName> {
    if let Some(theme) = args.theme {
        return Ok(theme);
    }
    if state_path.exists() {
        let state = ThemeState::load_or_default(state_path)
            .with_context(|| format!("loading theme state from {}", state_path.display()))?;
        return Ok(state.theme);
    }
    Ok(config.theme.unwrap_or(ThemeName::Dark))
}
