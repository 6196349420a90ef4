use arboard::Clipboard;
use astar_grid::config::DEFAULT_CONFIG_PATH;
use astar_grid::search::format_path;
use astar_grid::{solve, App, BoardLayout, CellTag, Config, Grid, InputFrame, SearchState};
use macroquad::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width,
        window_height: config.window.height,
        ..Default::default()
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Run the search on a layout file without animating and print the result
fn solve_file(path: &str, config: &Config) -> astar_grid::Result<()> {
    let text = fs::read_to_string(path)?;
    let mut grid = Grid::from_layout_text(&text)?;
    let max_steps = (grid.size() * grid.size()) as usize + 1;
    let state = solve(&mut grid, max_steps);

    println!("{}", grid.to_layout_text());
    match state {
        SearchState::PathFound => {
            println!("Path: {}", format_path(&grid.path()));
            println!(
                "Cost: {}, expansions: {}",
                grid.path_cost().unwrap_or(0),
                grid.steps()
            );
        }
        _ => println!("No path ({} expansions)", grid.steps()),
    }
    if grid.size() != config.grid.size {
        info!(layout = grid.size(), configured = config.grid.size, "layout size differs from configuration");
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) -> astar_grid::Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    // Keep clipboard alive for a moment so clipboard managers can capture it
    std::thread::sleep(std::time::Duration::from_millis(100));
    Ok(())
}

fn paste_from_clipboard() -> astar_grid::Result<String> {
    let mut clipboard = Clipboard::new()?;
    Ok(clipboard.get_text()?)
}

fn poll_input() -> InputFrame {
    InputFrame {
        toggle_placement: is_key_pressed(KeyCode::Enter),
        clear: is_key_pressed(KeyCode::C),
        edit: is_mouse_button_pressed(MouseButton::Left),
        save_layout: is_key_pressed(KeyCode::S),
        load_layout: is_key_pressed(KeyCode::L),
        pointer: mouse_position(),
    }
}

fn draw(app: &App, layout: &BoardLayout) {
    let config = &app.config;
    clear_background(rgb(config.visual.background));

    let grid = app.grid();
    let gap = if grid.is_placement() && config.visual.show_borders_in_placement {
        (layout.cell_size * 0.05).max(1.0)
    } else {
        0.0
    };

    for view in grid.cells() {
        let rect = layout.cell_rect(view.coord);
        let colour = rgb(config.palette.colour(view.tag));
        draw_rectangle(
            rect.x + gap / 2.0,
            rect.y + gap / 2.0,
            rect.w - gap,
            rect.h - gap,
            colour,
        );
    }

    if !config.visual.show_hud {
        return;
    }

    let status = match grid.state() {
        SearchState::Placement => "Placement",
        SearchState::Searching => "Searching",
        SearchState::PathFound => "Path found",
        SearchState::Unreachable => "No path",
    };
    let counts = grid.membership_counts();
    let path_cells = grid.cells().filter(|v| v.tag == CellTag::Path).count();
    let lines = [
        format!("{} | expansions: {}", status, grid.steps()),
        format!(
            "open: {}  closed: {}  blocked: {}  path: {}",
            counts.open, counts.closed, counts.blocked, path_cells
        ),
        "Enter: start/pause  Click: toggle wall  C: clear".to_string(),
        "Y/V: copy/paste layout  S/L: save/load  Esc: quit".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, DARKGRAY);
    }
}

fn main() {
    // Read before the subscriber exists so its filter comes from the file
    let path = Path::new(DEFAULT_CONFIG_PATH);
    let (config, read_error) = match Config::read(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.logging.filter);
    match read_error {
        None => info!(path = %path.display(), "configuration ready"),
        Some(e) => warn!(path = %path.display(), error = %e, "failed to read configuration, using defaults"),
    }

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 && args[1] == "--solve" {
        if let Err(e) = solve_file(&args[2], &config) {
            error!(path = %args[2], error = %e, "solve failed");
        }
        return;
    }

    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: Config) {
    let mut app = App::new(config);
    info!(size = app.grid().size(), "starting");

    loop {
        let layout = BoardLayout::fit(screen_width(), screen_height(), app.grid().size());

        let input = poll_input();
        app.handle_input(&input, &layout);

        if is_key_pressed(KeyCode::Y) {
            let text = app.copy_layout_text();
            match copy_to_clipboard(&text) {
                Ok(()) => info!("layout copied to clipboard"),
                Err(e) => warn!(error = %e, "failed to copy layout"),
            }
        }

        if is_key_pressed(KeyCode::V) {
            match paste_from_clipboard().and_then(|text| app.paste_layout_text(&text)) {
                Ok(true) => info!("layout pasted from clipboard"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "failed to paste layout"),
            }
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.update();
        draw(&app, &layout);

        next_frame().await
    }

    app.finish();
}
