use physics_scene::{
    NodeStore, SceneApp,
    scene::{demo, TracingAudio},
};
use std::io::{stdout, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};
use crossterm::{
    ExecutableCommand, QueueableCommand,
    terminal::{Clear, ClearType},
    cursor::{Hide, Show, MoveTo},
    style::{Color, Print, SetForegroundColor, ResetColor},
};

const FRAME_DURATION: Duration = Duration::from_millis(33); // ~30 FPS
const SIMULATION_DURATION: f32 = 15.0; // seconds
const CLICK_INTERVAL: f32 = 2.0; // seconds between automatic clicks on the cube
const ARENA_HALF_SIZE: f32 = 5.5;

// Terminal size detection
fn get_terminal_size() -> (u16, u16) {
    match term_size::dimensions() {
        Some((w, h)) => (w as u16, h as u16),
        None => (80, 24),
    }
}

fn glyph(name: &str) -> (char, Color) {
    match name {
        "ball" => ('O', Color::Yellow),
        "cube" => ('#', Color::Magenta),
        "twister" => ('%', Color::Red),
        "hamburger" => ('H', Color::DarkYellow),
        _ => ('▪', Color::Red),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they do not tear the drawing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut app = SceneApp::new(&demo::experience(), NodeStore::new(), &mut demo::asset_library(), TracingAudio)?;
    let cube = app.require_node("cube")?;

    let mut stdout = stdout();
    stdout.execute(Hide)?;

    let (width, height) = get_terminal_size();
    // Top-down view: x across, z down, the arena fills the shorter side
    let rows = height.saturating_sub(2).max(8);
    let cols = (rows * 2).min(width.saturating_sub(1)).max(16);

    let start_time = Instant::now();
    let mut last_update_time = Instant::now();
    let mut last_click = 0.0;
    let mut cues = 0;

    while start_time.elapsed().as_secs_f32() < SIMULATION_DURATION {
        let frame_time = Instant::now();
        let dt = last_update_time.elapsed().as_secs_f32();
        last_update_time = Instant::now();

        let elapsed = start_time.elapsed().as_secs_f32();
        if elapsed - last_click > CLICK_INTERVAL {
            app.click(cube)?;
            last_click = elapsed;
        }

        let report = app.tick(dt)?;
        cues += report.cues;

        stdout.queue(Clear(ClearType::All))?;
        draw_arena(&mut stdout, cols, rows)?;

        for (_, node) in app.graph().iter().filter(|(_, node)| !node.wireframe) {
            if node.name == "floor" {
                continue;
            }
            let p = node.transform.position;
            let u = (p.x + ARENA_HALF_SIZE) / (2.0 * ARENA_HALF_SIZE);
            let v = (p.z + ARENA_HALF_SIZE) / (2.0 * ARENA_HALF_SIZE);
            if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                continue;
            }

            let screen_x = 1 + (u * (cols - 2) as f32) as u16;
            let screen_y = 1 + (v * (rows - 2) as f32) as u16;
            let (character, color) = glyph(&node.name);
            stdout.queue(MoveTo(screen_x, screen_y))?
                  .queue(SetForegroundColor(color))?
                  .queue(Print(character))?
                  .queue(ResetColor)?;
        }

        let fps = app.perf().last().map(|s| s.fps()).unwrap_or(0.0);
        stdout.queue(MoveTo(0, rows))?
              .queue(Print(format!(
                  "t={:5.2}s  fps={:5.1}  contacts={}  cues={}",
                  app.world().time(),
                  fps,
                  report.contacts_started,
                  cues,
              )))?;
        stdout.flush()?;

        // Timing control
        let elapsed = frame_time.elapsed();
        if elapsed < FRAME_DURATION {
            sleep(FRAME_DURATION - elapsed);
        }
    }

    // Clean up
    stdout.execute(Show)?;
    stdout.execute(MoveTo(0, rows + 1))?;

    Ok(())
}

fn draw_arena(stdout: &mut std::io::Stdout, cols: u16, rows: u16) -> Result<(), std::io::Error> {
    stdout.queue(SetForegroundColor(Color::Green))?;
    for x in 0..cols {
        stdout.queue(MoveTo(x, 0))?.queue(Print("▬"))?;
        stdout.queue(MoveTo(x, rows - 1))?.queue(Print("▬"))?;
    }
    for y in 1..rows - 1 {
        stdout.queue(MoveTo(0, y))?.queue(Print("▮"))?;
        stdout.queue(MoveTo(cols - 1, y))?.queue(Print("▮"))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
