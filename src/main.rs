use std::env;
use std::io::{self, Stdout};
use std::process;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use amazeing::config::Config;
use amazeing::maze::Coord;
use amazeing::renderer::Renderer;
use amazeing::MazeApp;

const CONFIG_FILE: &str = "config.txt";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };
    let mut app = match MazeApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("invalid maze settings: {}", e);
            process::exit(1);
        }
    };
    app.save(&config.output_file)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut app, &config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, app: &mut MazeApp, config: &Config) -> io::Result<()> {
    let mut renderer = Renderer::new();
    let mut show_solution = false;
    redraw(stdout, &renderer, app, config, show_solution)?;

    loop {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('1') => {
                        app.regenerate(None);
                        app.save(&config.output_file)?;
                        redraw(stdout, &renderer, app, config, show_solution)?;
                    }
                    KeyCode::Char('2') => {
                        show_solution = !show_solution;
                        redraw(stdout, &renderer, app, config, show_solution)?;
                    }
                    KeyCode::Char('3') => {
                        renderer.rotate_colors();
                        redraw(stdout, &renderer, app, config, show_solution)?;
                    }
                    KeyCode::Char('4') | KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
            }
            Event::Resize(_, _) => redraw(stdout, &renderer, app, config, show_solution)?,
            _ => {}
        }
    }
}

fn redraw(
    stdout: &mut Stdout,
    renderer: &Renderer,
    app: &MazeApp,
    config: &Config,
    show_solution: bool,
) -> io::Result<()> {
    let status = format!("seed {}   saved to {}", app.seed(), config.output_file);
    let solution: &[Coord] = if show_solution { app.solution() } else { &[] };
    renderer.draw(stdout, app.maze(), solution, &status)
}
