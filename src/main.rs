use std::io::{self, Write, stdout};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, MouseButton, MouseEventKind},
    execute, queue, terminal,
};
use rand::{Rng as _, SeedableRng};
use rand_pcg::Pcg32;

use swoop::audio::Audio;
use swoop::engine::{Phase, RunState, TickContext, Viewport, tick};
use swoop::render::{self, Canvas, Rgb};
use swoop::tuning::{REFERENCE_VIEWPORT_H, Tuning};

const TUNING_FILE: &str = "swoop.json";
const LOG_FILE: &str = "swoop.log";
const PANEL_BG: Rgb = Rgb(38, 42, 50);

// ── Setup ───────────────────────────────────────────────────────────────────

/// Route log output to a side file; stderr would tear up the raw-mode screen.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match std::fs::File::create(LOG_FILE) {
        Ok(file) => {
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(_) => env_logger::init(),
    }
}

fn now_ms(start: &Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    init_logging();

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let (mut cols, rows) = terminal::size()?;
    let mut pw = cols as usize;
    let mut ph = rows as usize * 2;
    let mut vp = Viewport::new(pw as f64, ph as f64);
    if !vp.is_valid() {
        cleanup(&mut out)?;
        eprintln!(
            "terminal too small: need at least {}x{} cells",
            Viewport::MIN_WIDTH as usize,
            Viewport::MIN_HEIGHT as usize / 2,
        );
        return Ok(());
    }

    // `live` holds reference-space values the tuning keys adjust; `eff` is
    // the same set rescaled to this terminal's pixel space.
    let mut live = Tuning::load(Path::new(TUNING_FILE));
    let mut k = ph as f64 / REFERENCE_VIEWPORT_H;
    let mut eff = live.scaled(k);

    let mut canvas = Canvas::new(pw, ph);
    let audio = Audio::open();
    let mut rng = Pcg32::seed_from_u64(rand::rng().random());

    let start = Instant::now();
    let mut state = RunState::new(&vp, 0, &eff, &mut rng);

    let mut best: u32 = 0;
    let mut show_hud = false;
    let mut frame: u64 = 0;

    // Refresh rate: assume 60 until the 1-second startup window closes.
    let mut refresh_fps = 60.0;
    let mut sampled_frames: u32 = 0;
    let mut sampling = true;

    let frame_dur = Duration::from_micros(16_667); // ~60 fps

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        cleanup(&mut out)?;
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        if state.phase == Phase::Over {
                            tick::restart(&mut state, &vp, now_ms(&start), &eff, &mut rng);
                        } else {
                            tick::flap(&mut state, &eff, refresh_fps);
                            audio.flap();
                        }
                    }
                    KeyCode::Char('r') => {
                        tick::restart(&mut state, &vp, now_ms(&start), &eff, &mut rng);
                    }
                    // Tuning: a/z = gravity, s/x = flap, d/c = speed
                    KeyCode::Char('a') => {
                        live.gravity += 0.02;
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    KeyCode::Char('z') => {
                        live.gravity = (live.gravity - 0.02).max(0.05);
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    KeyCode::Char('s') => {
                        live.flap_impulse -= 0.2;
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    KeyCode::Char('x') => {
                        live.flap_impulse = (live.flap_impulse + 0.2).min(-0.5);
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    KeyCode::Char('d') => {
                        live.scroll_speed += 0.1;
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    KeyCode::Char('c') => {
                        live.scroll_speed = (live.scroll_speed - 0.1).max(0.2);
                        show_hud = true;
                        eff = live.scaled(k);
                    }
                    _ => {}
                },
                Event::Mouse(mouse)
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
                {
                    if state.phase == Phase::Over {
                        tick::restart(&mut state, &vp, now_ms(&start), &eff, &mut rng);
                    } else {
                        tick::flap(&mut state, &eff, refresh_fps);
                        audio.flap();
                    }
                }
                Event::Resize(c, r) => {
                    cols = c;
                    pw = c as usize;
                    ph = r as usize * 2;
                    vp = Viewport::new(pw as f64, ph as f64);
                    canvas.resize(pw, ph);
                    if vp.is_valid() {
                        // Obstacle geometry is viewport-relative; restart.
                        k = ph as f64 / REFERENCE_VIEWPORT_H;
                        eff = live.scaled(k);
                        state = RunState::new(&vp, now_ms(&start), &eff, &mut rng);
                    }
                }
                _ => {}
            }
        }

        let rows_term = (ph / 2) as u16;
        if !vp.is_valid() {
            queue!(out, terminal::Clear(terminal::ClearType::All))?;
            render::center_text(
                &mut out,
                cols,
                rows_term / 2,
                " terminal too small ",
                render::WHITE,
                Some(PANEL_BG),
            )?;
            out.flush()?;
            thread::sleep(frame_dur);
            continue;
        }

        // Update
        let was_running = state.phase == Phase::Running;
        let prev_score = state.score;
        let ctx = TickContext {
            viewport: vp,
            now_ms: now_ms(&start),
            refresh_fps,
        };
        tick::update(&mut state, &ctx, &eff, &mut rng);

        if state.score > prev_score {
            audio.score();
        }
        if was_running && state.phase == Phase::Over {
            best = best.max(state.score);
            audio.game_over();
        }

        // Render
        render::draw_frame(&mut canvas, &state, &vp, &eff, frame);
        if show_hud {
            let x = pw as i32 - 10;
            let y = ph as i32 - 10;
            render::draw_number(&mut canvas, x, y - 14, (live.gravity * 100.0) as u32, render::HUD_GRAVITY);
            render::draw_number(&mut canvas, x, y - 7, (-live.flap_impulse * 10.0) as u32, render::HUD_FLAP);
            render::draw_number(&mut canvas, x, y, (live.scroll_speed * 10.0) as u32, render::HUD_SPEED);
        }
        if state.phase == Phase::Over {
            canvas.dim(0.45);
        }
        canvas.blit(&mut out)?;

        match state.phase {
            Phase::NotStarted => {
                render::center_text(
                    &mut out,
                    cols,
                    rows_term / 4,
                    "  S W O O P  ",
                    render::WHITE,
                    Some(PANEL_BG),
                )?;
                render::center_text(
                    &mut out,
                    cols,
                    rows_term / 4 + 2,
                    " space or click to flap ",
                    render::WHITE,
                    None,
                )?;
            }
            Phase::Over => {
                render::center_text(
                    &mut out,
                    cols,
                    rows_term / 2 - 1,
                    "  GAME OVER  ",
                    render::WHITE,
                    Some(PANEL_BG),
                )?;
                render::center_text(
                    &mut out,
                    cols,
                    rows_term / 2,
                    &format!("  score {}   best {}  ", state.score, best),
                    render::WHITE,
                    Some(PANEL_BG),
                )?;
                render::center_text(
                    &mut out,
                    cols,
                    rows_term / 2 + 1,
                    "  space to retry, q to quit  ",
                    render::WHITE,
                    Some(PANEL_BG),
                )?;
            }
            Phase::Running => {}
        }

        out.flush()?;

        frame += 1;
        if sampling {
            sampled_frames += 1;
            let elapsed = start.elapsed();
            if elapsed >= Duration::from_secs(1) {
                refresh_fps = f64::from(sampled_frames) / elapsed.as_secs_f64();
                sampling = false;
                log::info!("measured refresh rate: {refresh_fps:.1} fps");
            }
        }

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            thread::sleep(frame_dur - elapsed);
        }
    }
}
