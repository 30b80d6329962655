//! Terminal renderer: a pure projection of engine snapshots.
//!
//! Draws into an RGB pixel canvas at two pixels per terminal row (the upper
//! half block trick), then flushes with crossterm. Nothing in here mutates
//! the run state.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};

use crate::engine::{Obstacle, Phase, RunState, Viewport};
use crate::tuning::Tuning;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t) as u8;
        Rgb(ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
    }

    fn scaled(self, f: f64) -> Rgb {
        let ch = |x: u8| (f64::from(x) * f).clamp(0.0, 255.0) as u8;
        Rgb(ch(self.0), ch(self.1), ch(self.2))
    }

    fn term(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(96, 150, 210);
const SKY_BOT: Rgb = Rgb(206, 229, 240);
const BASELINE: Rgb = Rgb(110, 190, 70);
const PILLAR: Rgb = Rgb(92, 160, 48);
const PILLAR_DARK: Rgb = Rgb(56, 108, 28);
const PILLAR_LIT: Rgb = Rgb(128, 200, 70);
const CAP: Rgb = Rgb(46, 88, 22);
const BODY: Rgb = Rgb(240, 196, 60);
const WING: Rgb = Rgb(205, 150, 40);
const EYE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(16, 16, 16);
const BEAK: Rgb = Rgb(230, 90, 40);
const INK: Rgb = Rgb(28, 28, 28);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const HUD_GRAVITY: Rgb = Rgb(180, 180, 255);
pub const HUD_FLAP: Rgb = Rgb(255, 180, 180);
pub const HUD_SPEED: Rgb = Rgb(180, 255, 180);

// ── Pixel canvas ────────────────────────────────────────────────────────────

pub struct Canvas {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Darken the whole frame, used behind the game-over panel.
    pub fn dim(&mut self, f: f64) {
        for p in &mut self.px {
            *p = p.scaled(f);
        }
    }

    /// Queue the frame as upper-half-block cells. Colors are only re-emitted
    /// when a cell differs from its predecessor, which keeps the escape
    /// stream small enough for slow terminals.
    pub fn blit(&self, out: &mut impl Write) -> io::Result<()> {
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..self.h / 2 {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.px[row * 2 * self.w + col];
                let bot = self.px[(row * 2 + 1) * self.w + col];
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
        }
        queue!(out, style::ResetColor)?;
        Ok(())
    }
}

// ── 3x5 bitmap digits ───────────────────────────────────────────────────────

// Row-major 3x5 glyphs packed into 15 bits, top-left at the highest bit.
const DIGITS: [u16; 10] = [
    0b111_101_101_101_111, // 0
    0b010_110_010_010_111, // 1
    0b111_001_111_100_111, // 2
    0b111_001_011_001_111, // 3
    0b101_101_111_001_001, // 4
    0b111_100_111_001_111, // 5
    0b111_100_111_101_111, // 6
    0b111_001_010_010_010, // 7
    0b111_101_111_101_111, // 8
    0b111_101_111_001_111, // 9
];

fn draw_digit(canvas: &mut Canvas, x: i32, y: i32, d: u8, fg: Rgb) {
    let glyph = DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph >> (14 - (row * 3 + col)) & 1 == 1 {
                canvas.set(x + col, y + row, fg);
            }
        }
    }
}

/// Centered number with a one-pixel drop shadow, 3px digits + 1px spacing.
pub fn draw_number(canvas: &mut Canvas, cx: i32, y: i32, n: u32, fg: Rgb) {
    let s = n.to_string();
    let start_x = cx - (s.len() as i32 * 4 - 1) / 2;
    for (i, ch) in s.bytes().enumerate() {
        let x = start_x + i as i32 * 4;
        draw_digit(canvas, x + 1, y + 1, ch - b'0', INK);
        draw_digit(canvas, x, y, ch - b'0', fg);
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Paint one frame of the run into the canvas. `frame` only drives the wing
/// flutter; everything else comes straight from the snapshot.
pub fn draw_frame(
    canvas: &mut Canvas,
    state: &RunState,
    viewport: &Viewport,
    tuning: &Tuning,
    frame: u64,
) {
    draw_sky(canvas);
    for obstacle in &state.obstacles {
        draw_obstacle(canvas, obstacle, viewport, tuning);
    }
    draw_baseline(canvas);
    draw_actor(canvas, state, viewport, tuning, frame);
    if state.phase != Phase::NotStarted {
        draw_number(canvas, canvas.w as i32 / 2, 3, state.score, WHITE);
    }
}

fn draw_sky(canvas: &mut Canvas) {
    let h = canvas.h;
    for y in 0..h {
        let c = Rgb::mix(SKY_TOP, SKY_BOT, y as f64 / h.max(1) as f64);
        for x in 0..canvas.w {
            canvas.set(x as i32, y as i32, c);
        }
    }
}

fn draw_baseline(canvas: &mut Canvas) {
    let y = canvas.h as i32 - 1;
    for x in 0..canvas.w as i32 {
        canvas.set(x, y, BASELINE);
    }
}

fn draw_obstacle(canvas: &mut Canvas, obstacle: &Obstacle, viewport: &Viewport, tuning: &Tuning) {
    let x = obstacle.x.round() as i32;
    let w = obstacle.width(tuning).round().max(1.0) as i32;
    let gap_top = obstacle.gap_top.round() as i32;
    let gap_bot = obstacle.gap_bottom().round() as i32;
    let floor = viewport.height.round() as i32;

    let cap_h = (w / 4).clamp(1, 3);

    // Column bodies with a lit center band and dark rims.
    for dx in 0..w {
        let c = if dx == 0 || dx == w - 1 {
            PILLAR_DARK
        } else if dx * 3 < w {
            PILLAR_LIT
        } else {
            PILLAR
        };
        for y in 0..gap_top - cap_h {
            canvas.set(x + dx, y, c);
        }
        for y in (gap_bot + cap_h)..floor {
            canvas.set(x + dx, y, c);
        }
    }

    // Caps overhang the body by one pixel on each side.
    canvas.fill(x - 1, gap_top - cap_h, w + 2, cap_h, PILLAR);
    canvas.fill(x - 1, gap_top - 1, w + 2, 1, CAP);
    canvas.fill(x - 1, gap_bot, w + 2, cap_h, PILLAR);
    canvas.fill(x - 1, gap_bot, w + 2, 1, CAP);
}

fn draw_actor(
    canvas: &mut Canvas,
    state: &RunState,
    viewport: &Viewport,
    tuning: &Tuning,
    frame: u64,
) {
    let cx = state.actor.center_x(viewport, tuning).round() as i32;
    let cy = state.actor.y.round() as i32;
    let hw = (tuning.actor_width * 0.5).round().max(1.0) as i32;
    let hh = (tuning.actor_height * 0.5).round().max(1.0) as i32;

    // Nose-up or nose-down pixel shift from the clamped tilt angle.
    let tilt = state.actor.tilt_deg(tuning);
    let shift = if tilt < -10.0 {
        -1
    } else if tilt > 15.0 {
        1
    } else {
        0
    };

    canvas.fill(cx - hw, cy - hh, hw * 2 + 1, hh * 2, BODY);

    let flutter = if frame % 10 < 5 { 0 } else { 1 };
    canvas.fill(cx - hw, cy + shift - 1 + flutter, hw, 1.max(hh - 1), WING);

    let eye_x = cx + hw - 1;
    canvas.set(eye_x, cy - hh + 1, EYE);
    canvas.set(eye_x + 1, cy - hh + 1, PUPIL);

    canvas.fill(cx + hw + 1, cy + shift, 2.min(hw), 1.max(hh / 2), BEAK);
    canvas.fill(cx - hw - 1, cy - shift, 1, 1.max(hh / 2), WING);
}

// ── Text overlays ───────────────────────────────────────────────────────────

/// Queue a centered text row on top of the blitted frame. Terminal rows are
/// half the pixel height.
pub fn center_text(
    out: &mut impl Write,
    cols: u16,
    row: u16,
    text: &str,
    fg: Rgb,
    bg: Option<Rgb>,
) -> io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    queue!(out, cursor::MoveTo(col, row), style::SetForegroundColor(fg.term()))?;
    match bg {
        Some(bg) => queue!(out, style::SetBackgroundColor(bg.term()))?,
        None => {}
    }
    queue!(out, style::Print(text), style::ResetColor)?;
    Ok(())
}
