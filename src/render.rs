//! Repaint engine.
//!
//! Bolas carry no identity across snapshots, so there is nothing to erase
//! individually: any snapshot change forces a full-surface repaint.
//! Between snapshots only the drag preview line can move, and it is
//! erased by redrawing the previous line in the background color instead
//! of repainting the whole surface. Bolas are cheap stateless shapes and
//! are redrawn every frame on both paths.

use crate::consts::BOLA_RADIUS;
use crate::gesture::Gesture;
use crate::protocol::Point;
use crate::settings::Palette;
use crate::snapshot::SnapshotStore;

/// Minimal drawing surface the engine paints on.
///
/// Colors are CSS color strings so the browser implementation can hand
/// them straight to the 2-D context; tests record the calls instead.
pub trait Surface {
    /// Fill the entire surface, erasing everything previously drawn.
    fn clear(&mut self, color: &str);
    fn line(&mut self, from: Point, to: Point, color: &str);
    /// Filled circle.
    fn circle(&mut self, center: Point, radius: f64, color: &str);
    /// Resize the backing store. Implementations blank the surface as a
    /// side effect, matching canvas semantics.
    fn resize(&mut self, width: i32, height: i32);
}

/// What the previous frame left on the surface; the incremental path
/// erases exactly this and nothing more. Mutated only here, once per
/// frame.
#[derive(Debug, Default)]
pub struct RenderState {
    last_line: Option<(Point, Point)>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn last_line(&self) -> Option<(Point, Point)> {
        self.last_line
    }
}

/// Paint one frame. After this returns the surface shows exactly the
/// background, every bola in the current snapshot, and the drag preview
/// line if a gesture is showable - no stale segments, no ghost bolas.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    gesture: &Gesture,
    store: &mut SnapshotStore,
    state: &mut RenderState,
    palette: &Palette,
) {
    if store.take_updated() {
        full_repaint(surface, gesture, store, state, palette);
    } else {
        incremental_repaint(surface, gesture, store, state, palette);
    }
}

/// O(surface area + bolas): background fill wipes everything, then the
/// whole scene is rebuilt.
fn full_repaint<S: Surface>(
    surface: &mut S,
    gesture: &Gesture,
    store: &SnapshotStore,
    state: &mut RenderState,
    palette: &Palette,
) {
    surface.clear(&palette.background);
    state.last_line = gesture.line();
    if let Some((from, to)) = state.last_line {
        surface.line(from, to, &palette.line);
    }
    draw_bolas(surface, store, palette);
}

/// The ball set is known unchanged: erase the previous preview line by
/// overdrawing it in the background color, then redraw the scene's
/// mutable parts.
fn incremental_repaint<S: Surface>(
    surface: &mut S,
    gesture: &Gesture,
    store: &SnapshotStore,
    state: &mut RenderState,
    palette: &Palette,
) {
    if let Some((from, to)) = state.last_line.take() {
        surface.line(from, to, &palette.background);
    }
    state.last_line = gesture.line();
    if let Some((from, to)) = state.last_line {
        surface.line(from, to, &palette.line);
    }
    draw_bolas(surface, store, palette);
}

fn draw_bolas<S: Surface>(surface: &mut S, store: &SnapshotStore, palette: &Palette) {
    for bola in store.bolas() {
        surface.circle(bola.c, BOLA_RADIUS, palette.bola_color(bola.collided()));
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dSurface;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::Surface;
    use crate::protocol::Point;

    /// Canvas 2-D implementation of [`Surface`].
    pub struct Canvas2dSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Canvas2dSurface {
        pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            Ok(Self { canvas, ctx })
        }
    }

    impl Surface for Canvas2dSurface {
        fn clear(&mut self, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }

        fn line(&mut self, from: Point, to: Point, color: &str) {
            self.ctx.set_stroke_style_str(color);
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }

        fn circle(&mut self, center: Point, radius: f64, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.set_stroke_style_str(color);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.stroke();
            self.ctx.fill();
        }

        fn resize(&mut self, width: i32, height: i32) {
            // Setting width/height also blanks the canvas
            self.canvas.set_width(width.max(0) as u32);
            self.canvas.set_height(height.max(0) as u32);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_surface::{Op, RecordingSurface};
    use super::*;
    use crate::protocol::Bola;

    fn point(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    fn bola(x: i32, y: i32, t: u32) -> Bola {
        Bola { c: point(x, y), t }
    }

    struct Fixture {
        surface: RecordingSurface,
        gesture: Gesture,
        store: SnapshotStore,
        state: RenderState,
        palette: Palette,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                surface: RecordingSurface::new(),
                gesture: Gesture::new(),
                store: SnapshotStore::new(),
                state: RenderState::new(),
                palette: Palette::default(),
            }
        }

        fn render(&mut self) -> Vec<Op> {
            render_frame(
                &mut self.surface,
                &self.gesture,
                &mut self.store,
                &mut self.state,
                &self.palette,
            );
            self.surface.frame()
        }
    }

    #[test]
    fn full_repaint_paints_background_line_then_bolas() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(10, 10, 0), bola(20, 20, 0)]);
        fx.gesture.press_start(point(1, 1));
        fx.gesture.press_move(point(5, 5));

        let ops = fx.render();
        assert_eq!(
            ops,
            vec![
                Op::Clear(fx.palette.background.clone()),
                Op::Line(point(1, 1), point(5, 5), fx.palette.line.clone()),
                Op::Circle(point(10, 10), BOLA_RADIUS, fx.palette.bola.clone()),
                Op::Circle(point(20, 20), BOLA_RADIUS, fx.palette.bola.clone()),
            ]
        );
    }

    #[test]
    fn full_repaint_is_deterministic() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(10, 10, 0), bola(30, 40, 3)]);
        let first = fx.render();

        fx.store.mark_updated();
        let second = fx.render();
        assert_eq!(first, second);
    }

    #[test]
    fn steady_state_frame_skips_the_background_fill() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(10, 10, 0)]);
        fx.render();

        let ops = fx.render();
        assert_eq!(
            ops,
            vec![Op::Circle(point(10, 10), BOLA_RADIUS, fx.palette.bola.clone())]
        );
    }

    #[test]
    fn moving_line_is_erased_exactly_where_it_was() {
        let mut fx = Fixture::new();
        fx.gesture.press_start(point(0, 0));
        fx.gesture.press_move(point(10, 10));
        fx.render();

        fx.gesture.press_move(point(20, 20));
        let ops = fx.render();
        assert_eq!(
            ops,
            vec![
                Op::Line(point(0, 0), point(10, 10), fx.palette.background.clone()),
                Op::Line(point(0, 0), point(20, 20), fx.palette.line.clone()),
            ]
        );
        assert_eq!(fx.state.last_line(), Some((point(0, 0), point(20, 20))));
    }

    #[test]
    fn released_gesture_leaves_no_line_behind() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(50, 50, 0)]);
        fx.gesture.press_start(point(0, 0));
        fx.gesture.press_move(point(10, 10));
        fx.render();

        fx.gesture.press_end(point(10, 10)).unwrap();
        let ops = fx.render();
        // The old line is erased and nothing is drawn in the line color
        assert!(ops.contains(&Op::Line(
            point(0, 0),
            point(10, 10),
            fx.palette.background.clone()
        )));
        assert!(
            !ops.iter()
                .any(|op| matches!(op, Op::Line(_, _, color) if *color == fx.palette.line))
        );
        assert_eq!(fx.state.last_line(), None);
    }

    #[test]
    fn full_repaint_forgets_the_previous_line() {
        let mut fx = Fixture::new();
        fx.gesture.press_start(point(0, 0));
        fx.gesture.press_move(point(10, 10));
        fx.render();

        // Gesture ends and a snapshot lands before the next frame
        fx.gesture.press_end(point(10, 10)).unwrap();
        fx.store.replace(vec![bola(5, 5, 0)]);
        fx.render();
        assert_eq!(fx.state.last_line(), None);

        // The following incremental frame must not erase anything
        let ops = fx.render();
        assert!(!ops.iter().any(|op| matches!(op, Op::Line(..))));
    }

    #[test]
    fn collision_color_follows_t_across_snapshots() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(10, 10, 5)]);
        let ops = fx.render();
        assert!(ops.contains(&Op::Circle(
            point(10, 10),
            BOLA_RADIUS,
            fx.palette.bola_collision.clone()
        )));

        fx.store.replace(vec![bola(10, 10, 0)]);
        let ops = fx.render();
        assert!(ops.contains(&Op::Circle(
            point(10, 10),
            BOLA_RADIUS,
            fx.palette.bola.clone()
        )));
    }

    #[test]
    fn bolas_are_redrawn_on_both_paths() {
        let mut fx = Fixture::new();
        fx.store.replace(vec![bola(10, 10, 0)]);
        let full = fx.render();
        let incremental = fx.render();

        let circles = |ops: &[Op]| {
            ops.iter()
                .filter(|op| matches!(op, Op::Circle(..)))
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(circles(&full), circles(&incremental));
    }
}
