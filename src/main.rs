//! Bolas Arena entry point
//!
//! Handles platform-specific initialization: browser builds bootstrap the
//! canvas, connect the socket, and run the animation-frame loop; native
//! builds run a short headless smoke pass.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent, Window};

    use bolas_arena::arena::{Arena, ArenaEvent};
    use bolas_arena::channel::{WsChannel, service_url};
    use bolas_arena::protocol::Point;
    use bolas_arena::render::{Canvas2dSurface, Surface};
    use bolas_arena::settings::Palette;

    type SharedArena = Rc<RefCell<Arena>>;
    type SharedChannel = Rc<RefCell<WsChannel>>;
    type SharedSurface = Rc<RefCell<Canvas2dSurface>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bolas arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("bolas")
            .expect("no #bolas canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = viewport_size(&window);
        let arena = Rc::new(RefCell::new(Arena::new(width, height, Palette::load())));
        let surface = Rc::new(RefCell::new(Canvas2dSurface::new(canvas.clone())?));

        let url = service_url(&window.location())?;
        log::info!("Connecting to {url}");
        let channel = Rc::new(RefCell::new(WsChannel::connect(&url)?));

        // Inbound snapshots and lifecycle transitions feed the event queue
        {
            let arena = arena.clone();
            channel.borrow().set_on_snapshot(move |snapshot| {
                arena.borrow_mut().push(ArenaEvent::Snapshot(snapshot.bolas));
            });
        }
        {
            let arena = arena.clone();
            channel.borrow().set_on_close(move || {
                arena.borrow_mut().push(ArenaEvent::ChannelClosed);
            });
        }
        {
            let arena = arena.clone();
            channel.borrow().set_on_error(move || {
                arena.borrow_mut().push(ArenaEvent::ChannelClosed);
            });
        }

        // Input and the render loop arm only once the handshake
        // completes; the first frame must not paint against an undefined
        // viewport.
        {
            let arena = arena.clone();
            let channel_for_open = channel.clone();
            let surface = surface.clone();
            let canvas = canvas.clone();
            channel.borrow().set_on_open(move || {
                let window = web_sys::window().expect("no window");
                let (width, height) = viewport_size(&window);
                surface.borrow_mut().resize(width, height);
                arena
                    .borrow_mut()
                    .handle_open(width, height, &mut *channel_for_open.borrow_mut());

                if touch_capable(&window) {
                    log::info!("Setting up bolas events for a touch browser");
                    setup_touch_events(&canvas, arena.clone());
                } else {
                    log::info!("Setting up bolas events for a desktop browser");
                    setup_mouse_events(&canvas, arena.clone());
                }
                setup_resize_events(&window, arena.clone());

                schedule_frame(arena.clone(), channel_for_open.clone(), surface.clone());
            });
        }

        Ok(())
    }

    fn viewport_size(window: &Window) -> (i32, i32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as i32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as i32;
        (width, height)
    }

    fn touch_capable(window: &Window) -> bool {
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
    }

    fn mouse_point(event: &MouseEvent) -> Point {
        Point {
            x: event.client_x(),
            y: event.client_y(),
        }
    }

    /// First active touch point; on touchend the lifted finger is only in
    /// `changed_touches`.
    fn touch_point(event: &TouchEvent) -> Option<Point> {
        let touch = event
            .touches()
            .get(0)
            .or_else(|| event.changed_touches().get(0))?;
        Some(Point {
            x: touch.client_x(),
            y: touch.client_y(),
        })
    }

    fn setup_mouse_events(canvas: &HtmlCanvasElement, arena: SharedArena) {
        {
            let arena = arena.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                arena
                    .borrow_mut()
                    .push(ArenaEvent::PressStart(mouse_point(&event)));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let arena = arena.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                arena
                    .borrow_mut()
                    .push(ArenaEvent::PressMove(mouse_point(&event)));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                arena
                    .borrow_mut()
                    .push(ArenaEvent::PressEnd(mouse_point(&event)));
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_events(canvas: &HtmlCanvasElement, arena: SharedArena) {
        {
            let arena = arena.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(p) = touch_point(&event) {
                    arena.borrow_mut().push(ArenaEvent::PressStart(p));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let arena = arena.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(p) = touch_point(&event) {
                    arena.borrow_mut().push(ArenaEvent::PressMove(p));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(p) = touch_point(&event) {
                    arena.borrow_mut().push(ArenaEvent::PressEnd(p));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_events(window: &Window, arena: SharedArena) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().expect("no window");
            let (width, height) = viewport_size(&window);
            arena
                .borrow_mut()
                .push(ArenaEvent::Resized { width, height });
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn schedule_frame(arena: SharedArena, channel: SharedChannel, surface: SharedSurface) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            frame(arena, channel, surface, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(arena: SharedArena, channel: SharedChannel, surface: SharedSurface, time: f64) {
        arena.borrow_mut().tick(
            time,
            &mut *channel.borrow_mut(),
            &mut *surface.borrow_mut(),
        );
        schedule_frame(arena, channel, surface);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Failed to start: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bolas arena (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the browser client");

    println!("\nRunning headless smoke pass...");
    smoke_pass();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one drag and one snapshot through a tick against stub transport
/// and surface implementations.
#[cfg(not(target_arch = "wasm32"))]
fn smoke_pass() {
    use bolas_arena::arena::{Arena, ArenaEvent};
    use bolas_arena::channel::{Channel, ChannelError};
    use bolas_arena::protocol::{Bola, ClientMessage, Point};
    use bolas_arena::render::Surface;
    use bolas_arena::settings::Palette;

    struct SmokeChannel {
        sent: Vec<ClientMessage>,
    }

    impl Channel for SmokeChannel {
        fn send(&mut self, message: &ClientMessage) -> Result<(), ChannelError> {
            self.sent.push(*message);
            Ok(())
        }
    }

    #[derive(Default)]
    struct SmokeSurface {
        clears: usize,
        lines: usize,
        circles: usize,
    }

    impl Surface for SmokeSurface {
        fn clear(&mut self, _color: &str) {
            self.clears += 1;
        }
        fn line(&mut self, _from: Point, _to: Point, _color: &str) {
            self.lines += 1;
        }
        fn circle(&mut self, _center: Point, _radius: f64, _color: &str) {
            self.circles += 1;
        }
        fn resize(&mut self, _width: i32, _height: i32) {}
    }

    let mut channel = SmokeChannel { sent: Vec::new() };
    let mut surface = SmokeSurface::default();
    let mut arena = Arena::new(800, 600, Palette::default());

    arena.handle_open(800, 600, &mut channel);
    arena.push(ArenaEvent::PressStart(Point { x: 100, y: 100 }));
    arena.push(ArenaEvent::PressMove(Point { x: 60, y: 140 }));
    arena.push(ArenaEvent::PressEnd(Point { x: 60, y: 140 }));
    arena.push(ArenaEvent::Snapshot(vec![
        Bola {
            c: Point { x: 200, y: 200 },
            t: 0,
        },
        Bola {
            c: Point { x: 400, y: 300 },
            t: 3,
        },
    ]));
    arena.tick(0.0, &mut channel, &mut surface);

    assert_eq!(channel.sent.len(), 2, "dimensions handshake + one launch");
    assert_eq!(surface.clears, 1, "snapshot arrival forces a full repaint");
    assert_eq!(surface.circles, 2, "both bolas drawn");

    println!("✓ Headless smoke pass complete!");
}
