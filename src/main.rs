mod actions;
mod console;
mod economy;
mod input;
mod render;
mod session;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use actions::{intent_for, Intent};
use input::{ClickTargets, InputEvent};
use session::Session;

/// Monotonic frame clock in milliseconds.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Pointer position relative to the grid container, plus the container size.
///
/// DomBackend creates a `<div>` as the grid container inside `<body>`.
fn grid_relative(mouse_x: u32, mouse_y: u32) -> Option<(f64, f64, f64, f64)> {
    let document = web_sys::window()?.document()?;
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    Some((
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    ))
}

fn dispatch(session: &mut Session, event: &InputEvent) {
    match intent_for(event, session.catalog()) {
        Some(Intent::Click) => session.click(),
        Some(Intent::Buy(id)) => {
            // Refusals are already reported in the log panel and console.
            let _ = session.buy(id);
        }
        None => {}
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let session = Rc::new(RefCell::new(Session::start()));
    let targets = Rc::new(RefCell::new(ClickTargets::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let session = session.clone();
        let targets = targets.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let Some((x, y, w, h)) = grid_relative(mouse_event.x, mouse_event.y) else {
                return;
            };
            let action = targets.borrow().hit_test_pixels(x, y, w, h);
            if let Some(action) = action {
                dispatch(&mut session.borrow_mut(), &InputEvent::Click(action));
            }
        }
    });

    terminal.on_key_event({
        let session = session.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                dispatch(&mut session.borrow_mut(), &InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut s = session.borrow_mut();
        s.frame(now_ms());

        let area = f.area();
        let mut t = targets.borrow_mut();
        t.reset(area.width, area.height);
        render::render(&s, f, area, &mut t);
    });

    Ok(())
}
