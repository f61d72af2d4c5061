use crate::constants::MODE_BUTTON_PREFIX;
use crate::dom;
use crate::input;
use crate::ui::DomUi;
use seismo_core::{App, Mode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<App>>,
    pub ui: Rc<RefCell<DomUi>>,
}

/// Digit keys 1..4 switch modes.
pub fn wire_global_keydown(app: Rc<RefCell<App>>, ui: Rc<RefCell<DomUi>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
                    return;
                }
                if app.borrow_mut().handle_key(&ev.key(), &mut *ui.borrow_mut()) {
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// `#mode-<slug>` buttons, one per mode.
pub fn wire_mode_buttons(document: &web::Document, app: Rc<RefCell<App>>, ui: Rc<RefCell<DomUi>>) {
    for mode in Mode::ALL {
        let app = app.clone();
        let ui = ui.clone();
        let id = format!("{}{}", MODE_BUTTON_PREFIX, mode.slug());
        dom::add_click_listener(document, &id, move || {
            app.borrow_mut().set_mode(mode, &mut *ui.borrow_mut());
        });
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointermove: hover picking, details panel, orbit drag
    {
        let app = w.app.clone();
        let ui = w.ui.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &canvas);
            app.borrow_mut()
                .pointer_move(pos.x, pos.y, &mut *ui.borrow_mut());
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerdown
    {
        let app = w.app.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &canvas);
            app.borrow_mut().pointer_down(pos.x, pos.y);
            let _ = canvas.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup anywhere ends a drag
    {
        let app = w.app.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            app.borrow_mut().pointer_up();
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // click: annotation, burst, click counter
    {
        let app = w.app.clone();
        let ui = w.ui.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            app.borrow_mut().click(&mut *ui.borrow_mut());
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // dblclick: fly to the hovered marker
    {
        let app = w.app.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            app.borrow_mut().double_click();
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel: zoom
    {
        let app = w.app.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            app.borrow_mut().wheel(input::wheel_delta_px(&ev));
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
