//! Browser binding: DOM listeners that feed a [`Stage`].
//!
//! [`DomBinding::attach`] registers one closure per [`Listener`] on the
//! target element. Which of them are actually installed follows the
//! controls' [`ListenerSet`] after every event, so the motion, button
//! release and key release listeners exist only while an alt-drag look
//! session runs. Dropping the binding removes everything it installed.

use std::{cell::RefCell, rc::Rc};

use glam::Vec2;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    AddEventListenerOptions, Event, HtmlElement, KeyboardEvent, MouseEvent,
    WheelEvent,
};

use crate::{
    controls::{PointerLock, Response, Stage},
    input::{InputEvent, Listener, ListenerSet, Modifiers, MouseButton},
    picking::PointerPosition,
};

type Handler = Closure<dyn FnMut(Event)>;

/// Install a `console.log` backed logger and readable panic messages.
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialised");
    }
}

/// Listener functions and what is currently registered on the element.
struct Registry {
    element: HtmlElement,
    functions: Vec<(Listener, js_sys::Function)>,
    installed: ListenerSet,
}

impl Registry {
    /// Add and remove DOM listeners until the installed set equals
    /// `wanted`.
    fn sync(&mut self, wanted: ListenerSet) {
        for (listener, function) in &self.functions {
            let listener = *listener;
            let have = self.installed.contains(listener);
            let want = wanted.contains(listener);
            if want && !have {
                match add_listener(&self.element, listener, function) {
                    Ok(()) => self.installed.insert(listener),
                    Err(e) => log::warn!(
                        "failed to add {} listener: {e:?}",
                        listener.event_type()
                    ),
                }
            } else if have && !want {
                let removed = self.element.remove_event_listener_with_callback(
                    listener.event_type(),
                    function,
                );
                if let Err(e) = removed {
                    log::warn!(
                        "failed to remove {} listener: {e:?}",
                        listener.event_type()
                    );
                }
                self.installed.remove(listener);
            }
        }
    }
}

fn add_listener(
    element: &HtmlElement,
    listener: Listener,
    function: &js_sys::Function,
) -> Result<(), JsValue> {
    if listener == Listener::Wheel {
        // Wheel listeners must not be passive or preventDefault is ignored.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        element.add_event_listener_with_callback_and_add_event_listener_options(
            listener.event_type(),
            function,
            &options,
        )
    } else {
        element.add_event_listener_with_callback(listener.event_type(), function)
    }
}

/// DOM listeners driving a shared [`Stage`].
pub struct DomBinding {
    registry: Rc<RefCell<Registry>>,
    /// Keeps the closures alive for as long as the binding exists.
    _handlers: Vec<Handler>,
}

impl DomBinding {
    /// Make `element` focusable and register the persistent listeners.
    ///
    /// The caller keeps its own handle to `stage` to run
    /// [`Stage::update`] from its animation frame loop.
    pub fn attach(element: HtmlElement, stage: Rc<RefCell<Stage>>) -> Self {
        if element.tab_index() == -1 {
            element.set_tab_index(0);
        }

        let registry = Rc::new(RefCell::new(Registry {
            element: element.clone(),
            functions: Vec::with_capacity(Listener::ALL.len()),
            installed: ListenerSet::EMPTY,
        }));

        let mut handlers = Vec::with_capacity(Listener::ALL.len());
        for listener in Listener::ALL {
            let stage = Rc::clone(&stage);
            let registry_handle = Rc::clone(&registry);
            let element = element.clone();
            let handler = Handler::new(move |event: Event| {
                let Some(input) = translate(listener, &event, &element) else {
                    return;
                };
                let (response, wanted) = {
                    let mut stage = stage.borrow_mut();
                    let response = stage.handle_event(input);
                    (response, stage.controls.listeners())
                };
                apply(&event, &element, response);
                registry_handle.borrow_mut().sync(wanted);
            });
            let function: js_sys::Function =
                handler.as_ref().unchecked_ref::<js_sys::Function>().clone();
            registry.borrow_mut().functions.push((listener, function));
            handlers.push(handler);
        }

        let wanted = stage.borrow().controls.listeners();
        registry.borrow_mut().sync(wanted);
        log::debug!("view controls attached to <{}>", element.tag_name());

        Self {
            registry,
            _handlers: handlers,
        }
    }

    /// Listeners currently registered on the element.
    #[must_use]
    pub fn installed(&self) -> ListenerSet {
        self.registry.borrow().installed
    }

    /// Re-read the wanted listeners from `stage`, e.g. after
    /// [`ViewControls::set_options`](crate::ViewControls::set_options)
    /// toggled auto-return.
    pub fn refresh(&self, stage: &Stage) {
        self.registry.borrow_mut().sync(stage.controls.listeners());
    }
}

impl Drop for DomBinding {
    fn drop(&mut self) {
        self.registry.borrow_mut().sync(ListenerSet::EMPTY);
    }
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        alt: event.alt_key(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
    }
}

/// Convert a DOM event into the controls' vocabulary.
fn translate(
    listener: Listener,
    event: &Event,
    element: &HtmlElement,
) -> Option<InputEvent> {
    match listener {
        Listener::PointerDown => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerDown {
                pointer: PointerPosition {
                    x: mouse.offset_x() as f32,
                    y: mouse.offset_y() as f32,
                    width: element.client_width() as f32,
                    height: element.client_height() as f32,
                },
                button: MouseButton::from_dom(mouse.button())?,
                modifiers: modifiers(mouse),
            })
        }
        Listener::PointerMove => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerMove {
                movement: Vec2::new(
                    mouse.movement_x() as f32,
                    mouse.movement_y() as f32,
                ),
                modifiers: modifiers(mouse),
            })
        }
        Listener::PointerUp => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerUp {
                button: MouseButton::from_dom(mouse.button())
                    .unwrap_or(MouseButton::Left),
            })
        }
        Listener::Wheel => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta_y: wheel.delta_y() as f32,
            })
        }
        Listener::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            Some(InputEvent::KeyDown { key })
        }
        Listener::KeyUp => {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            Some(InputEvent::KeyUp { key })
        }
        Listener::ContextMenu => Some(InputEvent::ContextMenu),
    }
}

fn apply(event: &Event, element: &HtmlElement, response: Response) {
    if response.prevent_default {
        event.prevent_default();
    }
    match response.pointer_lock {
        Some(PointerLock::Request) => element.request_pointer_lock(),
        Some(PointerLock::Exit) => {
            if let Some(document) = web_sys::window().and_then(|w| w.document())
            {
                document.exit_pointer_lock();
            }
        }
        None => {}
    }
    if let Some(click) = response.event {
        let hit = click.intersection();
        log::debug!("{click:?} at distance {:.3}", hit.distance);
    }
}
