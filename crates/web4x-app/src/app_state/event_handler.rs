//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::Web4xApp;
use super::keys::{key_name, shortcut, Modifiers};

impl ApplicationHandler for Web4xApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.sync_layout();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_layout();
            }

            WindowEvent::DroppedFile(path) => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.open_path(&path);
                }
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl Web4xApp {
    /// Translate a key press into a window command.
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        let KeyEvent {
            logical_key, state, ..
        } = event;
        if state != ElementState::Pressed {
            return;
        }
        let Some(name) = key_name(&logical_key) else {
            return;
        };

        let mods = Modifiers {
            ctrl: self.modifiers.control_key() || self.modifiers.super_key(),
            alt: self.modifiers.alt_key(),
            shift: self.modifiers.shift_key(),
        };
        let Some(command) = shortcut(&name, mods) else {
            return;
        };

        tracing::debug!(key = %name, ?command, "shortcut");
        if let Some(browser) = self.browser.as_mut() {
            browser.apply(command);
        }
    }
}
