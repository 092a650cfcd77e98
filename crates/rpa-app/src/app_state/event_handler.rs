//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::bounds::panel_bounds;
use super::core::RpaApp;

impl ApplicationHandler for RpaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            self.shutdown();
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
                    self.sync_panel_bounds(size);
                }
            }

            WindowEvent::Focused(true) => {
                if let Some(ref panel) = self.panel {
                    if let Err(e) = panel.focus() {
                        tracing::debug!(error = %e, "Failed to focus panel");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl RpaApp {
    /// Keep the panel WebView covering the whole window.
    fn sync_panel_bounds(&self, size: winit::dpi::PhysicalSize<u32>) {
        let (Some(window), Some(panel)) = (&self.window, &self.panel) else {
            return;
        };
        let bounds = panel_bounds(size, window.scale_factor());
        if let Err(e) = panel.set_bounds(bounds) {
            tracing::warn!(error = %e, "Failed to resize panel webview");
        }
    }
}
