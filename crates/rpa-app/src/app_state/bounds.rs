//! Window size to WebView bounds.

use winit::dpi::PhysicalSize;

/// The panel fills the whole client area, in logical coordinates.
pub fn panel_bounds(size: PhysicalSize<u32>, scale_factor: f64) -> wry::Rect {
    let logical = size.to_logical::<f64>(scale_factor);
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            logical.width,
            logical.height,
        )),
    }
}

// =============================================================================
// TESTS
// =============================================================================
