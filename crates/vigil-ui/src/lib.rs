use std::cell::RefCell;
use std::rc::Rc;

use slint::ComponentHandle;
use vigil_core::select::SelectionState;
use vigil_types::Region;

slint::include_modules!();

/// Shows a full-screen translucent overlay and blocks until the user drags
/// out a rectangle. Returns the selection in physical screen coordinates, or
/// the empty-selection error when the gesture collapses to a point.
pub fn select_region() -> anyhow::Result<Region> {
    let overlay = SelectorOverlay::new()?;
    overlay.window().set_fullscreen(true);

    let state = Rc::new(RefCell::new(SelectionState::new()));

    {
        let state = state.clone();
        let weak = overlay.as_weak();
        overlay.on_pointer_pressed(move |x, y| {
            let mut state = state.borrow_mut();
            state.pointer_down(x as i32, y as i32);
            if let Some(overlay) = weak.upgrade() {
                overlay.set_dragging(true);
                sync_preview(&overlay, &state);
            }
        });
    }

    {
        let state = state.clone();
        let weak = overlay.as_weak();
        overlay.on_pointer_moved(move |x, y| {
            let mut state = state.borrow_mut();
            state.pointer_move(x as i32, y as i32);
            if let Some(overlay) = weak.upgrade() {
                sync_preview(&overlay, &state);
            }
        });
    }

    {
        let state = state.clone();
        overlay.on_pointer_released(move |x, y| {
            state.borrow_mut().pointer_up(x as i32, y as i32);
            slint::quit_event_loop().ok();
        });
    }

    overlay.run()?;

    let scale = overlay.window().scale_factor();
    let region = state.borrow().clone().finish()?;
    tracing::debug!(?region, scale, "selection finished");
    Ok(to_physical(region, scale))
}

fn sync_preview(overlay: &SelectorOverlay, state: &SelectionState) {
    if let Some((x, y, width, height)) = state.preview() {
        overlay.set_sel_x(x as f32);
        overlay.set_sel_y(y as f32);
        overlay.set_sel_width(width as f32);
        overlay.set_sel_height(height as f32);
    }
}

/// Pointer events arrive in logical coordinates; the capture backend works
/// in physical pixels.
fn to_physical(region: Region, scale: f32) -> Region {
    if (scale - 1.0).abs() < f32::EPSILON {
        return region;
    }
    Region {
        x: (region.x as f32 * scale).round() as i32,
        y: (region.y as f32 * scale).round() as i32,
        width: (region.width as f32 * scale).round() as u32,
        height: (region.height as f32 * scale).round() as u32,
    }
}
