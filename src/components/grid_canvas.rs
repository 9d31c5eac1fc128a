use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::config::OCCUPIED_NOTICE;
use crate::model::{GridAction, GridState, GridStore, ItemKind};
use crate::state::{Camera, DragRelease, DragState, ItemShape, item_at};
use crate::transform::{TileSize, ZoomDirection, cell_to_local_pixel, grid_lines};
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct GridCanvasProps {
    pub store: GridStore,
    pub tile: TileSize,
    pub on_notice: Callback<String>,
}

/// Canvas-space position of a mouse event (CSS pixels == canvas pixels here).
fn canvas_point(canvas: &HtmlCanvasElement, e: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn fit_canvas_to_parent(canvas: &HtmlCanvasElement) {
    let (w, h) = match canvas.parent_element() {
        Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
        None => {
            let Some(win) = web_sys::window() else { return };
            (
                win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
                win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
            )
        }
    };
    canvas.set_width(w.max(0.0) as u32);
    canvas.set_height(h.max(0.0) as u32);
}

fn draw_item(ctx: &CanvasRenderingContext2d, kind: ItemKind, tile: TileSize, cx: f64, cy: f64) {
    ctx.set_fill_style_str(kind.color());
    match ItemShape::for_kind(kind, tile) {
        ItemShape::Circle { radius } => {
            ctx.begin_path();
            ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();
        }
        ItemShape::Rect { width, height } => {
            ctx.set_global_alpha(0.25);
            ctx.fill_rect(cx - width / 2.0, cy - height / 2.0, width, height);
            ctx.set_global_alpha(1.0);
        }
    }
}

fn draw_scene(
    canvas: &HtmlCanvasElement,
    cam: &Camera,
    state: &GridState,
    tile: TileSize,
    drag: Option<&DragState>,
) {
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#e9ecef");
    ctx.fill_rect(0.0, 0.0, w, h);
    let v = cam.view;
    ctx.set_transform(v.scale, 0.0, 0.0, v.scale, v.offset_x, v.offset_y)
        .ok();

    let dims = state.dimensions();
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(
        0.0,
        0.0,
        dims.width as f64 * tile.width,
        dims.height as f64 * tile.height,
    );
    ctx.set_stroke_style_str("#080707");
    ctx.set_line_width(1.0);
    for line in grid_lines(dims, tile) {
        ctx.begin_path();
        ctx.move_to(line.x1, line.y1);
        ctx.line_to(line.x2, line.y2);
        ctx.stroke();
    }

    let dragged_id = drag.map(|d| d.item_id.as_str());
    for it in state.items() {
        if Some(it.id.as_str()) == dragged_id {
            continue;
        }
        let (cx, cy) = cell_to_local_pixel(it.x as i32, it.y as i32, tile);
        draw_item(&ctx, it.kind, tile, cx, cy);
    }
    // dragged item last so it floats above the rest
    if let Some(d) = drag {
        if let Some(it) = state.find(&d.item_id) {
            draw_item(&ctx, it.kind, tile, d.anchor_x, d.anchor_y);
        }
    }
}

#[function_component(GridCanvas)]
pub fn grid_canvas(props: &GridCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let drag = use_mut_ref(|| None::<DragState>);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let store_ref = use_mut_ref(|| props.store.clone());
    let tile_ref = use_mut_ref(|| props.tile);
    let notice_ref = use_mut_ref(|| props.on_notice.clone());

    // Effect: refresh the store handle on each version and redraw
    {
        let store_ref = store_ref.clone();
        let current = props.store.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.store.version(), move |_| {
            *store_ref.borrow_mut() = current;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    // Effect: tile size or grid size change recentres the grid
    {
        let tile_ref = tile_ref.clone();
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with((props.tile, props.store.dimensions()), move |(tile, dims)| {
            *tile_ref.borrow_mut() = *tile;
            // first centring happens after the canvas is sized in the setup effect
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let mut cam = camera.borrow_mut();
                if cam.initialized {
                    cam.center_on(
                        *dims,
                        *tile,
                        canvas.width() as f64,
                        canvas.height() as f64,
                    );
                }
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    {
        let notice_ref = notice_ref.clone();
        use_effect_with(props.on_notice.clone(), move |cb| {
            *notice_ref.borrow_mut() = cb.clone();
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let drag = drag.clone();
        let draw_ref_setup = draw_ref.clone();
        let store_ref = store_ref.clone();
        let tile_ref = tile_ref.clone();
        let notice_ref = notice_ref.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let (Some(window), Some(canvas)) = (window, canvas) else {
                cwarn("grid canvas: no window or canvas element");
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };
            fit_canvas_to_parent(&canvas);
            {
                let mut cam = camera.borrow_mut();
                if !cam.initialized {
                    let dims = store_ref.borrow().dimensions();
                    let tile = *tile_ref.borrow();
                    cam.center_on(dims, tile, canvas.width() as f64, canvas.height() as f64);
                }
            }

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let drag = drag.clone();
                let store_ref = store_ref.clone();
                let tile_ref = tile_ref.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let cam = camera.borrow();
                    let store = store_ref.borrow().clone();
                    let tile = *tile_ref.borrow();
                    let drag = drag.borrow();
                    draw_scene(&canvas, &cam, &store, tile, (*drag).as_ref());
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();
            let redraw = {
                let draw_ref = draw_ref_setup.clone();
                move || {
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }
            };

            // Wheel zoom
            let wheel_cb = {
                let camera = camera.clone();
                let canvas_w = canvas.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let (sx, sy) = canvas_point(&canvas_w, &e);
                    let zoomed = camera.borrow_mut().zoom_wheel(sx, sy, e.delta_y());
                    if zoomed {
                        redraw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();

            // Left button on an item grabs it; anything else pans
            let mousedown_cb = {
                let camera = camera.clone();
                let drag = drag.clone();
                let store_ref = store_ref.clone();
                let tile_ref = tile_ref.clone();
                let canvas_m = canvas.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() == 0 {
                        let (sx, sy) = canvas_point(&canvas_m, &e);
                        let (lx, ly) = camera.borrow().view.screen_to_local(sx, sy);
                        let store = store_ref.borrow().clone();
                        let tile = *tile_ref.borrow();
                        if let Some(item) = item_at(&store, tile, lx, ly) {
                            *drag.borrow_mut() = Some(DragState::begin(item, lx, ly, tile));
                            redraw();
                            return;
                        }
                    }
                    camera
                        .borrow_mut()
                        .begin_pan(e.client_x() as f64, e.client_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let mousemove_cb = {
                let camera = camera.clone();
                let drag = drag.clone();
                let canvas_m = canvas.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let dragging = {
                        let mut slot = drag.borrow_mut();
                        match slot.as_mut() {
                            Some(d) => {
                                let (sx, sy) = canvas_point(&canvas_m, &e);
                                let (lx, ly) = camera.borrow().view.screen_to_local(sx, sy);
                                d.move_to(lx, ly);
                                true
                            }
                            None => false,
                        }
                    };
                    if dragging {
                        redraw();
                        return;
                    }
                    let panned = camera
                        .borrow_mut()
                        .pan_to(e.client_x() as f64, e.client_y() as f64);
                    if panned {
                        redraw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            let mouseup_cb = {
                let camera = camera.clone();
                let drag = drag.clone();
                let store_ref = store_ref.clone();
                let tile_ref = tile_ref.clone();
                let notice_ref = notice_ref.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    camera.borrow_mut().end_pan();
                    let finished = drag.borrow_mut().take();
                    let Some(d) = finished else {
                        return;
                    };
                    let store = store_ref.borrow().clone();
                    let tile = *tile_ref.borrow();
                    match d.release(&store, tile) {
                        DragRelease::Stay | DragRelease::Vanished => {}
                        DragRelease::Commit { id, x, y } => {
                            clog(&format!("move {id} -> ({x}, {y})"));
                            store.dispatch(GridAction::MoveItem {
                                id,
                                x: x as i32,
                                y: y as i32,
                            });
                        }
                        DragRelease::SnapBack { x, y } => {
                            clog(&format!("move {} rejected, back to ({x}, {y})", d.item_id));
                            notice_ref.borrow().emit(OCCUPIED_NOTICE.to_string());
                        }
                    }
                    redraw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            let dblclick_cb = {
                let camera = camera.clone();
                let drag = drag.clone();
                let store_ref = store_ref.clone();
                let tile_ref = tile_ref.clone();
                let canvas_m = canvas.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let (sx, sy) = canvas_point(&canvas_m, &e);
                    let (lx, ly) = camera.borrow().view.screen_to_local(sx, sy);
                    let store = store_ref.borrow().clone();
                    let tile = *tile_ref.borrow();
                    let hit = item_at(&store, tile, lx, ly).map(|it| it.id.clone());
                    if let Some(id) = hit {
                        drag.borrow_mut().take();
                        store.dispatch(GridAction::RemoveItem { id });
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("dblclick", dblclick_cb.as_ref().unchecked_ref())
                .ok();

            // Escape drops an in-flight drag without committing
            let keydown_cb = {
                let drag = drag.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    if e.key() == "Escape" {
                        let cancelled = drag.borrow_mut().take();
                        if cancelled.is_some() {
                            redraw();
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();

            let contextmenu_cb = {
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let resize_cb = {
                let canvas_r = canvas.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    fit_canvas_to_parent(&canvas_r);
                    redraw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            let draw_ref_cleanup = draw_ref_setup.clone();
            Box::new(move || {
                let _ = canvas
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "dblclick",
                    dblclick_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                *draw_ref_cleanup.borrow_mut() = None;
            }) as Box<dyn FnOnce()>
        });
    }

    // camera control buttons, anchored at the canvas centre
    let zoom_cb = |dir: ZoomDirection| {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let cx = canvas.width() as f64 * 0.5;
                let cy = canvas.height() as f64 * 0.5;
                camera.borrow_mut().zoom_step(cx, cy, dir);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };
    let center_cb: Callback<()> = {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let store = props.store.clone();
        let tile = props.tile;
        Callback::from(move |()| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                camera.borrow_mut().center_on(
                    store.dimensions(),
                    tile,
                    canvas.width() as f64,
                    canvas.height() as f64,
                );
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };

    html! {<div style="position:relative; width:100%; height:100%; overflow:hidden;">
        <canvas ref={canvas_ref.clone()} id="grid-canvas" style="display:block; width:100%; height:100%;"></canvas>
        <CameraControls on_zoom_in={zoom_cb(ZoomDirection::In)} on_zoom_out={zoom_cb(ZoomDirection::Out)} on_center={center_cb} />
    </div>}
}
