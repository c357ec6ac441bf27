use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::bridge::{self, FrameUpdate};
use crate::gesture::{PinchTracker, VideoMapping};
use crate::mesh::{mesh_points, DelaunayMesher, MeshCache, Triangulator};
use crate::model::{boundary_corners, click_to_canvas, SceneAction, SceneState};
use crate::util::clog;

use super::stats_panel::StatsPanel;

const BACKGROUND: &str = "#000000";
const FOREGROUND: &str = "#FFFFFF";
const DOT_RADIUS: f64 = 10.0;

#[derive(Properties, PartialEq, Clone)]
pub struct SceneViewProps {
    pub scene: UseReducerHandle<SceneState>,
    pub show_stats: bool,
}

#[function_component(SceneView)]
pub fn scene_view(props: &SceneViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let scene_ref = use_mut_ref(|| props.scene.clone());
    let tracker = use_mut_ref(PinchTracker::default);
    let mesh_cache = use_mut_ref(MeshCache::default);
    let triangle_count = use_state(|| 0usize);

    // Effect: on each version update, refresh scene_ref to the latest handle
    // then redraw. This is the only steady-state redraw trigger: the scene
    // repaints on discrete add events, not every animation frame.
    {
        let scene_ref = scene_ref.clone();
        let current_handle = props.scene.clone();
        let draw_ref_local = draw_ref.clone();
        let version = props.scene.version;
        use_effect_with(version, move |_| {
            *scene_ref.borrow_mut() = current_handle.clone();
            if let Some(f) = &*draw_ref_local.borrow() {
                f();
            }
            || ()
        });
    }

    // Main mount effect (canvas sizing, draw closure, events, frame sink)
    {
        let canvas_ref = canvas_ref.clone();
        let scene = props.scene.clone();
        let scene_ref_setup = scene_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        let tracker_setup = tracker.clone();
        let mesh_cache_setup = mesh_cache.clone();
        let triangle_count_setup = triangle_count.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");

            // Size the canvas once; the boundary rectangle is fixed for the
            // session even if the window is later resized.
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width.max(0.0) as u32);
            canvas.set_height(height.max(0.0) as u32);
            scene.dispatch(SceneAction::Configure {
                width: canvas.width() as f64,
                height: canvas.height() as f64,
            });

            // Draw closure: full repaint from current state.
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let scene_ref = scene_ref_setup.clone();
                let mesh_cache = mesh_cache_setup.clone();
                let triangle_count_draw = triangle_count_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let handle = scene_ref.borrow();
                    let state = (**handle).clone();

                    ctx.set_fill_style_str(BACKGROUND);
                    ctx.fill_rect(0.0, 0.0, state.canvas.width, state.canvas.height);

                    let corners = boundary_corners(state.canvas);
                    ctx.begin_path();
                    ctx.move_to(corners[0].x, corners[0].y);
                    for c in &corners[1..] {
                        ctx.line_to(c.x, c.y);
                    }
                    ctx.line_to(corners[0].x, corners[0].y);
                    ctx.set_stroke_style_str(FOREGROUND);
                    ctx.stroke();

                    ctx.set_fill_style_str(FOREGROUND);
                    for dot in &state.dots {
                        ctx.begin_path();
                        ctx.arc(dot.x, dot.y, DOT_RADIUS, 0.0, std::f64::consts::PI * 2.0)
                            .ok();
                        ctx.fill();
                    }

                    if !state.dots.is_empty() {
                        let points = mesh_points(state.canvas, &state.dots);
                        let mut cache = mesh_cache.borrow_mut();
                        match DelaunayMesher.triangulate(&points) {
                            Some(triangles) => {
                                cache.points = points;
                                cache.triangles = triangles;
                            }
                            None => {
                                // Degenerate input: keep stroking the last
                                // good mesh instead of dropping it.
                                clog("triangulation failed; keeping previous mesh");
                            }
                        }
                        ctx.set_stroke_style_str(FOREGROUND);
                        for tri in &cache.triangles {
                            ctx.begin_path();
                            ctx.move_to(cache.points[tri[0]].x, cache.points[tri[0]].y);
                            ctx.line_to(cache.points[tri[1]].x, cache.points[tri[1]].y);
                            ctx.line_to(cache.points[tri[2]].x, cache.points[tri[2]].y);
                            ctx.close_path();
                            ctx.stroke();
                        }
                        if *triangle_count_draw != cache.triangles.len() {
                            triangle_count_draw.set(cache.triangles.len());
                        }
                    } else if *triangle_count_draw != 0 {
                        triangle_count_draw.set(0);
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // Pointer clicks append a point directly.
            let click_cb = {
                let canvas_cc = canvas.clone();
                let scene_ref_cc = scene_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let rect = canvas_cc.get_bounding_client_rect();
                    let p = click_to_canvas(
                        e.client_x() as f64,
                        e.client_y() as f64,
                        rect.left(),
                        rect.top(),
                    );
                    let handle = scene_ref_cc.borrow().clone();
                    handle.dispatch(SceneAction::AddPoint(p));
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                .unwrap();

            // Detection frames arrive from the JS glue; the tracker turns
            // them into at most one point per pinch-close transition.
            {
                let tracker_fs = tracker_setup.clone();
                let scene_ref_fs = scene_ref_setup.clone();
                bridge::set_frame_sink(move |update: FrameUpdate| {
                    let emitted = tracker_fs.borrow_mut().observe(update.hand.as_ref());
                    if let Some(norm) = emitted {
                        let handle = scene_ref_fs.borrow().clone();
                        let mapping = VideoMapping {
                            canvas_width: handle.canvas.width,
                            video_width: update.video_width,
                            video_height: update.video_height,
                        };
                        let p = mapping.to_canvas(norm);
                        clog(&format!("pinch point at ({:.1}, {:.1})", p.x, p.y));
                        handle.dispatch(SceneAction::AddPoint(p));
                    }
                });
            }

            // Cleanup
            move || {
                bridge::clear_frame_sink();
                let _ = canvas
                    .remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _keep_alive = &click_cb;
            }
        });
    }

    let point_count = props.scene.dots.len();
    html! {<div style="position:relative; width:100vw; height:100vh;">
        <canvas ref={canvas_ref.clone()} id="mesh-canvas" style="display:block; width:100%; height:100%; cursor:crosshair;"></canvas>
        if props.show_stats {
            <StatsPanel points={point_count} triangles={*triangle_count} />
        }
    </div>}
}
