use crate::{
    anim::{ease, lerp, timeline_progress},
    core::{Affine, FrameIndex, Point, Vec2},
    ids::{ElementId, LayerId},
    model::{CameraConfig, Element, Layer, ParallaxFactor, SceneDocument},
};

/// Interpolated camera state at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraPose {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// One element ready to draw: its full screen transform and stacking slot
/// in the list. The transform maps element-local coordinates
/// ([0,width] x [0,height]) to screen pixels.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawItem {
    pub element_id: ElementId,
    pub layer_id: LayerId,
    pub transform: Affine,
    pub opacity: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub camera: CameraPose,
    pub draw_list: Vec<DrawItem>,
}

/// Camera pose at normalized progress t: position moves linearly, zoom
/// follows the fixed smoothing curve.
pub fn camera_pose(camera: &CameraConfig, t: f64) -> CameraPose {
    CameraPose {
        x: lerp(camera.initial_x, camera.final_x, t),
        y: lerp(camera.initial_y, camera.final_y, t),
        zoom: lerp(camera.initial_zoom, camera.final_zoom, ease(t)),
    }
}

/// Per-axis screen offset of a layer under the current camera:
/// `-camera * (1 - factor)`. Factor 0 counter-moves by the full camera
/// translation (world-anchored), factor 1 pins the layer to the screen.
pub fn parallax_offset(pose: &CameraPose, factor: ParallaxFactor) -> Vec2 {
    Vec2::new(-pose.x * (1.0 - factor.x), -pose.y * (1.0 - factor.y))
}

/// Interpolated rotation of an element at progress t, in degrees.
pub fn rotation_degrees(element: &Element, t: f64) -> f64 {
    let progress = element.rotation_animation_type.apply(t);
    lerp(element.initial_rotation, element.final_rotation, progress)
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate one frame of a document. Total: out-of-range frames clamp
    /// through progress and out-of-domain documents still produce output,
    /// so there is no error path.
    #[tracing::instrument(skip(doc))]
    pub fn eval_frame(doc: &SceneDocument, frame: FrameIndex) -> EvaluatedFrame {
        let t = timeline_progress(frame, doc.duration_in_frames);
        let camera = camera_pose(&doc.camera, t);
        let center = Point::new(doc.width as f64 / 2.0, doc.height as f64 / 2.0);

        let mut layers: Vec<&Layer> = doc.layers.iter().filter(|l| l.is_visible).collect();
        // Stable sort: equal z keeps collection order.
        layers.sort_by_key(|l| l.z_index);

        let mut draw_list = Vec::new();
        for layer in layers {
            let offset = parallax_offset(&camera, layer.parallax_factor);

            let mut elements: Vec<&Element> = layer.elements.iter().collect();
            elements.sort_by_key(|e| e.z_index);

            for element in elements {
                draw_list.push(DrawItem {
                    element_id: element.id.clone(),
                    layer_id: layer.id.clone(),
                    transform: element_transform(element, &camera, offset, center, t),
                    opacity: element.opacity,
                });
            }
        }

        EvaluatedFrame {
            frame,
            camera,
            draw_list,
        }
    }
}

/// Screen transform of one element. The element box rides the camera as a
/// whole: its center lands at canvas_center + zoom * (position + offset),
/// while rotation and scale are conjugated about the element's own pivot.
/// With a centered pivot the box center is exact under any rotation.
fn element_transform(
    element: &Element,
    camera: &CameraPose,
    offset: Vec2,
    center: Point,
    t: f64,
) -> Affine {
    let rotation = rotation_degrees(element, t).to_radians();
    let pivot = Vec2::new(
        element.transform_origin_x * element.width,
        element.transform_origin_y * element.height,
    );
    let box_center = Vec2::new(element.width / 2.0, element.height / 2.0);
    let target = Vec2::new(
        center.x + camera.zoom * (element.x + offset.x),
        center.y + camera.zoom * (element.y + offset.y),
    );

    let place = Affine::translate(target - box_center);
    let local = Affine::translate(pivot)
        * Affine::rotate(rotation)
        * Affine::scale(element.scale * camera.zoom)
        * Affine::translate(-pivot);
    place * local
}
