use crate::{
    anim::RotationMode,
    assets,
    ids::{ElementId, LayerId},
    model::{CameraConfig, Element, Layer, ParallaxFactor, SceneDocument},
};

/// A scene document plus the session's selection. Commands produce a new
/// state value; the input state is never mutated, so hosts may keep old
/// snapshots around freely. Selection is session state and never crosses
/// the wire; only the document does.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    pub document: SceneDocument,
    pub selected_layer_id: Option<LayerId>,
    pub selected_element_id: Option<ElementId>,
}

/// Editing operations. Every command is total: payloads addressing ids that
/// no longer exist degrade to no-ops instead of failing, so hosts racing
/// against stale selections stay safe. Serialized form is
/// `{"type": "...", "payload": {...}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Replace the whole document; selection resets to none. Missing wire
    /// fields were already merged over defaults at deserialization.
    ReplaceDocument(SceneDocument),
    /// Shallow-merge global settings fields. No bounds checking here; hosts
    /// own numeric sanity.
    UpdateGlobalSettings(GlobalSettingsPatch),
    /// Shallow-merge camera keyframe fields.
    UpdateCamera(CameraPatch),
    /// Append a new layer built from defaults plus the given overrides,
    /// select it, and clear element selection.
    AddLayer(LayerPatch),
    /// Remove a layer; clears both selections if it was the selected one.
    RemoveLayer { layer_id: LayerId },
    /// Shallow-merge layer fields. Id and elements are not patchable.
    UpdateLayerProperties {
        layer_id: LayerId,
        properties: LayerPatch,
    },
    /// Set the layer selection; always clears element selection.
    SelectLayer { layer_id: Option<LayerId> },
    /// Append a new element to a layer and select it.
    AddElementToLayer {
        layer_id: LayerId,
        element: ElementInit,
    },
    /// Remove an element; clears element selection if it matched.
    RemoveElement {
        layer_id: LayerId,
        element_id: ElementId,
    },
    /// Shallow-merge element fields. Id is not patchable.
    UpdateElementProperties {
        layer_id: LayerId,
        element_id: ElementId,
        properties: ElementPatch,
    },
    /// Set the element selection. Membership in the selected layer is not
    /// validated; SelectLayer clears element selection but not vice versa.
    SelectElement { element_id: Option<ElementId> },
    /// Move a layer to a new position and renumber every layer's zIndex to
    /// its resulting position. Out-of-bounds or equal indices are ignored.
    ReorderLayers { old_index: usize, new_index: usize },
}

impl Command {
    /// Wire tag of this command, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReplaceDocument(_) => "REPLACE_DOCUMENT",
            Self::UpdateGlobalSettings(_) => "UPDATE_GLOBAL_SETTINGS",
            Self::UpdateCamera(_) => "UPDATE_CAMERA",
            Self::AddLayer(_) => "ADD_LAYER",
            Self::RemoveLayer { .. } => "REMOVE_LAYER",
            Self::UpdateLayerProperties { .. } => "UPDATE_LAYER_PROPERTIES",
            Self::SelectLayer { .. } => "SELECT_LAYER",
            Self::AddElementToLayer { .. } => "ADD_ELEMENT_TO_LAYER",
            Self::RemoveElement { .. } => "REMOVE_ELEMENT",
            Self::UpdateElementProperties { .. } => "UPDATE_ELEMENT_PROPERTIES",
            Self::SelectElement { .. } => "SELECT_ELEMENT",
            Self::ReorderLayers { .. } => "REORDER_LAYERS",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl GlobalSettingsPatch {
    fn apply_to(self, doc: &mut SceneDocument) {
        if let Some(v) = self.composition_name {
            doc.composition_name = v;
        }
        if let Some(v) = self.duration_in_frames {
            doc.duration_in_frames = v;
        }
        if let Some(v) = self.fps {
            doc.fps = v;
        }
        if let Some(v) = self.width {
            doc.width = v;
        }
        if let Some(v) = self.height {
            doc.height = v;
        }
        if let Some(v) = self.background_color {
            doc.background_color = v;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_zoom: Option<f64>,
}

impl CameraPatch {
    fn apply_to(self, camera: &mut CameraConfig) {
        if let Some(v) = self.initial_x {
            camera.initial_x = v;
        }
        if let Some(v) = self.initial_y {
            camera.initial_y = v;
        }
        if let Some(v) = self.initial_zoom {
            camera.initial_zoom = v;
        }
        if let Some(v) = self.final_x {
            camera.final_x = v;
        }
        if let Some(v) = self.final_y {
            camera.final_y = v;
        }
        if let Some(v) = self.final_zoom {
            camera.final_zoom = v;
        }
    }
}

/// Partial layer fields: overrides for `AddLayer`, updates for
/// `UpdateLayerProperties`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallax_factor: Option<ParallaxFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl LayerPatch {
    fn apply_to(self, layer: &mut Layer) {
        if let Some(v) = self.name {
            layer.name = v;
        }
        if let Some(v) = self.parallax_factor {
            layer.parallax_factor = v;
        }
        if let Some(v) = self.z_index {
            layer.z_index = v;
        }
        if let Some(v) = self.is_visible {
            layer.is_visible = v;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_image_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_animation_type: Option<RotationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl ElementPatch {
    fn apply_to(self, element: &mut Element) {
        if let Some(v) = self.name {
            element.name = v;
        }
        if let Some(v) = self.vector_image_source {
            element.vector_image_source = v;
        }
        if let Some(v) = self.x {
            element.x = v;
        }
        if let Some(v) = self.y {
            element.y = v;
        }
        if let Some(v) = self.scale {
            element.scale = v;
        }
        if let Some(v) = self.opacity {
            element.opacity = v;
        }
        if let Some(v) = self.width {
            element.width = v;
        }
        if let Some(v) = self.height {
            element.height = v;
        }
        if let Some(v) = self.initial_rotation {
            element.initial_rotation = v;
        }
        if let Some(v) = self.final_rotation {
            element.final_rotation = v;
        }
        if let Some(v) = self.transform_origin_x {
            element.transform_origin_x = v;
        }
        if let Some(v) = self.transform_origin_y {
            element.transform_origin_y = v;
        }
        if let Some(v) = self.rotation_animation_type {
            element.rotation_animation_type = v;
        }
        if let Some(v) = self.z_index {
            element.z_index = v;
        }
    }
}

/// Element fields for `AddElementToLayer`; the editor assigns the id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementInit {
    pub name: String,
    pub vector_image_source: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub width: f64,
    pub height: f64,
    pub initial_rotation: f64,
    pub final_rotation: f64,
    pub transform_origin_x: f64,
    pub transform_origin_y: f64,
    pub rotation_animation_type: RotationMode,
    pub z_index: i32,
}

impl Default for ElementInit {
    fn default() -> Self {
        Self {
            name: String::new(),
            vector_image_source: String::new(),
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            opacity: 1.0,
            width: assets::FALLBACK_SIZE,
            height: assets::FALLBACK_SIZE,
            initial_rotation: 0.0,
            final_rotation: 0.0,
            transform_origin_x: 0.5,
            transform_origin_y: 0.5,
            rotation_animation_type: RotationMode::Easing,
            z_index: 0,
        }
    }
}

impl ElementInit {
    /// Build an init payload from raw vector markup, taking width/height
    /// from the markup's nominal size.
    pub fn from_vector_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let (width, height) = assets::vector_intrinsic_size(&source);
        Self {
            name: name.into(),
            vector_image_source: source,
            width,
            height,
            ..Self::default()
        }
    }

    fn into_element(self, id: ElementId) -> Element {
        Element {
            id,
            name: self.name,
            vector_image_source: self.vector_image_source,
            x: self.x,
            y: self.y,
            scale: self.scale,
            opacity: self.opacity,
            width: self.width,
            height: self.height,
            initial_rotation: self.initial_rotation,
            final_rotation: self.final_rotation,
            transform_origin_x: self.transform_origin_x,
            transform_origin_y: self.transform_origin_y,
            rotation_animation_type: self.rotation_animation_type,
            z_index: self.z_index,
        }
    }
}

impl EditorState {
    /// Apply one command and return the next state. Pure: `self` is left
    /// untouched.
    #[tracing::instrument(skip(self, command), fields(kind = command.kind()))]
    pub fn apply(&self, command: Command) -> EditorState {
        let mut next = self.clone();
        match command {
            Command::ReplaceDocument(doc) => {
                next.document = doc;
                next.selected_layer_id = None;
                next.selected_element_id = None;
            }
            Command::UpdateGlobalSettings(patch) => {
                patch.apply_to(&mut next.document);
            }
            Command::UpdateCamera(patch) => {
                patch.apply_to(&mut next.document.camera);
            }
            Command::AddLayer(overrides) => {
                let id = LayerId::fresh();
                let count = next.document.layers.len();
                let mut layer = Layer {
                    id: id.clone(),
                    name: format!("Layer {}", count + 1),
                    parallax_factor: ParallaxFactor::default(),
                    z_index: count as i32,
                    elements: Vec::new(),
                    is_visible: true,
                };
                overrides.apply_to(&mut layer);
                next.document.layers.push(layer);
                next.selected_layer_id = Some(id);
                next.selected_element_id = None;
            }
            Command::RemoveLayer { layer_id } => {
                next.document.layers.retain(|l| l.id != layer_id);
                if next.selected_layer_id.as_ref() == Some(&layer_id) {
                    next.selected_layer_id = None;
                    next.selected_element_id = None;
                }
            }
            Command::UpdateLayerProperties {
                layer_id,
                properties,
            } => {
                if let Some(layer) = next.document.layer_mut(&layer_id) {
                    properties.apply_to(layer);
                }
            }
            Command::SelectLayer { layer_id } => {
                next.selected_layer_id = layer_id;
                next.selected_element_id = None;
            }
            Command::AddElementToLayer { layer_id, element } => {
                if let Some(layer) = next.document.layer_mut(&layer_id) {
                    let id = ElementId::fresh();
                    layer.elements.push(element.into_element(id.clone()));
                    next.selected_element_id = Some(id);
                }
            }
            Command::RemoveElement {
                layer_id,
                element_id,
            } => {
                if let Some(layer) = next.document.layer_mut(&layer_id) {
                    layer.elements.retain(|e| e.id != element_id);
                    if next.selected_element_id.as_ref() == Some(&element_id) {
                        next.selected_element_id = None;
                    }
                }
            }
            Command::UpdateElementProperties {
                layer_id,
                element_id,
                properties,
            } => {
                if let Some(element) = next
                    .document
                    .layer_mut(&layer_id)
                    .and_then(|l| l.element_mut(&element_id))
                {
                    properties.apply_to(element);
                }
            }
            Command::SelectElement { element_id } => {
                next.selected_element_id = element_id;
            }
            Command::ReorderLayers {
                old_index,
                new_index,
            } => {
                let len = next.document.layers.len();
                if old_index != new_index && old_index < len && new_index < len {
                    let layer = next.document.layers.remove(old_index);
                    next.document.layers.insert(new_index, layer);
                    for (position, layer) in next.document.layers.iter_mut().enumerate() {
                        layer.z_index = position as i32;
                    }
                }
            }
        }
        next
    }
}
