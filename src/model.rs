use crate::{
    anim::RotationMode,
    error::{ParavelError, ParavelResult},
    ids::{ElementId, LayerId},
};

/// Linear camera keyframe pair animated across the whole timeline. A
/// partially supplied camera object on the wire takes the remaining fields
/// from these defaults.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub initial_x: f64,
    pub initial_y: f64,
    pub initial_zoom: f64, // must be > 0 for sensible output
    pub final_x: f64,
    pub final_y: f64,
    pub final_zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_x: 0.0,
            initial_y: 0.0,
            initial_zoom: 1.0,
            final_x: 0.0,
            final_y: 0.0,
            final_zoom: 1.0,
        }
    }
}

/// Per-axis coupling between camera movement and a layer's screen position:
/// 0 is fully world-anchored, 1 is fully screen-anchored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxFactor {
    pub x: f64,
    pub y: f64,
}

impl Default for ParallaxFactor {
    fn default() -> Self {
        // New layers sit halfway between world and screen.
        Self { x: 0.5, y: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub vector_image_source: String, // opaque markup payload
    pub x: f64,                      // relative to layer center
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub width: f64, // intrinsic size
    pub height: f64,
    #[serde(default)]
    pub initial_rotation: f64, // degrees
    #[serde(default)]
    pub final_rotation: f64,
    #[serde(default = "default_transform_origin")]
    pub transform_origin_x: f64, // normalized pivot, 0..1 by convention
    #[serde(default = "default_transform_origin")]
    pub transform_origin_y: f64,
    #[serde(default)]
    pub rotation_animation_type: RotationMode,
    #[serde(default)]
    pub z_index: i32, // stacking within the layer
}

fn default_transform_origin() -> f64 {
    0.5
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub parallax_factor: ParallaxFactor,
    pub z_index: i32, // stacking among layers
    #[serde(default)]
    pub elements: Vec<Element>,
    pub is_visible: bool,
}

impl Layer {
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }
}

/// Root of a project. Every field is optional on the wire; missing fields
/// take the default document's values, so `{}` deserializes to
/// [`SceneDocument::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneDocument {
    pub composition_name: String,
    pub duration_in_frames: i64,
    pub fps: i64,
    pub width: i64,
    pub height: i64,
    pub background_color: String,
    pub camera: CameraConfig,
    pub layers: Vec<Layer>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            composition_name: "MyParallaxVideo".to_string(),
            duration_in_frames: 300,
            fps: 30,
            width: 1920,
            height: 1080,
            background_color: "#DDDDDD".to_string(),
            camera: CameraConfig::default(),
            layers: Vec::new(),
        }
    }
}

impl SceneDocument {
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    pub fn from_json_str(s: &str) -> ParavelResult<Self> {
        serde_json::from_str(s).map_err(|e| ParavelError::serde(e.to_string()))
    }

    pub fn to_json_string(&self) -> ParavelResult<String> {
        serde_json::to_string(self).map_err(|e| ParavelError::serde(e.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> ParavelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ParavelError::serde(e.to_string()))
    }

    /// Advisory bounds report for hosts. The editor and evaluator accept
    /// out-of-domain values without complaint; hosts that want to reject
    /// them call this at their boundary.
    pub fn validate(&self) -> ParavelResult<()> {
        if self.duration_in_frames < 1 {
            return Err(ParavelError::document("durationInFrames must be >= 1"));
        }
        if self.fps < 1 {
            return Err(ParavelError::document("fps must be >= 1"));
        }
        if self.width < 1 || self.height < 1 {
            return Err(ParavelError::document("width and height must be >= 1"));
        }
        if self.camera.initial_zoom <= 0.0 || self.camera.final_zoom <= 0.0 {
            return Err(ParavelError::document("camera zoom must be > 0"));
        }

        for layer in &self.layers {
            for element in &layer.elements {
                if element.scale <= 0.0 {
                    return Err(ParavelError::document(format!(
                        "element '{}' scale must be > 0",
                        element.id
                    )));
                }
                if element.width <= 0.0 || element.height <= 0.0 {
                    return Err(ParavelError::document(format!(
                        "element '{}' width and height must be > 0",
                        element.id
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_layer() -> SceneDocument {
        SceneDocument {
            layers: vec![Layer {
                id: LayerId::new("l0"),
                name: "Background".to_string(),
                parallax_factor: ParallaxFactor { x: 0.2, y: 0.2 },
                z_index: 0,
                elements: vec![Element {
                    id: ElementId::new("e0"),
                    name: "hill".to_string(),
                    vector_image_source: "<svg width=\"10\" height=\"10\"/>".to_string(),
                    x: 12.0,
                    y: -4.0,
                    scale: 1.5,
                    opacity: 0.9,
                    width: 10.0,
                    height: 10.0,
                    initial_rotation: 0.0,
                    final_rotation: 45.0,
                    transform_origin_x: 0.5,
                    transform_origin_y: 0.5,
                    rotation_animation_type: RotationMode::Easing,
                    z_index: 0,
                }],
                is_visible: true,
            }],
            ..SceneDocument::default()
        }
    }

    #[test]
    fn default_document_constants() {
        let doc = SceneDocument::default();
        assert_eq!(doc.composition_name, "MyParallaxVideo");
        assert_eq!(doc.duration_in_frames, 300);
        assert_eq!(doc.fps, 30);
        assert_eq!(doc.width, 1920);
        assert_eq!(doc.height, 1080);
        assert_eq!(doc.background_color, "#DDDDDD");
        assert_eq!(doc.camera.initial_zoom, 1.0);
        assert_eq!(doc.camera.final_zoom, 1.0);
        assert!(doc.layers.is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let doc = doc_with_layer();
        let s = doc.to_json_string_pretty().unwrap();
        let de = SceneDocument::from_json_str(&s).unwrap();
        assert_eq!(de, doc);
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let s = doc_with_layer().to_json_string().unwrap();
        for key in [
            "compositionName",
            "durationInFrames",
            "backgroundColor",
            "initialZoom",
            "parallaxFactor",
            "isVisible",
            "vectorImageSource",
            "initialRotation",
            "finalRotation",
            "transformOriginX",
            "transformOriginY",
            "rotationAnimationType",
            "zIndex",
        ] {
            assert!(s.contains(key), "missing wire key {key}");
        }
    }

    #[test]
    fn empty_object_is_the_default_document() {
        let de = SceneDocument::from_json_str("{}").unwrap();
        assert_eq!(de, SceneDocument::default());
    }

    #[test]
    fn sparse_element_takes_rotation_family_defaults() {
        let json = r#"{
            "layers": [{
                "id": "l0",
                "name": "Layer 1",
                "parallaxFactor": {"x": 0.5, "y": 0.5},
                "zIndex": 0,
                "isVisible": true,
                "elements": [{
                    "id": "e0",
                    "name": "cloud",
                    "vectorImageSource": "<svg/>",
                    "x": 0.0, "y": 0.0,
                    "scale": 1.0, "opacity": 1.0,
                    "width": 100.0, "height": 100.0
                }]
            }]
        }"#;
        let doc = SceneDocument::from_json_str(json).unwrap();
        let el = &doc.layers[0].elements[0];
        assert_eq!(el.initial_rotation, 0.0);
        assert_eq!(el.final_rotation, 0.0);
        assert_eq!(el.transform_origin_x, 0.5);
        assert_eq!(el.transform_origin_y, 0.5);
        assert_eq!(el.rotation_animation_type, RotationMode::Easing);
        assert_eq!(el.z_index, 0);
    }

    #[test]
    fn partial_camera_merges_over_camera_defaults() {
        let doc = SceneDocument::from_json_str(r#"{"camera": {"initialX": 5.0}}"#).unwrap();
        assert_eq!(doc.camera.initial_x, 5.0);
        assert_eq!(doc.camera.initial_zoom, 1.0);
        assert_eq!(doc.camera.final_zoom, 1.0);
    }

    #[test]
    fn finders_by_id() {
        let doc = doc_with_layer();
        let layer = doc.layer(&LayerId::new("l0")).unwrap();
        assert_eq!(layer.name, "Background");
        assert!(layer.element(&ElementId::new("e0")).is_some());
        assert!(layer.element(&ElementId::new("nope")).is_none());
        assert!(doc.layer(&LayerId::new("nope")).is_none());
    }

    #[test]
    fn validate_accepts_default_and_flags_out_of_domain() {
        assert!(SceneDocument::default().validate().is_ok());
        assert!(doc_with_layer().validate().is_ok());

        let mut doc = SceneDocument::default();
        doc.duration_in_frames = -5;
        assert!(doc.validate().is_err());

        let mut doc = doc_with_layer();
        doc.layers[0].elements[0].scale = 0.0;
        assert!(doc.validate().is_err());
    }
}
