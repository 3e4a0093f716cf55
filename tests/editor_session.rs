use paravel::{Command, EditorState, ParallaxFactor, RotationMode};

#[test]
fn command_stream_replays_into_expected_document() {
    let s = include_str!("data/edit_session.json");
    let commands: Vec<Command> = serde_json::from_str(s).unwrap();
    assert_eq!(commands.len(), 12);

    let mut state = EditorState::default();
    for command in commands {
        state = state.apply(command);
    }

    let doc = &state.document;
    assert_eq!(doc.composition_name, "Retitled");
    assert_eq!(doc.duration_in_frames, 90);
    assert_eq!(doc.fps, 30);
    assert_eq!(doc.camera.final_x, 64.0);
    assert_eq!(doc.camera.final_zoom, 1.25);
    assert_eq!(doc.camera.initial_x, 0.0);

    assert_eq!(doc.layers.len(), 3);

    // The reorder moved the overlay in front and renumbered both survivors.
    let overlay = &doc.layers[0];
    assert_eq!(overlay.id.as_str(), "overlay");
    assert_eq!(overlay.name, "Overlay (dim)");
    assert!(!overlay.is_visible);
    assert_eq!(overlay.z_index, 0);

    let base = &doc.layers[1];
    assert_eq!(base.id.as_str(), "base");
    assert_eq!(base.z_index, 1);
    assert_eq!(base.elements.len(), 2);

    let hero = &base.elements[0];
    assert_eq!(hero.id.as_str(), "hero");
    assert_eq!(hero.opacity, 0.8);
    assert_eq!(hero.final_rotation, 45.0);
    assert_eq!(hero.rotation_animation_type, RotationMode::Spring);
    assert_eq!(hero.x, 0.0);

    let badge = &base.elements[1];
    assert_eq!(badge.name, "Badge");
    assert_eq!(badge.x, 120.0);
    assert_eq!(badge.width, 64.0);
    assert_eq!(badge.scale, 1.0);
    assert!(!badge.id.as_str().is_empty());

    let vignette = &doc.layers[2];
    assert_eq!(vignette.name, "Vignette");
    assert_eq!(vignette.z_index, 2);
    assert_eq!(vignette.parallax_factor, ParallaxFactor { x: 1.0, y: 1.0 });
    assert!(vignette.elements.is_empty());
    assert!(!vignette.id.as_str().is_empty());

    // The added layer took the selection; the trailing SELECT_ELEMENT null
    // left element selection empty.
    assert_eq!(state.selected_layer_id, Some(vignette.id.clone()));
    assert_eq!(state.selected_element_id, None);
}
