use std::path::PathBuf;

use paravel::SceneDocument;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_paravel")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "paravel.exe"
            } else {
                "paravel"
            });
            p
        })
}

#[test]
fn cli_eval_writes_frame_json() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let doc_path = dir.join("scene.json");
    let out_path = dir.join("frame.json");
    let _ = std::fs::remove_file(&out_path);

    std::fs::write(&doc_path, include_str!("data/parallax_scene.json")).unwrap();

    let status = std::process::Command::new(bin_path())
        .args([
            "eval",
            "--in",
            doc_path.to_str().unwrap(),
            "--frame",
            "60",
            "--out",
            out_path.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let body = std::fs::read_to_string(&out_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["frame"], 60);
    assert!(v["camera"]["zoom"].is_f64());
    assert_eq!(v["drawList"].as_array().unwrap().len(), 5);
}

#[test]
fn cli_apply_folds_commands_into_a_document() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let doc_path = dir.join("start.json");
    let commands_path = dir.join("commands.json");
    let out_path = dir.join("applied.json");
    let _ = std::fs::remove_file(&out_path);

    std::fs::write(&doc_path, "{}").unwrap();
    std::fs::write(&commands_path, include_str!("data/edit_session.json")).unwrap();

    let status = std::process::Command::new(bin_path())
        .args([
            "apply",
            "--in",
            doc_path.to_str().unwrap(),
            "--commands",
            commands_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let body = std::fs::read_to_string(&out_path).unwrap();
    let doc: SceneDocument = serde_json::from_str(&body).unwrap();
    assert_eq!(doc.composition_name, "Retitled");
    assert_eq!(doc.layers.len(), 3);
}

#[test]
fn cli_init_emits_the_default_document() {
    let output = std::process::Command::new(bin_path())
        .arg("init")
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: SceneDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc, SceneDocument::default());
}
