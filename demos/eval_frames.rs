use paravel::{Evaluator, FrameIndex, SceneDocument};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/parallax_scene.json");
    let doc: SceneDocument = serde_json::from_str(s)?;

    for f in [0i64, 1, 30, 60, 119] {
        let out = Evaluator::eval_frame(&doc, FrameIndex(f));
        println!(
            "frame {f}: camera ({:.1}, {:.1}) zoom {:.2}, {} draw items",
            out.camera.x,
            out.camera.y,
            out.camera.zoom,
            out.draw_list.len()
        );
    }

    Ok(())
}
