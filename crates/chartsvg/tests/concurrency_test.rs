use chartsvg::{Failure, Renderer, Viewport};
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn renderer_and_failures_are_thread_safe() {
    assert_send_sync::<Renderer>();
    assert_send_sync::<Failure>();
}

fn widgets() -> Vec<Value> {
    let labels = json!(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    let mut out: Vec<Value> = [
        "line",
        "bar",
        "pie",
        "doughnut",
        "radar",
        "polarArea",
    ]
    .iter()
    .map(|kind| {
        json!({
            "widgetType": format!("chart.js/{kind}"),
            "data": {
                "labels": labels,
                "datasets": [
                    { "label": "A", "data": [3, 7, 4, 9, 6, 2], "tension": 0.4 },
                    { "label": "B", "data": [5, 2, 8, 1, 4, 7], "backgroundColor": "rgba(255,0,0,0.5)" }
                ]
            },
            "props": { "title": format!("{kind} chart") }
        })
    })
    .collect();
    out.push(json!({
        "widgetType": "chart.js/scatter",
        "data": {
            "datasets": [
                { "label": "pts", "data": [{ "x": 1, "y": 2 }, { "x": 2.5, "y": 0.5 }, 4] }
            ]
        }
    }));
    out
}

#[test]
fn parallel_renders_match_the_sequential_render_byte_for_byte() {
    let renderer = Arc::new(Renderer::new());
    let widgets = Arc::new(widgets());
    let viewport = Viewport::new(800, 500, 100);

    let expected: Vec<String> = widgets
        .iter()
        .map(|w| renderer.convert_widget(w, viewport).expect("sequential render"))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let renderer = Arc::clone(&renderer);
            let widgets = Arc::clone(&widgets);
            thread::spawn(move || {
                widgets
                    .iter()
                    .map(|w| renderer.convert_widget(w, viewport).expect("parallel render"))
                    .collect::<Vec<String>>()
            })
        })
        .collect();

    for handle in handles {
        let got = handle.join().expect("render thread");
        assert_eq!(got, expected);
    }
}
