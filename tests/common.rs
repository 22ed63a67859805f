//! Common test utilities for building modules, nodes and canvases.
use area_canvas::prelude::*;
use serde_json::json;

/// A module descriptor declaring the given trigger and action types.
#[allow(dead_code)]
pub fn module(name: &str, triggers: &[&str], actions: &[&str]) -> ModuleDescriptor {
    let map = |keys: &[&str]| -> ValueMap { keys.iter().map(|k| (k.to_string(), json!({}))).collect() };
    ModuleDescriptor {
        name: name.to_string(),
        triggers: map(triggers),
        actions: map(actions),
        ..ModuleDescriptor::default()
    }
}

#[allow(dead_code)]
pub fn trigger_node(id: &str, label: &str, trigger_type: &str, center: Point) -> Node {
    Node::new(id, label, center).with_module(module("trigger", &[trigger_type], &[]))
}

#[allow(dead_code)]
pub fn action_node(id: &str, label: &str, action_type: &str, center: Point) -> Node {
    Node::new(id, label, center).with_module(module("action", &[], &[action_type]))
}

/// Connects the right port of `from` to the left port of `to`.
#[allow(dead_code)]
pub fn link(canvas: &mut Canvas, from: &str, to: &str) -> String {
    canvas
        .connect(
            PortRef::new(from, Side::Right, 0.0),
            PortRef::new(to, Side::Left, 0.0),
        )
        .expect("Failed to connect nodes")
}

/// Trigger `t1` feeding action `a1`.
///
/// Logic: `Trigger (cron.schedule)` -> `Action (core.debug_print)`
#[allow(dead_code)]
pub fn create_simple_canvas() -> Canvas {
    let mut canvas = Canvas::default();
    canvas
        .add_node(trigger_node("t1", "Trigger", "cron.schedule", Point::new(0.0, 0.0)))
        .unwrap();
    canvas
        .add_node(action_node("a1", "Action", "core.debug_print", Point::new(300.0, 0.0)))
        .unwrap();
    link(&mut canvas, "t1", "a1");
    canvas
}

/// A webhook trigger fanning out to two actions that join into a third.
#[allow(dead_code)]
pub fn create_diamond_canvas() -> Canvas {
    let mut canvas = Canvas::default();
    let mut hook = trigger_node("hook", "Incoming", "webhook.receive", Point::new(0.0, 0.0));
    hook.options.insert("path".to_string(), json!("/hooks/incoming"));
    hook.options.insert("secret".to_string(), json!("s3cr3t"));
    canvas.add_node(hook).unwrap();
    canvas
        .add_node(action_node("left", "Log", "core.debug_print", Point::new(300.0, -120.0)))
        .unwrap();
    canvas
        .add_node(action_node("right", "Mail", "gmail.send_email", Point::new(300.0, 120.0)))
        .unwrap();
    canvas
        .add_node(action_node("join", "Done", "core.debug_print", Point::new(600.0, 0.0)))
        .unwrap();
    link(&mut canvas, "hook", "left");
    link(&mut canvas, "hook", "right");
    link(&mut canvas, "left", "join");
    link(&mut canvas, "right", "join");
    canvas
}

/// Module list as served by `/modules`.
#[allow(dead_code)]
pub const MODULES_JSON: &str = r#"[
    {
        "name": "timer",
        "description": "Runs on a schedule",
        "triggers": {"cron.schedule": {"cron": "string"}},
        "options": {"cron": "*/5 * * * *"}
    },
    {
        "name": "debug",
        "actions": {"core.debug_print": {}},
        "inputs": {"message": ""}
    },
    {
        "name": "gmail",
        "triggers": {"gmail.new_email": {}},
        "actions": {"gmail.send_email": {}, "gmail.reply": {}}
    }
]"#;
