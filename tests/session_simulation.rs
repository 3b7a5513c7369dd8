// tests/session_simulation.rs
// Walks a session through attach, stop, inspection and scene tree updates

use godot_debug_state::debugger::{
    DebugSession, EngineObject, LiveController, ObjectId, RawObject, SceneNode,
    SceneTreeProvider, Scope, StackFrame, Value, Variable,
};
use godot_debug_state::{DebugError, LaunchConfig};
use std::cell::RefCell;
use std::rc::Rc;

struct NullController;

impl LiveController for NullController {
    fn set_breakpoint(&mut self, _res_path: &str, _line: u32) {}
    fn remove_breakpoint(&mut self, _res_path: &str, _line: u32) {}
}

#[derive(Default)]
struct TreeRecorder {
    roots: Rc<RefCell<Vec<String>>>,
}

impl SceneTreeProvider for TreeRecorder {
    fn fill_tree(&mut self, tree: &SceneNode) {
        self.roots.borrow_mut().push(tree.label.clone());
    }
}

fn frames() -> Vec<StackFrame> {
    vec![
        StackFrame {
            file: "res://player.gd".to_string(),
            function: "_process".to_string(),
            line: 12,
            id: 0,
        },
        StackFrame {
            file: "res://ui/hud.gd".to_string(),
            function: "update".to_string(),
            line: 40,
            id: 1,
        },
        StackFrame {
            file: "res://player.gd".to_string(),
            function: "_ready".to_string(),
            line: 3,
            id: 2,
        },
    ]
}

#[cfg(test)]
mod simulation_tests {
    use super::*;

    #[test]
    fn test_stop_event_replaces_frames() {
        let mut session = DebugSession::with_project("/game/project.godot");
        session.set_stack_frames(frames());

        assert_eq!(session.stack_count, 3);
        assert_eq!(session.last_frame.as_ref().map(|f| f.line), Some(12));
        assert_eq!(session.stack_files, vec!["res://player.gd", "res://ui/hud.gd"]);
        assert_eq!(session.frame(1).map(|f| f.function.as_str()), Some("update"));

        session.set_stack_frames(vec![frames().remove(1)]);
        assert_eq!(session.stack_count, 1, "Frames are replaced wholesale");
        assert_eq!(session.stack_files, vec!["res://ui/hud.gd"]);

        session.clear_stack();
        assert!(session.last_frame.is_none());
        assert!(session.last_frames.is_empty());
    }

    #[test]
    fn test_frame_files_map_back_to_editor_paths() {
        let session = DebugSession::with_project("/game/project.godot");
        assert_eq!(session.local_path("res://ui/hud.gd"), "/game/ui/hud.gd");
    }

    #[test]
    fn test_local_path_without_project_normalizes_separators() {
        let session = DebugSession::new();
        assert_eq!(session.local_path("C:\\game\\ui\\hud.gd"), "C:/game/ui/hud.gd");
        assert_eq!(session.local_path("res://a.gd"), "res://a.gd");
    }

    #[test]
    fn test_stale_inspection_chunk_is_rejected() {
        let mut session = DebugSession::new();
        let first = session.begin_stack_inspection(3);
        let second = session.begin_stack_inspection(1);

        let result = session.receive_variables(first, Scope::Locals, vec![Variable::new("a", 1i64)]);
        assert!(matches!(result, Err(DebugError::StaleChunk { .. })));

        session
            .receive_variables(second, Scope::Locals, vec![Variable::new("b", 2i64)])
            .expect("current request");
        assert!(session.stack_vars().is_complete());
        assert_eq!(session.stack_vars().group(Scope::Locals)[0].name, "b");
        assert!(session.stack_vars().group(Scope::Members).is_empty());
    }

    #[test]
    fn test_inspection_feeds_variable_tree() {
        let mut session = DebugSession::new();
        let gen = session.begin_stack_inspection(2);

        let mut raw = RawObject::new("Resource");
        raw.insert("path", "res://icon.png");
        session
            .receive_variables(
                gen,
                Scope::Locals,
                vec![
                    Variable::new("speed", 2.5f64),
                    Variable::new("target", ObjectId(77)),
                ],
            )
            .unwrap();
        session
            .receive_variables(
                gen,
                Scope::Members,
                vec![Variable::new("res", raw).with_scope_path("self")],
            )
            .unwrap();

        let rendered: Vec<(String, String)> = session
            .stack_vars()
            .iter()
            .map(|v| (v.name.clone(), v.value.stringify_value()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("speed".to_string(), "2.5".to_string()),
                ("target".to_string(), "<77>".to_string()),
                ("res".to_string(), "Resource".to_string()),
            ]
        );

        let res = &session.stack_vars().group(Scope::Members)[0];
        assert_eq!(res.scope_path.as_deref(), Some("self"));
        assert_eq!(res.children()[0].name, "path");
    }

    #[test]
    fn test_scene_tree_forwarded_when_provider_attached() {
        let mut session = DebugSession::new();
        let mut tree = SceneNode::new("root", "Window", 1);
        let mut main = SceneNode::new("Main", "Node2D", 2);
        main.children.push(SceneNode::new("Player", "CharacterBody2D", 3));
        tree.children.push(main);

        // No provider yet: nothing happens
        session.update_scene_tree(&tree);

        let recorder = TreeRecorder::default();
        let roots = recorder.roots.clone();
        session.attach_scene_tree(Box::new(recorder));
        session.update_scene_tree(&tree);

        assert_eq!(*roots.borrow(), vec!["root".to_string()]);
        assert_eq!(tree.find_path(3), Some("/root/Main/Player".to_string()));
        assert_eq!(tree.find_path(99), None);
    }

    #[test]
    fn test_value_tree_nesting() {
        let nested = Value::Dictionary(vec![(
            Value::from("items"),
            Value::Array(vec![Value::from(ObjectId(5)), Value::Nil]),
        )]);
        let var = Variable::new("inventory", nested);

        let items = &var.children()[0];
        assert_eq!(items.name, "items");
        assert!(items.has_children());
        let grandchildren = items.children();
        assert_eq!(grandchildren.len(), 2);
        assert_eq!(grandchildren[0].children()[0].name, "id");
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LaunchConfig::from_json(r#"{"project": "/game"}"#).expect("valid config");
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 6007);
        assert_eq!(config.project_manifest().unwrap(), "/game/project.godot");
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            LaunchConfig::from_json("{not json"),
            Err(DebugError::InvalidConfig(_))
        ));
        assert!(matches!(
            LaunchConfig::from_json(r#"{"project": "  "}"#),
            Err(DebugError::MissingProject)
        ));
    }

    #[test]
    fn test_manifest_path_kept() {
        let config = LaunchConfig::new("/game/project.godot");
        assert_eq!(config.project_manifest().unwrap(), "/game/project.godot");
        let config = LaunchConfig::new("C:\\game\\project.godot");
        assert_eq!(config.project_manifest().unwrap(), "C:/game/project.godot");
    }

    #[test]
    fn test_manifest_suffix_in_name_is_a_directory() {
        let config = LaunchConfig::new("/games/myproject.godot");
        assert_eq!(
            config.project_manifest().unwrap(),
            "/games/myproject.godot/project.godot",
            "Only an exact project.godot component is the manifest"
        );

        let config = LaunchConfig::new("/games/game_project.godot/");
        assert_eq!(
            config.project_manifest().unwrap(),
            "/games/game_project.godot/project.godot"
        );
    }

    #[test]
    fn test_session_from_config_resolves_res_paths() {
        let config = LaunchConfig::new("/games/myproject.godot");
        let mut session = config.new_session().unwrap();
        session.attach_controller(Box::new(NullController));
        session.set_breakpoint("/games/myproject.godot/main.gd", 4);

        assert_eq!(
            session.get_breakpoint_string(),
            " --breakpoints \"res://main.gd:4\""
        );
    }
}
