use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trellis_cli::commands::routes::{
    self, collect_dir, extract_impl_target, extract_quoted, extract_quoted_pair, extract_verb,
    find_next_string, parse_blueprints_from_file,
};

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

// ── extract_impl_target ─────────────────────────────────────────────

#[test]
fn extracts_the_target_type() {
    assert_eq!(
        extract_impl_target("impl Blueprint for Users {"),
        Some("Users".to_string())
    );
}

#[test]
fn extracts_with_state_parameter() {
    assert_eq!(
        extract_impl_target("impl Blueprint<AppState> for Greet {"),
        Some("Greet".to_string())
    );
}

#[test]
fn tolerates_leading_indentation() {
    assert_eq!(
        extract_impl_target("    impl Blueprint for Users {"),
        Some("Users".to_string())
    );
}

#[test]
fn ignores_inherent_impls() {
    assert_eq!(extract_impl_target("impl Users {"), None);
}

#[test]
fn ignores_other_traits() {
    assert_eq!(extract_impl_target("impl Display for Users {"), None);
}

#[test]
fn requires_a_target() {
    assert_eq!(extract_impl_target("impl Blueprint {"), None);
}

// ── extract_verb ────────────────────────────────────────────────────

#[test]
fn extracts_the_verb() {
    assert_eq!(extract_verb("        Verb::Post"), Some("POST".to_string()));
}

#[test]
fn uppercases_the_verb() {
    assert_eq!(extract_verb("Verb::Delete"), Some("DELETE".to_string()));
}

#[test]
fn verb_stops_at_punctuation() {
    assert_eq!(extract_verb("Some(Verb::Put)"), Some("PUT".to_string()));
}

#[test]
fn no_verb_without_marker() {
    assert_eq!(extract_verb("fn verb(&self)"), None);
}

// ── extract_quoted ──────────────────────────────────────────────────

#[test]
fn extracts_a_quoted_string() {
    assert_eq!(extract_quoted(r#"        "users""#), Some("users".to_string()));
}

#[test]
fn no_string_without_quotes() {
    assert_eq!(extract_quoted("fn ident(&self)"), None);
}

#[test]
fn extracts_a_controller_pair() {
    assert_eq!(
        extract_quoted_pair(r#"Some(Action::controller("UserController", "show"))"#),
        Some(("UserController".to_string(), "show".to_string()))
    );
}

#[test]
fn pair_requires_two_strings() {
    assert_eq!(extract_quoted_pair(r#"Action::named("list")"#), None);
}

// ── find_next_string ────────────────────────────────────────────────

#[test]
fn finds_on_the_following_line() {
    let lines = ["fn ident(&self) -> &str {", r#"    "users""#, "}"];
    assert_eq!(find_next_string(&lines, 0), Some("users".to_string()));
}

#[test]
fn finds_on_the_same_line() {
    let lines = [r#"fn ident(&self) -> &str { "users" }"#];
    assert_eq!(find_next_string(&lines, 0), Some("users".to_string()));
}

#[test]
fn gives_up_beyond_the_window() {
    let lines = ["fn ident(&self) -> &str {", "", "", "", r#""far""#];
    assert_eq!(find_next_string(&lines, 0), None);
}

// ── parse_blueprints_from_file ──────────────────────────────────────

#[test]
fn parses_a_leaf_blueprint() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("users.rs");
    fs::write(
        &file_path,
        r#"
use trellis::prelude::*;

pub struct Users;

impl Blueprint for Users {
    fn ident(&self) -> &str {
        "users"
    }

    fn verb(&self) -> Verb {
        Verb::Post
    }

    fn action(&self) -> Option<Action> {
        Some(Action::named("store"))
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Users");
    assert_eq!(rows[0].ident, "users");
    assert_eq!(rows[0].verb, "POST");
    assert_eq!(rows[0].action, "store");
    assert!(!rows[0].is_group);
    assert_eq!(rows[0].file, "users.rs");
    assert_eq!(rows[0].line, 6);
}

#[test]
fn parses_controller_actions() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("users.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for Users {
    fn ident(&self) -> &str {
        "users"
    }

    fn action(&self) -> Option<Action> {
        Some(Action::controller("UserController", "show"))
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, "UserController::show");
}

#[test]
fn marks_groups() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("admin.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for Admin {
    fn ident(&self) -> &str {
        "admin"
    }

    fn children(&self) -> Vec<Box<dyn Blueprint>> {
        vec![Box::new(Dashboard)]
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_group);
}

#[test]
fn marks_inline_endpoints() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("ping.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for Ping {
    fn ident(&self) -> &str {
        "ping"
    }

    fn endpoint(&self) -> Option<MethodRouter> {
        Some(get(|| async { "pong" }))
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows[0].action, "<inline>");
}

#[test]
fn named_action_beats_the_inline_marker() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("ping.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for Ping {
    fn endpoint(&self) -> Option<MethodRouter> {
        Some(get(|| async { "pong" }))
    }

    fn action(&self) -> Option<Action> {
        Some(Action::named("ping"))
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows[0].action, "ping");
}

#[test]
fn parses_two_blueprints_in_one_file() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("routes.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for First {
    fn ident(&self) -> &str {
        "first"
    }
}

impl Blueprint for Second {
    fn ident(&self) -> &str {
        "second"
    }

    fn children(&self) -> Vec<Box<dyn Blueprint>> {
        vec![Box::new(First)]
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "First");
    assert_eq!(rows[0].ident, "first");
    assert!(!rows[0].is_group);
    assert_eq!(rows[1].name, "Second");
    assert_eq!(rows[1].ident, "second");
    assert!(rows[1].is_group);
}

#[test]
fn defaults_without_overrides() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("bare.rs");
    fs::write(
        &file_path,
        r#"
impl Blueprint for Bare {
    fn ident(&self) -> &str {
        "bare"
    }
}
"#,
    )
    .unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows[0].verb, "GET");
    assert!(rows[0].action.is_empty());
    assert!(!rows[0].is_group);
}

#[test]
fn ident_defaults_to_the_type_name() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("bare.rs");
    fs::write(&file_path, "impl Blueprint for Bare {}\n").unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ident, "Bare");
}

#[test]
fn parses_empty_file() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("empty.rs");
    fs::write(&file_path, "// nothing declared\n").unwrap();

    let mut rows = Vec::new();
    parse_blueprints_from_file(&file_path, &mut rows).unwrap();

    assert!(rows.is_empty());
}

// ── collect_dir ─────────────────────────────────────────────────────

#[test]
fn walks_nested_directories() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("admin")).unwrap();
    fs::write(
        tmp.path().join("users.rs"),
        "impl Blueprint for Users {}\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("admin/dashboard.rs"),
        "impl Blueprint for Dashboard {}\n",
    )
    .unwrap();
    // mod.rs and non-Rust files are skipped
    fs::write(tmp.path().join("mod.rs"), "impl Blueprint for Fake {}\n").unwrap();
    fs::write(tmp.path().join("notes.txt"), "impl Blueprint for Fake {}\n").unwrap();

    let mut rows = Vec::new();
    collect_dir(tmp.path(), &mut rows).unwrap();

    let mut names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Dashboard", "Users"]);
}

// ── routes::run() integration ───────────────────────────────────────

#[test]
#[serial]
fn routes_run_empty_dir() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/blueprints").unwrap();

    assert!(routes::run().is_ok());
}

#[test]
#[serial]
fn routes_run_missing_blueprints_dir() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    let result = routes::run();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
#[serial]
fn routes_run_with_blueprints() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/blueprints").unwrap();
    fs::write(
        "src/blueprints/users.rs",
        r#"
impl Blueprint for Users {
    fn ident(&self) -> &str {
        "users"
    }
}
"#,
    )
    .unwrap();
    fs::write("src/blueprints/mod.rs", "pub mod users;\n").unwrap();

    assert!(routes::run().is_ok());
}

#[test]
#[serial]
fn routes_run_respects_config_dir() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("trellis.yaml", "blueprint_dir: defs\n").unwrap();
    fs::create_dir_all("defs").unwrap();
    fs::write("defs/users.rs", "impl Blueprint for Users {}\n").unwrap();

    assert!(routes::run().is_ok());
}
