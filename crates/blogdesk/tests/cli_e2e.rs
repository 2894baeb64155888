#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use axum::extract::{Path, Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// --- Stub server ---

#[derive(Clone, Default)]
struct Stub {
    blogs: Arc<Mutex<Vec<Value>>>,
}

type Reply = Result<Json<Value>, StatusCode>;

fn id_text(blog: &Value) -> String {
    match &blog["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Bearer jwt_token_here") => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn list(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    authorized(&headers)?;
    let search = query.get("search").cloned().unwrap_or_default().to_lowercase();
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);

    let matching: Vec<Value> = stub
        .blogs
        .lock()
        .unwrap()
        .iter()
        .filter(|b| {
            search.is_empty()
                || b["title"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&search)
        })
        .cloned()
        .collect();
    let data: Vec<Value> = matching
        .iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .cloned()
        .collect();

    Ok(Json(json!({
        "data": data,
        "total": matching.len(),
        "page": page,
        "limit": limit
    })))
}

async fn create(State(stub): State<Stub>, headers: HeaderMap, Json(mut body): Json<Value>) -> Reply {
    authorized(&headers)?;
    let mut blogs = stub.blogs.lock().unwrap();
    let id = blogs.iter().filter_map(|b| b["id"].as_i64()).max().unwrap_or(0) + 1;
    body["id"] = json!(id);
    blogs.push(body);
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    authorized(&headers)?;
    let mut blogs = stub.blogs.lock().unwrap();
    let blog = blogs
        .iter_mut()
        .find(|b| id_text(b) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *blog = body;
    Ok(Json(json!({ "success": true })))
}

async fn remove(State(stub): State<Stub>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorized(&headers)?;
    stub.blogs.lock().unwrap().retain(|b| id_text(b) != id);
    Ok(Json(json!({ "success": true })))
}

fn spawn_stub(blogs: Vec<Value>) -> String {
    let stub = Stub {
        blogs: Arc::new(Mutex::new(blogs)),
    };
    let router = Router::new()
        .route("/api/blogs", get(list).post(create))
        .route("/api/blogs/{id}", put(update).delete(remove))
        .with_state(stub);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{}/api", addr)
}

fn blog(id: i64, title: &str, date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "tags": "rust, cli",
        "summary": format!("All about {}", title),
        "date": date,
        "file_path": format!("posts/{}.md", title.to_lowercase())
    })
}

// --- Harness ---

struct Harness {
    dir: TempDir,
    base_url: String,
}

impl Harness {
    fn new(blogs: Vec<Value>) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            base_url: spawn_stub(blogs),
        }
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("session")
    }

    fn logged_in(self) -> Self {
        fs::write(self.session_file(), "jwt_token_here").unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("blogdesk"));
        cmd.env("BLOGDESK_BASE_URL", &self.base_url)
            .env("BLOGDESK_SESSION_FILE", self.session_file())
            .env_remove("BLOGDESK_TIMEOUT_SECS")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("blogdesk.toml"))
            .arg("--no-color");
        cmd
    }
}

// --- Session ---

#[test]
fn test_login_with_valid_credentials_persists_token() {
    let h = Harness::new(vec![]);

    h.cmd()
        .args(["login", "--username", "admin", "--password", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/blog-management"));

    assert_eq!(fs::read_to_string(h.session_file()).unwrap(), "jwt_token_here");
}

#[test]
fn test_login_with_wrong_password_fails() {
    let h = Harness::new(vec![]);

    h.cmd()
        .args(["login", "-u", "admin", "-P", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid credentials"));

    assert!(!h.session_file().exists());
}

#[test]
fn test_login_reads_credentials_from_stdin() {
    let h = Harness::new(vec![]);

    h.cmd()
        .arg("login")
        .write_stdin("admin\n12345\n")
        .assert()
        .success();

    assert!(h.session_file().exists());
}

#[test]
fn test_login_when_already_logged_in_redirects() {
    let h = Harness::new(vec![]).logged_in();

    h.cmd()
        .args(["login", "-u", "admin", "-P", "wrong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already logged in"));
}

#[test]
fn test_logout_clears_session() {
    let h = Harness::new(vec![]).logged_in();

    h.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("/login"));

    assert!(!h.session_file().exists());

    h.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

// --- Listing ---

#[test]
fn test_list_without_session_points_to_login() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]);

    h.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("blogdesk login"));
}

#[test]
fn test_list_renders_rows() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello"))
        .stdout(predicate::str::contains("1/1/2024"))
        .stdout(predicate::str::contains("Page").not());
}

#[test]
fn test_naked_invocation_lists() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello"));
}

#[test]
fn test_list_paginates_and_searches() {
    let blogs = (1..=15)
        .map(|i| blog(i, &format!("Post{}", i), &format!("2024-01-{:02}", i)))
        .collect();
    let h = Harness::new(blogs).logged_in();

    h.cmd()
        .args(["list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 of 2 (15 total)"))
        .stdout(predicate::str::contains("Post15"));

    h.cmd()
        .args(["list", "--search", "post1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Post12"))
        .stdout(predicate::str::contains("Post9").not());
}

#[test]
fn test_list_json_output() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    let output = h
        .cmd()
        .args(["list", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["rows"][0]["title"], "Hello");
    assert_eq!(view["pagination"]["total_count"], 1);
}

#[test]
fn test_expired_token_clears_session() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]);
    fs::write(h.session_file(), "stale").unwrap();

    h.cmd()
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Session expired"));

    assert!(!h.session_file().exists());
}

#[test]
fn test_unreachable_server_reports_fetch_failure() {
    let h = Harness::new(vec![]).logged_in();

    h.cmd()
        .args(["--base-url", "http://127.0.0.1:9/api", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Failed to fetch blogs"));
}

// --- Mutations ---

#[test]
fn test_add_then_listing_shows_it() {
    let h = Harness::new(vec![]).logged_in();

    h.cmd()
        .args([
            "add",
            "--title",
            "Fresh",
            "--summary",
            "New post",
            "--file-path",
            "fresh.md",
            "--date",
            "2024-02-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blog added"))
        .stdout(predicate::str::contains("2/3/2024"));
}

#[test]
fn test_add_without_required_field_fails() {
    let h = Harness::new(vec![]).logged_in();

    h.cmd()
        .args(["add", "--title", "Fresh", "--file-path", "fresh.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Summary is required"));
}

#[test]
fn test_edit_updates_record() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .args(["edit", "1", "--title", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blog updated"))
        .stdout(predicate::str::contains("Renamed"));
}

#[test]
fn test_delete_with_yes_confirms_and_refetches() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Are you sure you want to delete: \"Hello\"?"))
        .stdout(predicate::str::contains("Blog deleted"))
        .stdout(predicate::str::contains("No blogs found"));
}

#[test]
fn test_delete_without_yes_refuses_when_not_interactive() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    h.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello"));
}

#[test]
fn test_delete_addresses_zero_padded_text_id() {
    let mut padded = blog(0, "Padded", "2024-01-01");
    padded["id"] = json!("007");
    let h = Harness::new(vec![padded, blog(7, "Seven", "2024-01-02")]).logged_in();

    h.cmd()
        .args(["delete", "007", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete: \"Padded\"?"))
        .stdout(predicate::str::contains("Blog deleted"))
        .stdout(predicate::str::contains("Seven"))
        .stdout(predicate::str::contains("Padded").count(1));
}

#[test]
fn test_delete_unknown_id_fails() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .args(["delete", "42", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Blog not found: 42"));
}

// --- Shell & config ---

#[test]
fn test_shell_session() {
    let h = Harness::new(vec![blog(1, "Hello", "2024-01-01")]).logged_in();

    h.cmd()
        .arg("shell")
        .write_stdin("add\nset title Shell post\nset summary Typed\nset file_path s.md\nsave\ndelete 1\nconfirm\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Add New Blog"))
        .stdout(predicate::str::contains("Blog added"))
        .stdout(predicate::str::contains("Shell post"))
        .stdout(predicate::str::contains("Blog deleted"));
}

#[test]
fn test_config_shows_resolved_values() {
    let h = Harness::new(vec![]);

    h.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(h.base_url.as_str()))
        .stdout(predicate::str::contains("logged out"));
}
