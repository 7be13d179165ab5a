use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

fn pdm_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pdm"))
}

/// Run `pdm` inside `dir`, isolated from the caller's settings: the user
/// config directory points into `dir` and no `PDM_*` variables are inherited.
fn run(dir: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    run_with_env(dir, args, stdin, &[])
}

fn run_with_env(dir: &Path, args: &[&str], stdin: Option<&str>, env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(pdm_binary());
    command
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("PDM_") {
            command.env_remove(key);
        }
    }
    command.envs(env.iter().copied());

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut handle = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            handle.write_all(input.as_bytes()).unwrap();
        }
    }

    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const ROWS: &str = r#"[
    {"id": "c3", "author_name": "Cy", "content": "Agreed.", "created_at": "2025-01-07T08:00:00Z", "parent_id": "c1", "is_visible": true},
    {"id": "c2", "author_name": "", "content": "Why $x^2$?", "created_at": "2025-01-06T08:00:00Z", "parent_id": "c1", "is_visible": true},
    {"id": "c1", "author_name": "Ada", "content": "Nice chapter.", "created_at": "2025-01-05T08:00:00Z", "parent_id": null, "is_visible": true}
]"#;

#[test]
fn thread_prints_outline() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rows.json"), ROWS).unwrap();

    let output = run(dir.path(), &["thread", "rows.json"], None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    insta::assert_snapshot!(stdout(&output).trim_end(), @r"
    Comments (3)
    - Ada · Jan 5, 2025, 08:00 AM
      Nice chapter.
      - Anonymous · Jan 6, 2025, 08:00 AM
        Why ⟨x^2⟩?
      - Cy · Jan 7, 2025, 08:00 AM
        Agreed.
    ");
}

#[test]
fn thread_reads_stdin_and_prints_json() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["thread", "--json"], Some(ROWS));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let forest: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(forest.as_array().unwrap().len(), 1);
    assert_eq!(forest[0]["id"], "c1");
    assert_eq!(forest[0]["replies"][0]["id"], "c2");
    assert_eq!(forest[0]["replies"][1]["id"], "c3");
}

#[test]
fn thread_with_reactions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rows.json"), ROWS).unwrap();
    std::fs::write(
        dir.path().join("reactions.json"),
        r#"[
            {"comment_id": "c1", "visitor_id": "v_a", "reaction": 1},
            {"comment_id": "c1", "visitor_id": "v_b", "reaction": -1}
        ]"#,
    )
    .unwrap();

    let output = run(
        dir.path(),
        &[
            "thread",
            "rows.json",
            "--reactions",
            "reactions.json",
            "--visitor",
            "v_b",
        ],
        None,
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("- Ada · Jan 5, 2025, 08:00 AM [+1 -1, you -]"));
}

#[test]
fn thread_rejects_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["thread"], Some("{not json"));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse comment rows"));
}

#[test]
fn tokenize_prints_segments() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["tokenize", "a $x$ b"], None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let segments: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        segments,
        serde_json::json!([
            {"kind": "text", "value": "a "},
            {"kind": "inlineMath", "expression": "x"},
            {"kind": "text", "value": " b"},
        ])
    );
}

#[test]
fn notify_skipped_without_key() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["notify"],
        Some(r#"{"author_name": "Ada", "content": "Hello", "parent_id": null}"#),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Email notification not configured"));
}

#[test]
fn notify_composes_email() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pdm.toml"),
        r#"
[notify]
mailgun_domain = "mg.example.org"
mailgun_api_key = "key-123"
recipient = "author@example.org"
"#,
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["notify"],
        Some(r#"{"author_name": "Ada", "content": "Hello", "parent_id": "c1"}"#),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("POST https://api.mailgun.net/v3/mg.example.org/messages\n"));
    assert!(out.contains("From: Diffusion Models <noreply@mg.example.org>\n"));
    assert!(out.contains("Subject: New Comment from Ada\n"));
    assert!(out.contains("Type: Reply\n"));
}

#[test]
fn notify_rejects_blank_comment() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        dir.path(),
        &["notify"],
        Some(r#"{"author_name": "Ada", "content": "   "}"#),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Please enter a comment"));
}

#[test]
fn visitor_id_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let args = [
        "visitor-id",
        "--user-agent",
        "Mozilla/5.0 (X11; Linux x86_64)",
        "--language",
        "en-US",
        "--timezone-offset",
        "-60",
        "--screen",
        "1920x1080",
        "--color-depth",
        "24",
    ];

    let output = run(dir.path(), &args, None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "v_8e92c975f792a04f604518b545c81fb9\n");
}

#[test]
fn share_uses_site_url() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".pdm.toml"),
        "site_url = \"https://example.org/book/\"\n",
    )
    .unwrap();

    let output = run(dir.path(), &["share", "a b"], None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "https://example.org/book/#/?comment=a%20b\n"
    );
}

#[test]
fn share_without_site_url_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["share", "c1"], None);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("pass --base or set site_url"));
}

#[test]
fn share_reads_site_url_from_env() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_with_env(
        dir.path(),
        &["share", "c1"],
        None,
        &[("PDM_SITE_URL", "https://example.org/env/")],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "https://example.org/env/#/?comment=c1\n");
}

#[test]
fn thread_keeps_reaction_columns_from_rows() {
    let dir = tempfile::tempdir().unwrap();
    let rows = r#"[
        {"id": "c1", "author_name": "Ada", "content": "Hi", "created_at": "2025-01-05T08:00:00Z", "upvotes": 4, "downvotes": 0, "my_reaction": 1}
    ]"#;

    let outline = run(dir.path(), &["thread"], Some(rows));
    assert!(outline.status.success(), "stderr: {}", stderr(&outline));
    assert!(stdout(&outline).contains("- Ada · Jan 5, 2025, 08:00 AM [+4 -0, you +]"));

    let json = run(dir.path(), &["thread", "--json"], Some(rows));
    let forest: serde_json::Value = serde_json::from_str(&stdout(&json)).unwrap();
    assert_eq!(forest[0]["upvotes"], 4);
    assert_eq!(forest[0]["downvotes"], 0);
    assert_eq!(forest[0]["my_reaction"], 1);
}
