use std::process::{Command, Output};

fn demo() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_argumentz-demo"));
    cmd.env_remove("ARGUMENTZ_USER").env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run argumentz-demo")
}

#[test]
fn prints_resolved_values() {
    let out = run(demo().args([
        "-u",
        "admin",
        "-p",
        "9000",
        "-s",
        "3600",
        "-h",
        "localhost",
        "-v",
    ]));
    assert!(
        out.status.success(),
        "argumentz-demo failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "user=admin\nport=9000\nseconds=3600\nhost=localhost\nverbose=true\n"
    );
}

#[test]
fn defaults_fill_missing_values() {
    let out = run(demo().args(["--seconds", "5", "--host", "example.org"]));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("user=guest\n"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("port=8080\n"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("verbose=false\n"), "unexpected output:\n{stdout}");
}

#[test]
fn user_default_comes_from_environment() {
    let out = run(demo()
        .env("ARGUMENTZ_USER", "operator")
        .args(["-s", "5", "-h", "example.org"]));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("user=operator\n"), "unexpected output:\n{stdout}");
}

#[test]
fn missing_parameter_prints_usage_and_fails() {
    let out = run(demo().args(["-s", "3600"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Usage: argumentz-demo [ARGUMENTS]"),
        "unexpected stderr:\n{stderr}"
    );
    assert!(
        stderr.contains("Missing required parameter: \"-h\" / \"--host\""),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn invalid_number_fails_with_resolution_error() {
    let out = run(demo().args(["-p", "PORT_NUMBER", "-s", "1", "-h", "x"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Failed to resolve parameter: \"-p\" / \"--port\""),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn json_dump_includes_both_aliases() {
    let out = run(demo().args(["-s", "7", "-h", "localhost", "--json"]));
    assert!(out.status.success());
    let dump: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not JSON");
    assert_eq!(dump["-s"], 7);
    assert_eq!(dump["--seconds"], 7);
    assert_eq!(dump["--host"], "localhost");
    assert_eq!(dump["--user"], "guest");
    assert_eq!(dump["--json"], true);
    // Declared flags always read as true in the full dump.
    assert_eq!(dump["--verbose"], true);
}

#[cfg(unix)]
#[test]
fn unreadable_user_default_is_reported() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = run(demo()
        .env("ARGUMENTZ_USER", OsStr::from_bytes(b"op\xffer"))
        .args(["-s", "5", "-h", "example.org"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Failed to resolve parameter: \"-u\" / \"--user\""),
        "unexpected stderr:\n{stderr}"
    );
    assert!(
        stderr.contains("-u --user          username to connect to the server (required)"),
        "unexpected stderr:\n{stderr}"
    );
}

#[cfg(unix)]
#[test]
fn unreadable_user_default_is_ignored_when_user_is_given() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = run(demo()
        .env("ARGUMENTZ_USER", OsStr::from_bytes(b"op\xffer"))
        .args(["-u", "admin", "-s", "5", "-h", "example.org"]));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("user=admin\n"), "unexpected output:\n{stdout}");
}
