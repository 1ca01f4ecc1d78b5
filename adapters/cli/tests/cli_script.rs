use std::{
    io::Write,
    process::{Command, Stdio},
};

fn grid_arena() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_grid-arena"));
    let _ = command.env_remove("RUST_LOG");
    command
}

#[test]
fn command_flags_run_in_order() {
    let output = grid_arena()
        .args(["-c", "move hero E", "-c", "move hero X", "-c", "battle 1"])
        .output()
        .expect("failed to run grid-arena");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert_eq!(
        stdout,
        "Aria moves to (1, 0)\n\
         invalid move: invalid direction: X\n\
         target out of range: the hero cannot reach the monster\n"
    );
}

#[test]
fn script_lines_are_read_from_stdin() {
    let mut child = grid_arena()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn grid-arena");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"# warm up\nmove hero S\ndance\n")
        .expect("failed to write script");

    let output = child.wait_with_output().expect("grid-arena exits");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert_eq!(
        stdout,
        "Aria moves to (0, 1)\nline 3: unknown command 'dance'\n"
    );
}

#[test]
fn missing_scenario_file_fails() {
    let output = grid_arena()
        .args(["--scenario", "does/not/exist.toml", "-c", "board"])
        .output()
        .expect("failed to run grid-arena");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read scenario"));
}
