use std::{fs, path::PathBuf, process::Command};

fn arena_survival() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arena-survival"))
}

#[test]
fn single_tick_run_prints_the_summary() {
    let output = arena_survival()
        .args(["--max-ticks", "1", "--seed", "3"])
        .output()
        .expect("failed to launch arena-survival");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("summary is utf-8");
    assert!(stdout.contains("player survived after 1 frames"), "{stdout}");
    assert!(stdout.contains("floors cleared: 0"), "{stdout}");
    assert!(stdout.contains("enemies defeated: 0"), "{stdout}");
    assert!(stdout.contains("player health: 100.0"), "{stdout}");
    assert!(stdout.contains("WaveStart: 0"), "{stdout}");
}

#[test]
fn invalid_settings_file_is_reported() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("empty-brackets.toml");
    fs::write(&path, "[waves]\nbrackets = []\n").expect("write settings file");

    let output = arena_survival()
        .arg("--config")
        .arg(&path)
        .args(["--max-ticks", "1"])
        .output()
        .expect("failed to launch arena-survival");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid settings in"), "{stderr}");
}
