use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    if output.status.success() {
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    } else {
        anyhow::bail!("{}", String::from_utf8_lossy(&output.stderr).trim())
    }
}

fn git_info(args: &[&str]) -> String {
    match exe_cmd(Command::new("git").args(args)) {
        Ok(s) if !s.is_empty() => s,
        Ok(_) => "unknown".to_string(),
        Err(e) => {
            println!("cargo:warning=git {} failed: {e}", args.join(" "));
            "unknown".to_string()
        }
    }
}

fn main() {
    let git_commit_hash = git_info(&["log", "-n", "1", "--pretty=format:%h"]);
    let git_branch = git_info(&["branch", "--show-current"]);

    println!(
        "cargo:rustc-env=SEALBOX_VERSION_INFO={}-{}",
        env!("CARGO_PKG_VERSION"),
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z")
    );

    println!("cargo:rustc-env=SEALBOX_GIT_INFO={git_branch}-{git_commit_hash}");
    println!("cargo:rerun-if-changed=build.rs");
}
