use std::env;
use std::process::Command;

fn git_short_sha() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let sha = String::from_utf8(out.stdout).ok()?;
    Some(sha.trim().to_string())
}

fn main() {
    // Source tarballs carry no .git; packagers can pin the revision instead.
    let sha = env::var("CFTOP_GIT_SHA")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(git_short_sha)
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=CFTOP_BUILD_SHA={sha}");
    println!("cargo:rerun-if-env-changed=CFTOP_GIT_SHA");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");
}
