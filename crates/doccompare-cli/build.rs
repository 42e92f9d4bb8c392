use std::process::Command;

/// Short commit hash for default output filenames, "dev" outside a
/// checkout.
fn commit_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "dev".to_string())
}

fn main() {
    println!("cargo:rustc-env=DOCCOMPARE_COMMIT={}", commit_hash());
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}
