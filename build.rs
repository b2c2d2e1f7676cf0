// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=RETROCAM_VERSION");

    // Packagers may pin the version explicitly
    let version = if let Ok(v) = std::env::var("RETROCAM_VERSION") {
        v
    } else {
        get_git_version()
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn get_git_version() -> String {
    // "v0.1.0" at a tag, "v0.1.0-5-gabcdef1" after it
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output();

    let described = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        // Outside a checkout (crate tarball, vendored build)
        _ => return env!("CARGO_PKG_VERSION").to_string(),
    };

    let described = described.strip_prefix('v').unwrap_or(&described);

    if described.contains('-') {
        let parts: Vec<&str> = described.rsplitn(3, '-').collect();
        if parts.len() >= 3 {
            let hash = parts[0].strip_prefix('g').unwrap_or(parts[0]);
            return format!("{}-dirty-{}", parts[2], hash);
        }
        return described.to_string();
    }

    match get_commit_hash() {
        Some(hash) if hash != described => format!("{}-{}", described, hash),
        // `--always` fell back to a bare hash: no release tag yet
        Some(hash) => format!("{}-{}", env!("CARGO_PKG_VERSION"), hash),
        None => described.to_string(),
    }
}

fn get_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
