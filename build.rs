fn main() {
    // Re-run when HEAD moves so --version tracks the checkout.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // `git describe` yields the tag name on a release tag and
    // "<tag>-<n>-g<hash>" between tags; outside a git checkout, fall back
    // to the crate version.
    let described = std::process::Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=+"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    println!("cargo:rustc-env=BUILD_VERSION={described}");
}
