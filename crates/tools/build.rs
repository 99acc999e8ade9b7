use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    match Command::new("git").args(["rev-parse", "HEAD"]).output() {
        Ok(output) if output.status.success() => {
            let build_hash = String::from_utf8_lossy(&output.stdout);
            println!("cargo:rustc-env=BUILD_HASH={}", build_hash.trim());
        }
        _ => println!("cargo:rustc-env=BUILD_HASH=unknown"),
    }
}
