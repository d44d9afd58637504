use std::env;
use std::fs;
use std::process::Command;

fn main() {
    let rustc_path = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(&rustc_path)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PARROT_RUSTC_VERSION={version}");

    println!("cargo:rerun-if-changed=Cargo.lock");
    let lockfile = fs::read_to_string("Cargo.lock").unwrap_or_default();
    for (package, var) in [
        ("serenity", "PARROT_SERENITY_VERSION"),
        ("poise", "PARROT_POISE_VERSION"),
    ] {
        if let Some(version) = locked_version(&lockfile, package) {
            println!("cargo:rustc-env={var}={version}");
        }
    }

    println!("cargo:rerun-if-changed=migrations");
}

fn locked_version(lockfile: &str, package: &str) -> Option<String> {
    let needle = format!("name = \"{package}\"");
    let mut lines = lockfile.lines();
    while let Some(line) = lines.next() {
        if line.trim() == needle {
            let version_line = lines.next()?;
            return version_line
                .trim()
                .strip_prefix("version = \"")
                .and_then(|rest| rest.strip_suffix('"'))
                .map(str::to_string);
        }
    }
    None
}
