// build.rs has its own module namespace, separate from the main crate.
//
// Only the two self-contained files describing the tuning profiles are loaded here.  Loading
// lib.rs would bring the exported memory symbols into a hosted program.
#[allow(dead_code)]
#[path = "../word.rs"]
mod word;

#[allow(dead_code)]
#[path = "../constants.rs"]
mod constants;

mod check;
use check::ProfileCheck;
use constants::{Narrow, Standard};
impl ProfileCheck for Standard {}
impl ProfileCheck for Narrow {}

fn main() {
    println!("cargo:rerun-if-changed=src/build");
    println!("cargo:rerun-if-changed=src/constants.rs");
    println!("cargo:rerun-if-changed=src/word.rs");

    // Every profile is checked, not just the active one, so switching features never surfaces a
    // latent inconsistency.
    Standard::check_profile("Standard");
    Narrow::check_profile("Narrow");

    compiler_instructions();
}

/// Linker arguments needed for memcheck to be a nostd, nolibc program.
fn compiler_instructions() {
    let memcheck = std::env::var_os("CARGO_FEATURE_MEMCHECK").is_some();
    let linux = std::env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "linux");
    if !memcheck || !linux {
        return;
    }

    for arg in ["-nostartfiles", "-nostdlib", "-static", "-no-pie"] {
        println!("cargo:rustc-link-arg-bin=memcheck={arg}");
    }
}
