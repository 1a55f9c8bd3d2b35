#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

// Process entry and panic handler.
//
// This conflicts with anything which uses std, including src/build/main.rs and tests.  To avoid
// this conflict, memcheck `mod`s this directly rather than `mod`ing it in the shared `lib.rs`.
#[cfg(not(test))]
#[path = "../libc_shim/mod.rs"]
mod libc_shim;

mod hooks;

use memrt::err::*;
use memrt::os::*;
use memrt::types::c_int;
use memrt::verify::SUITES;

/// Column at which case counts start.
const NAME_WIDTH: usize = 20;

/// Runs every verification sweep against the memory symbols this binary links, which are the
/// crate's own.  Exits 0 if all pass, otherwise reports the first divergence and exits 1.
///
/// # Safety
///
/// Platform ABI guarantees incoming C-style format
#[cfg(not(test))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn main(
    argc: isize,
    _argv: *const *const core::ffi::c_char,
    _envp: *const *const core::ffi::c_char,
) -> c_int {
    if argc > 1 {
        abort_with_msg("memcheck takes no arguments");
    }

    let mut total = 0;
    for (name, suite) in SUITES {
        print_padded(name, NAME_WIDTH);
        let cases = suite().inspect_err(|_| println("FAILED")).or_abort(name);
        print(cases);
        println(" cases ok");
        total += cases;
    }

    hooks::report(NAME_WIDTH);

    print("memcheck: ");
    print(total);
    println(" cases passed");
    STDOUT
        .write_all(b"memcheck: ok\n")
        .or_abort("Unable to write summary");

    0
}
