use memrt::os::{eprint, eprintln, exit};

/// Panic handler
///
/// Nothing in memcheck is expected to panic; a sweep failure is reported through
/// `OrAbortResult`.  Rust still requires a handler for a nostd binary.
#[cfg_attr(not(test), panic_handler)]
fn panic(info: &core::panic::PanicInfo) -> ! {
    #[cfg(debug_assertions)]
    {
        eprint("Panic!");
        if let Some(e) = info.message().as_str() {
            eprint(" ");
            eprint(e);
        }
        eprint("\n");
        if let Some(loc) = info.location() {
            eprint("File: ");
            eprint(loc.file());
            eprint(":");
            eprint(loc.line());
            eprint(":");
            eprint(loc.column());
            eprint("\n");
        }
    }

    eprintln("memcheck: unexpected panic");
    exit(2);
}
