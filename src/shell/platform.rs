//! Process privilege detection.

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

/// Prefix `argv` with `sudo` when asked to and not already elevated.
pub fn with_sudo(argv: Vec<String>, sudo: bool) -> Vec<String> {
    if sudo && !is_elevated() {
        std::iter::once("sudo".to_string()).chain(argv).collect()
    } else {
        argv
    }
}
