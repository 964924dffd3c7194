// Per-OS names: primary data volume and loopback interfaces.

/// Mount point of the user data volume when it differs from `/`.
pub(super) fn primary_data_mounts() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        // APFS splits the sealed system volume from the data volume.
        &["/System/Volumes/Data"]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[]
    }
}

pub(super) const ROOT_MOUNT: &str = "/";

/// Loopback interface names on Linux (`lo`) and BSD/macOS (`lo0`).
pub(super) const LOOPBACK_INTERFACES: &[&str] = &["lo", "lo0"];
