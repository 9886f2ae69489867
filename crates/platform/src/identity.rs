//! Effective identity of the restoring process.

#[cfg(not(unix))]
const UNPRIVILEGED: u32 = 1;

/// Effective user and group of the process applying attributes.
///
/// Computed once by the caller and passed to every attribute application,
/// so nothing in the restore path consults process-global identity state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Identity {
    uid: u32,
    gid: u32,
}

impl Identity {
    /// Creates an identity from raw ids.
    #[must_use]
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// The super-user identity.
    #[must_use]
    pub const fn superuser() -> Self {
        Self::new(0, 0)
    }

    /// The effective identity of the current process.
    #[cfg(unix)]
    #[must_use]
    pub fn current() -> Self {
        Self::new(
            rustix::process::geteuid().as_raw(),
            rustix::process::getegid().as_raw(),
        )
    }

    /// The effective identity of the current process.
    ///
    /// Windows has no numeric owners; an elevated process token counts as the
    /// super-user and anything else as an ordinary user.
    #[cfg(windows)]
    #[must_use]
    pub fn current() -> Self {
        if token_is_elevated() {
            Self::superuser()
        } else {
            Self::new(UNPRIVILEGED, UNPRIVILEGED)
        }
    }

    /// The effective identity of the current process.
    #[cfg(not(any(unix, windows)))]
    #[must_use]
    pub fn current() -> Self {
        Self::new(UNPRIVILEGED, UNPRIVILEGED)
    }

    /// Effective user id.
    #[must_use]
    pub const fn uid(&self) -> u32 {
        self.uid
    }

    /// Effective group id.
    #[must_use]
    pub const fn gid(&self) -> u32 {
        self.gid
    }

    /// Reports whether the identity may change ownership, modes and times of
    /// files it does not own.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.uid == 0
    }
}

#[cfg(windows)]
#[allow(unsafe_code)]
fn token_is_elevated() -> bool {
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{
        GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    let mut token = HANDLE::default();
    // SAFETY: the current-process pseudo handle is always valid and `token`
    // is a live out-pointer.
    if unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) }.is_err() {
        return false;
    }

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0u32;
    // SAFETY: `token` was opened with TOKEN_QUERY and the buffer is exactly
    // one TOKEN_ELEVATION.
    let queried = unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            Some(std::ptr::from_mut(&mut elevation).cast()),
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut returned,
        )
    };
    // SAFETY: `token` is owned here and closed exactly once.
    let _ = unsafe { CloseHandle(token) };

    queried.is_ok() && elevation.TokenIsElevated != 0
}
