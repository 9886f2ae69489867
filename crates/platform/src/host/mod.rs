//! Host implementations of [`Platform`](crate::Platform), one per target family.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::HostPlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::HostPlatform;
