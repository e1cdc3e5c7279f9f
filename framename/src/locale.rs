//! Scoped numeric locale override
//!
//! Collaborators that format numbers through the C library (output writers,
//! the profiler's own logging) must see the "C" numeric locale while frame
//! names are being produced, regardless of the user's system locale.
//! [`NumericLocaleGuard`] installs a thread-local "C" `LC_NUMERIC` locale via
//! `uselocale` and restores the previous one when dropped, which covers every
//! exit path including unwinding.
//!
//! `uselocale` is per-thread, so guards on different threads never observe
//! each other. Guards on the same thread must be dropped in reverse order of
//! acquisition, which scoped ownership gives for free.

#![allow(unsafe_code)] // uselocale()/newlocale() require unsafe

use log::{debug, warn};

/// Restores the previous thread locale on drop
///
/// Not `Send`: the override belongs to the thread that acquired it.
pub struct NumericLocaleGuard {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    saved: Option<SavedLocale>,
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    _not_send: std::marker::PhantomData<*mut ()>,
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
struct SavedLocale {
    previous: libc::locale_t,
    installed: libc::locale_t,
}

impl NumericLocaleGuard {
    /// Switch this thread to the "C" numeric locale
    ///
    /// If the locale cannot be created the guard is inert and formatting
    /// continues under whatever locale is active.
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[must_use]
    pub fn acquire() -> Self {
        let installed = unsafe {
            libc::newlocale(libc::LC_NUMERIC_MASK, b"C\0".as_ptr().cast(), std::ptr::null_mut())
        };
        if installed.is_null() {
            warn!("Could not create C numeric locale, keeping the current one");
            return Self { saved: None };
        }

        let previous = unsafe { libc::uselocale(installed) };
        if previous.is_null() {
            warn!("Could not switch to C numeric locale, keeping the current one");
            unsafe { libc::freelocale(installed) };
            return Self { saved: None };
        }

        debug!("Switched thread to C numeric locale");
        Self { saved: Some(SavedLocale { previous, installed }) }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    #[must_use]
    pub fn acquire() -> Self {
        debug!("Numeric locale override not supported on this platform");
        Self { _not_send: std::marker::PhantomData }
    }

    /// True if the override is in effect
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            self.saved.is_some()
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            false
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
impl Drop for NumericLocaleGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            unsafe {
                libc::uselocale(saved.previous);
                libc::freelocale(saved.installed);
            }
            debug!("Restored previous numeric locale");
        }
    }
}
