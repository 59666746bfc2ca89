// Dweve readconf - Streaming key/value configuration reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Critical-section guard blocking `SIGHUP`.
//!
//! Every public [`ConfReader`](crate::ConfReader) operation holds a
//! [`SignalGuard`] for its duration. The guard blocks `SIGHUP` on the calling
//! thread and remembers the mask that was in effect before; dropping it puts
//! that mask back. The saved mask lives in the guard itself, so nested guards
//! and guards on other threads never overwrite each other's state.
//!
//! If the previous mask cannot be restored the process is aborted: continuing
//! with an unknown signal disposition is not recoverable.
//!
//! On non-Unix targets the guard does nothing.

#[cfg(unix)]
pub(crate) use unix::SignalGuard;

#[cfg(not(unix))]
pub(crate) use fallback::SignalGuard;

#[cfg(unix)]
mod unix {
    use crate::error::{ConfError, ConfResult};
    use std::{fmt, io, mem, ptr};
    use tracing::error;

    #[must_use = "the signal is unblocked as soon as the guard is dropped"]
    pub(crate) struct SignalGuard {
        previous: libc::sigset_t,
    }

    impl SignalGuard {
        pub(crate) fn acquire() -> ConfResult<Self> {
            // SAFETY: both sets are initialised by sigemptyset/pthread_sigmask
            // before being read, and the pointers are to live locals.
            unsafe {
                let mut block: libc::sigset_t = mem::zeroed();
                let mut previous: libc::sigset_t = mem::zeroed();

                if libc::sigemptyset(&mut block) != 0 || libc::sigaddset(&mut block, libc::SIGHUP) != 0 {
                    return Err(ConfError::SignalMask(io::Error::last_os_error()));
                }

                let rc = libc::pthread_sigmask(libc::SIG_BLOCK, &block, &mut previous);
                if rc != 0 {
                    return Err(ConfError::SignalMask(io::Error::from_raw_os_error(rc)));
                }

                Ok(Self { previous })
            }
        }
    }

    impl Drop for SignalGuard {
        fn drop(&mut self) {
            // SAFETY: `previous` was filled in by pthread_sigmask in `acquire`.
            let rc = unsafe { libc::pthread_sigmask(libc::SIG_SETMASK, &self.previous, ptr::null_mut()) };
            if rc != 0 {
                error!(
                    error = %io::Error::from_raw_os_error(rc),
                    "failed to restore signal mask; aborting"
                );
                std::process::abort();
            }
        }
    }

    impl fmt::Debug for SignalGuard {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SignalGuard").finish_non_exhaustive()
        }
    }
}

#[cfg(not(unix))]
mod fallback {
    use crate::error::ConfResult;

    #[derive(Debug)]
    #[must_use = "the signal is unblocked as soon as the guard is dropped"]
    pub(crate) struct SignalGuard;

    impl SignalGuard {
        pub(crate) fn acquire() -> ConfResult<Self> {
            Ok(Self)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::{ConfError, ConfResult};
    use std::{mem, ptr};

    fn hangup_blocked() -> bool {
        // SAFETY: a null `set` only queries the current mask into `current`.
        unsafe {
            let mut current: libc::sigset_t = mem::zeroed();
            assert_eq!(libc::pthread_sigmask(libc::SIG_BLOCK, ptr::null(), &mut current), 0);
            libc::sigismember(&current, libc::SIGHUP) == 1
        }
    }

    // Each test runs on its own thread, and the mask is per thread.

    #[test]
    fn test_guard_blocks_and_restores() {
        assert!(!hangup_blocked());
        {
            let _guard = SignalGuard::acquire().unwrap();
            assert!(hangup_blocked());
        }
        assert!(!hangup_blocked());
    }

    #[test]
    fn test_nested_guards() {
        let outer = SignalGuard::acquire().unwrap();
        {
            let _inner = SignalGuard::acquire().unwrap();
            assert!(hangup_blocked());
        }
        // The inner guard restores the mask the outer guard installed.
        assert!(hangup_blocked());
        drop(outer);
        assert!(!hangup_blocked());
    }

    fn failing_operation() -> ConfResult<()> {
        let _guard = SignalGuard::acquire()?;
        assert!(hangup_blocked());
        Err(ConfError::invalid("boom"))
    }

    #[test]
    fn test_guard_restores_on_error_path() {
        assert!(failing_operation().is_err());
        assert!(!hangup_blocked());
    }

    #[test]
    fn test_guards_on_other_threads_are_independent() {
        let _guard = SignalGuard::acquire().unwrap();
        let blocked_elsewhere = std::thread::spawn(|| {
            let before = hangup_blocked();
            let guard = SignalGuard::acquire().unwrap();
            drop(guard);
            (before, hangup_blocked())
        })
        .join()
        .unwrap();
        // Spawned threads inherit the creator's mask, and restore to it.
        assert_eq!(blocked_elsewhere, (true, true));
        assert!(hangup_blocked());
    }
}
