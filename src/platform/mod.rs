//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the rest of the
//! codebase can remain platform-agnostic.

pub mod temp;

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{open_in_external_app, open_log_file_secure_append};

#[cfg(not(unix))]
pub use windows::{open_in_external_app, open_log_file_secure_append};

pub use temp::temp_copy_id;

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Spawn `cmd` with null stdio and wait for it on a named thread so the child is
/// reaped without blocking the caller.
pub(crate) fn spawn_detached(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    thread::Builder::new()
        .name("vfs-move-opener".into())
        .spawn(move || child.wait())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn detached_child_is_reaped() {
        let reaper = spawn_detached(Command::new("true")).unwrap();
        let status = reaper.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = spawn_detached(Command::new("vfs-move-no-such-program")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
