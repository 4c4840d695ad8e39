//! Cross-process claim on a data directory's trail.
//!
//! Only one `stk` process may append to a trail at a time. The claim is a
//! `trail.lock` file created exclusively next to the trail and holding a
//! [`LockHolder`] record, so a blocked command can say who it is waiting on.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const LOCK_FILE: &str = "trail.lock";
const HELD_TIMEOUT: Duration = Duration::from_secs(300);
/// A holder writes its record right after creating the file; an unreadable
/// lock older than this is left behind by something else.
const UNREADABLE_GRACE: Duration = Duration::from_secs(2);
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Who holds the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHolder {
    pub pid: u32,
    pub command: String,
    pub acquired_at: DateTime<Utc>,
}

impl LockHolder {
    fn current(command: &str) -> Self {
        Self {
            pid: std::process::id(),
            command: command.to_string(),
            acquired_at: Utc::now(),
        }
    }
}

/// Held claim on a trail. The lock file is removed on drop.
#[derive(Debug)]
pub struct TrailLock {
    path: PathBuf,
}

impl Drop for TrailLock {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %error, "failed to release trail lock");
        }
    }
}

#[derive(Debug)]
enum Claim {
    Acquired(TrailLock),
    Held(LockHolder),
    Abandoned(LockHolder),
    Unreadable,
}

/// Claim the trail in `data_dir` for `command`, waiting while a live process
/// holds it and clearing claims left by dead ones.
///
/// # Errors
///
/// The directory or lock file cannot be written; another process keeps the
/// claim past the wait timeout; the lock file stays unreadable.
pub async fn acquire(data_dir: &Path, command: &str) -> anyhow::Result<TrailLock> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    let path = data_dir.join(LOCK_FILE);
    let started = Instant::now();
    let mut announced = false;

    loop {
        match try_claim(&path, command)? {
            Claim::Acquired(lock) => {
                tracing::debug!(path = %path.display(), command, "trail lock acquired");
                return Ok(lock);
            }
            Claim::Abandoned(holder) => {
                tracing::warn!(
                    pid = holder.pid,
                    command = %holder.command,
                    "clearing trail lock left by a process that is no longer running"
                );
                clear(&path)?;
            }
            Claim::Held(holder) => {
                if started.elapsed() >= HELD_TIMEOUT {
                    bail!(
                        "trail is locked by `stk {}` (pid {}) since {}; try again after it finishes",
                        holder.command,
                        holder.pid,
                        holder.acquired_at.to_rfc3339(),
                    );
                }
                if !announced {
                    tracing::info!(
                        pid = holder.pid,
                        command = %holder.command,
                        "waiting for trail lock"
                    );
                    announced = true;
                }
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Claim::Unreadable => {
                if started.elapsed() >= UNREADABLE_GRACE {
                    bail!(
                        "trail lock {} is unreadable; remove it if no stk process is running",
                        path.display()
                    );
                }
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

fn try_claim(path: &Path, command: &str) -> anyhow::Result<Claim> {
    match OpenOptions::new().create_new(true).write(true).open(path) {
        Ok(mut file) => {
            let lock = TrailLock {
                path: path.to_path_buf(),
            };
            let holder = LockHolder::current(command);
            serde_json::to_writer(&mut file, &holder)
                .map_err(std::io::Error::from)
                .and_then(|()| file.flush())
                .with_context(|| format!("failed to record trail lock holder in {}", path.display()))?;
            Ok(Claim::Acquired(lock))
        }
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(inspect(path)),
        Err(err) => {
            Err(err).with_context(|| format!("failed to create trail lock {}", path.display()))
        }
    }
}

fn inspect(path: &Path) -> Claim {
    let Ok(contents) = std::fs::read(path) else {
        return Claim::Unreadable;
    };
    match serde_json::from_slice::<LockHolder>(&contents) {
        Ok(holder) if is_running(holder.pid) => Claim::Held(holder),
        Ok(holder) => Claim::Abandoned(holder),
        Err(_) => Claim::Unreadable,
    }
}

fn clear(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to clear trail lock {}", path.display()))
        }
    }
}

#[cfg(target_os = "linux")]
fn is_running(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Without procfs a recorded holder is trusted until the wait times out.
#[cfg(not(target_os = "linux"))]
fn is_running(_pid: u32) -> bool {
    true
}
