//! Isolation manager
//!
//! Every artifact a fixture run can produce shares the input's basename and lives in the fixture's own directory.
//! [`ArtifactGuard`] owns those paths for the duration of one run: it deletes them before the tool starts and again
//! when the run ends, on every exit path. Cleanup always covers the full output-kind set, whatever policy the
//! fixture uses, so artifacts from a differently configured earlier run cannot leak into a comparison.
//!
//! A file that is already gone is fine. Any other deletion failure is fatal: continuing with stale state would make
//! later fixtures unreliable.

use std::fs;
use std::io;
use std::thread;

use asmgold_core::artifacts::OutputKind;

use super::fixture::Fixture;
use crate::error::{HarnessError, HarnessResult};

/// Delete every generated artifact of `fixture`. Returns how many files were removed.
pub fn clear_artifacts(fixture: &Fixture) -> HarnessResult<usize> {
    let mut removed = 0;
    for kind in OutputKind::ALL {
        let path = fixture.produced_path(kind);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed generated artifact");
                removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(HarnessError::Cleanup { path, source }),
        }
    }
    Ok(removed)
}

/// Scope guard bracketing one fixture run with artifact cleanup.
///
/// Call [`ArtifactGuard::release`] on the normal path to observe cleanup errors. If the guard is dropped instead
/// (early `?` return, panic during verification), `Drop` performs the same cleanup.
#[must_use = "dropping the guard immediately deletes the artifacts it protects"]
pub struct ArtifactGuard<'a> {
    fixture: &'a Fixture,
    released: bool,
}

impl<'a> ArtifactGuard<'a> {
    /// Clear stale artifacts and take ownership of the fixture's artifact paths.
    pub fn acquire(fixture: &'a Fixture) -> HarnessResult<Self> {
        let stale = clear_artifacts(fixture)?;
        if stale > 0 {
            tracing::debug!(fixture = %fixture.identity, stale, "cleared stale artifacts before run");
        }
        Ok(Self {
            fixture,
            released: false,
        })
    }

    /// Clear the artifacts produced by the run and end the guard.
    pub fn release(mut self) -> HarnessResult<()> {
        self.released = true;
        clear_artifacts(self.fixture).map(|_| ())
    }
}

impl Drop for ArtifactGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = clear_artifacts(self.fixture) {
            tracing::error!(fixture = %self.fixture.identity, error = %e, "artifact cleanup failed");
            if !thread::panicking() {
                panic!("artifact cleanup failed for {}: {}", self.fixture.identity, e);
            }
        }
    }
}
