//! Block models built on the orientation algebra and variant tables.

pub mod cauldron;
pub mod liquid;
pub mod pane;
pub mod skin;
pub mod trapdoor;

use blockray_geometry::{TableDigest, TableHasher};
use tracing::debug;

/// Digest over every block table, for determinism checks across runs.
pub fn digest() -> TableDigest {
    let mut hasher = TableHasher::new();
    for (_, model) in trapdoor::table().iter() {
        hasher.model(model);
    }
    for (_, model) in pane::table().iter() {
        hasher.model(model);
    }
    for (_, shell) in cauldron::table().iter() {
        hasher.model(shell.outer()).model(shell.inner());
    }
    for shell in [skin::slime(), skin::honey()] {
        hasher.model(shell.outer()).model(shell.inner());
    }
    let digest = hasher.finish();
    debug!(%digest, "block tables hashed");
    digest
}
