//! Storage migrations for pallet-restricted-token.
//!
//! Each migration is versioned against `STORAGE_VERSION` in `lib.rs` and runs
//! exactly once: bump the constant, add a `vN` module implementing
//! `OnRuntimeUpgrade`, and wire it into the runtime's `Executive` migration
//! tuple. Migrations must check the on-chain version before touching storage
//! so re-runs are harmless.

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{Config, Pallet};

/// Migration to version 1 (initial release).
///
/// No-op: v1 is the first storage layout, so there is nothing to migrate
/// from v0. It exists to stamp the on-chain version and to establish the
/// pattern for later schema changes.
pub mod v1 {
    use super::*;

    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            if on_chain_version < 1 {
                log::info!(
                    target: "pallet-restricted-token",
                    "Running migration v0 -> v1 (no-op for initial release)"
                );
                StorageVersion::new(1).put::<Pallet<T>>();
                T::DbWeight::get().reads_writes(1, 1)
            } else {
                log::info!(
                    target: "pallet-restricted-token",
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );
                T::DbWeight::get().reads(1)
            }
        }
    }
}
