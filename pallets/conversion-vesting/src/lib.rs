#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated weight constants for MVP (will be replaced by benchmarks later)
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! Conversion and vesting ledger.
//!
//! Holders convert a freely transferable source token into a restricted
//! locked token, later claim a batch of locked tokens into a time-scheduled
//! vesting entry, and release accrued source tokens back out of ledger
//! custody as the schedule unlocks them.
//!
//! Schedule: nothing unlocks before `CliffDuration` has elapsed since the
//! entry was opened; afterwards the unlocked amount grows linearly over
//! `VestingDuration`, reaching the entry total at cliff + window.

use codec::DecodeWithMemTracking;
use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{
        fungible::{Inspect, Mutate},
        tokens::Preservation,
        UnixTime,
    },
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use pallet_restricted_token::LockedLedger;
use sp_runtime::traits::AccountIdConversion;
use sp_std::prelude::*;

pub use pallet::*;

#[cfg(test)]
mod mock;


/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// A single claim, tracked until fully drained. Entries are append-only:
/// `total_amount` and `start_time` never change, `released_amount` only
/// grows, and the entry stays in storage after it closes.
#[derive(Clone, Encode, Decode, Eq, PartialEq, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct VestingEntry {
    /// Source-token amount locked at claim time
    pub total_amount: u128,
    /// Cumulative amount already paid out
    pub released_amount: u128,
    /// Unix seconds at claim time
    pub start_time: u64,
}

impl VestingEntry {
    pub fn fully_released(&self) -> bool {
        self.released_amount == self.total_amount
    }
}

/// How much of an entry to release: everything currently payable, or an
/// exact figure checked against it.
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, MaxEncodedLen, TypeInfo,
    RuntimeDebug,
)]
pub enum ReleaseAmount {
    /// Release the full unlocked-but-unpaid amount
    All,
    /// Release exactly this much; fails if more than currently payable
    Exact(u128),
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// The freely transferable token holders convert from and release
        /// back into. Custodied by this pallet's sovereign account between
        /// conversion and release.
        type SourceToken: Inspect<Self::AccountId, Balance = u128> + Mutate<Self::AccountId>;

        /// The restricted token credited on conversion and debited on claim.
        type LockedToken: LockedLedger<Self::AccountId>;

        /// Clock for stamping and accruing vesting entries.
        type Time: UnixTime;

        /// Derives the custody account for converted source tokens.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Seconds that must elapse after a claim before anything unlocks.
        #[pallet::constant]
        type CliffDuration: Get<u64>;

        /// Seconds of linear accrual after the cliff until fully unlocked.
        #[pallet::constant]
        type VestingDuration: Get<u64>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// One-time activation flag; conversions are rejected until set.
    #[pallet::storage]
    pub type Initialized<T> = StorageValue<_, bool, ValueQuery>;

    /// Vesting entries per holder, addressed by a dense 0-based id.
    /// Entries are never removed.
    #[pallet::storage]
    pub type Entries<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        u32,
        VestingEntry,
        OptionQuery,
    >;

    /// Next entry id per holder (equals the number of entries ever claimed).
    #[pallet::storage]
    pub type EntryCount<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u32, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// The ledger was activated
        Initialized,
        /// Source tokens taken into custody, locked tokens credited
        Converted { who: T::AccountId, amount: u128 },
        /// Locked tokens debited, a vesting entry opened
        Claimed { who: T::AccountId, entry_id: u32, amount: u128, start_time: u64 },
        /// Accrued source tokens paid back out of custody
        Released { who: T::AccountId, entry_id: u32, amount: u128 },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// One-time setup invoked more than once
        AlreadyInitialized,
        /// The ledger has not been activated yet
        NotInitialized,
        /// A positive amount is required here
        ZeroAmount,
        /// The source-token debit or payout could not be completed
        TransferFailed,
        /// Caller holds fewer locked tokens than the claim amount
        InsufficientLockedBalance,
        /// No vesting entry under this id for the caller
        NoEntry,
        /// Cliff period not yet elapsed for this entry
        NotReleasable,
        /// Requested more than the currently unlocked-but-unpaid amount
        NotEnoughReleasableAmount,
        /// Entry already fully drained
        AlreadyReleased,
        Overflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// One-time activation. The token collaborators are fixed by runtime
        /// wiring; this only arms the ledger.
        #[pallet::call_index(0)]
        #[pallet::weight(10_000)]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            ensure_signed(origin)?;
            ensure!(!Initialized::<T>::get(), Error::<T>::AlreadyInitialized);
            Initialized::<T>::put(true);
            Self::deposit_event(Event::Initialized);
            Ok(())
        }

        /// Convert `amount` of source token into locked token. The source
        /// tokens move into ledger custody; the caller is credited the same
        /// amount of locked token.
        #[pallet::call_index(1)]
        #[pallet::weight(10_000)]
        pub fn convert(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Initialized::<T>::get(), Error::<T>::NotInitialized);
            ensure!(amount > 0, Error::<T>::ZeroAmount);

            T::SourceToken::transfer(
                &who,
                &Self::custody_account(),
                amount,
                Preservation::Expendable,
            )
            .map_err(|_| Error::<T>::TransferFailed)?;
            T::LockedToken::mint_locked(&who, amount)?;

            Self::deposit_event(Event::Converted { who, amount });
            Ok(())
        }

        /// Burn `amount` of the caller's locked tokens and open a vesting
        /// entry for them, clock-stamped now.
        #[pallet::call_index(2)]
        #[pallet::weight(10_000)]
        pub fn claim(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Initialized::<T>::get(), Error::<T>::NotInitialized);
            ensure!(amount > 0, Error::<T>::ZeroAmount);
            ensure!(
                T::LockedToken::balance_of(&who) >= amount,
                Error::<T>::InsufficientLockedBalance
            );

            T::LockedToken::burn_locked(&who, amount)?;

            let start_time = T::Time::now().as_secs();
            let entry_id = EntryCount::<T>::get(&who);
            let next = entry_id.checked_add(1).ok_or(Error::<T>::Overflow)?;
            Entries::<T>::insert(
                &who,
                entry_id,
                VestingEntry { total_amount: amount, released_amount: 0, start_time },
            );
            EntryCount::<T>::insert(&who, next);

            Self::deposit_event(Event::Claimed { who, entry_id, amount, start_time });
            Ok(())
        }

        /// Pay out unlocked source tokens for the caller's entry `entry_id`.
        /// `ReleaseAmount::All` drains everything currently payable;
        /// `ReleaseAmount::Exact` must not exceed it.
        #[pallet::call_index(3)]
        #[pallet::weight(10_000)]
        pub fn release(
            origin: OriginFor<T>,
            entry_id: u32,
            amount: ReleaseAmount,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Initialized::<T>::get(), Error::<T>::NotInitialized);

            Entries::<T>::try_mutate(&who, entry_id, |maybe_entry| -> DispatchResult {
                let entry = maybe_entry.as_mut().ok_or(Error::<T>::NoEntry)?;
                ensure!(!entry.fully_released(), Error::<T>::AlreadyReleased);

                let now = T::Time::now().as_secs();
                ensure!(
                    now.saturating_sub(entry.start_time) >= T::CliffDuration::get(),
                    Error::<T>::NotReleasable
                );

                let unlocked = Self::unlocked_amount(entry, now)?;
                let payable = unlocked.saturating_sub(entry.released_amount);
                let paying = match amount {
                    ReleaseAmount::All => payable,
                    ReleaseAmount::Exact(exact) => {
                        ensure!(exact <= payable, Error::<T>::NotEnoughReleasableAmount);
                        exact
                    }
                };

                if paying > 0 {
                    T::SourceToken::transfer(
                        &Self::custody_account(),
                        &who,
                        paying,
                        Preservation::Expendable,
                    )
                    .map_err(|_| Error::<T>::TransferFailed)?;
                    entry.released_amount = entry
                        .released_amount
                        .checked_add(paying)
                        .ok_or(Error::<T>::Overflow)?;
                }

                Self::deposit_event(Event::Released { who: who.clone(), entry_id, amount: paying });
                Ok(())
            })
        }
    }

    impl<T: Config> Pallet<T> {
        /// The sovereign account custodying converted source tokens.
        pub fn custody_account() -> T::AccountId {
            T::PalletId::get().into_account_truncating()
        }

        pub fn initialized() -> bool {
            Initialized::<T>::get()
        }

        pub fn vesting_entry(who: &T::AccountId, entry_id: u32) -> Option<VestingEntry> {
            Entries::<T>::get(who, entry_id)
        }

        pub fn entry_count(who: &T::AccountId) -> u32 {
            EntryCount::<T>::get(who)
        }

        /// Unlocked amount for `entry` at `now`, clamped to the entry total.
        /// Zero before the cliff, linear over the vesting window after it.
        fn unlocked_amount(entry: &VestingEntry, now: u64) -> Result<u128, Error<T>> {
            let cliff = T::CliffDuration::get();
            let elapsed = now.saturating_sub(entry.start_time);
            if elapsed < cliff {
                return Ok(0);
            }
            let window = T::VestingDuration::get();
            let accrued = elapsed - cliff;
            if accrued >= window {
                return Ok(entry.total_amount);
            }
            // accrued < window here, so window is nonzero
            entry
                .total_amount
                .checked_mul(accrued as u128)
                .ok_or(Error::<T>::Overflow)
                .map(|scaled| scaled / window as u128)
        }
    }
}
