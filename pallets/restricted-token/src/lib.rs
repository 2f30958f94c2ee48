#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated weight constants for MVP (will be replaced by benchmarks later)
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;

pub mod migrations;

#[cfg(test)]
mod mock;


/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Balance-mutation seam consumed by the conversion vesting ledger.
///
/// The vesting pallet credits locked tokens on conversion and debits them
/// when a vesting entry is opened. It goes through this interface only;
/// it never touches this pallet's storage directly. Authorization is by
/// runtime wiring: whichever pallet is given this seam holds it.
pub trait LockedLedger<AccountId> {
    fn balance_of(who: &AccountId) -> u128;
    fn mint_locked(to: &AccountId, amount: u128) -> DispatchResult;
    fn burn_locked(from: &AccountId, amount: u128) -> DispatchResult;
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Moorline Locked Token")
    #[pallet::storage]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "MLT")
    #[pallet::storage]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Token decimals (e.g., 6 for USDC-style, 18 for ETH-style)
    #[pallet::storage]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// The privileged account, set exactly once (genesis or `initialize`).
    /// Every mint/burn/whitelist/vesting-address mutation is gated on it.
    #[pallet::storage]
    pub type Admin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Accounts exempt from the transfer restriction (sender side).
    #[pallet::storage]
    pub type Whitelist<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// The conversion vesting ledger's account. Exempt from the transfer
    /// restriction so the ledger can move balances it custodies.
    #[pallet::storage]
    pub type VestingAddress<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// One-time setup completed; the caller became admin
        Initialized { admin: T::AccountId },
        /// New tokens minted
        Minted { to: T::AccountId, amount: u128 },
        /// Tokens burned
        Burned { from: T::AccountId, amount: u128 },
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Whitelist membership flipped for an account
        WhitelistToggled { account: T::AccountId, whitelisted: bool },
        /// The vesting ledger account was registered
        VestingAddressSet { account: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// One-time setup invoked more than once
        AlreadyInitialized,
        /// Caller is not the admin
        Unauthorized,
        /// Sender balance too low for the requested debit
        InsufficientBalance,
        /// Sender is not admin, whitelisted, or the vesting ledger
        NotTransferable,
        /// A positive amount is required here
        ZeroAmount,
        /// The vesting address can only be set once
        AlreadySet,
        Overflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// One-time setup: the caller becomes admin. Fails if an admin
        /// already exists, including one seeded at genesis.
        #[pallet::call_index(0)]
        #[pallet::weight(10_000)]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Admin::<T>::get().is_none(), Error::<T>::AlreadyInitialized);
            Admin::<T>::put(&who);
            Self::deposit_event(Event::Initialized { admin: who });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(10_000)]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            Self::ensure_admin(origin)?;
            ensure!(amount > 0, Error::<T>::ZeroAmount);
            Self::do_mint(&to, amount)?;
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(10_000)]
        pub fn burn(origin: OriginFor<T>, from: T::AccountId, amount: u128) -> DispatchResult {
            Self::ensure_admin(origin)?;
            Self::do_burn(&from, amount)?;
            Ok(())
        }

        /// Transfer to any account. Only the admin, whitelisted accounts,
        /// and the vesting ledger may send; anyone may receive.
        #[pallet::call_index(3)]
        #[pallet::weight(10_000)]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            ensure!(Self::can_transfer(&sender), Error::<T>::NotTransferable);
            let sender_balance = Balances::<T>::get(&sender);
            ensure!(sender_balance >= amount, Error::<T>::InsufficientBalance);
            if sender != to {
                let receiver_balance = Balances::<T>::get(&to)
                    .checked_add(amount)
                    .ok_or(Error::<T>::Overflow)?;
                Balances::<T>::insert(&sender, sender_balance - amount);
                Balances::<T>::insert(&to, receiver_balance);
            }
            Self::deposit_event(Event::Transferred { from: sender, to, amount });
            Ok(())
        }

        /// Flip whitelist membership for `account`.
        #[pallet::call_index(4)]
        #[pallet::weight(10_000)]
        pub fn toggle_whitelist(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_admin(origin)?;
            let whitelisted = !Whitelist::<T>::get(&account);
            if whitelisted {
                Whitelist::<T>::insert(&account, true);
            } else {
                Whitelist::<T>::remove(&account);
            }
            Self::deposit_event(Event::WhitelistToggled { account, whitelisted });
            Ok(())
        }

        /// Register the conversion vesting ledger's account. May be called
        /// once; repeats fail with `AlreadySet`.
        #[pallet::call_index(5)]
        #[pallet::weight(10_000)]
        pub fn set_vesting_address(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            Self::ensure_admin(origin)?;
            ensure!(VestingAddress::<T>::get().is_none(), Error::<T>::AlreadySet);
            VestingAddress::<T>::put(&account);
            Self::deposit_event(Event::VestingAddressSet { account });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn admin() -> Option<T::AccountId> {
            Admin::<T>::get()
        }

        pub fn balance_of(who: &T::AccountId) -> u128 {
            Balances::<T>::get(who)
        }

        pub fn total_supply() -> u128 {
            TotalSupply::<T>::get()
        }

        pub fn whitelist(who: &T::AccountId) -> bool {
            Whitelist::<T>::get(who)
        }

        pub fn vesting_address() -> Option<T::AccountId> {
            VestingAddress::<T>::get()
        }

        pub fn token_name() -> Vec<u8> {
            TokenName::<T>::get().into_inner()
        }

        pub fn token_symbol() -> Vec<u8> {
            TokenSymbol::<T>::get().into_inner()
        }

        pub fn decimals() -> u8 {
            Decimals::<T>::get()
        }

        fn ensure_admin(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
            let who = ensure_signed(origin)?;
            ensure!(Admin::<T>::get().as_ref() == Some(&who), Error::<T>::Unauthorized);
            Ok(who)
        }

        fn can_transfer(sender: &T::AccountId) -> bool {
            Admin::<T>::get().as_ref() == Some(sender)
                || Whitelist::<T>::get(sender)
                || VestingAddress::<T>::get().as_ref() == Some(sender)
        }

        fn do_mint(to: &T::AccountId, amount: u128) -> DispatchResult {
            let supply = TotalSupply::<T>::get()
                .checked_add(amount)
                .ok_or(Error::<T>::Overflow)?;
            let balance = Balances::<T>::get(to)
                .checked_add(amount)
                .ok_or(Error::<T>::Overflow)?;
            TotalSupply::<T>::put(supply);
            Balances::<T>::insert(to, balance);
            Self::deposit_event(Event::Minted { to: to.clone(), amount });
            Ok(())
        }

        fn do_burn(from: &T::AccountId, amount: u128) -> DispatchResult {
            let balance = Balances::<T>::get(from);
            ensure!(balance >= amount, Error::<T>::InsufficientBalance);
            Balances::<T>::insert(from, balance - amount);
            TotalSupply::<T>::mutate(|supply| *supply -= amount);
            Self::deposit_event(Event::Burned { from: from.clone(), amount });
            Ok(())
        }
    }

    impl<T: Config> LockedLedger<T::AccountId> for Pallet<T> {
        fn balance_of(who: &T::AccountId) -> u128 {
            Balances::<T>::get(who)
        }

        fn mint_locked(to: &T::AccountId, amount: u128) -> DispatchResult {
            Self::do_mint(to, amount)
        }

        fn burn_locked(from: &T::AccountId, amount: u128) -> DispatchResult {
            Self::do_burn(from, amount)
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial admin account
        pub admin: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Accounts to whitelist at genesis
        pub whitelisted_accounts: Vec<T::AccountId>,
        /// Initial token mints (account, amount)
        pub initial_balances: Vec<(T::AccountId, u128)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            if let Some(ref admin) = self.admin {
                Admin::<T>::put(admin);
            }

            for account in &self.whitelisted_accounts {
                Whitelist::<T>::insert(account, true);
            }

            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                Balances::<T>::insert(account, amount);
                total = total.saturating_add(*amount);
            }
            TotalSupply::<T>::put(total);
        }
    }
}
