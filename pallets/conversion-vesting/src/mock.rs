use crate as pallet_conversion_vesting;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU128, ConstU32, ConstU64},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

pub const DAY: u64 = 86_400;

// Configure a mock runtime to test the pallet. `Balances` stands in for the
// external source-token ledger; `Timestamp` supplies the clock.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Timestamp: pallet_timestamp,
        Balances: pallet_balances,
        RestrictedToken: pallet_restricted_token,
        Vesting: pallet_conversion_vesting,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<u128>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<1>;
    type WeightInfo = ();
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
    type Balance = u128;
    type ExistentialDeposit = ConstU128<1>;
    type AccountStore = System;
}

impl pallet_restricted_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
}

parameter_types! {
    pub const VestingPalletId: PalletId = PalletId(*b"cnv/vest");
    pub const CliffSeconds: u64 = 60 * DAY;
    pub const VestingWindowSeconds: u64 = 90 * DAY;
}

impl pallet_conversion_vesting::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type SourceToken = Balances;
    type LockedToken = RestrictedToken;
    type Time = Timestamp;
    type PalletId = VestingPalletId;
    type CliffDuration = CliffSeconds;
    type VestingDuration = VestingWindowSeconds;
}

pub const ADMIN: u64 = 1;
pub const HOLDER: u64 = 2;
pub const OTHER: u64 = 3;

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![(ADMIN, 1_000_000), (HOLDER, 1_000_000), (OTHER, 50_000)],
        ..Default::default()
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_restricted_token::GenesisConfig::<Test> {
        admin: Some(ADMIN),
        token_name: b"Test Locked Token".to_vec(),
        token_symbol: b"TLT".to_vec(),
        decimals: 6,
        whitelisted_accounts: vec![],
        initial_balances: vec![],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    t.into()
}
