use crate as pallet_restricted_token;
use frame_support::{
    derive_impl,
    traits::{ConstU32, ConstU64},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        RestrictedToken: pallet_restricted_token,
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
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_restricted_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
}

pub const ADMIN: u64 = 1;

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_restricted_token::GenesisConfig::<Test> {
        admin: Some(ADMIN),
        token_name: b"Test Locked Token".to_vec(),
        token_symbol: b"TLT".to_vec(),
        decimals: 6,
        whitelisted_accounts: vec![2, 3],
        initial_balances: vec![(2, 1_000_000), (3, 500_000)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    t.into()
}

/// Genesis without an admin, for exercising `initialize`.
pub fn new_test_ext_uninitialized() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_restricted_token::GenesisConfig::<Test> {
        admin: None,
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
