#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for pool accrual driven through the contract.
//!
//! Invariants tested:
//! - `acc_reward_per_share` never decreases across accruals
//! - `pending_reward` is never negative for any staker
//! - Farmers are never paid more than was minted for them

use proptest::prelude::*;
use reward_token::{RewardToken, RewardTokenClient};
use rewards_generator::config::Beneficiaries;
use rewards_generator::fees::{FeeTier, FEE_DENOMINATOR};
use rewards_generator::{RewardsGenerator, RewardsGeneratorClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{vec, Address, Env, String};

const START: u32 = 100;

struct World {
    env: Env,
    generator: RewardsGeneratorClient<'static>,
    token: RewardTokenClient<'static>,
    asset: Address,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(10);

    let token_id = env.register(RewardToken, ());
    let token = RewardTokenClient::new(&env, &token_id);
    token.initialize(
        &Address::generate(&env),
        &String::from_str(&env, "Harvest"),
        &String::from_str(&env, "HRV"),
        &3_000,
        &3_500,
        &i128::MAX,
    );

    let generator_id = env.register(RewardsGenerator, ());
    let generator = RewardsGeneratorClient::new(&env, &generator_id);
    let owner = Address::generate(&env);
    let beneficiaries = Beneficiaries {
        dev: Address::generate(&env),
        liquidity: Address::generate(&env),
        community: Address::generate(&env),
        founder: Address::generate(&env),
    };
    generator.initialize(
        &owner,
        &token_id,
        &beneficiaries,
        &1_000_000,
        &START,
        &500,
        &vec![&env, 8, 4, 2, 1],
    );
    token.transfer_ownership(&generator_id);

    let tiers = vec![
        &env,
        FeeTier {
            start_offset: 0,
            end_offset: u32::MAX,
            user_bps: FEE_DENOMINATOR,
            dev_bps: 0,
        },
    ];
    generator.set_fee_tiers(&owner, &tiers);
    generator.set_deposit_fee(&owner, &FEE_DENOMINATOR, &0);
    generator.set_lock_percentage(&owner, &0);

    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    generator.add_pool(&owner, &asset, &100, &false);

    World {
        env,
        generator,
        token,
        asset,
    }
}

/// One step of a random staking session.
#[derive(Clone, Debug)]
enum Action {
    Deposit { who: usize, amount: i128 },
    Withdraw { who: usize, amount: i128 },
    Claim { who: usize },
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..3, 1i128..1_000_000).prop_map(|(who, amount)| Action::Deposit { who, amount }),
        (0usize..3, 1i128..1_000_000).prop_map(|(who, amount)| Action::Withdraw { who, amount }),
        (0usize..3).prop_map(|who| Action::Claim { who }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_accumulator_monotonic_and_pending_non_negative(
        steps in prop::collection::vec((1u32..60, action()), 1..24),
    ) {
        let world = setup();
        let stakers: std::vec::Vec<Address> = (0..3)
            .map(|_| {
                let who = Address::generate(&world.env);
                StellarAssetClient::new(&world.env, &world.asset).mint(&who, &100_000_000);
                who
            })
            .collect();

        let mut height = 90u32;
        let mut last_acc = 0i128;
        for (gap, step) in steps {
            height += gap;
            world.env.ledger().set_sequence_number(height);

            match step {
                Action::Deposit { who, amount } => {
                    world.generator.deposit(&stakers[who], &0, &amount, &None);
                }
                Action::Withdraw { who, amount } => {
                    let staked = world.generator.user_info(&0, &stakers[who]).staked_amount;
                    let amount = amount.min(staked);
                    if amount > 0 {
                        world.generator.withdraw(&stakers[who], &0, &amount, &None);
                    }
                }
                Action::Claim { who } => {
                    world.generator.claim_reward(&stakers[who], &0);
                }
            }

            let acc = world.generator.pool_info(&0).acc_reward_per_share;
            prop_assert!(acc >= last_acc);
            last_acc = acc;

            for who in &stakers {
                prop_assert!(world.generator.pending_reward(&0, who) >= 0);
            }
        }

        // Everything paid out came from what was minted to the generator.
        let paid: i128 = stakers.iter().map(|who| world.token.balance(who)).sum();
        let held = world.token.balance(&world.generator.address);
        prop_assert_eq!(paid + held, world.token.total_supply());
    }
}
