extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::fees::FeeTier;
use crate::test::Setup;
use crate::ContractError;

const STAKE: i128 = 1_000_000_000;

#[test]
fn test_withdraw_more_than_staked() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 100);

    s.generator.deposit(&alice, &pid, &100, &None);
    assert_eq!(
        s.generator.try_withdraw(&alice, &pid, &101, &None),
        Err(Ok(ContractError::InsufficientStakedBalance))
    );
    assert_eq!(
        s.generator.try_withdraw(&alice, &pid, &0, &None),
        Err(Ok(ContractError::ZeroAmount))
    );
    assert_eq!(s.generator.user_info(&pid, &alice).staked_amount, 100);
}

#[test]
fn test_withdraw_applies_fee_tier_for_elapsed_heights() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.generator.set_deposit_fee(&s.owner, &10_000, &0);
    let tiers = vec![
        &s.env,
        FeeTier {
            start_offset: 0,
            end_offset: 0,
            user_bps: 7_500,
            dev_bps: 2_500,
        },
        FeeTier {
            start_offset: 1,
            end_offset: 99,
            user_bps: 9_200,
            dev_bps: 800,
        },
        FeeTier {
            start_offset: 100,
            end_offset: 100,
            user_bps: 9_900,
            dev_bps: 100,
        },
    ];
    s.generator.set_fee_tiers(&s.owner, &tiers);
    let alice = s.staker(&lp, 10_000);
    let dev = s.beneficiaries.dev.clone();

    s.at(400);
    s.generator.deposit(&alice, &pid, &10_000, &None);

    s.at(450);
    assert_eq!(s.generator.user_delta(&pid, &alice), 50);
    s.generator.withdraw(&alice, &pid, &1_000, &None);
    assert_eq!(s.asset_balance(&lp, &alice), 920);
    assert_eq!(s.asset_balance(&lp, &dev), 80);

    // The withdrawal restarted the clock; 200 heights is past the last tier.
    s.at(650);
    s.generator.withdraw(&alice, &pid, &1_000, &None);
    assert_eq!(s.asset_balance(&lp, &alice), 920 + 990);
    assert_eq!(s.asset_balance(&lp, &dev), 80 + 10);

    let position = s.generator.user_info(&pid, &alice);
    assert_eq!(position.staked_amount, 8_000);
    assert_eq!(position.last_withdraw_height, 650);
    assert_eq!(position.first_deposit_height, 400);
}

#[test]
fn test_withdraw_pays_pending_reward() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 100);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &None);
    s.at(305);
    s.generator.withdraw(&alice, &pid, &100, &None);

    assert_eq!(s.token.balance(&alice), 5_000);
    assert_eq!(s.asset_balance(&lp, &alice), 100);
    assert_eq!(s.generator.user_info(&pid, &alice).reward_debt, 0);
}

#[test]
fn test_emergency_withdraw_same_height() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    let alice = s.staker(&lp, STAKE);
    let dev = s.beneficiaries.dev.clone();

    s.at(400);
    s.generator.deposit(&alice, &pid, &STAKE, &None);
    let received = s.generator.emergency_withdraw(&alice, &pid);

    assert_eq!(received, 744_375_000);
    assert_eq!(s.asset_balance(&lp, &alice), 744_375_000);
    assert_eq!(s.asset_balance(&lp, &dev), 7_500_000 + 248_125_000);
    assert_eq!(s.asset_balance(&lp, &s.generator.address), 0);
}

#[test]
fn test_emergency_withdraw_forfeits_pending_reward() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 100);
    let bob = s.staker(&lp, 100);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &None);
    s.generator.deposit(&bob, &pid, &100, &None);

    s.at(320);
    assert_eq!(s.generator.pending_reward(&pid, &alice), 10_000);
    s.generator.emergency_withdraw(&alice, &pid);

    let position = s.generator.user_info(&pid, &alice);
    assert_eq!(position.staked_amount, 0);
    assert_eq!(position.reward_debt, 0);
    assert_eq!(s.generator.pending_reward(&pid, &alice), 0);
    assert_eq!(s.token.total_balance_of(&alice), 0);
    assert_eq!(s.asset_balance(&lp, &alice), 100);

    // The exit skips accrual, so Bob picks up the whole emission since 300.
    s.at(330);
    assert_eq!(s.generator.pending_reward(&pid, &bob), 30_000);
    assert_eq!(s.token.total_supply(), 0);
}

#[test]
fn test_emergency_withdraw_after_token_ownership_reclaimed() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 100);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &None);

    let treasury = Address::generate(&s.env);
    s.generator.reclaim_token_ownership(&s.owner, &treasury);

    // Minting is gone, the exit still returns the stake.
    s.at(320);
    assert!(s.generator.try_claim_reward(&alice, &pid).is_err());
    assert_eq!(s.generator.emergency_withdraw(&alice, &pid), 100);

    assert_eq!(s.asset_balance(&lp, &alice), 100);
    assert_eq!(s.generator.user_info(&pid, &alice).staked_amount, 0);
    assert_eq!(s.generator.pool_info(&pid).total_staked, 0);
    assert_eq!(s.token.total_supply(), 0);
}

#[test]
fn test_emergency_withdraw_without_stake() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    let alice = s.staker(&lp, 100);

    assert_eq!(
        s.generator.try_emergency_withdraw(&alice, &pid),
        Err(Ok(ContractError::InsufficientStakedBalance))
    );
}
