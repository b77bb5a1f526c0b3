extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::Setup;

#[test]
fn test_referrals_accumulate_per_referee() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();

    let referrer = Address::generate(&s.env);
    let alice = s.staker(&lp, 1_000);
    let bob = s.staker(&lp, 1_000);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &Some(referrer.clone()));
    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 100);
    assert_eq!(s.generator.get_global_referral_amount(&referrer), 100);
    assert_eq!(s.generator.get_referral_count(&referrer), 1);

    s.generator.deposit(&bob, &pid, &100, &Some(referrer.clone()));
    assert_eq!(s.generator.get_referral_value(&referrer, &bob), 100);
    assert_eq!(s.generator.get_global_referral_amount(&referrer), 200);
    assert_eq!(s.generator.get_referral_count(&referrer), 2);

    // A repeat referee raises the amounts but not the count.
    s.generator.deposit(&alice, &pid, &50, &Some(referrer.clone()));
    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 150);
    assert_eq!(s.generator.get_global_referral_amount(&referrer), 250);
    assert_eq!(s.generator.get_referral_count(&referrer), 2);

    assert_eq!(
        s.generator.user_info(&pid, &alice).referrer,
        Some(referrer.clone())
    );
}

#[test]
fn test_referral_records_net_of_deposit_fee() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);

    let referrer = Address::generate(&s.env);
    let alice = s.staker(&lp, 10_000);

    s.generator.deposit(&alice, &pid, &10_000, &Some(referrer.clone()));
    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 9_925);
}

#[test]
fn test_withdraw_reduces_referral_but_keeps_count() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();

    let referrer = Address::generate(&s.env);
    let alice = s.staker(&lp, 1_000);
    let bob = s.staker(&lp, 1_000);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &Some(referrer.clone()));
    s.generator.deposit(&bob, &pid, &100, &Some(referrer.clone()));

    s.at(310);
    s.generator.withdraw(&alice, &pid, &40, &None);
    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 60);
    assert_eq!(s.generator.get_global_referral_amount(&referrer), 160);

    s.generator.withdraw(&alice, &pid, &60, &None);
    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 0);
    assert_eq!(s.generator.get_global_referral_amount(&referrer), 100);
    assert_eq!(s.generator.get_referral_count(&referrer), 2);
}

#[test]
fn test_unknown_referrer_on_withdraw_falls_back_to_recorded() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();

    let referrer = Address::generate(&s.env);
    let other = Address::generate(&s.env);
    let alice = s.staker(&lp, 1_000);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &Some(referrer.clone()));
    s.generator.withdraw(&alice, &pid, &30, &Some(other.clone()));

    assert_eq!(s.generator.get_referral_value(&referrer, &alice), 70);
    assert_eq!(s.generator.get_referral_value(&other, &alice), 0);
}

#[test]
fn test_self_referral_is_ignored() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 1_000);

    s.generator.deposit(&alice, &pid, &100, &Some(alice.clone()));

    assert_eq!(s.generator.get_referral_value(&alice, &alice), 0);
    assert_eq!(s.generator.get_referral_count(&alice), 0);
    assert_eq!(s.generator.user_info(&pid, &alice).referrer, None);
    assert_eq!(s.generator.user_info(&pid, &alice).staked_amount, 100);
}

#[test]
fn test_referrals_never_pay_rewards() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();

    let referrer = Address::generate(&s.env);
    let alice = s.staker(&lp, 1_000);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &Some(referrer.clone()));
    s.at(320);
    s.generator.claim_reward(&alice, &pid);

    assert_eq!(s.token.balance(&alice), 20_000);
    assert_eq!(s.token.total_balance_of(&referrer), 0);
}

#[test]
fn test_withdraw_reduces_named_referrer_then_recorded() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();

    let first = Address::generate(&s.env);
    let second = Address::generate(&s.env);
    let alice = s.staker(&lp, 1_000);

    s.at(300);
    s.generator.deposit(&alice, &pid, &100, &Some(first.clone()));
    s.generator.deposit(&alice, &pid, &100, &Some(second.clone()));
    assert_eq!(s.generator.user_info(&pid, &alice).referrer, Some(first.clone()));

    // The named referrer is drained first, the remainder hits the recorded one.
    s.generator.withdraw(&alice, &pid, &150, &Some(second.clone()));
    assert_eq!(s.generator.get_referral_value(&second, &alice), 0);
    assert_eq!(s.generator.get_referral_value(&first, &alice), 50);

    s.generator.withdraw(&alice, &pid, &50, &Some(second.clone()));
    assert_eq!(s.generator.user_info(&pid, &alice).staked_amount, 0);
    assert_eq!(s.generator.get_referral_value(&first, &alice), 0);
    assert_eq!(s.generator.get_global_referral_amount(&first), 0);
    assert_eq!(s.generator.get_global_referral_amount(&second), 0);
    assert_eq!(s.generator.get_referral_count(&first), 1);
    assert_eq!(s.generator.get_referral_count(&second), 1);
}
