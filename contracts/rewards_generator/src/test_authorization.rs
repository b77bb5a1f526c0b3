extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::config::SharePercentages;
use crate::test::Setup;
use crate::ContractError;

#[test]
fn test_outsider_cannot_mutate() {
    let s = Setup::new(&[1]);
    let outsider = Address::generate(&s.env);
    let lp = s.new_asset();

    assert_eq!(
        s.generator.try_add_pool(&outsider, &lp, &100, &false),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator.try_set_reward_per_block(&outsider, &1),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator
            .try_set_percentages(&outsider, &SharePercentages::default()),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator.try_set_dev_address(&outsider, &outsider),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator
            .try_reset_schedule(&outsider, &vec![&s.env, 2_000]),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(s.generator.pool_length(), 0);
}

#[test]
fn test_authorized_principal_can_manage_pools() {
    let s = Setup::new(&[1]);
    let operator = Address::generate(&s.env);
    let lp = s.new_asset();

    s.generator.add_authorized(&s.owner, &operator);
    assert!(s.generator.is_authorized(&operator));
    assert_eq!(s.generator.authorized_list(), vec![&s.env, operator.clone()]);

    s.generator.add_pool(&operator, &lp, &100, &false);
    s.generator.set_lock_percentage(&operator, &10);
    assert_eq!(s.generator.pool_length(), 1);
    assert_eq!(s.generator.config().percent_lock, 10);

    s.generator.revoke_authorized(&s.owner, &operator);
    assert!(!s.generator.is_authorized(&operator));
    assert_eq!(
        s.generator.try_set_pool(&operator, &0, &1, &false),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_only_owner_manages_authorized_set() {
    let s = Setup::new(&[1]);
    let operator = Address::generate(&s.env);
    let outsider = Address::generate(&s.env);
    s.generator.add_authorized(&s.owner, &operator);

    assert_eq!(
        s.generator.try_add_authorized(&operator, &outsider),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator.try_revoke_authorized(&operator, &operator),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator.try_transfer_ownership(&operator, &operator),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        s.generator.try_reclaim_token_ownership(&operator, &operator),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(s.generator.owner(), s.owner);
}

#[test]
fn test_transfer_ownership() {
    let s = Setup::new(&[1]);
    let successor = Address::generate(&s.env);

    s.generator.transfer_ownership(&s.owner, &successor);
    assert_eq!(s.generator.owner(), successor);
    assert!(!s.generator.is_authorized(&s.owner));

    s.generator.add_authorized(&successor, &s.owner);
    assert!(s.generator.is_authorized(&s.owner));
}

#[test]
fn test_reclaim_token_ownership_stops_minting() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();
    let pid = s.add_pool(&lp, 100);
    s.without_fees();
    let alice = s.staker(&lp, 10);

    s.at(300);
    s.generator.deposit(&alice, &pid, &10, &None);

    let treasury = Address::generate(&s.env);
    s.generator.reclaim_token_ownership(&s.owner, &treasury);
    assert_eq!(s.token.owner(), treasury);

    // The generator can no longer mint, so accrual fails.
    s.at(310);
    assert!(s.generator.try_claim_reward(&alice, &pid).is_err());
    assert_eq!(s.token.total_supply(), 0);
}

#[test]
fn test_privileged_calls_require_signature() {
    let s = Setup::new(&[1]);
    let lp = s.new_asset();

    s.env.set_auths(&[]);
    assert!(s
        .generator
        .try_add_pool(&s.owner, &lp, &100, &false)
        .is_err());
}
