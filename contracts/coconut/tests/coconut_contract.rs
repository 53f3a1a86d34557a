// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use nym_chainspace_contract::{Contract, MethodCall, Transaction};
use nym_coconut::tests::helpers::{threshold_authorities, ThresholdAuthorities};
use nym_coconut::{
    elgamal_keygen, hash_to_scalar, pack_g1, pack_scalar, setup, Attribute, ElGamalKeyPair,
    Parameters,
};
use nym_coconut_contract::contract::{
    CreateArgs, RequestIssueArgs, CREATE, INIT, REQUEST_ISSUE,
};
use nym_coconut_contract::objects::{CoCoInstance, PackedSignature, PackedVerifier};
use nym_coconut_contract::{coconut_contract, CoCoObject, ContractConfig};
use serde_json::json;

const CALLBACK: &str = "bank::issue";

struct Setup {
    contract: Contract,
    params: Parameters,
    authorities: ThresholdAuthorities,
    create_tx: Transaction,
}

fn token(contract: &Contract) -> Vec<String> {
    contract
        .execute(INIT, MethodCall::default())
        .unwrap()
        .outputs
}

fn honest_setup(config: ContractConfig, q: u32, t: u64, n: u64) -> Setup {
    let contract = coconut_contract(config).unwrap();
    let params = setup(q).unwrap();
    let authorities = threshold_authorities(&params, t, n).unwrap();

    let instance = CoCoInstance::new(q, t, n, CALLBACK, &authorities.verification_key);
    let signature = authorities
        .sign(&params, &[instance.signing_message().unwrap()])
        .unwrap();

    let args = CreateArgs {
        q,
        t,
        n,
        callback: CALLBACK.to_string(),
        verifier: PackedVerifier::from(&authorities.verification_key),
        sig: PackedSignature::from(&signature),
    };
    let call = MethodCall::new(token(&contract), serde_json::to_value(args).unwrap());
    let create_tx = contract.execute(CREATE, call).unwrap();

    Setup {
        contract,
        params,
        authorities,
        create_tx,
    }
}

/// Assembles a `create` transaction by hand, bypassing the checks of the method.
fn signed_create_tx(
    contract: &Contract,
    params: &Parameters,
    authorities: &ThresholdAuthorities,
    instance: &CoCoInstance,
) -> Transaction {
    let encoded = instance.encode().unwrap();
    let signature = authorities
        .sign(params, &[instance.signing_message().unwrap()])
        .unwrap();

    let token = token(contract);
    Transaction {
        contract_id: contract.contract_id().to_string(),
        operation: CREATE.to_string(),
        inputs: token.clone(),
        reference_inputs: vec![],
        parameters: vec![PackedSignature::from(&signature).encode().unwrap()],
        outputs: vec![token[0].clone(), encoded],
        returns: vec![],
        dependencies: vec![],
    }
}

fn request_issue_tx(
    setup: &Setup,
    clear_m: &[Attribute],
    hidden_m: &[Attribute],
    elgamal: &ElGamalKeyPair,
) -> Transaction {
    let args = RequestIssueArgs {
        q: setup.params.max_attributes() as u32,
        clear_m: clear_m.iter().map(pack_scalar).collect(),
        hidden_m: hidden_m.iter().map(pack_scalar).collect(),
        pub_key: pack_g1(elgamal.public_key().inner()),
    };
    let call = MethodCall::new(
        vec![setup.create_tx.outputs[1].clone()],
        serde_json::to_value(args).unwrap(),
    );
    setup.contract.execute(REQUEST_ISSUE, call).unwrap()
}

#[test]
fn init_checker_enforces_arity() {
    let contract = coconut_contract(ContractConfig::default()).unwrap();
    let tx = contract.execute(INIT, MethodCall::default()).unwrap();
    assert!(contract.check(&tx));

    let mut with_input = tx.clone();
    with_input.inputs.push(tx.outputs[0].clone());
    assert!(!contract.check(&with_input));

    let mut two_tokens = tx.clone();
    two_tokens.outputs.push(tx.outputs[0].clone());
    assert!(!contract.check(&two_tokens));

    let mut with_return = tx.clone();
    with_return.returns.push("foo".to_string());
    assert!(!contract.check(&with_return));

    let mut not_a_token = tx;
    not_a_token.outputs[0] = json!({"type": "CoCoList", "list": []}).to_string();
    assert!(!contract.check(&not_a_token));
}

#[test]
fn honest_instance_is_accepted_deterministically() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);

    assert!(setup.contract.check(&setup.create_tx));
    assert!(setup.contract.check(&setup.create_tx));

    let setup = honest_setup(ContractConfig::default(), 3, 1, 1);
    assert!(setup.contract.check(&setup.create_tx));
}

#[test]
fn tampered_instance_is_rejected() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);

    // flip a single character of the callback
    let mut tx = setup.create_tx.clone();
    tx.outputs[1] = tx.outputs[1].replacen("bank::issue", "bank::issuf", 1);
    assert_ne!(tx.outputs[1], setup.create_tx.outputs[1]);
    assert!(!setup.contract.check(&tx));

    // a still valid policy that the authorities never signed
    let mut tx = setup.create_tx.clone();
    tx.outputs[1] = tx.outputs[1].replacen(r#""t":2"#, r#""t":3"#, 1);
    assert!(!setup.contract.check(&tx));

    // the signature doesn't parse
    let mut tx = setup.create_tx.clone();
    tx.parameters[0] = r#"["foo","bar"]"#.to_string();
    assert!(!setup.contract.check(&tx));

    // not even valid json
    let mut tx = setup.create_tx;
    tx.outputs[1].push('}');
    assert!(!setup.contract.check(&tx));
}

#[test]
fn create_checker_enforces_arity() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);
    let honest = &setup.create_tx;

    let mut tx = honest.clone();
    tx.inputs.push(honest.inputs[0].clone());
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.inputs.clear();
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.reference_inputs.push(honest.inputs[0].clone());
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.outputs.push(honest.outputs[1].clone());
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.returns.push("foo".to_string());
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.parameters.clear();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn echo_violation_is_rejected_despite_valid_signature() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);

    let mut tx = setup.create_tx.clone();
    tx.outputs[0] = format!("{} ", tx.outputs[0]);
    assert!(!setup.contract.check(&tx));

    let mut tx = setup.create_tx;
    tx.inputs[0] = json!({"type": "CoCoList", "list": []}).to_string();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn invalid_policy_is_rejected_despite_valid_signature() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);

    // t > n, signed by the authorities nevertheless
    let instance = CoCoInstance::new(1, 4, 3, CALLBACK, &setup.authorities.verification_key);
    let tx = signed_create_tx(
        &setup.contract,
        &setup.params,
        &setup.authorities,
        &instance,
    );
    assert!(!setup.contract.check(&tx));

    // sanity check: the same construction with a valid policy is accepted
    let instance = CoCoInstance::new(1, 2, 3, CALLBACK, &setup.authorities.verification_key);
    let tx = signed_create_tx(
        &setup.contract,
        &setup.params,
        &setup.authorities,
        &instance,
    );
    assert!(setup.contract.check(&tx));
}

#[test]
fn oversized_instances_are_rejected() {
    let config = ContractConfig {
        max_attributes: 1,
        ..Default::default()
    };
    let contract = coconut_contract(config).unwrap();

    let params = setup(2).unwrap();
    let authorities = threshold_authorities(&params, 1, 1).unwrap();
    let instance = CoCoInstance::new(2, 1, 1, CALLBACK, &authorities.verification_key);

    let tx = signed_create_tx(&contract, &params, &authorities, &instance);
    assert!(!contract.check(&tx));

    // the same transaction is fine under the default bound
    let default_contract = coconut_contract(ContractConfig::default()).unwrap();
    assert!(default_contract.check(&tx));
}

#[test]
fn object_tag_mismatch_is_rejected() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);

    let mut tx = setup.create_tx;
    tx.outputs[1] = CoCoObject::CoCoToken.encode().unwrap();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn honest_request_is_accepted() {
    let setup = honest_setup(ContractConfig::default(), 3, 2, 3);
    let elgamal = elgamal_keygen(&setup.params);

    let tx = request_issue_tx(
        &setup,
        &[hash_to_scalar("clear")],
        &[hash_to_scalar("hidden1"), hash_to_scalar("hidden2")],
        &elgamal,
    );
    assert!(setup.contract.check(&tx));
    assert!(setup.contract.check(&tx));
}

#[test]
fn request_with_foreign_ciphertexts_is_rejected() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);
    let elgamal = elgamal_keygen(&setup.params);

    let original = request_issue_tx(&setup, &[], &[hash_to_scalar("m1")], &elgamal);
    let other = request_issue_tx(&setup, &[], &[hash_to_scalar("m2")], &elgamal);

    // ciphertexts of a different hidden vector together with the original proof
    let mut original_request = CoCoObject::decode_request(&original.outputs[1]).unwrap();
    let other_request = CoCoObject::decode_request(&other.outputs[1]).unwrap();
    original_request.c = other_request.c;

    let mut tx = original.clone();
    tx.outputs[1] = original_request.encode().unwrap();
    assert!(!setup.contract.check(&tx));

    // proof of another request
    let mut tx = original.clone();
    tx.parameters[0] = other.parameters[0].clone();
    assert!(!setup.contract.check(&tx));

    // garbage proof
    let mut tx = original;
    tx.parameters[0] = "foomp".to_string();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn request_checker_enforces_structure() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);
    let elgamal = elgamal_keygen(&setup.params);
    let honest = request_issue_tx(&setup, &[], &[hash_to_scalar("m1")], &elgamal);
    assert!(setup.contract.check(&honest));

    let mut tx = honest.clone();
    tx.parameters.pop();
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.reference_inputs.push(honest.inputs[0].clone());
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.returns.push("foo".to_string());
    assert!(!setup.contract.check(&tx));

    // the first output must be the consumed instance
    let mut tx = honest.clone();
    tx.inputs[0] = setup.create_tx.outputs[0].clone();
    assert!(!setup.contract.check(&tx));

    let mut tx = honest.clone();
    tx.outputs[0] = setup.create_tx.outputs[0].clone();
    tx.inputs[0] = setup.create_tx.outputs[0].clone();
    assert!(!setup.contract.check(&tx));

    // the request must be a request
    let mut tx = honest;
    tx.outputs[1] = setup.create_tx.outputs[1].clone();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn credential_lifecycle_end_to_end() {
    // q = 1, t = 2, n = 3
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);
    assert!(setup.contract.check(&setup.create_tx));

    let elgamal = elgamal_keygen(&setup.params);
    let tx = request_issue_tx(&setup, &[], &[hash_to_scalar("m1")], &elgamal);
    assert!(setup.contract.check(&tx));

    // a different public key than the one the attributes were encrypted under
    let other = elgamal_keygen(&setup.params);
    let mut tampered = tx.clone();
    tampered.parameters[1] = pack_g1(other.public_key().inner());
    assert!(!setup.contract.check(&tampered));

    // the transaction survives the wire format
    let wire = serde_json::to_string(&tx).unwrap();
    let decoded: Transaction = serde_json::from_str(&wire).unwrap();
    assert!(setup.contract.check(&decoded));
}

#[test]
fn unknown_operations_are_rejected() {
    let setup = honest_setup(ContractConfig::default(), 1, 1, 1);

    let mut tx = setup.create_tx.clone();
    tx.operation = "issue".to_string();
    assert!(!setup.contract.check(&tx));

    let mut tx = setup.create_tx;
    tx.contract_id = "bank".to_string();
    assert!(!setup.contract.check(&tx));
}

#[test]
fn checkers_can_run_concurrently() {
    let setup = honest_setup(ContractConfig::default(), 1, 2, 3);
    let elgamal = elgamal_keygen(&setup.params);
    let request = request_issue_tx(&setup, &[], &[hash_to_scalar("m1")], &elgamal);

    std::thread::scope(|s| {
        let handles = (0..4)
            .map(|i| {
                let tx = if i % 2 == 0 {
                    &setup.create_tx
                } else {
                    &request
                };
                let contract = &setup.contract;
                s.spawn(move || contract.check(tx))
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
